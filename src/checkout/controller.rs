use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{get, post},
    Router,
};
use serde_json::{Value};
use crate::checkout::command::borrow_book_cmd::{BorrowBookCommand, BorrowBookCommandRequest, BorrowBookCommandResponse};
use crate::checkout::command::delete_loan_cmd::{DeleteLoanCommand, DeleteLoanCommandRequest, DeleteLoanCommandResponse};
use crate::checkout::command::due_soon_loans_cmd::{DueSoonLoansCommand, DueSoonLoansCommandRequest, DueSoonLoansCommandResponse};
use crate::checkout::command::find_loans_cmd::{FindLoansCommand, FindLoansCommandRequest, FindLoansCommandResponse};
use crate::checkout::command::fines_report_cmd::{FinesReportCommand, FinesReportCommandRequest, FinesReportCommandResponse};
use crate::checkout::command::get_loan_cmd::{GetLoanCommand, GetLoanCommandRequest, GetLoanCommandResponse};
use crate::checkout::command::library_stats_cmd::{LibraryStatsCommand, LibraryStatsCommandRequest, LibraryStatsCommandResponse};
use crate::checkout::command::loan_fine_cmd::{LoanFineCommand, LoanFineCommandRequest, LoanFineCommandResponse};
use crate::checkout::command::overdue_loans_cmd::{OverdueLoansCommand, OverdueLoansCommandRequest, OverdueLoansCommandResponse};
use crate::checkout::command::return_book_cmd::{ReturnBookCommand, ReturnBookCommandRequest, ReturnBookCommandResponse};
use crate::checkout::domain::CheckoutService;
use crate::checkout::factory;
use crate::core::command::Command;
use crate::core::controller::{AppState, json_to_server_error, ServerError};

/// Routes of the checkout lambda.
pub fn router(state: AppState) -> Router<(), lambda_http::Body> {
    Router::new()
        .route("/checkout", post(borrow_book).get(find_loans))
        .route("/checkout/search", get(find_loans))
        .route("/checkout/overdue", get(overdue_loans))
        .route("/checkout/due-soon", get(due_soon_loans))
        .route("/checkout/fines", get(fines_report))
        .route("/checkout/stats", get(library_stats))
        .route("/checkout/:id", get(find_loan_by_id).delete(delete_loan))
        .route("/checkout/:id/return", post(return_book))
        .route("/checkout/:id/fine", get(loan_fine))
        .with_state(state)
}

async fn build_service(state: AppState) -> Box<dyn CheckoutService> {
    factory::create_checkout_service(&state.config, state.store).await
}

pub(crate) async fn borrow_book(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<Json<BorrowBookCommandResponse>, ServerError> {
    let req: BorrowBookCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let svc = build_service(state).await;
    let res = BorrowBookCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn return_book(
    State(state): State<AppState>,
    Path(loan_id): Path<i64>,
    Query(mut req): Query<ReturnBookCommandRequest>) -> Result<Json<ReturnBookCommandResponse>, ServerError> {
    req.loan_id = loan_id;
    let svc = build_service(state).await;
    let res = ReturnBookCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn delete_loan(
    State(state): State<AppState>,
    Path(loan_id): Path<i64>) -> Result<Json<DeleteLoanCommandResponse>, ServerError> {
    let req = DeleteLoanCommandRequest { loan_id };
    let svc = build_service(state).await;
    let res = DeleteLoanCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn find_loan_by_id(
    State(state): State<AppState>,
    Path(loan_id): Path<i64>) -> Result<Json<GetLoanCommandResponse>, ServerError> {
    let req = GetLoanCommandRequest { loan_id };
    let svc = build_service(state).await;
    let res = GetLoanCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn find_loans(
    State(state): State<AppState>,
    Query(req): Query<FindLoansCommandRequest>) -> Result<Json<FindLoansCommandResponse>, ServerError> {
    let svc = build_service(state).await;
    let res = FindLoansCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn overdue_loans(
    State(state): State<AppState>,
    Query(req): Query<OverdueLoansCommandRequest>) -> Result<Json<OverdueLoansCommandResponse>, ServerError> {
    let svc = build_service(state).await;
    let res = OverdueLoansCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn due_soon_loans(
    State(state): State<AppState>,
    Query(req): Query<DueSoonLoansCommandRequest>) -> Result<Json<DueSoonLoansCommandResponse>, ServerError> {
    let svc = build_service(state).await;
    let res = DueSoonLoansCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn fines_report(
    State(state): State<AppState>,
    Query(req): Query<FinesReportCommandRequest>) -> Result<Json<FinesReportCommandResponse>, ServerError> {
    let svc = build_service(state).await;
    let res = FinesReportCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn loan_fine(
    State(state): State<AppState>,
    Path(loan_id): Path<i64>,
    Query(mut req): Query<LoanFineCommandRequest>) -> Result<Json<LoanFineCommandResponse>, ServerError> {
    req.loan_id = loan_id;
    let svc = build_service(state).await;
    let res = LoanFineCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn library_stats(
    State(state): State<AppState>,
    Query(req): Query<LibraryStatsCommandRequest>) -> Result<Json<LibraryStatsCommandResponse>, ServerError> {
    let svc = build_service(state).await;
    let res = LibraryStatsCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}
