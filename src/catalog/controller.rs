use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{get, post},
    Router,
};
use serde_json::{Value};
use crate::catalog::command::add_book_cmd::{AddBookCommand, AddBookCommandRequest, AddBookCommandResponse};
use crate::catalog::command::book_availability_cmd::{BookAvailabilityCommand, BookAvailabilityCommandRequest, BookAvailabilityCommandResponse};
use crate::catalog::command::category_breakdown_cmd::{CategoryBreakdownCommand, CategoryBreakdownCommandRequest, CategoryBreakdownCommandResponse};
use crate::catalog::command::find_books_cmd::{FindBooksCommand, FindBooksCommandRequest, FindBooksCommandResponse};
use crate::catalog::command::get_book_cmd::{GetBookCommand, GetBookCommandRequest, GetBookCommandResponse};
use crate::catalog::command::remove_book_cmd::{RemoveBookCommand, RemoveBookCommandRequest, RemoveBookCommandResponse};
use crate::catalog::command::update_book_cmd::{UpdateBookCommand, UpdateBookCommandRequest, UpdateBookCommandResponse};
use crate::catalog::domain::CatalogService;
use crate::catalog::factory;
use crate::checkout::domain::CheckoutService;
use crate::checkout::factory::create_checkout_service;
use crate::core::command::Command;
use crate::core::controller::{AppState, json_to_server_error, ServerError};

/// Routes of the catalog lambda.
pub fn router(state: AppState) -> Router<(), lambda_http::Body> {
    Router::new()
        .route("/catalog", post(add_book).get(find_books))
        .route("/catalog/search", get(find_books))
        .route("/catalog/categories", get(category_breakdown))
        .route("/catalog/:isbn",
               get(find_book_by_id).put(update_book).delete(remove_book))
        .route("/catalog/:isbn/availability", get(book_availability))
        .with_state(state)
}

async fn build_service(state: AppState) -> Box<dyn CatalogService> {
    factory::create_catalog_service(&state.config, state.store).await
}

// edits and removals must respect active loans, so they go through checkout
async fn build_checkout_service(state: AppState) -> Box<dyn CheckoutService> {
    create_checkout_service(&state.config, state.store).await
}

pub(crate) async fn add_book(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<Json<AddBookCommandResponse>, ServerError> {
    let req: AddBookCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let svc = build_service(state).await;
    let res = AddBookCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn find_book_by_id(
    State(state): State<AppState>,
    Path(isbn): Path<String>) -> Result<Json<GetBookCommandResponse>, ServerError> {
    let req = GetBookCommandRequest { isbn };
    let svc = build_service(state).await;
    let res = GetBookCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn find_books(
    State(state): State<AppState>,
    Query(req): Query<FindBooksCommandRequest>) -> Result<Json<FindBooksCommandResponse>, ServerError> {
    let svc = build_service(state).await;
    let res = FindBooksCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn category_breakdown(
    State(state): State<AppState>) -> Result<Json<CategoryBreakdownCommandResponse>, ServerError> {
    let svc = build_service(state).await;
    let res = CategoryBreakdownCommand::new(svc).execute(CategoryBreakdownCommandRequest::default()).await?;
    Ok(Json(res))
}

pub(crate) async fn update_book(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
    json: Json<Value>) -> Result<Json<UpdateBookCommandResponse>, ServerError> {
    let mut req: UpdateBookCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    req.isbn = isbn;
    let svc = build_checkout_service(state).await;
    let res = UpdateBookCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn remove_book(
    State(state): State<AppState>,
    Path(isbn): Path<String>) -> Result<Json<RemoveBookCommandResponse>, ServerError> {
    let req = RemoveBookCommandRequest { isbn };
    let svc = build_checkout_service(state).await;
    let res = RemoveBookCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn book_availability(
    State(state): State<AppState>,
    Path(isbn): Path<String>) -> Result<Json<BookAvailabilityCommandResponse>, ServerError> {
    let req = BookAvailabilityCommandRequest { isbn };
    let svc = build_checkout_service(state).await;
    let res = BookAvailabilityCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}
