use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{get, post, put},
    Router,
};
use serde_json::{Value};
use crate::checkout::domain::CheckoutService;
use crate::checkout::factory::create_checkout_service;
use crate::core::command::Command;
use crate::core::controller::{AppState, json_to_server_error, ServerError};
use crate::patrons::command::add_patron_cmd::{AddPatronCommand, AddPatronCommandRequest, AddPatronCommandResponse};
use crate::patrons::command::change_tier_cmd::{ChangeTierCommand, ChangeTierCommandRequest, ChangeTierCommandResponse};
use crate::patrons::command::find_patrons_cmd::{FindPatronsCommand, FindPatronsCommandRequest, FindPatronsCommandResponse};
use crate::patrons::command::get_patron_cmd::{GetPatronCommand, GetPatronCommandRequest, GetPatronCommandResponse};
use crate::patrons::command::remove_patron_cmd::{RemovePatronCommand, RemovePatronCommandRequest, RemovePatronCommandResponse};
use crate::patrons::command::update_patron_cmd::{UpdatePatronCommand, UpdatePatronCommandRequest, UpdatePatronCommandResponse};
use crate::patrons::domain::PatronService;
use crate::patrons::factory;

/// Routes of the patrons lambda.
pub fn router(state: AppState) -> Router<(), lambda_http::Body> {
    Router::new()
        .route("/patrons", post(add_patron).get(find_patrons))
        .route("/patrons/search", get(find_patrons))
        .route("/patrons/:id",
               get(find_patron_by_id).put(update_patron).delete(remove_patron))
        .route("/patrons/:id/tier", put(change_tier))
        .with_state(state)
}

async fn build_service(state: AppState) -> Box<dyn PatronService> {
    factory::create_patron_service(&state.config, state.store).await
}

async fn build_checkout_service(state: AppState) -> Box<dyn CheckoutService> {
    create_checkout_service(&state.config, state.store).await
}

pub(crate) async fn add_patron(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<Json<AddPatronCommandResponse>, ServerError> {
    let req: AddPatronCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let svc = build_service(state).await;
    let res = AddPatronCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn find_patron_by_id(
    State(state): State<AppState>,
    Path(member_id): Path<String>) -> Result<Json<GetPatronCommandResponse>, ServerError> {
    let req = GetPatronCommandRequest { member_id };
    let svc = build_service(state).await;
    let res = GetPatronCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn find_patrons(
    State(state): State<AppState>,
    Query(req): Query<FindPatronsCommandRequest>) -> Result<Json<FindPatronsCommandResponse>, ServerError> {
    let svc = build_service(state).await;
    let res = FindPatronsCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn update_patron(
    State(state): State<AppState>,
    Path(member_id): Path<String>,
    json: Json<Value>) -> Result<Json<UpdatePatronCommandResponse>, ServerError> {
    let mut req: UpdatePatronCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    req.member_id = member_id;
    let svc = build_service(state).await;
    let res = UpdatePatronCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn remove_patron(
    State(state): State<AppState>,
    Path(member_id): Path<String>) -> Result<Json<RemovePatronCommandResponse>, ServerError> {
    let req = RemovePatronCommandRequest { member_id };
    let svc = build_checkout_service(state).await;
    let res = RemovePatronCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn change_tier(
    State(state): State<AppState>,
    Path(member_id): Path<String>,
    json: Json<Value>) -> Result<Json<ChangeTierCommandResponse>, ServerError> {
    let mut req: ChangeTierCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    req.member_id = member_id;
    let svc = build_checkout_service(state).await;
    let res = ChangeTierCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}
