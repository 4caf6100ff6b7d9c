use lambda_http::{run, Error};
use library_loans::catalog::controller::router;
use library_loans::core::controller::AppState;
use library_loans::core::domain::Configuration;
use library_loans::core::repository::RepositoryStore;
use library_loans::utils::logs::setup_tracing;

// See https://docs.aws.amazon.com/lambda/latest/dg/lambda-rust.html
// https://docs.aws.amazon.com/lambda/latest/dg/rust-http-events.html

#[tokio::main]
async fn main() -> Result<(), Error> {
    setup_tracing();

    let branch_id = std::env::var("LMS_BRANCH_ID").unwrap_or_else(|_| "main".to_string());
    let state = AppState::new(Configuration::load(branch_id.as_str())?, RepositoryStore::from_env());
    tracing::info!(branch_id = state.config.branch_id.as_str(), store = %state.store, "starting catalog");

    run(router(state)).await
}
