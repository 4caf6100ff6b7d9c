use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use crate::checkout::domain::CheckoutService;
use crate::checkout::dto::DueSoonDto;
use crate::core::command::{Command, CommandError};
use crate::utils::date::{Clock, SystemClock};

pub(crate) struct DueSoonLoansCommand {
    checkout_service: Box<dyn CheckoutService>,
}

impl DueSoonLoansCommand {
    pub(crate) fn new(checkout_service: Box<dyn CheckoutService>) -> Self {
        Self {
            checkout_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct DueSoonLoansCommandRequest {
    // defaults to today
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
}

impl DueSoonLoansCommandRequest {
    pub fn new(as_of: NaiveDate) -> Self {
        Self {
            as_of: Some(as_of),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct DueSoonLoansCommandResponse {
    pub loans: Vec<DueSoonDto>,
}

impl DueSoonLoansCommandResponse {
    pub fn new(loans: Vec<DueSoonDto>) -> Self {
        Self {
            loans,
        }
    }
}

#[async_trait]
impl Command<DueSoonLoansCommandRequest, DueSoonLoansCommandResponse> for DueSoonLoansCommand {
    async fn execute(&self, req: DueSoonLoansCommandRequest) -> Result<DueSoonLoansCommandResponse, CommandError> {
        let as_of = req.as_of.unwrap_or_else(|| SystemClock.today());
        self.checkout_service.due_soon_loans(as_of)
            .await.map_err(CommandError::from).map(DueSoonLoansCommandResponse::new)
    }
}
