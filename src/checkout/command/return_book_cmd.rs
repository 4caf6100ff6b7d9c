use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use crate::checkout::domain::CheckoutService;
use crate::checkout::dto::LoanDto;
use crate::core::command::{Command, CommandError};
use crate::utils::date::{Clock, SystemClock};

pub(crate) struct ReturnBookCommand {
    checkout_service: Box<dyn CheckoutService>,
}

impl ReturnBookCommand {
    pub(crate) fn new(checkout_service: Box<dyn CheckoutService>) -> Self {
        Self {
            checkout_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReturnBookCommandRequest {
    #[serde(default)]
    pub loan_id: i64,
    // defaults to today
    #[serde(default)]
    pub return_date: Option<NaiveDate>,
}

impl ReturnBookCommandRequest {
    pub fn new(loan_id: i64, return_date: NaiveDate) -> Self {
        Self {
            loan_id,
            return_date: Some(return_date),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ReturnBookCommandResponse {
    pub loan: LoanDto,
}

impl ReturnBookCommandResponse {
    pub fn new(loan: LoanDto) -> Self {
        Self {
            loan,
        }
    }
}

#[async_trait]
impl Command<ReturnBookCommandRequest, ReturnBookCommandResponse> for ReturnBookCommand {
    async fn execute(&self, req: ReturnBookCommandRequest) -> Result<ReturnBookCommandResponse, CommandError> {
        let return_date = req.return_date.unwrap_or_else(|| SystemClock.today());
        self.checkout_service.return_book(req.loan_id, return_date)
            .await.map_err(CommandError::from).map(ReturnBookCommandResponse::new)
    }
}
