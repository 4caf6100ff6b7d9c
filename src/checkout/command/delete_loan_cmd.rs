use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::checkout::domain::CheckoutService;
use crate::core::command::{Command, CommandError};

pub(crate) struct DeleteLoanCommand {
    checkout_service: Box<dyn CheckoutService>,
}

impl DeleteLoanCommand {
    pub(crate) fn new(checkout_service: Box<dyn CheckoutService>) -> Self {
        Self {
            checkout_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct DeleteLoanCommandRequest {
    pub(crate) loan_id: i64,
}

impl DeleteLoanCommandRequest {
    pub fn new(loan_id: i64) -> Self {
        Self {
            loan_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct DeleteLoanCommandResponse {}

impl DeleteLoanCommandResponse {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl Command<DeleteLoanCommandRequest, DeleteLoanCommandResponse> for DeleteLoanCommand {
    async fn execute(&self, req: DeleteLoanCommandRequest) -> Result<DeleteLoanCommandResponse, CommandError> {
        self.checkout_service.delete_loan(req.loan_id).await
            .map_err(CommandError::from).map(|_| DeleteLoanCommandResponse::new())
    }
}
