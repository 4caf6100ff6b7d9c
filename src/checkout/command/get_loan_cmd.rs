use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::checkout::domain::CheckoutService;
use crate::checkout::dto::LoanDto;
use crate::core::command::{Command, CommandError};

pub(crate) struct GetLoanCommand {
    checkout_service: Box<dyn CheckoutService>,
}

impl GetLoanCommand {
    pub(crate) fn new(checkout_service: Box<dyn CheckoutService>) -> Self {
        Self {
            checkout_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct GetLoanCommandRequest {
    pub(crate) loan_id: i64,
}

impl GetLoanCommandRequest {
    pub fn new(loan_id: i64) -> Self {
        Self {
            loan_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct GetLoanCommandResponse {
    pub loan: LoanDto,
}

impl GetLoanCommandResponse {
    pub fn new(loan: LoanDto) -> Self {
        Self {
            loan,
        }
    }
}

#[async_trait]
impl Command<GetLoanCommandRequest, GetLoanCommandResponse> for GetLoanCommand {
    async fn execute(&self, req: GetLoanCommandRequest) -> Result<GetLoanCommandResponse, CommandError> {
        self.checkout_service.find_loan(req.loan_id)
            .await.map_err(CommandError::from).map(GetLoanCommandResponse::new)
    }
}

#[cfg(test)]
mod tests {
    use async_once::AsyncOnce;
    use lazy_static::lazy_static;
    use crate::checkout::command::get_loan_cmd::{GetLoanCommand, GetLoanCommandRequest};
    use crate::checkout::factory::create_checkout_service;
    use crate::core::command::{Command, CommandError};
    use crate::core::domain::Configuration;
    use crate::core::repository::RepositoryStore;

    lazy_static! {
        static ref GET_CMD : AsyncOnce<GetLoanCommand> = AsyncOnce::new(async {
                let svc = create_checkout_service(&Configuration::new("test"), RepositoryStore::InMemory).await;
                GetLoanCommand::new(svc)
            });
    }

    #[tokio::test]
    async fn test_should_fail_get_unknown_loan() {
        let err = GET_CMD.get().await.execute(GetLoanCommandRequest::new(-7)).await.expect_err("should not find loan");
        assert!(matches!(err, CommandError::NotFound { .. }));
    }
}
