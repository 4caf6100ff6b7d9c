use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::checkout::domain::CheckoutService;
use crate::checkout::dto::LoanDto;
use crate::core::command::{Command, CommandError};

pub(crate) struct FindLoansCommand {
    checkout_service: Box<dyn CheckoutService>,
}

impl FindLoansCommand {
    pub(crate) fn new(checkout_service: Box<dyn CheckoutService>) -> Self {
        Self {
            checkout_service,
        }
    }
}

// without a keyword every loan is listed in loan id order
#[derive(Debug, Deserialize)]
pub(crate) struct FindLoansCommandRequest {
    #[serde(default)]
    pub keyword: Option<String>,
}

impl FindLoansCommandRequest {
    pub fn new(keyword: Option<&str>) -> Self {
        Self {
            keyword: keyword.map(str::to_string),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct FindLoansCommandResponse {
    pub loans: Vec<LoanDto>,
}

impl FindLoansCommandResponse {
    pub fn new(loans: Vec<LoanDto>) -> Self {
        Self {
            loans,
        }
    }
}

#[async_trait]
impl Command<FindLoansCommandRequest, FindLoansCommandResponse> for FindLoansCommand {
    async fn execute(&self, req: FindLoansCommandRequest) -> Result<FindLoansCommandResponse, CommandError> {
        let res = match req.keyword {
            Some(keyword) => self.checkout_service.search_loans(keyword.as_str()).await,
            None => self.checkout_service.list_loans().await,
        };
        res.map_err(CommandError::from).map(FindLoansCommandResponse::new)
    }
}

#[cfg(test)]
mod tests {
    use async_once::AsyncOnce;
    use lazy_static::lazy_static;
    use crate::checkout::command::find_loans_cmd::{FindLoansCommand, FindLoansCommandRequest};
    use crate::checkout::command::fixtures::{day, seed_loan};
    use crate::checkout::command::get_loan_cmd::{GetLoanCommand, GetLoanCommandRequest};
    use crate::checkout::factory::create_checkout_service;
    use crate::core::command::Command;
    use crate::core::domain::Configuration;
    use crate::core::repository::RepositoryStore;

    lazy_static! {
        static ref FIND_CMD : AsyncOnce<FindLoansCommand> = AsyncOnce::new(async {
                let svc = create_checkout_service(&Configuration::new("test"), RepositoryStore::InMemory).await;
                FindLoansCommand::new(svc)
            });
        static ref GET_CMD : AsyncOnce<GetLoanCommand> = AsyncOnce::new(async {
                let svc = create_checkout_service(&Configuration::new("test"), RepositoryStore::InMemory).await;
                GetLoanCommand::new(svc)
            });
    }

    #[tokio::test]
    async fn test_should_run_find_loans() {
        let borrowed = seed_loan(day(2024, 1, 1), None).await;

        let found = FIND_CMD.get().await.execute(FindLoansCommandRequest::new(Some(borrowed.member_id.to_uppercase().as_str())))
            .await.expect("should search loans");
        assert_eq!(vec![borrowed.loan_id], found.loans.iter().map(|l| l.loan_id).collect::<Vec<i64>>());
        let all = FIND_CMD.get().await.execute(FindLoansCommandRequest::new(None)).await.expect("should list loans");
        assert!(all.loans.iter().any(|l| l.loan_id == borrowed.loan_id));
        let loaded = GET_CMD.get().await.execute(GetLoanCommandRequest::new(borrowed.loan_id))
            .await.expect("should get loan");
        assert_eq!(borrowed, loaded.loan);
    }
}
