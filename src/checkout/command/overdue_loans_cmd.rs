use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use crate::checkout::domain::CheckoutService;
use crate::checkout::dto::OverdueLoanDto;
use crate::core::command::{Command, CommandError};
use crate::utils::date::{Clock, SystemClock};

pub(crate) struct OverdueLoansCommand {
    checkout_service: Box<dyn CheckoutService>,
}

impl OverdueLoansCommand {
    pub(crate) fn new(checkout_service: Box<dyn CheckoutService>) -> Self {
        Self {
            checkout_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct OverdueLoansCommandRequest {
    // defaults to today
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
}

impl OverdueLoansCommandRequest {
    pub fn new(as_of: NaiveDate) -> Self {
        Self {
            as_of: Some(as_of),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct OverdueLoansCommandResponse {
    pub loans: Vec<OverdueLoanDto>,
}

impl OverdueLoansCommandResponse {
    pub fn new(loans: Vec<OverdueLoanDto>) -> Self {
        Self {
            loans,
        }
    }
}

#[async_trait]
impl Command<OverdueLoansCommandRequest, OverdueLoansCommandResponse> for OverdueLoansCommand {
    async fn execute(&self, req: OverdueLoansCommandRequest) -> Result<OverdueLoansCommandResponse, CommandError> {
        let as_of = req.as_of.unwrap_or_else(|| SystemClock.today());
        self.checkout_service.overdue_loans(as_of)
            .await.map_err(CommandError::from).map(OverdueLoansCommandResponse::new)
    }
}

#[cfg(test)]
mod tests {
    use async_once::AsyncOnce;
    use lazy_static::lazy_static;
    use crate::checkout::command::fixtures::{day, seed_loan};
    use crate::checkout::command::overdue_loans_cmd::{OverdueLoansCommand, OverdueLoansCommandRequest};
    use crate::checkout::factory::create_checkout_service;
    use crate::core::command::Command;
    use crate::core::domain::Configuration;
    use crate::core::repository::RepositoryStore;

    lazy_static! {
        static ref SUT_CMD : AsyncOnce<OverdueLoansCommand> = AsyncOnce::new(async {
                let svc = create_checkout_service(&Configuration::new("test"), RepositoryStore::InMemory).await;
                OverdueLoansCommand::new(svc)
            });
    }

    #[tokio::test]
    async fn test_should_run_overdue_loans() {
        let loan = seed_loan(day(2024, 1, 1), None).await;
        let cmd: &OverdueLoansCommand = SUT_CMD.get().await;
        let res = cmd.execute(OverdueLoansCommandRequest::new(day(2024, 1, 16))).await.expect("should list overdue");
        let found = res.loans.iter().find(|o| o.loan.loan_id == loan.loan_id).expect("loan should be overdue");
        assert_eq!(1, found.days_overdue);
        let res = cmd.execute(OverdueLoansCommandRequest::new(day(2024, 1, 15))).await.expect("should list overdue");
        assert!(res.loans.iter().all(|o| o.loan.loan_id != loan.loan_id));
    }
}
