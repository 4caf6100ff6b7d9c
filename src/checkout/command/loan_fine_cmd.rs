use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use crate::checkout::domain::CheckoutService;
use crate::checkout::dto::FineDto;
use crate::core::command::{Command, CommandError};
use crate::utils::date::{Clock, SystemClock};

pub(crate) struct LoanFineCommand {
    checkout_service: Box<dyn CheckoutService>,
}

impl LoanFineCommand {
    pub(crate) fn new(checkout_service: Box<dyn CheckoutService>) -> Self {
        Self {
            checkout_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoanFineCommandRequest {
    #[serde(default)]
    pub loan_id: i64,
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
}

impl LoanFineCommandRequest {
    pub fn new(loan_id: i64, as_of: NaiveDate) -> Self {
        Self {
            loan_id,
            as_of: Some(as_of),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct LoanFineCommandResponse {
    pub fine: FineDto,
}

impl LoanFineCommandResponse {
    pub fn new(fine: FineDto) -> Self {
        Self {
            fine,
        }
    }
}

#[async_trait]
impl Command<LoanFineCommandRequest, LoanFineCommandResponse> for LoanFineCommand {
    async fn execute(&self, req: LoanFineCommandRequest) -> Result<LoanFineCommandResponse, CommandError> {
        let as_of = req.as_of.unwrap_or_else(|| SystemClock.today());
        self.checkout_service.fine_for_loan(req.loan_id, as_of)
            .await.map_err(CommandError::from).map(LoanFineCommandResponse::new)
    }
}

#[cfg(test)]
mod tests {
    use async_once::AsyncOnce;
    use lazy_static::lazy_static;
    use crate::checkout::command::fixtures::{day, seed_loan};
    use crate::checkout::command::loan_fine_cmd::{LoanFineCommand, LoanFineCommandRequest};
    use crate::checkout::factory::create_checkout_service;
    use crate::core::command::Command;
    use crate::core::domain::Configuration;
    use crate::core::repository::RepositoryStore;

    lazy_static! {
        static ref SUT_CMD : AsyncOnce<LoanFineCommand> = AsyncOnce::new(async {
                let svc = create_checkout_service(&Configuration::new("test"), RepositoryStore::InMemory).await;
                LoanFineCommand::new(svc)
            });
    }

    #[tokio::test]
    async fn test_should_run_loan_fine() {
        let cmd: &LoanFineCommand = SUT_CMD.get().await;
        let returned = seed_loan(day(2024, 1, 1), Some(day(2024, 1, 20))).await;
        let res = cmd.execute(LoanFineCommandRequest::new(returned.loan_id, day(2024, 1, 23))).await.expect("should compute fine");
        assert_eq!(3, res.fine.days_late);
        assert_eq!(6.0, res.fine.fine);

        let open = seed_loan(day(2024, 1, 1), None).await;
        let res = cmd.execute(LoanFineCommandRequest::new(open.loan_id, day(2024, 3, 1))).await.expect("should compute fine");
        assert_eq!(0.0, res.fine.fine);
    }
}
