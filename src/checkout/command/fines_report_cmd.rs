use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use crate::checkout::domain::CheckoutService;
use crate::checkout::dto::FinesReport;
use crate::core::command::{Command, CommandError};
use crate::utils::date::{Clock, SystemClock};

pub(crate) struct FinesReportCommand {
    checkout_service: Box<dyn CheckoutService>,
}

impl FinesReportCommand {
    pub(crate) fn new(checkout_service: Box<dyn CheckoutService>) -> Self {
        Self {
            checkout_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct FinesReportCommandRequest {
    // defaults to today
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
}

impl FinesReportCommandRequest {
    pub fn new(as_of: NaiveDate) -> Self {
        Self {
            as_of: Some(as_of),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct FinesReportCommandResponse {
    pub report: FinesReport,
}

impl FinesReportCommandResponse {
    pub fn new(report: FinesReport) -> Self {
        Self {
            report,
        }
    }
}

#[async_trait]
impl Command<FinesReportCommandRequest, FinesReportCommandResponse> for FinesReportCommand {
    async fn execute(&self, req: FinesReportCommandRequest) -> Result<FinesReportCommandResponse, CommandError> {
        let as_of = req.as_of.unwrap_or_else(|| SystemClock.today());
        self.checkout_service.fines_report(as_of)
            .await.map_err(CommandError::from).map(FinesReportCommandResponse::new)
    }
}

#[cfg(test)]
mod tests {
    use async_once::AsyncOnce;
    use lazy_static::lazy_static;
    use crate::checkout::command::fixtures::{day, seed_loan};
    use crate::checkout::command::fines_report_cmd::{FinesReportCommand, FinesReportCommandRequest};
    use crate::checkout::factory::create_checkout_service;
    use crate::core::command::Command;
    use crate::core::domain::Configuration;
    use crate::core::repository::RepositoryStore;

    lazy_static! {
        static ref SUT_CMD : AsyncOnce<FinesReportCommand> = AsyncOnce::new(async {
                let svc = create_checkout_service(&Configuration::new("test"), RepositoryStore::InMemory).await;
                FinesReportCommand::new(svc)
            });
    }

    #[tokio::test]
    async fn test_should_run_fines_report() {
        let loan = seed_loan(day(2024, 1, 1), Some(day(2024, 1, 5))).await;
        let cmd: &FinesReportCommand = SUT_CMD.get().await;
        let res = cmd.execute(FinesReportCommandRequest::new(day(2024, 2, 4))).await.expect("should report fines");
        let fine = res.report.fines.iter().find(|f| f.loan_id == loan.loan_id).expect("loan should be fined");
        assert_eq!(30, fine.days_late);
        assert_eq!(60.0, fine.fine);
        assert!(res.report.total >= 60.0);
    }
}
