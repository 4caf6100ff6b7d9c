use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use crate::checkout::domain::CheckoutService;
use crate::checkout::dto::LibraryStats;
use crate::core::command::{Command, CommandError};
use crate::utils::date::{Clock, SystemClock};

pub(crate) struct LibraryStatsCommand {
    checkout_service: Box<dyn CheckoutService>,
}

impl LibraryStatsCommand {
    pub(crate) fn new(checkout_service: Box<dyn CheckoutService>) -> Self {
        Self {
            checkout_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct LibraryStatsCommandRequest {
    // defaults to today
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
}

impl LibraryStatsCommandRequest {
    pub fn new(as_of: NaiveDate) -> Self {
        Self {
            as_of: Some(as_of),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct LibraryStatsCommandResponse {
    pub stats: LibraryStats,
}

impl LibraryStatsCommandResponse {
    pub fn new(stats: LibraryStats) -> Self {
        Self {
            stats,
        }
    }
}

#[async_trait]
impl Command<LibraryStatsCommandRequest, LibraryStatsCommandResponse> for LibraryStatsCommand {
    async fn execute(&self, req: LibraryStatsCommandRequest) -> Result<LibraryStatsCommandResponse, CommandError> {
        let as_of = req.as_of.unwrap_or_else(|| SystemClock.today());
        self.checkout_service.stats(as_of)
            .await.map_err(CommandError::from).map(LibraryStatsCommandResponse::new)
    }
}

#[cfg(test)]
mod tests {
    use async_once::AsyncOnce;
    use lazy_static::lazy_static;
    use crate::checkout::command::fixtures::{day, seed_loan};
    use crate::checkout::command::library_stats_cmd::{LibraryStatsCommand, LibraryStatsCommandRequest};
    use crate::checkout::factory::create_checkout_service;
    use crate::core::command::Command;
    use crate::core::domain::Configuration;
    use crate::core::repository::RepositoryStore;

    lazy_static! {
        static ref SUT_CMD : AsyncOnce<LibraryStatsCommand> = AsyncOnce::new(async {
                let svc = create_checkout_service(&Configuration::new("test"), RepositoryStore::InMemory).await;
                LibraryStatsCommand::new(svc)
            });
    }

    #[tokio::test]
    async fn test_should_run_library_stats() {
        let _ = seed_loan(day(2024, 1, 1), None).await;
        let cmd: &LibraryStatsCommand = SUT_CMD.get().await;
        let res = cmd.execute(LibraryStatsCommandRequest::new(day(2024, 2, 1))).await.expect("should compute stats");
        assert!(res.stats.books >= 1);
        assert!(res.stats.members >= 1);
        assert!(res.stats.active_loans >= 1);
        assert!(res.stats.overdue_loans >= 1);
        assert!(res.stats.loans >= res.stats.active_loans);
    }
}
