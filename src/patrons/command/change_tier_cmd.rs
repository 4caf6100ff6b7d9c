use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::checkout::domain::CheckoutService;
use crate::core::command::{Command, CommandError};
use crate::core::library::MemberTier;
use crate::patrons::dto::PatronDto;

pub(crate) struct ChangeTierCommand {
    checkout_service: Box<dyn CheckoutService>,
}

impl ChangeTierCommand {
    pub(crate) fn new(checkout_service: Box<dyn CheckoutService>) -> Self {
        Self {
            checkout_service,
        }
    }
}

// without a tier the member flips between standard and premium
#[derive(Debug, Deserialize)]
pub(crate) struct ChangeTierCommandRequest {
    #[serde(default)]
    pub member_id: String,
    #[serde(default)]
    pub tier: Option<MemberTier>,
}

impl ChangeTierCommandRequest {
    pub fn new(member_id: &str, tier: Option<MemberTier>) -> Self {
        Self {
            member_id: member_id.to_string(),
            tier,
        }
    }
}


#[derive(Debug, Serialize)]
pub(crate) struct ChangeTierCommandResponse {
    pub patron: PatronDto,
}

impl ChangeTierCommandResponse {
    pub fn new(patron: PatronDto) -> Self {
        Self {
            patron,
        }
    }
}

#[async_trait]
impl Command<ChangeTierCommandRequest, ChangeTierCommandResponse> for ChangeTierCommand {
    async fn execute(&self, req: ChangeTierCommandRequest) -> Result<ChangeTierCommandResponse, CommandError> {
        self.checkout_service.change_member_tier(req.member_id.as_str(), req.tier)
            .await.map_err(CommandError::from).map(ChangeTierCommandResponse::new)
    }
}

#[cfg(test)]
mod tests {
    use async_once::AsyncOnce;
    use chrono::NaiveDate;
    use lazy_static::lazy_static;
    use uuid::Uuid;
    use crate::checkout::factory::create_checkout_service;
    use crate::core::command::{Command, CommandError};
    use crate::core::domain::Configuration;
    use crate::core::library::MemberTier;
    use crate::core::repository::RepositoryStore;
    use crate::patrons::command::add_patron_cmd::{AddPatronCommand, AddPatronCommandRequest};
    use crate::patrons::command::change_tier_cmd::{ChangeTierCommand, ChangeTierCommandRequest};
    use crate::patrons::factory;

    lazy_static! {
        static ref ADD_CMD : AsyncOnce<AddPatronCommand> = AsyncOnce::new(async {
                let svc = factory::create_patron_service(&Configuration::new("test"), RepositoryStore::InMemory).await;
                AddPatronCommand::new(svc)
            });
        static ref TIER_CMD : AsyncOnce<ChangeTierCommand> = AsyncOnce::new(async {
                let svc = create_checkout_service(&Configuration::new("test"), RepositoryStore::InMemory).await;
                ChangeTierCommand::new(svc)
            });
    }

    #[tokio::test]
    async fn test_should_run_change_tier() {
        let add_cmd: &AddPatronCommand = ADD_CMD.get().await;
        let tier_cmd: &ChangeTierCommand = TIER_CMD.get().await;

        let member_id = Uuid::new_v4().to_string();
        let _ = add_cmd.execute(AddPatronCommandRequest::new(member_id.as_str(), "Ada", "Lovelace",
                                                             NaiveDate::from_ymd_opt(1990, 1, 1).unwrap()))
            .await.expect("should add patron");

        let res = tier_cmd.execute(ChangeTierCommandRequest::new(member_id.as_str(), None)).await.expect("should toggle");
        assert_eq!(MemberTier::Premium, res.patron.tier);
        let res = tier_cmd.execute(ChangeTierCommandRequest::new(member_id.as_str(), Some(MemberTier::Premium)))
            .await.expect("should set tier");
        assert_eq!(MemberTier::Premium, res.patron.tier);
        let res = tier_cmd.execute(ChangeTierCommandRequest::new(member_id.as_str(), None)).await.expect("should toggle");
        assert_eq!(MemberTier::Standard, res.patron.tier);

        let err = tier_cmd.execute(ChangeTierCommandRequest::new("missing", None)).await.expect_err("should not find patron");
        assert!(matches!(err, CommandError::NotFound { .. }));
    }
}
