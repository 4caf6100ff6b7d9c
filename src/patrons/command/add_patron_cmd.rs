use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use crate::patrons::dto::PatronDto;
use crate::core::command::{Command, CommandError};
use crate::patrons::domain::PatronService;

pub(crate) struct AddPatronCommand {
    patron_service: Box<dyn PatronService>,
}

impl AddPatronCommand {
    pub(crate) fn new(patron_service: Box<dyn PatronService>) -> Self {
        Self {
            patron_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct AddPatronCommandRequest {
    pub member_id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub birth_date: NaiveDate,
}

impl AddPatronCommandRequest {
    pub fn new(member_id: &str, first_name: &str, last_name: &str, birth_date: NaiveDate) -> Self {
        Self {
            member_id: member_id.to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            birth_date,
        }
    }
    pub fn build_patron(&self) -> PatronDto {
        PatronDto::new(self.member_id.as_str(), self.first_name.as_str(), self.last_name.as_str(), self.birth_date)
    }
}


#[derive(Debug, Serialize)]
pub(crate) struct AddPatronCommandResponse {
    pub patron: PatronDto,
}

impl AddPatronCommandResponse {
    pub fn new(patron: PatronDto) -> Self {
        Self {
            patron,
        }
    }
}

#[async_trait]
impl Command<AddPatronCommandRequest, AddPatronCommandResponse> for AddPatronCommand {
    async fn execute(&self, req: AddPatronCommandRequest) -> Result<AddPatronCommandResponse, CommandError> {
        let patron = req.build_patron();
        self.patron_service.add_patron(&patron).await.map_err(CommandError::from).map(AddPatronCommandResponse::new)
    }
}

#[cfg(test)]
mod tests {
    use async_once::AsyncOnce;
    use chrono::NaiveDate;
    use lazy_static::lazy_static;
    use uuid::Uuid;
    use crate::core::command::{Command, CommandError};
    use crate::core::domain::Configuration;
    use crate::core::library::MemberTier;
    use crate::core::repository::RepositoryStore;
    use crate::patrons::command::add_patron_cmd::{AddPatronCommand, AddPatronCommandRequest};
    use crate::patrons::factory;

    lazy_static! {
        static ref SUT_CMD : AsyncOnce<AddPatronCommand> = AsyncOnce::new(async {
                let svc = factory::create_patron_service(&Configuration::new("test"), RepositoryStore::InMemory).await;
                AddPatronCommand::new(svc)
            });
    }

    #[tokio::test]
    async fn test_should_run_add_patron() {
        let cmd: &AddPatronCommand = SUT_CMD.get().await;
        let birth_date = NaiveDate::from_ymd_opt(1990, 1, 1).unwrap();

        let member_id = Uuid::new_v4().to_string();
        let res = cmd.execute(AddPatronCommandRequest::new(member_id.as_str(), "Ada", "Lovelace", birth_date))
            .await.expect("should add patron");
        assert_eq!(MemberTier::Standard, res.patron.tier);

        let err = cmd.execute(AddPatronCommandRequest::new(member_id.as_str(), "Ada", "Lovelace", birth_date))
            .await.expect_err("should reject duplicate member");
        assert!(matches!(err, CommandError::DuplicateKey { .. }));
    }
}
