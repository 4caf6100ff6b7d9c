use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use crate::patrons::dto::PatronDto;
use crate::core::command::{Command, CommandError};
use crate::patrons::domain::PatronService;

pub(crate) struct UpdatePatronCommand {
    patron_service: Box<dyn PatronService>,
}

impl UpdatePatronCommand {
    pub(crate) fn new(patron_service: Box<dyn PatronService>) -> Self {
        Self {
            patron_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct UpdatePatronCommandRequest {
    #[serde(default)]
    pub member_id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub birth_date: NaiveDate,
}

impl UpdatePatronCommandRequest {
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
pub(crate) struct UpdatePatronCommandResponse {
    pub patron: PatronDto,
}

impl UpdatePatronCommandResponse {
    pub fn new(patron: PatronDto) -> Self {
        Self {
            patron,
        }
    }
}

#[async_trait]
impl Command<UpdatePatronCommandRequest, UpdatePatronCommandResponse> for UpdatePatronCommand {
    async fn execute(&self, req: UpdatePatronCommandRequest) -> Result<UpdatePatronCommandResponse, CommandError> {
        let patron = req.build_patron();
        self.patron_service.update_patron(&patron).await.map_err(CommandError::from).map(UpdatePatronCommandResponse::new)
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
    use crate::core::repository::RepositoryStore;
    use crate::patrons::command::add_patron_cmd::{AddPatronCommand, AddPatronCommandRequest};
    use crate::patrons::command::update_patron_cmd::{UpdatePatronCommand, UpdatePatronCommandRequest};
    use crate::patrons::factory;

    lazy_static! {
        static ref ADD_CMD : AsyncOnce<AddPatronCommand> = AsyncOnce::new(async {
                let svc = factory::create_patron_service(&Configuration::new("test"), RepositoryStore::InMemory).await;
                AddPatronCommand::new(svc)
            });
        static ref UPDATE_CMD : AsyncOnce<UpdatePatronCommand> = AsyncOnce::new(async {
                let svc = factory::create_patron_service(&Configuration::new("test"), RepositoryStore::InMemory).await;
                UpdatePatronCommand::new(svc)
            });
    }

    #[tokio::test]
    async fn test_should_run_update_patron() {
        let add_cmd: &AddPatronCommand = ADD_CMD.get().await;
        let update_cmd: &UpdatePatronCommand = UPDATE_CMD.get().await;
        let birth_date = NaiveDate::from_ymd_opt(1990, 1, 1).unwrap();

        let member_id = Uuid::new_v4().to_string();
        let _ = add_cmd.execute(AddPatronCommandRequest::new(member_id.as_str(), "Ada", "Lovelace", birth_date))
            .await.expect("should add patron");
        let res = update_cmd.execute(UpdatePatronCommandRequest::new(member_id.as_str(), "Ada", "King", birth_date))
            .await.expect("should update patron");
        assert_eq!("King", res.patron.last_name.as_str());

        let err = update_cmd.execute(UpdatePatronCommandRequest::new("missing", "Ada", "King", birth_date))
            .await.expect_err("should not find patron");
        assert!(matches!(err, CommandError::NotFound { .. }));
    }
}
