use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::patrons::dto::PatronDto;
use crate::core::command::{Command, CommandError};
use crate::patrons::domain::PatronService;

pub(crate) struct FindPatronsCommand {
    patron_service: Box<dyn PatronService>,
}

impl FindPatronsCommand {
    pub(crate) fn new(patron_service: Box<dyn PatronService>) -> Self {
        Self {
            patron_service,
        }
    }
}

// without a name every member is listed
#[derive(Debug, Deserialize)]
pub(crate) struct FindPatronsCommandRequest {
    #[serde(default)]
    pub name: Option<String>,
}

impl FindPatronsCommandRequest {
    pub fn new(name: Option<&str>) -> Self {
        Self {
            name: name.map(str::to_string),
        }
    }
}


#[derive(Debug, Serialize)]
pub(crate) struct FindPatronsCommandResponse {
    pub patrons: Vec<PatronDto>,
}

impl FindPatronsCommandResponse {
    pub fn new(patrons: Vec<PatronDto>) -> Self {
        Self {
            patrons,
        }
    }
}

#[async_trait]
impl Command<FindPatronsCommandRequest, FindPatronsCommandResponse> for FindPatronsCommand {
    async fn execute(&self, req: FindPatronsCommandRequest) -> Result<FindPatronsCommandResponse, CommandError> {
        let res = match req.name {
            Some(name) => self.patron_service.search_by_name(name.as_str()).await,
            None => self.patron_service.find_patrons().await,
        };
        res.map_err(CommandError::from).map(FindPatronsCommandResponse::new)
    }
}

#[cfg(test)]
mod tests {
    use async_once::AsyncOnce;
    use chrono::NaiveDate;
    use lazy_static::lazy_static;
    use uuid::Uuid;
    use crate::core::command::Command;
    use crate::core::domain::Configuration;
    use crate::core::repository::RepositoryStore;
    use crate::patrons::command::add_patron_cmd::{AddPatronCommand, AddPatronCommandRequest};
    use crate::patrons::command::find_patrons_cmd::{FindPatronsCommand, FindPatronsCommandRequest};
    use crate::patrons::factory;

    lazy_static! {
        static ref ADD_CMD : AsyncOnce<AddPatronCommand> = AsyncOnce::new(async {
                let svc = factory::create_patron_service(&Configuration::new("test"), RepositoryStore::InMemory).await;
                AddPatronCommand::new(svc)
            });
        static ref FIND_CMD : AsyncOnce<FindPatronsCommand> = AsyncOnce::new(async {
                let svc = factory::create_patron_service(&Configuration::new("test"), RepositoryStore::InMemory).await;
                FindPatronsCommand::new(svc)
            });
    }

    #[tokio::test]
    async fn test_should_run_find_patrons() {
        let add_cmd: &AddPatronCommand = ADD_CMD.get().await;
        let find_cmd: &FindPatronsCommand = FIND_CMD.get().await;

        let member_id = Uuid::new_v4().to_string();
        let last_name = format!("Hopper-{}", Uuid::new_v4());
        let _ = add_cmd.execute(AddPatronCommandRequest::new(member_id.as_str(), "Grace", last_name.as_str(),
                                                             NaiveDate::from_ymd_opt(1990, 1, 1).unwrap()))
            .await.expect("should add patron");

        let found = find_cmd.execute(FindPatronsCommandRequest::new(Some(last_name.to_lowercase().as_str())))
            .await.expect("should search patrons");
        assert_eq!(vec![member_id.clone()], found.patrons.iter().map(|p| p.member_id.clone()).collect::<Vec<String>>());
        let all = find_cmd.execute(FindPatronsCommandRequest::new(None)).await.expect("should list patrons");
        assert!(all.patrons.iter().any(|p| p.member_id == member_id));
    }
}
