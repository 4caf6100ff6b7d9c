use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::books::dto::CategoryShareDto;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub(crate) struct CategoryBreakdownCommand {
    catalog_service: Box<dyn CatalogService>,
}

impl CategoryBreakdownCommand {
    pub(crate) fn new(catalog_service: Box<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct CategoryBreakdownCommandRequest {}

#[derive(Debug, Serialize)]
pub(crate) struct CategoryBreakdownCommandResponse {
    pub total_books: usize,
    pub categories: Vec<CategoryShareDto>,
}

impl CategoryBreakdownCommandResponse {
    pub fn new(categories: Vec<CategoryShareDto>) -> Self {
        Self {
            total_books: categories.iter().map(|c| c.books).sum(),
            categories,
        }
    }
}

#[async_trait]
impl Command<CategoryBreakdownCommandRequest, CategoryBreakdownCommandResponse> for CategoryBreakdownCommand {
    async fn execute(&self, _req: CategoryBreakdownCommandRequest) -> Result<CategoryBreakdownCommandResponse, CommandError> {
        self.catalog_service.category_breakdown()
            .await.map_err(CommandError::from).map(CategoryBreakdownCommandResponse::new)
    }
}

#[cfg(test)]
mod tests {
    use async_once::AsyncOnce;
    use lazy_static::lazy_static;
    use uuid::Uuid;
    use crate::catalog::command::add_book_cmd::{AddBookCommand, AddBookCommandRequest};
    use crate::catalog::command::category_breakdown_cmd::{CategoryBreakdownCommand, CategoryBreakdownCommandRequest};
    use crate::catalog::factory;
    use crate::core::command::Command;
    use crate::core::domain::Configuration;
    use crate::core::repository::RepositoryStore;

    lazy_static! {
        static ref ADD_CMD : AsyncOnce<AddBookCommand> = AsyncOnce::new(async {
                let svc = factory::create_catalog_service(&Configuration::new("test"), RepositoryStore::InMemory).await;
                AddBookCommand::new(svc)
            });
        static ref SUT_CMD : AsyncOnce<CategoryBreakdownCommand> = AsyncOnce::new(async {
                let svc = factory::create_catalog_service(&Configuration::new("test"), RepositoryStore::InMemory).await;
                CategoryBreakdownCommand::new(svc)
            });
    }

    #[tokio::test]
    async fn test_should_run_category_breakdown() {
        let add_cmd: &AddBookCommand = ADD_CMD.get().await;
        let cmd: &CategoryBreakdownCommand = SUT_CMD.get().await;

        // a unique category keeps the counts independent of other tests sharing the store
        let category = format!("atlas-{}", Uuid::new_v4());
        for title in ["Oceans", "Rivers"] {
            let isbn = Uuid::new_v4().to_string();
            let _ = add_cmd.execute(AddBookCommandRequest::new(isbn.as_str(), title, "Cartographer", category.as_str(), 1))
                .await.expect("should add book");
        }
        let res = cmd.execute(CategoryBreakdownCommandRequest::default()).await.expect("should count categories");
        let share = res.categories.iter().find(|c| c.category == category).expect("category should be listed");
        assert_eq!(2, share.books);
        assert!(share.percentage > 0.0 && share.percentage <= 100.0);
        assert!(res.total_books >= 2);
    }
}
