use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::checkout::domain::CheckoutService;
use crate::core::command::{Command, CommandError};

// removal goes through checkout so a book with copies on loan is kept
pub(crate) struct RemoveBookCommand {
    checkout_service: Box<dyn CheckoutService>,
}

impl RemoveBookCommand {
    pub(crate) fn new(checkout_service: Box<dyn CheckoutService>) -> Self {
        Self {
            checkout_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RemoveBookCommandRequest {
    pub(crate) isbn: String,
}

impl RemoveBookCommandRequest {
    pub fn new(isbn: &str) -> Self {
        Self {
            isbn: isbn.to_string(),
        }
    }
}


#[derive(Debug, Serialize)]
pub(crate) struct RemoveBookCommandResponse {}

impl RemoveBookCommandResponse {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl Command<RemoveBookCommandRequest, RemoveBookCommandResponse> for RemoveBookCommand {
    async fn execute(&self, req: RemoveBookCommandRequest) -> Result<RemoveBookCommandResponse, CommandError> {
        self.checkout_service.delete_book(req.isbn.as_str()).await
            .map_err(CommandError::from).map(|_| RemoveBookCommandResponse::new())
    }
}

#[cfg(test)]
mod tests {
    use async_once::AsyncOnce;
    use lazy_static::lazy_static;
    use crate::catalog::command::remove_book_cmd::{RemoveBookCommand, RemoveBookCommandRequest};
    use crate::checkout::command::fixtures::{day, seed_loan};
    use crate::checkout::command::return_book_cmd::{ReturnBookCommand, ReturnBookCommandRequest};
    use crate::checkout::factory::create_checkout_service;
    use crate::core::command::{Command, CommandError};
    use crate::core::domain::Configuration;
    use crate::core::repository::RepositoryStore;

    lazy_static! {
        static ref REMOVE_CMD : AsyncOnce<RemoveBookCommand> = AsyncOnce::new(async {
                let svc = create_checkout_service(&Configuration::new("test"), RepositoryStore::InMemory).await;
                RemoveBookCommand::new(svc)
            });
        static ref RETURN_CMD : AsyncOnce<ReturnBookCommand> = AsyncOnce::new(async {
                let svc = create_checkout_service(&Configuration::new("test"), RepositoryStore::InMemory).await;
                ReturnBookCommand::new(svc)
            });
    }

    #[tokio::test]
    async fn test_should_run_remove_book() {
        let remove_cmd: &RemoveBookCommand = REMOVE_CMD.get().await;
        let loan = seed_loan(day(2024, 1, 1), None).await;

        let err = remove_cmd.execute(RemoveBookCommandRequest::new(loan.isbn.as_str())).await.expect_err("book is on loan");
        assert!(matches!(err, CommandError::Conflict { .. }));

        let _ = RETURN_CMD.get().await.execute(ReturnBookCommandRequest::new(loan.loan_id, day(2024, 1, 3)))
            .await.expect("should return book");
        let _ = remove_cmd.execute(RemoveBookCommandRequest::new(loan.isbn.as_str())).await.expect("should remove book");
        let err = remove_cmd.execute(RemoveBookCommandRequest::new(loan.isbn.as_str())).await.expect_err("book is gone");
        assert!(matches!(err, CommandError::NotFound { .. }));
    }
}
