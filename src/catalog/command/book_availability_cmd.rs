use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::books::dto::BookDto;
use crate::checkout::domain::CheckoutService;
use crate::core::command::{Command, CommandError};

// re-derives the stored availability flag and reports the copies left on the shelf
pub(crate) struct BookAvailabilityCommand {
    checkout_service: Box<dyn CheckoutService>,
}

impl BookAvailabilityCommand {
    pub(crate) fn new(checkout_service: Box<dyn CheckoutService>) -> Self {
        Self {
            checkout_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct BookAvailabilityCommandRequest {
    pub(crate) isbn: String,
}

impl BookAvailabilityCommandRequest {
    pub fn new(isbn: &str) -> Self {
        Self {
            isbn: isbn.to_string(),
        }
    }
}


#[derive(Debug, Serialize)]
pub(crate) struct BookAvailabilityCommandResponse {
    pub book: BookDto,
    pub available_copies: i64,
}

impl BookAvailabilityCommandResponse {
    pub fn new(book: BookDto, available_copies: i64) -> Self {
        Self {
            book,
            available_copies,
        }
    }
}

#[async_trait]
impl Command<BookAvailabilityCommandRequest, BookAvailabilityCommandResponse> for BookAvailabilityCommand {
    async fn execute(&self, req: BookAvailabilityCommandRequest) -> Result<BookAvailabilityCommandResponse, CommandError> {
        let book = self.checkout_service.sync_availability(req.isbn.as_str()).await?;
        let available_copies = self.checkout_service.available_copies(req.isbn.as_str()).await?;
        Ok(BookAvailabilityCommandResponse::new(book, available_copies))
    }
}

#[cfg(test)]
mod tests {
    use async_once::AsyncOnce;
    use lazy_static::lazy_static;
    use crate::catalog::command::book_availability_cmd::{BookAvailabilityCommand, BookAvailabilityCommandRequest};
    use crate::checkout::command::fixtures::{day, seed_loan};
    use crate::checkout::factory::create_checkout_service;
    use crate::core::command::{Command, CommandError};
    use crate::core::domain::Configuration;
    use crate::core::repository::RepositoryStore;

    lazy_static! {
        static ref SUT_CMD : AsyncOnce<BookAvailabilityCommand> = AsyncOnce::new(async {
                let svc = create_checkout_service(&Configuration::new("test"), RepositoryStore::InMemory).await;
                BookAvailabilityCommand::new(svc)
            });
    }

    #[tokio::test]
    async fn test_should_run_book_availability() {
        let cmd: &BookAvailabilityCommand = SUT_CMD.get().await;
        let loan = seed_loan(day(2024, 1, 1), None).await;

        let res = cmd.execute(BookAvailabilityCommandRequest::new(loan.isbn.as_str())).await.expect("should sync book");
        assert_eq!(0, res.available_copies);
        assert!(!res.book.available);

        let err = cmd.execute(BookAvailabilityCommandRequest::new("missing")).await.expect_err("should not find book");
        assert!(matches!(err, CommandError::NotFound { .. }));
    }
}
