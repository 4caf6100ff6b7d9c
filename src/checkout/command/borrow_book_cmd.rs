use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use crate::checkout::domain::CheckoutService;
use crate::checkout::dto::LoanDto;
use crate::core::command::{Command, CommandError};
use crate::utils::date::{Clock, SystemClock};

pub(crate) struct BorrowBookCommand {
    checkout_service: Box<dyn CheckoutService>,
}

impl BorrowBookCommand {
    pub(crate) fn new(checkout_service: Box<dyn CheckoutService>) -> Self {
        Self {
            checkout_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct BorrowBookCommandRequest {
    pub isbn: String,
    pub member_id: String,
    // defaults to today
    #[serde(default)]
    pub loan_date: Option<NaiveDate>,
    #[serde(default)]
    pub return_date: Option<NaiveDate>,
}

impl BorrowBookCommandRequest {
    pub fn new(isbn: &str, member_id: &str, loan_date: NaiveDate) -> Self {
        Self {
            isbn: isbn.to_string(),
            member_id: member_id.to_string(),
            loan_date: Some(loan_date),
            return_date: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct BorrowBookCommandResponse {
    pub loan: LoanDto,
}

impl BorrowBookCommandResponse {
    pub fn new(loan: LoanDto) -> Self {
        Self {
            loan,
        }
    }
}

#[async_trait]
impl Command<BorrowBookCommandRequest, BorrowBookCommandResponse> for BorrowBookCommand {
    async fn execute(&self, req: BorrowBookCommandRequest) -> Result<BorrowBookCommandResponse, CommandError> {
        let loan_date = req.loan_date.unwrap_or_else(|| SystemClock.today());
        self.checkout_service.borrow_book(req.isbn.as_str(), req.member_id.as_str(), loan_date, req.return_date)
            .await.map_err(CommandError::from).map(BorrowBookCommandResponse::new)
    }
}

#[cfg(test)]
mod tests {
    use async_once::AsyncOnce;
    use chrono::NaiveDate;
    use lazy_static::lazy_static;
    use uuid::Uuid;
    use crate::catalog::command::add_book_cmd::{AddBookCommand, AddBookCommandRequest};
    use crate::catalog::factory::create_catalog_service;
    use crate::checkout::command::borrow_book_cmd::{BorrowBookCommand, BorrowBookCommandRequest};
    use crate::checkout::factory::create_checkout_service;
    use crate::core::command::{Command, CommandError};
    use crate::core::domain::Configuration;
    use crate::core::library::LoanStatus;
    use crate::core::repository::RepositoryStore;
    use crate::patrons::command::add_patron_cmd::{AddPatronCommand, AddPatronCommandRequest};
    use crate::patrons::factory::create_patron_service;

    lazy_static! {
        static ref BOOK_CMD : AsyncOnce<AddBookCommand> = AsyncOnce::new(async {
                let svc = create_catalog_service(&Configuration::new("test"), RepositoryStore::InMemory).await;
                AddBookCommand::new(svc)
            });
        static ref PATRON_CMD : AsyncOnce<AddPatronCommand> = AsyncOnce::new(async {
                let svc = create_patron_service(&Configuration::new("test"), RepositoryStore::InMemory).await;
                AddPatronCommand::new(svc)
            });
        static ref BORROW_CMD : AsyncOnce<BorrowBookCommand> = AsyncOnce::new(async {
                let svc = create_checkout_service(&Configuration::new("test"), RepositoryStore::InMemory).await;
                BorrowBookCommand::new(svc)
            });
    }

    #[tokio::test]
    async fn test_should_run_borrow_book() {
        let book_cmd: &AddBookCommand = BOOK_CMD.get().await;
        let patron_cmd: &AddPatronCommand = PATRON_CMD.get().await;
        let borrow_cmd: &BorrowBookCommand = BORROW_CMD.get().await;

        let isbn = Uuid::new_v4().to_string();
        let member_id = Uuid::new_v4().to_string();
        let _ = book_cmd.execute(AddBookCommandRequest::new(isbn.as_str(), "Dune", "Frank Herbert", "fiction", 1))
            .await.expect("should add book");
        let _ = patron_cmd.execute(AddPatronCommandRequest::new(member_id.as_str(), "Ada", "Lovelace",
                                                                NaiveDate::from_ymd_opt(1990, 1, 1).unwrap()))
            .await.expect("should add patron");

        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let res = borrow_cmd.execute(BorrowBookCommandRequest::new(isbn.as_str(), member_id.as_str(), day))
            .await.expect("should borrow book");
        assert_eq!(isbn, res.loan.isbn);
        assert_eq!(LoanStatus::InProgress, res.loan.status);

        let err = borrow_cmd.execute(BorrowBookCommandRequest::new(isbn.as_str(), member_id.as_str(), day))
            .await.expect_err("should reject second borrow");
        assert!(matches!(err, CommandError::Conflict { .. }));
    }
}
