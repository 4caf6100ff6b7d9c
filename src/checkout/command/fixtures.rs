use async_once::AsyncOnce;
use chrono::NaiveDate;
use lazy_static::lazy_static;
use uuid::Uuid;
use crate::catalog::command::add_book_cmd::{AddBookCommand, AddBookCommandRequest};
use crate::catalog::factory::create_catalog_service;
use crate::checkout::command::borrow_book_cmd::{BorrowBookCommand, BorrowBookCommandRequest};
use crate::checkout::dto::LoanDto;
use crate::checkout::factory::create_checkout_service;
use crate::core::command::Command;
use crate::core::domain::Configuration;
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

pub(crate) fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// adds a fresh single-copy book and member to the shared in-memory store and lends it out
pub(crate) async fn seed_loan(loan_date: NaiveDate, return_date: Option<NaiveDate>) -> LoanDto {
    let isbn = Uuid::new_v4().to_string();
    let member_id = Uuid::new_v4().to_string();
    let _ = BOOK_CMD.get().await.execute(AddBookCommandRequest::new(isbn.as_str(), "Dune", "Frank Herbert", "fiction", 1))
        .await.expect("should add book");
    let _ = PATRON_CMD.get().await.execute(AddPatronCommandRequest::new(member_id.as_str(), "Ada", "Lovelace", day(1990, 1, 1)))
        .await.expect("should add patron");
    let mut req = BorrowBookCommandRequest::new(isbn.as_str(), member_id.as_str(), loan_date);
    req.return_date = return_date;
    BORROW_CMD.get().await.execute(req).await.expect("should borrow book").loan
}
