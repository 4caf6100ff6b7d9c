pub(crate) mod ddb_loan_repository;
pub(crate) mod mem_loan_repository;

use async_trait::async_trait;
use chrono::NaiveDate;
use crate::core::library::LibraryResult;
use crate::core::repository::{contains_ignore_case, Repository};
use crate::loans::domain::model::LoanEntity;

// LoanRepository is the ledger of loan facts; it does not look at books or members
#[async_trait]
pub(crate) trait LoanRepository: Repository<LoanEntity> {
    // records a new loan under the next free id
    async fn create_loan(&self, isbn: &str, member_id: &str,
                         loan_date: NaiveDate, return_date: Option<NaiveDate>) -> LibraryResult<LoanEntity>;

    // fails with NotFound when the loan id is absent
    async fn mark_returned(&self, loan_id: i64, return_date: NaiveDate) -> LibraryResult<LoanEntity>;

    async fn find_loan(&self, loan_id: i64) -> LibraryResult<LoanEntity>;

    async fn delete_loan(&self, loan_id: i64) -> LibraryResult<()>;

    // every loan, ordered by id
    async fn list_loans(&self) -> LibraryResult<Vec<LoanEntity>>;

    async fn list_loans_by_member(&self, member_id: &str) -> LibraryResult<Vec<LoanEntity>>;

    async fn list_loans_by_book(&self, isbn: &str) -> LibraryResult<Vec<LoanEntity>>;

    // loans whose isbn or member id contains the keyword, ignoring case
    async fn search_loans(&self, keyword: &str) -> LibraryResult<Vec<LoanEntity>> {
        Ok(self.list_loans().await?.into_iter()
            .filter(|l| contains_ignore_case(&l.isbn, keyword) || contains_ignore_case(&l.member_id, keyword))
            .collect())
    }
}
