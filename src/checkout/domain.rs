use async_trait::async_trait;
use chrono::NaiveDate;
use crate::books::dto::BookDto;
use crate::checkout::dto::{DueSoonDto, FineDto, FinesReport, LibraryStats, LoanDto, OverdueLoanDto};
use crate::core::library::{LibraryResult, MemberTier};
use crate::patrons::dto::PatronDto;

pub mod policy;
pub mod service;

// CheckoutService coordinates catalog, members and the loan ledger for the loan lifecycle
#[async_trait]
pub(crate) trait CheckoutService: Sync + Send {
    async fn borrow_book(&self, isbn: &str, member_id: &str,
                         loan_date: NaiveDate, return_date: Option<NaiveDate>) -> LibraryResult<LoanDto>;
    async fn return_book(&self, loan_id: i64, return_date: NaiveDate) -> LibraryResult<LoanDto>;
    async fn delete_member(&self, member_id: &str) -> LibraryResult<()>;
    async fn delete_book(&self, isbn: &str) -> LibraryResult<()>;
    async fn delete_loan(&self, loan_id: i64) -> LibraryResult<()>;
    // None toggles between standard and premium
    async fn change_member_tier(&self, member_id: &str, tier: Option<MemberTier>) -> LibraryResult<PatronDto>;
    async fn update_book(&self, book: &BookDto) -> LibraryResult<BookDto>;
    async fn sync_availability(&self, isbn: &str) -> LibraryResult<BookDto>;
    async fn available_copies(&self, isbn: &str) -> LibraryResult<i64>;
    async fn find_loan(&self, loan_id: i64) -> LibraryResult<LoanDto>;
    async fn list_loans(&self) -> LibraryResult<Vec<LoanDto>>;
    async fn search_loans(&self, keyword: &str) -> LibraryResult<Vec<LoanDto>>;
    async fn overdue_loans(&self, as_of: NaiveDate) -> LibraryResult<Vec<OverdueLoanDto>>;
    async fn due_soon_loans(&self, as_of: NaiveDate) -> LibraryResult<Vec<DueSoonDto>>;
    async fn fine_for_loan(&self, loan_id: i64, as_of: NaiveDate) -> LibraryResult<FineDto>;
    async fn fines_report(&self, as_of: NaiveDate) -> LibraryResult<FinesReport>;
    async fn stats(&self, as_of: NaiveDate) -> LibraryResult<LibraryStats>;
}
