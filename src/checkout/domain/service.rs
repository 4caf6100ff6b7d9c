use std::collections::HashMap;
use std::sync::Arc;
use async_trait::async_trait;
use chrono::NaiveDate;
use crate::books::domain::Book;
use crate::books::dto::BookDto;
use crate::catalog::domain::CatalogService;
use crate::catalog::domain::service::validate_book;
use crate::checkout::domain::CheckoutService;
use crate::checkout::domain::policy::{is_active, LoanPolicy};
use crate::checkout::dto::{DueSoonDto, FineDto, FinesReport, LibraryStats, LoanDto, OverdueLoanDto};
use crate::checkout::locks::BookLocks;
use crate::core::domain::Configuration;
use crate::core::events::DomainEvent;
use crate::core::library::{LibraryError, LibraryResult, MemberTier};
use crate::gateway::events::EventPublisher;
use crate::loans::domain::model::LoanEntity;
use crate::loans::repository::LoanRepository;
use crate::patrons::domain::PatronService;
use crate::patrons::dto::PatronDto;
use crate::utils::date::Clock;

pub(crate) struct CheckoutServiceImpl {
    branch_id: String,
    policy: LoanPolicy,
    loan_repository: Box<dyn LoanRepository>,
    patron_service: Box<dyn PatronService>,
    catalog_service: Box<dyn CatalogService>,
    events_publisher: Box<dyn EventPublisher>,
    clock: Box<dyn Clock>,
    locks: Arc<BookLocks>,
}

impl CheckoutServiceImpl {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(config: &Configuration, loan_repository: Box<dyn LoanRepository>,
                      patron_service: Box<dyn PatronService>, catalog_service: Box<dyn CatalogService>,
                      events_publisher: Box<dyn EventPublisher>, clock: Box<dyn Clock>,
                      locks: Arc<BookLocks>) -> Self {
        Self {
            branch_id: config.branch_id.to_string(),
            policy: LoanPolicy::new(config),
            loan_repository,
            patron_service,
            catalog_service,
            events_publisher,
            clock,
            locks,
        }
    }

    fn metadata(&self) -> HashMap<String, String> {
        HashMap::from([("branch_id".to_string(), self.branch_id.to_string())])
    }

    async fn active_loans_for_book(&self, isbn: &str, today: NaiveDate) -> LibraryResult<Vec<LoanEntity>> {
        Ok(self.loan_repository.list_loans_by_book(isbn).await?.into_iter()
            .filter(|l| is_active(l.return_date, today)).collect())
    }

    // stores available = total_quantity - active loans > 0; callers hold the book lock
    async fn refresh_availability(&self, book: &BookDto, today: NaiveDate) -> LibraryResult<BookDto> {
        let active = self.active_loans_for_book(book.isbn.as_str(), today).await?.len() as i64;
        let available = book.total_quantity() - active > 0;
        self.catalog_service.mark_available(book.isbn.as_str(), available).await
    }

    fn validate_ids(isbn: &str, member_id: &str) -> LibraryResult<()> {
        if isbn.trim().is_empty() || member_id.trim().is_empty() {
            return Err(LibraryError::validation(
                format!("isbn {:?} and member id {:?} are required", isbn, member_id).as_str(),
                Some("400".to_string())));
        }
        Ok(())
    }

    fn validate_dates(loan_date: NaiveDate, return_date: Option<NaiveDate>) -> LibraryResult<()> {
        match return_date {
            Some(returned) if returned < loan_date => Err(LibraryError::validation(
                format!("return date {} is before loan date {}", returned, loan_date).as_str(),
                Some("400".to_string()))),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl CheckoutService for CheckoutServiceImpl {
    async fn borrow_book(&self, isbn: &str, member_id: &str,
                         loan_date: NaiveDate, return_date: Option<NaiveDate>) -> LibraryResult<LoanDto> {
        Self::validate_ids(isbn, member_id)?;
        Self::validate_dates(loan_date, return_date)?;
        let _ = self.catalog_service.find_book_by_id(isbn).await?;
        let _guard = self.locks.lock(isbn).await;
        let today = self.clock.today();

        // re-read under the lock, the quantity may have changed meanwhile
        let book = self.catalog_service.find_book_by_id(isbn).await?;
        let active = self.active_loans_for_book(isbn, today).await?.len() as i64;
        if active >= book.total_quantity() {
            tracing::warn!(isbn, member_id, active, total_quantity = book.total_quantity(), "book unavailable");
            return Err(LibraryError::book_unavailable(isbn, active, book.total_quantity()));
        }
        let _ = self.patron_service.find_patron_by_id(member_id).await?;

        let loan = self.loan_repository.create_loan(isbn, member_id, loan_date, return_date).await?;
        self.refresh_availability(&book, today).await?;

        let dto = LoanDto::from_entity(&loan, today);
        tracing::info!(loan_id = loan.loan_id, isbn, member_id, loan_date = %loan_date, "book borrowed");
        self.events_publisher.publish(&DomainEvent::added(
            "book_borrowed", "loans", loan.loan_id.to_string().as_str(), &self.metadata(), &dto)?).await?;
        Ok(dto)
    }

    async fn return_book(&self, loan_id: i64, return_date: NaiveDate) -> LibraryResult<LoanDto> {
        let loan = self.loan_repository.find_loan(loan_id).await?;
        Self::validate_dates(loan.loan_date, Some(return_date))?;
        let _guard = self.locks.lock(loan.isbn.as_str()).await;
        let today = self.clock.today();

        let returned = self.loan_repository.mark_returned(loan_id, return_date).await?;
        match self.catalog_service.find_book_by_id(returned.isbn.as_str()).await {
            Ok(book) => {
                self.refresh_availability(&book, today).await?;
            }
            Err(err) if err.is_not_found() => {
                tracing::warn!(loan_id, isbn = returned.isbn.as_str(), "returned loan references a removed book");
            }
            Err(err) => return Err(err),
        }

        let dto = LoanDto::from_entity(&returned, today);
        tracing::info!(loan_id, isbn = returned.isbn.as_str(), return_date = %return_date, "book returned");
        self.events_publisher.publish(&DomainEvent::updated(
            "book_returned", "loans", loan_id.to_string().as_str(), &self.metadata(), &dto)?).await?;
        Ok(dto)
    }

    async fn delete_member(&self, member_id: &str) -> LibraryResult<()> {
        let _ = self.patron_service.find_patron_by_id(member_id).await?;
        let today = self.clock.today();
        let active = self.loan_repository.list_loans_by_member(member_id).await?.iter()
            .filter(|l| is_active(l.return_date, today)).count();
        if active > 0 {
            tracing::warn!(member_id, active, "member still has active loans");
            return Err(LibraryError::member_has_active_loans(member_id, active));
        }
        self.patron_service.remove_patron(member_id).await
    }

    async fn delete_book(&self, isbn: &str) -> LibraryResult<()> {
        let _guard = self.locks.lock(isbn).await;
        let _ = self.catalog_service.find_book_by_id(isbn).await?;
        let active = self.active_loans_for_book(isbn, self.clock.today()).await?.len();
        if active > 0 {
            tracing::warn!(isbn, active, "book still has active loans");
            return Err(LibraryError::book_has_active_loans(isbn, active));
        }
        self.catalog_service.remove_book(isbn).await
    }

    async fn delete_loan(&self, loan_id: i64) -> LibraryResult<()> {
        let loan = self.loan_repository.find_loan(loan_id).await?;
        if is_active(loan.return_date, self.clock.today()) {
            return Err(LibraryError::loan_still_active(loan_id));
        }
        self.loan_repository.delete_loan(loan_id).await?;
        tracing::info!(loan_id, isbn = loan.isbn.as_str(), "loan deleted");
        self.events_publisher.publish(&DomainEvent::deleted(
            "loan_deleted", "loans", loan_id.to_string().as_str(), &self.metadata(), &loan_id)?).await
    }

    async fn change_member_tier(&self, member_id: &str, tier: Option<MemberTier>) -> LibraryResult<PatronDto> {
        let member = self.patron_service.find_patron_by_id(member_id).await?;
        let next = tier.unwrap_or_else(|| member.tier.toggle());
        self.patron_service.change_tier(member_id, next).await
    }

    // rejects a total quantity below the number of copies currently on loan
    async fn update_book(&self, book: &BookDto) -> LibraryResult<BookDto> {
        validate_book(book)?;
        let _guard = self.locks.lock(book.isbn.as_str()).await;
        let today = self.clock.today();
        let active = self.active_loans_for_book(book.isbn.as_str(), today).await?.len() as i64;
        if book.total_quantity < active {
            return Err(LibraryError::validation(
                format!("book {} has {} copies on loan, more than the new total {}",
                        book.isbn, active, book.total_quantity).as_str(), Some("400".to_string())));
        }
        let updated = self.catalog_service.update_book(book).await?;
        self.refresh_availability(&updated, today).await
    }

    async fn sync_availability(&self, isbn: &str) -> LibraryResult<BookDto> {
        let _guard = self.locks.lock(isbn).await;
        let book = self.catalog_service.find_book_by_id(isbn).await?;
        self.refresh_availability(&book, self.clock.today()).await
    }

    async fn available_copies(&self, isbn: &str) -> LibraryResult<i64> {
        let book = self.catalog_service.find_book_by_id(isbn).await?;
        let active = self.active_loans_for_book(isbn, self.clock.today()).await?.len() as i64;
        Ok((book.total_quantity() - active).max(0))
    }

    async fn find_loan(&self, loan_id: i64) -> LibraryResult<LoanDto> {
        let loan = self.loan_repository.find_loan(loan_id).await?;
        Ok(LoanDto::from_entity(&loan, self.clock.today()))
    }

    async fn list_loans(&self) -> LibraryResult<Vec<LoanDto>> {
        let today = self.clock.today();
        Ok(self.loan_repository.list_loans().await?.iter().map(|l| LoanDto::from_entity(l, today)).collect())
    }

    async fn search_loans(&self, keyword: &str) -> LibraryResult<Vec<LoanDto>> {
        let today = self.clock.today();
        Ok(self.loan_repository.search_loans(keyword).await?.iter().map(|l| LoanDto::from_entity(l, today)).collect())
    }

    async fn overdue_loans(&self, as_of: NaiveDate) -> LibraryResult<Vec<OverdueLoanDto>> {
        Ok(self.loan_repository.list_loans().await?.iter()
            .filter(|l| self.policy.is_overdue(l.loan_date, l.return_date, as_of))
            .map(|l| OverdueLoanDto {
                loan: LoanDto::from_entity(l, as_of),
                days_overdue: self.policy.days_overdue(l.loan_date, as_of),
            })
            .collect())
    }

    async fn due_soon_loans(&self, as_of: NaiveDate) -> LibraryResult<Vec<DueSoonDto>> {
        Ok(self.loan_repository.list_loans().await?.iter()
            .filter_map(|l| self.policy.days_until_due(l.loan_date, l.return_date, as_of)
                .map(|days_remaining| DueSoonDto { loan: LoanDto::from_entity(l, as_of), days_remaining }))
            .collect())
    }

    async fn fine_for_loan(&self, loan_id: i64, as_of: NaiveDate) -> LibraryResult<FineDto> {
        let loan = self.loan_repository.find_loan(loan_id).await?;
        Ok(FineDto::from_entity(&self.policy, &loan, as_of))
    }

    // unreturned loans are listed with a zero fine next to the late returns
    async fn fines_report(&self, as_of: NaiveDate) -> LibraryResult<FinesReport> {
        let fines: Vec<FineDto> = self.loan_repository.list_loans().await?.iter()
            .filter(|l| l.return_date.map(|r| r < as_of).unwrap_or(true))
            .map(|l| FineDto::from_entity(&self.policy, l, as_of))
            .collect();
        let outstanding = fines.iter().filter(|f| f.return_date.is_none()).count();
        let total = fines.iter().map(|f| f.fine).sum();
        Ok(FinesReport { as_of, fines, outstanding, total })
    }

    async fn stats(&self, as_of: NaiveDate) -> LibraryResult<LibraryStats> {
        let books = self.catalog_service.find_books().await?;
        let members = self.patron_service.find_patrons().await?;
        let loans = self.loan_repository.list_loans().await?;
        let total_fines = self.fines_report(as_of).await?.total;
        Ok(LibraryStats {
            as_of,
            books: books.len(),
            copies: books.iter().map(|b| b.total_quantity).sum(),
            members: members.len(),
            loans: loans.len(),
            active_loans: loans.iter().filter(|l| is_active(l.return_date, as_of)).count(),
            overdue_loans: loans.iter().filter(|l| self.policy.is_overdue(l.loan_date, l.return_date, as_of)).count(),
            total_fines,
        })
    }
}
