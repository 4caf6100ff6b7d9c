use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::memory::MemoryTable;
use crate::core::repository::Repository;
use crate::loans::domain::model::LoanEntity;
use crate::loans::repository::LoanRepository;

#[derive(Debug)]
pub(crate) struct MemLoanRepository {
    table: Arc<MemoryTable<LoanEntity>>,
    last_id: Arc<AtomicI64>,
}

impl MemLoanRepository {
    pub(crate) fn new() -> Self {
        Self::with_table(Arc::new(MemoryTable::new("loans")), Arc::new(AtomicI64::new(0)))
    }

    pub(crate) fn with_table(table: Arc<MemoryTable<LoanEntity>>, last_id: Arc<AtomicI64>) -> Self {
        Self { table, last_id }
    }

    async fn select_sorted<F: Fn(&LoanEntity) -> bool>(&self, filter: F) -> Vec<LoanEntity> {
        let mut loans = self.table.select(filter).await;
        loans.sort_by_key(|l| l.loan_id);
        loans
    }
}

#[async_trait]
impl Repository<LoanEntity> for MemLoanRepository {
    async fn create(&self, entity: &LoanEntity) -> LibraryResult<usize> {
        self.table.insert(entity).await
    }

    async fn update(&self, entity: &LoanEntity) -> LibraryResult<usize> {
        let mut next = entity.clone();
        next.version = entity.version + 1;
        next.updated_at = Utc::now().naive_utc();
        self.table.replace(entity, next).await
    }

    async fn get(&self, id: &str) -> LibraryResult<LoanEntity> {
        self.table.find(id).await
    }

    async fn delete(&self, id: &str) -> LibraryResult<usize> {
        self.table.remove(id).await
    }
}

#[async_trait]
impl LoanRepository for MemLoanRepository {
    async fn create_loan(&self, isbn: &str, member_id: &str,
                         loan_date: NaiveDate, return_date: Option<NaiveDate>) -> LibraryResult<LoanEntity> {
        let loan_id = self.last_id.fetch_add(1, Ordering::SeqCst) + 1;
        let loan = LoanEntity::new(loan_id, isbn, member_id, loan_date, return_date);
        self.create(&loan).await?;
        Ok(loan)
    }

    async fn mark_returned(&self, loan_id: i64, return_date: NaiveDate) -> LibraryResult<LoanEntity> {
        let loan = self.find_loan(loan_id).await?;
        let mut returned = loan.clone();
        returned.return_date = Some(return_date);
        self.update(&returned).await?;
        self.find_loan(loan_id).await
    }

    async fn find_loan(&self, loan_id: i64) -> LibraryResult<LoanEntity> {
        self.get(loan_id.to_string().as_str()).await
            .map_err(|e| if e.is_not_found() { LibraryError::loan_not_found(loan_id) } else { e })
    }

    async fn delete_loan(&self, loan_id: i64) -> LibraryResult<()> {
        self.delete(loan_id.to_string().as_str()).await.map(|_| ())
            .map_err(|e| if e.is_not_found() { LibraryError::loan_not_found(loan_id) } else { e })
    }

    async fn list_loans(&self) -> LibraryResult<Vec<LoanEntity>> {
        Ok(self.select_sorted(|_| true).await)
    }

    async fn list_loans_by_member(&self, member_id: &str) -> LibraryResult<Vec<LoanEntity>> {
        Ok(self.select_sorted(|l| l.member_id == member_id).await)
    }

    async fn list_loans_by_book(&self, isbn: &str) -> LibraryResult<Vec<LoanEntity>> {
        Ok(self.select_sorted(|l| l.isbn == isbn).await)
    }
}
