use std::sync::Arc;
use std::sync::atomic::AtomicI64;
use lazy_static::lazy_static;
use crate::core::memory::MemoryTable;
use crate::core::repository::RepositoryStore;
use crate::loans::domain::model::LoanEntity;
use crate::loans::repository::LoanRepository;
use crate::loans::repository::ddb_loan_repository::DDBLoanRepository;
use crate::loans::repository::mem_loan_repository::MemLoanRepository;
use crate::utils::ddb::{build_db_client, create_key_table};

lazy_static! {
    static ref LOANS: Arc<MemoryTable<LoanEntity>> = Arc::new(MemoryTable::new("loans"));
    static ref LOAN_IDS: Arc<AtomicI64> = Arc::new(AtomicI64::new(0));
}

pub(crate) async fn create_loan_repository(store: RepositoryStore) -> Box<dyn LoanRepository> {
    match store {
        RepositoryStore::DynamoDB => {
            let client = build_db_client(store).await;
            Box::new(DDBLoanRepository::new(client, "loans", "sequences"))
        }
        RepositoryStore::LocalDynamoDB => {
            let client = build_db_client(store).await;
            let _ = create_key_table(&client, "loans", "loan_id").await;
            let _ = create_key_table(&client, "sequences", "sequence_id").await;
            Box::new(DDBLoanRepository::new(client, "loans", "sequences"))
        }
        RepositoryStore::InMemory => {
            Box::new(MemLoanRepository::with_table(LOANS.clone(), LOAN_IDS.clone()))
        }
    }
}
