use std::sync::Arc;
use lazy_static::lazy_static;
use crate::books::domain::model::BookEntity;
use crate::books::repository::BookRepository;
use crate::books::repository::ddb_book_repository::DDBBookRepository;
use crate::books::repository::mem_book_repository::MemBookRepository;
use crate::core::memory::MemoryTable;
use crate::core::repository::RepositoryStore;
use crate::utils::ddb::{build_db_client, create_key_table};

lazy_static! {
    // books live for the whole process when no database is configured
    static ref BOOKS: Arc<MemoryTable<BookEntity>> = Arc::new(MemoryTable::new("books"));
}

pub(crate) async fn create_book_repository(store: RepositoryStore) -> Box<dyn BookRepository> {
    match store {
        RepositoryStore::DynamoDB => {
            let client = build_db_client(store).await;
            Box::new(DDBBookRepository::new(client, "books"))
        }
        RepositoryStore::LocalDynamoDB => {
            let client = build_db_client(store).await;
            let _ = create_key_table(&client, "books", "isbn").await;
            Box::new(DDBBookRepository::new(client, "books"))
        }
        RepositoryStore::InMemory => {
            Box::new(MemBookRepository::with_table(BOOKS.clone()))
        }
    }
}
