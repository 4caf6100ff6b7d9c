use std::sync::Arc;
use async_trait::async_trait;
use chrono::Utc;
use crate::books::domain::model::BookEntity;
use crate::books::repository::BookRepository;
use crate::core::library::LibraryResult;
use crate::core::memory::MemoryTable;
use crate::core::repository::{contains_ignore_case, Repository};

#[derive(Debug)]
pub struct MemBookRepository {
    table: Arc<MemoryTable<BookEntity>>,
}

impl MemBookRepository {
    pub(crate) fn new() -> Self {
        Self::with_table(Arc::new(MemoryTable::new("books")))
    }

    pub(crate) fn with_table(table: Arc<MemoryTable<BookEntity>>) -> Self {
        Self { table }
    }
}

#[async_trait]
impl Repository<BookEntity> for MemBookRepository {
    async fn create(&self, entity: &BookEntity) -> LibraryResult<usize> {
        self.table.insert(entity).await
    }

    async fn update(&self, entity: &BookEntity) -> LibraryResult<usize> {
        let mut next = entity.clone();
        next.version = entity.version + 1;
        next.updated_at = Utc::now().naive_utc();
        self.table.replace(entity, next).await
    }

    async fn get(&self, id: &str) -> LibraryResult<BookEntity> {
        self.table.find(id).await
    }

    async fn delete(&self, id: &str) -> LibraryResult<usize> {
        self.table.remove(id).await
    }
}

#[async_trait]
impl BookRepository for MemBookRepository {
    async fn find_all(&self) -> LibraryResult<Vec<BookEntity>> {
        Ok(self.table.select(|_| true).await)
    }

    async fn search_by_title(&self, title: &str) -> LibraryResult<Vec<BookEntity>> {
        Ok(self.table.select(|b| contains_ignore_case(&b.title, title)).await)
    }

    async fn search_by_author(&self, author: &str) -> LibraryResult<Vec<BookEntity>> {
        Ok(self.table.select(|b| contains_ignore_case(&b.author, author)).await)
    }
}

#[cfg(test)]
mod tests {
        use crate::books::domain::model::BookEntity;
    use crate::books::repository::BookRepository;
    use crate::books::repository::mem_book_repository::MemBookRepository;
    use crate::core::library::LibraryError;
    use crate::core::repository::Repository;

    #[tokio::test]
    async fn test_should_create_get_books() {
        let books_repo = MemBookRepository::new();
        let book = BookEntity::new("B1", "test book", "author", "fiction", 1);
        assert_eq!(1, books_repo.create(&book).await.expect("should create book"));
        let loaded = books_repo.get("B1").await.expect("should return book");
        assert_eq!(book, loaded);
        assert!(matches!(books_repo.create(&book).await, Err(LibraryError::DuplicateKey { .. })));
    }

    #[tokio::test]
    async fn test_should_create_update_books() {
        let books_repo = MemBookRepository::new();
        let mut book = BookEntity::new("B1", "test book", "author", "fiction", 1);
        books_repo.create(&book).await.expect("should create book");
        book.title = "new title".to_string();
        book.total_quantity = 3;
        assert_eq!(1, books_repo.update(&book).await.expect("should update book"));
        let loaded = books_repo.get("B1").await.expect("should return book");
        assert_eq!("new title", loaded.title.as_str());
        assert_eq!(3, loaded.total_quantity);
        assert_eq!(1, loaded.version);
        // the old version is now stale
        assert!(books_repo.update(&book).await.is_err());
    }

    #[tokio::test]
    async fn test_should_create_delete_books() {
        let books_repo = MemBookRepository::new();
        books_repo.create(&BookEntity::new("B1", "test book", "author", "fiction", 1)).await.expect("should create book");
        assert_eq!(1, books_repo.delete("B1").await.expect("should delete book"));
        assert!(books_repo.get("B1").await.expect_err("should be gone").is_not_found());
        assert!(books_repo.delete("B1").await.expect_err("should be gone").is_not_found());
    }

    #[tokio::test]
    async fn test_should_search_books() {
        let books_repo = MemBookRepository::new();
        books_repo.create(&BookEntity::new("B1", "The Rust Programming Language", "Klabnik", "tech", 2)).await.expect("should create book");
        books_repo.create(&BookEntity::new("B2", "Rust in Action", "McNamara", "tech", 1)).await.expect("should create book");
        books_repo.create(&BookEntity::new("B3", "Dune", "Herbert", "fiction", 1)).await.expect("should create book");
        assert_eq!(2, books_repo.search_by_title("rust").await.expect("should search").len());
        assert_eq!(1, books_repo.search_by_author("HERB").await.expect("should search").len());
        assert!(books_repo.search_by_title("missing").await.expect("should search").is_empty());
        assert_eq!(3, books_repo.find_all().await.expect("should list").len());
    }
}
