pub mod ddb_book_repository;
pub mod mem_book_repository;

use async_trait::async_trait;
use crate::books::domain::model::BookEntity;
use crate::core::library::LibraryResult;
use crate::core::repository::Repository;

#[async_trait]
pub(crate) trait BookRepository: Repository<BookEntity> {
    // every book, ordered by isbn
    async fn find_all(&self) -> LibraryResult<Vec<BookEntity>>;

    // case-insensitive substring match on title, unordered
    async fn search_by_title(&self, title: &str) -> LibraryResult<Vec<BookEntity>>;

    // case-insensitive substring match on author, unordered
    async fn search_by_author(&self, author: &str) -> LibraryResult<Vec<BookEntity>>;
}
