pub mod service;

use async_trait::async_trait;
use crate::books::dto::{BookDto, CategoryShareDto};
use crate::core::library::LibraryResult;

// CatalogService owns book records; guarding deletes against active loans is left to checkout
#[async_trait]
pub(crate) trait CatalogService: Sync + Send {
    async fn add_book(&self, book: &BookDto) -> LibraryResult<BookDto>;
    async fn remove_book(&self, isbn: &str) -> LibraryResult<()>;
    async fn update_book(&self, book: &BookDto) -> LibraryResult<BookDto>;
    async fn mark_available(&self, isbn: &str, available: bool) -> LibraryResult<BookDto>;
    async fn find_book_by_id(&self, isbn: &str) -> LibraryResult<BookDto>;
    async fn find_books(&self) -> LibraryResult<Vec<BookDto>>;
    async fn search_by_title(&self, title: &str) -> LibraryResult<Vec<BookDto>>;
    async fn search_by_author(&self, author: &str) -> LibraryResult<Vec<BookDto>>;
    // titles per category, largest first
    async fn category_breakdown(&self) -> LibraryResult<Vec<CategoryShareDto>>;
}
