use std::collections::HashMap;
use async_trait::async_trait;
use crate::books::domain::model::BookEntity;
use crate::books::dto::{BookDto, CategoryShareDto};
use crate::books::repository::BookRepository;
use crate::catalog::domain::CatalogService;
use crate::core::domain::Configuration;
use crate::core::events::DomainEvent;
use crate::core::library::{LibraryError, LibraryResult};
use crate::gateway::events::EventPublisher;

pub(crate) struct CatalogServiceImpl {
    branch_id: String,
    book_repository: Box<dyn BookRepository>,
    events_publisher: Box<dyn EventPublisher>,
}

impl CatalogServiceImpl {
    pub(crate) fn new(config: &Configuration, book_repository: Box<dyn BookRepository>,
                      events_publisher: Box<dyn EventPublisher>) -> Self {
        Self {
            branch_id: config.branch_id.to_string(),
            book_repository,
            events_publisher,
        }
    }

    fn metadata(&self) -> HashMap<String, String> {
        HashMap::from([("branch_id".to_string(), self.branch_id.to_string())])
    }

    async fn get_entity(&self, isbn: &str) -> LibraryResult<BookEntity> {
        self.book_repository.get(isbn).await
            .map_err(|e| if e.is_not_found() { LibraryError::book_not_found(isbn) } else { e })
    }
}

pub(crate) fn validate_book(book: &BookDto) -> LibraryResult<()> {
    if book.isbn.trim().is_empty() {
        return Err(LibraryError::validation("isbn is required", Some("400".to_string())));
    }
    if book.title.trim().is_empty() {
        return Err(LibraryError::validation(
            format!("title is required for {}", book.isbn).as_str(), Some("400".to_string())));
    }
    if book.total_quantity < 0 {
        return Err(LibraryError::validation(
            format!("total quantity {} of {} is negative", book.total_quantity, book.isbn).as_str(),
            Some("400".to_string())));
    }
    Ok(())
}

#[async_trait]
impl CatalogService for CatalogServiceImpl {
    async fn add_book(&self, book: &BookDto) -> LibraryResult<BookDto> {
        validate_book(book)?;
        let mut added = book.clone();
        added.version = 0;
        added.available = book.total_quantity > 0;
        self.book_repository.create(&BookEntity::from(&added)).await?;
        tracing::info!(isbn = added.isbn.as_str(), total_quantity = added.total_quantity, "book added");
        self.events_publisher.publish(&DomainEvent::added(
            "book_added", "books", added.isbn.as_str(), &self.metadata(), &added)?).await?;
        Ok(added)
    }

    async fn remove_book(&self, isbn: &str) -> LibraryResult<()> {
        self.book_repository.delete(isbn).await
            .map_err(|e| if e.is_not_found() { LibraryError::book_not_found(isbn) } else { e })?;
        tracing::info!(isbn, "book removed");
        let data = isbn.to_string();
        self.events_publisher.publish(&DomainEvent::deleted(
            "book_deleted", "books", isbn, &self.metadata(), &data)?).await
    }

    // the availability flag is left as stored; checkout re-derives it after edits
    async fn update_book(&self, book: &BookDto) -> LibraryResult<BookDto> {
        validate_book(book)?;
        let existing = self.get_entity(book.isbn.as_str()).await?;
        let mut next = BookEntity::from(book);
        next.version = existing.version;
        next.available = existing.available;
        next.created_at = existing.created_at;
        self.book_repository.update(&next).await?;
        let updated = self.find_book_by_id(book.isbn.as_str()).await?;
        tracing::info!(isbn = updated.isbn.as_str(), total_quantity = updated.total_quantity, "book updated");
        self.events_publisher.publish(&DomainEvent::updated(
            "book_updated", "books", updated.isbn.as_str(), &self.metadata(), &updated)?).await?;
        Ok(updated)
    }

    async fn mark_available(&self, isbn: &str, available: bool) -> LibraryResult<BookDto> {
        let mut book = self.get_entity(isbn).await?;
        if book.available == available {
            return Ok(BookDto::from(&book));
        }
        book.available = available;
        self.book_repository.update(&book).await?;
        tracing::debug!(isbn, available, "book availability changed");
        self.find_book_by_id(isbn).await
    }

    async fn find_book_by_id(&self, isbn: &str) -> LibraryResult<BookDto> {
        self.get_entity(isbn).await.map(|b| BookDto::from(&b))
    }

    async fn find_books(&self) -> LibraryResult<Vec<BookDto>> {
        Ok(self.book_repository.find_all().await?.iter().map(BookDto::from).collect())
    }

    async fn search_by_title(&self, title: &str) -> LibraryResult<Vec<BookDto>> {
        Ok(self.book_repository.search_by_title(title).await?.iter().map(BookDto::from).collect())
    }

    async fn search_by_author(&self, author: &str) -> LibraryResult<Vec<BookDto>> {
        Ok(self.book_repository.search_by_author(author).await?.iter().map(BookDto::from).collect())
    }

    async fn category_breakdown(&self) -> LibraryResult<Vec<CategoryShareDto>> {
        let books = self.book_repository.find_all().await?;
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for book in &books {
            *counts.entry(book.category.as_str()).or_default() += 1;
        }
        let mut shares: Vec<CategoryShareDto> = counts.iter()
            .map(|(category, count)| CategoryShareDto::new(category, *count, books.len()))
            .collect();
        shares.sort_by(|a, b| b.books.cmp(&a.books).then_with(|| a.category.cmp(&b.category)));
        Ok(shares)
    }
}

impl From<&BookEntity> for BookDto {
    fn from(other: &BookEntity) -> Self {
        Self {
            isbn: other.isbn.to_string(),
            version: other.version,
            title: other.title.to_string(),
            author: other.author.to_string(),
            category: other.category.to_string(),
            total_quantity: other.total_quantity,
            available: other.available,
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}

impl From<&BookDto> for BookEntity {
    fn from(other: &BookDto) -> Self {
        Self {
            isbn: other.isbn.to_string(),
            version: other.version,
            title: other.title.to_string(),
            author: other.author.to_string(),
            category: other.category.to_string(),
            total_quantity: other.total_quantity,
            available: other.available,
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}
