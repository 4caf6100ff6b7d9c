use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::books::domain::Book;
use crate::core::domain::Identifiable;
use crate::utils::date::serializer;

// BookDto is a data transfer object for Catalog service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct BookDto {
    pub isbn: String,
    pub version: i64,
    pub title: String,
    pub author: String,
    pub category: String,
    pub total_quantity: i64,
    pub available: bool,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl BookDto {
    pub fn new(isbn: &str, title: &str, author: &str, category: &str, total_quantity: i64) -> BookDto {
        BookDto {
            isbn: isbn.to_string(),
            version: 0,
            title: title.to_string(),
            author: author.to_string(),
            category: category.to_string(),
            total_quantity,
            available: total_quantity > 0,
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }
}

impl Identifiable for BookDto {
    fn id(&self) -> String {
        self.isbn.to_string()
    }

    fn version(&self) -> i64 {
        self.version
    }
}

impl Book for BookDto {
    fn total_quantity(&self) -> i64 {
        self.total_quantity
    }

    fn is_available(&self) -> bool {
        self.available
    }
}

// CategoryShareDto counts the titles of one category and their share of the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct CategoryShareDto {
    pub category: String,
    pub books: usize,
    pub percentage: f64,
}

impl CategoryShareDto {
    pub fn new(category: &str, books: usize, total_books: usize) -> CategoryShareDto {
        let percentage = if total_books > 0 { books as f64 * 100.0 / total_books as f64 } else { 0.0 };
        CategoryShareDto {
            category: category.to_string(),
            books,
            percentage,
        }
    }
}
