use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::AttributeValue;
use chrono::Utc;

use crate::books::domain::model::BookEntity;
use crate::books::repository::BookRepository;
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::{contains_ignore_case, Repository};
use crate::utils::ddb::{parse_bool_attribute, parse_date_attribute, parse_item, parse_number_attribute, parse_string_attribute, scan_all, stale_or_missing, string_date};

#[derive(Debug)]
pub struct DDBBookRepository {
    client: Client,
    table_name: String,
}

impl DDBBookRepository {
    pub(crate) fn new(client: Client, table_name: &str) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
        }
    }

    async fn find_matching<F: Fn(&BookEntity) -> bool>(&self, filter: F) -> LibraryResult<Vec<BookEntity>> {
        let items = scan_all(&self.client, self.table_name.as_str()).await?;
        Ok(items.iter().map(map_to_book).filter(|b| filter(b)).collect())
    }
}

#[async_trait]
impl Repository<BookEntity> for DDBBookRepository {
    async fn create(&self, entity: &BookEntity) -> LibraryResult<usize> {
        let table_name: &str = self.table_name.as_ref();
        let val = serde_json::to_value(entity)?;
        self.client
            .put_item()
            .table_name(table_name)
            .condition_expression("attribute_not_exists(isbn)")
            .set_item(Some(parse_item(val)?))
            .send()
            .await.map(|_| 1).map_err(LibraryError::from)
    }

    async fn update(&self, entity: &BookEntity) -> LibraryResult<usize> {
        let now = Utc::now().naive_utc();
        let table_name: &str = self.table_name.as_ref();

        self.client
            .update_item()
            .table_name(table_name)
            .key("isbn", AttributeValue::S(entity.isbn.clone()))
            .update_expression("SET version = :version, title = :title, author = :author, category = :category, total_quantity = :total_quantity, available = :available, updated_at = :updated_at")
            .expression_attribute_values(":old_version", AttributeValue::N(entity.version.to_string()))
            .expression_attribute_values(":version", AttributeValue::N((entity.version + 1).to_string()))
            .expression_attribute_values(":title", AttributeValue::S(entity.title.to_string()))
            .expression_attribute_values(":author", AttributeValue::S(entity.author.to_string()))
            .expression_attribute_values(":category", AttributeValue::S(entity.category.to_string()))
            .expression_attribute_values(":total_quantity", AttributeValue::N(entity.total_quantity.to_string()))
            .expression_attribute_values(":available", AttributeValue::Bool(entity.available))
            .expression_attribute_values(":updated_at", string_date(now))
            .condition_expression("attribute_exists(version) AND version = :old_version")
            .send()
            .await.map(|_| 1).map_err(|e| stale_or_missing(LibraryError::from(e), table_name, entity.isbn.as_str()))
    }

    async fn get(&self, id: &str) -> LibraryResult<BookEntity> {
        let table_name: &str = self.table_name.as_ref();
        self.client
            .query()
            .table_name(table_name)
            .limit(2)
            .consistent_read(true)
            .key_condition_expression(
                "isbn = :isbn",
            )
            .expression_attribute_values(
                ":isbn",
                AttributeValue::S(id.to_string()),
            )
            .send()
            .await.map_err(LibraryError::from).and_then(|req| {
            if let Some(map) = req.items().and_then(|items| items.first()) {
                return Ok(map_to_book(map));
            }
            Err(LibraryError::not_found(format!("book not found for {}", id).as_str()))
        })
    }

    async fn delete(&self, id: &str) -> LibraryResult<usize> {
        let table_name: &str = self.table_name.as_ref();
        self.client.delete_item()
            .table_name(table_name)
            .key("isbn", AttributeValue::S(id.to_string()))
            .condition_expression("attribute_exists(isbn)")
            .send()
            .await.map(|_| 1).map_err(|e| match LibraryError::from(e) {
            LibraryError::DuplicateKey { .. } => LibraryError::not_found(format!("book not found for {}", id).as_str()),
            other => other,
        })
    }

    // predicate values are compared as strings; see reserved words at
    // https://docs.aws.amazon.com/amazondynamodb/latest/developerguide/ReservedWords.html
}

#[async_trait]
impl BookRepository for DDBBookRepository {
    async fn find_all(&self) -> LibraryResult<Vec<BookEntity>> {
        let mut books = self.find_matching(|_| true).await?;
        books.sort_by(|a, b| a.isbn.cmp(&b.isbn));
        Ok(books)
    }

    async fn search_by_title(&self, title: &str) -> LibraryResult<Vec<BookEntity>> {
        self.find_matching(|b| contains_ignore_case(&b.title, title)).await
    }

    async fn search_by_author(&self, author: &str) -> LibraryResult<Vec<BookEntity>> {
        self.find_matching(|b| contains_ignore_case(&b.author, author)).await
    }
}

fn map_to_book(map: &HashMap<String, AttributeValue>) -> BookEntity {
    BookEntity {
        isbn: parse_string_attribute("isbn", map).unwrap_or(String::from("")),
        version: parse_number_attribute("version", map),
        title: parse_string_attribute("title", map).unwrap_or(String::from("")),
        author: parse_string_attribute("author", map).unwrap_or(String::from("")),
        category: parse_string_attribute("category", map).unwrap_or(String::from("")),
        total_quantity: parse_number_attribute("total_quantity", map),
        available: parse_bool_attribute("available", map),
        created_at: parse_date_attribute("created_at", map).unwrap_or(Utc::now().naive_utc()),
        updated_at: parse_date_attribute("updated_at", map).unwrap_or(Utc::now().naive_utc()),
    }
}
