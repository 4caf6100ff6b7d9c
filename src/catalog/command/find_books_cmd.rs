use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::books::dto::BookDto;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};
use crate::core::repository::contains_ignore_case;

pub(crate) struct FindBooksCommand {
    catalog_service: Box<dyn CatalogService>,
}

impl FindBooksCommand {
    pub(crate) fn new(catalog_service: Box<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

// lists every book unless a title or author filter is given; both filters narrow together
#[derive(Debug, Default, Deserialize)]
pub(crate) struct FindBooksCommandRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
}

impl FindBooksCommandRequest {
    pub fn new(title: Option<&str>, author: Option<&str>) -> Self {
        Self {
            title: title.map(str::to_string),
            author: author.map(str::to_string),
        }
    }
}


#[derive(Debug, Serialize)]
pub(crate) struct FindBooksCommandResponse {
    pub books: Vec<BookDto>,
}

impl FindBooksCommandResponse {
    pub fn new(books: Vec<BookDto>) -> Self {
        Self {
            books,
        }
    }
}

#[async_trait]
impl Command<FindBooksCommandRequest, FindBooksCommandResponse> for FindBooksCommand {
    async fn execute(&self, req: FindBooksCommandRequest) -> Result<FindBooksCommandResponse, CommandError> {
        let books = match (req.title, req.author) {
            (Some(title), Some(author)) => self.catalog_service.search_by_title(title.as_str()).await
                .map(|books| books.into_iter().filter(|b| contains_ignore_case(&b.author, author.as_str())).collect()),
            (Some(title), None) => self.catalog_service.search_by_title(title.as_str()).await,
            (None, Some(author)) => self.catalog_service.search_by_author(author.as_str()).await,
            (None, None) => self.catalog_service.find_books().await,
        };
        books.map_err(CommandError::from).map(FindBooksCommandResponse::new)
    }
}
