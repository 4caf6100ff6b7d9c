use async_trait::async_trait;
use std::fmt;
use std::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};
use crate::core::library::LibraryResult;

#[async_trait]
pub trait Repository<Entity>: Sync + Send {
    // create an entity, fails with DuplicateKey when the id is taken
    async fn create(&self, entity: &Entity) -> LibraryResult<usize>;

    // updates an entity, fails with NotFound when the id is absent
    async fn update(&self, entity: &Entity) -> LibraryResult<usize>;

    // get an entity
    async fn get(&self, id: &str) -> LibraryResult<Entity>;

    // delete an entity, fails with NotFound when the id is absent
    async fn delete(&self, id: &str) -> LibraryResult<usize>;
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Copy)]
pub enum RepositoryStore {
    DynamoDB,
    LocalDynamoDB,
    InMemory,
}

impl RepositoryStore {
    pub fn from_env() -> RepositoryStore {
        std::env::var("LMS_STORE").map(RepositoryStore::from).unwrap_or(RepositoryStore::InMemory)
    }

    pub fn is_dynamo(&self) -> bool {
        matches!(self, RepositoryStore::DynamoDB | RepositoryStore::LocalDynamoDB)
    }
}

impl From<String> for RepositoryStore {
    fn from(s: String) -> Self {
        match s.as_str() {
            "DynamoDB" => RepositoryStore::DynamoDB,
            "LocalDynamoDB" => RepositoryStore::LocalDynamoDB,
            _ => RepositoryStore::InMemory,
        }
    }
}

impl Display for RepositoryStore {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            RepositoryStore::DynamoDB => write!(f, "DynamoDB"),
            RepositoryStore::LocalDynamoDB => write!(f, "LocalDynamoDB"),
            RepositoryStore::InMemory => write!(f, "InMemory"),
        }
    }
}

// case-insensitive substring match, an empty needle matches everything
pub(crate) fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle.to_lowercase().as_str())
}

#[cfg(test)]
mod tests {
    use crate::core::repository::{contains_ignore_case, RepositoryStore};

    #[tokio::test]
    async fn test_should_parse_store() {
        for store in vec![RepositoryStore::DynamoDB, RepositoryStore::LocalDynamoDB, RepositoryStore::InMemory] {
            assert_eq!(store, RepositoryStore::from(store.to_string()));
        }
        assert_eq!(RepositoryStore::InMemory, RepositoryStore::from("bogus".to_string()));
        assert!(RepositoryStore::LocalDynamoDB.is_dynamo());
        assert!(!RepositoryStore::InMemory.is_dynamo());
    }

    #[tokio::test]
    async fn test_should_match_ignoring_case() {
        assert!(contains_ignore_case("The Rust Book", "rust"));
        assert!(contains_ignore_case("Klabnik", ""));
        assert!(!contains_ignore_case("Klabnik", "nichols"));
    }
}
