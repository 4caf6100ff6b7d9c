use std::collections::HashMap;
use tokio::sync::RwLock;
use crate::core::domain::Identifiable;
use crate::core::library::{LibraryError, LibraryResult};

// MemoryTable is the keyed storage behind the in-memory repositories
#[derive(Debug)]
pub(crate) struct MemoryTable<T> {
    name: String,
    rows: RwLock<HashMap<String, T>>,
}

impl<T: Identifiable + Clone> MemoryTable<T> {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            rows: RwLock::new(HashMap::new()),
        }
    }

    pub(crate) async fn insert(&self, entity: &T) -> LibraryResult<usize> {
        let mut rows = self.rows.write().await;
        if rows.contains_key(&entity.id()) {
            return Err(LibraryError::duplicate_key(
                format!("{} already has {}", self.name, entity.id()).as_str()));
        }
        rows.insert(entity.id(), entity.clone());
        Ok(1)
    }

    // replaces the stored row with `next` when `current` still carries the stored version
    pub(crate) async fn replace(&self, current: &T, next: T) -> LibraryResult<usize> {
        let mut rows = self.rows.write().await;
        match rows.get(&current.id()) {
            None => Err(LibraryError::not_found(
                format!("{} has no {}", self.name, current.id()).as_str())),
            Some(stored) if stored.version() != current.version() => Err(LibraryError::database(
                format!("stale version {} for {} in {}", current.version(), current.id(), self.name).as_str(),
                Some("ConditionalCheckFailed".to_string()), false)),
            Some(_) => {
                rows.insert(current.id(), next);
                Ok(1)
            }
        }
    }

    pub(crate) async fn find(&self, id: &str) -> LibraryResult<T> {
        self.rows.read().await.get(id).cloned().ok_or_else(|| LibraryError::not_found(
            format!("{} has no {}", self.name, id).as_str()))
    }

    pub(crate) async fn remove(&self, id: &str) -> LibraryResult<usize> {
        self.rows.write().await.remove(id).map(|_| 1).ok_or_else(|| LibraryError::not_found(
            format!("{} has no {}", self.name, id).as_str()))
    }

    // rows matching the filter, ordered by id
    pub(crate) async fn select<F: Fn(&T) -> bool>(&self, filter: F) -> Vec<T> {
        let rows = self.rows.read().await;
        let mut res: Vec<T> = rows.values().filter(|row| filter(row)).cloned().collect();
        res.sort_by_key(|row| row.id());
        res
    }
}

#[cfg(test)]
mod tests {
    use crate::core::domain::Identifiable;
    use crate::core::library::LibraryError;
    use crate::core::memory::MemoryTable;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: String,
        version: i64,
    }

    impl Identifiable for Row {
        fn id(&self) -> String {
            self.id.clone()
        }

        fn version(&self) -> i64 {
            self.version
        }
    }

    fn row(id: &str, version: i64) -> Row {
        Row { id: id.to_string(), version }
    }

    #[tokio::test]
    async fn test_should_insert_and_reject_duplicates() {
        let table = MemoryTable::new("rows");
        assert_eq!(1, table.insert(&row("a", 0)).await.expect("should insert"));
        assert!(matches!(table.insert(&row("a", 0)).await, Err(LibraryError::DuplicateKey { .. })));
        assert_eq!(row("a", 0), table.find("a").await.expect("should find"));
    }

    #[tokio::test]
    async fn test_should_replace_current_version_only() {
        let table = MemoryTable::new("rows");
        table.insert(&row("a", 0)).await.expect("should insert");
        table.replace(&row("a", 0), row("a", 1)).await.expect("should replace");
        assert!(table.replace(&row("a", 0), row("a", 1)).await.is_err());
        assert!(table.replace(&row("b", 0), row("b", 1)).await.expect_err("missing").is_not_found());
    }

    #[tokio::test]
    async fn test_should_remove_and_select() {
        let table = MemoryTable::new("rows");
        for id in ["c", "a", "b"] {
            table.insert(&row(id, 0)).await.expect("should insert");
        }
        let ids: Vec<String> = table.select(|_| true).await.iter().map(|r| r.id.clone()).collect();
        assert_eq!(vec!["a", "b", "c"], ids);
        assert_eq!(1, table.remove("b").await.expect("should remove"));
        assert!(table.remove("b").await.expect_err("gone").is_not_found());
        assert_eq!(2, table.select(|_| true).await.len());
    }
}
