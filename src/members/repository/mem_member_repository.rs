use std::sync::Arc;
use async_trait::async_trait;
use chrono::Utc;
use crate::core::library::LibraryResult;
use crate::core::memory::MemoryTable;
use crate::core::repository::Repository;
use crate::members::domain::model::MemberEntity;
use crate::members::repository::{MemberRepository, name_matches};

#[derive(Debug)]
pub(crate) struct MemMemberRepository {
    table: Arc<MemoryTable<MemberEntity>>,
}

impl MemMemberRepository {
    pub(crate) fn new() -> Self {
        Self::with_table(Arc::new(MemoryTable::new("members")))
    }

    pub(crate) fn with_table(table: Arc<MemoryTable<MemberEntity>>) -> Self {
        Self { table }
    }
}

#[async_trait]
impl Repository<MemberEntity> for MemMemberRepository {
    async fn create(&self, entity: &MemberEntity) -> LibraryResult<usize> {
        self.table.insert(entity).await
    }

    async fn update(&self, entity: &MemberEntity) -> LibraryResult<usize> {
        let mut next = entity.clone();
        next.version = entity.version + 1;
        next.updated_at = Utc::now().naive_utc();
        self.table.replace(entity, next).await
    }

    async fn get(&self, id: &str) -> LibraryResult<MemberEntity> {
        self.table.find(id).await
    }

    async fn delete(&self, id: &str) -> LibraryResult<usize> {
        self.table.remove(id).await
    }
}

#[async_trait]
impl MemberRepository for MemMemberRepository {
    async fn find_all(&self) -> LibraryResult<Vec<MemberEntity>> {
        Ok(self.table.select(|_| true).await)
    }

    async fn search_by_name(&self, name: &str) -> LibraryResult<Vec<MemberEntity>> {
        Ok(self.table.select(|m| name_matches(m, name)).await)
    }
}

#[cfg(test)]
mod tests {
        use chrono::NaiveDate;
    use crate::core::library::{LibraryError, MemberTier};
    use crate::core::repository::Repository;
    use crate::members::domain::model::MemberEntity;
    use crate::members::repository::MemberRepository;
    use crate::members::repository::mem_member_repository::MemMemberRepository;

    fn member(id: &str, first: &str, last: &str) -> MemberEntity {
        MemberEntity::new(id, first, last, NaiveDate::from_ymd_opt(1990, 1, 1).unwrap())
    }

    #[tokio::test]
    async fn test_should_create_update_members() {
        let repo = MemMemberRepository::new();
        let mut m = member("M1", "Ada", "Lovelace");
        assert_eq!(1, repo.create(&m).await.expect("should create member"));
        assert!(matches!(repo.create(&m).await, Err(LibraryError::DuplicateKey { .. })));
        m.tier = MemberTier::Premium;
        repo.update(&m).await.expect("should update member");
        let loaded = repo.get("M1").await.expect("should get member");
        assert_eq!(MemberTier::Premium, loaded.tier);
        assert_eq!(1, loaded.version);
    }

    #[tokio::test]
    async fn test_should_search_and_delete_members() {
        let repo = MemMemberRepository::new();
        repo.create(&member("M1", "Ada", "Lovelace")).await.expect("should create member");
        repo.create(&member("M2", "Alan", "Turing")).await.expect("should create member");
        assert_eq!(1, repo.search_by_name("love").await.expect("should search").len());
        assert_eq!(1, repo.search_by_name("ALAN").await.expect("should search").len());
        assert_eq!(2, repo.search_by_name("a").await.expect("should search").len());
        assert_eq!(1, repo.delete("M1").await.expect("should delete"));
        assert!(repo.delete("M1").await.expect_err("should be gone").is_not_found());
        assert_eq!(1, repo.find_all().await.expect("should list").len());
    }
}
