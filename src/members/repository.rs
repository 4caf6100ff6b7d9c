pub(crate) mod ddb_member_repository;
pub(crate) mod mem_member_repository;

use async_trait::async_trait;
use crate::core::library::LibraryResult;
use crate::core::repository::Repository;
use crate::members::domain::model::MemberEntity;

#[async_trait]
pub(crate) trait MemberRepository: Repository<MemberEntity> {
    async fn find_all(&self) -> LibraryResult<Vec<MemberEntity>>;

    // case-insensitive substring match on first or last name
    async fn search_by_name(&self, name: &str) -> LibraryResult<Vec<MemberEntity>>;
}

pub(crate) fn name_matches(member: &MemberEntity, name: &str) -> bool {
    crate::core::repository::contains_ignore_case(&member.first_name, name)
        || crate::core::repository::contains_ignore_case(&member.last_name, name)
}
