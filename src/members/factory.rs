use std::sync::Arc;
use lazy_static::lazy_static;
use crate::core::memory::MemoryTable;
use crate::core::repository::RepositoryStore;
use crate::members::domain::model::MemberEntity;
use crate::members::repository::MemberRepository;
use crate::members::repository::ddb_member_repository::DDBMemberRepository;
use crate::members::repository::mem_member_repository::MemMemberRepository;
use crate::utils::ddb::{build_db_client, create_key_table};

lazy_static! {
    static ref MEMBERS: Arc<MemoryTable<MemberEntity>> = Arc::new(MemoryTable::new("members"));
}

pub(crate) async fn create_member_repository(store: RepositoryStore) -> Box<dyn MemberRepository> {
    match store {
        RepositoryStore::DynamoDB => {
            let client = build_db_client(store).await;
            Box::new(DDBMemberRepository::new(client, "members"))
        }
        RepositoryStore::LocalDynamoDB => {
            let client = build_db_client(store).await;
            let _ = create_key_table(&client, "members", "member_id").await;
            Box::new(DDBMemberRepository::new(client, "members"))
        }
        RepositoryStore::InMemory => {
            Box::new(MemMemberRepository::with_table(MEMBERS.clone()))
        }
    }
}
