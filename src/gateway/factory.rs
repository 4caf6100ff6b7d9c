use crate::core::repository::RepositoryStore;
use crate::gateway::ddb::publisher::DDBPublisher;
use crate::gateway::events::EventPublisher;
use crate::gateway::logs::publisher::LogPublisher;
use crate::utils::ddb::{build_db_client, create_key_table};

pub(crate) async fn create_publisher(store: RepositoryStore) -> Box<dyn EventPublisher> {
    match store {
        RepositoryStore::DynamoDB => {
            let client = build_db_client(store).await;
            Box::new(DDBPublisher::new(client, "events"))
        }
        RepositoryStore::LocalDynamoDB => {
            let client = build_db_client(store).await;
            let _ = create_key_table(&client, "events", "event_id").await;
            Box::new(DDBPublisher::new(client, "events"))
        }
        RepositoryStore::InMemory => {
            Box::new(LogPublisher::new())
        }
    }
}
