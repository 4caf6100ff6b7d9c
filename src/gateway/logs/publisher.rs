use async_trait::async_trait;
use crate::core::events::DomainEvent;
use crate::core::library::LibraryError;
use crate::gateway::events::EventPublisher;

// LogPublisher emits events as structured log lines, used with the in-memory store
#[derive(Debug, Default)]
pub struct LogPublisher {}

impl LogPublisher {
    pub(crate) fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl EventPublisher for LogPublisher {
    async fn publish(&self, event: &DomainEvent) -> Result<(), LibraryError> {
        tracing::info!(event_id = event.event_id.as_str(), name = event.name.as_str(),
            group = event.group.as_str(), key = event.key.as_str(), kind = ?event.kind,
            data = event.json_data.as_str(), "domain event");
        Ok(())
    }
}
