use std::collections::HashMap;
use async_trait::async_trait;
use crate::core::domain::Configuration;
use crate::core::events::DomainEvent;
use crate::core::library::{LibraryError, LibraryResult, MemberTier};
use crate::gateway::events::EventPublisher;
use crate::members::domain::model::MemberEntity;
use crate::members::repository::MemberRepository;
use crate::patrons::domain::PatronService;
use crate::patrons::dto::PatronDto;

pub(crate) struct PatronServiceImpl {
    branch_id: String,
    member_repository: Box<dyn MemberRepository>,
    events_publisher: Box<dyn EventPublisher>,
}

impl PatronServiceImpl {
    pub(crate) fn new(config: &Configuration, member_repository: Box<dyn MemberRepository>,
                      events_publisher: Box<dyn EventPublisher>) -> Self {
        PatronServiceImpl {
            branch_id: config.branch_id.to_string(),
            member_repository,
            events_publisher,
        }
    }

    fn metadata(&self) -> HashMap<String, String> {
        HashMap::from([("branch_id".to_string(), self.branch_id.to_string())])
    }

    async fn get_entity(&self, id: &str) -> LibraryResult<MemberEntity> {
        self.member_repository.get(id).await
            .map_err(|e| if e.is_not_found() { LibraryError::member_not_found(id) } else { e })
    }
}

fn validate_patron(patron: &PatronDto) -> LibraryResult<()> {
    if patron.member_id.trim().is_empty() {
        return Err(LibraryError::validation("member id is required", Some("400".to_string())));
    }
    if patron.first_name.trim().is_empty() && patron.last_name.trim().is_empty() {
        return Err(LibraryError::validation(
            format!("name is required for member {}", patron.member_id).as_str(), Some("400".to_string())));
    }
    Ok(())
}

#[async_trait]
impl PatronService for PatronServiceImpl {
    async fn add_patron(&self, patron: &PatronDto) -> LibraryResult<PatronDto> {
        validate_patron(patron)?;
        let mut added = patron.clone();
        added.version = 0;
        self.member_repository.create(&MemberEntity::from(&added)).await?;
        tracing::info!(member_id = added.member_id.as_str(), "member added");
        self.events_publisher.publish(&DomainEvent::added(
            "member_added", "members", added.member_id.as_str(), &self.metadata(), &added)?).await?;
        Ok(added)
    }

    async fn remove_patron(&self, id: &str) -> LibraryResult<()> {
        self.member_repository.delete(id).await
            .map_err(|e| if e.is_not_found() { LibraryError::member_not_found(id) } else { e })?;
        tracing::info!(member_id = id, "member removed");
        let data = id.to_string();
        self.events_publisher.publish(&DomainEvent::deleted(
            "member_deleted", "members", id, &self.metadata(), &data)?).await
    }

    async fn update_patron(&self, patron: &PatronDto) -> LibraryResult<PatronDto> {
        validate_patron(patron)?;
        let existing = self.get_entity(patron.member_id.as_str()).await?;
        // tier only moves through change_tier
        let mut next = MemberEntity::from(patron);
        next.version = existing.version;
        next.tier = existing.tier;
        next.created_at = existing.created_at;
        self.member_repository.update(&next).await?;
        let updated = self.find_patron_by_id(patron.member_id.as_str()).await?;
        tracing::info!(member_id = updated.member_id.as_str(), "member updated");
        self.events_publisher.publish(&DomainEvent::updated(
            "member_updated", "members", updated.member_id.as_str(), &self.metadata(), &updated)?).await?;
        Ok(updated)
    }

    async fn change_tier(&self, id: &str, tier: MemberTier) -> LibraryResult<PatronDto> {
        let mut member = self.get_entity(id).await?;
        let previous = member.tier;
        member.tier = tier;
        self.member_repository.update(&member).await?;
        let patron = self.find_patron_by_id(id).await?;
        tracing::info!(member_id = id, from = %previous, to = %tier, "member tier changed");
        self.events_publisher.publish(&DomainEvent::updated(
            "member_tier_changed", "members", id, &self.metadata(), &patron)?).await?;
        Ok(patron)
    }

    async fn find_patron_by_id(&self, id: &str) -> LibraryResult<PatronDto> {
        self.get_entity(id).await.map(|m| PatronDto::from(&m))
    }

    async fn find_patrons(&self) -> LibraryResult<Vec<PatronDto>> {
        Ok(self.member_repository.find_all().await?.iter().map(PatronDto::from).collect())
    }

    async fn search_by_name(&self, name: &str) -> LibraryResult<Vec<PatronDto>> {
        Ok(self.member_repository.search_by_name(name).await?.iter().map(PatronDto::from).collect())
    }
}

impl From<&MemberEntity> for PatronDto {
    fn from(other: &MemberEntity) -> Self {
        Self {
            member_id: other.member_id.to_string(),
            version: other.version,
            first_name: other.first_name.to_string(),
            last_name: other.last_name.to_string(),
            birth_date: other.birth_date,
            tier: other.tier,
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}

impl From<&PatronDto> for MemberEntity {
    fn from(other: &PatronDto) -> Self {
        Self {
            member_id: other.member_id.to_string(),
            version: other.version,
            first_name: other.first_name.to_string(),
            last_name: other.last_name.to_string(),
            birth_date: other.birth_date,
            tier: other.tier,
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}
