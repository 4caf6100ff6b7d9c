pub mod service;

use async_trait::async_trait;
use crate::core::domain::Identifiable;
use crate::core::library::{LibraryResult, MemberTier};
use crate::patrons::dto::PatronDto;

// PatronService owns member records; guarding deletes against active loans is left to checkout
#[async_trait]
pub(crate) trait PatronService: Sync + Send {
    async fn add_patron(&self, patron: &PatronDto) -> LibraryResult<PatronDto>;
    async fn remove_patron(&self, id: &str) -> LibraryResult<()>;
    async fn update_patron(&self, patron: &PatronDto) -> LibraryResult<PatronDto>;
    async fn change_tier(&self, id: &str, tier: MemberTier) -> LibraryResult<PatronDto>;
    async fn find_patron_by_id(&self, id: &str) -> LibraryResult<PatronDto>;
    async fn find_patrons(&self) -> LibraryResult<Vec<PatronDto>>;
    async fn search_by_name(&self, name: &str) -> LibraryResult<Vec<PatronDto>>;
}

pub(crate) trait Patron: Identifiable {
    fn tier(&self) -> MemberTier;
    fn is_premium(&self) -> bool {
        self.tier() == MemberTier::Premium
    }
}
