use crate::core::domain::Configuration;
use crate::core::repository::RepositoryStore;
use crate::gateway::factory::create_publisher;
use crate::members::factory;
use crate::patrons::domain::PatronService;
use crate::patrons::domain::service::PatronServiceImpl;

pub(crate) async fn create_patron_service(config: &Configuration, store: RepositoryStore) -> Box<dyn PatronService> {
    let member_repo = factory::create_member_repository(store).await;
    let publisher = create_publisher(store).await;
    Box::new(PatronServiceImpl::new(config, member_repo, publisher))
}
