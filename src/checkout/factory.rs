use std::sync::Arc;
use lazy_static::lazy_static;
use crate::catalog::factory::create_catalog_service;
use crate::checkout::domain::CheckoutService;
use crate::checkout::domain::service::CheckoutServiceImpl;
use crate::checkout::locks::BookLocks;
use crate::core::domain::Configuration;
use crate::core::repository::RepositoryStore;
use crate::gateway::factory::create_publisher;
use crate::loans::factory::create_loan_repository;
use crate::patrons::factory::create_patron_service;
use crate::utils::date::SystemClock;

lazy_static! {
    // one lock per isbn for the whole process, services are built per request
    static ref BOOK_LOCKS: Arc<BookLocks> = Arc::new(BookLocks::new());
}

pub(crate) async fn create_checkout_service(config: &Configuration, store: RepositoryStore) -> Box<dyn CheckoutService> {
    let loan_repo = create_loan_repository(store).await;
    let catalog_svc = create_catalog_service(config, store).await;
    let patron_svc = create_patron_service(config, store).await;
    let publisher = create_publisher(store).await;
    Box::new(CheckoutServiceImpl::new(config, loan_repo, patron_svc, catalog_svc,
                                      publisher, Box::new(SystemClock), BOOK_LOCKS.clone()))
}
