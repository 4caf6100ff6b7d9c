use crate::core::domain::Identifiable;

pub mod model;

pub(crate) trait Book: Identifiable {
    fn total_quantity(&self) -> i64;
    fn is_available(&self) -> bool;
}
