pub mod events;
pub mod factory;
pub mod ddb {
    pub mod publisher;
}
pub mod logs {
    pub mod publisher;
}
pub mod memory {
    pub mod publisher;
}
