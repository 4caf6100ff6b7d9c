use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::checkout::domain::CheckoutService;
use crate::core::command::{Command, CommandError};

// removal goes through checkout so members holding books are kept
pub(crate) struct RemovePatronCommand {
    checkout_service: Box<dyn CheckoutService>,
}

impl RemovePatronCommand {
    pub(crate) fn new(checkout_service: Box<dyn CheckoutService>) -> Self {
        Self {
            checkout_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RemovePatronCommandRequest {
    pub member_id: String,
}

impl RemovePatronCommandRequest {
    pub fn new(member_id: &str) -> Self {
        Self {
            member_id: member_id.to_string(),
        }
    }
}


#[derive(Debug, Serialize)]
pub(crate) struct RemovePatronCommandResponse {}

impl RemovePatronCommandResponse {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl Command<RemovePatronCommandRequest, RemovePatronCommandResponse> for RemovePatronCommand {
    async fn execute(&self, req: RemovePatronCommandRequest) -> Result<RemovePatronCommandResponse, CommandError> {
        self.checkout_service.delete_member(req.member_id.as_str())
            .await.map_err(CommandError::from).map(|_| RemovePatronCommandResponse::new())
    }
}
