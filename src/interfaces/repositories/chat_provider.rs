use async_trait::async_trait;

use crate::{entities::message::ChatTurn, errors::AppError};

#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Sends the persona prompt plus prior turns and returns the assistant's text.
    ///
    /// An empty string is a valid answer; callers decide how to present it.
    async fn complete(&self, turns: &[ChatTurn]) -> Result<String, AppError>;
}
