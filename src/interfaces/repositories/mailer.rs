use async_trait::async_trait;

use crate::{entities::email::OutgoingEmail, errors::AppError};

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), AppError>;
}
