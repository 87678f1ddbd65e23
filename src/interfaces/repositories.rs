pub mod alumni;
pub mod chat_provider;
pub mod connection;
pub mod feedback;
pub mod mailer;
pub mod message;
pub mod sqlx_repo;
pub mod student;
