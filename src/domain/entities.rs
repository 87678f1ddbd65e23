pub mod alumni;
pub mod connection;
pub mod email;
pub mod feedback;
pub mod message;
pub mod recommendation;
pub mod student;
