pub mod alumni;
pub mod chat;
pub mod connections;
pub mod email;
pub mod feedback;
pub mod recommend;
pub mod students;
