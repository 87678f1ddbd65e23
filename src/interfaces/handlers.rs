pub mod alumni;
pub mod chat;
pub mod connections;
pub mod email;
pub mod feedback;
pub mod home;
pub mod recommend;
pub mod students;
pub mod system;
