pub mod completion_client;
