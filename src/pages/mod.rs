pub mod admin;
pub mod agent;
pub mod chat;
pub mod client_home;
pub mod popups;
pub mod welcome;
