pub mod api;
pub mod app;
pub mod common;
pub mod config;
pub mod conversation;
pub mod event;
pub mod forms;
pub mod logging;
pub mod pages;
pub mod roles;
pub mod session;
pub mod tui;
pub mod ui;
