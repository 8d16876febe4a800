pub mod api;
pub mod chat;
pub mod config;
pub mod errors;
pub mod listing;
pub mod models;
pub mod routing;
pub mod session;
pub mod shell;
