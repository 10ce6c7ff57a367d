pub mod collectors;
pub mod config;
pub mod db;
pub mod error;
pub mod loader;
pub mod models;
pub mod reports;
pub mod shell;
