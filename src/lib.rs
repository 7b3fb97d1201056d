//! Shelfmark catalog server
//!
//! Web catalog for a local library: books, their authors and genres, and the
//! physical copies (book instances) on the shelves. Pages are served as JSON
//! views for an external template layer.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
