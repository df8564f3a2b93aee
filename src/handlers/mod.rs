pub mod accounts;
pub mod common;
pub mod health;

use std::sync::Arc;

use crate::config::AppConfig;
use crate::repositories::AccountRepository;

/// Shared application state handed to every request handler.
///
/// The store is constructed once at startup and injected here explicitly;
/// there is no hidden process-global instance.
#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn AccountRepository>,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(repository: Arc<dyn AccountRepository>, config: AppConfig) -> Self {
        Self { repository, config }
    }
}
