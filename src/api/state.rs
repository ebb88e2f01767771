//! Application state - Dependency injection container.

use std::sync::Arc;

use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::{InMemoryUserStore, UserRepository};
use crate::services::{UserManager, UserService};

/// Application state shared by every handler.
#[derive(Clone)]
pub struct AppState {
    /// User service
    pub user_service: Arc<dyn UserService>,
}

impl AppState {
    /// Build the store selected by configuration and wire the services on top.
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let store = Arc::new(InMemoryUserStore::from_config(config)?);
        Ok(Self::from_repository(store))
    }

    /// Wire the services over an existing repository.
    pub fn from_repository(repo: Arc<dyn UserRepository>) -> Self {
        Self::new(Arc::new(UserManager::new(repo)))
    }

    /// Create application state with a manually injected service.
    pub fn new(user_service: Arc<dyn UserService>) -> Self {
        Self { user_service }
    }
}
