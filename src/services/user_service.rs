//! User service - Application use cases over the user store.
//!
//! Reads go straight to the repository. Create and update derive a
//! credential, which is CPU-bound, so they run on the blocking pool.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{User, UserId, UserInput};
use crate::errors::{AppError, AppResult};
use crate::infra::UserRepository;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Create a new user
    async fn create_user(&self, input: UserInput) -> AppResult<User>;

    /// Get user by ID
    async fn get_user(&self, id: UserId) -> AppResult<User>;

    /// Get user by email address
    async fn get_user_by_email(&self, email: String) -> AppResult<User>;

    /// Update user details; an empty password keeps the current one
    async fn update_user(&self, id: UserId, input: UserInput) -> AppResult<User>;

    /// Delete user permanently
    async fn delete_user(&self, id: UserId) -> AppResult<()>;

    /// List all users
    async fn list_users(&self) -> AppResult<Vec<User>>;
}

/// Concrete implementation of UserService over a repository.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
}

impl UserManager {
    /// Create new user service instance
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    async fn blocking<T, F>(&self, f: F) -> AppResult<T>
    where
        F: FnOnce(&dyn UserRepository) -> AppResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let repo = self.repo.clone();
        tokio::task::spawn_blocking(move || f(repo.as_ref()))
            .await
            .map_err(|e| AppError::internal(format!("User store task failed: {}", e)))?
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn create_user(&self, input: UserInput) -> AppResult<User> {
        self.blocking(move |repo| repo.create(input)).await
    }

    async fn get_user(&self, id: UserId) -> AppResult<User> {
        self.repo.find_by_id(&id)
    }

    async fn get_user_by_email(&self, email: String) -> AppResult<User> {
        self.repo.find_by_email(&email)
    }

    async fn update_user(&self, id: UserId, input: UserInput) -> AppResult<User> {
        self.blocking(move |repo| repo.update(&id, input)).await
    }

    async fn delete_user(&self, id: UserId) -> AppResult<()> {
        self.repo.delete(&id)
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        self.repo.list()
    }
}
