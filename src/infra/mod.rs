//! Infrastructure layer - Storage backing the services.

pub mod repositories;

pub use repositories::{InMemoryUserStore, UserRepository};

#[cfg(test)]
pub use repositories::MockUserRepository;
