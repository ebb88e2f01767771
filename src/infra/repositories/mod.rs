//! Repository layer - Data access abstraction
//!
//! Repositories own the stored records and expose them through traits,
//! keeping the service and HTTP layers independent of the storage choice.

mod user_repository;

pub use user_repository::{InMemoryUserStore, UserRepository};

#[cfg(test)]
pub use user_repository::MockUserRepository;
