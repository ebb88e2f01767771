//! Domain layer - Core business entities and logic
//!
//! The user entity, its credential and identifier value objects, and the
//! pluggable strategies (id generation, credential hashing) the store is
//! built with.

pub mod id;
pub mod password;
pub mod user;

pub use id::{id_generator_for, IdGenerator, SequentialIdGenerator, UserId, UuidIdGenerator};
pub use password::{Argon2Hasher, CredentialHasher, Password};
pub use user::{normalize_email, User, UserInput, UserResponse, UserType};
