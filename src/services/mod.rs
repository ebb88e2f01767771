//! Application services layer - Use cases and business logic.
//!
//! Services sit between the HTTP handlers and the repositories and depend
//! on repository traits, not implementations.

mod user_service;

pub use user_service::{UserManager, UserService};
