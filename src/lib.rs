//! User Service - user management over HTTP
//!
//! Create, read, update and delete user accounts held in an in-memory
//! store. Email addresses are unique among live users, including under
//! concurrent requests.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: User entity, identifiers and credentials
//! - **services**: Application use cases
//! - **infra**: The user store
//! - **api**: HTTP handlers, middleware, and routes
//! - **types**: Shared response envelopes
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server (serve is the default)
//! cargo run
//!
//! # Bind somewhere else
//! cargo run -- serve --host 127.0.0.1 --port 9000
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::{create_router, AppState};
pub use config::Config;
pub use domain::{User, UserId, UserInput, UserType};
pub use errors::{AppError, AppResult};
pub use infra::{InMemoryUserStore, UserRepository};
