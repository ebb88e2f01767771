//! Response envelopes shared by the handlers.

mod response;

pub use response::{HealthResponse, UserListResponse};
