//! Application-wide constants
//!
//! Centralized location for magic values to improve maintainability.

// =============================================================================
// Service identity
// =============================================================================

/// Service name reported by the health endpoint
pub const SERVICE_NAME: &str = "user-service";

/// Service version reported by the health endpoint
pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prefix shared by every versioned route
pub const API_PREFIX: &str = "/api/v1";

// =============================================================================
// Server Configuration
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8001;

/// Default per-request timeout in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;

// =============================================================================
// User types
// =============================================================================

/// Seller role tag
pub const USER_TYPE_SELLER: &str = "seller";

/// Buyer role tag
pub const USER_TYPE_BUYER: &str = "buyer";

// =============================================================================
// Identifiers
// =============================================================================

/// Monotonic counter identifiers
pub const ID_STRATEGY_SEQUENTIAL: &str = "sequential";

/// Prefix for counter-based identifiers
pub const SEQUENTIAL_ID_PREFIX: &str = "user_";

// =============================================================================
// Validation
// =============================================================================

/// Minimum password length requirement
pub const MIN_PASSWORD_LENGTH: u64 = 6;

// =============================================================================
// Logging
// =============================================================================

/// Default tracing filter when RUST_LOG is unset
pub const DEFAULT_LOG_FILTER: &str = "info";

/// LOG_FORMAT value selecting JSON output
pub const LOG_FORMAT_JSON: &str = "json";
