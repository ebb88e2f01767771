use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::UserResponse;

/// List envelope returned by `GET /users`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserListResponse {
    pub users: Vec<UserResponse>,
    pub count: usize,
}

impl UserListResponse {
    pub fn new(users: Vec<UserResponse>) -> Self {
        let count = users.len();
        Self { users, count }
    }
}

/// Health probe body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "healthy")]
    pub status: String,
    #[schema(example = "user-service")]
    pub service: String,
    #[schema(example = "0.1.0")]
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_count_matches_users() {
        let empty = UserListResponse::new(vec![]);
        assert_eq!(empty.count, 0);

        let json = serde_json::to_value(&empty).unwrap();
        assert_eq!(json, serde_json::json!({ "users": [], "count": 0 }));
    }
}
