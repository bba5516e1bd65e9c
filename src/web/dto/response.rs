//! Response DTOs for the Web API.

use serde::Serialize;

/// Login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Human-readable status message.
    pub message: String,
    /// The logged-in username.
    pub username: String,
}

/// Generic message response (e.g. for deletions).
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Human-readable status message.
    pub message: String,
}

impl MessageResponse {
    /// Create a new message response.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
