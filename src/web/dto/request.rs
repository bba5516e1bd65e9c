//! Request DTOs for the Web API.

use serde::Deserialize;

/// Login request.
///
/// Identification only: the username is the whole credential.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Username.
    pub username: String,
}
