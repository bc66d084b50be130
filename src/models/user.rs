//! Session and account payloads for the auth endpoints.

use crate::domain::Role;
use serde::{Deserialize, Serialize};

/// What the backend returns on a successful login.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    /// Bearer token for subsequent requests
    pub token: String,

    #[serde(deserialize_with = "super::deserialize_id")]
    pub user_id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub email: String,

    pub role: Role,
}

impl AuthSession {
    pub fn is_instructor(&self) -> bool {
        self.role == Role::Instructor
    }

    pub fn is_student(&self) -> bool {
        self.role == Role::Student
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub email: String,
    pub token: String,
    pub new_password: String,
}
