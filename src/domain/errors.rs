//! Domain validation errors.

use std::fmt;

/// Errors raised when user input fails validation before it is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The endpoint key is empty.
    EmptyEndpointKey,

    /// A required field was left blank.
    EmptyField(&'static str),

    /// The provided email address is invalid.
    InvalidEmail(String),

    /// The password is shorter than the minimum length.
    PasswordTooShort { min: usize },

    /// Password and confirmation differ.
    PasswordMismatch,

    /// The role is neither Student nor Instructor.
    UnknownRole(String),

    /// An assessment question is incomplete or inconsistent.
    InvalidQuestion { index: usize, reason: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEndpointKey => write!(f, "Endpoint key cannot be empty"),
            Self::EmptyField(field) => write!(f, "{} is required", field),
            Self::InvalidEmail(email) => write!(f, "Invalid email address: {}", email),
            Self::PasswordTooShort { min } => {
                write!(f, "Password must be at least {} characters long", min)
            }
            Self::PasswordMismatch => write!(f, "Passwords do not match"),
            Self::UnknownRole(role) => write!(f, "Unknown role: {}", role),
            Self::InvalidQuestion { index, reason } => {
                write!(f, "Question {}: {}", index + 1, reason)
            }
        }
    }
}

impl std::error::Error for ValidationError {}
