//! Password rules shared by registration and password reset.

use super::errors::ValidationError;

/// Minimum number of characters accepted for a new password.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// A new password that passed length and confirmation checks.
///
/// Not `Display`; `Debug` redacts the value.
#[derive(Clone, PartialEq, Eq)]
pub struct NewPassword(String);

impl NewPassword {
    /// Validate a password against its confirmation.
    ///
    /// Length is counted in characters, not bytes. The length rule is checked
    /// before the confirmation rule.
    pub fn new(password: &str, confirmation: &str) -> Result<Self, ValidationError> {
        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(ValidationError::PasswordTooShort {
                min: MIN_PASSWORD_LENGTH,
            });
        }
        if password != confirmation {
            return Err(ValidationError::PasswordMismatch);
        }
        Ok(Self(password.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Debug for NewPassword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("NewPassword(***)")
    }
}
