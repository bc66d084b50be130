//! EndpointKey value object.

use super::errors::ValidationError;
use std::fmt;

/// Name of a REST resource collection, e.g. `"Course"` or `"Assessment"`.
///
/// Used both as the fetch cache key and as the GET path relative to the
/// API base URL.
///
/// # Example
///
/// ```
/// use edusync_client::domain::EndpointKey;
///
/// let key = EndpointKey::new("Course").unwrap();
/// assert_eq!(key.as_str(), "Course");
/// assert!(EndpointKey::new("").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EndpointKey(String);

impl EndpointKey {
    /// Create a new EndpointKey, validating that it's not blank.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyEndpointKey` if the key is empty or whitespace.
    pub fn new(key: impl Into<String>) -> Result<Self, ValidationError> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(ValidationError::EmptyEndpointKey);
        }
        Ok(Self(key))
    }

    /// Get the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the underlying String.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for EndpointKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for EndpointKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
