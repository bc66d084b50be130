//! Domain value objects and types.
//!
//! Type-safe wrappers for endpoint keys, email addresses, passwords and roles.
//! They validate at construction time so malformed input is rejected before
//! any request reaches the backend.

pub mod email;
pub mod endpoint_key;
pub mod errors;
pub mod password;
pub mod role;

pub use email::EmailAddress;
pub use endpoint_key::EndpointKey;
pub use errors::ValidationError;
pub use password::{NewPassword, MIN_PASSWORD_LENGTH};
pub use role::Role;
