//! User roles.

use super::errors::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The two kinds of accounts on the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Student,
    Instructor,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "Student",
            Role::Instructor => "Instructor",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Student" => Ok(Role::Student),
            "Instructor" => Ok(Role::Instructor),
            other => Err(ValidationError::UnknownRole(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serde() {
        assert_eq!(serde_json::to_string(&Role::Student).unwrap(), "\"Student\"");
        let role: Role = serde_json::from_str("\"Instructor\"").unwrap();
        assert_eq!(role, Role::Instructor);
    }

    #[test]
    fn test_role_from_str() {
        assert_eq!("Student".parse::<Role>(), Ok(Role::Student));
        assert_eq!(
            "Admin".parse::<Role>(),
            Err(ValidationError::UnknownRole("Admin".to_string()))
        );
    }
}
