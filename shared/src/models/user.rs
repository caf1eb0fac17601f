//! Admin user model

use crate::validation::{MAX_PASSWORD_LEN, MIN_PASSWORD_LEN, ValidationErrors};
use serde::{Deserialize, Serialize};

pub const MIN_USERNAME_LEN: usize = 3;
pub const MAX_USERNAME_LEN: usize = 50;

/// Admin user as exposed by the API (never carries the password hash)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct User {
    pub id: String,
    pub username: String,
}

/// Create user payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserCreate {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl UserCreate {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errs = ValidationErrors::new();
        let len = self.username.trim().chars().count();
        if !(MIN_USERNAME_LEN..=MAX_USERNAME_LEN).contains(&len) {
            errs.add(
                "username",
                format!(
                    "Username must be between {MIN_USERNAME_LEN} and {MAX_USERNAME_LEN} characters"
                ),
            );
        }
        let len = self.password.chars().count();
        if len < MIN_PASSWORD_LEN {
            errs.add(
                "password",
                format!("Password must be at least {MIN_PASSWORD_LEN} characters"),
            );
        } else if len > MAX_PASSWORD_LEN {
            errs.add(
                "password",
                format!("Password must be at most {MAX_PASSWORD_LEN} characters"),
            );
        }
        errs.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate() {
        let ok = UserCreate {
            username: "manager".into(),
            password: "correct horse".into(),
        };
        assert!(ok.validate().is_ok());

        let errs = UserCreate {
            username: "ab".into(),
            password: "short".into(),
        }
        .validate()
        .unwrap_err();
        assert!(errs.has_field("username"));
        assert!(errs.has_field("password"));
    }
}
