/// User domain types
use super::null_as_default;
use crate::error::{require, Result, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimum length of a new password
pub const MIN_PASSWORD_LEN: usize = 6;

/// Account role
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// Regular listener
    #[default]
    User,
    /// Catalog administrator
    Admin,
}

impl Role {
    /// Interpret the plain-text role returned by the login endpoint.
    ///
    /// Anything other than `ADMIN` is a regular user.
    pub fn from_login_text(text: &str) -> Self {
        let text = text.trim().trim_matches('"');
        if text.eq_ignore_ascii_case("ADMIN") {
            Self::Admin
        } else {
            Self::User
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => write!(f, "USER"),
            Self::Admin => write!(f, "ADMIN"),
        }
    }
}

/// User profile, keyed by username
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique username
    pub username: String,

    /// Full name
    #[serde(default, deserialize_with = "null_as_default")]
    pub fullname: String,

    /// Email address
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,

    /// Phone number
    #[serde(default, deserialize_with = "null_as_default")]
    pub phonenumber: String,

    /// Role; the profile endpoint may omit it
    #[serde(default, deserialize_with = "null_as_default")]
    pub role: Role,
}

impl User {
    /// Whether the user may use the admin screens
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Request body for account registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Registration {
    /// Username
    pub username: String,
    /// Password
    pub password: String,
    /// Full name
    pub fullname: String,
    /// Email
    pub email: String,
    /// Phone number
    pub phonenumber: String,
}

impl Registration {
    /// Check required fields
    pub fn validate(&self) -> Result<()> {
        require("username", &self.username)?;
        require("password", &self.password)?;
        require("full name", &self.fullname)?;
        require("email", &self.email)
    }
}

/// Request body for a user editing their own profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileUpdate {
    /// Full name
    pub fullname: String,
    /// Email
    pub email: String,
    /// Phone number
    pub phonenumber: String,
}

/// Request body for an admin editing another user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserUpdate {
    /// Full name
    pub fullname: String,
    /// Email
    pub email: String,
    /// Role
    pub role: Role,
}

/// Request body for changing a password
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PasswordChange {
    /// Current password
    #[serde(rename = "oldPassword")]
    pub old_password: String,
    /// Replacement password
    #[serde(rename = "newPassword")]
    pub new_password: String,
}

impl PasswordChange {
    /// Build a password change, checking the confirmation locally
    pub fn new(old_password: &str, new_password: &str, confirmation: &str) -> Result<Self> {
        require("old password", old_password)?;
        if new_password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ValidationError::PasswordTooShort {
                min: MIN_PASSWORD_LEN,
            });
        }
        if new_password != confirmation {
            return Err(ValidationError::PasswordMismatch);
        }
        Ok(Self {
            old_password: old_password.to_string(),
            new_password: new_password.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_from_login_text() {
        assert_eq!(Role::from_login_text("ADMIN"), Role::Admin);
        assert_eq!(Role::from_login_text("\"ADMIN\"\n"), Role::Admin);
        assert_eq!(Role::from_login_text("USER"), Role::User);
        assert_eq!(Role::from_login_text("something"), Role::User);
    }

    #[test]
    fn user_without_role_defaults_to_user() {
        let user: User = serde_json::from_value(serde_json::json!({
            "username": "an",
            "fullname": "Nguyễn An",
            "email": "an@example.com",
            "phonenumber": null
        }))
        .unwrap();
        assert_eq!(user.role, Role::User);
        assert_eq!(user.phonenumber, "");
        assert!(!user.is_admin());
    }

    #[test]
    fn role_serializes_uppercase() {
        assert_eq!(serde_json::to_value(Role::Admin).unwrap(), "ADMIN");
    }

    #[test]
    fn password_change_rules() {
        assert_eq!(
            PasswordChange::new("", "secret1", "secret1"),
            Err(ValidationError::MissingField("old password"))
        );
        assert_eq!(
            PasswordChange::new("old", "12345", "12345"),
            Err(ValidationError::PasswordTooShort { min: 6 })
        );
        assert_eq!(
            PasswordChange::new("old", "123456", "123457"),
            Err(ValidationError::PasswordMismatch)
        );
        let change = PasswordChange::new("old", "mật khẩu", "mật khẩu").unwrap();
        let json = serde_json::to_value(&change).unwrap();
        assert_eq!(json["oldPassword"], "old");
        assert_eq!(json["newPassword"], "mật khẩu");
    }

    #[test]
    fn registration_requires_core_fields() {
        let mut registration = Registration {
            username: "an".into(),
            password: "secret".into(),
            fullname: "An".into(),
            email: String::new(),
            phonenumber: String::new(),
        };
        assert_eq!(registration.validate(), Err(ValidationError::MissingField("email")));
        registration.email = "an@example.com".into();
        assert!(registration.validate().is_ok());
    }
}
