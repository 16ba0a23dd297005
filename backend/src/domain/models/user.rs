use serde::{Deserialize, Serialize};
use shared::Role;

/// Label used for attribution when the signed-in user has no display name
pub const FALLBACK_DISPLAY_NAME: &str = "Admin";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: String,
    pub display_name: Option<String>,
    pub email: String,
    pub role: Role,
}

impl User {
    pub fn attribution_name(&self) -> &str {
        match self.display_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name,
            _ => FALLBACK_DISPLAY_NAME,
        }
    }
}

/// A stored login. Roles outside the known set fail to deserialize, so
/// an account file with a bad role is rejected when it is loaded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserAccount {
    pub user: User,
    pub password: String,
}

impl UserAccount {
    pub fn matches(&self, email: &str, password: &str) -> bool {
        self.user.email.eq_ignore_ascii_case(email.trim()) && self.password == password
    }
}
