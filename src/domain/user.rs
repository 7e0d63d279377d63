use serde::{Deserialize, Serialize};

use super::record::{default_true, RecordMeta};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    #[default]
    Staff,
}

/// An admin-panel account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub role: UserRole,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone)]
pub struct UserCreate {
    pub email: String,
    pub name: String,
    pub role: UserRole,
}

#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub email: Option<String>,
    pub name: Option<String>,
    pub role: Option<UserRole>,
    pub is_active: Option<bool>,
}
