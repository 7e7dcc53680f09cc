use serde::Serialize;
use std::fmt;

/// Which side of the marketplace an account trades on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Vendor,
    Supplier,
}

impl Role {
    /// What the profile form calls the business name.
    pub fn business_noun(self) -> &'static str {
        match self {
            Role::Vendor => "stall name",
            Role::Supplier => "business name",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Vendor => f.write_str("vendor"),
            Role::Supplier => f.write_str("supplier"),
        }
    }
}

/// Represents a registered user in the system.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub business_name: String,
    pub location: String,
    pub role: Role,
    pub avatar: Option<String>,
}

/// Payload for creating a new user.
#[derive(Debug, Clone)]
pub struct UserCreate {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub business_name: String,
    pub location: String,
    pub role: Role,
}

/// Payload for updating an existing user.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub business_name: Option<String>,
    pub location: Option<String>,
    pub avatar: Option<String>,
}
