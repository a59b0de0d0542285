//! User model for storage and API.

use serde::{Deserialize, Serialize};

/// User profile stored in the `Users` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Document ID
    pub id: String,
    pub name: String,
    pub email: String,
    pub city: String,
    /// Identity from the external auth provider
    pub auth_user_id: String,
}

/// Request body for creating a user.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub city: String,
    pub auth_user_id: String,
}

impl NewUser {
    pub fn into_user(self, id: String) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
            city: self.city,
            auth_user_id: self.auth_user_id,
        }
    }
}
