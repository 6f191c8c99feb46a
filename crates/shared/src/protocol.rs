use serde::{Deserialize, Serialize};

use crate::domain::User;

/// Body of `POST <base>` and `PUT <base>/<id>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPayload {
    pub name: String,
    pub email: String,
}

impl UserPayload {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Body of `GET <base>`. The server encodes an empty collection as `null`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct UserListResponse(Option<Vec<User>>);

impl UserListResponse {
    pub fn into_users(self) -> Vec<User> {
        self.0.unwrap_or_default()
    }
}
