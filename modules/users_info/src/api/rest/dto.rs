use serde::{Deserialize, Serialize};

use crate::contract::User;

/// REST DTO for user representation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDto {
    pub id: i32,
    pub name: String,
    pub email: String,
}

/// Body of `POST /users`. Fields are optional here so that missing values
/// are reported by validation instead of the JSON extractor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateUserReq {
    #[serde(default)]
    pub id: Option<i32>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Body of `PATCH /users/{id}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PatchUserReq {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}
