/// A stored user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
}

/// Data for creating a user. `id` is assigned by the database when absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub id: Option<i32>,
    pub name: String,
    pub email: String,
}

/// Partial update: present fields are applied, absent ones are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl From<User> for NewUser {
    fn from(u: User) -> Self {
        Self {
            id: Some(u.id),
            name: u.name,
            email: u.email,
        }
    }
}
