//! User account entity.

/// A registered account able to log in.
///
/// Accounts are seeded out of band through the `admin` binary and are never
/// mutated by the HTTP surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub is_admin: bool,
}

impl User {
    /// Creates a new User instance.
    pub fn new(id: i64, username: String, password_hash: String, is_admin: bool) -> Self {
        Self {
            id,
            username,
            password_hash,
            is_admin,
        }
    }
}

/// Input data for seeding a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub is_admin: bool,
}
