use crate::domain::UserId;

/// Account view handed to the game when a user takes a seat.
///
/// Accounts live outside the game core; only the id and login are needed,
/// and the login is copied into the [`Player`](crate::domain::Player) record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub login: String,
}

impl User {
    pub fn new(id: UserId, login: impl Into<String>) -> Self {
        Self {
            id,
            login: login.into(),
        }
    }
}
