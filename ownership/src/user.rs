use serde::{Deserialize, Serialize};

/// Id of the sentinel user standing for anonymous or system actions.
pub const UNKNOWN_USER_ID: &str = "unknown";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct User {
    pub id: String,
}

impl User {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    pub fn unknown() -> Self {
        Self::new(UNKNOWN_USER_ID)
    }
}

/// Lookup of the user acting on the current request.
pub trait UserDirectory {
    /// The authenticated user, if any.
    fn current_user(&self) -> Option<User>;

    fn unknown_user(&self) -> User {
        User::unknown()
    }

    fn is_unknown(&self, user: &User) -> bool {
        user.id == self.unknown_user().id
    }
}

/// A directory whose acting user is fixed for the lifetime of one request.
#[derive(Debug, Clone)]
pub struct StaticUserDirectory {
    current: Option<User>,
    unknown: User,
}

impl StaticUserDirectory {
    pub fn new(current: Option<User>) -> Self {
        Self {
            current,
            unknown: User::unknown(),
        }
    }

    pub fn anonymous() -> Self {
        Self::new(None)
    }

    pub fn acting_as(id: impl Into<String>) -> Self {
        Self::new(Some(User::new(id)))
    }

    /// Override the sentinel id, for hosts that name their anonymous user differently.
    pub fn with_unknown_id(mut self, id: impl Into<String>) -> Self {
        self.unknown = User::new(id);
        self
    }
}

impl UserDirectory for StaticUserDirectory {
    fn current_user(&self) -> Option<User> {
        self.current.clone()
    }

    fn unknown_user(&self) -> User {
        self.unknown.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_sentinel_is_recognised() {
        let dir = StaticUserDirectory::acting_as("anonymous").with_unknown_id("anonymous");
        let user = dir.current_user().unwrap();
        assert!(dir.is_unknown(&user));
        assert!(!dir.is_unknown(&User::unknown()));
    }
}
