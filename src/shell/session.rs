//! Shell session
//!
//! Holds the current user for one shell. The user is passed explicitly to
//! every store operation.

#[derive(Debug, Default)]
pub struct Session {
    user: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current user if one is selected.
    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn set_user(&mut self, user: String) {
        self.user = Some(user);
    }

    /// Clears the current user, returning whether one was set.
    pub fn logout(&mut self) -> bool {
        self.user.take().is_some()
    }
}
