//! Contact model for address expansion.

use crate::directory::DirectoryMatch;

/// An address-book entry.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Contact {
    /// Email address (unique identifier).
    pub email: String,
    /// Display name (may be empty).
    pub name: String,
    /// Number of times this contact has been used.
    pub use_count: u32,
}

impl Contact {
    /// Creates a new contact.
    #[must_use]
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
            use_count: 1,
        }
    }

    /// Returns a display string for the contact.
    ///
    /// If a name is present, returns "Name <email>", otherwise just "email".
    #[must_use]
    pub fn display(&self) -> String {
        if self.name.is_empty() {
            self.email.clone()
        } else {
            format!("{} <{}>", self.name, self.email)
        }
    }

    /// Checks if the email or name contains `query` (case-insensitive).
    #[must_use]
    pub fn matches(&self, query: &str) -> bool {
        let query_lower = query.trim().to_lowercase();
        self.email.to_lowercase().contains(&query_lower)
            || self.name.to_lowercase().contains(&query_lower)
    }

    /// Converts to a directory match. Returns `None` for malformed emails.
    #[must_use]
    pub fn to_match(&self) -> Option<DirectoryMatch> {
        DirectoryMatch::from_email(&self.email, &self.name)
    }
}
