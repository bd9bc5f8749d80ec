//! Directory lookup used to resolve partially typed addresses.

use std::future::Future;

use mailcompose_address::ParsedAddress;

use crate::Result;
use crate::contacts::Contact;

/// A candidate address returned by a directory search.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DirectoryMatch {
    /// Local part.
    pub mailbox: String,
    /// Domain part.
    pub host: String,
    /// Display name (may be empty).
    pub personal: String,
}

impl DirectoryMatch {
    /// Creates a match without a display name.
    #[must_use]
    pub fn new(mailbox: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            mailbox: mailbox.into(),
            host: host.into(),
            personal: String::new(),
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_personal(mut self, personal: impl Into<String>) -> Self {
        self.personal = personal.into();
        self
    }

    /// Splits `user@host` into a match. Returns `None` without a usable `@`.
    #[must_use]
    pub fn from_email(email: &str, personal: &str) -> Option<Self> {
        let (mailbox, host) = email.trim().rsplit_once('@')?;
        if mailbox.is_empty() || host.is_empty() {
            return None;
        }
        Some(Self::new(mailbox, host).with_personal(personal.trim()))
    }

    /// Converts into an address list entry.
    #[must_use]
    pub fn to_address(&self) -> ParsedAddress {
        ParsedAddress::new(&self.mailbox, &self.host).with_personal(&self.personal)
    }
}

impl std::fmt::Display for DirectoryMatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_address())
    }
}

/// Address-book search keyed by a partial mailbox string.
pub trait DirectoryLookup {
    /// Returns every entry matching `fragment`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::DirectoryUnavailable`] if the backend cannot
    /// be queried.
    fn search(&self, fragment: &str) -> impl Future<Output = Result<Vec<DirectoryMatch>>> + Send;
}

impl<T: DirectoryLookup + Sync> DirectoryLookup for &T {
    fn search(&self, fragment: &str) -> impl Future<Output = Result<Vec<DirectoryMatch>>> + Send {
        (**self).search(fragment)
    }
}

/// Directory over an in-memory contact list.
#[derive(Debug, Clone, Default)]
pub struct MemoryDirectory {
    contacts: Vec<Contact>,
}

impl MemoryDirectory {
    /// Creates a directory over `contacts`.
    #[must_use]
    pub const fn new(contacts: Vec<Contact>) -> Self {
        Self { contacts }
    }
}

impl FromIterator<Contact> for MemoryDirectory {
    fn from_iter<I: IntoIterator<Item = Contact>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl DirectoryLookup for MemoryDirectory {
    async fn search(&self, fragment: &str) -> Result<Vec<DirectoryMatch>> {
        Ok(self
            .contacts
            .iter()
            .filter(|contact| contact.matches(fragment))
            .filter_map(Contact::to_match)
            .collect())
    }
}
