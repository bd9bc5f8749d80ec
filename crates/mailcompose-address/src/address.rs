//! A single parsed address.

use std::fmt;

/// RFC 5322 specials that force a phrase or local part into quotes.
const SPECIALS: &[char] = &['(', ')', '<', '>', '[', ']', ':', ';', '@', '\\', ',', '.', '"'];

/// Characters that end or restructure a bare fragment when reparsed.
const FRAGMENT_SPECIALS: &[char] = &['(', ')', '<', '>', ';', '@', '\\', ',', '"'];

/// One entry of an address list.
///
/// An entry with both a mailbox and a host is a complete address.
/// Anything else is a fragment the user is still typing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParsedAddress {
    mailbox: Option<String>,
    host: Option<String>,
    personal: Option<String>,
}

impl ParsedAddress {
    /// Creates a complete address from its mailbox and host.
    #[must_use]
    pub fn new(mailbox: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            mailbox: Some(mailbox.into()),
            host: Some(host.into()),
            personal: None,
        }
    }

    /// Creates an incomplete entry holding only search text.
    #[must_use]
    pub fn fragment(text: impl Into<String>) -> Self {
        Self {
            mailbox: Some(text.into()),
            host: None,
            personal: None,
        }
    }

    /// Builds an entry from raw optional parts. Empty strings count as absent.
    #[must_use]
    pub fn from_parts(
        mailbox: Option<String>,
        host: Option<String>,
        personal: Option<String>,
    ) -> Self {
        let non_empty = |s: Option<String>| s.filter(|s| !s.is_empty());
        Self {
            mailbox: non_empty(mailbox),
            host: non_empty(host),
            personal: non_empty(personal),
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_personal(mut self, personal: impl Into<String>) -> Self {
        let personal = personal.into();
        self.personal = (!personal.is_empty()).then_some(personal);
        self
    }

    /// Local part, or the search text of a fragment.
    #[must_use]
    pub fn mailbox(&self) -> Option<&str> {
        self.mailbox.as_deref()
    }

    /// Domain part.
    #[must_use]
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    /// Display name.
    #[must_use]
    pub fn personal(&self) -> Option<&str> {
        self.personal.as_deref()
    }

    /// Returns true if both mailbox and host are present.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.mailbox.is_some() && self.host.is_some()
    }

    /// Returns `mailbox@host`, or just the mailbox for a fragment.
    ///
    /// Either form is quoted where needed so it parses back to the same entry.
    #[must_use]
    pub fn bare_address(&self) -> String {
        let mailbox = self.mailbox.as_deref().unwrap_or_default();
        match &self.host {
            Some(host) if local_needs_quoting(mailbox) => format!("{}@{host}", quote(mailbox)),
            Some(host) => format!("{mailbox}@{host}"),
            None if mailbox.contains(FRAGMENT_SPECIALS) => quote(mailbox),
            None => mailbox.to_string(),
        }
    }
}

impl fmt::Display for ParsedAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bare = self.bare_address();
        match &self.personal {
            Some(personal) if phrase_needs_quoting(personal) => {
                write!(f, "{} <{bare}>", quote(personal))
            }
            Some(personal) => write!(f, "{personal} <{bare}>"),
            None => f.write_str(&bare),
        }
    }
}

fn phrase_needs_quoting(text: &str) -> bool {
    text.chars()
        .any(|c| SPECIALS.contains(&c) || c.is_control())
        || text != text.trim()
}

/// Local parts may be a dot-atom; anything else is written as a quoted string.
fn local_needs_quoting(text: &str) -> bool {
    text.chars()
        .any(|c| (c != '.' && SPECIALS.contains(&c)) || c.is_whitespace() || c.is_control())
        || text.starts_with('.')
        || text.ends_with('.')
        || text.contains("..")
}

fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_address() {
        let addr = ParsedAddress::new("alice", "example.com");
        assert!(addr.is_complete());
        assert_eq!(addr.to_string(), "alice@example.com");
    }

    #[test]
    fn test_fragment_renders_bare() {
        let addr = ParsedAddress::fragment("john sm");
        assert!(!addr.is_complete());
        assert_eq!(addr.to_string(), "john sm");
    }

    #[test]
    fn test_fragment_with_delimiters_is_quoted() {
        assert_eq!(ParsedAddress::fragment("Smith, J").to_string(), "\"Smith, J\"");
        assert_eq!(ParsedAddress::fragment("a@b").to_string(), "\"a@b\"");
        assert_eq!(
            ParsedAddress::fragment("say \"hi\"").to_string(),
            "\"say \\\"hi\\\"\""
        );
        assert_eq!(ParsedAddress::fragment("j.smith").to_string(), "j.smith");
    }

    #[test]
    fn test_fragment_with_personal() {
        let addr = ParsedAddress::fragment("bo").with_personal("Bob");
        assert_eq!(addr.to_string(), "Bob <bo>");
    }

    #[test]
    fn test_display_with_personal() {
        let addr = ParsedAddress::new("john", "example.com").with_personal("John Doe");
        assert_eq!(addr.to_string(), "John Doe <john@example.com>");
    }

    #[test]
    fn test_personal_with_specials_is_quoted() {
        let addr = ParsedAddress::new("jane", "example.com").with_personal("Doe, Jane");
        assert_eq!(addr.to_string(), "\"Doe, Jane\" <jane@example.com>");

        let addr = ParsedAddress::new("q", "example.com").with_personal("Say \"hi\"");
        assert_eq!(addr.to_string(), "\"Say \\\"hi\\\"\" <q@example.com>");
    }

    #[test]
    fn test_local_part_with_space_is_quoted() {
        let addr = ParsedAddress::new("first last", "example.com");
        assert_eq!(addr.to_string(), "\"first last\"@example.com");
    }

    #[test]
    fn test_dot_atom_local_part_unquoted() {
        let addr = ParsedAddress::new("first.last", "example.com");
        assert_eq!(addr.to_string(), "first.last@example.com");

        let addr = ParsedAddress::new("trailing.", "example.com");
        assert_eq!(addr.to_string(), "\"trailing.\"@example.com");
    }

    #[test]
    fn test_from_parts_drops_empty() {
        let addr = ParsedAddress::from_parts(Some("bob".into()), Some(String::new()), None);
        assert_eq!(addr.mailbox(), Some("bob"));
        assert!(addr.host().is_none());
        assert!(!addr.is_complete());
    }

    #[test]
    fn test_empty_personal_ignored() {
        let addr = ParsedAddress::new("bob", "example.com").with_personal("");
        assert!(addr.personal().is_none());
    }
}
