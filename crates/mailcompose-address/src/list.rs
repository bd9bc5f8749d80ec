//! Ordered address lists.

use std::fmt;

use crate::address::ParsedAddress;
use crate::error::Result;
use crate::parser::{self, ParseOptions};

/// Separator used when an address list is written back out.
const SEPARATOR: &str = ", ";

/// An ordered sequence of parsed addresses.
///
/// The `Display` implementation is the canonical serialization and the
/// inverse of [`AddressList::parse`] modulo whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AddressList(Vec<ParsedAddress>);

impl AddressList {
    /// Creates an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Parses a free-text address list.
    ///
    /// # Errors
    ///
    /// Returns an error on unbalanced quoting, comments or angle brackets,
    /// and on entries that cannot be an address at all.
    pub fn parse(text: &str, options: &ParseOptions) -> Result<Self> {
        parser::parse_list(text, options).map(Self)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the list has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Last entry, the only one eligible for expansion.
    #[must_use]
    pub fn last(&self) -> Option<&ParsedAddress> {
        self.0.last()
    }

    /// Removes and returns the last entry.
    pub fn pop(&mut self) -> Option<ParsedAddress> {
        self.0.pop()
    }

    /// Appends an entry.
    pub fn push(&mut self, address: ParsedAddress) {
        self.0.push(address);
    }

    /// Replaces the last entry, returning the old one. Pushes if empty.
    pub fn replace_last(&mut self, address: ParsedAddress) -> Option<ParsedAddress> {
        let old = self.0.pop();
        self.0.push(address);
        old
    }

    /// Iterates over the entries in order.
    pub fn iter(&self) -> std::slice::Iter<'_, ParsedAddress> {
        self.0.iter()
    }

    /// Returns the entries as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[ParsedAddress] {
        &self.0
    }
}

impl fmt::Display for AddressList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, address) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(SEPARATOR)?;
            }
            write!(f, "{address}")?;
        }
        Ok(())
    }
}

impl From<Vec<ParsedAddress>> for AddressList {
    fn from(addresses: Vec<ParsedAddress>) -> Self {
        Self(addresses)
    }
}

impl FromIterator<ParsedAddress> for AddressList {
    fn from_iter<I: IntoIterator<Item = ParsedAddress>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for AddressList {
    type Item = ParsedAddress;
    type IntoIter = std::vec::IntoIter<ParsedAddress>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a AddressList {
    type Item = &'a ParsedAddress;
    type IntoIter = std::slice::Iter<'a, ParsedAddress>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
