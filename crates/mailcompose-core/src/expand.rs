//! Address expansion for compose recipient fields.
//!
//! Recipient fields are typed left to right, so only the last entry of the
//! list can be a search fragment. Everything before it passes through as is.

use mailcompose_address::{AddressList, AddressListParser, ParseOptions, Rfc822Parser};
use tracing::debug;

use crate::Result;
use crate::directory::{DirectoryLookup, DirectoryMatch};
use crate::notify::{NotificationSink, Severity};

/// Message pushed when a fragment matches several directory entries.
pub const AMBIGUOUS_MESSAGE: &str = "Ambiguous address found.";

/// Outcome of expanding an address list.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ExpansionResult {
    /// The list is complete; use this string as the new field value.
    Resolved(String),
    /// Nothing matched the fragment; the original list is returned.
    Unresolved(String),
    /// Several entries matched; the user must pick one.
    Ambiguous {
        /// The list without the fragment.
        prefix: String,
        /// The search text that was typed.
        fragment: String,
        /// Directory entries matching the fragment.
        candidates: Vec<DirectoryMatch>,
    },
}

impl ExpansionResult {
    /// Field value to show, if the expansion produced one.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Resolved(value) | Self::Unresolved(value) => Some(value),
            Self::Ambiguous { .. } => None,
        }
    }
}

/// Expands the trailing fragment of an address list through a directory.
pub struct AddressExpander<D, N, P = Rfc822Parser> {
    directory: D,
    notifications: N,
    parser: P,
    options: ParseOptions,
}

impl<D, N> AddressExpander<D, N>
where
    D: DirectoryLookup,
    N: NotificationSink,
{
    /// Creates an expander using the built-in address parser.
    pub fn new(directory: D, notifications: N) -> Self {
        Self::with_parser(directory, notifications, Rfc822Parser)
    }
}

impl<D, N, P> AddressExpander<D, N, P>
where
    D: DirectoryLookup,
    N: NotificationSink,
    P: AddressListParser,
{
    /// Creates an expander with a custom address parser.
    pub fn with_parser(directory: D, notifications: N, parser: P) -> Self {
        Self {
            directory,
            notifications,
            parser,
            options: ParseOptions::default(),
        }
    }

    /// Expands the last address of `input`.
    ///
    /// A complete last address is returned without touching the directory.
    /// Otherwise the fragment is searched:
    ///
    /// - no match: a warning is pushed and the list comes back unchanged
    /// - one match: the fragment is replaced by it
    /// - several: a warning is pushed and the candidates are returned
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Parse`] for malformed input and
    /// [`crate::Error::DirectoryUnavailable`] if the search fails.
    pub async fn expand(&self, input: &str) -> Result<ExpansionResult> {
        let mut list = self.parser.parse(input, &self.options)?;

        let Some(last) = list.last() else {
            return Ok(ExpansionResult::Resolved(String::new()));
        };
        if last.is_complete() {
            return Ok(ExpansionResult::Resolved(list.to_string()));
        }

        // A custom parser may yield a host with no mailbox: nothing to search for.
        let Some(fragment) = last.mailbox().map(str::to_string) else {
            let text = last.to_string();
            debug!(%text, "entry has no search text");
            return Ok(self.unresolved(&list, &text));
        };
        let mut matches = self.directory.search(&fragment).await?;
        debug!(%fragment, matches = matches.len(), "searched directory");

        match matches.len() {
            0 => Ok(self.unresolved(&list, &fragment)),
            1 => {
                let resolved = matches.remove(0);
                list.replace_last(resolved.to_address());
                Ok(ExpansionResult::Resolved(list.to_string()))
            }
            _ => {
                self.notifications.push(AMBIGUOUS_MESSAGE, Severity::Warning);
                list.pop();
                Ok(ExpansionResult::Ambiguous {
                    prefix: list.to_string(),
                    fragment,
                    candidates: matches,
                })
            }
        }
    }

    fn unresolved(&self, list: &AddressList, fragment: &str) -> ExpansionResult {
        self.notifications.push(
            &format!("Search for \"{fragment}\" failed: no address found."),
            Severity::Warning,
        );
        ExpansionResult::Unresolved(list.to_string())
    }
}
