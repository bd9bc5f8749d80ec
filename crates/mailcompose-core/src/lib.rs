//! # mailcompose-core
//!
//! Services behind a webmail compose page.
//!
//! This crate provides:
//! - **Address expansion** - resolve the fragment being typed in a recipient field
//! - **Contact directory** - `SQLite` address book used for expansion
//! - **Notifications** - non-fatal messages for the user
//! - **Compose helpers** - text/HTML conversion, passphrase dialogs, widget setup
//! - **Inventory preferences** - preference schema for the inventory module
//!
//! ## Expanding an address
//!
//! ```ignore
//! use mailcompose_core::{AddressExpander, ContactRepository, ExpansionResult, NotificationQueue};
//!
//! let contacts = ContactRepository::new("contacts.db").await?;
//! let notifications = NotificationQueue::new();
//! let expander = AddressExpander::new(&contacts, &notifications);
//!
//! match expander.expand("alice@example.com, bo").await? {
//!     ExpansionResult::Resolved(value) | ExpansionResult::Unresolved(value) => println!("{value}"),
//!     ExpansionResult::Ambiguous { candidates, .. } => println!("{} candidates", candidates.len()),
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod compose;
pub mod config;
pub mod contacts;
pub mod directory;
mod error;
pub mod expand;
pub mod notify;
pub mod prefs;

pub use config::ComposeConfig;
pub use contacts::{Contact, ContactRepository};
pub use directory::{DirectoryLookup, DirectoryMatch, MemoryDirectory};
pub use error::{Error, Result};
pub use expand::{AddressExpander, ExpansionResult};
pub use notify::{Notification, NotificationQueue, NotificationSink, Severity, TracingSink};
pub use prefs::{InventoryRepository, PrefSchema, inventory_prefs};

pub use mailcompose_address::{AddressList, ParseOptions};
