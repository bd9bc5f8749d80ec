//! # mailcompose-address
//!
//! Address list parsing and formatting for compose form fields.
//!
//! A recipient field is free text typed left to right: zero or more
//! addresses separated by `,` or `;`, where the last entry may still be
//! an incomplete search fragment such as `"bo"`.
//!
//! ## Quick Start
//!
//! ```
//! use mailcompose_address::{AddressList, ParseOptions};
//!
//! let list = AddressList::parse("\"Doe, Jane\" <jane@example.com>, bo", &ParseOptions::default())?;
//! assert_eq!(list.len(), 2);
//!
//! let last = list.last().unwrap();
//! assert!(!last.is_complete());
//! assert_eq!(last.mailbox(), Some("bo"));
//!
//! assert_eq!(list.to_string(), "\"Doe, Jane\" <jane@example.com>, bo");
//! # Ok::<(), mailcompose_address::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod address;
mod error;
mod list;
mod parser;

pub use address::ParsedAddress;
pub use error::{Error, Result};
pub use list::AddressList;
pub use parser::{AddressListParser, ParseOptions, Rfc822Parser};
