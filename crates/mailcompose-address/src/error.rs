//! Error types for address parsing.

/// Result type alias for address operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Address list parse errors.
///
/// Positions are byte offsets into the original input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A quoted string was opened but never closed.
    #[error("Unterminated quoted string starting at byte {0}")]
    UnterminatedQuote(usize),

    /// A comment was opened but never closed.
    #[error("Unterminated comment starting at byte {0}")]
    UnterminatedComment(usize),

    /// An angle address was opened but never closed.
    #[error("Unterminated angle address starting at byte {0}")]
    UnterminatedAngle(usize),

    /// A character that is not allowed at this position.
    #[error("Unexpected character '{ch}' at byte {position}")]
    UnexpectedChar {
        /// The offending character.
        ch: char,
        /// Byte offset of the character.
        position: usize,
    },

    /// Structurally well-formed but unusable address.
    #[error("Invalid address: {0}")]
    InvalidAddress(String),
}
