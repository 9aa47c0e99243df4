//! Error types for the style engine.

use crate::selector::SelectorError;

/// Result type alias for style operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while parsing stylesheet text.
///
/// Parsing is all-or-nothing: the first malformed construct aborts the
/// whole parse, and every error carries the 1-based line number where it
/// was detected.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Structural or declaration error in the stylesheet text.
    #[error("stylesheet parse error at line {line}: {message}")]
    Parse { message: String, line: u32 },

    /// A selector failed to compile.
    #[error("invalid selector '{selector}' at line {line}: {source}")]
    Selector {
        selector: String,
        line: u32,
        #[source]
        source: SelectorError,
    },
}

impl Error {
    /// Create a parse error.
    pub fn parse(message: impl Into<String>, line: u32) -> Self {
        Self::Parse {
            message: message.into(),
            line,
        }
    }

    /// Create a selector error.
    pub fn selector(selector: impl Into<String>, line: u32, source: SelectorError) -> Self {
        Self::Selector {
            selector: selector.into(),
            line,
            source,
        }
    }

    /// The 1-based line number the error was reported at.
    pub fn line(&self) -> u32 {
        match self {
            Self::Parse { line, .. } | Self::Selector { line, .. } => *line,
        }
    }
}
