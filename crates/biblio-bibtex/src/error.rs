//! Error types for biblio-bibtex

use biblio_domain::AuthorError;
use thiserror::Error;

/// Result type alias for BibTeX ingestion
pub type Result<T> = std::result::Result<T, BibtexError>;

/// Main error type for BibTeX ingestion
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BibtexError {
    /// Grammar violation in the source text
    #[error("{message} on line {line}")]
    Syntax { line: u32, message: String },

    /// An escape command with no diacritic table entry for its argument
    #[error("unknown command \\{command}{{{argument}}}")]
    UnknownCommand { command: String, argument: String },

    /// Author construction failed
    #[error("Author error: {0}")]
    Author(#[from] AuthorError),

    /// The document exceeds the accepted size
    #[error("document of {size} bytes exceeds the limit of {limit} bytes")]
    DocumentTooLarge { size: usize, limit: usize },
}

impl BibtexError {
    pub(crate) fn syntax(line: u32, message: impl Into<String>) -> Self {
        BibtexError::Syntax {
            line,
            message: message.into(),
        }
    }

    /// The source line associated with the error, if any
    pub fn line(&self) -> Option<u32> {
        match self {
            BibtexError::Syntax { line, .. } => Some(*line),
            _ => None,
        }
    }
}
