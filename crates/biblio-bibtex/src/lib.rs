//! BibTeX ingestion
//!
//! This crate turns a raw BibTeX document into resolved entries and
//! resolves the people named in their author fields.
//!
//! Pipeline:
//! - Tokeniser splitting the source into alphanumeric runs and symbols
//! - Recursive-descent parser producing raw entries with nested blocks
//! - Block flattening with TeX diacritic decoding
//! - Author list parsing and resolution against known authors
//! - Document import with size limits and a serializable report

mod authors;
mod block;
pub mod config;
pub mod diacritics;
mod entry;
mod error;
mod import;
pub mod parser;
mod token;

pub use authors::{parse_author_list, resolve_authors, AuthorResolution, AuthorResolver};
pub use block::{Block, Command, Content, Delimiter};
pub use config::{ConfigError, ImportConfig};
pub use entry::{Entry, FieldValue, RawEntry};
pub use error::{BibtexError, Result};
pub use import::{import_bibtex, ImportReport};
pub use parser::{parse_block, parse_entries, skip_whitespace_and_comments};
pub use token::{tokenise, Token, TokenKind};
