//! Bibliographic domain types shared by the biblio crates
//!
//! This crate provides the canonical author model used during BibTeX import:
//! - Author: a person figuring in bibliographical entries
//! - AuthorRecord: a generic record as delivered by the record importer
//! - AuthorRegistry: known authors keyed by their full name

pub mod author;
pub mod record;
pub mod registry;

pub use author::*;
pub use record::*;
pub use registry::*;
