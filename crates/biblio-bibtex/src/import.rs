//! Document import
//!
//! Runs the whole pipeline on one uploaded document: size check, tokenise,
//! parse, resolve field text, then resolve the authors of every entry
//! against the known-author registry.

use biblio_domain::{Author, AuthorLookup};
use serde::{Deserialize, Serialize};

use crate::authors::{parse_author_list, AuthorResolver};
use crate::config::ImportConfig;
use crate::entry::Entry;
use crate::error::{BibtexError, Result};
use crate::parser::parse_entries;
use crate::token::tokenise;

/// Result of importing one document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportReport {
    pub entries: Vec<Entry>,
    pub num_entries: usize,
    /// Registry authors referenced by the document
    pub known_authors: Vec<Author>,
    /// Authors created for names the registry does not know
    pub unknown_authors: Vec<Author>,
}

/// Import a BibTeX document.
///
/// Fails on the first error; nothing is returned for a partially valid
/// document.
pub fn import_bibtex<L>(text: &str, lookup: &L, config: &ImportConfig) -> Result<ImportReport>
where
    L: AuthorLookup + ?Sized,
{
    if text.len() > config.max_document_bytes {
        tracing::warn!(
            "Rejecting document of {} bytes (limit {})",
            text.len(),
            config.max_document_bytes
        );
        return Err(BibtexError::DocumentTooLarge {
            size: text.len(),
            limit: config.max_document_bytes,
        });
    }

    let tokens = tokenise(text);
    tracing::debug!("Tokenised document into {} tokens", tokens.len());

    let raw_entries = parse_entries(&tokens)?;
    let mut entries = raw_entries
        .iter()
        .map(|raw| raw.resolve())
        .collect::<Result<Vec<_>>>()?;
    tracing::debug!("Resolved {} entries", entries.len());

    let mut resolver = AuthorResolver::new(lookup);
    for entry in &mut entries {
        if let Some(authors) = entry.fields.get(&config.author_field) {
            let names = parse_author_list(authors);
            entry.author_ids = resolver.resolve_all(&names)?;
        }
    }
    let (known_authors, unknown_authors) = resolver.into_authors();

    tracing::info!(
        "Imported {} entries ({} known authors, {} unknown authors)",
        entries.len(),
        known_authors.len(),
        unknown_authors.len()
    );

    Ok(ImportReport {
        num_entries: entries.len(),
        entries,
        known_authors,
        unknown_authors,
    })
}
