//! Author list parsing and resolution
//!
//! The `author` field is split into full names, which are then matched
//! against the known-author registry by exact string equality. Names that
//! are not known become new authors with fresh IDs. Within one document the
//! same full name always resolves to the same ID.

use std::collections::HashMap;

use biblio_domain::{Author, AuthorLookup};

use crate::error::Result;

/// Split a raw author field into full names in "First Middle Last" order.
///
/// The field is split on every occurrence of the substring `and`, so a name
/// containing those letters is split as well. Segments in "Last, First
/// Middle" form are reordered with the leading piece moved to the end.
/// Duplicates are preserved.
pub fn parse_author_list(raw: &str) -> Vec<String> {
    raw.split("and")
        .map(|segment| {
            let segment = segment.trim();
            if !segment.contains(',') {
                return segment.to_string();
            }
            let mut pieces = segment.split(',').map(str::trim);
            let last = pieces.next().unwrap_or_default();
            pieces
                .chain(std::iter::once(last))
                .filter(|piece| !piece.is_empty())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

/// Outcome of resolving a document's author names
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorResolution {
    /// Registry authors encountered, each listed once
    pub known_authors: Vec<Author>,
    /// Authors created for unknown names, each listed once
    pub new_authors: Vec<Author>,
    /// One ID per input name, in input order
    pub author_ids: Vec<String>,
}

/// Resolves full names one at a time, remembering every name seen so far.
///
/// Keep a single resolver for a whole document so that repeated names across
/// entries share one ID.
pub struct AuthorResolver<'a, L: AuthorLookup + ?Sized> {
    lookup: &'a L,
    known: HashMap<String, String>,
    created: HashMap<String, String>,
    known_authors: Vec<Author>,
    new_authors: Vec<Author>,
}

impl<'a, L: AuthorLookup + ?Sized> AuthorResolver<'a, L> {
    pub fn new(lookup: &'a L) -> Self {
        Self {
            lookup,
            known: HashMap::new(),
            created: HashMap::new(),
            known_authors: Vec::new(),
            new_authors: Vec::new(),
        }
    }

    /// Resolve one full name to an author ID
    pub fn resolve(&mut self, full_name: &str) -> Result<String> {
        if let Some(id) = self.known.get(full_name).or_else(|| self.created.get(full_name)) {
            return Ok(id.clone());
        }

        if let Some(author) = self.lookup.find_by_full_name(full_name) {
            let id = author.id.clone();
            self.known.insert(full_name.to_string(), id.clone());
            self.known_authors.push(author);
            return Ok(id);
        }

        let comps: Vec<&str> = full_name.split(' ').filter(|c| !c.is_empty()).collect();
        let author = Author::from_name_components(&comps)?;
        let id = author.id.clone();
        self.created.insert(full_name.to_string(), id.clone());
        self.new_authors.push(author);
        Ok(id)
    }

    /// Resolve a sequence of full names, returning their IDs in order
    pub fn resolve_all<S: AsRef<str>>(&mut self, full_names: &[S]) -> Result<Vec<String>> {
        full_names
            .iter()
            .map(|name| self.resolve(name.as_ref()))
            .collect()
    }

    pub fn known_authors(&self) -> &[Author] {
        &self.known_authors
    }

    pub fn new_authors(&self) -> &[Author] {
        &self.new_authors
    }

    /// Split into the known and new authors encountered so far
    pub fn into_authors(self) -> (Vec<Author>, Vec<Author>) {
        (self.known_authors, self.new_authors)
    }
}

/// Resolve a document's full names against the known authors in one call
pub fn resolve_authors<S, L>(full_names: &[S], lookup: &L) -> Result<AuthorResolution>
where
    S: AsRef<str>,
    L: AuthorLookup + ?Sized,
{
    let mut resolver = AuthorResolver::new(lookup);
    let author_ids = resolver.resolve_all(full_names)?;
    let (known_authors, new_authors) = resolver.into_authors();
    Ok(AuthorResolution {
        known_authors,
        new_authors,
        author_ids,
    })
}
