//! Known-author registry
//!
//! The import pipeline only needs to answer one question about the outside
//! world: is there already an author with exactly this full name?

use std::collections::HashMap;

use crate::author::{Author, AuthorError};

/// Full-name keyed lookup of existing authors.
///
/// Matching is exact string equality on the assembled full name.
pub trait AuthorLookup {
    fn find_by_full_name(&self, full_name: &str) -> Option<Author>;
}

impl AuthorLookup for HashMap<String, Author> {
    fn find_by_full_name(&self, full_name: &str) -> Option<Author> {
        self.get(full_name).cloned()
    }
}

/// In-memory registry of known authors
#[derive(Debug, Clone, Default)]
pub struct AuthorRegistry {
    by_full_name: HashMap<String, Author>,
}

impl AuthorRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry keyed by each author's full name.
    ///
    /// When two authors share a full name the later one wins.
    pub fn from_authors(authors: impl IntoIterator<Item = Author>) -> Self {
        let mut registry = Self::new();
        for author in authors {
            registry.insert(author);
        }
        registry
    }

    /// Load a registry from a JSON array of authors
    pub fn from_json(json: &str) -> Result<Self, AuthorError> {
        let authors: Vec<Author> = serde_json::from_str(json)?;
        Ok(Self::from_authors(authors))
    }

    pub fn insert(&mut self, author: Author) {
        self.by_full_name.insert(author.full_name(), author);
    }

    pub fn len(&self) -> usize {
        self.by_full_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_full_name.is_empty()
    }
}

impl AuthorLookup for AuthorRegistry {
    fn find_by_full_name(&self, full_name: &str) -> Option<Author> {
        self.by_full_name.get(full_name).cloned()
    }
}
