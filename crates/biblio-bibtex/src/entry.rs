//! BibTeX entry data structures

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::block::Block;
use crate::error::Result;

/// Value of a raw field: a bare identifier or an unresolved block
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Block(Block),
}

impl FieldValue {
    /// Resolve the value into plain text
    pub fn plain_text(&self) -> Result<String> {
        match self {
            FieldValue::Text(text) => Ok(text.clone()),
            FieldValue::Block(block) => block.plain_text(),
        }
    }
}

/// A BibTeX entry with raw (unresolved) contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry {
    /// Lower-cased entry type, e.g. `article`
    pub entry_type: String,
    pub id: String,
    /// Lower-cased field names; the last definition of a repeated name wins
    pub fields: BTreeMap<String, FieldValue>,
}

impl RawEntry {
    /// Resolve every field into plain text.
    ///
    /// Authors are not parsed here; that needs the whole document.
    pub fn resolve(&self) -> Result<Entry> {
        let fields = self
            .fields
            .iter()
            .map(|(key, value)| Ok((key.clone(), value.plain_text()?)))
            .collect::<Result<BTreeMap<_, _>>>()?;

        Ok(Entry {
            entry_type: self.entry_type.clone(),
            id: self.id.clone(),
            author_ids: Vec::new(),
            fields,
        })
    }
}

/// A resolved BibTeX entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(rename = "type")]
    pub entry_type: String,
    pub id: String,
    /// IDs of the entry's authors, in field order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub author_ids: Vec<String>,
    pub fields: BTreeMap<String, String>,
}

impl Entry {
    /// Get a field value by key (case-insensitive)
    pub fn get_field(&self, key: &str) -> Option<&str> {
        self.fields.get(&key.to_lowercase()).map(String::as_str)
    }

    /// Get the author field
    pub fn author(&self) -> Option<&str> {
        self.get_field("author")
    }

    /// Get the title field
    pub fn title(&self) -> Option<&str> {
        self.get_field("title")
    }

    /// Get the year field
    pub fn year(&self) -> Option<&str> {
        self.get_field("year")
    }
}

impl std::fmt::Display for Entry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {:?}", self.entry_type, self.id, self.fields)
    }
}
