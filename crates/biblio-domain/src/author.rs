//! Author representation

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while constructing authors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthorError {
    /// A full name split into no usable components
    #[error("expected at least one name component")]
    NoNameComponents,

    /// The record handed to the mapper does not describe an author
    #[error("ill-typed record '{record_type}', expected 'author'")]
    RecordNotAuthor { record_type: String },

    /// A record field whose name is not a recognised author attribute
    #[error("unknown field '{name}' ({label})")]
    UnknownField { name: String, label: String },

    /// The serialized registry could not be decoded
    #[error("invalid author registry: {0}")]
    Registry(String),
}

impl From<serde_json::Error> for AuthorError {
    fn from(err: serde_json::Error) -> Self {
        AuthorError::Registry(err.to_string())
    }
}

/// An author figuring in bibliographical entries
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Author {
    pub id: String,
    /// ID of the record's parent, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_entry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub academic_degrees_prefix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub academic_degrees_suffix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub university: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faculty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cuni_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cuni_aff_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Author {
    /// Create an empty author with a freshly generated ID
    pub fn new() -> Self {
        Self::with_id(uuid::Uuid::new_v4().to_string())
    }

    /// Create an empty author with a pre-assigned ID
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Build a new author from the components of a full name.
    ///
    /// One component becomes the first name, two become first and last
    /// name. With three or more, everything between the first and the last
    /// component is joined into the middle name.
    pub fn from_name_components<S: AsRef<str>>(comps: &[S]) -> Result<Self, AuthorError> {
        let mut author = Self::new();
        match comps {
            [] => return Err(AuthorError::NoNameComponents),
            [first] => {
                author.first_name = Some(first.as_ref().to_string());
            }
            [first, last] => {
                author.first_name = Some(first.as_ref().to_string());
                author.last_name = Some(last.as_ref().to_string());
            }
            [first, middle @ .., last] => {
                let middle: Vec<&str> = middle.iter().map(AsRef::as_ref).collect();
                author.first_name = Some(first.as_ref().to_string());
                author.middle_name = Some(middle.join(" "));
                author.last_name = Some(last.as_ref().to_string());
            }
        }
        Ok(author)
    }

    /// Builder method to set the first name
    pub fn with_first_name(mut self, first: impl Into<String>) -> Self {
        self.first_name = Some(first.into());
        self
    }

    /// Builder method to set the middle name
    pub fn with_middle_name(mut self, middle: impl Into<String>) -> Self {
        self.middle_name = Some(middle.into());
        self
    }

    /// Builder method to set the last name
    pub fn with_last_name(mut self, last: impl Into<String>) -> Self {
        self.last_name = Some(last.into());
        self
    }

    /// The full name: first, middle and last name joined by single spaces,
    /// skipping the parts that are missing or empty.
    pub fn full_name(&self) -> String {
        [&self.first_name, &self.middle_name, &self.last_name]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
