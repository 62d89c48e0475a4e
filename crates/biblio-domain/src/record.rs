//! Generic records and their mapping onto typed authors
//!
//! The record importer delivers flat `{id, parent, type, fields}` records.
//! Only the recognised author attributes are accepted; any other field name
//! fails the whole record.

use serde::{Deserialize, Serialize};

use crate::author::{Author, AuthorError};

/// A named field with a value and a human-readable label
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecordField {
    pub name: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub value: String,
}

impl RecordField {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: String::new(),
            value: value.into(),
        }
    }

    /// Builder method to set the label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

/// A generic record with a list of fields
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthorRecord {
    pub id: String,
    /// `"0"` marks a record without a parent
    #[serde(default)]
    pub parent: String,
    #[serde(rename = "type")]
    pub record_type: String,
    #[serde(default)]
    pub fields: Vec<RecordField>,
}

/// Author attributes recognised in records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthorField {
    FirstName,
    MiddleName,
    LastName,
    PrimaryEntry,
    AcademicDegreesPrefix,
    AcademicDegreesSuffix,
    Nationality,
    University,
    Faculty,
    Department,
    CUniNumber,
    CUniAffCode,
    Email,
    Note,
}

impl AuthorField {
    /// Look up a field by its record name (case-sensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "FirstName" => Some(Self::FirstName),
            "MiddleName" => Some(Self::MiddleName),
            "LastName" => Some(Self::LastName),
            "PrimaryEntry" => Some(Self::PrimaryEntry),
            "AcademicDegreesPrefix" => Some(Self::AcademicDegreesPrefix),
            "AcademicDegreesSuffix" => Some(Self::AcademicDegreesSuffix),
            "Nationality" => Some(Self::Nationality),
            "University" => Some(Self::University),
            "Faculty" => Some(Self::Faculty),
            "Department" => Some(Self::Department),
            "CUniNumber" => Some(Self::CUniNumber),
            "CUniAffCode" => Some(Self::CUniAffCode),
            "Email" => Some(Self::Email),
            "Note" => Some(Self::Note),
            _ => None,
        }
    }

    /// The record name of the field
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FirstName => "FirstName",
            Self::MiddleName => "MiddleName",
            Self::LastName => "LastName",
            Self::PrimaryEntry => "PrimaryEntry",
            Self::AcademicDegreesPrefix => "AcademicDegreesPrefix",
            Self::AcademicDegreesSuffix => "AcademicDegreesSuffix",
            Self::Nationality => "Nationality",
            Self::University => "University",
            Self::Faculty => "Faculty",
            Self::Department => "Department",
            Self::CUniNumber => "CUniNumber",
            Self::CUniAffCode => "CUniAffCode",
            Self::Email => "Email",
            Self::Note => "Note",
        }
    }

    fn slot(self, author: &mut Author) -> &mut Option<String> {
        match self {
            Self::FirstName => &mut author.first_name,
            Self::MiddleName => &mut author.middle_name,
            Self::LastName => &mut author.last_name,
            Self::PrimaryEntry => &mut author.primary_entry,
            Self::AcademicDegreesPrefix => &mut author.academic_degrees_prefix,
            Self::AcademicDegreesSuffix => &mut author.academic_degrees_suffix,
            Self::Nationality => &mut author.nationality,
            Self::University => &mut author.university,
            Self::Faculty => &mut author.faculty,
            Self::Department => &mut author.department,
            Self::CUniNumber => &mut author.cuni_number,
            Self::CUniAffCode => &mut author.cuni_aff_code,
            Self::Email => &mut author.email,
            Self::Note => &mut author.note,
        }
    }
}

impl Author {
    /// Build an author from a generic record.
    ///
    /// Field values are trimmed. A later field with the same name overwrites
    /// an earlier one.
    pub fn from_record(record: &AuthorRecord) -> Result<Self, AuthorError> {
        if record.record_type != "author" {
            return Err(AuthorError::RecordNotAuthor {
                record_type: record.record_type.clone(),
            });
        }

        let mut author = Author::with_id(record.id.clone());
        if !record.parent.is_empty() && record.parent != "0" {
            author.parent = Some(record.parent.clone());
        }

        for field in &record.fields {
            let tag =
                AuthorField::from_name(&field.name).ok_or_else(|| AuthorError::UnknownField {
                    name: field.name.clone(),
                    label: field.label.clone(),
                })?;
            *tag.slot(&mut author) = Some(field.value.trim().to_string());
        }

        Ok(author)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(fields: Vec<RecordField>) -> AuthorRecord {
        AuthorRecord {
            id: "1042".to_string(),
            parent: "0".to_string(),
            record_type: "author".to_string(),
            fields,
        }
    }

    #[test]
    fn test_field_names_round_trip() {
        for name in ["FirstName", "CUniAffCode", "Note"] {
            let tag = AuthorField::from_name(name).unwrap();
            assert_eq!(tag.as_str(), name);
        }
        assert_eq!(AuthorField::from_name("firstname"), None);
    }

    #[test]
    fn test_from_record() {
        let rec = record(vec![
            RecordField::new("FirstName", " Jan "),
            RecordField::new("LastName", "Novák"),
            RecordField::new("Email", "novak@example.org"),
        ]);
        let author = Author::from_record(&rec).unwrap();
        assert_eq!(author.id, "1042");
        assert!(author.parent.is_none());
        assert_eq!(author.first_name.as_deref(), Some("Jan"));
        assert_eq!(author.last_name.as_deref(), Some("Novák"));
        assert_eq!(author.email.as_deref(), Some("novak@example.org"));
        assert_eq!(author.full_name(), "Jan Novák");
    }

    #[test]
    fn test_from_record_keeps_parent() {
        let mut rec = record(vec![]);
        rec.parent = "7".to_string();
        let author = Author::from_record(&rec).unwrap();
        assert_eq!(author.parent.as_deref(), Some("7"));
    }

    #[test]
    fn test_unknown_field() {
        let rec = record(vec![
            RecordField::new("FirstName", "Jan"),
            RecordField::new("ShoeSize", "44").with_label("Shoe size"),
        ]);
        assert_eq!(
            Author::from_record(&rec),
            Err(AuthorError::UnknownField {
                name: "ShoeSize".to_string(),
                label: "Shoe size".to_string(),
            })
        );
    }

    #[test]
    fn test_record_not_author() {
        let mut rec = record(vec![]);
        rec.record_type = "publication".to_string();
        assert!(matches!(
            Author::from_record(&rec),
            Err(AuthorError::RecordNotAuthor { record_type }) if record_type == "publication"
        ));
    }
}
