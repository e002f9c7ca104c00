//! Closed enumerations used by metadata block schemas.
//!
//! These mirror the server's wire values exactly. `MetadataFieldType::None` is
//! the sentinel the server uses for fields whose value is a record of child
//! fields rather than a scalar.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared value type of a metadata field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MetadataFieldType {
    Date,
    Email,
    Float,
    Int,
    None,
    String,
    Text,
    Textbox,
    Url,
}

impl MetadataFieldType {
    /// True for the sentinel type carried by compound fields.
    pub fn is_nested(self) -> bool {
        self == MetadataFieldType::None
    }
}

/// How a field's value is structured.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MetadataFieldTypeClass {
    Primitive,
    ControlledVocabulary,
    Compound,
}

impl MetadataFieldTypeClass {
    pub fn as_str(self) -> &'static str {
        match self {
            MetadataFieldTypeClass::Primitive => "primitive",
            MetadataFieldTypeClass::ControlledVocabulary => "controlledVocabulary",
            MetadataFieldTypeClass::Compound => "compound",
        }
    }
}

impl fmt::Display for MetadataFieldTypeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A date layout accepted by `DATE` fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DateFormat {
    #[serde(rename = "YYYY")]
    Year,
    #[serde(rename = "YYYY-MM")]
    YearMonth,
    #[serde(rename = "YYYY-MM-DD")]
    YearMonthDay,
}

impl DateFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            DateFormat::Year => "YYYY",
            DateFormat::YearMonth => "YYYY-MM",
            DateFormat::YearMonthDay => "YYYY-MM-DD",
        }
    }
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
