use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error kind for parse failures.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseErrorKind {
    Syntax,
    TypeMismatch,
    UnknownVariant,
}

/// Produced when schema or submission text cannot be decoded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl ParseError {
    pub(crate) fn new(kind: ParseErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            path: None,
        }
    }

    pub(crate) fn at(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            Some(path) => write!(f, "{}: {}", path, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for ParseError {}

/// Which value shape the schema expected and did not get.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
#[serde(rename_all = "snake_case")]
pub enum ShapeMismatch {
    #[error("Expecting an array of values.")]
    ExpectedArray,
    #[error("Expecting an array of child fields, not strings.")]
    ExpectedChildFieldArray,
    #[error("Expecting an array of strings, not child fields.")]
    ExpectedStringArray,
    #[error("The provided array of values is not valid.")]
    InvalidArray,
    #[error("Expecting a single field, not an array.")]
    ExpectedSingleField,
    #[error("Expecting a string, not child fields.")]
    ExpectedString,
    #[error("Expecting child fields, not a string.")]
    ExpectedChildFields,
}

/// Why a field value was rejected.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
#[serde(rename_all = "snake_case", tag = "kind", content = "detail")]
pub enum FieldErrorKind {
    #[error("The field should not be empty.")]
    EmptyField,
    #[error("The field does not have a valid controlled vocabulary value.")]
    ControlledVocabulary,
    #[error("The field requires a valid date format ({accepted}).")]
    DateFormat { accepted: String },
    #[error("{0}")]
    Shape(ShapeMismatch),
}

/// A rejected field value, addressed by block, field, parent field and position.
///
/// The message is rendered from the structured fields; nothing is baked in at
/// construction.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
#[error(
    "There was an error when validating the field {field} from metadata block {block}{}{}. Reason was: {kind}",
    parent_clause(.parent_field),
    position_clause(.position)
)]
pub struct FieldValidationError {
    pub block: String,
    pub field: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<usize>,
    pub kind: FieldErrorKind,
}

fn parent_clause(parent: &Option<String>) -> String {
    parent
        .as_ref()
        .map(|p| format!(" with parent field {}", p))
        .unwrap_or_default()
}

fn position_clause(position: &Option<usize>) -> String {
    position
        .map(|p| format!(" in position {}", p))
        .unwrap_or_default()
}

impl FieldValidationError {
    pub fn is_empty_field(&self) -> bool {
        self.kind == FieldErrorKind::EmptyField
    }

    pub fn is_controlled_vocabulary(&self) -> bool {
        self.kind == FieldErrorKind::ControlledVocabulary
    }

    pub fn is_date_format(&self) -> bool {
        matches!(self.kind, FieldErrorKind::DateFormat { .. })
    }

    /// The shape mismatch, if this is a general shape error.
    pub fn shape(&self) -> Option<ShapeMismatch> {
        match self.kind {
            FieldErrorKind::Shape(s) => Some(s),
            _ => None,
        }
    }

    /// Human-readable reason without the field context.
    pub fn reason(&self) -> String {
        self.kind.to_string()
    }
}

/// A schema could not be read, e.g. the block name is unknown.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("There was an error when reading the resource. Reason was: {reason}")]
pub struct ReadError {
    pub reason: String,
}

impl ReadError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    pub(crate) fn block_not_found(name: &str) -> Self {
        Self::new(format!("metadata block {} not found", name))
    }
}

/// Outcome of validating a dataset submission.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error(transparent)]
    Field(#[from] FieldValidationError),
    #[error(transparent)]
    Read(#[from] ReadError),
}

impl ValidationError {
    pub fn as_field(&self) -> Option<&FieldValidationError> {
        match self {
            ValidationError::Field(e) => Some(e),
            ValidationError::Read(_) => None,
        }
    }
}

/// A dataset could not be shaped into, or recovered from, a request payload.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct PayloadError {
    pub message: String,
}

impl PayloadError {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Combined error type for the [`crate::check`] entry point.
#[derive(Clone, Debug, Error)]
pub enum DvmetaError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}
