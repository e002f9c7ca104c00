//! Metadata field validation for [Dataverse](https://dataverse.org) research-data
//! repositories.
//!
//! Before a dataset is created or updated, its submitted metadata field values
//! are checked against the repository's metadata block schemas: field types,
//! multiplicity, requiredness, controlled vocabularies and nested child
//! fields. A rejected submission yields exactly one error naming the block,
//! the field and, for values inside compound or multiple fields, the parent
//! field and position.
//!
//! ```text
//! parse_dataset(text) → NewDataset ─┐
//! parse_metadata_block(text) ───────┴→ validate(dataset, blocks) → to_request_payload(..)
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! let block = dvmeta::parse_metadata_block(r#"{
//!   "name": "citation",
//!   "fields": {
//!     "title": {
//!       "name": "title", "type": "TEXT", "typeClass": "primitive",
//!       "multiple": false, "isControlledVocabulary": false, "isRequired": true
//!     }
//!   }
//! }"#).expect("valid schema");
//!
//! let dataset = dvmeta::parse_dataset(r#"{
//!   "metadataBlockValues": [{"name": "citation", "fields": {"title": "  "}}]
//! }"#).expect("valid submission");
//!
//! let err = dvmeta::validate(&dataset, &[block]).unwrap_err();
//! assert_eq!(
//!     err.to_string(),
//!     "There was an error when validating the field title from metadata block citation. \
//!      Reason was: The field should not be empty."
//! );
//! ```
//!
//! # Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `yaml`  | yes     | Accept YAML as well as JSON input via `serde-saphyr`. |

pub mod enums;
pub mod error;
pub mod options;
pub mod parse;
pub mod payload;
pub mod provider;
pub mod types;
pub mod validate;

pub use enums::*;
pub use error::*;
pub use types::*;

// Re-export entry-point functions at the crate root for convenience.
pub use options::ValidationOptions;
pub use parse::{parse_dataset, parse_metadata_block, parse_metadata_blocks};
pub use payload::{from_version_payload, to_request_payload};
pub use provider::{MetadataBlockProvider, MetadataBlockRegistry};
pub use validate::{FieldAndValueInfo, Validator, validate, validate_with_provider};

/// Convenience entry point composing parse → validate.
///
/// Returns the dataset once every field of every referenced block conforms;
/// the caller can then shape it with [`to_request_payload`] and issue the
/// write request.
///
/// # Errors
///
/// Returns [`DvmetaError::Parse`] if `input` cannot be decoded and
/// [`DvmetaError::Validation`] for the first nonconforming value or an
/// unknown block name.
///
/// # Example
///
/// ```rust
/// use dvmeta::{MetadataBlock, MetadataFieldInfo, MetadataFieldType, MetadataBlockRegistry};
///
/// let title = MetadataFieldInfo::primitive("title", MetadataFieldType::Text).required();
/// let registry = MetadataBlockRegistry::from_blocks([MetadataBlock::new(
///     "citation",
///     [("title".to_string(), title)].into_iter().collect(),
/// )]);
///
/// let input = r#"{"metadataBlockValues": [{"name": "citation", "fields": {"title": "Ocean data"}}]}"#;
/// match dvmeta::check(input, &registry) {
///     Ok(dataset) => println!("{} block(s) ready", dataset.metadata_block_values.len()),
///     Err(e) => eprintln!("{}", e),
/// }
/// ```
pub fn check<P>(input: &str, provider: &P) -> Result<NewDataset, DvmetaError>
where
    P: MetadataBlockProvider + ?Sized,
{
    let dataset = parse::parse_dataset(input)?;
    validate::validate_with_provider(&dataset, provider)?;
    Ok(dataset)
}
