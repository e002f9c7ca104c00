//! Metadata field validation against metadata block schemas.
//!
//! Fail-fast: the first rejected value aborts the pass and reaches the caller
//! unchanged through every level of recursion. Validation reads the schema and
//! the submission and modifies neither.
//!
//! ```text
//! Validator::validate ─▶ validate_block ─▶ validate_field ─┬─▶ validate_multiple ─┐
//!                                               ▲          └─▶ validate_single ◀──┘
//!                                               └──── child fields ───┘
//! ```

use crate::enums::MetadataFieldType;
use crate::error::*;
use crate::options::ValidationOptions;
use crate::provider::MetadataBlockProvider;
use crate::types::*;

/// Validate a dataset against already-loaded metadata block schemas.
///
/// Blocks are matched by exact name. A submitted block with no schema yields
/// [`ValidationError::Read`].
pub fn validate(dataset: &NewDataset, blocks: &[MetadataBlock]) -> Result<(), ValidationError> {
    Validator::default().validate(dataset, blocks)
}

/// Validate a dataset, fetching each referenced block from `provider` first.
pub fn validate_with_provider<P>(dataset: &NewDataset, provider: &P) -> Result<(), ValidationError>
where
    P: MetadataBlockProvider + ?Sized,
{
    Validator::default().validate_with_provider(dataset, provider)
}

// ─── Validation context ─────────────────────────────────────────────────────

/// One value to check, with the schema entry governing it and enough
/// provenance to attribute a failure.
///
/// Recursion derives a fresh context for each element or child; a parent's
/// context is never modified.
#[derive(Clone, Copy, Debug)]
pub struct FieldAndValueInfo<'a> {
    pub field_info: &'a MetadataFieldInfo,
    pub field_key: &'a str,
    pub field_value: Option<&'a FieldValue>,
    pub block_name: &'a str,
    pub parent_field_key: Option<&'a str>,
    pub position: Option<usize>,
}

impl<'a> FieldAndValueInfo<'a> {
    /// A top-level field of a block.
    pub fn new(
        field_info: &'a MetadataFieldInfo,
        field_key: &'a str,
        field_value: Option<&'a FieldValue>,
        block_name: &'a str,
    ) -> Self {
        Self {
            field_info,
            field_key,
            field_value,
            block_name,
            parent_field_key: None,
            position: None,
        }
    }

    /// One element of this multi-valued field. The field becomes its own parent.
    fn element(&self, value: &'a FieldValue, position: usize) -> Self {
        Self {
            field_value: Some(value),
            parent_field_key: Some(self.field_key),
            position: Some(position),
            ..*self
        }
    }

    /// A child of this compound value. Keeps the current position.
    fn child(&self, key: &'a str, info: &'a MetadataFieldInfo) -> Self {
        let value = self
            .field_value
            .and_then(FieldValue::as_compound)
            .and_then(|record| record.get(key));
        Self {
            field_info: info,
            field_key: key,
            field_value: value,
            block_name: self.block_name,
            parent_field_key: Some(self.field_key),
            position: self.position,
        }
    }

    fn error(&self, kind: FieldErrorKind) -> FieldValidationError {
        FieldValidationError {
            block: self.block_name.to_string(),
            field: self.field_key.to_string(),
            parent_field: self.parent_field_key.map(str::to_string),
            position: self.position,
            kind,
        }
    }

    fn shape_error(&self, mismatch: ShapeMismatch) -> FieldValidationError {
        self.error(FieldErrorKind::Shape(mismatch))
    }
}

// ─── Validator ──────────────────────────────────────────────────────────────

/// Stateless field validator. Holds only its options, so one instance can be
/// shared across threads and calls.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    options: ValidationOptions,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ValidationOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ValidationOptions {
        &self.options
    }

    /// Validate every submitted block, in submission order, against its schema.
    pub fn validate(
        &self,
        dataset: &NewDataset,
        blocks: &[MetadataBlock],
    ) -> Result<(), ValidationError> {
        for values in &dataset.metadata_block_values {
            let block = blocks
                .iter()
                .find(|b| b.name == values.name)
                .ok_or_else(|| ReadError::block_not_found(&values.name))?;
            self.validate_block(values, block)?;
        }
        Ok(())
    }

    /// Look up each distinct block the dataset references, then validate.
    ///
    /// Lookups happen once per call and are not retained afterwards.
    pub fn validate_with_provider<P>(
        &self,
        dataset: &NewDataset,
        provider: &P,
    ) -> Result<(), ValidationError>
    where
        P: MetadataBlockProvider + ?Sized,
    {
        let mut blocks: Vec<MetadataBlock> = Vec::new();
        for values in &dataset.metadata_block_values {
            if blocks.iter().any(|b| b.name == values.name) {
                continue;
            }
            blocks.push(provider.get_metadata_block_by_name(&values.name)?);
        }
        self.validate(dataset, &blocks)
    }

    /// Check every field the schema defines, in schema order.
    ///
    /// Fields present in `values` but unknown to the schema are not looked at.
    pub fn validate_block(
        &self,
        values: &MetadataBlockValues,
        block: &MetadataBlock,
    ) -> Result<(), FieldValidationError> {
        tracing::debug!(
            block = %block.name,
            fields = block.metadata_fields.len(),
            "validating metadata block"
        );
        for (key, info) in &block.metadata_fields {
            let context = FieldAndValueInfo::new(info, key, values.fields.get(key), &block.name);
            self.validate_field(&context).inspect_err(|e| {
                tracing::debug!(
                    block = %e.block,
                    field = %e.field,
                    parent_field = ?e.parent_field,
                    position = ?e.position,
                    reason = %e.kind,
                    "metadata field rejected"
                );
            })?;
        }
        Ok(())
    }

    /// Entry point for one field: emptiness policy, then shape and content.
    pub fn validate_field(&self, info: &FieldAndValueInfo<'_>) -> Result<(), FieldValidationError> {
        tracing::trace!(
            block = info.block_name,
            field = info.field_key,
            parent_field = ?info.parent_field_key,
            position = ?info.position,
            "validating metadata field"
        );

        let value = match info.field_value {
            Some(value) if !value.is_empty() => value,
            _ if info.field_info.is_required => {
                return Err(info.error(FieldErrorKind::EmptyField));
            }
            _ => return Ok(()),
        };

        if info.field_info.multiple {
            self.validate_multiple(info, value)
        } else {
            self.validate_single(info, value)
        }
    }

    fn validate_multiple(
        &self,
        info: &FieldAndValueInfo<'_>,
        value: &FieldValue,
    ) -> Result<(), FieldValidationError> {
        let FieldValue::List(items) = value else {
            return Err(info.shape_error(ShapeMismatch::ExpectedArray));
        };

        let nested = info.field_info.is_nested();
        match ArrayShape::of(items) {
            ArrayShape::Strings if nested => {
                return Err(info.shape_error(ShapeMismatch::ExpectedChildFieldArray));
            }
            ArrayShape::Records if !nested => {
                return Err(info.shape_error(ShapeMismatch::ExpectedStringArray));
            }
            ArrayShape::Mixed => return Err(info.shape_error(ShapeMismatch::InvalidArray)),
            ArrayShape::Strings | ArrayShape::Records => {}
        }

        for (position, item) in items.iter().enumerate() {
            self.validate_single(&info.element(item, position), item)?;
        }
        Ok(())
    }

    fn validate_single(
        &self,
        info: &FieldAndValueInfo<'_>,
        value: &FieldValue,
    ) -> Result<(), FieldValidationError> {
        let nested = info.field_info.is_nested();
        match value {
            FieldValue::List(_) => Err(info.shape_error(ShapeMismatch::ExpectedSingleField)),
            FieldValue::Compound(_) if !nested => {
                Err(info.shape_error(ShapeMismatch::ExpectedString))
            }
            FieldValue::Text(_) if nested => {
                Err(info.shape_error(ShapeMismatch::ExpectedChildFields))
            }
            FieldValue::Text(_) | FieldValue::Compound(_) => self.validate_field_value(info, value),
        }
    }

    fn validate_field_value(
        &self,
        info: &FieldAndValueInfo<'_>,
        value: &FieldValue,
    ) -> Result<(), FieldValidationError> {
        let field = info.field_info;
        if field.is_controlled_vocabulary {
            self.validate_controlled_vocabulary(info, value)?;
        }
        if field.field_type == MetadataFieldType::Date {
            self.validate_date(info, value)?;
        }
        if let Some(children) = &field.child_fields {
            for (child_key, child_info) in children {
                self.validate_field(&info.child(child_key, child_info))?;
            }
        }
        Ok(())
    }

    fn validate_controlled_vocabulary(
        &self,
        info: &FieldAndValueInfo<'_>,
        value: &FieldValue,
    ) -> Result<(), FieldValidationError> {
        // A vocabulary field without a value list admits nothing.
        let allowed = info
            .field_info
            .controlled_vocabulary_values
            .as_deref()
            .unwrap_or_default();
        let known = value
            .as_text()
            .is_some_and(|v| allowed.iter().any(|a| a == v));
        if known {
            Ok(())
        } else {
            Err(info.error(FieldErrorKind::ControlledVocabulary))
        }
    }

    fn validate_date(
        &self,
        info: &FieldAndValueInfo<'_>,
        value: &FieldValue,
    ) -> Result<(), FieldValidationError> {
        if value.as_text().is_some_and(|v| self.options.accepts_date(v)) {
            Ok(())
        } else {
            Err(info.error(FieldErrorKind::DateFormat {
                accepted: self.options.describe_date_formats(),
            }))
        }
    }
}

/// Element kinds of a submitted array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ArrayShape {
    Strings,
    Records,
    Mixed,
}

impl ArrayShape {
    /// Every element is inspected. An empty array counts as strings.
    fn of(items: &[FieldValue]) -> Self {
        if items.iter().all(|i| matches!(i, FieldValue::Text(_))) {
            ArrayShape::Strings
        } else if items.iter().all(|i| matches!(i, FieldValue::Compound(_))) {
            ArrayShape::Records
        } else {
            ArrayShape::Mixed
        }
    }
}
