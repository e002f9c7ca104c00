//! [`NewDataset`] ⇄ dataset-version request payload.
//!
//! The server expects every field, top-level or child, as an object carrying
//! its `typeName`, `typeClass` and `multiple` flag next to the `value`; these
//! are taken from the schema, so the dataset should be validated first.

use crate::error::PayloadError;
use crate::types::*;
use serde_json::{Map, Value, json};

/// Shape a dataset into `{"datasetVersion": {...}}` for a create or update request.
///
/// Blocks and fields keep submission order. A block or field key the schemas
/// do not define is a [`PayloadError`].
pub fn to_request_payload(
    dataset: &NewDataset,
    blocks: &[MetadataBlock],
) -> Result<Value, PayloadError> {
    let mut metadata_blocks = Map::new();
    for values in &dataset.metadata_block_values {
        let block = blocks
            .iter()
            .find(|b| b.name == values.name)
            .ok_or_else(|| {
                PayloadError::new(format!("metadata block {} not found", values.name))
            })?;
        let fields = values
            .fields
            .iter()
            .map(|(key, value)| {
                let info = block.field(key).ok_or_else(|| {
                    PayloadError::new(format!(
                        "field {} is not defined in metadata block {}",
                        key, block.name
                    ))
                })?;
                field_payload(key, info, value)
            })
            .collect::<Result<Vec<_>, _>>()?;
        metadata_blocks.insert(values.name.clone(), json!({ "fields": fields }));
    }

    let mut version = Map::new();
    if let Some(license) = &dataset.license {
        let license = serde_json::to_value(license)
            .map_err(|e| PayloadError::new(format!("failed to encode license: {}", e)))?;
        version.insert("license".to_string(), license);
    }
    version.insert("metadataBlocks".to_string(), Value::Object(metadata_blocks));

    Ok(json!({ "datasetVersion": version }))
}

fn field_payload(
    key: &str,
    info: &MetadataFieldInfo,
    value: &FieldValue,
) -> Result<Value, PayloadError> {
    Ok(json!({
        "value": value_payload(info, value)?,
        "typeClass": info.type_class.as_str(),
        "multiple": info.multiple,
        "typeName": key,
    }))
}

fn value_payload(info: &MetadataFieldInfo, value: &FieldValue) -> Result<Value, PayloadError> {
    match value {
        FieldValue::Text(s) => Ok(Value::String(s.clone())),
        FieldValue::List(items) => items
            .iter()
            .map(|item| value_payload(info, item))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        FieldValue::Compound(children) => children
            .iter()
            .map(|(key, child)| {
                let child_info = info.child_field(key).ok_or_else(|| {
                    PayloadError::new(format!(
                        "child field {} is not defined for field {}",
                        key, info.name
                    ))
                })?;
                Ok((key.clone(), field_payload(key, child_info, child)?))
            })
            .collect::<Result<Map<_, _>, PayloadError>>()
            .map(Value::Object),
    }
}

/// Recover submitted values from a dataset-version payload.
///
/// Accepts `{"datasetVersion": {...}}` or the version object itself. Only
/// `typeName` and `value` are read; the rest of each field object is ignored.
pub fn from_version_payload(payload: &Value) -> Result<Vec<MetadataBlockValues>, PayloadError> {
    let version = payload.get("datasetVersion").unwrap_or(payload);
    let Some(blocks) = version.get("metadataBlocks").and_then(Value::as_object) else {
        return Err(PayloadError::new("payload has no metadataBlocks object"));
    };

    let mut result = Vec::with_capacity(blocks.len());
    for (name, block) in blocks {
        let fields = block
            .get("fields")
            .and_then(Value::as_array)
            .ok_or_else(|| PayloadError::new(format!("metadata block {} has no fields array", name)))?;
        let mut values = MetadataBlockValues::new(name.clone());
        for field in fields {
            let (key, value) = field_from_payload(field)?;
            values.fields.insert(key, value);
        }
        result.push(values);
    }
    Ok(result)
}

fn field_from_payload(field: &Value) -> Result<(String, FieldValue), PayloadError> {
    let key = field
        .get("typeName")
        .and_then(Value::as_str)
        .ok_or_else(|| PayloadError::new(format!("field object has no typeName: {}", field)))?;
    let value = field
        .get("value")
        .ok_or_else(|| PayloadError::new(format!("field {} has no value", key)))?;
    Ok((key.to_string(), value_from_payload(key, value)?))
}

fn value_from_payload(key: &str, value: &Value) -> Result<FieldValue, PayloadError> {
    match value {
        Value::String(s) => Ok(FieldValue::Text(s.clone())),
        Value::Array(items) => items
            .iter()
            .map(|item| value_from_payload(key, item))
            .collect::<Result<Vec<_>, _>>()
            .map(FieldValue::List),
        Value::Object(children) => children
            .values()
            .map(field_from_payload)
            .collect::<Result<FieldMap<_>, _>>()
            .map(FieldValue::Compound),
        other => Err(PayloadError::new(format!(
            "field {} has unsupported value {}",
            key, other
        ))),
    }
}
