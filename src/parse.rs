use crate::error::{ParseError, ParseErrorKind};
use crate::types::{FieldValue, MetadataBlock, NewDataset};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Parse a single metadata block schema.
///
/// Accepts the bare block object or the server's `{"status": "OK", "data": {...}}`
/// envelope, as JSON or (with the `yaml` feature) YAML.
pub fn parse_metadata_block(input: &str) -> Result<MetadataBlock, ParseError> {
    let value = unwrap_envelope(parse_value(input)?)?;
    if !value.is_object() {
        return Err(ParseError::new(
            ParseErrorKind::TypeMismatch,
            "metadata block must be a mapping",
        ));
    }
    from_value(value)
}

/// Parse a list of metadata block schemas, bare or enveloped.
pub fn parse_metadata_blocks(input: &str) -> Result<Vec<MetadataBlock>, ParseError> {
    let value = unwrap_envelope(parse_value(input)?)?;
    if !value.is_array() {
        return Err(ParseError::new(
            ParseErrorKind::TypeMismatch,
            "metadata block list must be a sequence",
        ));
    }
    from_value(value)
}

/// Parse a dataset submission into an unvalidated [`NewDataset`].
///
/// Performs decoding and type mapping only. Field values are checked for
/// representability (strings, arrays, records), not against any schema.
pub fn parse_dataset(input: &str) -> Result<NewDataset, ParseError> {
    let value = parse_value(input)?;
    let Some(root) = value.as_object() else {
        return Err(ParseError::new(
            ParseErrorKind::TypeMismatch,
            "dataset root must be a mapping",
        ));
    };

    for key in root.keys() {
        match key.as_str() {
            "license" | "metadataBlockValues" => {}
            other => {
                return Err(ParseError::new(
                    ParseErrorKind::TypeMismatch,
                    format!("unknown top-level field: {}", other),
                )
                .at(other));
            }
        }
    }

    check_field_values(&value)?;
    from_value(value)
}

/// Locate the first unrepresentable field value so the error carries a path.
fn check_field_values(root: &Value) -> Result<(), ParseError> {
    let Some(blocks) = root.get("metadataBlockValues").and_then(Value::as_array) else {
        return Ok(());
    };
    for (i, block) in blocks.iter().enumerate() {
        let Some(fields) = block.get("fields").and_then(Value::as_object) else {
            continue;
        };
        for (key, value) in fields {
            if let Err(message) = FieldValue::from_json(value) {
                return Err(ParseError::new(ParseErrorKind::TypeMismatch, message)
                    .at(format!("metadataBlockValues[{}].fields.{}", i, key)));
            }
        }
    }
    Ok(())
}

fn parse_value(input: &str) -> Result<Value, ParseError> {
    if input.trim().is_empty() {
        return Err(ParseError::new(ParseErrorKind::Syntax, "empty input"));
    }
    decode(input)
}

#[cfg(feature = "yaml")]
fn decode(input: &str) -> Result<Value, ParseError> {
    // YAML is a superset of JSON, so this covers server payloads too.
    serde_saphyr::from_str(input).map_err(|e| {
        let msg = e.to_string();
        ParseError::new(classify_error(&msg), msg)
    })
}

#[cfg(not(feature = "yaml"))]
fn decode(input: &str) -> Result<Value, ParseError> {
    serde_json::from_str(input).map_err(|e| ParseError::new(ParseErrorKind::Syntax, e.to_string()))
}

/// Strip the `{"status": ..., "data": ...}` wrapper the server puts on responses.
fn unwrap_envelope(value: Value) -> Result<Value, ParseError> {
    let Value::Object(mut map) = value else {
        return Ok(value);
    };
    let Some(status) = map.get("status").and_then(Value::as_str) else {
        return Ok(Value::Object(map));
    };
    if status != "OK" {
        let message = map
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("no message");
        return Err(ParseError::new(
            ParseErrorKind::TypeMismatch,
            format!("server returned status {}: {}", status, message),
        )
        .at("status"));
    }
    match map.remove("data") {
        Some(data) => Ok(data),
        None => Err(ParseError::new(
            ParseErrorKind::TypeMismatch,
            "response envelope has no data",
        )
        .at("data")),
    }
}

fn from_value<T: DeserializeOwned>(value: Value) -> Result<T, ParseError> {
    serde_json::from_value(value).map_err(|e| {
        let msg = e.to_string();
        ParseError::new(classify_error(&msg), msg)
    })
}

fn classify_error(msg: &str) -> ParseErrorKind {
    let lower = msg.to_lowercase();
    if lower.contains("unknown variant") || lower.contains("unknown field") {
        ParseErrorKind::UnknownVariant
    } else if lower.contains("missing field")
        || lower.contains("invalid type")
        || lower.contains("field values must be")
    {
        ParseErrorKind::TypeMismatch
    } else {
        ParseErrorKind::Syntax
    }
}
