use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::enums::*;

/// Ordered key → value map. Iteration follows insertion order, which for
/// schemas is the order the server declared the fields in.
pub type FieldMap<T> = IndexMap<String, T>;

// ─── Schema ─────────────────────────────────────────────────────────────────

/// A named set of field definitions governing one facet of dataset metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataBlock {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub display_on_create: bool,
    #[serde(rename = "fields", alias = "metadataFields")]
    pub metadata_fields: FieldMap<MetadataFieldInfo>,
}

impl MetadataBlock {
    pub fn new(name: impl Into<String>, metadata_fields: FieldMap<MetadataFieldInfo>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            display_name: String::new(),
            display_on_create: false,
            metadata_fields,
        }
    }

    /// Looks up a top-level field definition by key.
    pub fn field(&self, key: &str) -> Option<&MetadataFieldInfo> {
        self.metadata_fields.get(key)
    }
}

/// Schema entry describing one field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataFieldInfo {
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "type")]
    pub field_type: MetadataFieldType,
    #[serde(default)]
    pub watermark: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub multiple: bool,
    #[serde(default)]
    pub is_controlled_vocabulary: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controlled_vocabulary_values: Option<Vec<String>>,
    #[serde(default)]
    pub display_format: String,
    #[serde(
        rename = "childFields",
        alias = "childMetadataFields",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub child_fields: Option<FieldMap<MetadataFieldInfo>>,
    #[serde(default)]
    pub is_required: bool,
    #[serde(default)]
    pub display_order: i64,
    pub type_class: MetadataFieldTypeClass,
    #[serde(default)]
    pub display_on_create: bool,
}

impl MetadataFieldInfo {
    /// A single-valued, optional primitive field.
    pub fn primitive(name: impl Into<String>, field_type: MetadataFieldType) -> Self {
        let name = name.into();
        Self {
            display_name: name.clone(),
            title: name.clone(),
            name,
            field_type,
            watermark: String::new(),
            description: String::new(),
            multiple: false,
            is_controlled_vocabulary: false,
            controlled_vocabulary_values: None,
            display_format: String::new(),
            child_fields: None,
            is_required: false,
            display_order: 0,
            type_class: MetadataFieldTypeClass::Primitive,
            display_on_create: false,
        }
    }

    /// A controlled-vocabulary field accepting only `values`.
    pub fn controlled_vocabulary<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut info = Self::primitive(name, MetadataFieldType::Text);
        info.type_class = MetadataFieldTypeClass::ControlledVocabulary;
        info.is_controlled_vocabulary = true;
        info.controlled_vocabulary_values = Some(values.into_iter().map(Into::into).collect());
        info
    }

    /// A compound field whose value is a record of `children`.
    pub fn compound<I>(name: impl Into<String>, children: I) -> Self
    where
        I: IntoIterator<Item = MetadataFieldInfo>,
    {
        let mut info = Self::primitive(name, MetadataFieldType::None);
        info.type_class = MetadataFieldTypeClass::Compound;
        info.child_fields = Some(children.into_iter().map(|c| (c.name.clone(), c)).collect());
        info
    }

    pub fn required(mut self) -> Self {
        self.is_required = true;
        self
    }

    pub fn multiple(mut self) -> Self {
        self.multiple = true;
        self
    }

    /// True when the field's value is a record of child fields.
    pub fn is_nested(&self) -> bool {
        self.field_type.is_nested()
    }

    pub fn child_field(&self, key: &str) -> Option<&MetadataFieldInfo> {
        self.child_fields.as_ref().and_then(|c| c.get(key))
    }
}

// ─── Submission ─────────────────────────────────────────────────────────────

/// A caller-supplied field value.
///
/// Only strings, arrays and string-keyed records exist on the wire; numbers,
/// booleans and null are rejected at deserialization time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    List(Vec<FieldValue>),
    Compound(FieldMap<FieldValue>),
}

impl FieldValue {
    /// Builds a compound value from `(child key, child value)` pairs.
    pub fn compound<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<FieldValue>,
    {
        FieldValue::Compound(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[FieldValue]> {
        match self {
            FieldValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_compound(&self) -> Option<&FieldMap<FieldValue>> {
        match self {
            FieldValue::Compound(map) => Some(map),
            _ => None,
        }
    }

    /// A blank string or a zero-length array.
    ///
    /// Blank means whitespace and byte-order marks only. Records are never
    /// empty, even with no entries.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.trim_matches(is_blank).is_empty(),
            FieldValue::List(items) => items.is_empty(),
            FieldValue::Compound(_) => false,
        }
    }

    /// Converts a JSON tree, rejecting values with no field representation.
    pub fn from_json(value: &Value) -> Result<Self, String> {
        match value {
            Value::String(s) => Ok(FieldValue::Text(s.clone())),
            Value::Array(items) => items
                .iter()
                .map(FieldValue::from_json)
                .collect::<Result<Vec<_>, _>>()
                .map(FieldValue::List),
            Value::Object(map) => map
                .iter()
                .map(|(k, v)| FieldValue::from_json(v).map(|v| (k.clone(), v)))
                .collect::<Result<FieldMap<_>, _>>()
                .map(FieldValue::Compound),
            other => Err(format!(
                "field values must be strings, arrays or objects, got {}",
                other
            )),
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::Text(s) => Value::String(s.clone()),
            FieldValue::List(items) => Value::Array(items.iter().map(FieldValue::to_json).collect()),
            FieldValue::Compound(map) => Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }
}

fn is_blank(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl<T: Into<FieldValue>> From<Vec<T>> for FieldValue {
    fn from(items: Vec<T>) -> Self {
        FieldValue::List(items.into_iter().map(Into::into).collect())
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::{SerializeMap, SerializeSeq};
        match self {
            FieldValue::Text(s) => serializer.serialize_str(s),
            FieldValue::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            FieldValue::Compound(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (k, v) in entries {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for FieldValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        FieldValue::from_json(&value).map_err(serde::de::Error::custom)
    }
}

/// Submitted values for one metadata block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataBlockValues {
    pub name: String,
    #[serde(default)]
    pub fields: FieldMap<FieldValue>,
}

impl MetadataBlockValues {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: FieldMap::new(),
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }
}

/// License attached to a new dataset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetLicense {
    pub name: String,
    pub uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_uri: Option<String>,
}

/// A dataset submission awaiting validation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDataset {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<DatasetLicense>,
    #[serde(default)]
    pub metadata_block_values: Vec<MetadataBlockValues>,
}

impl NewDataset {
    pub fn new(metadata_block_values: Vec<MetadataBlockValues>) -> Self {
        Self {
            license: None,
            metadata_block_values,
        }
    }
}
