//! Request parameter values
//!
//! Every parameter source of an incoming GraphQL request (query string, form
//! fields, JSON body, multipart operations, uploaded files) is reduced to the
//! closed [`Value`] type so that merging and classification can pattern match
//! instead of probing shapes at runtime.

use axum::body::Bytes;
use indexmap::IndexMap;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

/// Ordered string-keyed mapping of values
pub type Map = IndexMap<String, Value>;

/// Flat parameter mapping of one request
pub type Params = Map;

/// An uploaded file part, treated as an opaque handle
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedFile {
    /// Name of the multipart part that carried the file
    pub name: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            file_name: None,
            content_type: None,
            bytes: bytes.into(),
        }
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Size of the file content in bytes
    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

impl Serialize for UploadedFile {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(4))?;
        map.serialize_entry("name", &self.name)?;
        map.serialize_entry("fileName", &self.file_name)?;
        map.serialize_entry("contentType", &self.content_type)?;
        map.serialize_entry("size", &self.size())?;
        map.end()
    }
}

/// A polymorphic request parameter value
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
    List(Vec<Value>),
    Map(Map),
    File(UploadedFile),
}

impl Value {
    /// Get the value as a string slice if it is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value as a mapping if it is one
    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_file(&self) -> Option<&UploadedFile> {
        match self {
            Value::File(file) => Some(file),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Whether the value carries no content
    ///
    /// Null, the empty string, `false`, zero and empty collections are empty.
    /// A file is never empty.
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Bool(b) => !b,
            Value::Number(n) => n.as_f64() == Some(0.0),
            Value::String(s) => s.is_empty(),
            Value::List(items) => items.is_empty(),
            Value::Map(map) => map.is_empty(),
            Value::File(_) => false,
        }
    }

    /// Turn the value into a parameter mapping
    ///
    /// Lists become index-keyed mappings (`[a, b]` -> `{"0": a, "1": b}`).
    /// Scalars yield `None`.
    pub fn into_params(self) -> Option<Params> {
        match self {
            Value::Map(map) => Some(map),
            Value::List(items) => Some(
                items
                    .into_iter()
                    .enumerate()
                    .map(|(index, item)| (index.to_string(), item))
                    .collect(),
            ),
            _ => None,
        }
    }

    /// Decode a JSON-encoded string into a structured value
    ///
    /// Strings that do not parse, or parse to JSON `null`, are kept verbatim.
    /// Non-string values are returned unchanged.
    pub fn decode_json_string(self) -> Value {
        match self {
            Value::String(text) => match serde_json::from_str::<serde_json::Value>(&text) {
                Ok(serde_json::Value::Null) | Err(_) => Value::String(text),
                Ok(decoded) => decoded.into(),
            },
            other => other,
        }
    }

    fn child(&self, segment: &str) -> Option<&Value> {
        match self {
            Value::Map(map) => map.get(segment),
            Value::List(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        }
    }

    fn child_mut(&mut self, segment: &str) -> Option<&mut Value> {
        match self {
            Value::Map(map) => map.get_mut(segment),
            Value::List(items) => segment
                .parse::<usize>()
                .ok()
                .and_then(move |i| items.get_mut(i)),
            _ => None,
        }
    }

    /// Look up a nested value by path segments
    pub fn get_path(&self, path: &[&str]) -> Option<&Value> {
        path.iter()
            .try_fold(self, |current, segment| current.child(segment))
    }

    /// Whether a nested location exists (a present `null` counts)
    pub fn path_exists(&self, path: &[&str]) -> bool {
        self.get_path(path).is_some()
    }

    /// Overwrite the value at an existing nested location
    ///
    /// Returns `false` without touching anything if the location does not
    /// exist; this never inserts new keys.
    pub fn replace_path(&mut self, path: &[&str], value: Value) -> bool {
        let mut current = self;
        for segment in path {
            match current.child_mut(segment) {
                Some(next) => current = next,
                None => return false,
            }
        }
        *current = value;
        true
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                Value::Map(map.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<Map> for Value {
    fn from(value: Map) -> Self {
        Value::Map(value)
    }
}

impl From<UploadedFile> for Value {
    fn from(value: UploadedFile) -> Self {
        Value::File(value)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => n.serialize(serializer),
            Value::String(s) => serializer.serialize_str(s),
            Value::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Map(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map {
                    out.serialize_entry(key, value)?;
                }
                out.end()
            }
            Value::File(file) => file.serialize(serializer),
        }
    }
}

/// Convert a JSON object into a parameter mapping
pub fn params_from_json(value: serde_json::Value) -> Params {
    Value::from(value).into_params().unwrap_or_default()
}
