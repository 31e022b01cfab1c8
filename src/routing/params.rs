//! Parameter extraction from incoming GraphQL requests
//!
//! A request may carry its GraphQL parameters in the query string, in form or
//! multipart fields, or as a JSON body. The extractor merges all of them into
//! one flat mapping and binds uploaded files into the variables tree following
//! the GraphQL multipart request convention
//! (<https://github.com/jaydenseric/graphql-multipart-request-spec>).

use crate::core::value::{Params, UploadedFile, Value};
use indexmap::IndexMap;

/// Key of the multipart operations field
pub const OPERATIONS_KEY: &str = "operations";

/// Key of the multipart file map field
pub const MAP_KEY: &str = "map";

/// Raw parameter sources of one HTTP request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRequest {
    /// Query string parameters
    pub query: Params,
    /// Form or multipart text fields
    pub body_fields: Params,
    /// Raw body content (JSON requests)
    pub raw_body: Option<String>,
    /// Uploaded file parts keyed by part name
    pub files: IndexMap<String, UploadedFile>,
}

impl RawRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    pub fn with_body_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.body_fields.insert(key.into(), value.into());
        self
    }

    pub fn with_raw_body(mut self, body: impl Into<String>) -> Self {
        self.raw_body = Some(body.into());
        self
    }

    pub fn with_file(mut self, key: impl Into<String>, file: UploadedFile) -> Self {
        self.files.insert(key.into(), file);
        self
    }
}

/// Merges the parameter sources of a request
///
/// Precedence, lowest first: query string, body fields, the flattened
/// `operations` field, the JSON body. Merges are shallow: a later source
/// replaces top-level keys wholesale.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestParamExtractor;

impl RequestParamExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract the merged parameter mapping of a request
    pub fn extract(&self, request: &RawRequest) -> Params {
        let mut merged = decode_params(request.query.clone());

        if !request.body_fields.is_empty() {
            let body = decode_params(request.body_fields.clone());
            let operations = body
                .get(OPERATIONS_KEY)
                .cloned()
                .and_then(Value::into_params)
                .unwrap_or_default();
            merged.extend(body);
            merged.extend(operations);
        }

        if let Some(content) = request.raw_body.as_deref().and_then(parse_json_body) {
            merged.extend(decode_params(content));
        }

        bind_files(&mut merged, &request.files);
        merged
    }
}

/// Decode top-level values that are JSON-encoded strings
pub fn decode_params(params: Params) -> Params {
    params
        .into_iter()
        .map(|(key, value)| (key, value.decode_json_string()))
        .collect()
}

// Malformed or non-structured JSON counts as no content
fn parse_json_body(body: &str) -> Option<Params> {
    if body.trim().is_empty() {
        return None;
    }

    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(json) => Value::from(json).into_params(),
        Err(err) => {
            tracing::debug!(error = %err, "Ignoring request body that is not JSON");
            None
        }
    }
}

/// Bind uploaded files to the locations named by the `map` parameter
///
/// Each map entry is a dotted path or a list of them. Only locations that
/// already exist are overwritten; other paths are skipped.
fn bind_files(merged: &mut Params, files: &IndexMap<String, UploadedFile>) {
    if files.is_empty() {
        return;
    }

    let Some(map) = merged.get(MAP_KEY).and_then(Value::as_map).cloned() else {
        return;
    };

    for (key, file) in files {
        let Some(targets) = map.get(key) else {
            continue;
        };

        for path in target_paths(targets) {
            let segments: Vec<&str> = path.split('.').collect();
            let Some((head, rest)) = segments.split_first() else {
                continue;
            };

            let Some(root) = merged.get_mut(*head) else {
                tracing::trace!(upload = %key, path = %path, "Skipping unresolved upload path");
                continue;
            };

            if !root.replace_path(rest, Value::File(file.clone())) {
                tracing::trace!(upload = %key, path = %path, "Skipping unresolved upload path");
            }
        }
    }
}

fn target_paths(targets: &Value) -> Vec<&str> {
    match targets {
        Value::String(path) => vec![path.as_str()],
        Value::List(paths) => paths.iter().filter_map(Value::as_str).collect(),
        Value::Map(paths) => paths.values().filter_map(Value::as_str).collect(),
        _ => Vec::new(),
    }
}
