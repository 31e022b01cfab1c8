//! Request shape classification
//!
//! Decides whether merged request parameters describe a single query or a
//! batch of queries. Classification never rejects a request: anything that is
//! neither becomes an empty single request, which the execution engine then
//! rejects with its regular "no query" validation error.

use crate::core::query_provider::PersistedQueryProvider;
use crate::core::value::{Map, Params, Value};
use anyhow::Result;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

/// One query execution
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SingleRequest {
    pub query: String,
    pub variables: Map,
    /// The query text came from a persisted query lookup
    pub persisted: bool,
}

impl SingleRequest {
    /// The fallback request carrying no query
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Canonical execution request handed to the engine
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ExecutionRequest {
    Single(SingleRequest),
    /// Raw query mappings in index order
    Batch { queries: Vec<Value> },
}

impl ExecutionRequest {
    pub fn kind(&self) -> &'static str {
        match self {
            ExecutionRequest::Single(_) => "single",
            ExecutionRequest::Batch { .. } => "batch",
        }
    }

    pub fn is_batch(&self) -> bool {
        matches!(self, ExecutionRequest::Batch { .. })
    }
}

/// Classifies merged request parameters
#[derive(Clone)]
pub struct RequestClassifier {
    query_provider: Arc<dyn PersistedQueryProvider>,
}

impl RequestClassifier {
    pub fn new(query_provider: Arc<dyn PersistedQueryProvider>) -> Self {
        Self { query_provider }
    }

    /// Classify merged parameters into an execution request
    ///
    /// Batch detection runs first, then single detection, then the empty
    /// fallback. Only persisted query provider failures are returned as errors.
    pub fn classify(&self, params: &Params) -> Result<ExecutionRequest> {
        if let Some(queries) = Self::detect_batch(params) {
            tracing::debug!(queries = queries.len(), "Classified GraphQL batch request");
            return Ok(ExecutionRequest::Batch { queries });
        }

        if let Some(single) = self.detect_single(params)? {
            tracing::debug!(persisted = single.persisted, "Classified GraphQL single request");
            return Ok(ExecutionRequest::Single(single));
        }

        tracing::debug!("No GraphQL query found, falling back to empty request");
        Ok(ExecutionRequest::Single(SingleRequest::empty()))
    }

    /// Turn one raw batch entry into a single request
    ///
    /// Entries that are not mappings, or carry no query, yield the empty request.
    pub fn resolve_entry(&self, entry: &Value) -> Result<SingleRequest> {
        let Some(params) = entry.as_map() else {
            return Ok(SingleRequest::empty());
        };
        Ok(self.detect_single(params)?.unwrap_or_default())
    }

    /// Numeric keys must be exactly `0..n`
    fn detect_batch(params: &Params) -> Option<Vec<Value>> {
        let mut indexed = BTreeMap::new();
        for (key, value) in params {
            if !is_numeric_key(key) {
                continue;
            }
            // Non-canonical forms ("01", "-1") are numeric but never a valid index
            let index = key.parse::<usize>().ok().filter(|i| i.to_string() == *key)?;
            indexed.insert(index, value);
        }

        if indexed.is_empty() {
            return None;
        }

        let contiguous = indexed.keys().enumerate().all(|(position, index)| position == *index);
        if !contiguous {
            tracing::trace!("Numeric request keys are not contiguous, not a batch");
            return None;
        }

        Some(indexed.into_values().cloned().collect())
    }

    fn detect_single(&self, params: &Params) -> Result<Option<SingleRequest>> {
        let literal = params.get("query").filter(|query| !query.is_empty());

        let (query, persisted) = match literal {
            // A non-string query still selects the single shape, with no text
            Some(query) => (query.as_str().unwrap_or_default().to_string(), false),
            None => match self.query_provider.lookup(params)? {
                Some(query) if !query.is_empty() => (query, true),
                _ => return Ok(None),
            },
        };

        let variables = params
            .get("variables")
            .and_then(Value::as_map)
            .cloned()
            .unwrap_or_default();

        Ok(Some(SingleRequest {
            query,
            variables,
            persisted,
        }))
    }
}

fn is_numeric_key(key: &str) -> bool {
    let digits = key.strip_prefix('-').unwrap_or(key);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}
