//! Persisted query lookup
//!
//! When a request carries no literal `query`, the query text may still be
//! resolved server-side from the request parameters (a query id, a hash).

use crate::core::value::Params;
use anyhow::Result;
use std::collections::HashMap;
use std::sync::Arc;

/// Resolves query text from request parameters
pub trait PersistedQueryProvider: Send + Sync {
    /// Look up the query text for the given parameters
    ///
    /// `Ok(None)` means this provider does not know the query.
    fn lookup(&self, params: &Params) -> Result<Option<String>>;
}

/// Provider that never resolves anything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoQueryProvider;

impl PersistedQueryProvider for NoQueryProvider {
    fn lookup(&self, _params: &Params) -> Result<Option<String>> {
        Ok(None)
    }
}

/// Provider serving a fixed set of queries keyed by the `queryId` parameter
#[derive(Debug, Clone, Default)]
pub struct InMemoryQueryProvider {
    queries: HashMap<String, String>,
}

impl InMemoryQueryProvider {
    pub const PARAM: &'static str = "queryId";

    pub fn new(queries: HashMap<String, String>) -> Self {
        Self { queries }
    }

    pub fn insert(&mut self, id: impl Into<String>, query: impl Into<String>) {
        self.queries.insert(id.into(), query.into());
    }
}

impl PersistedQueryProvider for InMemoryQueryProvider {
    fn lookup(&self, params: &Params) -> Result<Option<String>> {
        Ok(params
            .get(Self::PARAM)
            .and_then(|id| id.as_str())
            .and_then(|id| self.queries.get(id))
            .cloned())
    }
}

/// Provider asking a list of providers in order
///
/// The first provider to resolve a query wins; the first failure aborts the
/// lookup.
#[derive(Clone, Default)]
pub struct ChainQueryProvider {
    providers: Vec<Arc<dyn PersistedQueryProvider>>,
}

impl ChainQueryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_provider(mut self, provider: impl PersistedQueryProvider + 'static) -> Self {
        self.providers.push(Arc::new(provider));
        self
    }

    pub fn push(&mut self, provider: Arc<dyn PersistedQueryProvider>) {
        self.providers.push(provider);
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl PersistedQueryProvider for ChainQueryProvider {
    fn lookup(&self, params: &Params) -> Result<Option<String>> {
        for provider in &self.providers {
            if let Some(query) = provider.lookup(params)? {
                return Ok(Some(query));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::value::Value;

    struct FailingProvider;

    impl PersistedQueryProvider for FailingProvider {
        fn lookup(&self, _params: &Params) -> Result<Option<String>> {
            anyhow::bail!("query store unavailable")
        }
    }

    fn params_with_id(id: &str) -> Params {
        let mut params = Params::new();
        params.insert("queryId".to_string(), Value::from(id));
        params
    }

    #[test]
    fn test_in_memory_lookup() {
        let mut provider = InMemoryQueryProvider::default();
        provider.insert("articles:1", "{ articles { title } }");

        assert_eq!(
            provider.lookup(&params_with_id("articles:1")).unwrap().as_deref(),
            Some("{ articles { title } }")
        );
        assert_eq!(provider.lookup(&params_with_id("missing")).unwrap(), None);
        assert_eq!(provider.lookup(&Params::new()).unwrap(), None);
    }

    #[test]
    fn test_chain_first_match_wins() {
        let mut first = InMemoryQueryProvider::default();
        first.insert("a", "{ first }");
        let mut second = InMemoryQueryProvider::default();
        second.insert("a", "{ second }");
        second.insert("b", "{ only_second }");

        let chain = ChainQueryProvider::new()
            .with_provider(NoQueryProvider)
            .with_provider(first)
            .with_provider(second);

        assert_eq!(chain.len(), 3);
        assert_eq!(chain.lookup(&params_with_id("a")).unwrap().as_deref(), Some("{ first }"));
        assert_eq!(
            chain.lookup(&params_with_id("b")).unwrap().as_deref(),
            Some("{ only_second }")
        );
    }

    #[test]
    fn test_chain_propagates_failure() {
        let chain = ChainQueryProvider::new()
            .with_provider(NoQueryProvider)
            .with_provider(FailingProvider);

        let err = chain.lookup(&params_with_id("a")).unwrap_err();
        assert_eq!(err.to_string(), "query store unavailable");
    }
}
