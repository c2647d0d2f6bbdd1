use crate::types::{Hierarchy, ScoredResult};

/// Ranks the nodes of a hierarchy against a free-text query.
///
/// Implementations are pure: the same hierarchy and query always produce the
/// same results, and the hierarchy is only read.
pub trait HierarchySearch: Send + Sync {
    fn search<'a>(&self, hierarchy: &'a Hierarchy, query: &str) -> Vec<ScoredResult<'a>>;
}
