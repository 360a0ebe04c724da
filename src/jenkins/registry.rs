//! In-memory build registry
//!
//! Holds every triggered build for the lifetime of the process. Ids are
//! allocated as `len + 1` under the same write guard that stores the record,
//! so concurrent triggers never share an id.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Identifier handed out to a triggered build. The first build is 1.
pub type BuildId = u64;

/// Submitted build parameters: each key maps to one or more values.
///
/// Keys are kept sorted so the rendered form is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parameters(BTreeMap<String, Vec<String>>);

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `value` after any values already stored under `key`.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.entry(key.into()).or_default().push(value.into());
    }

    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.0.get(key).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Parameters
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Parameters::new();
        for (key, value) in iter {
            params.append(key, value);
        }
        params
    }
}

/// Renders as `map[key:[v1 v2] other:[v3]]`.
impl fmt::Display for Parameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("map[")?;
        for (i, (key, values)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}:[{}]", key, values.join(" "))?;
        }
        f.write_str("]")
    }
}

/// One triggered build. Never mutated once stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRecord {
    /// Job name taken from the trigger path
    pub job: String,
    /// Form values submitted with the trigger, empty for plain triggers
    pub parameters: Parameters,
}

impl BuildRecord {
    pub fn new(job: impl Into<String>, parameters: Parameters) -> Self {
        Self {
            job: job.into(),
            parameters,
        }
    }

    /// The console text served for this build.
    pub fn log(&self) -> String {
        format!("[{}] Running with args {}", self.job, self.parameters)
    }
}

/// Shared registry of triggered builds.
///
/// Cloning is cheap; all clones see the same records.
#[derive(Debug, Clone, Default)]
pub struct BuildRegistry {
    records: Arc<RwLock<HashMap<BuildId, BuildRecord>>>,
}

impl BuildRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a new build and return its id.
    pub async fn insert(&self, job: impl Into<String>, parameters: Parameters) -> BuildId {
        let mut records = self.records.write().await;

        let id = records.len() as BuildId + 1;
        let record = BuildRecord::new(job, parameters);

        tracing::debug!(id, job = %record.job, params = record.parameters.len(), "Build recorded");
        records.insert(id, record);

        id
    }

    /// Look up a build by id
    pub async fn get(&self, id: BuildId) -> Option<BuildRecord> {
        self.records.read().await.get(&id).cloned()
    }

    /// Number of builds recorded so far
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parameters_render_sorted_with_all_values() {
        let params: Parameters = [
            ("SOURCE_URL", "https://example.com/repo.git"),
            ("SOURCE_REVISION", "abc123"),
            ("SOURCE_URL", "mirror"),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            params.to_string(),
            "map[SOURCE_REVISION:[abc123] SOURCE_URL:[https://example.com/repo.git mirror]]"
        );
    }

    #[test]
    fn empty_parameters_render_as_empty_map() {
        assert_eq!(Parameters::new().to_string(), "map[]");
    }

    #[tokio::test]
    async fn ids_start_at_one_and_increase() {
        let registry = BuildRegistry::new();

        assert_eq!(registry.insert("demo", Parameters::new()).await, 1);
        assert_eq!(registry.insert("demo", Parameters::new()).await, 2);
        assert_eq!(registry.insert("other", Parameters::new()).await, 3);
        assert_eq!(registry.len().await, 3);
    }
}
