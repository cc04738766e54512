//! Response types returned as JSON by `isaslice` commands.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Data files resolved for one selected sample.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SampleDataFiles {
    pub sample_name: String,
    pub data_files: Vec<String>,
}

/// Response from `isaslice query`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct QueryResponse {
    /// The `query` object exactly as it was received.
    pub query: Value,
    pub results: Vec<SampleDataFiles>,
    /// Tables skipped while resolving data files.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// One factor name and the value a study group holds for it.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Hash)]
pub struct FactorLevel {
    pub name: String,
    pub value: String,
}

/// Samples sharing exactly one combination of varying factor values.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct StudyGroup {
    pub factors: Vec<FactorLevel>,
    pub samples: Vec<String>,
}

/// Response from `isaslice groups --sizes`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct StudyGroupSize {
    pub factors: Vec<FactorLevel>,
    pub size: usize,
}

/// Response from `isaslice sources`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SampleSourcesResponse {
    pub sample_name: String,
    pub sources: Vec<String>,
}
