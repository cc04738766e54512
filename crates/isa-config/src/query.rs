//! Query engine configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct QueryConfig {
    /// Fail when a factor constraint names a factor no sample carries,
    /// instead of treating the constraint as matching nothing.
    #[serde(default)]
    pub strict_factors: bool,
}
