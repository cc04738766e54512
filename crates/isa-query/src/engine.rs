//! The query pipeline: load → select → resolve → assemble.
//!
//! The engine holds configuration and a table source, never study data:
//! every call loads its own snapshot of the source directory.

use std::path::Path;

use isa_config::IsaConfig;
use isa_core::responses::QueryResponse;
use isa_core::{Investigation, ParsedQuery};
use isa_tab::{FsTableSource, TableSource, discover, load_study_with};
use serde_json::Value;

use crate::assemble::assemble;
use crate::error::QueryError;
use crate::resolve::resolve_from_paths;
use crate::select::{SelectOptions, select};

pub struct QueryEngine {
    config: IsaConfig,
    source: Box<dyn TableSource>,
}

impl QueryEngine {
    /// An engine reading tables from the filesystem.
    #[must_use]
    pub fn new(config: IsaConfig) -> Self {
        Self::with_source(config, Box::new(FsTableSource))
    }

    #[must_use]
    pub fn with_source(config: IsaConfig, source: Box<dyn TableSource>) -> Self {
        Self { config, source }
    }

    #[must_use]
    pub const fn config(&self) -> &IsaConfig {
        &self.config
    }

    /// Load the investigation in `dir`.
    ///
    /// # Errors
    ///
    /// Returns `QueryError::Table` when any referenced table cannot be read.
    pub fn load(&self, dir: &Path) -> Result<Investigation, QueryError> {
        Ok(load_study_with(dir, &self.config.tables, self.source.as_ref())?)
    }

    /// Run a decoded query against the study in `dir`.
    ///
    /// # Errors
    ///
    /// Fails when the study cannot be loaded, or in strict mode when a
    /// factor constraint names an unknown factor. Assay tables that cannot
    /// be scanned for data files are reported as warnings instead.
    pub fn run(&self, dir: &Path, query: &ParsedQuery) -> Result<QueryResponse, QueryError> {
        let investigation = self.load(dir)?;
        let selection = select(
            &investigation,
            &query.spec,
            SelectOptions::from(&self.config.query),
        )?;
        let sample_names = selection.sample_names();

        let assay_tables = discover(dir, &self.config.tables)?.assays;
        tracing::debug!(
            samples = sample_names.len(),
            tables = assay_tables.len(),
            "resolving data files"
        );
        let resolution = resolve_from_paths(
            &sample_names,
            &assay_tables,
            self.source.as_ref(),
            &self.config.tables,
        );

        Ok(assemble(query, resolution, selection.warnings))
    }

    /// Decode a tool-parameters document and run its `query`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidQuery` (wrapped) when the document has no
    /// usable `query` object, otherwise any error from [`Self::run`].
    pub fn run_parameters(
        &self,
        dir: &Path,
        parameters: &Value,
    ) -> Result<QueryResponse, QueryError> {
        let query = ParsedQuery::from_parameters(parameters)?;
        self.run(dir, &query)
    }
}

impl std::fmt::Debug for QueryEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryEngine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
