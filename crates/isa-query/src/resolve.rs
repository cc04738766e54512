//! Data-file resolution.
//!
//! For every requested sample, collect the file names found under data-node
//! columns on assay-table rows whose `Sample Name` is that sample. Hits are
//! ordered by table, then row, then data-node vocabulary order. Files named
//! by several tables are reported once per table.

use std::collections::HashMap;
use std::path::Path;

use isa_config::TablesConfig;
use isa_core::DataNode;
use isa_core::responses::SampleDataFiles;
use isa_tab::{Table, TableSource};

const SAMPLE_NAME: &str = "Sample Name";

/// Data files per requested sample, plus the tables that had to be skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// One entry per distinct requested sample, in request order.
    pub files: Vec<SampleDataFiles>,
    pub warnings: Vec<String>,
}

struct Resolver<'c> {
    config: &'c TablesConfig,
    order: Vec<String>,
    hits: HashMap<String, Vec<String>>,
    warnings: Vec<String>,
}

impl<'c> Resolver<'c> {
    fn new<S: AsRef<str>>(sample_names: &[S], config: &'c TablesConfig) -> Self {
        let mut order = Vec::with_capacity(sample_names.len());
        let mut hits: HashMap<String, Vec<String>> = HashMap::with_capacity(sample_names.len());
        for name in sample_names {
            let name = name.as_ref();
            if !hits.contains_key(name) {
                hits.insert(name.to_string(), Vec::new());
                order.push(name.to_string());
            }
        }
        Self {
            config,
            order,
            hits,
            warnings: Vec::new(),
        }
    }

    fn skip(&mut self, path: &Path, reason: &str) {
        tracing::warn!(table = %path.display(), reason, "skipping table while resolving data files");
        self.warnings
            .push(format!("skipped {}: {reason}", path.display()));
    }

    fn scan(&mut self, table: &Table) {
        let Some(sample_column) = table.column_index(SAMPLE_NAME) else {
            self.skip(table.path(), "no 'Sample Name' column");
            return;
        };
        let data_columns: Vec<usize> = DataNode::ALL
            .iter()
            .flat_map(|node| table.columns_named(node.label()))
            .collect();
        if data_columns.is_empty() {
            tracing::debug!(table = %table.path().display(), "table has no data-node columns");
            return;
        }

        let mut found = 0_usize;
        for row in 0..table.row_count() {
            let Some(files) = self.hits.get_mut(table.cell(row, sample_column)) else {
                continue;
            };
            for &column in &data_columns {
                let value = table.cell(row, column);
                if !self.config.is_missing(value) {
                    files.push(value.to_string());
                    found += 1;
                }
            }
        }
        tracing::debug!(table = %table.path().display(), found, "scanned assay table");
    }

    fn finish(mut self) -> Resolution {
        let files = self
            .order
            .into_iter()
            .map(|sample_name| {
                let data_files = self.hits.remove(&sample_name).unwrap_or_default();
                SampleDataFiles {
                    sample_name,
                    data_files,
                }
            })
            .collect();
        Resolution {
            files,
            warnings: self.warnings,
        }
    }
}

/// Resolve data files against tables that are already loaded.
///
/// A table without a `Sample Name` column is skipped with a warning.
#[must_use]
pub fn resolve_data_files<S: AsRef<str>>(
    sample_names: &[S],
    tables: &[Table],
    config: &TablesConfig,
) -> Resolution {
    let mut resolver = Resolver::new(sample_names, config);
    for table in tables {
        resolver.scan(table);
    }
    resolver.finish()
}

/// Resolve data files, loading each table through `source`.
///
/// A table that cannot be loaded is skipped with a warning; resolution
/// continues with the remaining tables.
#[must_use]
pub fn resolve_from_paths<S: AsRef<str>, P: AsRef<Path>>(
    sample_names: &[S],
    paths: &[P],
    source: &dyn TableSource,
    config: &TablesConfig,
) -> Resolution {
    let mut resolver = Resolver::new(sample_names, config);
    for path in paths {
        let path = path.as_ref();
        match source.load(path) {
            Ok(table) => resolver.scan(&table),
            Err(error) => resolver.skip(path, &error.to_string()),
        }
    }
    resolver.finish()
}
