//! Locating ISA-Tab files in a source directory.

use std::path::{Path, PathBuf};

use globset::{Glob, GlobMatcher};
use isa_config::TablesConfig;

use crate::error::TableError;

/// Files found in a source directory, each list in lexical order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableFiles {
    pub investigations: Vec<PathBuf>,
    pub studies: Vec<PathBuf>,
    pub assays: Vec<PathBuf>,
}

fn matcher(pattern: &str) -> Result<GlobMatcher, TableError> {
    Glob::new(pattern)
        .map(|glob| glob.compile_matcher())
        .map_err(|source| TableError::Pattern {
            pattern: pattern.to_string(),
            source,
        })
}

/// List the investigation, study, and assay files directly inside `dir`.
///
/// File names are matched against the configured globs in that order; a
/// file lands in the first list whose pattern it matches.
///
/// # Errors
///
/// Returns `TableError::Pattern` for an invalid glob and `TableError::Read`
/// when the directory cannot be listed.
pub fn discover(dir: &Path, config: &TablesConfig) -> Result<TableFiles, TableError> {
    let investigation = matcher(&config.investigation_glob)?;
    let study = matcher(&config.study_glob)?;
    let assay = matcher(&config.assay_glob)?;

    let read_error = |source| TableError::Read {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = TableFiles::default();
    for entry in std::fs::read_dir(dir).map_err(read_error)? {
        let entry = entry.map_err(read_error)?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
            continue;
        };
        if investigation.is_match(name) {
            files.investigations.push(path);
        } else if study.is_match(name) {
            files.studies.push(path);
        } else if assay.is_match(name) {
            files.assays.push(path);
        }
    }

    files.investigations.sort();
    files.studies.sort();
    files.assays.sort();

    tracing::debug!(
        dir = %dir.display(),
        investigations = files.investigations.len(),
        studies = files.studies.len(),
        assays = files.assays.len(),
        "discovered ISA-Tab files"
    );
    Ok(files)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn touch(dir: &Path, name: &str) {
        std::fs::write(dir.join(name), "").expect("write fixture");
    }

    #[test]
    fn sorts_files_into_roles() {
        let dir = tempfile::tempdir().expect("tempdir");
        for name in ["i_investigation.txt", "s_study.txt", "a_b.txt", "a_a.txt", "README.md"] {
            touch(dir.path(), name);
        }
        std::fs::create_dir(dir.path().join("a_directory")).expect("mkdir");

        let files = discover(dir.path(), &TablesConfig::default()).expect("discover");
        let names = |paths: &[PathBuf]| {
            paths
                .iter()
                .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
        };
        assert_eq!(names(&files.investigations), vec!["i_investigation.txt"]);
        assert_eq!(names(&files.studies), vec!["s_study.txt"]);
        assert_eq!(names(&files.assays), vec!["a_a.txt", "a_b.txt"]);
    }

    #[test]
    fn invalid_glob_is_reported() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = TablesConfig {
            assay_glob: "a_[".into(),
            ..TablesConfig::default()
        };
        assert!(matches!(
            discover(dir.path(), &config),
            Err(TableError::Pattern { .. })
        ));
    }

    #[test]
    fn missing_directory_is_a_read_error() {
        let result = discover(Path::new("/no/such/isa/dir"), &TablesConfig::default());
        assert!(matches!(result, Err(TableError::Read { .. })));
    }
}
