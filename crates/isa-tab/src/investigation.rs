//! Investigation file parsing.
//!
//! The investigation file is a sequence of sections (`INVESTIGATION`,
//! `STUDY`, `STUDY ASSAYS`, ...). Each non-section row is a key followed by
//! one value per column. Only the rows needed to locate study and assay
//! tables and to type the assays are read.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use isa_core::Term;

use crate::error::TableError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssayEntry {
    pub filename: String,
    pub measurement_type: Term,
    pub technology_type: Term,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudyEntry {
    pub identifier: String,
    pub filename: String,
    pub assays: Vec<AssayEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvestigationFile {
    pub path: PathBuf,
    pub identifier: String,
    pub studies: Vec<StudyEntry>,
}

/// Raw `STUDY ASSAYS` rows of the study being read.
#[derive(Default)]
struct AssayRows {
    filenames: Vec<String>,
    measurement: Vec<String>,
    measurement_accession: Vec<String>,
    measurement_source: Vec<String>,
    technology: Vec<String>,
    technology_accession: Vec<String>,
    technology_source: Vec<String>,
}

fn pick(values: &[String], index: usize) -> Option<&str> {
    values.get(index).map(String::as_str)
}

impl AssayRows {
    fn into_entries(self) -> Vec<AssayEntry> {
        self.filenames
            .iter()
            .enumerate()
            .filter(|(_, filename)| !filename.is_empty())
            .map(|(index, filename)| AssayEntry {
                filename: filename.clone(),
                measurement_type: Term::from_cells(
                    pick(&self.measurement, index).unwrap_or_default(),
                    pick(&self.measurement_source, index),
                    pick(&self.measurement_accession, index),
                ),
                technology_type: Term::from_cells(
                    pick(&self.technology, index).unwrap_or_default(),
                    pick(&self.technology_source, index),
                    pick(&self.technology_accession, index),
                ),
            })
            .collect()
    }
}

fn is_section_header(key: &str, values: &[String]) -> bool {
    !key.is_empty()
        && values.iter().all(String::is_empty)
        && key
            .chars()
            .all(|c| c.is_ascii_uppercase() || c == ' ' || c == '_')
}

/// Parse an investigation file.
///
/// # Errors
///
/// Returns `TableError::Parse` for unreadable content and
/// `TableError::MalformedInvestigation` when no study declares a file name.
pub fn parse_investigation(path: &Path, reader: impl Read) -> Result<InvestigationFile, TableError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .comment(Some(b'#'))
        .from_reader(reader);

    let mut investigation = InvestigationFile {
        path: path.to_path_buf(),
        ..InvestigationFile::default()
    };
    let mut section = String::new();
    let mut current: Option<(StudyEntry, AssayRows)> = None;

    for record in csv_reader.records() {
        let record = record.map_err(|source| TableError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        let mut cells = record.iter().map(|cell| cell.trim().to_string());
        let Some(key) = cells.next() else {
            continue;
        };
        let key = key.trim_start_matches('\u{feff}').to_string();
        let values: Vec<String> = cells.collect();

        if is_section_header(&key, &values) {
            if key == "STUDY" {
                if let Some((mut study, rows)) = current.take() {
                    study.assays = rows.into_entries();
                    investigation.studies.push(study);
                }
                current = Some((StudyEntry::default(), AssayRows::default()));
            }
            section = key;
            continue;
        }

        let first = values.first().cloned().unwrap_or_default();
        match (section.as_str(), key.as_str()) {
            ("INVESTIGATION", "Investigation Identifier") => investigation.identifier = first,
            ("STUDY", "Study Identifier") => {
                if let Some((study, _)) = current.as_mut() {
                    study.identifier = first;
                }
            }
            ("STUDY", "Study File Name") => {
                if let Some((study, _)) = current.as_mut() {
                    study.filename = first;
                }
            }
            ("STUDY ASSAYS", _) => {
                if let Some((_, rows)) = current.as_mut() {
                    let slot = match key.as_str() {
                        "Study Assay File Name" => Some(&mut rows.filenames),
                        "Study Assay Measurement Type" => Some(&mut rows.measurement),
                        "Study Assay Measurement Type Term Accession Number" => {
                            Some(&mut rows.measurement_accession)
                        }
                        "Study Assay Measurement Type Term Source REF" => {
                            Some(&mut rows.measurement_source)
                        }
                        "Study Assay Technology Type" => Some(&mut rows.technology),
                        "Study Assay Technology Type Term Accession Number" => {
                            Some(&mut rows.technology_accession)
                        }
                        "Study Assay Technology Type Term Source REF" => {
                            Some(&mut rows.technology_source)
                        }
                        _ => None,
                    };
                    if let Some(slot) = slot {
                        *slot = values;
                    }
                }
            }
            _ => {}
        }
    }

    if let Some((mut study, rows)) = current.take() {
        study.assays = rows.into_entries();
        investigation.studies.push(study);
    }

    investigation.studies.retain(|study| {
        if study.filename.is_empty() {
            tracing::warn!(
                path = %path.display(),
                study = %study.identifier,
                "study section has no Study File Name; skipping"
            );
            return false;
        }
        true
    });

    if investigation.studies.is_empty() {
        return Err(TableError::MalformedInvestigation {
            path: path.to_path_buf(),
            reason: "no STUDY section declares a Study File Name".to_string(),
        });
    }

    Ok(investigation)
}

/// Load and parse an investigation file from disk.
///
/// # Errors
///
/// Returns `TableError::Read` when the file cannot be opened, otherwise any
/// error from [`parse_investigation`].
pub fn load_investigation(path: &Path) -> Result<InvestigationFile, TableError> {
    let file = File::open(path).map_err(|source| TableError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_investigation(path, file)
}

#[cfg(test)]
mod tests {
    use isa_core::OntologyAnnotation;
    use pretty_assertions::assert_eq;

    use super::*;

    const TWO_STUDIES: &str = "\
ONTOLOGY SOURCE REFERENCE
Term Source Name\tOBI
INVESTIGATION
Investigation Identifier\tINV-1
STUDY
Study Identifier\tMTBLS1
Study File Name\ts_first.txt
STUDY ASSAYS
Study Assay File Name\ta_ms.txt\ta_nmr.txt
Study Assay Measurement Type\tmetabolite profiling\tmetabolite profiling
Study Assay Measurement Type Term Accession Number\thttp://purl.obolibrary.org/obo/OBI_0000366\t
Study Assay Measurement Type Term Source REF\tOBI\t
Study Assay Technology Type\tmass spectrometry\tNMR spectroscopy
STUDY PROTOCOLS
Study Protocol Name\textraction
STUDY
Study Identifier\tMTBLS2
Study File Name\t\"s_second.txt\"
";

    fn parse(text: &str) -> Result<InvestigationFile, TableError> {
        parse_investigation(Path::new("i_investigation.txt"), text.as_bytes())
    }

    #[test]
    fn reads_studies_and_assays_in_order() {
        let investigation = parse(TWO_STUDIES).expect("parses");
        assert_eq!(investigation.identifier, "INV-1");
        assert_eq!(investigation.studies.len(), 2);

        let first = &investigation.studies[0];
        assert_eq!(first.identifier, "MTBLS1");
        assert_eq!(first.filename, "s_first.txt");
        assert_eq!(
            first.assays,
            vec![
                AssayEntry {
                    filename: "a_ms.txt".into(),
                    measurement_type: Term::Ontology(OntologyAnnotation {
                        term: "metabolite profiling".into(),
                        term_source: "OBI".into(),
                        term_accession: "http://purl.obolibrary.org/obo/OBI_0000366".into(),
                    }),
                    technology_type: Term::Scalar("mass spectrometry".into()),
                },
                AssayEntry {
                    filename: "a_nmr.txt".into(),
                    measurement_type: Term::Scalar("metabolite profiling".into()),
                    technology_type: Term::Scalar("NMR spectroscopy".into()),
                },
            ]
        );

        let second = &investigation.studies[1];
        assert_eq!(second.filename, "s_second.txt");
        assert!(second.assays.is_empty());
    }

    #[test]
    fn keys_outside_their_section_are_ignored() {
        let investigation = parse(
            "Study File Name\ts_orphan.txt\nSTUDY\nStudy File Name\ts_real.txt\n",
        )
        .expect("parses");
        assert_eq!(investigation.studies.len(), 1);
        assert_eq!(investigation.studies[0].filename, "s_real.txt");
    }

    #[test]
    fn investigation_without_study_file_is_malformed() {
        let error = parse("INVESTIGATION\nInvestigation Identifier\tX\n").unwrap_err();
        assert!(matches!(error, TableError::MalformedInvestigation { .. }));
    }
}
