//! Building the domain model from an ISA-Tab directory.
//!
//! Attribute columns (`Characteristics[...]`, `Factor Value[...]`,
//! `Material Type`) belong to the nearest node column on their left. A
//! following `Term Source REF` / `Term Accession Number` pair annotates the
//! value; a following `Unit` column (with its own annotation pair) is the
//! unit. Factor values always describe the sample on the row, whichever
//! table and node they appear under.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use isa_config::TablesConfig;
use isa_core::{
    Assay, Characteristic, DataFile, DataNode, FactorValue, Investigation, Sample, Source, Study,
    Term,
};

use crate::discover::discover;
use crate::error::TableError;
use crate::header::{HeaderLabel, NodeKind};
use crate::investigation::{AssayEntry, StudyEntry, load_investigation};
use crate::kind::TableKind;
use crate::table::{FsTableSource, Table, TableSource};

const SAMPLE_NAME: &str = "Sample Name";
const SOURCE_NAME: &str = "Source Name";

#[derive(Debug, Clone, PartialEq, Eq)]
enum AttributeKind {
    Characteristic(String),
    Factor(String),
}

#[derive(Debug, Clone)]
struct AttributeColumn {
    index: usize,
    owner: Option<NodeKind>,
    kind: AttributeKind,
    term_source: Option<usize>,
    accession: Option<usize>,
    unit: Option<usize>,
}

/// Attach every attribute column to its owning node and annotation columns.
fn attribute_layout(labels: &[HeaderLabel]) -> Vec<AttributeColumn> {
    let mut attributes: Vec<AttributeColumn> = Vec::new();
    let mut owner: Option<NodeKind> = None;
    let mut open: Option<usize> = None;
    let mut in_unit = false;

    for (index, label) in labels.iter().enumerate() {
        let kind = match label {
            HeaderLabel::Node(node) => {
                owner = Some(*node);
                open = None;
                continue;
            }
            HeaderLabel::Characteristics(category) => {
                AttributeKind::Characteristic(category.clone())
            }
            HeaderLabel::MaterialType => AttributeKind::Characteristic("Material Type".into()),
            HeaderLabel::FactorValue(name) => AttributeKind::Factor(name.clone()),
            HeaderLabel::Unit => {
                if let Some(attribute) = open.and_then(|i| attributes.get_mut(i)) {
                    attribute.unit.get_or_insert(index);
                    in_unit = true;
                }
                continue;
            }
            HeaderLabel::TermSourceRef => {
                if let Some(attribute) = open.and_then(|i| attributes.get_mut(i)) {
                    if !in_unit {
                        attribute.term_source.get_or_insert(index);
                    }
                }
                continue;
            }
            HeaderLabel::TermAccessionNumber => {
                if let Some(attribute) = open.and_then(|i| attributes.get_mut(i)) {
                    if !in_unit {
                        attribute.accession.get_or_insert(index);
                    }
                }
                continue;
            }
            _ => {
                open = None;
                continue;
            }
        };

        attributes.push(AttributeColumn {
            index,
            owner,
            kind,
            term_source: None,
            accession: None,
            unit: None,
        });
        open = Some(attributes.len() - 1);
        in_unit = false;
    }

    attributes
}

/// Read one attribute cell of a row, or `None` when the value is missing.
fn read_term(
    table: &Table,
    row: usize,
    attribute: &AttributeColumn,
    config: &TablesConfig,
) -> Option<(Term, Option<String>)> {
    let value = table.cell(row, attribute.index);
    if config.is_missing(value) {
        return None;
    }
    let annotation = |column: Option<usize>| {
        column
            .map(|c| table.cell(row, c))
            .filter(|cell| !config.is_missing(cell))
    };
    let term = Term::from_cells(
        value,
        annotation(attribute.term_source),
        annotation(attribute.accession),
    );
    let unit = annotation(attribute.unit).map(str::to_string);
    Some((term, unit))
}

/// Accumulates sources, samples, and assays of one study.
struct StudyBuilder<'c> {
    config: &'c TablesConfig,
    study: Study,
    source_index: HashMap<String, usize>,
    sample_index: HashMap<String, usize>,
    unlisted_index: HashMap<String, usize>,
}

impl<'c> StudyBuilder<'c> {
    fn new(entry: &StudyEntry, config: &'c TablesConfig) -> Self {
        Self {
            config,
            study: Study {
                identifier: entry.identifier.clone(),
                filename: entry.filename.clone(),
                ..Study::default()
            },
            source_index: HashMap::new(),
            sample_index: HashMap::new(),
            unlisted_index: HashMap::new(),
        }
    }

    fn sample_mut(&mut self, name: &str) -> Option<&mut Sample> {
        if let Some(&index) = self.sample_index.get(name) {
            return self.study.samples.get_mut(index);
        }
        let index = *self.unlisted_index.get(name)?;
        self.study.unlisted_samples.get_mut(index)
    }

    fn add_factor(&mut self, sample_name: &str, factor_value: FactorValue, table: &Path) {
        let Some(sample) = self.sample_mut(sample_name) else {
            return;
        };
        let conflicting = sample
            .factor_value(&factor_value.factor_name)
            .is_some_and(|existing| existing.value != factor_value.value);
        let factor_name = factor_value.factor_name.clone();
        if !sample.add_factor_value(factor_value) && conflicting {
            tracing::warn!(
                table = %table.display(),
                sample = sample_name,
                factor = %factor_name,
                "sample already has a different value for this factor; keeping the first"
            );
        }
    }

    fn read_study_table(&mut self, table: &Table) -> Result<(), TableError> {
        let source_col = table.require_column(SOURCE_NAME)?;
        let sample_col = table.require_column(SAMPLE_NAME)?;
        let attributes = attribute_layout(table.labels());

        for row in 0..table.row_count() {
            let source_name = table.cell(row, source_col);
            let source_name = (!self.config.is_missing(source_name)).then_some(source_name);

            if let Some(name) = source_name {
                if !self.source_index.contains_key(name) {
                    let mut source = Source::new(name);
                    for attribute in attributes
                        .iter()
                        .filter(|a| a.owner == Some(NodeKind::Source))
                    {
                        let AttributeKind::Characteristic(category) = &attribute.kind else {
                            continue;
                        };
                        if let Some((value, unit)) = read_term(table, row, attribute, self.config) {
                            source.characteristics.push(Characteristic {
                                category: category.clone(),
                                value,
                                unit,
                            });
                        }
                    }
                    self.source_index
                        .insert(name.to_string(), self.study.sources.len());
                    self.study.sources.push(source);
                }
            }

            let sample_name = table.cell(row, sample_col);
            if self.config.is_missing(sample_name) {
                continue;
            }
            if !self.sample_index.contains_key(sample_name) {
                self.sample_index
                    .insert(sample_name.to_string(), self.study.samples.len());
                self.study.samples.push(Sample::new(sample_name));
            }
            if let Some(name) = source_name {
                if let Some(sample) = self.sample_mut(sample_name) {
                    sample.add_source(name);
                }
            }

            for attribute in &attributes {
                let Some((value, unit)) = read_term(table, row, attribute, self.config) else {
                    continue;
                };
                match &attribute.kind {
                    AttributeKind::Factor(factor_name) => self.add_factor(
                        sample_name,
                        FactorValue {
                            factor_name: factor_name.clone(),
                            value,
                            unit,
                        },
                        table.path(),
                    ),
                    AttributeKind::Characteristic(category)
                        if attribute.owner == Some(NodeKind::Sample) =>
                    {
                        if let Some(sample) = self.sample_mut(sample_name) {
                            sample.add_characteristic(Characteristic {
                                category: category.clone(),
                                value,
                                unit,
                            });
                        }
                    }
                    AttributeKind::Characteristic(_) => {}
                }
            }
        }
        Ok(())
    }

    fn read_assay_table(&mut self, entry: &AssayEntry, table: &Table) -> Result<(), TableError> {
        let sample_col = table.require_column(SAMPLE_NAME)?;
        let attributes = attribute_layout(table.labels());
        let data_columns: Vec<(usize, DataNode)> = table
            .labels()
            .iter()
            .enumerate()
            .filter_map(|(index, label)| match label {
                HeaderLabel::DataFile(node) => Some((index, *node)),
                _ => None,
            })
            .collect();

        let mut assay = Assay {
            filename: entry.filename.clone(),
            measurement_type: entry.measurement_type.clone(),
            technology_type: entry.technology_type.clone(),
            ..Assay::default()
        };
        let mut file_index: HashMap<String, usize> = HashMap::new();

        for row in 0..table.row_count() {
            let sample_name = table.cell(row, sample_col);
            let sample_name = (!self.config.is_missing(sample_name)).then_some(sample_name);

            if let Some(name) = sample_name {
                if !assay.samples.iter().any(|s| s == name) {
                    assay.samples.push(name.to_string());
                }
                if !self.sample_index.contains_key(name) && !self.unlisted_index.contains_key(name) {
                    tracing::warn!(
                        table = %table.path().display(),
                        sample = name,
                        "assay references a sample missing from the study table"
                    );
                    self.unlisted_index
                        .insert(name.to_string(), self.study.unlisted_samples.len());
                    self.study.unlisted_samples.push(Sample::new(name));
                }
                for attribute in &attributes {
                    let AttributeKind::Factor(factor_name) = &attribute.kind else {
                        continue;
                    };
                    if let Some((value, unit)) = read_term(table, row, attribute, self.config) {
                        self.add_factor(
                            name,
                            FactorValue {
                                factor_name: factor_name.clone(),
                                value,
                                unit,
                            },
                            table.path(),
                        );
                    }
                }
            }

            for &(column, label) in &data_columns {
                let filename = table.cell(row, column);
                if self.config.is_missing(filename) {
                    continue;
                }
                let index = *file_index.entry(filename.to_string()).or_insert_with(|| {
                    assay.data_files.push(DataFile {
                        filename: filename.to_string(),
                        label,
                        generated_from: Vec::new(),
                    });
                    assay.data_files.len() - 1
                });
                if let Some(name) = sample_name {
                    let file = &mut assay.data_files[index];
                    if !file.generated_from.iter().any(|s| s == name) {
                        file.generated_from.push(name.to_string());
                    }
                }
            }
        }

        tracing::debug!(
            assay = %assay.filename,
            samples = assay.samples.len(),
            data_files = assay.data_files.len(),
            "read assay table"
        );
        self.study.assays.push(assay);
        Ok(())
    }
}

fn load_expected(
    source: &dyn TableSource,
    path: &Path,
    expected: TableKind,
) -> Result<Table, TableError> {
    let table = source.load(path)?;
    // An assay table with sample names but no assay or data-node columns
    // still lists the assay's samples; it just yields no data files.
    if expected == TableKind::Assay
        && table.kind() == TableKind::Unrecognized
        && table.column_index(SAMPLE_NAME).is_some()
    {
        tracing::warn!(
            table = %path.display(),
            "assay table has no assay or data file columns; reading its samples only"
        );
        return Ok(table);
    }
    if table.kind() != expected {
        return Err(TableError::UnexpectedKind {
            path: path.to_path_buf(),
            expected,
            found: table.kind(),
        });
    }
    Ok(table)
}

/// Load the investigation in `dir` from the filesystem.
///
/// # Errors
///
/// Returns `TableError` when any referenced file is missing, unreadable, or
/// does not have the header signature of its role.
pub fn load_study(dir: &Path, config: &TablesConfig) -> Result<Investigation, TableError> {
    load_study_with(dir, config, &FsTableSource)
}

/// Load the investigation in `dir`, reading study and assay tables through
/// `source`.
///
/// # Errors
///
/// Returns `TableError` when any referenced file is missing, unreadable, or
/// does not have the header signature of its role.
pub fn load_study_with(
    dir: &Path,
    config: &TablesConfig,
    source: &dyn TableSource,
) -> Result<Investigation, TableError> {
    let files = discover(dir, config)?;
    let Some(investigation_path) = files.investigations.first() else {
        return Err(TableError::MissingInvestigation {
            dir: dir.to_path_buf(),
            pattern: config.investigation_glob.clone(),
        });
    };
    if files.investigations.len() > 1 {
        tracing::warn!(
            dir = %dir.display(),
            using = %investigation_path.display(),
            count = files.investigations.len(),
            "several investigation files found; using the first"
        );
    }

    let investigation_file = load_investigation(investigation_path)?;
    let mut investigation = Investigation {
        identifier: investigation_file.identifier.clone(),
        studies: Vec::with_capacity(investigation_file.studies.len()),
    };
    let mut referenced: HashSet<std::path::PathBuf> = HashSet::new();

    for entry in &investigation_file.studies {
        let study_path = dir.join(&entry.filename);
        let study_table = load_expected(source, &study_path, TableKind::Study)?;
        referenced.insert(study_path);

        let mut builder = StudyBuilder::new(entry, config);
        builder.read_study_table(&study_table)?;

        for assay_entry in &entry.assays {
            let assay_path = dir.join(&assay_entry.filename);
            let assay_table = load_expected(source, &assay_path, TableKind::Assay)?;
            referenced.insert(assay_path);
            builder.read_assay_table(assay_entry, &assay_table)?;
        }

        tracing::info!(
            study = %builder.study.identifier,
            sources = builder.study.sources.len(),
            samples = builder.study.samples.len(),
            assays = builder.study.assays.len(),
            "loaded study"
        );
        investigation.studies.push(builder.study);
    }

    for path in files.studies.iter().chain(&files.assays) {
        if !referenced.contains(path) {
            tracing::warn!(
                table = %path.display(),
                "table is not referenced by the investigation file"
            );
        }
    }

    Ok(investigation)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::table::parse_table;

    fn labels(headers: &[&str]) -> Vec<HeaderLabel> {
        headers.iter().map(|h| HeaderLabel::parse(h)).collect()
    }

    #[test]
    fn layout_attaches_annotation_and_unit_columns() {
        let layout = attribute_layout(&labels(&[
            "Source Name",
            "Characteristics[Organism]",
            "Term Source REF",
            "Term Accession Number",
            "Protocol REF",
            "Sample Name",
            "Factor Value[Dose]",
            "Unit",
            "Term Source REF",
            "Term Accession Number",
            "Comment[x]",
            "Term Source REF",
        ]));

        assert_eq!(layout.len(), 2);
        assert_eq!(layout[0].owner, Some(NodeKind::Source));
        assert_eq!(
            layout[0].kind,
            AttributeKind::Characteristic("Organism".into())
        );
        assert_eq!(layout[0].term_source, Some(2));
        assert_eq!(layout[0].accession, Some(3));

        assert_eq!(layout[1].owner, Some(NodeKind::Sample));
        assert_eq!(layout[1].kind, AttributeKind::Factor("Dose".into()));
        assert_eq!(layout[1].unit, Some(7));
        assert_eq!(layout[1].term_source, None);
        assert_eq!(layout[1].accession, None);
    }

    #[test]
    fn study_table_builds_sources_and_samples() {
        let table = parse_table(
            Path::new("s_study.txt"),
            "Source Name\tCharacteristics[Organism]\tTerm Source REF\tTerm Accession Number\tSample Name\tCharacteristics[Material Type]\tFactor Value[Dose]\tUnit\n\
             src1\tHomo sapiens\tNCBITAXON\t9606\ts1\tblood\t5\tmg\n\
             src2\tHomo sapiens\tNCBITAXON\t9606\ts1\tblood\t5\tmg\n\
             src2\tHomo sapiens\tNCBITAXON\t9606\ts2\t\t10\tmg\n"
                .as_bytes(),
        )
        .expect("parses");

        let config = TablesConfig::default();
        let entry = StudyEntry {
            identifier: "S1".into(),
            filename: "s_study.txt".into(),
            assays: vec![],
        };
        let mut builder = StudyBuilder::new(&entry, &config);
        builder.read_study_table(&table).expect("reads");
        let study = builder.study;

        assert_eq!(
            study.sources.iter().map(|s| s.name.as_str()).collect::<Vec<_>>(),
            vec!["src1", "src2"]
        );
        assert_eq!(
            study.sources[0]
                .characteristic("Organism")
                .map(|c| c.value.to_string()),
            Some("Homo sapiens (NCBITAXON:9606)".to_string())
        );

        let s1 = study.sample("s1").expect("s1");
        assert_eq!(s1.derives_from, vec!["src1", "src2"]);
        assert_eq!(
            s1.characteristic("Material Type").map(|c| c.value.text()),
            Some("blood")
        );
        let dose = s1.factor_value("Dose").expect("dose");
        assert_eq!(dose.value, Term::Scalar("5".into()));
        assert_eq!(dose.unit.as_deref(), Some("mg"));

        let s2 = study.sample("s2").expect("s2");
        assert!(s2.characteristic("Material Type").is_none());
        assert_eq!(s2.factor_values.len(), 1);
    }
}
