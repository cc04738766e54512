//! Study-design summaries.
//!
//! A summary is one flat [`Record`] per sample: identity fields first
//! (`sample_name`, and `source_name` where sources are involved), then one
//! field per factor name or characteristic category. Fields whose value is
//! the same for every sample that has them are dropped, so what remains
//! describes how samples differ. Grouping the remaining factor fields
//! yields the study groups.

use std::collections::{BTreeSet, HashMap, HashSet};

use isa_config::TablesConfig;
use isa_core::responses::{FactorLevel, StudyGroup, StudyGroupSize};
use isa_core::{CoreError, DataFile, Investigation, Record, Sample, Study};

use crate::error::QueryError;

pub const SAMPLE_NAME_KEY: &str = "sample_name";
pub const SOURCE_NAME_KEY: &str = "source_name";

const IDENTITY_KEYS: [&str; 2] = [SAMPLE_NAME_KEY, SOURCE_NAME_KEY];

/// Which fields a summary is built from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SummaryKind {
    #[default]
    Factors,
    Characteristics,
    /// Factors and source characteristics together.
    Variables,
}

fn is_identity(key: &str) -> bool {
    IDENTITY_KEYS.contains(&key)
}

fn source_names(sample: &Sample) -> String {
    sample.derives_from.join(";")
}

fn insert_factors(record: &mut Record, sample: &Sample) {
    for factor_value in &sample.factor_values {
        if !factor_value.value.is_empty() {
            record.insert(factor_value.factor_name.as_str(), factor_value.value.text());
        }
    }
}

/// Source characteristics of a sample. With several sources, the last
/// source listing a category sets its value.
fn insert_source_characteristics(record: &mut Record, study: &Study, sample: &Sample) {
    for source in study.sources_of(sample) {
        for characteristic in &source.characteristics {
            if !characteristic.value.is_empty() {
                record.insert(characteristic.category.as_str(), characteristic.value.text());
            }
        }
    }
}

/// Drop every non-identity field holding a single distinct value across the
/// records that have it. Absent fields do not count as a value.
pub fn drop_constant_columns(records: &mut [Record]) {
    let mut distinct: HashMap<&str, HashSet<&str>> = HashMap::new();
    for record in records.iter() {
        for (key, value) in record.iter() {
            if !is_identity(key) {
                distinct.entry(key).or_default().insert(value);
            }
        }
    }
    let constant: Vec<String> = distinct
        .into_iter()
        .filter(|(_, values)| values.len() == 1)
        .map(|(key, _)| key.to_string())
        .collect();

    tracing::debug!(dropped = ?constant, "dropping constant summary columns");
    for record in records.iter_mut() {
        for key in &constant {
            record.remove(key);
        }
    }
}

/// Per-sample factor values with constant factors removed.
#[must_use]
pub fn summarize_factors<'a>(samples: impl IntoIterator<Item = &'a Sample>) -> Vec<Record> {
    let mut records: Vec<Record> = samples
        .into_iter()
        .map(|sample| {
            let mut record = Record::new();
            record.insert(SAMPLE_NAME_KEY, sample.name.as_str());
            insert_factors(&mut record, sample);
            record
        })
        .collect();
    drop_constant_columns(&mut records);
    records
}

/// Per-sample source characteristics with constant categories removed.
#[must_use]
pub fn summarize_characteristics<'a>(
    samples: impl IntoIterator<Item = (&'a Study, &'a Sample)>,
) -> Vec<Record> {
    let mut records: Vec<Record> = samples
        .into_iter()
        .map(|(study, sample)| {
            let mut record = Record::new();
            record.insert(SAMPLE_NAME_KEY, sample.name.as_str());
            record.insert(SOURCE_NAME_KEY, source_names(sample));
            insert_source_characteristics(&mut record, study, sample);
            record
        })
        .collect();
    drop_constant_columns(&mut records);
    records
}

/// Per-sample factor values and source characteristics together.
#[must_use]
pub fn summarize_variables<'a>(
    samples: impl IntoIterator<Item = (&'a Study, &'a Sample)>,
) -> Vec<Record> {
    let mut records: Vec<Record> = samples
        .into_iter()
        .map(|(study, sample)| {
            let mut record = Record::new();
            record.insert(SAMPLE_NAME_KEY, sample.name.as_str());
            record.insert(SOURCE_NAME_KEY, source_names(sample));
            insert_factors(&mut record, sample);
            insert_source_characteristics(&mut record, study, sample);
            record
        })
        .collect();
    drop_constant_columns(&mut records);
    records
}

/// Summary of every sample in the investigation.
#[must_use]
pub fn summarize(investigation: &Investigation, kind: SummaryKind) -> Vec<Record> {
    match kind {
        SummaryKind::Factors => summarize_factors(investigation.samples()),
        SummaryKind::Characteristics => {
            summarize_characteristics(investigation.samples_with_study())
        }
        SummaryKind::Variables => summarize_variables(investigation.samples_with_study()),
    }
}

/// Non-identity keys in the order they are first seen across `records`.
fn observed_keys(records: &[Record]) -> Vec<&str> {
    let mut seen = HashSet::new();
    records
        .iter()
        .flat_map(Record::keys)
        .filter(|key| !is_identity(key) && seen.insert(*key))
        .collect()
}

/// Group sample names by their remaining non-identity fields.
///
/// Every record lands in exactly one group. Groups appear in the order their
/// first member appears; a record lacking a field simply leaves it out of
/// its group key.
#[must_use]
pub fn group_study_groups(records: &[Record]) -> Vec<StudyGroup> {
    let keys = observed_keys(records);
    let mut groups: Vec<StudyGroup> = Vec::new();
    let mut index: HashMap<Vec<FactorLevel>, usize> = HashMap::new();

    for record in records {
        let factors: Vec<FactorLevel> = keys
            .iter()
            .filter_map(|key| {
                record.get(key).map(|value| FactorLevel {
                    name: (*key).to_string(),
                    value: value.to_string(),
                })
            })
            .collect();
        let member = record.get(SAMPLE_NAME_KEY).unwrap_or_default().to_string();
        match index.get(&factors) {
            Some(&position) => groups[position].samples.push(member),
            None => {
                index.insert(factors.clone(), groups.len());
                groups.push(StudyGroup {
                    factors,
                    samples: vec![member],
                });
            }
        }
    }
    groups
}

#[must_use]
pub fn study_group_sizes(groups: &[StudyGroup]) -> Vec<StudyGroupSize> {
    groups
        .iter()
        .map(|group| StudyGroupSize {
            factors: group.factors.clone(),
            size: group.samples.len(),
        })
        .collect()
}

/// Every factor name used by any sample, sorted.
#[must_use]
pub fn factor_names(investigation: &Investigation) -> Vec<String> {
    investigation
        .samples()
        .flat_map(|sample| &sample.factor_values)
        .map(|factor_value| factor_value.factor_name.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Every value recorded for one factor, sorted, without missing markers.
#[must_use]
pub fn factor_values(
    investigation: &Investigation,
    factor_name: &str,
    config: &TablesConfig,
) -> Vec<String> {
    investigation
        .samples()
        .filter_map(|sample| sample.factor_value(factor_name))
        .map(|factor_value| factor_value.value.text())
        .filter(|value| !config.is_missing(value))
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

fn not_found(name: &str) -> QueryError {
    QueryError::Core(CoreError::NotFound {
        entity_type: "sample".to_string(),
        name: name.to_string(),
    })
}

/// Names of the sources a sample derives from, across every study that
/// holds a sample of that name.
///
/// # Errors
///
/// Returns `CoreError::NotFound` when no study has the sample.
pub fn sources_for_sample(
    investigation: &Investigation,
    sample_name: &str,
) -> Result<Vec<String>, QueryError> {
    let mut found = false;
    let mut sources = Vec::new();
    for sample in investigation.samples().filter(|s| s.name == sample_name) {
        found = true;
        sources.extend(sample.derives_from.iter().cloned());
    }
    if !found {
        return Err(not_found(sample_name));
    }
    Ok(sources)
}

/// Data files generated from a sample, in assay order.
///
/// # Errors
///
/// Returns `CoreError::NotFound` when the sample is in no study and no assay.
pub fn data_files_for_sample(
    investigation: &Investigation,
    sample_name: &str,
) -> Result<Vec<DataFile>, QueryError> {
    let known = investigation.find_sample(sample_name).is_some()
        || investigation
            .assays()
            .any(|(_, assay)| assay.samples.iter().any(|name| name == sample_name));
    if !known {
        return Err(not_found(sample_name));
    }
    Ok(investigation
        .assays()
        .flat_map(|(_, assay)| &assay.data_files)
        .filter(|file| file.generated_from.iter().any(|name| name == sample_name))
        .cloned()
        .collect())
}

/// Distinct combinations of factor values present in the investigation,
/// constant factors included, in first-seen order.
#[must_use]
pub fn distinct_factor_combinations(investigation: &Investigation) -> Vec<Vec<FactorLevel>> {
    let mut seen_names = HashSet::new();
    let names: Vec<&str> = investigation
        .samples()
        .flat_map(|sample| &sample.factor_values)
        .map(|factor_value| factor_value.factor_name.as_str())
        .filter(|name| seen_names.insert(*name))
        .collect();

    let mut seen = HashSet::new();
    investigation
        .samples()
        .map(|sample| {
            names
                .iter()
                .filter_map(|name| {
                    sample.factor_value(name).map(|factor_value| FactorLevel {
                        name: (*name).to_string(),
                        value: factor_value.value.text().to_string(),
                    })
                })
                .collect::<Vec<_>>()
        })
        .filter(|combination| !combination.is_empty() && seen.insert(combination.clone()))
        .collect()
}
