//! Assay and sample selection.
//!
//! Selection runs in three passes over the loaded investigation:
//!
//! 1. Assays are kept when their measurement and technology types match the
//!    query. An unset type places no constraint.
//! 2. The samples of the kept assays form the candidate pool, which is then
//!    narrowed to the requested material type.
//! 3. Each factor constraint intersects the pool with the samples carrying
//!    that factor value. A sample must satisfy every constraint.

use std::collections::HashSet;

use isa_config::QueryConfig;
use isa_core::{Assay, FactorConstraint, Investigation, QuerySpecification, Sample, Study};

use crate::error::QueryError;

const MATERIAL_TYPE: &str = "Material Type";

// ── Types ──────────────────────────────────────────────────────────

/// Options for [`select`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectOptions {
    /// Fail with [`QueryError::AmbiguousFactor`] instead of matching nothing
    /// when a constraint names an unknown factor.
    pub strict_factors: bool,
}

impl From<&QueryConfig> for SelectOptions {
    fn from(config: &QueryConfig) -> Self {
        Self {
            strict_factors: config.strict_factors,
        }
    }
}

/// Samples satisfying a query, distinct by name, in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct Selection<'a> {
    pub samples: Vec<&'a Sample>,
    /// Constraints that could never match, described for the response.
    pub warnings: Vec<String>,
}

impl Selection<'_> {
    #[must_use]
    pub fn sample_names(&self) -> Vec<String> {
        self.samples.iter().map(|sample| sample.name.clone()).collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

// ── Predicates ─────────────────────────────────────────────────────

/// Whether an assay passes the measurement and technology constraints.
#[must_use]
pub fn assay_matches(assay: &Assay, query: &QuerySpecification) -> bool {
    let measurement = query
        .measurement_type
        .as_deref()
        .is_none_or(|wanted| assay.measurement_type.matches(wanted));
    let technology = query
        .technology_type
        .as_deref()
        .is_none_or(|wanted| assay.technology_type.matches(wanted));
    measurement && technology
}

/// Whether a sample is of the wanted material.
///
/// The sample's own `Material Type` characteristic decides when present;
/// otherwise any source it derives from may carry it.
#[must_use]
pub fn material_matches(study: &Study, sample: &Sample, wanted: &str) -> bool {
    match sample.characteristic(MATERIAL_TYPE) {
        Some(characteristic) => characteristic.value.matches(wanted),
        None => study.sources_of(sample).any(|source| {
            source
                .characteristic(MATERIAL_TYPE)
                .is_some_and(|characteristic| characteristic.value.matches(wanted))
        }),
    }
}

#[must_use]
pub fn factor_matches(sample: &Sample, constraint: &FactorConstraint) -> bool {
    sample
        .factor_value(&constraint.factor_name)
        .is_some_and(|factor_value| factor_value.value.matches(&constraint.factor_value))
}

// ── Selection ──────────────────────────────────────────────────────

/// Samples of every assay passing the type constraints.
///
/// Samples used by several matching assays appear once per assay. Assay
/// samples missing from the study table are taken from the study's
/// unlisted samples.
#[must_use]
pub fn candidate_pool<'a>(
    investigation: &'a Investigation,
    query: &QuerySpecification,
) -> Vec<(&'a Study, &'a Sample)> {
    investigation
        .assays()
        .filter(|(_, assay)| assay_matches(assay, query))
        .flat_map(|(study, assay)| {
            assay
                .samples
                .iter()
                .filter_map(move |name| {
                    study
                        .sample(name)
                        .or_else(|| study.unlisted_sample(name))
                        .map(|sample| (study, sample))
                })
        })
        .collect()
}

fn known_factor_names(investigation: &Investigation) -> HashSet<&str> {
    investigation
        .samples()
        .flat_map(|sample| sample.factor_values.iter())
        .map(|factor_value| factor_value.factor_name.as_str())
        .collect()
}

/// Select the samples satisfying every active constraint of `query`.
///
/// An empty selection is a successful outcome.
///
/// # Errors
///
/// Returns [`QueryError::AmbiguousFactor`] in strict mode when a constraint
/// names a factor that no sample in the investigation carries.
pub fn select<'a>(
    investigation: &'a Investigation,
    query: &QuerySpecification,
    options: SelectOptions,
) -> Result<Selection<'a>, QueryError> {
    let mut warnings = Vec::new();
    let known = known_factor_names(investigation);
    for constraint in &query.factor_selection {
        if known.contains(constraint.factor_name.as_str()) {
            continue;
        }
        if options.strict_factors {
            return Err(QueryError::AmbiguousFactor {
                factor_name: constraint.factor_name.clone(),
            });
        }
        tracing::warn!(
            factor = %constraint.factor_name,
            "factor is not defined on any sample; the constraint matches nothing"
        );
        warnings.push(format!(
            "factor '{}' is not defined on any sample; no sample can match",
            constraint.factor_name
        ));
    }

    let pool = candidate_pool(investigation, query);
    let pool_size = pool.len();

    let mut seen = HashSet::new();
    let candidates: Vec<(&Study, &Sample)> = pool
        .into_iter()
        .filter(|(_, sample)| seen.insert(sample.name.as_str()))
        .filter(|(study, sample)| {
            query
                .material_type
                .as_deref()
                .is_none_or(|wanted| material_matches(study, sample, wanted))
        })
        .collect();

    let selected = query
        .factor_selection
        .iter()
        .fold(candidates, |mut remaining, constraint| {
            remaining.retain(|(_, sample)| factor_matches(sample, constraint));
            remaining
        });

    for (study, sample) in &selected {
        if study.sample(&sample.name).is_none() {
            warnings.push(format!(
                "sample '{}' appears in an assay table of study '{}' but not in its study table",
                sample.name, study.identifier
            ));
        }
    }

    tracing::info!(
        pool = pool_size,
        selected = selected.len(),
        constraints = query.factor_selection.len(),
        "selected samples"
    );

    Ok(Selection {
        samples: selected.into_iter().map(|(_, sample)| sample).collect(),
        warnings,
    })
}
