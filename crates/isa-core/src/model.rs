//! ISA domain model.
//!
//! The model is a read-only snapshot built once per invocation from the
//! tables of one ISA-Tab directory. Samples refer to their sources by name;
//! [`Study::sources_of`] follows those links.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::data_node::DataNode;
use crate::term::Term;

/// A descriptive attribute of a source or sample.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Characteristic {
    pub category: String,
    pub value: Term,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

/// An experimental-variable assignment attached to one sample.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct FactorValue {
    pub factor_name: String,
    pub value: Term,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

/// Source material a sample derives from.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Source {
    pub name: String,
    pub characteristics: Vec<Characteristic>,
}

impl Source {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            characteristics: Vec::new(),
        }
    }

    #[must_use]
    pub fn characteristic(&self, category: &str) -> Option<&Characteristic> {
        self.characteristics
            .iter()
            .find(|characteristic| characteristic.category == category)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Sample {
    pub name: String,
    pub characteristics: Vec<Characteristic>,
    pub factor_values: Vec<FactorValue>,
    /// Names of the sources this sample derives from.
    pub derives_from: Vec<String>,
}

impl Sample {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn factor_value(&self, factor_name: &str) -> Option<&FactorValue> {
        self.factor_values
            .iter()
            .find(|fv| fv.factor_name == factor_name)
    }

    #[must_use]
    pub fn characteristic(&self, category: &str) -> Option<&Characteristic> {
        self.characteristics
            .iter()
            .find(|characteristic| characteristic.category == category)
    }

    /// Attach a factor value. Returns `false` and leaves the sample untouched
    /// when a value for the same factor name is already present.
    pub fn add_factor_value(&mut self, factor_value: FactorValue) -> bool {
        if self.factor_value(&factor_value.factor_name).is_some() {
            return false;
        }
        self.factor_values.push(factor_value);
        true
    }

    /// Attach a characteristic unless the category is already set.
    pub fn add_characteristic(&mut self, characteristic: Characteristic) -> bool {
        if self.characteristic(&characteristic.category).is_some() {
            return false;
        }
        self.characteristics.push(characteristic);
        true
    }

    /// Record a derivation link, ignoring repeats.
    pub fn add_source(&mut self, source_name: &str) {
        if !self.derives_from.iter().any(|name| name == source_name) {
            self.derives_from.push(source_name.to_string());
        }
    }
}

/// A file produced by an assay.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DataFile {
    pub filename: String,
    pub label: DataNode,
    /// Names of the samples on the rows this file appeared on.
    pub generated_from: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Assay {
    pub filename: String,
    pub measurement_type: Term,
    pub technology_type: Term,
    /// Names of the samples used by this assay, in table order.
    pub samples: Vec<String>,
    pub data_files: Vec<DataFile>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Study {
    pub identifier: String,
    pub filename: String,
    pub sources: Vec<Source>,
    pub samples: Vec<Sample>,
    pub assays: Vec<Assay>,
    /// Samples named by an assay table but missing from the study table.
    /// They carry only what the assay tables record about them.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unlisted_samples: Vec<Sample>,
}

impl Study {
    #[must_use]
    pub fn sample(&self, name: &str) -> Option<&Sample> {
        self.samples.iter().find(|sample| sample.name == name)
    }

    #[must_use]
    pub fn unlisted_sample(&self, name: &str) -> Option<&Sample> {
        self.unlisted_samples.iter().find(|sample| sample.name == name)
    }

    #[must_use]
    pub fn source(&self, name: &str) -> Option<&Source> {
        self.sources.iter().find(|source| source.name == name)
    }

    /// Sources the sample derives from, skipping dangling names.
    pub fn sources_of<'a>(&'a self, sample: &'a Sample) -> impl Iterator<Item = &'a Source> + 'a {
        sample
            .derives_from
            .iter()
            .filter_map(move |name| self.source(name))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Investigation {
    pub identifier: String,
    pub studies: Vec<Study>,
}

impl Investigation {
    /// Every sample of every study, in study then table order.
    pub fn samples(&self) -> impl Iterator<Item = &Sample> {
        self.studies.iter().flat_map(|study| study.samples.iter())
    }

    /// Every sample paired with the study that owns it.
    pub fn samples_with_study(&self) -> impl Iterator<Item = (&Study, &Sample)> {
        self.studies
            .iter()
            .flat_map(|study| study.samples.iter().map(move |sample| (study, sample)))
    }

    /// Every assay paired with the study that owns it.
    pub fn assays(&self) -> impl Iterator<Item = (&Study, &Assay)> {
        self.studies
            .iter()
            .flat_map(|study| study.assays.iter().map(move |assay| (study, assay)))
    }

    /// First sample with the given name, with its owning study.
    #[must_use]
    pub fn find_sample(&self, name: &str) -> Option<(&Study, &Sample)> {
        self.samples_with_study()
            .find(|(_, sample)| sample.name == name)
    }
}
