//! Data-node column labels.
//!
//! A data node is an assay-table column whose cells name a file generated
//! from the sample on the same row. The vocabulary is closed: any other
//! column is not a data file reference, whatever its name looks like.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Recognized data-file column of an assay table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DataNode {
    RawDataFile,
    RawSpectralDataFile,
    DerivedSpectralDataFile,
    DerivedArrayDataFile,
    ArrayDataFile,
    ProteinAssignmentFile,
    PeptideAssignmentFile,
    PostTranslationalModificationAssignmentFile,
    AcquisitionParameterDataFile,
    FreeInductionDecayDataFile,
    DerivedArrayDataMatrixFile,
    ImageFile,
    DerivedDataFile,
    MetaboliteAssignmentFile,
}

impl DataNode {
    /// Every data node, in resolution order.
    pub const ALL: [Self; 14] = [
        Self::RawDataFile,
        Self::RawSpectralDataFile,
        Self::DerivedSpectralDataFile,
        Self::DerivedArrayDataFile,
        Self::ArrayDataFile,
        Self::ProteinAssignmentFile,
        Self::PeptideAssignmentFile,
        Self::PostTranslationalModificationAssignmentFile,
        Self::AcquisitionParameterDataFile,
        Self::FreeInductionDecayDataFile,
        Self::DerivedArrayDataMatrixFile,
        Self::ImageFile,
        Self::DerivedDataFile,
        Self::MetaboliteAssignmentFile,
    ];

    /// Column header as it appears in an ISA-Tab assay table.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::RawDataFile => "Raw Data File",
            Self::RawSpectralDataFile => "Raw Spectral Data File",
            Self::DerivedSpectralDataFile => "Derived Spectral Data File",
            Self::DerivedArrayDataFile => "Derived Array Data File",
            Self::ArrayDataFile => "Array Data File",
            Self::ProteinAssignmentFile => "Protein Assignment File",
            Self::PeptideAssignmentFile => "Peptide Assignment File",
            Self::PostTranslationalModificationAssignmentFile => {
                "Post Translational Modification Assignment File"
            }
            Self::AcquisitionParameterDataFile => "Acquisition Parameter Data File",
            Self::FreeInductionDecayDataFile => "Free Induction Decay Data File",
            Self::DerivedArrayDataMatrixFile => "Derived Array Data Matrix File",
            Self::ImageFile => "Image File",
            Self::DerivedDataFile => "Derived Data File",
            Self::MetaboliteAssignmentFile => "Metabolite Assignment File",
        }
    }

    /// Look up a data node by its exact column header.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL.into_iter().find(|node| node.label() == label)
    }
}

impl fmt::Display for DataNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
