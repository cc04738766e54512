//! Typed ISA-Tab column labels.

use std::sync::LazyLock;

use isa_core::DataNode;
use regex::Regex;

/// `Characteristics[organism]`, `Factor Value[Dose]`, ...
static QUALIFIED_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<kind>Characteristics|Factor Value|Parameter Value|Comment)\s*\[\s*(?P<name>.*?)\s*\]$")
        .expect("qualified label pattern is valid")
});

const MATERIAL_NODES: [&str; 2] = ["Extract Name", "Labeled Extract Name"];

const ASSAY_NODES: [&str; 8] = [
    "Assay Name",
    "MS Assay Name",
    "NMR Assay Name",
    "Hybridization Assay Name",
    "Gel Electrophoresis Assay Name",
    "Scan Name",
    "Normalization Name",
    "Data Transformation Name",
];

/// Node columns: each row names one entity of this kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Source,
    Sample,
    /// Extracts and labeled extracts.
    Material,
    /// Assay, scan, and data-processing events.
    Assay,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderLabel {
    Node(NodeKind),
    Characteristics(String),
    FactorValue(String),
    ParameterValue(String),
    Comment(String),
    /// Bare `Material Type` qualifier column.
    MaterialType,
    TermSourceRef,
    TermAccessionNumber,
    Unit,
    ProtocolRef,
    DataFile(DataNode),
    Other(String),
}

impl HeaderLabel {
    #[must_use]
    pub fn parse(label: &str) -> Self {
        let label = label.trim();
        match label {
            "Source Name" => return Self::Node(NodeKind::Source),
            "Sample Name" => return Self::Node(NodeKind::Sample),
            "Material Type" => return Self::MaterialType,
            "Term Source REF" => return Self::TermSourceRef,
            "Term Accession Number" => return Self::TermAccessionNumber,
            "Unit" => return Self::Unit,
            "Protocol REF" => return Self::ProtocolRef,
            _ => {}
        }
        if MATERIAL_NODES.contains(&label) {
            return Self::Node(NodeKind::Material);
        }
        if ASSAY_NODES.contains(&label) {
            return Self::Node(NodeKind::Assay);
        }
        if let Some(node) = DataNode::from_label(label) {
            return Self::DataFile(node);
        }
        if let Some(caps) = QUALIFIED_LABEL.captures(label) {
            let name = caps["name"].to_string();
            return match &caps["kind"] {
                "Characteristics" => Self::Characteristics(name),
                "Factor Value" => Self::FactorValue(name),
                "Parameter Value" => Self::ParameterValue(name),
                _ => Self::Comment(name),
            };
        }
        Self::Other(label.to_string())
    }

    #[must_use]
    pub const fn is_node(&self) -> bool {
        matches!(self, Self::Node(_))
    }
}
