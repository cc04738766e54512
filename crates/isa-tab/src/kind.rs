//! Table classification by header signature.

use std::fmt;

use crate::header::{HeaderLabel, NodeKind};

/// Role of a table inside an ISA-Tab directory, decided once at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableKind {
    /// Has `Source Name` and `Sample Name`.
    Study,
    /// Has `Sample Name`, no `Source Name`, and an assay node or data node.
    Assay,
    Unrecognized,
}

impl TableKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Study => "study",
            Self::Assay => "assay",
            Self::Unrecognized => "unrecognized",
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a table from its parsed header labels.
#[must_use]
pub fn classify(labels: &[HeaderLabel]) -> TableKind {
    let has = |kind: NodeKind| labels.contains(&HeaderLabel::Node(kind));
    let has_source = has(NodeKind::Source);
    let has_sample = has(NodeKind::Sample);

    if has_source && has_sample {
        return TableKind::Study;
    }

    let has_assay_signature = labels.iter().any(|label| {
        matches!(
            label,
            HeaderLabel::Node(NodeKind::Assay | NodeKind::Material) | HeaderLabel::DataFile(_)
        )
    });
    if has_sample && !has_source && has_assay_signature {
        return TableKind::Assay;
    }

    TableKind::Unrecognized
}
