//! Cell values that are either plain text or ontology annotations.
//!
//! ISA-Tab carries ontology annotations in two shapes: as a value column
//! followed by `Term Source REF` / `Term Accession Number` columns, or as
//! free text of the form `"<term> (<source>:<accession>)"`. Both end up as
//! [`Term::Ontology`]; everything else is a [`Term::Scalar`].

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// `"<term> (<source>:<accession>)"`. The source never contains a colon,
/// the accession may (URIs).
static ANNOTATED_TERM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<term>.*?\S)\s*\(\s*(?P<source>[^():\s]+)\s*:\s*(?P<accession>[^()]*?[^()\s])\s*\)$",
    )
    .expect("annotated term pattern is valid")
});

/// An ontology-annotated term.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct OntologyAnnotation {
    pub term: String,
    pub term_source: String,
    pub term_accession: String,
}

/// A characteristic, factor, or assay-type value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Term {
    Scalar(String),
    Ontology(OntologyAnnotation),
}

impl Term {
    /// Parse free text, recognising the `"<term> (<source>:<accession>)"`
    /// grammar. Text that does not match is kept as a trimmed scalar.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        ANNOTATED_TERM.captures(text).map_or_else(
            || Self::Scalar(text.to_string()),
            |caps| {
                Self::Ontology(OntologyAnnotation {
                    term: caps["term"].to_string(),
                    term_source: caps["source"].to_string(),
                    term_accession: caps["accession"].to_string(),
                })
            },
        )
    }

    /// Build a term from a value cell and its optional annotation cells.
    ///
    /// An ontology annotation is produced only when a term source or an
    /// accession is present; otherwise the value stays a scalar.
    #[must_use]
    pub fn from_cells(value: &str, term_source: Option<&str>, accession: Option<&str>) -> Self {
        let source = term_source.map(str::trim).unwrap_or_default();
        let accession = accession.map(str::trim).unwrap_or_default();
        if source.is_empty() && accession.is_empty() {
            return Self::Scalar(value.trim().to_string());
        }
        Self::Ontology(OntologyAnnotation {
            term: value.trim().to_string(),
            term_source: source.to_string(),
            term_accession: accession.to_string(),
        })
    }

    /// The text used for comparison and reporting: the scalar itself or the
    /// ontology term.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Scalar(value) => value,
            Self::Ontology(annotation) => &annotation.term,
        }
    }

    /// Whether this value satisfies a requested value from a query.
    ///
    /// Matches when the texts are equal, or when the requested value is
    /// written as an annotated term whose term equals this value's text.
    #[must_use]
    pub fn matches(&self, wanted: &str) -> bool {
        let wanted = wanted.trim();
        if self.text() == wanted {
            return true;
        }
        match Self::parse(wanted) {
            Self::Ontology(annotation) => self.text() == annotation.term,
            Self::Scalar(_) => false,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text().is_empty()
    }
}

impl Default for Term {
    fn default() -> Self {
        Self::Scalar(String::new())
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(value) => f.write_str(value),
            Self::Ontology(annotation) => write!(
                f,
                "{} ({}:{})",
                annotation.term, annotation.term_source, annotation.term_accession
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn ontology(term: &str, source: &str, accession: &str) -> Term {
        Term::Ontology(OntologyAnnotation {
            term: term.into(),
            term_source: source.into(),
            term_accession: accession.into(),
        })
    }

    #[test]
    fn parses_annotated_term() {
        assert_eq!(
            Term::parse("blood (UBERON:0000178)"),
            ontology("blood", "UBERON", "0000178")
        );
    }

    #[test]
    fn accession_may_be_a_uri() {
        assert_eq!(
            Term::parse("liver (UBERON:http://purl.obolibrary.org/obo/UBERON_0002107)"),
            ontology(
                "liver",
                "UBERON",
                "http://purl.obolibrary.org/obo/UBERON_0002107"
            )
        );
    }

    #[rstest]
    #[case("Control (baseline)")]
    #[case("plain value")]
    #[case("(OBI:0000070)")]
    #[case("dose (mg:)")]
    #[case("")]
    fn non_matching_text_falls_back_to_scalar(#[case] text: &str) {
        assert_eq!(Term::parse(text), Term::Scalar(text.trim().to_string()));
    }

    #[test]
    fn from_cells_without_annotation_is_scalar() {
        assert_eq!(
            Term::from_cells(" Male ", Some(""), None),
            Term::Scalar("Male".into())
        );
        assert_eq!(
            Term::from_cells("Male", Some("PATO"), Some("0000384")),
            ontology("Male", "PATO", "0000384")
        );
    }

    #[test]
    fn matches_compares_ontology_term_text() {
        let stored = ontology("blood", "UBERON", "0000178");
        assert!(stored.matches("blood"));
        assert!(stored.matches(" blood "));
        assert!(stored.matches("blood (UBERON:0000178)"));
        assert!(!stored.matches("Blood"));

        let scalar = Term::Scalar("High".into());
        assert!(scalar.matches("High"));
        assert!(!scalar.matches("high"));
        assert!(scalar.matches("High (EFO:0000001)"));
    }

    #[test]
    fn display_renders_annotation_grammar() {
        let term = ontology("blood", "UBERON", "0000178");
        assert_eq!(term.to_string(), "blood (UBERON:0000178)");
        assert_eq!(Term::parse(&term.to_string()), term);
    }
}
