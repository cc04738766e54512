use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};
use isa_query::SummaryKind;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Select samples matching a query and list their data files.
    Query(QueryArgs),
    /// List the factor names used in a study.
    Factors(StudyDirArgs),
    /// List the values recorded for one factor.
    FactorValues(FactorValuesArgs),
    /// Per-sample summary of the variables that differ between samples.
    Summary(SummaryArgs),
    /// Study groups: samples sharing one combination of factor values.
    Groups(GroupsArgs),
    /// Sources a sample derives from.
    Sources(SampleArgs),
    /// Data files generated from a sample.
    Data(SampleArgs),
    /// Print the JSON Schema of the query or response document.
    Schema(SchemaArgs),
}

#[derive(Clone, Debug, Args)]
pub struct QueryArgs {
    /// Directory holding the investigation, study, and assay tables.
    #[arg(long)]
    pub source_dir: PathBuf,

    /// Tool-parameters JSON file containing a `query` object.
    #[arg(long)]
    pub query_file: PathBuf,

    /// Write the response here instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Clone, Debug, Args)]
pub struct StudyDirArgs {
    /// ISA-Tab directory.
    pub dir: PathBuf,
}

#[derive(Clone, Debug, Args)]
pub struct FactorValuesArgs {
    /// ISA-Tab directory.
    pub dir: PathBuf,
    /// Factor name, e.g. "Gender".
    pub factor: String,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum SummaryKindArg {
    #[default]
    Factors,
    Characteristics,
    Variables,
}

impl From<SummaryKindArg> for SummaryKind {
    fn from(kind: SummaryKindArg) -> Self {
        match kind {
            SummaryKindArg::Factors => Self::Factors,
            SummaryKindArg::Characteristics => Self::Characteristics,
            SummaryKindArg::Variables => Self::Variables,
        }
    }
}

#[derive(Clone, Debug, Args)]
pub struct SummaryArgs {
    /// ISA-Tab directory.
    pub dir: PathBuf,

    /// Fields to summarize.
    #[arg(long, value_enum, default_value_t)]
    pub kind: SummaryKindArg,
}

#[derive(Clone, Debug, Args)]
pub struct GroupsArgs {
    /// ISA-Tab directory.
    pub dir: PathBuf,

    /// Report group sizes instead of members.
    #[arg(long, conflicts_with = "combinations")]
    pub sizes: bool,

    /// List every distinct factor-value combination, constant factors included.
    #[arg(long)]
    pub combinations: bool,
}

#[derive(Clone, Debug, Args)]
pub struct SampleArgs {
    /// ISA-Tab directory.
    pub dir: PathBuf,
    /// Sample name.
    pub sample: String,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum SchemaTarget {
    /// The `query` object of the parameters document.
    Query,
    /// The document written by `isaslice query`.
    Response,
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    pub target: SchemaTarget,
}
