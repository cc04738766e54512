//! Loading a complete ISA-Tab directory into the domain model.

use std::path::Path;

use isa_config::TablesConfig;
use isa_core::{DataNode, Term};
use isa_tab::{TableError, TableKind, load_study};
use pretty_assertions::assert_eq;

const INVESTIGATION: &str = "\
INVESTIGATION
Investigation Identifier\tINV-1
STUDY
Study Identifier\tMTBLS-T1
Study File Name\ts_study.txt
STUDY ASSAYS
Study Assay File Name\ta_ms.txt\ta_nmr.txt
Study Assay Measurement Type\tmetabolite profiling\tmetabolite profiling
Study Assay Technology Type\tmass spectrometry\tNMR spectroscopy
";

const STUDY: &str = "\
Source Name\tCharacteristics[Organism]\tTerm Source REF\tTerm Accession Number\tProtocol REF\tSample Name\tCharacteristics[Material Type]\tFactor Value[Gender]\tFactor Value[Dose]
src1\tHomo sapiens\tNCBITAXON\t9606\tsampling\ts1\tblood\tMale\tLow
src2\tHomo sapiens\tNCBITAXON\t9606\tsampling\ts2\tblood\tMale\tHigh
src3\tHomo sapiens\tNCBITAXON\t9606\tsampling\ts3\turine\tFemale\tLow
src3\tHomo sapiens\tNCBITAXON\t9606\tsampling\ts3\turine\tFemale\tLow
";

const MS_ASSAY: &str = "\
Sample Name\tProtocol REF\tExtract Name\tMS Assay Name\tRaw Spectral Data File\tDerived Spectral Data File\tFactor Value[Batch]
s1\textraction\te1\tms1\ts1.mzml\tall.tsv\t1
s2\textraction\te2\tms2\ts2.mzml\tall.tsv\t2
s2\textraction\te2b\tms2b\tnan\t\t
";

const NMR_ASSAY: &str = "\
Sample Name\tProtocol REF\tNMR Assay Name\tFree Induction Decay Data File
s3\tnmr\tn3\ts3.fid
ghost\tnmr\tn4\tghost.fid
";

fn write(dir: &Path, name: &str, contents: &str) {
    std::fs::write(dir.join(name), contents).expect("write fixture");
}

fn fixture() -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("tempdir");
    write(dir.path(), "i_investigation.txt", INVESTIGATION);
    write(dir.path(), "s_study.txt", STUDY);
    write(dir.path(), "a_ms.txt", MS_ASSAY);
    write(dir.path(), "a_nmr.txt", NMR_ASSAY);
    dir
}

#[test]
fn builds_samples_sources_and_assays() {
    let dir = fixture();
    let investigation = load_study(dir.path(), &TablesConfig::default()).expect("loads");

    assert_eq!(investigation.identifier, "INV-1");
    assert_eq!(investigation.studies.len(), 1);
    let study = &investigation.studies[0];
    assert_eq!(study.identifier, "MTBLS-T1");

    let sample_names: Vec<&str> = study.samples.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(sample_names, vec!["s1", "s2", "s3"]);
    assert_eq!(study.sources.len(), 3);

    let organism = study.sources[0].characteristic("Organism").expect("organism");
    assert!(matches!(organism.value, Term::Ontology(_)));
    assert_eq!(organism.value.text(), "Homo sapiens");

    let s1 = study.sample("s1").expect("s1");
    assert_eq!(s1.derives_from, vec!["src1"]);
    assert_eq!(
        s1.factor_value("Gender").map(|f| f.value.text()),
        Some("Male")
    );
    // Factor columns in assay tables describe the row's sample.
    assert_eq!(s1.factor_value("Batch").map(|f| f.value.text()), Some("1"));
    assert_eq!(
        study.sample("s3").and_then(|s| s.factor_value("Batch")),
        None
    );
}

#[test]
fn assays_carry_types_samples_and_data_files() {
    let dir = fixture();
    let investigation = load_study(dir.path(), &TablesConfig::default()).expect("loads");
    let study = &investigation.studies[0];

    let ms = &study.assays[0];
    assert_eq!(ms.filename, "a_ms.txt");
    assert_eq!(ms.measurement_type.text(), "metabolite profiling");
    assert_eq!(ms.technology_type.text(), "mass spectrometry");
    assert_eq!(ms.samples, vec!["s1", "s2"]);

    let files: Vec<(&str, DataNode, Vec<&str>)> = ms
        .data_files
        .iter()
        .map(|f| {
            (
                f.filename.as_str(),
                f.label,
                f.generated_from.iter().map(String::as_str).collect(),
            )
        })
        .collect();
    assert_eq!(
        files,
        vec![
            ("s1.mzml", DataNode::RawSpectralDataFile, vec!["s1"]),
            ("all.tsv", DataNode::DerivedSpectralDataFile, vec!["s1", "s2"]),
            ("s2.mzml", DataNode::RawSpectralDataFile, vec!["s2"]),
        ]
    );

    let nmr = &study.assays[1];
    assert_eq!(nmr.samples, vec!["s3", "ghost"]);
    assert_eq!(nmr.data_files[0].label, DataNode::FreeInductionDecayDataFile);

    // "ghost" is only in the NMR assay.
    let unlisted: Vec<&str> = study
        .unlisted_samples
        .iter()
        .map(|s| s.name.as_str())
        .collect();
    assert_eq!(unlisted, vec!["ghost"]);
    assert!(study.sample("ghost").is_none());
}

#[test]
fn assay_without_assay_columns_lists_samples_only() {
    let dir = fixture();
    write(dir.path(), "a_nmr.txt", "Sample Name\tComment[run]\ns3\t1\n");

    let investigation = load_study(dir.path(), &TablesConfig::default()).expect("loads");
    let nmr = &investigation.studies[0].assays[1];
    assert_eq!(nmr.samples, vec!["s3"]);
    assert!(nmr.data_files.is_empty());
}

#[test]
fn missing_investigation_is_reported() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(dir.path(), "s_study.txt", STUDY);

    let error = load_study(dir.path(), &TablesConfig::default()).unwrap_err();
    assert!(matches!(error, TableError::MissingInvestigation { .. }));
    assert!(error.to_string().contains("i_*.txt"));
}

#[test]
fn unreadable_assay_is_fatal_for_loading() {
    let dir = fixture();
    std::fs::remove_file(dir.path().join("a_nmr.txt")).expect("remove");

    let error = load_study(dir.path(), &TablesConfig::default()).unwrap_err();
    assert!(matches!(error, TableError::Read { .. }));
}

#[test]
fn study_file_with_assay_signature_is_rejected() {
    let dir = fixture();
    write(dir.path(), "s_study.txt", NMR_ASSAY);

    let error = load_study(dir.path(), &TablesConfig::default()).unwrap_err();
    assert!(matches!(
        error,
        TableError::UnexpectedKind {
            expected: TableKind::Study,
            found: TableKind::Assay,
            ..
        }
    ));
}

#[test]
fn custom_missing_markers_hide_cells() {
    let dir = fixture();
    let config = TablesConfig {
        missing_value_markers: vec!["all.tsv".into()],
        ..TablesConfig::default()
    };
    let investigation = load_study(dir.path(), &config).expect("loads");
    let ms = &investigation.studies[0].assays[0];

    let names: Vec<&str> = ms.data_files.iter().map(|f| f.filename.as_str()).collect();
    // "nan" is no longer a marker, so it now reads as a file name.
    assert_eq!(names, vec!["s1.mzml", "s2.mzml", "nan"]);
}
