//! In-memory studies shared by the unit tests.

use isa_core::{
    Assay, Characteristic, DataFile, DataNode, FactorValue, Investigation, Sample, Source, Study,
    Term,
};

pub fn factor(name: &str, value: &str) -> FactorValue {
    FactorValue {
        factor_name: name.to_string(),
        value: Term::Scalar(value.to_string()),
        unit: None,
    }
}

pub fn characteristic(category: &str, value: Term) -> Characteristic {
    Characteristic {
        category: category.to_string(),
        value,
        unit: None,
    }
}

pub fn sample(name: &str, source: &str, factors: &[(&str, &str)]) -> Sample {
    let mut sample = Sample::new(name);
    sample.add_source(source);
    for (factor_name, value) in factors {
        sample.add_factor_value(factor(factor_name, value));
    }
    sample
}

fn source(name: &str, organism: &str, age: &str) -> Source {
    let mut source = Source::new(name);
    source
        .characteristics
        .push(characteristic("Organism", Term::parse(organism)));
    source
        .characteristics
        .push(characteristic("Age", Term::Scalar(age.to_string())));
    source
}

fn assay(filename: &str, technology: &str, samples: &[&str], files: &[(&str, &str)]) -> Assay {
    Assay {
        filename: filename.to_string(),
        measurement_type: Term::parse("metabolite profiling (OBI:0000366)"),
        technology_type: Term::Scalar(technology.to_string()),
        samples: samples.iter().map(ToString::to_string).collect(),
        data_files: files
            .iter()
            .map(|(filename, sample)| DataFile {
                filename: (*filename).to_string(),
                label: DataNode::RawSpectralDataFile,
                generated_from: vec![(*sample).to_string()],
            })
            .collect(),
    }
}

/// Four samples crossing `Gender` {Male, Female} with `Dose` {Low, High}.
///
/// `s1`..`s3` are measured by mass spectrometry, `s3` and `s4` by NMR.
/// `s3` is urine, the others blood. Every source is human; ages vary.
pub fn gender_dose() -> Investigation {
    let mut samples = vec![
        sample("s1", "src1", &[("Gender", "Male"), ("Dose", "Low")]),
        sample("s2", "src2", &[("Gender", "Male"), ("Dose", "High")]),
        sample("s3", "src3", &[("Gender", "Female"), ("Dose", "Low")]),
        sample("s4", "src4", &[("Gender", "Female"), ("Dose", "High")]),
    ];
    for (sample, material) in samples.iter_mut().zip(["blood", "blood", "urine", "blood"]) {
        sample.add_characteristic(characteristic("Material Type", Term::Scalar(material.into())));
    }

    let study = Study {
        identifier: "MTBLS-T".into(),
        filename: "s_study.txt".into(),
        sources: vec![
            source("src1", "Homo sapiens (NCBITAXON:9606)", "31"),
            source("src2", "Homo sapiens (NCBITAXON:9606)", "45"),
            source("src3", "Homo sapiens (NCBITAXON:9606)", "31"),
            source("src4", "Homo sapiens (NCBITAXON:9606)", "52"),
        ],
        samples,
        assays: vec![
            assay(
                "a_ms.txt",
                "mass spectrometry",
                &["s1", "s2", "s3"],
                &[("s1.mzml", "s1"), ("s2.mzml", "s2"), ("s3.mzml", "s3")],
            ),
            assay(
                "a_nmr.txt",
                "NMR spectroscopy",
                &["s3", "s4"],
                &[("s3.fid", "s3"), ("s4.fid", "s4")],
            ),
        ],
        unlisted_samples: Vec::new(),
    };

    Investigation {
        identifier: "INV-T".into(),
        studies: vec![study],
    }
}
