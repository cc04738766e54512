//! Serde and JsonSchema validation tests for query and response types.

use isa_core::query::{FactorConstraint, QuerySpecification};
use isa_core::responses::{
    FactorLevel, QueryResponse, SampleDataFiles, SampleSourcesResponse, StudyGroup,
    StudyGroupSize,
};
use schemars::schema_for;
use serde_json::json;

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

macro_rules! serializes_to_schema {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;
            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

serializes_to_schema!(
    query_response_matches_schema,
    QueryResponse,
    QueryResponse {
        query: json!({ "factor_selection": [{ "factor_name": "Gender", "factor_value": "Male" }] }),
        results: vec![SampleDataFiles {
            sample_name: "sample_001".into(),
            data_files: vec!["file1.mzml".into()],
        }],
        warnings: vec!["skipped a_broken.txt".into()],
    }
);

serializes_to_schema!(
    query_specification_matches_schema,
    QuerySpecification,
    QuerySpecification {
        measurement_type: Some("metabolite profiling".into()),
        technology_type: None,
        material_type: Some("blood".into()),
        factor_selection: vec![FactorConstraint {
            factor_name: "Dose".into(),
            factor_value: "High".into(),
        }],
    }
);

serializes_to_schema!(
    study_group_matches_schema,
    StudyGroup,
    StudyGroup {
        factors: vec![FactorLevel {
            name: "Gender".into(),
            value: "Female".into(),
        }],
        samples: vec!["s3".into(), "s4".into()],
    }
);

serializes_to_schema!(
    study_group_size_matches_schema,
    StudyGroupSize,
    StudyGroupSize {
        factors: vec![],
        size: 4,
    }
);

serializes_to_schema!(
    sample_sources_matches_schema,
    SampleSourcesResponse,
    SampleSourcesResponse {
        sample_name: "s1".into(),
        sources: vec!["src1".into()],
    }
);

#[test]
fn query_response_omits_empty_warnings() {
    let response = QueryResponse {
        query: json!({}),
        results: vec![],
        warnings: vec![],
    };
    let value = serde_json::to_value(&response).unwrap();
    assert_eq!(value, json!({ "query": {}, "results": [] }));
}

#[test]
fn query_specification_uses_wire_field_names() {
    let spec = QuerySpecification {
        material_type: Some("blood".into()),
        ..QuerySpecification::default()
    };
    let value = serde_json::to_value(&spec).unwrap();
    assert_eq!(
        value,
        json!({ "sample_material_type": "blood", "factor_selection": [] })
    );
}
