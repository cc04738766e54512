//! Query specification decoded from tool-parameter JSON.
//!
//! The parameters document must carry a `query` object:
//!
//! ```json
//! {
//!   "query": {
//!     "measurement_type": "metabolite profiling",
//!     "technology_type": "mass spectrometry",
//!     "sample_material_type": "blood",
//!     "factor_selection": [{ "factor_name": "Gender", "factor_value": "Male" }]
//!   }
//! }
//! ```
//!
//! Every field is optional. An absent, null, or blank field places no
//! constraint on its dimension.

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::errors::CoreError;

/// One factor-value equality constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FactorConstraint {
    pub factor_name: String,
    pub factor_value: String,
}

/// Conjunctive selection criteria over assays and samples.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct QuerySpecification {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measurement_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technology_type: Option<String>,

    #[serde(
        default,
        rename = "sample_material_type",
        skip_serializing_if = "Option::is_none"
    )]
    pub material_type: Option<String>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub factor_selection: Vec<FactorConstraint>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<FactorConstraint>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<FactorConstraint>>::deserialize(deserializer)?.unwrap_or_default())
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

impl QuerySpecification {
    /// Trim every field and turn blank strings into "no constraint".
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidQuery` when a factor constraint has a blank
    /// factor name.
    pub fn normalized(self) -> Result<Self, CoreError> {
        let factor_selection = self
            .factor_selection
            .into_iter()
            .map(|constraint| {
                let factor_name = constraint.factor_name.trim().to_string();
                if factor_name.is_empty() {
                    return Err(CoreError::InvalidQuery(
                        "factor_selection entry has an empty factor_name".to_string(),
                    ));
                }
                Ok(FactorConstraint {
                    factor_name,
                    factor_value: constraint.factor_value.trim().to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            measurement_type: blank_to_none(self.measurement_type),
            technology_type: blank_to_none(self.technology_type),
            material_type: blank_to_none(self.material_type),
            factor_selection,
        })
    }

    /// True when no dimension is constrained.
    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        self.measurement_type.is_none()
            && self.technology_type.is_none()
            && self.material_type.is_none()
            && self.factor_selection.is_empty()
    }
}

/// A decoded query together with the exact `query` object it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedQuery {
    /// The `query` object as received, echoed back in responses.
    pub echo: Value,
    pub spec: QuerySpecification,
}

impl ParsedQuery {
    /// Decode the `query` object of a tool-parameters document.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidQuery` when the document has no `query`
    /// object or the object does not have the expected shape.
    pub fn from_parameters(parameters: &Value) -> Result<Self, CoreError> {
        let echo = parameters
            .get("query")
            .ok_or_else(|| {
                CoreError::InvalidQuery("parameters document has no `query` object".to_string())
            })?
            .clone();

        if !echo.is_object() {
            return Err(CoreError::InvalidQuery(format!(
                "`query` must be an object, found {}",
                json_type_name(&echo)
            )));
        }

        let spec = serde_json::from_value::<QuerySpecification>(echo.clone())
            .map_err(|error| CoreError::InvalidQuery(error.to_string()))?
            .normalized()?;

        Ok(Self { echo, spec })
    }

    /// Decode a tool-parameters document from JSON text.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidQuery` when the text is not JSON or has no
    /// usable `query` object.
    pub fn from_parameters_str(text: &str) -> Result<Self, CoreError> {
        let parameters: Value = serde_json::from_str(text).map_err(|error| {
            CoreError::InvalidQuery(format!("parameters are not valid JSON: {error}"))
        })?;
        Self::from_parameters(&parameters)
    }
}

const fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn missing_query_object_is_invalid() {
        let error = ParsedQuery::from_parameters(&json!({ "input": {} })).unwrap_err();
        assert!(matches!(error, CoreError::InvalidQuery(_)));
    }

    #[test]
    fn non_object_query_is_invalid() {
        let error = ParsedQuery::from_parameters(&json!({ "query": "Gender=Male" })).unwrap_err();
        assert!(error.to_string().contains("a string"));
    }

    #[test]
    fn empty_query_object_is_unconstrained() {
        let parsed = ParsedQuery::from_parameters(&json!({ "query": {} })).expect("valid");
        assert!(parsed.spec.is_unconstrained());
        assert_eq!(parsed.echo, json!({}));
    }

    #[test]
    fn blank_and_null_fields_mean_no_constraint() {
        let parsed = ParsedQuery::from_parameters(&json!({
            "query": {
                "measurement_type": "  ",
                "technology_type": null,
                "sample_material_type": "",
                "factor_selection": null
            }
        }))
        .expect("valid");
        assert_eq!(parsed.spec, QuerySpecification::default());
    }

    #[test]
    fn fields_are_trimmed_and_echo_is_untouched() {
        let query = json!({
            "measurement_type": " metabolite profiling ",
            "technology_type": "mass spectrometry",
            "sample_material_type": "blood",
            "factor_selection": [
                { "factor_name": " Gender", "factor_value": "Male " }
            ]
        });
        let parsed = ParsedQuery::from_parameters(&json!({ "query": query.clone() })).expect("valid");

        assert_eq!(parsed.echo, query);
        assert_eq!(
            parsed.spec,
            QuerySpecification {
                measurement_type: Some("metabolite profiling".into()),
                technology_type: Some("mass spectrometry".into()),
                material_type: Some("blood".into()),
                factor_selection: vec![FactorConstraint {
                    factor_name: "Gender".into(),
                    factor_value: "Male".into(),
                }],
            }
        );
    }

    #[test]
    fn constraint_without_factor_name_is_invalid() {
        let missing = ParsedQuery::from_parameters(&json!({
            "query": { "factor_selection": [{ "factor_value": "Male" }] }
        }));
        assert!(matches!(missing, Err(CoreError::InvalidQuery(_))));

        let blank = ParsedQuery::from_parameters(&json!({
            "query": { "factor_selection": [{ "factor_name": " ", "factor_value": "Male" }] }
        }));
        assert!(matches!(blank, Err(CoreError::InvalidQuery(_))));
    }

    #[test]
    fn malformed_json_text_is_invalid() {
        let error = ParsedQuery::from_parameters_str("{ not json").unwrap_err();
        assert!(error.to_string().contains("not valid JSON"));
    }
}
