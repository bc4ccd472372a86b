//! Wire types for the MLflow REST endpoints exercised by the load scenarios.
//!
//! Request bodies are plain serde structs serialized immediately before
//! transmission; nothing here outlives a single call.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::Error;

/// Key/value tag pair as the tracking server represents it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

impl Tag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateExperimentRequest {
    pub name: String,
    pub tags: Vec<Tag>,
}

impl CreateExperimentRequest {
    pub const PATH: &'static str = "experiments/create";

    /// Build a request whose experiment name is unique per invocation. The
    /// timestamp keeps names readable; the UUID suffix keeps two calls
    /// within the same millisecond distinct.
    pub fn unique() -> Self {
        Self {
            name: format!(
                "exp_loadgen_{}_{}",
                Utc::now().timestamp_millis(),
                Uuid::new_v4().simple()
            ),
            tags: vec![Tag::new("description", "loadgen experiment")],
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateExperimentResponse {
    pub experiment_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateRunRequest {
    pub experiment_id: String,
    /// Run start in epoch milliseconds.
    pub start_time: i64,
    pub tags: Vec<Tag>,
}

impl CreateRunRequest {
    pub const PATH: &'static str = "runs/create";

    /// Build a request starting the run now, attached to `experiment_id`.
    pub fn now(experiment_id: &str) -> Self {
        Self {
            experiment_id: experiment_id.to_string(),
            start_time: Utc::now().timestamp_millis(),
            tags: vec![Tag::new("mlflow.user", "loadgen")],
        }
    }
}

/// Response to `runs/create`. Run info is kept as raw JSON because the run
/// identifier's field name is not stable across server versions; see
/// [`CreateRunResponse::run_id`].
#[derive(Debug, Deserialize)]
pub struct CreateRunResponse {
    pub run: RunEnvelope,
}

#[derive(Debug, Deserialize)]
pub struct RunEnvelope {
    pub info: Value,
}

/// Field names under which the run identifier has been observed, in
/// preference order. Known upstream API inconsistency.
const RUN_ID_FIELDS: &[&str] = &["run_id", "runId"];

impl CreateRunResponse {
    /// Identifier of the created run, whichever of the tolerated field
    /// names the server used.
    pub fn run_id(&self) -> Result<String, Error> {
        string_field(&self.run.info, RUN_ID_FIELDS)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchExperimentsRequest {
    pub max_results: u32,
}

impl SearchExperimentsRequest {
    pub const PATH: &'static str = "experiments/search";
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchRunsRequest {
    pub experiment_ids: Vec<String>,
    pub max_results: u32,
}

impl SearchRunsRequest {
    pub const PATH: &'static str = "runs/search";
}

/// Return the first of `candidates` present in `value` as a string.
///
/// Tolerant decoding for responses whose field naming varies between server
/// versions: candidates are tried in order and the first present wins.
pub fn string_field(value: &Value, candidates: &[&str]) -> Result<String, Error> {
    candidates
        .iter()
        .find_map(|name| value.get(name).and_then(Value::as_str))
        .map(str::to_owned)
        .ok_or_else(|| Error::MissingField {
            candidates: candidates.join(", "),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn experiment_names_are_unique_within_a_millisecond() {
        let a = CreateExperimentRequest::unique();
        let b = CreateExperimentRequest::unique();
        assert_ne!(a.name, b.name);
        assert!(a.name.starts_with("exp_loadgen_"));
    }

    #[test]
    fn create_experiment_body_shape() {
        let request = CreateExperimentRequest {
            name: "exp_loadgen_test".into(),
            tags: vec![Tag::new("description", "loadgen experiment")],
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "name": "exp_loadgen_test",
                "tags": [{"key": "description", "value": "loadgen experiment"}],
            })
        );
    }

    #[test]
    fn create_run_body_carries_experiment_and_user_tag() {
        let request = CreateRunRequest::now("42");
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["experiment_id"], "42");
        assert!(body["start_time"].as_i64().unwrap() > 0);
        assert_eq!(
            body["tags"],
            json!([{"key": "mlflow.user", "value": "loadgen"}])
        );
    }

    #[rstest]
    #[case::snake_case("run_id")]
    #[case::camel_case("runId")]
    fn run_id_field_name_variants_are_tolerated(#[case] field: &str) {
        let body = json!({"run": {"info": {field: "abc", "status": "RUNNING"}}});
        let response: CreateRunResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.run_id().unwrap(), "abc");
    }

    #[test]
    fn run_id_prefers_snake_case_when_both_present() {
        let body = json!({"run": {"info": {"run_id": "snake", "runId": "camel"}}});
        let response: CreateRunResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.run_id().unwrap(), "snake");
    }

    #[test]
    fn missing_run_id_names_the_candidates_tried() {
        let body = json!({"run": {"info": {"status": "RUNNING"}}});
        let response: CreateRunResponse = serde_json::from_value(body).unwrap();
        let err = response.run_id().unwrap_err();
        assert_eq!(
            err.to_string(),
            "response field missing, tried: run_id, runId"
        );
    }

    #[test]
    fn search_request_body_shapes() {
        assert_eq!(
            serde_json::to_value(SearchExperimentsRequest { max_results: 1000 }).unwrap(),
            json!({"max_results": 1000})
        );
        assert_eq!(
            serde_json::to_value(SearchRunsRequest {
                experiment_ids: vec!["37".into()],
                max_results: 1000,
            })
            .unwrap(),
            json!({"experiment_ids": ["37"], "max_results": 1000})
        );
    }
}
