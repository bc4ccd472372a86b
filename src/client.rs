//! HTTP client for the tracking-server endpoints under load.

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error};

use crate::api::{
    CreateExperimentRequest, CreateExperimentResponse, CreateRunRequest, CreateRunResponse,
    SearchExperimentsRequest, SearchRunsRequest,
};
use crate::config::Config;
use crate::error::Error;

/// Thin client over the MLflow REST API. One instance is shared across all
/// iterations of a scenario; `reqwest::Client` pools connections internally.
///
/// Calls do not retry: a failed request surfaces as a failed iteration to
/// the harness and nothing else.
#[derive(Debug, Clone)]
pub struct TrackingClient {
    client: reqwest::Client,
    api_base: String,
}

impl TrackingClient {
    pub fn new(config: &Config) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("mlflow-loadgen/0.1"));
        let client = reqwest::Client::builder()
            .timeout(config.http.timeout())
            .default_headers(headers)
            .build()?;
        Ok(Self {
            client,
            api_base: config.api_base(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base, path)
    }

    async fn post<B: Serialize>(&self, path: &str, body: &B) -> Result<reqwest::Response, Error> {
        let url = self.endpoint(path);
        debug!(%url, "issuing tracking request");
        let response = self.client.post(&url).json(body).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(%status, %url, "tracking server returned error status");
            return Err(Error::UnexpectedStatus { status, body });
        }
        Ok(response)
    }

    async fn post_json<B: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, Error> {
        let response = self.post(path, body).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Create an experiment, returning the server-issued experiment id.
    pub async fn create_experiment(
        &self,
        request: &CreateExperimentRequest,
    ) -> Result<String, Error> {
        let response: CreateExperimentResponse = self
            .post_json(CreateExperimentRequest::PATH, request)
            .await?;
        Ok(response.experiment_id)
    }

    /// Create a run, returning the server-issued run id.
    pub async fn create_run(&self, request: &CreateRunRequest) -> Result<String, Error> {
        let response: CreateRunResponse = self.post_json(CreateRunRequest::PATH, request).await?;
        response.run_id()
    }

    /// Issue one experiment search. The response body is discarded once the
    /// status is known good; only the request/response cycle is measured.
    pub async fn search_experiments(
        &self,
        request: &SearchExperimentsRequest,
    ) -> Result<(), Error> {
        self.post(SearchExperimentsRequest::PATH, request).await?;
        Ok(())
    }

    /// Issue one run search. The response body is discarded.
    pub async fn search_runs(&self, request: &SearchRunsRequest) -> Result<(), Error> {
        self.post(SearchRunsRequest::PATH, request).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_api_base_and_path() {
        let config = Config::new("https://example.com").unwrap();
        let client = TrackingClient::new(&config).unwrap();
        assert_eq!(
            client.endpoint(CreateExperimentRequest::PATH),
            "https://example.com/api/2.0/mlflow/experiments/create"
        );
        assert_eq!(
            client.endpoint(SearchRunsRequest::PATH),
            "https://example.com/api/2.0/mlflow/runs/search"
        );
    }
}
