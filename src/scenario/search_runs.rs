use async_trait::async_trait;

use crate::api::SearchRunsRequest;
use crate::client::TrackingClient;
use crate::config::SearchConfig;
use crate::error::Error;

use super::LoadScenario;

/// Measures run-search throughput against a fixed set of experiments
/// (by default the one with the largest run count in the reference
/// database). One capped `runs/search` per iteration; results are
/// discarded.
pub struct SearchRunsScenario {
    client: TrackingClient,
    experiment_ids: Vec<String>,
    max_results: u32,
}

impl SearchRunsScenario {
    pub fn new(client: TrackingClient, search: &SearchConfig) -> Self {
        Self {
            client,
            experiment_ids: search.experiment_ids.clone(),
            max_results: search.max_results,
        }
    }
}

#[async_trait]
impl LoadScenario for SearchRunsScenario {
    type Context = ();

    fn name(&self) -> &'static str {
        "search_runs"
    }

    async fn setup(&self) -> Result<(), Error> {
        Ok(())
    }

    async fn iterate(&self, _ctx: &()) -> Result<(), Error> {
        self.client
            .search_runs(&SearchRunsRequest {
                experiment_ids: self.experiment_ids.clone(),
                max_results: self.max_results,
            })
            .await
    }
}
