use async_trait::async_trait;

use crate::api::SearchExperimentsRequest;
use crate::client::TrackingClient;
use crate::config::SearchConfig;
use crate::error::Error;

use super::LoadScenario;

/// Measures experiment-search throughput. One capped `experiments/search`
/// per iteration; results are discarded.
pub struct SearchExperimentsScenario {
    client: TrackingClient,
    max_results: u32,
}

impl SearchExperimentsScenario {
    pub fn new(client: TrackingClient, search: &SearchConfig) -> Self {
        Self {
            client,
            max_results: search.max_results,
        }
    }
}

#[async_trait]
impl LoadScenario for SearchExperimentsScenario {
    type Context = ();

    fn name(&self) -> &'static str {
        "search_experiments"
    }

    async fn setup(&self) -> Result<(), Error> {
        Ok(())
    }

    async fn iterate(&self, _ctx: &()) -> Result<(), Error> {
        self.client
            .search_experiments(&SearchExperimentsRequest {
                max_results: self.max_results,
            })
            .await
    }
}
