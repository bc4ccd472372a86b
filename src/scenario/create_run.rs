use async_trait::async_trait;
use tracing::{debug, info};

use crate::api::{CreateExperimentRequest, CreateRunRequest};
use crate::client::TrackingClient;
use crate::error::Error;

use super::LoadScenario;

/// Context produced by experiment-creation setup: the identifier every
/// iteration attaches its runs to. Never mutated after setup.
#[derive(Debug, Clone)]
pub struct ExperimentContext {
    pub experiment_id: String,
}

/// Measures run-creation throughput: one `runs/create` per iteration,
/// attached to an experiment created once during setup.
pub struct CreateRunScenario {
    client: TrackingClient,
}

impl CreateRunScenario {
    pub fn new(client: TrackingClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl LoadScenario for CreateRunScenario {
    type Context = ExperimentContext;

    fn name(&self) -> &'static str {
        "create_run"
    }

    async fn setup(&self) -> Result<ExperimentContext, Error> {
        let request = CreateExperimentRequest::unique();
        let experiment_id = self
            .client
            .create_experiment(&request)
            .await
            .map_err(|e| Error::Setup(Box::new(e)))?;
        info!(%experiment_id, name = %request.name, "created load-test experiment");
        Ok(ExperimentContext { experiment_id })
    }

    async fn iterate(&self, ctx: &ExperimentContext) -> Result<(), Error> {
        let run_id = self
            .client
            .create_run(&CreateRunRequest::now(&ctx.experiment_id))
            .await?;
        debug!(%run_id, "created run");
        Ok(())
    }
}
