//! Scenarios an external load-generation harness drives against the
//! tracking server.
//!
//! The contract mirrors how such harnesses schedule work: [`LoadScenario::setup`]
//! runs exactly once per load-test run, before any timed iteration, and
//! produces a context shared read-only by every virtual user.
//! [`LoadScenario::iterate`] is then invoked repeatedly, typically from many
//! concurrent tasks. A failed iteration is recorded by the harness and
//! affects no other iteration; scenarios perform no retries of their own.
//! Stopping iteration at the end of the configured test duration is likewise
//! the harness's job.

use async_trait::async_trait;

use crate::error::Error;

pub mod create_run;
pub mod search_experiments;
pub mod search_runs;

pub use create_run::*;
pub use search_experiments::*;
pub use search_runs::*;

#[async_trait]
pub trait LoadScenario: Send + Sync {
    /// Shared state produced once by [`setup`](Self::setup) and observed
    /// read-only by every iteration.
    type Context: Send + Sync;

    fn name(&self) -> &'static str;

    /// One-time setup before any timed iteration. Failure here is fatal to
    /// the whole run.
    async fn setup(&self) -> Result<Self::Context, Error>;

    /// One virtual-user iteration: build and issue a single request.
    async fn iterate(&self, ctx: &Self::Context) -> Result<(), Error>;
}
