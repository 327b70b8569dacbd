//! Sequential stage orchestration.

use tracing::{error, info};

use crate::errors::PipelineError;
use crate::stages::PipelineStage;

/// Runs the pipeline stages strictly in order, halting on the first
/// failure. Later stages read what earlier stages wrote, so there is
/// no value in continuing past a failed stage.
pub struct Orchestrator {
    stages: Vec<Box<dyn PipelineStage>>,
}

impl Orchestrator {
    pub fn new(stages: Vec<Box<dyn PipelineStage>>) -> Self {
        Self { stages }
    }

    /// Run all stages to completion.
    pub async fn run(&self) -> Result<(), PipelineError> {
        for stage in &self.stages {
            info!(stage = stage.name(), "Starting stage");

            if let Err(e) = stage.run().await {
                error!(stage = stage.name(), error = %e, "Stage failed");
                return Err(e);
            }

            info!(stage = stage.name(), "Stage completed");
        }

        info!(stages = self.stages.len(), "Pipeline completed");
        Ok(())
    }
}
