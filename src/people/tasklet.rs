use log::info;

use crate::{
    core::step::{RepeatStatus, StepExecution, Tasklet},
    BatchError,
};

/// Tasklet marking a point of a job: it logs a message and finishes at once.
pub struct StepMarkerTasklet {
    message: String,
}

impl StepMarkerTasklet {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

impl Tasklet for StepMarkerTasklet {
    fn execute(&self, step_execution: &StepExecution) -> Result<RepeatStatus, BatchError> {
        info!("{}: {}", step_execution.name, self.message);
        Ok(RepeatStatus::Finished)
    }
}
