use rand::distr::{Alphanumeric, SampleString};

/// Reader, processor and writer contracts.
pub mod item;

/// Bounded buffer of processed items awaiting a write.
pub mod chunk;

/// Chunk-oriented and tasklet steps.
pub mod step;

/// Jobs, job executions and listeners.
pub mod job;

/// Job parameters identifying a run.
pub mod parameters;

/// Generates a random name consisting of alphanumeric characters.
///
/// # Returns
///
/// A `String` containing the generated random name.
fn build_name() -> String {
    Alphanumeric.sample_string(&mut rand::rng(), 8)
}
