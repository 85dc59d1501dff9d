use thiserror::Error;

#[derive(Error, Debug)]
#[non_exhaustive]
/// Batch error
pub enum BatchError {
    #[error("ItemReader from: {0}")]
    /// A source line could not be read or mapped to an item.
    ItemReader(String),

    #[error("ItemProcessor from: {0}")]
    /// The processor failed to transform an item.
    ItemProcessor(String),

    #[error("ItemWriter from: {0}")]
    /// A chunk could not be persisted.
    ItemWriter(String),

    #[error("Configuration error: {0}")]
    /// A job, step or component is missing or invalid.
    Configuration(String),

    #[error("Error occurred in step: {0}")]
    /// A step of a job failed; carries the step name.
    Step(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
