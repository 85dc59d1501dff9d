use std::time::{Duration, Instant};

use log::{debug, error, info, warn};
use uuid::Uuid;

use crate::BatchError;

use super::{
    build_name,
    chunk::{Chunk, ChunkStatus},
    item::{ItemProcessor, ItemReader, ItemWriter},
};

/// Lifecycle of a step execution.
///
/// A step moves from `Starting` to `Started`, then ends either in
/// `Completed` or in one of the error states naming the failing component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    /// The step has not run yet.
    Starting,
    /// The step is running.
    Started,
    /// Every item was read, processed and written.
    Completed,
    /// The reader failed to open or to read an item.
    ReadError,
    /// The processor failed on an item.
    ProcessorError,
    /// The writer failed to open or to write a chunk.
    WriteError,
    /// The tasklet returned an error.
    TaskletError,
}

impl StepStatus {
    pub fn is_failed(&self) -> bool {
        matches!(
            self,
            StepStatus::ReadError
                | StepStatus::ProcessorError
                | StepStatus::WriteError
                | StepStatus::TaskletError
        )
    }
}

/// Report of one run of a step.
#[derive(Debug)]
pub struct StepExecution {
    /// Unique identifier for this step execution
    pub id: Uuid,
    /// Name of the executed step
    pub name: String,
    /// Current status of the step execution
    pub status: StepStatus,
    pub start_time: Instant,
    pub end_time: Instant,
    pub duration: Duration,
    /// Number of items successfully read
    pub read_count: usize,
    /// Number of items the processor left out
    pub filter_count: usize,
    /// Number of items successfully written
    pub write_count: usize,
    /// Number of chunks successfully written
    pub commit_count: usize,
    /// Number of errors encountered during reading
    pub read_error_count: usize,
    /// Number of errors encountered during processing
    pub process_error_count: usize,
    /// Number of items in chunks that failed to be written
    pub write_error_count: usize,
}

impl StepExecution {
    pub fn new(name: &str) -> Self {
        let now = Instant::now();
        Self {
            id: Uuid::new_v4(),
            name: name.to_owned(),
            status: StepStatus::Starting,
            start_time: now,
            end_time: now,
            duration: Duration::default(),
            read_count: 0,
            filter_count: 0,
            write_count: 0,
            commit_count: 0,
            read_error_count: 0,
            process_error_count: 0,
            write_error_count: 0,
        }
    }
}

/// An independent, sequential phase of a job.
///
/// Steps hold no state between runs: everything a run produces is recorded
/// in the `StepExecution` passed in, which lets several jobs share one step.
pub trait Step {
    fn get_name(&self) -> &str;

    /// Executes the step.
    ///
    /// # Returns
    /// - `Ok(())`: the step completed, `step_execution.status` is `Completed`
    /// - `Err(BatchError)`: the error which stopped the step, the status names
    ///   the failing component
    fn execute(&self, step_execution: &mut StepExecution) -> Result<(), BatchError>;
}

/// Whether a tasklet wants to be called again.
#[derive(Debug, PartialEq)]
pub enum RepeatStatus {
    /// The tasklet can continue to execute.
    Continuable,
    /// The tasklet has finished executing.
    Finished,
}

/// A one-shot action run by a [`TaskletStep`], outside the chunk model.
pub trait Tasklet {
    fn execute(&self, step_execution: &StepExecution) -> Result<RepeatStatus, BatchError>;
}

/// Step running a tasklet until it reports `Finished`.
pub struct TaskletStep<'a> {
    name: String,
    tasklet: &'a dyn Tasklet,
}

impl Step for TaskletStep<'_> {
    fn get_name(&self) -> &str {
        &self.name
    }

    fn execute(&self, step_execution: &mut StepExecution) -> Result<(), BatchError> {
        let start_time = Instant::now();
        step_execution.start_time = start_time;
        step_execution.status = StepStatus::Started;

        info!(
            "Start of step: {}, id: {}",
            step_execution.name, step_execution.id
        );

        let result = loop {
            match self.tasklet.execute(step_execution) {
                Ok(RepeatStatus::Continuable) => debug!("Tasklet is continuable"),
                Ok(RepeatStatus::Finished) => break Ok(()),
                Err(err) => break Err(err),
            }
        };

        match &result {
            Ok(()) => step_execution.status = StepStatus::Completed,
            Err(err) => {
                error!("Tasklet of step {} failed: {}", step_execution.name, err);
                step_execution.status = StepStatus::TaskletError;
            }
        }

        info!(
            "End of step: {}, id: {}",
            step_execution.name, step_execution.id
        );

        step_execution.end_time = Instant::now();
        step_execution.duration = start_time.elapsed();

        result
    }
}

/// Step reading, processing and writing items in chunks of `chunk_size`.
pub struct ChunkOrientedStep<'a, I, O> {
    name: String,
    /// Component responsible for reading items from the source
    reader: &'a dyn ItemReader<I>,
    /// Component responsible for processing items
    processor: &'a dyn ItemProcessor<I, O>,
    /// Component responsible for writing items to the destination
    writer: &'a dyn ItemWriter<O>,
    /// Maximum number of items per written chunk
    chunk_size: usize,
}

impl<I, O> Step for ChunkOrientedStep<'_, I, O> {
    fn get_name(&self) -> &str {
        &self.name
    }

    fn execute(&self, step_execution: &mut StepExecution) -> Result<(), BatchError> {
        let start_time = Instant::now();
        step_execution.start_time = start_time;
        step_execution.status = StepStatus::Started;

        info!(
            "Start of step: {}, id: {}",
            step_execution.name, step_execution.id
        );

        let result = self
            .open(step_execution)
            .and_then(|()| self.process_items(step_execution));

        Self::manage_error(self.reader.close());
        Self::manage_error(self.writer.close());

        if result.is_ok() {
            step_execution.status = StepStatus::Completed;
        }

        info!(
            "End of step: {}, id: {}, status: {:?}, read: {}, written: {}, filtered: {}",
            step_execution.name,
            step_execution.id,
            step_execution.status,
            step_execution.read_count,
            step_execution.write_count,
            step_execution.filter_count
        );

        step_execution.end_time = Instant::now();
        step_execution.duration = start_time.elapsed();

        result
    }
}

impl<I, O> ChunkOrientedStep<'_, I, O> {
    fn open(&self, step_execution: &mut StepExecution) -> Result<(), BatchError> {
        if let Err(err) = self.reader.open() {
            error!("Unable to open reader: {}", err);
            step_execution.status = StepStatus::ReadError;
            return Err(err);
        }

        if let Err(err) = self.writer.open() {
            error!("Unable to open writer: {}", err);
            step_execution.status = StepStatus::WriteError;
            return Err(err);
        }

        Ok(())
    }

    /// Pulls items one at a time until the reader is exhausted.
    ///
    /// Each item goes through the processor; kept items are buffered and the
    /// buffer is written as soon as it holds `chunk_size` items. The partial
    /// last chunk is written once the reader returns `None`. The first error
    /// stops the loop: chunks already written stay written.
    fn process_items(&self, step_execution: &mut StepExecution) -> Result<(), BatchError> {
        let mut chunk = Chunk::new(self.chunk_size);

        loop {
            let item = match self.reader.read() {
                Ok(Some(item)) => item,
                Ok(None) => break,
                Err(err) => {
                    error!("Error reading item: {}", err);
                    step_execution.read_error_count += 1;
                    step_execution.status = StepStatus::ReadError;
                    return Err(err);
                }
            };
            step_execution.read_count += 1;

            match self.processor.process(&item) {
                Ok(Some(processed)) => {
                    if chunk.add_item(processed) == ChunkStatus::Full {
                        self.write_chunk(step_execution, &mut chunk)?;
                    }
                }
                Ok(None) => {
                    debug!("Item filtered by processor");
                    step_execution.filter_count += 1;
                }
                Err(err) => {
                    error!("Error processing item: {}", err);
                    step_execution.process_error_count += 1;
                    step_execution.status = StepStatus::ProcessorError;
                    return Err(err);
                }
            }
        }

        if !chunk.is_empty() {
            self.write_chunk(step_execution, &mut chunk)?;
        }

        Ok(())
    }

    fn write_chunk(
        &self,
        step_execution: &mut StepExecution,
        chunk: &mut Chunk<O>,
    ) -> Result<(), BatchError> {
        debug!("Writing chunk of {} items", chunk.len());

        let result = self
            .writer
            .write(chunk.get_items())
            .and_then(|()| self.writer.flush());

        match result {
            Ok(()) => {
                step_execution.write_count += chunk.len();
                step_execution.commit_count += 1;
                chunk.clear();
                Ok(())
            }
            Err(err) => {
                error!("Error writing items: {}", err);
                step_execution.write_error_count += chunk.len();
                step_execution.status = StepStatus::WriteError;
                Err(err)
            }
        }
    }

    fn manage_error(result: Result<(), BatchError>) {
        if let Err(error) = result {
            warn!("Non-fatal error: {}", error);
        }
    }
}

/// Entry point for building steps.
///
/// # Example
///
/// ```
/// use people_batch::core::item::{
///     ItemReader, ItemReaderResult, ItemWriter, ItemWriterResult, PassThroughProcessor,
/// };
/// use people_batch::core::step::{Step, StepBuilder, StepExecution, StepStatus};
///
/// struct EmptyReader;
/// impl ItemReader<String> for EmptyReader {
///     fn read(&self) -> ItemReaderResult<String> {
///         Ok(None)
///     }
/// }
///
/// struct NoopWriter;
/// impl ItemWriter<String> for NoopWriter {
///     fn write(&self, _items: &[String]) -> ItemWriterResult {
///         Ok(())
///     }
/// }
///
/// let (reader, processor, writer) = (EmptyReader, PassThroughProcessor, NoopWriter);
/// let step = StepBuilder::new("copy")
///     .chunk::<String, String>(10)
///     .reader(&reader)
///     .processor(&processor)
///     .writer(&writer)
///     .build()
///     .unwrap();
///
/// let mut execution = StepExecution::new(step.get_name());
/// step.execute(&mut execution).unwrap();
/// assert_eq!(execution.status, StepStatus::Completed);
/// ```
pub struct StepBuilder {
    name: String,
}

impl StepBuilder {
    /// Starts a step with the given name. An empty name is replaced by a random one.
    pub fn new(name: &str) -> Self {
        let name = if name.is_empty() {
            build_name()
        } else {
            name.to_string()
        };

        Self { name }
    }

    pub fn tasklet<'a>(self, tasklet: &'a dyn Tasklet) -> TaskletBuilder<'a> {
        TaskletBuilder {
            name: self.name,
            tasklet,
        }
    }

    pub fn chunk<'a, I, O>(self, chunk_size: usize) -> ChunkOrientedStepBuilder<'a, I, O> {
        ChunkOrientedStepBuilder::new(&self.name).chunk_size(chunk_size)
    }
}

pub struct TaskletBuilder<'a> {
    name: String,
    tasklet: &'a dyn Tasklet,
}

impl<'a> TaskletBuilder<'a> {
    pub fn build(self) -> TaskletStep<'a> {
        TaskletStep {
            name: self.name,
            tasklet: self.tasklet,
        }
    }
}

pub struct ChunkOrientedStepBuilder<'a, I, O> {
    name: String,
    reader: Option<&'a dyn ItemReader<I>>,
    processor: Option<&'a dyn ItemProcessor<I, O>>,
    writer: Option<&'a dyn ItemWriter<O>>,
    chunk_size: usize,
}

impl<'a, I, O> ChunkOrientedStepBuilder<'a, I, O> {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            reader: None,
            processor: None,
            writer: None,
            chunk_size: 10,
        }
    }

    pub fn reader(mut self, reader: &'a dyn ItemReader<I>) -> Self {
        self.reader = Some(reader);
        self
    }

    pub fn processor(mut self, processor: &'a dyn ItemProcessor<I, O>) -> Self {
        self.processor = Some(processor);
        self
    }

    pub fn writer(mut self, writer: &'a dyn ItemWriter<O>) -> Self {
        self.writer = Some(writer);
        self
    }

    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Builds the step.
    ///
    /// # Errors
    /// `BatchError::Configuration` when the reader, processor or writer is
    /// missing, or when the chunk size is zero.
    pub fn build(self) -> Result<ChunkOrientedStep<'a, I, O>, BatchError> {
        let missing = |component: &str| {
            BatchError::Configuration(format!(
                "{} is required for building step {}",
                component, self.name
            ))
        };

        let reader = self.reader.ok_or_else(|| missing("Reader"))?;
        let processor = self.processor.ok_or_else(|| missing("Processor"))?;
        let writer = self.writer.ok_or_else(|| missing("Writer"))?;

        if self.chunk_size == 0 {
            return Err(BatchError::Configuration(format!(
                "Chunk size of step {} must be at least 1",
                self.name
            )));
        }

        Ok(ChunkOrientedStep {
            name: self.name,
            reader,
            processor,
            writer,
            chunk_size: self.chunk_size,
        })
    }
}
