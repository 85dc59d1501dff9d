use crate::error::BatchError;

/// Result of a read: `Ok(Some(item))` for an item, `Ok(None)` at the end of the source.
pub type ItemReaderResult<I> = Result<Option<I>, BatchError>;

/// Result of processing one item: `Ok(None)` filters the item out of the chunk.
pub type ItemProcessorResult<O> = Result<Option<O>, BatchError>;

/// Result of writing one chunk.
pub type ItemWriterResult = Result<(), BatchError>;

/// Produces the input of a step, one item at a time.
///
/// A reader is finite: once it returns `Ok(None)` the step considers the
/// source exhausted. Calling [`ItemReader::open`] rewinds the reader to the
/// first item, so the same reader can be shared by several steps or runs.
pub trait ItemReader<I> {
    /// Reads the next item.
    ///
    /// # Returns
    /// - `Ok(Some(item))` when an item was read
    /// - `Ok(None)` when the source is exhausted
    /// - `Err(BatchError::ItemReader)` when the next item is malformed
    fn read(&self) -> ItemReaderResult<I>;

    /// Prepares the reader, positioning it before the first item.
    fn open(&self) -> Result<(), BatchError> {
        Ok(())
    }

    /// Releases the resources held by the reader.
    fn close(&self) -> Result<(), BatchError> {
        Ok(())
    }
}

/// Transforms one input item into one output item.
///
/// Processors are pure: no I/O and no shared mutable state.
pub trait ItemProcessor<I, O> {
    /// Processes an item.
    ///
    /// # Returns
    /// - `Ok(Some(item))` with the transformed item
    /// - `Ok(None)` to leave the item out of the chunk
    /// - `Err(BatchError::ItemProcessor)` when the item cannot be transformed
    fn process(&self, item: &I) -> ItemProcessorResult<O>;
}

/// Persists a chunk of output items as a single bulk operation.
pub trait ItemWriter<O> {
    /// Writes every item of the chunk, or none of them.
    fn write(&self, items: &[O]) -> ItemWriterResult;

    /// Flushes buffered output, called after every successful write.
    fn flush(&self) -> ItemWriterResult {
        Ok(())
    }

    fn open(&self) -> ItemWriterResult {
        Ok(())
    }

    fn close(&self) -> ItemWriterResult {
        Ok(())
    }
}

/// Processor handing every item through unchanged.
#[derive(Default)]
pub struct PassThroughProcessor;

impl<T: Clone> ItemProcessor<T, T> for PassThroughProcessor {
    fn process(&self, item: &T) -> ItemProcessorResult<T> {
        Ok(Some(item.clone()))
    }
}
