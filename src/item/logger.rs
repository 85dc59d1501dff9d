use log::info;
use serde::Serialize;

use crate::{
    core::item::{ItemWriter, ItemWriterResult},
    BatchError,
};

/// Writer logging every item of a chunk as JSON instead of persisting it.
#[derive(Default)]
pub struct LoggerWriter {}

impl<T> ItemWriter<T> for LoggerWriter
where
    T: Serialize,
{
    fn write(&self, items: &[T]) -> ItemWriterResult {
        for item in items {
            let record =
                serde_json::to_string(item).map_err(|e| BatchError::ItemWriter(e.to_string()))?;
            info!("Record:{}", record);
        }
        Ok(())
    }
}
