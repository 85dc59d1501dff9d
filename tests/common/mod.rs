#![allow(dead_code)]

pub mod mocks;

use std::{
    cell::{Cell, RefCell},
    io::Write,
};

use people_batch::{
    core::{
        item::{ItemWriter, ItemWriterResult},
        step::{RepeatStatus, StepExecution, Tasklet},
    },
    people::records::PersonOut,
    BatchError,
};
use tempfile::NamedTempFile;

/// Writer keeping every chunk it receives.
#[derive(Default)]
pub struct RecordingWriter {
    pub chunks: RefCell<Vec<Vec<PersonOut>>>,
}

impl RecordingWriter {
    pub fn sizes(&self) -> Vec<usize> {
        self.chunks.borrow().iter().map(Vec::len).collect()
    }
}

impl ItemWriter<PersonOut> for RecordingWriter {
    fn write(&self, items: &[PersonOut]) -> ItemWriterResult {
        self.chunks.borrow_mut().push(items.to_vec());
        Ok(())
    }
}

/// Tasklet counting how many times it ran.
#[derive(Default)]
pub struct CountingTasklet {
    pub calls: Cell<usize>,
}

impl Tasklet for CountingTasklet {
    fn execute(&self, _step_execution: &StepExecution) -> Result<RepeatStatus, BatchError> {
        self.calls.set(self.calls.get() + 1);
        Ok(RepeatStatus::Finished)
    }
}

/// `count` lines of `First<i>,Last<i>`.
pub fn people_lines(count: usize) -> String {
    (0..count)
        .map(|i| format!("First{},Last{}\n", i, i))
        .collect()
}

pub fn csv_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Unable to create temporary file");
    file.write_all(content.as_bytes())
        .expect("Unable to write temporary file");
    file
}
