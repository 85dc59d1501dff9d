#![cfg_attr(docsrs, feature(doc_cfg))]

/*!
 # People Batch

 A chunk-oriented batch job in the Spring Batch style: read people from a CSV
 file, uppercase their names, and insert them into a relational table.

 ## Core Concepts

- **Job:** Represents the entire batch process. A `Job` is composed of one or more `Step`s
  run in sequence.
- **Step:** An independent, sequential phase of a job. A chunk-oriented step reads, processes
  and writes items; a tasklet step runs a single action.
- **ItemReader:** Retrieves the input of a `Step`, one item at a time.
- **ItemProcessor:** Transforms one item, or filters it out.
- **ItemWriter:** Persists the output of a `Step`, one chunk of items at a time.

 ## Chunk processing

A chunk-oriented step pulls items from its reader one at a time, hands each
to the processor and buffers the result. When the buffer holds `chunk` items
it is written in one bulk operation, then cleared. The last, possibly
smaller, chunk is written once the reader is exhausted. The first read,
process or write error stops the step and the job; chunks already written
stay written.

 ## Features

| **Feature**   | **Description**                                             |
|---------------|-------------------------------------------------------------|
| csv           | Enables the CSV `ItemReader`                                |
| rdbc-sqlite   | Enables the RDBC `ItemWriter` for SQLite                    |
| logger        | Enables a logger `ItemWriter`, useful for dry runs          |
| full          | Enables all available features and the `people` application |

 ## Getting Started

```rust
# use people_batch::{
#     core::{
#         item::{ItemProcessor, ItemProcessorResult, ItemWriter, ItemWriterResult},
#         job::{Job, JobBuilder},
#         parameters::JobParametersBuilder,
#         step::StepBuilder,
#     },
#     item::csv::csv_reader::CsvItemReaderBuilder,
#     BatchError,
# };
# use serde::Deserialize;
# use std::cell::RefCell;
#[derive(Deserialize)]
struct Person {
    first_name: String,
    last_name: String,
}

struct UpperCaseProcessor;

impl ItemProcessor<Person, String> for UpperCaseProcessor {
    fn process(&self, item: &Person) -> ItemProcessorResult<String> {
        Ok(Some(format!("{} {}", item.first_name, item.last_name).to_ascii_uppercase()))
    }
}

#[derive(Default)]
struct VecWriter {
    chunks: RefCell<Vec<Vec<String>>>,
}

impl ItemWriter<String> for VecWriter {
    fn write(&self, items: &[String]) -> ItemWriterResult {
        self.chunks.borrow_mut().push(items.to_vec());
        Ok(())
    }
}

fn main() -> Result<(), BatchError> {
    let reader = CsvItemReaderBuilder::<Person>::new()
        .names(&["first_name", "last_name"])
        .from_bytes("Jill,Doe\nJoe,Smith\nJane,Roe\n");
    let processor = UpperCaseProcessor;
    let writer = VecWriter::default();

    let step = StepBuilder::new("step1")
        .chunk::<Person, String>(2)
        .reader(&reader)
        .processor(&processor)
        .writer(&writer)
        .build()?;

    let job = JobBuilder::new().name("importUserJob").start(&step).build()?;
    job.run(&JobParametersBuilder::new().add_current_time().build())?;

    assert_eq!(
        *writer.chunks.borrow(),
        vec![vec!["JILL DOE", "JOE SMITH"], vec!["JANE ROE"]]
    );
    Ok(())
}
```

 ## License
 Licensed under either of

 -   Apache License, Version 2.0
     ([LICENSE-APACHE](LICENSE-APACHE) or <http://www.apache.org/licenses/LICENSE-2.0>)
 -   MIT license
     ([LICENSE-MIT](LICENSE-MIT) or <http://opensource.org/licenses/MIT>)

 at your option.
 */

/// Core module for batch operations
pub mod core;

/// Error types for batch operations
pub mod error;

#[doc(inline)]
pub use error::*;

/// Set of items readers / writers (csv reader, sqlite writer, logger writer)
pub mod item;

#[cfg(feature = "full")]
/// The people import jobs
pub mod people;
