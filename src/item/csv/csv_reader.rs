use csv::{ReaderBuilder, StringRecord, StringRecordsIntoIter, Terminator, Trim};
use log::debug;
use serde::de::DeserializeOwned;
use std::{
    cell::RefCell,
    fs::File,
    io::{Cursor, Read},
    marker::PhantomData,
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::{
    core::item::{ItemReader, ItemReaderResult},
    error::BatchError,
};

/// Where the CSV data comes from. Both kinds can be reopened from the start.
enum CsvSource {
    File(PathBuf),
    Memory(Arc<[u8]>),
}

impl CsvSource {
    fn open(&self) -> Result<Box<dyn Read>, BatchError> {
        match self {
            CsvSource::File(path) => File::open(path)
                .map(|file| Box::new(file) as Box<dyn Read>)
                .map_err(|error| {
                    BatchError::ItemReader(format!(
                        "Unable to open {}: {}",
                        path.display(),
                        error
                    ))
                }),
            CsvSource::Memory(bytes) => Ok(Box::new(Cursor::new(Arc::clone(bytes)))),
        }
    }
}

/// A CSV item reader that implements the `ItemReader` trait.
///
/// This reader deserializes CSV data into Rust structs row by row
/// using Serde's deserialization capabilities.
///
/// # Implementation Details
///
/// - The record iterator lives in a `RefCell` so that `read` can take `&self`
/// - `open` rebuilds the iterator from the first line of the source, so the
///   same reader yields the same items on every run
/// - `read` opens the source on first use when `open` was not called
/// - When field names are configured, a line with a different number of
///   fields is rejected
///
/// # Examples
///
/// ```
/// use people_batch::item::csv::csv_reader::CsvItemReaderBuilder;
/// use people_batch::core::item::ItemReader;
/// use serde::Deserialize;
///
/// #[derive(Debug, Deserialize)]
/// struct Record {
///     name: String,
///     value: i32,
/// }
///
/// let reader = CsvItemReaderBuilder::<Record>::new()
///     .has_headers(true)
///     .from_bytes("name,value\nfoo,123\nbar,456\n");
///
/// let record = reader.read().unwrap().unwrap();
/// assert_eq!(record.name, "foo");
/// assert_eq!(record.value, 123);
///
/// let record = reader.read().unwrap().unwrap();
/// assert_eq!(record.name, "bar");
///
/// assert!(reader.read().unwrap().is_none());
/// ```
pub struct CsvItemReader<T> {
    source: CsvSource,
    delimiter: u8,
    terminator: Terminator,
    has_headers: bool,
    /// Field names bound to the columns of header-less data
    names: Option<StringRecord>,
    records: RefCell<Option<StringRecordsIntoIter<Box<dyn Read>>>>,
    _item: PhantomData<fn() -> T>,
}

impl<T> CsvItemReader<T> {
    fn open_records(&self) -> Result<StringRecordsIntoIter<Box<dyn Read>>, BatchError> {
        let rdr = self.source.open()?;

        let records = ReaderBuilder::new()
            .trim(Trim::All)
            .delimiter(self.delimiter)
            .terminator(self.terminator)
            .has_headers(self.has_headers)
            .flexible(false)
            .from_reader(rdr)
            .into_records();

        Ok(records)
    }

    fn check_field_count(&self, record: &StringRecord) -> Result<(), BatchError> {
        match &self.names {
            Some(names) if names.len() != record.len() => {
                let line = record.position().map_or(0, |position| position.line());
                Err(BatchError::ItemReader(format!(
                    "line {}: expected {} fields, found {}",
                    line,
                    names.len(),
                    record.len()
                )))
            }
            _ => Ok(()),
        }
    }
}

impl<T: DeserializeOwned> ItemReader<T> for CsvItemReader<T> {
    /// Reads and deserializes the next line.
    ///
    /// # Returns
    /// - `Ok(Some(record))` if a record is successfully read
    /// - `Ok(None)` if there are no more records to read
    /// - `Err(BatchError::ItemReader(error))` for an unreadable source, invalid
    ///   UTF-8, a wrong field count or a value which cannot be deserialized
    fn read(&self) -> ItemReaderResult<T> {
        let mut current = self.records.borrow_mut();

        if current.is_none() {
            *current = Some(self.open_records()?);
        }

        let Some(records) = current.as_mut() else {
            return Ok(None);
        };

        match records.next() {
            Some(Ok(string_record)) => {
                self.check_field_count(&string_record)?;

                string_record
                    .deserialize(self.names.as_ref())
                    .map(Some)
                    .map_err(|error| BatchError::ItemReader(error.to_string()))
            }
            Some(Err(error)) => Err(BatchError::ItemReader(error.to_string())),
            None => Ok(None),
        }
    }

    fn open(&self) -> Result<(), BatchError> {
        debug!("Opening CSV reader");
        let records = self.open_records()?;
        self.records.replace(Some(records));
        Ok(())
    }

    fn close(&self) -> Result<(), BatchError> {
        self.records.replace(None);
        Ok(())
    }
}

/// A builder for configuring CSV item reading.
///
/// # Default Configuration
///
/// - Delimiter: comma (,)
/// - Terminator: CRLF, which also accepts bare LF line endings
/// - Headers: disabled
/// - Trimming: All fields trimmed
/// - Field names: none, columns map to fields by position
pub struct CsvItemReaderBuilder<T> {
    delimiter: u8,
    terminator: Terminator,
    has_headers: bool,
    names: Vec<String>,
    _item: PhantomData<fn() -> T>,
}

impl<T> Default for CsvItemReaderBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> CsvItemReaderBuilder<T> {
    pub fn new() -> Self {
        Self {
            delimiter: b',',
            terminator: Terminator::CRLF,
            has_headers: false,
            names: Vec::new(),
            _item: PhantomData,
        }
    }

    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn terminator(mut self, terminator: Terminator) -> Self {
        self.terminator = terminator;
        self
    }

    /// Sets whether the first line holds the column names.
    pub fn has_headers(mut self, yes: bool) -> Self {
        self.has_headers = yes;
        self
    }

    /// Names the columns of header-less data, in column order.
    ///
    /// Every line must then have exactly `names.len()` fields.
    pub fn names(mut self, names: &[&str]) -> Self {
        self.names = names.iter().map(|name| name.to_string()).collect();
        self
    }

    /// Creates a reader over a file. The file is opened when the reader is.
    pub fn from_path<P: AsRef<Path>>(self, path: P) -> CsvItemReader<T> {
        self.build(CsvSource::File(path.as_ref().to_path_buf()))
    }

    /// Creates a reader over in-memory data.
    pub fn from_bytes<B: AsRef<[u8]>>(self, bytes: B) -> CsvItemReader<T> {
        self.build(CsvSource::Memory(Arc::from(bytes.as_ref())))
    }

    fn build(self, source: CsvSource) -> CsvItemReader<T> {
        let names = if self.names.is_empty() {
            None
        } else {
            Some(StringRecord::from(self.names))
        };

        CsvItemReader {
            source,
            delimiter: self.delimiter,
            terminator: self.terminator,
            has_headers: self.has_headers,
            names,
            records: RefCell::new(None),
            _item: PhantomData,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use serde::Deserialize;
    use tempfile::NamedTempFile;

    use crate::{core::item::ItemReader, error::BatchError};

    use super::CsvItemReaderBuilder;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Name {
        first_name: String,
        last_name: String,
    }

    fn read_all(reader: &impl ItemReader<Name>) -> Result<Vec<Name>, BatchError> {
        let mut names = Vec::new();
        while let Some(name) = reader.read()? {
            names.push(name);
        }
        Ok(names)
    }

    #[test]
    fn named_fields_are_read_in_file_order() -> Result<(), BatchError> {
        let reader = CsvItemReaderBuilder::<Name>::new()
            .names(&["first_name", "last_name"])
            .from_bytes("Jill,Doe\nJoe, Smith\r\n");

        let names = read_all(&reader)?;

        assert_eq!(
            names,
            vec![
                Name {
                    first_name: "Jill".to_string(),
                    last_name: "Doe".to_string(),
                },
                Name {
                    first_name: "Joe".to_string(),
                    last_name: "Smith".to_string(),
                },
            ]
        );
        Ok(())
    }

    #[test]
    fn extra_field_is_a_read_error() {
        let reader = CsvItemReaderBuilder::<Name>::new()
            .names(&["first_name", "last_name"])
            .from_bytes("Jill,Doe,Extra\n");

        let result = reader.read();

        match result {
            Err(BatchError::ItemReader(message)) => {
                assert!(message.contains("expected 2 fields, found 3"))
            }
            other => panic!("Expected BatchError::ItemReader, got {:?}", other),
        }
    }

    #[test]
    fn missing_field_is_a_read_error() {
        let reader = CsvItemReaderBuilder::<Name>::new()
            .names(&["first_name", "last_name"])
            .from_bytes("Jill\n");

        assert!(matches!(reader.read(), Err(BatchError::ItemReader(_))));
    }

    #[test]
    fn invalid_utf8_is_a_read_error() {
        let reader = CsvItemReaderBuilder::<Name>::new()
            .names(&["first_name", "last_name"])
            .from_bytes(b"J\xffll,Doe\n");

        assert!(matches!(reader.read(), Err(BatchError::ItemReader(_))));
    }

    #[test]
    fn open_restarts_from_the_first_line() -> Result<(), BatchError> {
        let reader = CsvItemReaderBuilder::<Name>::new()
            .names(&["first_name", "last_name"])
            .from_bytes("Jill,Doe\nJoe,Smith\n");

        reader.open()?;
        let first = read_all(&reader)?;
        reader.open()?;
        let second = read_all(&reader)?;

        assert_eq!(first.len(), 2);
        assert_eq!(first, second);
        Ok(())
    }

    #[test]
    fn file_source_is_read_lazily() -> Result<(), Box<dyn std::error::Error>> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "Jane,Doe")?;

        let reader = CsvItemReaderBuilder::<Name>::new()
            .names(&["first_name", "last_name"])
            .from_path(file.path());

        let names = read_all(&reader)?;

        assert_eq!(names[0].first_name, "Jane");
        Ok(())
    }

    #[test]
    fn missing_file_fails_on_open() {
        let reader = CsvItemReaderBuilder::<Name>::new().from_path("does/not/exist.csv");

        assert!(matches!(reader.open(), Err(BatchError::ItemReader(_))));
    }

    #[test]
    fn empty_source_has_no_item() -> Result<(), BatchError> {
        let reader = CsvItemReaderBuilder::<Name>::new()
            .names(&["first_name", "last_name"])
            .from_bytes("");

        assert!(read_all(&reader)?.is_empty());
        Ok(())
    }
}
