//! Mock version of the people writer.
use mockall::mock;

use people_batch::{
    core::item::{ItemWriter, ItemWriterResult},
    people::records::PersonOut,
};

mock! {
    pub Writer {}
    impl ItemWriter<PersonOut> for Writer {
        fn write(&self, items: &[PersonOut]) -> ItemWriterResult;
        fn flush(&self) -> ItemWriterResult;
        fn open(&self) -> ItemWriterResult;
        fn close(&self) -> ItemWriterResult;
    }
}
