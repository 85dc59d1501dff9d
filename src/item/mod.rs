#[cfg(feature = "logger")]
/// This module provides a logger item writer, useful for dry runs and debugging.
pub mod logger;

#[cfg(feature = "csv")]
/// This module provides a CSV item reader.
pub mod csv;

#[cfg(feature = "rdbc")]
/// This module provides an RDBC (SQLite) item writer.
pub mod rdbc;
