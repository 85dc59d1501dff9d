use std::{fmt, path::PathBuf, str::FromStr};

use clap::Args;

use crate::BatchError;

use super::processor::CaseMapping;

/// Settings of the people jobs.
///
/// Every field can come from the command line or from the environment
/// (a `.env` file included).
#[derive(Debug, Clone, Args)]
pub struct BatchConfig {
    /// Header-less CSV file with one `first name,last name` pair per line
    #[arg(long, env = "PEOPLE_BATCH_INPUT", default_value = "data/sample-data.csv")]
    pub input: PathBuf,

    /// SQLite database receiving the `people` rows
    #[arg(long, env = "PEOPLE_BATCH_DATABASE_URL", default_value = "sqlite::memory:")]
    pub database_url: String,

    /// Chunk size of the importUserJob step
    #[arg(long, env = "PEOPLE_BATCH_IMPORT_CHUNK_SIZE", default_value_t = 10)]
    pub import_chunk_size: usize,

    /// Chunk size of step1 in job1 and job2
    #[arg(long, env = "PEOPLE_BATCH_STEP1_CHUNK_SIZE", default_value_t = 1)]
    pub step1_chunk_size: usize,

    /// Chunk size of step2 in job1 and job2
    #[arg(long, env = "PEOPLE_BATCH_STEP2_CHUNK_SIZE", default_value_t = 10)]
    pub step2_chunk_size: usize,

    /// Case mapping used to uppercase names
    #[arg(
        long,
        env = "PEOPLE_BATCH_CASE_MAPPING",
        value_enum,
        default_value_t = CaseMapping::Ascii
    )]
    pub case_mapping: CaseMapping,

    /// Log the transformed people instead of inserting them
    #[arg(long, env = "PEOPLE_BATCH_DRY_RUN")]
    pub dry_run: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("data/sample-data.csv"),
            database_url: "sqlite::memory:".to_string(),
            import_chunk_size: 10,
            step1_chunk_size: 1,
            step2_chunk_size: 10,
            case_mapping: CaseMapping::Ascii,
            dry_run: false,
        }
    }
}

/// The jobs that can be launched, by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobName {
    /// `step1` alone.
    ImportUserJob,
    /// `step1` then `step2`.
    Job1,
    /// `step1`, `step2`, then the `step3` marker.
    Job2,
}

impl FromStr for JobName {
    type Err = BatchError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "importUserJob" => Ok(JobName::ImportUserJob),
            "job1" => Ok(JobName::Job1),
            "job2" => Ok(JobName::Job2),
            other => Err(BatchError::Configuration(format!(
                "Unknown job {}, expected one of importUserJob, job1, job2",
                other
            ))),
        }
    }
}

impl fmt::Display for JobName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            JobName::ImportUserJob => "importUserJob",
            JobName::Job1 => "job1",
            JobName::Job2 => "job2",
        };
        write!(f, "{}", name)
    }
}
