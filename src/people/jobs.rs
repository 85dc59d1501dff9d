use log::info;
use sqlx::SqlitePool;

use crate::{
    core::{
        item::ItemWriter,
        job::{Job, JobBuilder, JobExecution, JobResult},
        parameters::JobParameters,
        step::StepBuilder,
    },
    item::{
        csv::csv_reader::{CsvItemReader, CsvItemReaderBuilder},
        logger::LoggerWriter,
    },
};

use super::{
    config::{BatchConfig, JobName},
    listener::JobCompletionNotificationListener,
    processor::PersonItemProcessor,
    records::{PersonIn, PersonOut},
    store::{people_writer, PersonBinder},
    tasklet::StepMarkerTasklet,
};

/// Reader of the header-less people file.
pub fn person_reader(config: &BatchConfig) -> CsvItemReader<PersonIn> {
    info!("Reading people from {}", config.input.display());
    CsvItemReaderBuilder::new()
        .names(&["first_name", "last_name"])
        .from_path(&config.input)
}

/// Builds the requested job and runs it to its terminal status.
///
/// Components are created once and wired by hand: `step1` and `step2` read the
/// same file through one shared reader, each with its own processor and
/// writer, and `job1` and `job2` chain the same two steps.
///
/// | job             | steps                    |
/// |-----------------|--------------------------|
/// | `importUserJob` | `step1`                  |
/// | `job1`          | `step1`, `step2`         |
/// | `job2`          | `step1`, `step2`, `step3`|
pub fn launch(
    job_name: JobName,
    config: &BatchConfig,
    pool: &SqlitePool,
    parameters: &JobParameters,
) -> JobResult<JobExecution> {
    let reader = person_reader(config);
    let ip1 = PersonItemProcessor::new("ip1", config.case_mapping);
    let ip2 = PersonItemProcessor::new("ip2", config.case_mapping);

    let binder = PersonBinder;
    let logger = LoggerWriter::default();
    let db_writer1 = people_writer(pool, &binder);
    let db_writer2 = people_writer(pool, &binder);
    // A dry run logs the people instead of inserting them.
    let iw1: &dyn ItemWriter<PersonOut> = if config.dry_run {
        &logger
    } else {
        &db_writer1
    };
    let iw2: &dyn ItemWriter<PersonOut> = if config.dry_run {
        &logger
    } else {
        &db_writer2
    };

    let listener = JobCompletionNotificationListener::new(pool).dry_run(config.dry_run);
    let marker = StepMarkerTasklet::new("all people imported");

    let job_step1_chunk_size = match job_name {
        JobName::ImportUserJob => config.import_chunk_size,
        JobName::Job1 | JobName::Job2 => config.step1_chunk_size,
    };

    let step1 = StepBuilder::new("step1")
        .chunk::<PersonIn, PersonOut>(job_step1_chunk_size)
        .reader(&reader)
        .processor(&ip1)
        .writer(iw1)
        .build()?;

    let step2 = StepBuilder::new("step2")
        .chunk::<PersonIn, PersonOut>(config.step2_chunk_size)
        .reader(&reader)
        .processor(&ip2)
        .writer(iw2)
        .build()?;

    let step3 = StepBuilder::new("step3").tasklet(&marker).build();

    let job = match job_name {
        JobName::ImportUserJob => JobBuilder::new()
            .name("importUserJob")
            .listener(&listener)
            .start(&step1)
            .build()?,
        JobName::Job1 => JobBuilder::new()
            .name("importUserJob")
            .listener(&listener)
            .start(&step1)
            .next(&step2)
            .build()?,
        JobName::Job2 => JobBuilder::new()
            .name("importUserJob2")
            .listener(&listener)
            .start(&step1)
            .next(&step2)
            .next(&step3)
            .build()?,
    };

    info!("Launching {} as {}", job_name, job.get_name());
    job.run(parameters)
}
