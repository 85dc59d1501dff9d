use std::str::FromStr;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use people_batch::{
    core::parameters::JobParametersBuilder,
    people::{
        config::{BatchConfig, JobName},
        jobs::launch,
        store::{connect, init_schema},
    },
};

/// Launch a people import job and wait for its terminal status.
#[derive(Parser)]
#[command(name = "people-batch", version, about)]
struct Cli {
    /// Job to launch: importUserJob, job1 or job2
    #[arg(env = "PEOPLE_BATCH_JOB", default_value = "importUserJob")]
    job: String,

    #[command(flatten)]
    config: BatchConfig,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    verbose: bool,
}

fn init_logger(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logger(cli.verbose);

    let job_name = JobName::from_str(&cli.job)?;

    let pool = connect(&cli.config.database_url)
        .await
        .with_context(|| format!("Unable to open {}", cli.config.database_url))?;
    init_schema(&pool)
        .await
        .context("Unable to create the people table")?;

    // A fresh timestamp makes every launch a distinct run.
    let parameters = JobParametersBuilder::new().add_current_time().build();

    let execution = launch(job_name, &cli.config, &pool, &parameters)
        .with_context(|| format!("Job {} failed", job_name))?;

    for step in &execution.step_executions {
        info!(
            "Step {}: {:?}, read {}, written {} in {} chunks, {:?}",
            step.name,
            step.status,
            step.read_count,
            step.write_count,
            step.commit_count,
            step.duration
        );
    }
    info!(
        "Job {} completed in {:?}",
        execution.job_name, execution.duration
    );

    pool.close().await;

    Ok(())
}
