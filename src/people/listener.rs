use log::{error, info};
use sqlx::SqlitePool;

use crate::core::job::{BatchStatus, JobExecution, JobExecutionListener};

use super::store::find_people;

/// Logs the content of the `people` table once a job completed.
///
/// Like the writers, the listener bridges to SQLx with `block_in_place` and
/// needs a multi-threaded Tokio runtime. After a dry run nothing was inserted,
/// so the table is not queried.
pub struct JobCompletionNotificationListener<'a> {
    pool: &'a SqlitePool,
    dry_run: bool,
}

impl<'a> JobCompletionNotificationListener<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self {
            pool,
            dry_run: false,
        }
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

impl JobExecutionListener for JobCompletionNotificationListener<'_> {
    fn before_job(&self, job_execution: &JobExecution) {
        info!("Job {} is starting", job_execution.job_name);
    }

    fn after_job(&self, job_execution: &JobExecution) {
        if job_execution.status != BatchStatus::Completed {
            error!(
                "Job {} ended with status {:?}",
                job_execution.job_name, job_execution.status
            );
            return;
        }

        if self.dry_run {
            info!("!!! JOB FINISHED! Dry run, the people table was left untouched");
            return;
        }

        info!("!!! JOB FINISHED! Time to verify the results");

        let people = tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(find_people(self.pool))
        });

        match people {
            Ok(people) => people
                .iter()
                .for_each(|person| info!("Found <{}> in the database.", person)),
            Err(e) => error!("Unable to verify the people table: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::{
        job::{BatchStatus, JobExecution, JobExecutionListener},
        parameters::JobParameters,
    };
    use crate::people::store::connect;

    use super::JobCompletionNotificationListener;

    fn completed_execution() -> JobExecution {
        let mut execution = JobExecution::new("importUserJob", &JobParameters::new());
        execution.status = BatchStatus::Completed;
        execution
    }

    #[test]
    fn dry_run_skips_the_table_lookup() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let pool = runtime.block_on(connect("sqlite::memory:")).unwrap();
        let listener = JobCompletionNotificationListener::new(&pool).dry_run(true);

        // Called outside the runtime: a table lookup would panic on `Handle::current`.
        listener.after_job(&completed_execution());
    }

    #[test]
    #[should_panic]
    fn completed_run_looks_the_table_up() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let pool = runtime.block_on(connect("sqlite::memory:")).unwrap();
        let listener = JobCompletionNotificationListener::new(&pool);

        listener.after_job(&completed_execution());
    }
}
