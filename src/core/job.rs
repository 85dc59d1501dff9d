use std::time::{Duration, Instant};

use log::{error, info};
use uuid::Uuid;

use crate::BatchError;

use super::{
    build_name,
    parameters::JobParameters,
    step::{Step, StepExecution},
};

/// Type alias for job execution results.
///
/// A `JobResult` is a `Result` that contains either:
/// - A successful `JobExecution` with execution details
/// - A `BatchError` indicating what went wrong
pub type JobResult<T> = Result<T, BatchError>;

/// Status of a job execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchStatus {
    /// Status of a batch job prior to its execution.
    Starting,
    /// Status of a batch job that is running.
    Started,
    /// The batch job has successfully completed its execution.
    Completed,
    /// Status of a batch job that has failed during its execution.
    Failed,
}

/// Represents a job that can be executed.
///
/// A job is an ordered sequence of steps run as one unit of work. Steps run
/// strictly one after the other and a step only starts once its predecessor
/// completed.
pub trait Job {
    fn get_name(&self) -> &str;

    /// Runs the job with the given parameters.
    ///
    /// # Returns
    /// - `Ok(JobExecution)` when every step completed
    /// - `Err(BatchError::Step)` naming the first step which failed; the
    ///   steps after it are not executed
    fn run(&self, parameters: &JobParameters) -> JobResult<JobExecution>;
}

/// Hooks called around a job execution.
pub trait JobExecutionListener {
    fn before_job(&self, _job_execution: &JobExecution) {}

    /// Called once the job reached its terminal status, `Completed` or `Failed`.
    fn after_job(&self, job_execution: &JobExecution);
}

/// Represents the execution of a job.
#[derive(Debug)]
pub struct JobExecution {
    pub id: Uuid,
    pub job_name: String,
    pub status: BatchStatus,
    pub parameters: JobParameters,
    /// The time when the job started executing
    pub start: Instant,
    /// The time when the job finished executing
    pub end: Instant,
    /// The total duration of the job execution
    pub duration: Duration,
    /// One entry per executed step, in execution order
    pub step_executions: Vec<StepExecution>,
}

impl JobExecution {
    pub(crate) fn new(job_name: &str, parameters: &JobParameters) -> Self {
        let now = Instant::now();
        Self {
            id: Uuid::new_v4(),
            job_name: job_name.to_owned(),
            status: BatchStatus::Starting,
            parameters: parameters.clone(),
            start: now,
            end: now,
            duration: Duration::default(),
            step_executions: Vec::new(),
        }
    }

    pub fn get_step_execution(&self, step_name: &str) -> Option<&StepExecution> {
        self.step_executions
            .iter()
            .find(|execution| execution.name == step_name)
    }
}

/// Represents an instance of a job.
///
/// A job instance is created through the `JobBuilder` and executed by calling
/// the `run` method. The steps are executed in the order they were added.
/// Steps are borrowed, so several jobs can share the same step.
pub struct JobInstance<'a> {
    /// Unique identifier for this job instance
    id: Uuid,
    /// Human-readable name for the job
    name: String,
    /// Collection of steps that make up this job, in execution order
    steps: Vec<&'a dyn Step>,
    listeners: Vec<&'a dyn JobExecutionListener>,
}

impl Job for JobInstance<'_> {
    fn get_name(&self) -> &str {
        &self.name
    }

    fn run(&self, parameters: &JobParameters) -> JobResult<JobExecution> {
        let mut job_execution = JobExecution::new(&self.name, parameters);

        info!(
            "Start of job: {}, id: {}, parameters: {}",
            self.name, self.id, parameters
        );

        job_execution.status = BatchStatus::Started;
        self.listeners
            .iter()
            .for_each(|listener| listener.before_job(&job_execution));

        let mut failed_step = None;
        for step in &self.steps {
            let mut step_execution = StepExecution::new(step.get_name());
            let result = step.execute(&mut step_execution);
            job_execution.step_executions.push(step_execution);

            if let Err(err) = result {
                error!("Step {} of job {} failed: {}", step.get_name(), self.name, err);
                failed_step = Some(step.get_name().to_owned());
                break;
            }
        }

        job_execution.status = match failed_step {
            Some(_) => BatchStatus::Failed,
            None => BatchStatus::Completed,
        };
        job_execution.end = Instant::now();
        job_execution.duration = job_execution.start.elapsed();

        self.listeners
            .iter()
            .for_each(|listener| listener.after_job(&job_execution));

        info!(
            "End of job: {}, id: {}, status: {:?}",
            self.name, self.id, job_execution.status
        );

        match failed_step {
            Some(step_name) => Err(BatchError::Step(step_name)),
            None => Ok(job_execution),
        }
    }
}

/// Builder for creating a job instance.
///
/// # Example
///
/// ```
/// use people_batch::core::job::{Job, JobBuilder};
/// use people_batch::core::parameters::JobParametersBuilder;
/// use people_batch::core::step::{RepeatStatus, StepBuilder, StepExecution, Tasklet};
/// use people_batch::BatchError;
///
/// struct Hello;
/// impl Tasklet for Hello {
///     fn execute(&self, _step_execution: &StepExecution) -> Result<RepeatStatus, BatchError> {
///         Ok(RepeatStatus::Finished)
///     }
/// }
///
/// let tasklet = Hello;
/// let step = StepBuilder::new("hello").tasklet(&tasklet).build();
///
/// let job = JobBuilder::new()
///     .name("hello-job")
///     .start(&step)
///     .build()
///     .unwrap();
///
/// let execution = job.run(&JobParametersBuilder::new().add_current_time().build()).unwrap();
/// assert_eq!(execution.step_executions.len(), 1);
/// ```
#[derive(Default)]
pub struct JobBuilder<'a> {
    /// Optional name for the job (generated randomly if not specified)
    name: Option<String>,
    /// Collection of steps to be executed, in order
    steps: Vec<&'a dyn Step>,
    listeners: Vec<&'a dyn JobExecutionListener>,
}

impl<'a> JobBuilder<'a> {
    pub fn new() -> Self {
        Self {
            name: None,
            steps: Vec::new(),
            listeners: Vec::new(),
        }
    }

    pub fn name(mut self, name: &str) -> JobBuilder<'a> {
        self.name = Some(name.to_string());
        self
    }

    /// Sets the first step of the job.
    ///
    /// This method is semantically identical to `next()` but provides better readability
    /// when constructing the initial step of a job.
    pub fn start(mut self, step: &'a dyn Step) -> JobBuilder<'a> {
        self.steps.push(step);
        self
    }

    /// Adds a step to the job. Steps are executed in the order they are added.
    pub fn next(mut self, step: &'a dyn Step) -> JobBuilder<'a> {
        self.steps.push(step);
        self
    }

    pub fn listener(mut self, listener: &'a dyn JobExecutionListener) -> JobBuilder<'a> {
        self.listeners.push(listener);
        self
    }

    /// Builds the job. If no name has been provided, a random name is generated.
    ///
    /// # Errors
    /// `BatchError::Configuration` when no step was added.
    pub fn build(self) -> Result<JobInstance<'a>, BatchError> {
        let name = self.name.unwrap_or_else(build_name);

        if self.steps.is_empty() {
            return Err(BatchError::Configuration(format!(
                "Job {} has no step",
                name
            )));
        }

        Ok(JobInstance {
            id: Uuid::new_v4(),
            name,
            steps: self.steps,
            listeners: self.listeners,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use crate::{
        core::{
            parameters::{JobParameters, JobParametersBuilder},
            step::{RepeatStatus, Step, StepBuilder, StepExecution, StepStatus, Tasklet},
        },
        BatchError,
    };

    use super::{BatchStatus, Job, JobBuilder, JobExecution, JobExecutionListener};

    struct RecordingTasklet<'a> {
        name: &'a str,
        calls: &'a RefCell<Vec<String>>,
        fail: bool,
    }

    impl<'a> RecordingTasklet<'a> {
        fn new(name: &'a str, calls: &'a RefCell<Vec<String>>, fail: bool) -> Self {
            Self { name, calls, fail }
        }
    }

    impl Tasklet for RecordingTasklet<'_> {
        fn execute(&self, _step_execution: &StepExecution) -> Result<RepeatStatus, BatchError> {
            self.calls.borrow_mut().push(self.name.to_string());
            if self.fail {
                Err(BatchError::ItemWriter(format!("{} failed", self.name)))
            } else {
                Ok(RepeatStatus::Finished)
            }
        }
    }

    #[derive(Default)]
    struct StatusListener {
        before: RefCell<Vec<BatchStatus>>,
        after: RefCell<Vec<BatchStatus>>,
    }

    impl JobExecutionListener for StatusListener {
        fn before_job(&self, job_execution: &JobExecution) {
            self.before.borrow_mut().push(job_execution.status);
        }

        fn after_job(&self, job_execution: &JobExecution) {
            self.after.borrow_mut().push(job_execution.status);
        }
    }

    #[test]
    fn steps_run_in_order() {
        let calls = RefCell::new(Vec::new());
        let first = RecordingTasklet::new("s1", &calls, false);
        let second = RecordingTasklet::new("s2", &calls, false);
        let s1 = StepBuilder::new("s1").tasklet(&first).build();
        let s2 = StepBuilder::new("s2").tasklet(&second).build();
        let listener = StatusListener::default();

        let job = JobBuilder::new()
            .name("ordered")
            .listener(&listener)
            .start(&s1)
            .next(&s2)
            .build()
            .unwrap();

        let execution = job.run(&JobParameters::new()).unwrap();

        assert_eq!(*calls.borrow(), vec!["s1", "s2"]);
        assert_eq!(execution.status, BatchStatus::Completed);
        assert_eq!(execution.job_name, "ordered");
        assert_eq!(execution.step_executions.len(), 2);
        assert_eq!(*listener.before.borrow(), vec![BatchStatus::Started]);
        assert_eq!(*listener.after.borrow(), vec![BatchStatus::Completed]);
    }

    #[test]
    fn failed_step_stops_the_job() {
        let calls = RefCell::new(Vec::new());
        let first = RecordingTasklet::new("s1", &calls, false);
        let second = RecordingTasklet::new("s2", &calls, true);
        let third = RecordingTasklet::new("s3", &calls, false);
        let s1 = StepBuilder::new("s1").tasklet(&first).build();
        let s2 = StepBuilder::new("s2").tasklet(&second).build();
        let s3 = StepBuilder::new("s3").tasklet(&third).build();
        let listener = StatusListener::default();

        let job = JobBuilder::new()
            .listener(&listener)
            .start(&s1)
            .next(&s2)
            .next(&s3)
            .build()
            .unwrap();

        let result = job.run(&JobParameters::new());

        match result {
            Err(BatchError::Step(name)) => assert_eq!(name, "s2"),
            other => panic!("Expected BatchError::Step, got {:?}", other),
        }
        assert_eq!(*calls.borrow(), vec!["s1", "s2"]);
        assert_eq!(*listener.after.borrow(), vec![BatchStatus::Failed]);
    }

    #[test]
    fn shared_step_runs_in_each_job() {
        let calls = RefCell::new(Vec::new());
        let tasklet = RecordingTasklet::new("shared", &calls, false);
        let shared = StepBuilder::new("shared").tasklet(&tasklet).build();

        let job1 = JobBuilder::new().name("job1").start(&shared).build().unwrap();
        let job2 = JobBuilder::new().name("job2").start(&shared).build().unwrap();

        let first = job1.run(&JobParametersBuilder::new().add_long("time", 1).build());
        let second = job2.run(&JobParametersBuilder::new().add_long("time", 2).build());

        assert!(first.is_ok());
        assert_eq!(
            second.unwrap().get_step_execution("shared").map(|e| e.status),
            Some(StepStatus::Completed)
        );
        assert_eq!(calls.borrow().len(), 2);
    }

    #[test]
    fn job_keeps_its_parameters() {
        let calls = RefCell::new(Vec::new());
        let tasklet = RecordingTasklet::new("s1", &calls, false);
        let step = StepBuilder::new("s1").tasklet(&tasklet).build();
        let job = JobBuilder::new().start(&step).build().unwrap();
        let parameters = JobParametersBuilder::new().add_long("time", 42).build();

        let execution = job.run(&parameters).unwrap();

        assert_eq!(execution.parameters.get_long("time"), Some(42));
        assert_eq!(job.get_name().len(), 8);
    }

    #[test]
    fn job_without_step_is_a_configuration_error() {
        let result = JobBuilder::new().name("empty").build();

        assert!(matches!(result, Err(BatchError::Configuration(_))));
    }

    #[test]
    fn step_name_is_reported_by_step_execution() {
        let calls = RefCell::new(Vec::new());
        let tasklet = RecordingTasklet::new("s1", &calls, false);
        let step = StepBuilder::new("marker").tasklet(&tasklet).build();

        assert_eq!(step.get_name(), "marker");
    }
}
