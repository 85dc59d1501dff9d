use std::{collections::BTreeMap, fmt};

use chrono::{DateTime, Utc};

/// A single job parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum JobParameter {
    String(String),
    Long(i64),
    Double(f64),
    Date(DateTime<Utc>),
}

impl fmt::Display for JobParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobParameter::String(value) => write!(f, "{}", value),
            JobParameter::Long(value) => write!(f, "{}", value),
            JobParameter::Double(value) => write!(f, "{}", value),
            JobParameter::Date(value) => write!(f, "{}", value.to_rfc3339()),
        }
    }
}

/// Parameters a job is launched with.
///
/// The parameters are not interpreted by the job: they identify a run, and a
/// launcher usually adds a timestamp so that two launches of the same job are
/// two distinct runs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobParameters {
    parameters: BTreeMap<String, JobParameter>,
}

impl JobParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&JobParameter> {
        self.parameters.get(key)
    }

    pub fn get_long(&self, key: &str) -> Option<i64> {
        match self.parameters.get(key) {
            Some(JobParameter::Long(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn get_string(&self, key: &str) -> Option<&str> {
        match self.parameters.get(key) {
            Some(JobParameter::String(value)) => Some(value),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &JobParameter)> {
        self.parameters.iter()
    }
}

impl fmt::Display for JobParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (index, (key, value)) in self.parameters.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}={}", key, value)?;
        }
        write!(f, "}}")
    }
}

/// Builder for [`JobParameters`].
///
/// # Example
///
/// ```
/// use people_batch::core::parameters::JobParametersBuilder;
///
/// let parameters = JobParametersBuilder::new()
///     .add_long("time", 1_700_000_000_000)
///     .add_string("input", "data/sample-data.csv")
///     .build();
///
/// assert_eq!(parameters.get_long("time"), Some(1_700_000_000_000));
/// assert_eq!(parameters.to_string(), "{input=data/sample-data.csv, time=1700000000000}");
/// ```
#[derive(Default)]
pub struct JobParametersBuilder {
    parameters: BTreeMap<String, JobParameter>,
}

impl JobParametersBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_string(mut self, key: &str, value: &str) -> Self {
        self.parameters
            .insert(key.to_string(), JobParameter::String(value.to_string()));
        self
    }

    pub fn add_long(mut self, key: &str, value: i64) -> Self {
        self.parameters
            .insert(key.to_string(), JobParameter::Long(value));
        self
    }

    pub fn add_double(mut self, key: &str, value: f64) -> Self {
        self.parameters
            .insert(key.to_string(), JobParameter::Double(value));
        self
    }

    pub fn add_date(mut self, key: &str, value: DateTime<Utc>) -> Self {
        self.parameters
            .insert(key.to_string(), JobParameter::Date(value));
        self
    }

    /// Adds `time` set to the current epoch milliseconds, making the run unique.
    pub fn add_current_time(self) -> Self {
        self.add_long("time", Utc::now().timestamp_millis())
    }

    pub fn build(self) -> JobParameters {
        JobParameters {
            parameters: self.parameters,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::{JobParameter, JobParametersBuilder};

    #[test]
    fn later_value_replaces_earlier_one() {
        let parameters = JobParametersBuilder::new()
            .add_long("time", 1)
            .add_long("time", 2)
            .build();

        assert_eq!(parameters.len(), 1);
        assert_eq!(parameters.get_long("time"), Some(2));
    }

    #[test]
    fn typed_getters_ignore_other_kinds() {
        let parameters = JobParametersBuilder::new()
            .add_string("name", "people")
            .add_double("ratio", 0.5)
            .build();

        assert_eq!(parameters.get_long("name"), None);
        assert_eq!(parameters.get_string("name"), Some("people"));
        assert_eq!(parameters.get("ratio"), Some(&JobParameter::Double(0.5)));
    }

    #[test]
    fn current_time_makes_runs_distinct() {
        let first = JobParametersBuilder::new().add_current_time().build();

        assert!(first.get_long("time").is_some_and(|time| time > 0));
    }

    #[test]
    fn dates_display_as_rfc3339() {
        let date = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let parameters = JobParametersBuilder::new().add_date("run", date).build();

        assert_eq!(parameters.to_string(), "{run=2024-03-01T12:00:00+00:00}");
    }
}
