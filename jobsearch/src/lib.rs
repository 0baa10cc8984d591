use chrono::{DateTime, Utc};

/// Placeholder rendered for timestamps the job engine has not recorded.
pub const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct JobRecord {
    /// Unique identifier of the recurring job definition
    pub id: String,
    /// Schedule expression, usually cron
    #[serde(default)]
    pub schedule: Option<String>,
    #[serde(default)]
    pub last_execution: Option<DateTime<Utc>>,
    #[serde(default)]
    pub next_execution: Option<DateTime<Utc>>,
    /// Queue the job is dispatched to
    #[serde(default)]
    pub queue: Option<String>,
}

impl JobRecord {
    pub fn new(id: impl Into<String>) -> Self {
        JobRecord {
            id: id.into(),
            schedule: None,
            last_execution: None,
            next_execution: None,
            queue: None,
        }
    }

    pub fn with_schedule(mut self, schedule: impl Into<String>) -> Self {
        self.schedule = Some(schedule.into());
        self
    }

    pub fn with_queue(mut self, queue: impl Into<String>) -> Self {
        self.queue = Some(queue.into());
        self
    }

    pub fn with_executions(
        mut self,
        last_execution: Option<DateTime<Utc>>,
        next_execution: Option<DateTime<Utc>>,
    ) -> Self {
        self.last_execution = last_execution;
        self.next_execution = next_execution;
        self
    }
}

/// A job as returned by the search endpoint.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSummary {
    pub id: String,
    pub cron: Option<String>,
    pub last_execution: String,
    pub next_execution: String,
    pub queue: Option<String>,
}

impl From<JobRecord> for JobSummary {
    fn from(
        JobRecord {
            id,
            schedule,
            last_execution,
            next_execution,
            queue,
        }: JobRecord,
    ) -> Self {
        JobSummary {
            id,
            cron: schedule,
            last_execution: timestamp_str(last_execution),
            next_execution: timestamp_str(next_execution),
            queue,
        }
    }
}

fn timestamp_str(timestamp: Option<DateTime<Utc>>) -> String {
    match timestamp {
        Some(timestamp) => timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => String::from(NOT_AVAILABLE),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct DeleteResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl DeleteResponse {
    pub fn deleted() -> Self {
        DeleteResponse {
            success: true,
            message: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        DeleteResponse {
            success: false,
            message: Some(message.into()),
        }
    }
}
