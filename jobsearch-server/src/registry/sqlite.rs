use chrono::{DateTime, Utc};
use jobsearch::JobRecord;
use log::{error, info};
use sqlx::sqlite::{SqlitePoolOptions, SqliteRow};
use sqlx::Row;

use super::{JobRegistry, RegistryError, RegistryResult};

const CREATE_TABLE: &str = "
        CREATE TABLE IF NOT EXISTS recurring_jobs (
            id TEXT PRIMARY KEY NOT NULL,
            cron TEXT,
            queue TEXT,
            last_execution TIMESTAMP,
            next_execution TIMESTAMP
        )
    ";

const LIST_JOBS_QUERY: &str = "
        SELECT
            id,
            cron,
            last_execution,
            next_execution,
            queue
        FROM recurring_jobs
    ";

const UPSERT_JOB_QUERY: &str = "
        INSERT INTO recurring_jobs (id, cron, queue, last_execution, next_execution)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (id) DO UPDATE SET
            cron = excluded.cron,
            queue = excluded.queue,
            last_execution = excluded.last_execution,
            next_execution = excluded.next_execution
    ";

/// Reads the job engine's SQLite store.
#[derive(Debug, Clone)]
pub struct SqliteRegistry {
    pool: sqlx::SqlitePool,
}

impl SqliteRegistry {
    pub async fn new(database_path: &str) -> RegistryResult<SqliteRegistry> {
        let url = database_url(database_path);
        info!("Connecting to job registry: {}", url);
        let pool = pool_options(database_path)
            .connect(&url)
            .await
            .map_err(|err| {
                error!("Error while connecting to job registry: {:?}", err);
                RegistryError::Unavailable(err.to_string())
            })?;
        let mut conn = pool.acquire().await?;
        sqlx::query(CREATE_TABLE).execute(&mut *conn).await?;
        Ok(SqliteRegistry { pool })
    }

    /// Registers or replaces a recurring job definition.
    pub async fn add_or_update(&self, job: JobRecord) -> RegistryResult<()> {
        let JobRecord {
            id,
            schedule,
            last_execution,
            next_execution,
            queue,
        } = job;
        let mut conn = self.pool.acquire().await?;
        sqlx::query(UPSERT_JOB_QUERY)
            .bind(id)
            .bind(schedule)
            .bind(queue)
            .bind(last_execution)
            .bind(next_execution)
            .execute(&mut *conn)
            .await?;
        Ok(())
    }
}

fn pool_options(database_path: &str) -> SqlitePoolOptions {
    let options = SqlitePoolOptions::new();
    if database_path == ":memory:" {
        // Every connection to :memory: opens its own empty database.
        options
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        options
    }
}

fn database_url(database_path: &str) -> String {
    if database_path == ":memory:" {
        String::from("sqlite::memory:")
    } else {
        format!("sqlite://{}?mode=rwc", database_path)
    }
}

fn job_record(row: &SqliteRow) -> Result<JobRecord, sqlx::Error> {
    let last_execution: Option<DateTime<Utc>> = row.try_get(2)?;
    let next_execution: Option<DateTime<Utc>> = row.try_get(3)?;
    Ok(JobRecord {
        id: row.try_get(0)?,
        schedule: row.try_get(1)?,
        last_execution,
        next_execution,
        queue: row.try_get(4)?,
    })
}

#[async_trait::async_trait]
impl JobRegistry for SqliteRegistry {
    async fn list_recurring_jobs(&self) -> RegistryResult<Vec<JobRecord>> {
        let mut conn = self.pool.acquire().await?;
        let jobs = sqlx::query(LIST_JOBS_QUERY)
            .fetch_all(&mut *conn)
            .await?
            .iter()
            .map(job_record)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(jobs)
    }

    async fn remove_recurring_job(&self, id: &str) -> RegistryResult<bool> {
        let mut conn = self.pool.acquire().await?;
        let removed = sqlx::query("DELETE FROM recurring_jobs WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?
            .rows_affected();
        Ok(removed > 0)
    }
}

impl From<sqlx::Error> for RegistryError {
    fn from(value: sqlx::Error) -> Self {
        match value {
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => Self::Unavailable(value.to_string()),
            _ => Self::Backend(value.to_string()),
        }
    }
}

#[cfg(test)]
mod test {
    use chrono::{TimeZone, Utc};
    use jobsearch::JobRecord;

    use super::SqliteRegistry;
    use crate::registry::tests::sample_jobs;
    use crate::registry::{JobRegistry, RegistryError};
    use crate::test_registry;

    async fn create() -> SqliteRegistry {
        let registry = SqliteRegistry::new(":memory:").await.unwrap();
        for job in sample_jobs() {
            registry.add_or_update(job).await.unwrap();
        }
        registry
    }

    test_registry!(create);

    #[tokio::test]
    async fn test_timestamps_survive_storage() {
        let registry = create().await;
        let last = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let next = Utc.with_ymd_and_hms(2024, 3, 1, 12, 1, 0).unwrap();
        registry
            .add_or_update(JobRecord::new("job-b").with_executions(Some(last), Some(next)))
            .await
            .unwrap();
        let jobs = registry.list_recurring_jobs().await.unwrap();
        let job_b = jobs.iter().find(|job| job.id == "job-b").unwrap();
        assert_eq!(job_b.last_execution, Some(last));
        assert_eq!(job_b.next_execution, Some(next));
        assert!(job_b.schedule.is_none());
    }

    #[tokio::test]
    async fn test_closed_pool_is_unavailable() {
        let registry = create().await;
        registry.pool.close().await;
        let err = registry.list_recurring_jobs().await.unwrap_err();
        assert!(matches!(err, RegistryError::Unavailable(_)));
    }
}
