use std::sync::Arc;

use jobsearch::JobRecord;
use warp::Filter;

/// Narrow view over the recurring job engine.
///
/// Adapters only read the engine's current set of recurring jobs and ask it
/// to remove one; scheduling and execution stay inside the engine.
#[async_trait::async_trait]
pub trait JobRegistry: Send + Sync + 'static {
    /// Snapshot of every recurring job, in the order the engine yields them.
    async fn list_recurring_jobs(&self) -> RegistryResult<Vec<JobRecord>>;

    /// Removes the job if it exists. Returns whether a job was removed.
    async fn remove_recurring_job(&self, id: &str) -> RegistryResult<bool>;
}

pub type SharedRegistry = Arc<dyn JobRegistry>;

pub type RegistryResult<T> = Result<T, RegistryError>;

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("job registry unreachable: {0}")]
    Unavailable(String),
    #[error("{0}")]
    Backend(String),
}

#[derive(Debug, serde::Deserialize, serde::Serialize)]
#[serde(tag = "type")]
pub enum RegistryConfig {
    Memory {
        #[serde(default)]
        jobs: Vec<JobRecord>,
    },
    Sqlite {
        path: String,
    },
}

pub async fn build(config: RegistryConfig) -> RegistryResult<SharedRegistry> {
    let registry: SharedRegistry = match config {
        RegistryConfig::Memory { jobs } => Arc::new(memory::MemoryRegistry::new(jobs)),
        RegistryConfig::Sqlite { path } => Arc::new(sqlite::SqliteRegistry::new(&path).await?),
    };
    Ok(registry)
}

pub fn with(
    registry: SharedRegistry,
) -> impl Filter<Extract = (SharedRegistry,), Error = std::convert::Infallible> + Clone {
    warp::any().map(move || registry.clone())
}


pub mod memory;
pub mod sqlite;
