use log::{error, info, warn};

use crate::registry::{JobRegistry, RegistryError};

#[derive(Debug, thiserror::Error)]
pub enum DeletionError {
    #[error("Job ID is required")]
    InvalidIdentifier,
    #[error("Job not found")]
    NotFound,
    #[error("{0}")]
    DeletionFailed(String),
    #[error("could not read recurring jobs: {0}")]
    RegistryUnavailable(#[source] RegistryError),
}

/// Removes the recurring job `id` from the registry.
///
/// The job must be present in a fresh snapshot; removing an absent job
/// yields [`DeletionError::NotFound`], so repeating a delete is harmless.
/// Runs that the engine already dispatched are not affected.
pub async fn delete_job(registry: &dyn JobRegistry, id: &str) -> Result<(), DeletionError> {
    if id.trim().is_empty() {
        warn!("Rejected delete without a job id");
        return Err(DeletionError::InvalidIdentifier);
    }
    let exists = registry
        .list_recurring_jobs()
        .await
        .map_err(|err| {
            error!("Failed to read recurring jobs before deleting {}: {}", id, err);
            DeletionError::RegistryUnavailable(err)
        })?
        .iter()
        .any(|job| job.id == id);
    if !exists {
        warn!("Delete requested for unknown job: {}", id);
        return Err(DeletionError::NotFound);
    }
    match registry.remove_recurring_job(id).await {
        Ok(true) => {
            info!("Removed recurring job: {}", id);
            Ok(())
        }
        Ok(false) => {
            warn!("Job {} disappeared before it could be removed", id);
            Err(DeletionError::NotFound)
        }
        Err(err) => {
            error!("Failed to remove recurring job {}: {}", id, err);
            Err(DeletionError::DeletionFailed(err.to_string()))
        }
    }
}
