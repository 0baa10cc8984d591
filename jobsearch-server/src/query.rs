use jobsearch::JobRecord;
use log::{debug, error};

use crate::registry::{JobRegistry, RegistryError};

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("could not list recurring jobs: {0}")]
    RegistryUnavailable(#[source] RegistryError),
}

/// Jobs whose id contains `filter`, ignoring case. A blank filter matches
/// every job. Registry order is preserved.
pub async fn search(
    registry: &dyn JobRegistry,
    filter: &str,
) -> Result<Vec<JobRecord>, SearchError> {
    let jobs = registry.list_recurring_jobs().await.map_err(|err| {
        error!("Failed to list recurring jobs: {}", err);
        SearchError::RegistryUnavailable(err)
    })?;
    if filter.trim().is_empty() {
        debug!("Listing all {} recurring jobs", jobs.len());
        return Ok(jobs);
    }
    let needle = fold_case(filter);
    let matching: Vec<_> = jobs
        .into_iter()
        .filter(|job| fold_case(&job.id).contains(&needle))
        .collect();
    debug!("Filter {:?} matched {} jobs", filter, matching.len());
    Ok(matching)
}

/// Simple per-character uppercase mapping. Characters whose uppercase form
/// is not a single character are kept as is, so `ß` never matches `SS` and
/// the Kelvin sign never matches `k`.
fn fold_case(value: &str) -> String {
    value
        .chars()
        .map(|c| {
            if c.is_ascii() {
                return c.to_ascii_uppercase();
            }
            let mut upper = c.to_uppercase();
            match (upper.next(), upper.next()) {
                (Some(single), None) => single,
                _ => c,
            }
        })
        .collect()
}
