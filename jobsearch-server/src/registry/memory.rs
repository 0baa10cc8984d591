use std::sync::Arc;

use jobsearch::JobRecord;
use tokio::sync::Mutex;

use super::{JobRegistry, RegistryResult};

/// Registry kept in process memory, in registration order.
#[derive(Default, Clone)]
pub struct MemoryRegistry {
    jobs: Arc<Mutex<Vec<JobRecord>>>,
}

impl MemoryRegistry {
    pub fn new(jobs: Vec<JobRecord>) -> Self {
        let mut stored = Vec::with_capacity(jobs.len());
        for job in jobs {
            upsert(&mut stored, job);
        }
        MemoryRegistry {
            jobs: Arc::new(Mutex::new(stored)),
        }
    }

    /// Registers the job, replacing any job with the same id in place.
    pub async fn add_or_update(&self, job: JobRecord) {
        let mut jobs = self.jobs.lock().await;
        upsert(&mut jobs, job);
    }
}

fn upsert(jobs: &mut Vec<JobRecord>, job: JobRecord) {
    match jobs.iter_mut().find(|stored| stored.id == job.id) {
        Some(stored) => *stored = job,
        None => jobs.push(job),
    }
}

#[async_trait::async_trait]
impl JobRegistry for MemoryRegistry {
    async fn list_recurring_jobs(&self) -> RegistryResult<Vec<JobRecord>> {
        let jobs = self.jobs.lock().await.clone();
        Ok(jobs)
    }

    async fn remove_recurring_job(&self, id: &str) -> RegistryResult<bool> {
        let mut jobs = self.jobs.lock().await;
        let count = jobs.len();
        jobs.retain(|job| job.id != id);
        Ok(jobs.len() != count)
    }
}

#[cfg(test)]
mod test {
    use jobsearch::JobRecord;

    use super::MemoryRegistry;
    use crate::registry::tests::sample_jobs;
    use crate::registry::JobRegistry;
    use crate::test_registry;

    async fn create() -> MemoryRegistry {
        MemoryRegistry::new(sample_jobs())
    }

    test_registry!(create);

    #[tokio::test]
    async fn test_add_or_update_keeps_position() {
        let registry = create().await;
        registry
            .add_or_update(JobRecord::new("job-a").with_queue("critical"))
            .await;
        registry.add_or_update(JobRecord::new("job-c")).await;
        let jobs = registry.list_recurring_jobs().await.unwrap();
        let ids: Vec<_> = jobs.iter().map(|job| job.id.as_str()).collect();
        assert_eq!(ids, vec!["job-a", "job-b", "Cleanup-Temp", "job-c"]);
        assert_eq!(jobs[0].queue.as_deref(), Some("critical"));
        assert!(jobs[0].schedule.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_seed_ids_collapse() {
        let registry = MemoryRegistry::new(vec![
            JobRecord::new("dup").with_queue("first"),
            JobRecord::new("dup").with_queue("second"),
        ]);
        let jobs = registry.list_recurring_jobs().await.unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].queue.as_deref(), Some("second"));
    }
}
