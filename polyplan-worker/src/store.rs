use std::collections::HashMap;
use std::fmt::Display;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{SystemTime, UNIX_EPOCH};

use polyplan::io::ext_repr::ExtPlan;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(Uuid);

impl JobId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Queued,
    Running,
    Completed,
    Failed,
}

impl JobStatus {
    pub fn is_finished(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRecord {
    pub id: JobId,
    pub name: String,
    pub status: JobStatus,
    /// Seconds since the unix epoch
    pub submitted_at: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<ExtPlan>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Shared map of all jobs, cheap to clone.
/// Passed explicitly to whoever needs to submit or poll jobs.
#[derive(Debug, Clone, Default)]
pub struct JobStore {
    jobs: Arc<Mutex<HashMap<JobId, JobRecord>>>,
}

impl JobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new job in the [`JobStatus::Queued`] state
    pub fn enqueue(&self, name: &str) -> JobId {
        let id = JobId::new();
        let record = JobRecord {
            id,
            name: name.to_string(),
            status: JobStatus::Queued,
            submitted_at: current_timestamp(),
            result: None,
            error: None,
        };
        self.lock().insert(id, record);
        id
    }

    pub fn mark_running(&self, id: JobId) {
        if let Some(record) = self.lock().get_mut(&id) {
            record.status = JobStatus::Running;
        }
    }

    pub fn complete(&self, id: JobId, plan: ExtPlan) {
        if let Some(record) = self.lock().get_mut(&id) {
            record.status = JobStatus::Completed;
            record.result = Some(plan);
        }
    }

    pub fn fail(&self, id: JobId, error: String) {
        if let Some(record) = self.lock().get_mut(&id) {
            record.status = JobStatus::Failed;
            record.error = Some(error);
        }
    }

    pub fn status(&self, id: JobId) -> Option<JobStatus> {
        self.lock().get(&id).map(|r| r.status)
    }

    pub fn get(&self, id: JobId) -> Option<JobRecord> {
        self.lock().get(&id).cloned()
    }

    /// Removes a finished job from the store and returns it
    pub fn take_finished(&self, id: JobId) -> Option<JobRecord> {
        let mut jobs = self.lock();
        match jobs.get(&id) {
            Some(r) if r.status.is_finished() => jobs.remove(&id),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<JobId, JobRecord>> {
        self.jobs.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_lifecycle() {
        let store = JobStore::new();
        let id = store.enqueue("plot");
        assert_eq!(store.status(id), Some(JobStatus::Queued));
        assert!(store.take_finished(id).is_none());

        store.mark_running(id);
        assert_eq!(store.status(id), Some(JobStatus::Running));

        store.fail(id, "boom".to_string());
        let record = store.take_finished(id).unwrap();
        assert_eq!(record.status, JobStatus::Failed);
        assert_eq!(record.error.as_deref(), Some("boom"));
        assert!(store.is_empty());
    }

    #[test]
    fn unknown_job() {
        let store = JobStore::new();
        assert_eq!(store.status(JobId::new()), None);
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&JobStatus::Completed).unwrap(),
            "\"completed\""
        );
    }
}
