//! Process-local issue store.
//!
//! [`InMemoryIssueRepository`] owns the project-to-issues map for the life of
//! the process. A single mutex guards the whole map, so every repository call
//! is atomic with respect to every other call. The lock is never held across
//! an `.await`.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{IssueRepository, IssueRepositoryError};
use crate::domain::{Issue, IssueChanges, IssueId, ProjectName};

type Partitions = HashMap<ProjectName, Vec<Issue>>;

/// In-memory [`IssueRepository`] keyed by project name.
///
/// Projects are created as empty partitions the first time any call names
/// them and are never removed.
///
/// # Examples
/// ```
/// use issue_tracker::outbound::memory::InMemoryIssueRepository;
///
/// let _repository = InMemoryIssueRepository::new();
/// ```
#[derive(Debug, Default)]
pub struct InMemoryIssueRepository {
    partitions: Mutex<Partitions>,
}

impl InMemoryIssueRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Partitions>, IssueRepositoryError> {
        self.partitions
            .lock()
            .map_err(|_| IssueRepositoryError::unavailable("issue store lock poisoned"))
    }

    fn with_partition<T>(
        &self,
        project: &ProjectName,
        operation: impl FnOnce(&mut Vec<Issue>) -> T,
    ) -> Result<T, IssueRepositoryError> {
        let mut partitions = self.lock()?;
        let issues = partitions.entry(project.clone()).or_default();
        Ok(operation(issues))
    }
}

fn position(issues: &[Issue], id: &IssueId) -> Option<usize> {
    issues.iter().position(|issue| issue.id() == id)
}

#[async_trait]
impl IssueRepository for InMemoryIssueRepository {
    async fn list(&self, project: &ProjectName) -> Result<Vec<Issue>, IssueRepositoryError> {
        self.with_partition(project, |issues| issues.clone())
    }

    async fn insert(
        &self,
        project: &ProjectName,
        issue: Issue,
    ) -> Result<(), IssueRepositoryError> {
        self.with_partition(project, |issues| issues.push(issue))
    }

    async fn update(
        &self,
        project: &ProjectName,
        id: &IssueId,
        changes: IssueChanges,
        now: DateTime<Utc>,
    ) -> Result<Option<Issue>, IssueRepositoryError> {
        self.with_partition(project, |issues| {
            issues
                .iter_mut()
                .find(|issue| issue.id() == id)
                .map(|issue| {
                    issue.apply(changes, now);
                    issue.clone()
                })
        })
    }

    async fn remove(
        &self,
        project: &ProjectName,
        id: &IssueId,
    ) -> Result<Option<Issue>, IssueRepositoryError> {
        self.with_partition(project, |issues| {
            position(issues, id).map(|index| issues.remove(index))
        })
    }
}
