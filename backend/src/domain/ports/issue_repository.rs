//! Driven port for issue storage partitioned by project.
//!
//! Each call must be atomic with respect to every other call on the same
//! repository: a reader never observes a half-applied update.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Issue, IssueChanges, IssueId, ProjectName};

use super::define_port_error;

define_port_error! {
    /// Errors raised by issue repository adapters.
    pub enum IssueRepositoryError {
        /// The backing store could not be reached or is unusable.
        Unavailable { message: String } =>
            "issue repository unavailable: {message}",
    }
}

/// Port for reading and mutating the issues of a project.
///
/// Referencing a project that has never been seen behaves as referencing an
/// empty one. Lookups by id only search the addressed project.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IssueRepository: Send + Sync {
    /// Return the project's issues in insertion order.
    async fn list(&self, project: &ProjectName) -> Result<Vec<Issue>, IssueRepositoryError>;

    /// Append an issue to the project.
    async fn insert(&self, project: &ProjectName, issue: Issue)
    -> Result<(), IssueRepositoryError>;

    /// Apply `changes` to the issue with `id` in place.
    ///
    /// Returns the updated issue, or `None` when the project holds no issue
    /// with that id.
    async fn update(
        &self,
        project: &ProjectName,
        id: &IssueId,
        changes: IssueChanges,
        now: DateTime<Utc>,
    ) -> Result<Option<Issue>, IssueRepositoryError>;

    /// Remove the issue with `id`, returning it when it existed.
    async fn remove(
        &self,
        project: &ProjectName,
        id: &IssueId,
    ) -> Result<Option<Issue>, IssueRepositoryError>;
}
