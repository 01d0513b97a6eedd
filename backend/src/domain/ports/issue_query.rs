//! Driving port for issue listings.

use async_trait::async_trait;

use crate::domain::{Error, Issue, IssueFilter, ProjectName};

/// Request to list a project's issues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListIssuesRequest {
    pub project: ProjectName,
    pub filter: IssueFilter,
}

/// Port for reading issues.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IssueQuery: Send + Sync {
    /// Return the project's issues matching the filter, in insertion order.
    async fn list_issues(&self, request: ListIssuesRequest) -> Result<Vec<Issue>, Error>;
}
