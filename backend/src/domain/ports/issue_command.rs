//! Driving port for issue mutations.

use async_trait::async_trait;

use crate::domain::{
    Error, Issue, IssueChanges, IssueDraft, IssueId, IssueMutation, IssueRejection, ProjectName,
};

/// Failure of an issue command.
///
/// `Rejected` is a logical outcome reported to the caller as a normal
/// response. `Failed` is a service failure.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IssueCommandError {
    #[error(transparent)]
    Rejected(#[from] IssueRejection),
    #[error(transparent)]
    Failed(#[from] Error),
}

/// Request to create an issue in a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateIssueRequest {
    pub project: ProjectName,
    pub draft: IssueDraft,
}

/// Request to change fields of an existing issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateIssueRequest {
    pub project: ProjectName,
    pub id: Option<IssueId>,
    pub changes: IssueChanges,
}

/// Request to delete an issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteIssueRequest {
    pub project: ProjectName,
    pub id: Option<IssueId>,
}

/// Port for creating, updating and deleting issues.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IssueCommand: Send + Sync {
    /// Create an issue and return the stored record.
    async fn create_issue(&self, request: CreateIssueRequest) -> Result<Issue, IssueCommandError>;

    /// Apply the qualifying fields of a partial update.
    async fn update_issue(
        &self,
        request: UpdateIssueRequest,
    ) -> Result<IssueMutation, IssueCommandError>;

    /// Remove an issue from its project.
    async fn delete_issue(
        &self,
        request: DeleteIssueRequest,
    ) -> Result<IssueMutation, IssueCommandError>;
}
