//! Issue domain service.
//!
//! Implements the issue driving ports on top of an [`IssueRepository`].
//! Validation always completes before the repository is touched, so a
//! rejected request never mutates the store.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, error, info};

use crate::domain::issue::require_id;
use crate::domain::ports::{
    CreateIssueRequest, DeleteIssueRequest, IssueCommand, IssueCommandError, IssueQuery,
    IssueRepository, IssueRepositoryError, ListIssuesRequest, UpdateIssueRequest,
};
use crate::domain::{Error, Issue, IssueId, IssueMutation, IssueRejection};

fn map_repository_error(error: IssueRepositoryError) -> Error {
    match error {
        IssueRepositoryError::Unavailable { message } => {
            Error::internal(format!("issue repository unavailable: {message}"))
        }
    }
}

fn reject(rejection: IssueRejection) -> IssueCommandError {
    debug!(
        reason = rejection.reason(),
        issue_id = rejection.id().map(IssueId::as_str),
        "issue request rejected"
    );
    IssueCommandError::Rejected(rejection)
}

/// Issue service implementing both the command and query driving ports.
#[derive(Clone)]
pub struct IssueService<R> {
    issue_repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> IssueService<R> {
    /// Create a service over the given repository and clock.
    pub fn new(issue_repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { issue_repo, clock }
    }
}

#[async_trait]
impl<R> IssueQuery for IssueService<R>
where
    R: IssueRepository,
{
    async fn list_issues(&self, request: ListIssuesRequest) -> Result<Vec<Issue>, Error> {
        let ListIssuesRequest { project, filter } = request;
        let issues = self
            .issue_repo
            .list(&project)
            .await
            .map_err(map_repository_error)?;
        Ok(filter.apply(issues))
    }
}

#[async_trait]
impl<R> IssueCommand for IssueService<R>
where
    R: IssueRepository,
{
    async fn create_issue(&self, request: CreateIssueRequest) -> Result<Issue, IssueCommandError> {
        let CreateIssueRequest { project, draft } = request;
        let issue =
            Issue::create(IssueId::generate(), draft, self.clock.utc()).map_err(reject)?;

        self.issue_repo
            .insert(&project, issue.clone())
            .await
            .map_err(map_repository_error)?;

        info!(project = %project, issue_id = %issue.id(), "issue created");
        Ok(issue)
    }

    async fn update_issue(
        &self,
        request: UpdateIssueRequest,
    ) -> Result<IssueMutation, IssueCommandError> {
        let UpdateIssueRequest {
            project,
            id,
            changes,
        } = request;
        let id = require_id(id).map_err(reject)?;
        let changes = changes.qualifying();
        if changes.is_empty() {
            return Err(reject(IssueRejection::NoUpdateFields { id }));
        }

        match self
            .issue_repo
            .update(&project, &id, changes, self.clock.utc())
            .await
        {
            Ok(Some(_)) => {
                info!(project = %project, issue_id = %id, "issue updated");
                Ok(IssueMutation::updated(id))
            }
            Ok(None) => Err(reject(IssueRejection::CouldNotUpdate { id })),
            Err(err) => {
                error!(project = %project, issue_id = %id, error = %err, "issue update failed");
                Err(IssueRejection::CouldNotUpdate { id }.into())
            }
        }
    }

    async fn delete_issue(
        &self,
        request: DeleteIssueRequest,
    ) -> Result<IssueMutation, IssueCommandError> {
        let DeleteIssueRequest { project, id } = request;
        let id = require_id(id).map_err(reject)?;

        match self.issue_repo.remove(&project, &id).await {
            Ok(Some(_)) => {
                info!(project = %project, issue_id = %id, "issue deleted");
                Ok(IssueMutation::deleted(id))
            }
            Ok(None) => Err(reject(IssueRejection::CouldNotDelete { id })),
            Err(err) => {
                error!(project = %project, issue_id = %id, error = %err, "issue delete failed");
                Err(IssueRejection::CouldNotDelete { id }.into())
            }
        }
    }
}

#[cfg(test)]
#[path = "issue_service_tests.rs"]
mod tests;
