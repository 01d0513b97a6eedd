//! Tests for the issue service.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::MockIssueRepository;
use crate::domain::{ErrorCode, IssueChanges, IssueDraft, IssueFilter, OpenFlag, ProjectName};

struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

#[fixture]
fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 4, 2, 8, 0, 0)
        .single()
        .expect("valid timestamp")
}

#[fixture]
fn project() -> ProjectName {
    ProjectName::new("apitest")
}

fn service(repo: MockIssueRepository, now: DateTime<Utc>) -> IssueService<MockIssueRepository> {
    IssueService::new(Arc::new(repo), Arc::new(FixtureClock { utc_now: now }))
}

fn draft() -> IssueDraft {
    IssueDraft {
        issue_title: Some("T".to_owned()),
        issue_text: Some("X".to_owned()),
        created_by: Some("C".to_owned()),
        assigned_to: None,
        status_text: None,
    }
}

fn stored_issue(now: DateTime<Utc>) -> Issue {
    Issue::create(IssueId::new("known"), draft(), now).expect("valid draft")
}

fn text_change(text: &str) -> IssueChanges {
    IssueChanges {
        issue_text: Some(text.to_owned()),
        ..IssueChanges::default()
    }
}

#[rstest]
#[tokio::test]
async fn create_issue_stores_open_issue_with_clock_time(project: ProjectName, now: DateTime<Utc>) {
    let mut repo = MockIssueRepository::new();
    repo.expect_insert()
        .withf(|project, issue| project.as_str() == "apitest" && issue.issue_title() == "T")
        .times(1)
        .return_once(|_, _| Ok(()));

    let issue = service(repo, now)
        .create_issue(CreateIssueRequest {
            project,
            draft: draft(),
        })
        .await
        .expect("issue created");

    assert!(issue.is_open());
    assert_eq!(issue.created_on(), now);
    assert_eq!(issue.updated_on(), now);
    assert_eq!(issue.assigned_to(), "");
}

#[rstest]
#[tokio::test]
async fn create_issue_rejects_before_touching_repository(
    project: ProjectName,
    now: DateTime<Utc>,
) {
    let mut repo = MockIssueRepository::new();
    repo.expect_insert().times(0);

    let err = service(repo, now)
        .create_issue(CreateIssueRequest {
            project,
            draft: IssueDraft {
                issue_text: Some(String::new()),
                ..draft()
            },
        })
        .await
        .expect_err("missing fields");

    assert_eq!(
        err,
        IssueCommandError::Rejected(IssueRejection::RequiredFieldsMissing)
    );
}

#[rstest]
#[tokio::test]
async fn create_issue_maps_repository_failure_to_internal_error(
    project: ProjectName,
    now: DateTime<Utc>,
) {
    let mut repo = MockIssueRepository::new();
    repo.expect_insert()
        .return_once(|_, _| Err(IssueRepositoryError::unavailable("lock poisoned")));

    let err = service(repo, now)
        .create_issue(CreateIssueRequest {
            project,
            draft: draft(),
        })
        .await
        .expect_err("repository failure");

    match err {
        IssueCommandError::Failed(error) => assert_eq!(error.code(), ErrorCode::InternalError),
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[rstest]
#[tokio::test]
async fn list_issues_applies_filter(project: ProjectName, now: DateTime<Utc>) {
    let mut repo = MockIssueRepository::new();
    repo.expect_list()
        .times(1)
        .return_once(move |_| Ok(vec![stored_issue(now)]));

    let issues = service(repo, now)
        .list_issues(ListIssuesRequest {
            project,
            filter: IssueFilter::from_pairs([("open", "false")]),
        })
        .await
        .expect("listing succeeds");

    assert!(issues.is_empty());
}

#[rstest]
#[tokio::test]
async fn update_issue_without_id_is_rejected(project: ProjectName, now: DateTime<Utc>) {
    let mut repo = MockIssueRepository::new();
    repo.expect_update().times(0);

    let err = service(repo, now)
        .update_issue(UpdateIssueRequest {
            project,
            id: None,
            changes: text_change("Y"),
        })
        .await
        .expect_err("missing id");

    assert_eq!(err, IssueCommandError::Rejected(IssueRejection::MissingId));
}

#[rstest]
#[tokio::test]
async fn update_issue_with_only_empty_fields_is_rejected(
    project: ProjectName,
    now: DateTime<Utc>,
) {
    let mut repo = MockIssueRepository::new();
    repo.expect_update().times(0);

    let err = service(repo, now)
        .update_issue(UpdateIssueRequest {
            project,
            id: Some(IssueId::new("known")),
            changes: text_change(""),
        })
        .await
        .expect_err("nothing to update");

    assert_eq!(
        err,
        IssueCommandError::Rejected(IssueRejection::NoUpdateFields {
            id: IssueId::new("known")
        })
    );
}

#[rstest]
#[tokio::test]
async fn update_issue_passes_qualifying_changes_and_clock_time(
    project: ProjectName,
    now: DateTime<Utc>,
) {
    let mut repo = MockIssueRepository::new();
    repo.expect_update()
        .withf(move |_, id, changes, at| {
            id.as_str() == "known"
                && changes.issue_text.as_deref() == Some("Y")
                && changes.status_text.is_none()
                && changes.open == Some(OpenFlag::Text("false".to_owned()))
                && *at == now
        })
        .times(1)
        .return_once(move |_, _, changes, at| {
            let mut issue = stored_issue(now);
            issue.apply(changes, at);
            Ok(Some(issue))
        });

    let mutation = service(repo, now)
        .update_issue(UpdateIssueRequest {
            project,
            id: Some(IssueId::new("known")),
            changes: IssueChanges {
                status_text: Some(String::new()),
                open: Some(OpenFlag::Text("false".to_owned())),
                ..text_change("Y")
            },
        })
        .await
        .expect("update succeeds");

    assert_eq!(mutation, IssueMutation::updated(IssueId::new("known")));
}

#[rstest]
#[case::unknown_id(Ok(None))]
#[case::repository_failure(Err(IssueRepositoryError::unavailable("boom")))]
#[tokio::test]
async fn update_issue_reports_could_not_update(
    #[case] outcome: Result<Option<Issue>, IssueRepositoryError>,
    project: ProjectName,
    now: DateTime<Utc>,
) {
    let mut repo = MockIssueRepository::new();
    repo.expect_update()
        .times(1)
        .return_once(move |_, _, _, _| outcome);

    let err = service(repo, now)
        .update_issue(UpdateIssueRequest {
            project,
            id: Some(IssueId::new("123invalidid")),
            changes: text_change("Y"),
        })
        .await
        .expect_err("could not update");

    assert_eq!(
        err,
        IssueCommandError::Rejected(IssueRejection::CouldNotUpdate {
            id: IssueId::new("123invalidid")
        })
    );
}

#[rstest]
#[tokio::test]
async fn delete_issue_without_id_is_rejected(project: ProjectName, now: DateTime<Utc>) {
    let mut repo = MockIssueRepository::new();
    repo.expect_remove().times(0);

    let err = service(repo, now)
        .delete_issue(DeleteIssueRequest {
            project,
            id: Some(IssueId::new("")),
        })
        .await
        .expect_err("missing id");

    assert_eq!(err, IssueCommandError::Rejected(IssueRejection::MissingId));
}

#[rstest]
#[tokio::test]
async fn delete_issue_acknowledges_removal(project: ProjectName, now: DateTime<Utc>) {
    let mut repo = MockIssueRepository::new();
    repo.expect_remove()
        .withf(|project, id| project.as_str() == "apitest" && id.as_str() == "known")
        .times(1)
        .return_once(move |_, _| Ok(Some(stored_issue(now))));

    let mutation = service(repo, now)
        .delete_issue(DeleteIssueRequest {
            project,
            id: Some(IssueId::new("known")),
        })
        .await
        .expect("delete succeeds");

    assert_eq!(mutation.message(), "successfully deleted");
    assert_eq!(mutation.id().as_str(), "known");
}

#[rstest]
#[case::unknown_id(Ok(None))]
#[case::repository_failure(Err(IssueRepositoryError::unavailable("lock poisoned")))]
#[tokio::test]
async fn delete_issue_reports_could_not_delete(
    #[case] outcome: Result<Option<Issue>, IssueRepositoryError>,
    project: ProjectName,
    now: DateTime<Utc>,
) {
    let mut repo = MockIssueRepository::new();
    repo.expect_remove()
        .times(1)
        .return_once(move |_, _| outcome);

    let err = service(repo, now)
        .delete_issue(DeleteIssueRequest {
            project,
            id: Some(IssueId::new("invalidid123")),
        })
        .await
        .expect_err("could not delete");

    assert_eq!(
        err,
        IssueCommandError::Rejected(IssueRejection::CouldNotDelete {
            id: IssueId::new("invalidid123")
        })
    );
}
