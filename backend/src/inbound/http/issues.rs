//! Issue HTTP handlers.
//!
//! ```text
//! GET    /api/issues/{project}
//! POST   /api/issues/{project}
//! PUT    /api/issues/{project}
//! DELETE /api/issues/{project}
//! ```
//!
//! Logical outcomes (rejections and acknowledgements) are always answered
//! with status 200. Only service failures produce an error status.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::ports::{
    CreateIssueRequest, DeleteIssueRequest, IssueCommandError, ListIssuesRequest,
    UpdateIssueRequest,
};
use crate::domain::{
    Issue, IssueChanges, IssueDraft, IssueFilter, IssueId, IssueMutation, IssueRejection,
    OpenFlag, ProjectName, format_timestamp,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Request body accepted as JSON or as an urlencoded form.
type IssueBody<T> = Result<web::Either<web::Json<T>, web::Form<T>>, actix_web::Error>;

/// Issue record as exposed on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct IssueResponse {
    #[serde(rename = "_id")]
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    pub issue_title: String,
    pub issue_text: String,
    pub created_by: String,
    pub assigned_to: String,
    pub status_text: String,
    pub open: bool,
    #[schema(example = "2026-01-02T03:04:05.000Z")]
    pub created_on: String,
    #[schema(example = "2026-01-02T03:04:05.000Z")]
    pub updated_on: String,
}

impl From<Issue> for IssueResponse {
    fn from(issue: Issue) -> Self {
        Self {
            id: issue.id().to_string(),
            issue_title: issue.issue_title().to_owned(),
            issue_text: issue.issue_text().to_owned(),
            created_by: issue.created_by().to_owned(),
            assigned_to: issue.assigned_to().to_owned(),
            status_text: issue.status_text().to_owned(),
            open: issue.is_open(),
            created_on: format_timestamp(&issue.created_on()),
            updated_on: format_timestamp(&issue.updated_on()),
        }
    }
}

/// Decode an optional text field, accepting any scalar.
///
/// Numbers and booleans become their textual form and `null` counts as
/// absent, so one oddly typed field never discards the rest of the body.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| match value {
        Value::Null => None,
        Value::String(text) => Some(text),
        other => Some(other.to_string()),
    }))
}

/// Body of a create request.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct CreateIssueBody {
    #[serde(default, deserialize_with = "lenient_text")]
    pub issue_title: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub issue_text: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub created_by: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub assigned_to: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub status_text: Option<String>,
}

impl From<CreateIssueBody> for IssueDraft {
    fn from(body: CreateIssueBody) -> Self {
        Self {
            issue_title: body.issue_title,
            issue_text: body.issue_text,
            created_by: body.created_by,
            assigned_to: body.assigned_to,
            status_text: body.status_text,
        }
    }
}

/// Body of an update request.
///
/// `open` accepts any JSON value. Only the text `"false"` closes the issue;
/// booleans and other values resolve by truthiness.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct UpdateIssueBody {
    #[serde(rename = "_id", default, deserialize_with = "lenient_text")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub issue_title: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub issue_text: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub created_by: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub assigned_to: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub status_text: Option<String>,
    #[schema(value_type = Option<bool>)]
    pub open: Option<OpenFlag>,
}

impl UpdateIssueBody {
    fn into_request(self, project: ProjectName) -> UpdateIssueRequest {
        UpdateIssueRequest {
            project,
            id: self.id.map(IssueId::new),
            changes: IssueChanges {
                issue_title: self.issue_title,
                issue_text: self.issue_text,
                created_by: self.created_by,
                assigned_to: self.assigned_to,
                status_text: self.status_text,
                open: self.open,
            },
        }
    }
}

/// Body of a delete request.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct DeleteIssueBody {
    #[serde(rename = "_id", default, deserialize_with = "lenient_text")]
    pub id: Option<String>,
}

/// Logical rejection of a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RejectionResponse {
    #[schema(example = "could not update")]
    pub error: String,
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl From<IssueRejection> for RejectionResponse {
    fn from(rejection: IssueRejection) -> Self {
        Self {
            error: rejection.to_string(),
            id: rejection.id().map(ToString::to_string),
        }
    }
}

/// Acknowledgement of an update or delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MutationResponse {
    #[schema(example = "successfully updated")]
    pub result: String,
    #[serde(rename = "_id")]
    pub id: String,
}

impl From<IssueMutation> for MutationResponse {
    fn from(mutation: IssueMutation) -> Self {
        Self {
            result: mutation.message().to_owned(),
            id: mutation.id().to_string(),
        }
    }
}

/// Unwrap a decoded body, treating an unparsable one as empty.
fn decode_body<T: Default>(body: IssueBody<T>) -> T {
    match body {
        Ok(web::Either::Left(web::Json(value))) => value,
        Ok(web::Either::Right(web::Form(value))) => value,
        Err(error) => {
            debug!(%error, "request body could not be decoded; treating it as empty");
            T::default()
        }
    }
}

fn respond<T>(
    outcome: Result<T, IssueCommandError>,
    render: impl FnOnce(T) -> HttpResponse,
) -> ApiResult<HttpResponse> {
    match outcome {
        Ok(value) => Ok(render(value)),
        Err(IssueCommandError::Rejected(rejection)) => {
            Ok(HttpResponse::Ok().json(RejectionResponse::from(rejection)))
        }
        Err(IssueCommandError::Failed(error)) => Err(error),
    }
}

/// List a project's issues, optionally filtered by field equality.
#[utoipa::path(
    get,
    path = "/api/issues/{project}",
    description = "Every query parameter is an equality filter on an issue field. \
                   Unknown fields match nothing.",
    params(("project" = String, Path, description = "Project name")),
    responses(
        (status = 200, description = "Matching issues in insertion order", body = [IssueResponse]),
        (status = 400, description = "Undecodable query string", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["issues"],
    operation_id = "listIssues"
)]
#[get("/issues/{project}")]
pub async fn list_issues(
    state: web::Data<HttpState>,
    project: web::Path<String>,
    query: web::Query<Vec<(String, String)>>,
) -> ApiResult<web::Json<Vec<IssueResponse>>> {
    let request = ListIssuesRequest {
        project: ProjectName::new(project.into_inner()),
        filter: IssueFilter::from_pairs(query.into_inner()),
    };
    let issues = state.issues_query.list_issues(request).await?;
    Ok(web::Json(issues.into_iter().map(IssueResponse::from).collect()))
}

/// Create an issue in a project.
#[utoipa::path(
    post,
    path = "/api/issues/{project}",
    params(("project" = String, Path, description = "Project name")),
    request_body = CreateIssueBody,
    responses(
        (status = 200, description = "Created issue, or a rejection payload", body = IssueResponse),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["issues"],
    operation_id = "createIssue"
)]
#[post("/issues/{project}")]
pub async fn create_issue(
    state: web::Data<HttpState>,
    project: web::Path<String>,
    body: IssueBody<CreateIssueBody>,
) -> ApiResult<HttpResponse> {
    let request = CreateIssueRequest {
        project: ProjectName::new(project.into_inner()),
        draft: decode_body(body).into(),
    };
    respond(state.issues.create_issue(request).await, |issue| {
        HttpResponse::Ok().json(IssueResponse::from(issue))
    })
}

/// Apply a partial update to an issue.
#[utoipa::path(
    put,
    path = "/api/issues/{project}",
    params(("project" = String, Path, description = "Project name")),
    request_body = UpdateIssueBody,
    responses(
        (status = 200, description = "Update acknowledgement, or a rejection payload", body = MutationResponse),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["issues"],
    operation_id = "updateIssue"
)]
#[put("/issues/{project}")]
pub async fn update_issue(
    state: web::Data<HttpState>,
    project: web::Path<String>,
    body: IssueBody<UpdateIssueBody>,
) -> ApiResult<HttpResponse> {
    let request = decode_body(body).into_request(ProjectName::new(project.into_inner()));
    respond(state.issues.update_issue(request).await, |mutation| {
        HttpResponse::Ok().json(MutationResponse::from(mutation))
    })
}

/// Delete an issue from a project.
#[utoipa::path(
    delete,
    path = "/api/issues/{project}",
    params(("project" = String, Path, description = "Project name")),
    request_body = DeleteIssueBody,
    responses(
        (status = 200, description = "Delete acknowledgement, or a rejection payload", body = MutationResponse),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["issues"],
    operation_id = "deleteIssue"
)]
#[delete("/issues/{project}")]
pub async fn delete_issue(
    state: web::Data<HttpState>,
    project: web::Path<String>,
    body: IssueBody<DeleteIssueBody>,
) -> ApiResult<HttpResponse> {
    let body: DeleteIssueBody = decode_body(body);
    let request = DeleteIssueRequest {
        project: ProjectName::new(project.into_inner()),
        id: body.id.map(IssueId::new),
    };
    respond(state.issues.delete_issue(request).await, |mutation| {
        HttpResponse::Ok().json(MutationResponse::from(mutation))
    })
}

#[cfg(test)]
#[path = "issues_tests.rs"]
mod tests;
