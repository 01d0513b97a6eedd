//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the issue endpoints and the transport error schemas.
//! The document is exported via `cargo run --bin openapi-dump` for external
//! tooling.

use crate::inbound::http::issues::{
    CreateIssueBody, DeleteIssueBody, IssueResponse, MutationResponse, RejectionResponse,
    UpdateIssueBody,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Issue tracker API",
        description = "Project-scoped issue tracking. Logical outcomes are returned with status \
                       200 and an `error` or `result` payload."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::issues::list_issues,
        crate::inbound::http::issues::create_issue,
        crate::inbound::http::issues::update_issue,
        crate::inbound::http::issues::delete_issue,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        IssueResponse,
        CreateIssueBody,
        UpdateIssueBody,
        DeleteIssueBody,
        RejectionResponse,
        MutationResponse
    )),
    tags(
        (name = "issues", description = "Issue lifecycle within a project")
    )
)]
pub struct ApiDoc;
