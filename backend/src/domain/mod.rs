//! Domain primitives, ports and services.
//!
//! Purpose: model issues and the rules for creating, filtering, updating and
//! deleting them, independent of any transport or storage technology.
//!
//! Public surface:
//! - `Issue`, `IssueId`, `ProjectName`: the tracked record and its keys.
//! - `IssueDraft`, `IssueChanges`, `OpenFlag`: inputs to create and update.
//! - `IssueFilter`: field-equality predicate for listings.
//! - `IssueRejection`, `IssueMutation`: logical outcomes of mutations.
//! - `IssueService`: implementation of the driving ports in [`ports`].
//! - `Error`, `ErrorCode`: transport-level failure payload.
//! - `TraceId`: request correlation identifier.

pub mod error;
pub mod issue;
pub mod issue_filter;
pub mod issue_outcome;
pub mod issue_service;
pub mod ports;
pub mod trace_id;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::issue::{
    Issue, IssueChanges, IssueDraft, IssueId, OpenFlag, ProjectName, format_timestamp,
};
pub use self::issue_filter::IssueFilter;
pub use self::issue_outcome::{IssueMutation, IssueRejection, MutationKind};
pub use self::issue_service::IssueService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
