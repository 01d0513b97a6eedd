//! Domain ports.
//!
//! Driving ports (`IssueCommand`, `IssueQuery`) are called by inbound
//! adapters. Driven ports (`IssueRepository`) are implemented by outbound
//! adapters.

mod issue_command;
mod issue_query;
mod issue_repository;
mod macros;

pub(crate) use macros::define_port_error;

#[cfg(test)]
pub use issue_command::MockIssueCommand;
pub use issue_command::{
    CreateIssueRequest, DeleteIssueRequest, IssueCommand, IssueCommandError, UpdateIssueRequest,
};
#[cfg(test)]
pub use issue_query::MockIssueQuery;
pub use issue_query::{IssueQuery, ListIssuesRequest};
#[cfg(test)]
pub use issue_repository::MockIssueRepository;
pub use issue_repository::{IssueRepository, IssueRepositoryError};
