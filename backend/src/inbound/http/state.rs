//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without a real store.

use std::sync::Arc;

use crate::domain::ports::{IssueCommand, IssueQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub issues: Arc<dyn IssueCommand>,
    pub issues_query: Arc<dyn IssueQuery>,
}

impl HttpState {
    /// Construct state from the issue ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use issue_tracker::domain::IssueService;
    /// use issue_tracker::inbound::http::state::HttpState;
    /// use issue_tracker::outbound::memory::InMemoryIssueRepository;
    /// use mockable::DefaultClock;
    ///
    /// let service = Arc::new(IssueService::new(
    ///     Arc::new(InMemoryIssueRepository::new()),
    ///     Arc::new(DefaultClock),
    /// ));
    /// let state = HttpState::new(service.clone(), service);
    /// let _ = state.issues.clone();
    /// ```
    pub fn new(issues: Arc<dyn IssueCommand>, issues_query: Arc<dyn IssueQuery>) -> Self {
        Self {
            issues,
            issues_query,
        }
    }
}
