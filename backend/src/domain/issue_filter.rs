//! Field-equality filters for issue listings.

use super::Issue;

/// Conjunction of `field == value` predicates over an issue's wire fields.
///
/// Fields are compared through their textual form, so `open=true` matches an
/// open issue. A field name the record does not carry matches nothing.
///
/// # Examples
/// ```
/// use issue_tracker::domain::IssueFilter;
///
/// let filter = IssueFilter::from_pairs([("open", "true"), ("assigned_to", "Joe")]);
/// assert_eq!(filter.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueFilter {
    criteria: Vec<(String, String)>,
}

impl IssueFilter {
    /// Build a filter from `(field, expected)` pairs.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            criteria: pairs
                .into_iter()
                .map(|(field, expected)| (field.into(), expected.into()))
                .collect(),
        }
    }

    /// Number of criteria.
    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    /// Whether the filter accepts every issue.
    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    /// Evaluate the filter against one issue.
    pub fn matches(&self, issue: &Issue) -> bool {
        self.criteria.iter().all(|(field, expected)| {
            issue
                .field_text(field)
                .is_some_and(|actual| actual == expected.as_str())
        })
    }

    /// Keep the matching issues, preserving their order.
    pub fn apply(&self, issues: Vec<Issue>) -> Vec<Issue> {
        if self.is_empty() {
            return issues;
        }
        issues
            .into_iter()
            .filter(|issue| self.matches(issue))
            .collect()
    }
}
