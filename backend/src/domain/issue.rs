//! Issue records and the change sets applied to them.
//!
//! An [`Issue`] is created once from an [`IssueDraft`] and afterwards only
//! mutated field by field through [`IssueChanges`]. The identifier and the
//! creation timestamp never change.
//!
//! ## Invariants
//! - `issue_title`, `issue_text` and `created_by` are non-empty.
//! - `created_on <= updated_on`, and every successful update strictly
//!   increases `updated_on`.

use std::borrow::Cow;
use std::fmt;

use chrono::{DateTime, SecondsFormat, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::IssueRejection;

/// Render a timestamp in the ISO-8601 form used on the wire.
///
/// # Examples
/// ```
/// use chrono::{TimeZone, Utc};
/// use issue_tracker::domain::format_timestamp;
///
/// let at = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
/// assert_eq!(format_timestamp(&at), "2026-01-02T03:04:05.000Z");
/// ```
pub fn format_timestamp(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Store-wide unique issue identifier.
///
/// Identifiers are generated as UUID v4 strings at creation. Lookups accept
/// any string so that malformed identifiers simply fail to match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IssueId(String);

impl IssueId {
    /// Generate a fresh identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wrap a caller-supplied identifier.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the identifier text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    fn is_blank(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for IssueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Treat an absent or empty identifier as missing.
pub(crate) fn require_id(id: Option<IssueId>) -> Result<IssueId, IssueRejection> {
    id.filter(|id| !id.is_blank())
        .ok_or(IssueRejection::MissingId)
}

/// Name of the partition an issue belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectName(String);

impl ProjectName {
    /// Wrap a project name taken from the request path.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the project name.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fields supplied when creating an issue.
///
/// Every field is optional at this level; [`Issue::create`] enforces the
/// required ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueDraft {
    pub issue_title: Option<String>,
    pub issue_text: Option<String>,
    pub created_by: Option<String>,
    pub assigned_to: Option<String>,
    pub status_text: Option<String>,
}

/// Value supplied for the `open` flag on update.
///
/// Only the exact text `"false"` closes an issue; any other text opens it.
/// Values of other JSON types resolve by truthiness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OpenFlag {
    Bool(bool),
    Text(String),
    Other(Value),
}

impl OpenFlag {
    /// Resolve the flag to the stored boolean.
    ///
    /// # Examples
    /// ```
    /// use issue_tracker::domain::OpenFlag;
    ///
    /// assert!(!OpenFlag::Text("false".to_owned()).resolve());
    /// assert!(OpenFlag::Text("no".to_owned()).resolve());
    /// assert!(!OpenFlag::Bool(false).resolve());
    /// assert!(OpenFlag::Other(1.into()).resolve());
    /// ```
    pub fn resolve(&self) -> bool {
        match self {
            Self::Bool(value) => *value,
            Self::Text(text) => text != "false",
            Self::Other(value) => is_truthy(value),
        }
    }

    fn is_supplied(&self) -> bool {
        !matches!(self, Self::Text(text) if text.is_empty())
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Partial update applied to an existing issue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueChanges {
    pub issue_title: Option<String>,
    pub issue_text: Option<String>,
    pub created_by: Option<String>,
    pub assigned_to: Option<String>,
    pub status_text: Option<String>,
    pub open: Option<OpenFlag>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.is_empty())
}

impl IssueChanges {
    /// Drop every field that does not request a change.
    ///
    /// Empty strings count as "no change", matching how creation treats
    /// absent fields.
    pub fn qualifying(self) -> Self {
        Self {
            issue_title: non_empty(self.issue_title),
            issue_text: non_empty(self.issue_text),
            created_by: non_empty(self.created_by),
            assigned_to: non_empty(self.assigned_to),
            status_text: non_empty(self.status_text),
            open: self.open.filter(OpenFlag::is_supplied),
        }
    }

    /// Whether no field is set.
    pub fn is_empty(&self) -> bool {
        self.issue_title.is_none()
            && self.issue_text.is_none()
            && self.created_by.is_none()
            && self.assigned_to.is_none()
            && self.status_text.is_none()
            && self.open.is_none()
    }
}

/// A tracked issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    id: IssueId,
    issue_title: String,
    issue_text: String,
    created_by: String,
    assigned_to: String,
    status_text: String,
    open: bool,
    created_on: DateTime<Utc>,
    updated_on: DateTime<Utc>,
}

impl Issue {
    /// Build a new open issue from a draft.
    ///
    /// # Errors
    /// Returns [`IssueRejection::RequiredFieldsMissing`] when the title, text
    /// or author is absent or empty.
    pub fn create(
        id: IssueId,
        draft: IssueDraft,
        now: DateTime<Utc>,
    ) -> Result<Self, IssueRejection> {
        let (Some(issue_title), Some(issue_text), Some(created_by)) = (
            non_empty(draft.issue_title),
            non_empty(draft.issue_text),
            non_empty(draft.created_by),
        ) else {
            return Err(IssueRejection::RequiredFieldsMissing);
        };

        Ok(Self {
            id,
            issue_title,
            issue_text,
            created_by,
            assigned_to: draft.assigned_to.unwrap_or_default(),
            status_text: draft.status_text.unwrap_or_default(),
            open: true,
            created_on: now,
            updated_on: now,
        })
    }

    /// Apply a change set and refresh `updated_on`.
    ///
    /// Fields absent from `changes` are left untouched. When `now` does not
    /// lie after the previous `updated_on` the timestamp advances by one
    /// millisecond instead.
    pub fn apply(&mut self, changes: IssueChanges, now: DateTime<Utc>) {
        let IssueChanges {
            issue_title,
            issue_text,
            created_by,
            assigned_to,
            status_text,
            open,
        } = changes;

        if let Some(value) = issue_title {
            self.issue_title = value;
        }
        if let Some(value) = issue_text {
            self.issue_text = value;
        }
        if let Some(value) = created_by {
            self.created_by = value;
        }
        if let Some(value) = assigned_to {
            self.assigned_to = value;
        }
        if let Some(value) = status_text {
            self.status_text = value;
        }
        if let Some(flag) = open {
            self.open = flag.resolve();
        }

        let floor = self.updated_on + TimeDelta::milliseconds(1);
        self.updated_on = now.max(floor);
    }

    /// Textual value of a field by its wire name, used for filtering.
    ///
    /// Returns `None` for names that are not part of the record.
    pub fn field_text(&self, field: &str) -> Option<Cow<'_, str>> {
        let text = match field {
            "_id" => Cow::Borrowed(self.id.as_str()),
            "issue_title" => Cow::Borrowed(self.issue_title.as_str()),
            "issue_text" => Cow::Borrowed(self.issue_text.as_str()),
            "created_by" => Cow::Borrowed(self.created_by.as_str()),
            "assigned_to" => Cow::Borrowed(self.assigned_to.as_str()),
            "status_text" => Cow::Borrowed(self.status_text.as_str()),
            "open" => Cow::Borrowed(if self.open { "true" } else { "false" }),
            "created_on" => Cow::Owned(format_timestamp(&self.created_on)),
            "updated_on" => Cow::Owned(format_timestamp(&self.updated_on)),
            _ => return None,
        };
        Some(text)
    }

    pub fn id(&self) -> &IssueId {
        &self.id
    }

    pub fn issue_title(&self) -> &str {
        &self.issue_title
    }

    pub fn issue_text(&self) -> &str {
        &self.issue_text
    }

    pub fn created_by(&self) -> &str {
        &self.created_by
    }

    pub fn assigned_to(&self) -> &str {
        &self.assigned_to
    }

    pub fn status_text(&self) -> &str {
        &self.status_text
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn created_on(&self) -> DateTime<Utc> {
        self.created_on
    }

    pub fn updated_on(&self) -> DateTime<Utc> {
        self.updated_on
    }
}
