//! Logical outcomes of issue mutations.
//!
//! These are expected results of well-formed requests, not failures of the
//! service. Inbound adapters render them as ordinary responses; transport
//! failures use [`crate::domain::Error`] instead.

use thiserror::Error;

use super::IssueId;

/// A request that was understood but could not be carried out.
///
/// The `Display` text of each variant is the message sent to clients.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IssueRejection {
    /// Title, text or author absent on create.
    #[error("required field(s) missing")]
    RequiredFieldsMissing,
    /// Update or delete without an `_id`.
    #[error("missing _id")]
    MissingId,
    /// Update carrying an `_id` but nothing to change.
    #[error("no update field(s) sent")]
    NoUpdateFields { id: IssueId },
    /// Update target absent from the project, or the update failed.
    #[error("could not update")]
    CouldNotUpdate { id: IssueId },
    /// Delete target absent from the project, or the removal failed.
    #[error("could not delete")]
    CouldNotDelete { id: IssueId },
}

impl IssueRejection {
    /// Identifier echoed back to the caller, when the request carried one.
    pub fn id(&self) -> Option<&IssueId> {
        match self {
            Self::RequiredFieldsMissing | Self::MissingId => None,
            Self::NoUpdateFields { id }
            | Self::CouldNotUpdate { id }
            | Self::CouldNotDelete { id } => Some(id),
        }
    }

    /// Short machine-friendly label used in logs.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::RequiredFieldsMissing => "required_fields_missing",
            Self::MissingId => "missing_id",
            Self::NoUpdateFields { .. } => "no_update_fields",
            Self::CouldNotUpdate { .. } => "could_not_update",
            Self::CouldNotDelete { .. } => "could_not_delete",
        }
    }
}

/// Kind of mutation acknowledged by [`IssueMutation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Updated,
    Deleted,
}

/// Acknowledgement of a successful update or delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueMutation {
    kind: MutationKind,
    id: IssueId,
}

impl IssueMutation {
    /// Acknowledge an update.
    pub fn updated(id: IssueId) -> Self {
        Self {
            kind: MutationKind::Updated,
            id,
        }
    }

    /// Acknowledge a delete.
    pub fn deleted(id: IssueId) -> Self {
        Self {
            kind: MutationKind::Deleted,
            id,
        }
    }

    pub fn kind(&self) -> MutationKind {
        self.kind
    }

    pub fn id(&self) -> &IssueId {
        &self.id
    }

    /// Message sent to clients.
    pub fn message(&self) -> &'static str {
        match self.kind {
            MutationKind::Updated => "successfully updated",
            MutationKind::Deleted => "successfully deleted",
        }
    }
}
