//! Post-commit side effects.
//!
//! The core never calls out to mailers, audit logs or UI toasts itself.
//! A commit returns an ordered list of effects and the caller executes
//! them; delivery and retry are entirely the collaborator's problem.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One fire-and-forget side effect requested by a commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Effect {
    /// Notify the booking office about newly created dates.
    EmailNotification { dates: Vec<NaiveDate> },
    /// Append a line to the audit log.
    AuditLog { message: String },
    /// Show a success toast to the operator.
    Toast { message: String },
}
