//! Bulk generation and conflict-resolution planner.
//!
//! A staff workflow for creating or overwriting many calendar entries at
//! once without silently corrupting live reservations. Stage machine:
//!
//! ```text
//! Select -> Configure -> Confirm -> (Committed | Aborted)
//! ```
//!
//! All state before COMMIT is in-memory only; aborting discards it at no
//! cost. The commit itself is all-or-nothing per date, not per batch: a
//! partial outcome (some dates skipped, others written) is expected, and
//! the final write is a single merge-and-replace of the event collection
//! that leaves untouched dates exactly as they were.

mod conflict;
mod template;

pub use conflict::{classify_dates, DateConflict};
pub use template::EventTemplate;

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::effects::Effect;
use crate::error::{Result, ValidationError};
use crate::store::{CalendarStore, StoreSnapshot};

/// Longest range the weekday generator accepts, in days.
pub const MAX_RANGE_DAYS: i64 = 365;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlannerStage {
    Select,
    Configure,
    Confirm,
    Committed,
    Aborted,
}

impl PlannerStage {
    fn name(self) -> &'static str {
        match self {
            Self::Select => "select",
            Self::Configure => "configure",
            Self::Confirm => "confirm",
            Self::Committed => "committed",
            Self::Aborted => "aborted",
        }
    }
}

/// Caller-provided conflict policy for a commit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitPolicy {
    /// Replace dates that already carry an event.
    pub overwrite: bool,
    /// Write even onto dates that carry live bookings. The bookings
    /// themselves are never touched either way.
    pub force_bookings: bool,
}

/// Why a date was skipped during commit. A skip is a per-date decision,
/// not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Live bookings exist and `force_bookings` was not set.
    LiveBookings { party_total: u32 },
    /// An event exists and `overwrite` was not set.
    ExistingEvent,
}

/// Outcome of a commit, including the side effects the caller should
/// perform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitSummary {
    pub created: Vec<NaiveDate>,
    pub skipped: Vec<(NaiveDate, SkipReason)>,
    pub effects: Vec<Effect>,
}

/// The planner workflow state.
pub struct BulkPlanner {
    stage: PlannerStage,
    selection: BTreeSet<NaiveDate>,
    template: EventTemplate,
}

impl BulkPlanner {
    pub fn new() -> Self {
        Self {
            stage: PlannerStage::Select,
            selection: BTreeSet::new(),
            template: EventTemplate::default(),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn stage(&self) -> PlannerStage {
        self.stage
    }

    pub fn selection(&self) -> &BTreeSet<NaiveDate> {
        &self.selection
    }

    pub fn template(&self) -> &EventTemplate {
        &self.template
    }

    /// Conflict state of every selected date against a snapshot. Computed
    /// continuously as the selection changes, not a stage of its own.
    pub fn conflicts(&self, snapshot: &StoreSnapshot) -> BTreeMap<NaiveDate, DateConflict> {
        classify_dates(&self.selection, snapshot)
    }

    // ── SELECT ───────────────────────────────────────────────────────

    /// Toggle a single date in or out of the selection.
    pub fn toggle(&mut self, date: NaiveDate) -> Result<()> {
        self.require_stage(PlannerStage::Select, "toggle a date")?;
        if !self.selection.remove(&date) {
            self.selection.insert(date);
        }
        Ok(())
    }

    /// Union every date in `[start, end]` whose weekday matches into the
    /// selection. Additive: manual toggles and earlier generator runs are
    /// kept. Returns how many dates were newly added.
    pub fn select_range(
        &mut self,
        start: NaiveDate,
        end: NaiveDate,
        weekdays: &[Weekday],
    ) -> Result<usize> {
        self.require_stage(PlannerStage::Select, "generate a date range")?;
        if end < start {
            return Err(ValidationError::InvalidRange { start, end }.into());
        }
        let days = (end - start).num_days() + 1;
        if days > MAX_RANGE_DAYS {
            return Err(ValidationError::RangeTooLong {
                days,
                max: MAX_RANGE_DAYS,
            }
            .into());
        }

        let mut added = 0;
        for date in start.iter_days().take_while(|d| *d <= end) {
            if weekdays.contains(&date.weekday()) && self.selection.insert(date) {
                added += 1;
            }
        }
        Ok(added)
    }

    // ── Stage transitions ────────────────────────────────────────────

    /// SELECT -> CONFIGURE. Rejected while nothing is selected.
    pub fn begin_configure(&mut self) -> Result<()> {
        self.require_stage(PlannerStage::Select, "advance to configure")?;
        if self.selection.is_empty() {
            return Err(ValidationError::EmptySelection.into());
        }
        self.stage = PlannerStage::Configure;
        Ok(())
    }

    /// Mutable access to the template, only while configuring.
    pub fn template_mut(&mut self) -> Result<&mut EventTemplate> {
        self.require_stage(PlannerStage::Configure, "edit the template")?;
        Ok(&mut self.template)
    }

    /// CONFIGURE -> CONFIRM. Rejected while the template is incomplete.
    pub fn begin_confirm(&mut self) -> Result<()> {
        self.require_stage(PlannerStage::Configure, "advance to confirm")?;
        self.template.validate()?;
        self.stage = PlannerStage::Confirm;
        Ok(())
    }

    /// Discard all in-memory state. Allowed from any non-terminal stage;
    /// nothing has been written yet.
    pub fn abort(&mut self) {
        if !matches!(self.stage, PlannerStage::Committed | PlannerStage::Aborted) {
            self.selection.clear();
            self.template = EventTemplate::default();
            self.stage = PlannerStage::Aborted;
        }
    }

    // ── COMMIT ───────────────────────────────────────────────────────

    /// Apply the planned dates to the store under the given policy.
    ///
    /// Per date, in order: a booking conflict skips the date unless
    /// `force_bookings` is set; an event conflict skips it unless
    /// `overwrite` is set; otherwise an event is materialized from the
    /// template. The write is one merge-and-replace of the event
    /// collection: dates outside the newly created set are preserved
    /// untouched, dates inside it are replaced wholesale. Reservations
    /// and waitlist entries are never mutated here.
    pub fn commit(&mut self, store: &dyn CalendarStore, policy: CommitPolicy) -> Result<CommitSummary> {
        self.require_stage(PlannerStage::Confirm, "commit")?;

        let snapshot = store.snapshot()?;
        let conflicts = self.conflicts(&snapshot);

        let mut created_events = Vec::new();
        let mut created = Vec::new();
        let mut skipped = Vec::new();

        for date in &self.selection {
            let conflict = conflicts.get(date).copied().unwrap_or_default();
            if conflict.has_bookings() && !policy.force_bookings {
                skipped.push((
                    *date,
                    SkipReason::LiveBookings {
                        party_total: conflict.blocking_party_total,
                    },
                ));
                continue;
            }
            if conflict.existing_event && !policy.overwrite {
                skipped.push((*date, SkipReason::ExistingEvent));
                continue;
            }
            created_events.push(self.template.build_event(*date));
            created.push(*date);
        }

        if !created.is_empty() {
            let created_dates: BTreeSet<NaiveDate> = created.iter().copied().collect();
            let mut merged: Vec<_> = snapshot
                .events
                .into_iter()
                .filter(|e| !created_dates.contains(&e.date))
                .collect();
            merged.extend(created_events);
            store.replace_events(merged)?;
        }

        self.stage = PlannerStage::Committed;

        let mut effects = Vec::new();
        if !created.is_empty() {
            effects.push(Effect::EmailNotification {
                dates: created.clone(),
            });
        }
        effects.push(Effect::AuditLog {
            message: format!(
                "bulk plan committed: {} created, {} skipped",
                created.len(),
                skipped.len()
            ),
        });
        effects.push(Effect::Toast {
            message: format!("Created {} event(s), skipped {}", created.len(), skipped.len()),
        });

        Ok(CommitSummary {
            created,
            skipped,
            effects,
        })
    }

    fn require_stage(&self, expected: PlannerStage, operation: &str) -> Result<()> {
        if self.stage != expected {
            return Err(ValidationError::WrongStage {
                operation: operation.into(),
                stage: self.stage.name().into(),
            }
            .into());
        }
        Ok(())
    }
}

impl Default for BulkPlanner {
    fn default() -> Self {
        Self::new()
    }
}
