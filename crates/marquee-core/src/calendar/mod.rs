//! Calendar aggregation engine.
//!
//! `CalendarView` owns the visible navigation month and produces the
//! ordered day view-model sequence covering that month plus the leading
//! and trailing days needed to complete Monday-first calendar weeks.
//!
//! The view is a read-side cache over the injected store, not a source of
//! truth. It re-derives everything from one store snapshot per refresh:
//! booked counts are recomputed from scratch, never incrementally. Like
//! the rest of the core it runs no threads of its own -- the caller
//! drives a periodic `tick()` to pick up out-of-band writes, and an
//! external "data changed" notification maps to `mark_dirty()`.

use std::sync::Arc;

use chrono::{Datelike, Days, Local, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::availability::{booked_count, waitlist_counts};
use crate::error::Result;
use crate::projector::{project_day, DayViewModel, Role};
use crate::store::CalendarStore;

/// How the day sequence is presented. Carries no business logic; the same
/// sequence feeds both presentations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Grid,
    Agenda,
}

/// Poll cadence for out-of-band writers that emit no notifications.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 5_000;

/// Role-aware month view over the shared store.
pub struct CalendarView {
    store: Arc<dyn CalendarStore>,
    role: Role,
    /// First day of the navigated month.
    month: NaiveDate,
    view_mode: ViewMode,
    dense: bool,
    days: Vec<DayViewModel>,
    dirty: bool,
    poll_interval_ms: u64,
    last_refresh_epoch_ms: Option<u64>,
}

impl CalendarView {
    /// Create a view anchored to today's month and populate it.
    pub fn new(store: Arc<dyn CalendarStore>, role: Role) -> Result<Self> {
        let today = Local::now().date_naive();
        Self::anchored(store, role, today)
    }

    /// Create a view anchored to an explicit "today" (deterministic for
    /// tests and for callers that manage their own clock).
    pub fn anchored(store: Arc<dyn CalendarStore>, role: Role, today: NaiveDate) -> Result<Self> {
        let mut view = Self {
            store,
            role,
            month: first_of_month(today),
            view_mode: ViewMode::Grid,
            dense: false,
            days: Vec::new(),
            dirty: false,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            last_refresh_epoch_ms: None,
        };
        view.refresh_for(today)?;
        Ok(view)
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn role(&self) -> Role {
        self.role
    }

    /// First day of the navigated month.
    pub fn month(&self) -> NaiveDate {
        self.month
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn dense(&self) -> bool {
        self.dense
    }

    /// The full grid sequence: whole Monday-first weeks covering the
    /// navigated month.
    pub fn days(&self) -> &[DayViewModel] {
        &self.days
    }

    /// The agenda slice of the same sequence: in-month days that carry a
    /// visible event.
    pub fn agenda(&self) -> Vec<&DayViewModel> {
        self.days
            .iter()
            .filter(|d| d.in_window && d.event.is_some())
            .collect()
    }

    // ── Navigation / presentation state ──────────────────────────────

    /// Shift the window by whole months. Unbounded in both directions;
    /// out-of-range chrono arithmetic leaves the window unchanged.
    pub fn navigate(&mut self, delta: i32) -> Result<()> {
        let shifted = if delta >= 0 {
            self.month.checked_add_months(Months::new(delta as u32))
        } else {
            self.month
                .checked_sub_months(Months::new(delta.unsigned_abs()))
        };
        if let Some(month) = shifted {
            self.month = first_of_month(month);
        }
        self.refresh()
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
    }

    pub fn set_dense(&mut self, dense: bool) {
        self.dense = dense;
    }

    pub fn set_poll_interval_ms(&mut self, interval_ms: u64) {
        self.poll_interval_ms = interval_ms;
    }

    // ── Re-derivation ────────────────────────────────────────────────

    /// External "data changed" notification: re-derive on the next tick.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Caller-driven poll. Refreshes when dirty or when the poll interval
    /// has elapsed; returns whether a refresh ran. Dropping the view is
    /// the only teardown -- there is no timer to stop.
    pub fn tick(&mut self) -> Result<bool> {
        let now = now_ms();
        let due = match self.last_refresh_epoch_ms {
            Some(last) => now.saturating_sub(last) >= self.poll_interval_ms,
            None => true,
        };
        if self.dirty || due {
            self.refresh()?;
            return Ok(true);
        }
        Ok(false)
    }

    /// Re-read all three collections and regenerate every day view-model
    /// in the window. Idempotent: with no intervening store mutation two
    /// refreshes derive identical sequences from identical snapshots.
    pub fn refresh(&mut self) -> Result<()> {
        self.refresh_for(Local::now().date_naive())
    }

    /// Refresh against an explicit local calendar date.
    pub fn refresh_for(&mut self, today: NaiveDate) -> Result<()> {
        let snapshot = self.store.snapshot()?;
        let waitlist = waitlist_counts(&snapshot.waitlist);

        let mut days = Vec::new();
        for date in grid_range(self.month) {
            let event = snapshot.event_on(date);
            let booked = match event {
                Some(e) if e.is_show() => booked_count(&snapshot.reservations, date),
                _ => 0,
            };
            let pending = waitlist.get(&date).copied().unwrap_or(0);
            days.push(project_day(
                date,
                today,
                date.month() == self.month.month() && date.year() == self.month.year(),
                event,
                booked,
                pending,
                self.role,
            ));
        }

        self.days = days;
        self.dirty = false;
        self.last_refresh_epoch_ms = Some(now_ms());
        Ok(())
    }
}

/// All dates of the Monday-first week grid covering `month`.
fn grid_range(month: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    let first = first_of_month(month);
    let last = last_of_month(month);
    let lead = u64::from(first.weekday().num_days_from_monday());
    let trail = u64::from(6 - last.weekday().num_days_from_monday());
    let start = first.checked_sub_days(Days::new(lead)).unwrap_or(first);
    let end = last.checked_add_days(Days::new(trail)).unwrap_or(last);
    start.iter_days().take_while(move |d| *d <= end)
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn last_of_month(date: NaiveDate) -> NaiveDate {
    let first = first_of_month(date);
    first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.checked_sub_days(Days::new(1)))
        .unwrap_or(first)
}

fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
