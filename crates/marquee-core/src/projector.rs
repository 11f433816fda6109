//! Day projector.
//!
//! Builds one calendar cell's derived view-model from a raw event plus
//! aggregated booking/waitlist counts, applying role-based visibility.
//! "Past" is resolved against the caller's local calendar date, never a
//! timestamp comparison, so same-day events do not flicker across
//! timezone boundaries.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::availability::{classify, Availability};
use crate::model::CalendarEvent;

/// Who is looking at the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Staff,
    Public,
}

/// Derived, ephemeral view of one calendar date. Rebuilt on every refresh
/// and never persisted; always reconstructible from the three record
/// collections plus "today".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayViewModel {
    pub date: NaiveDate,
    /// Whether the date belongs to the navigated month (as opposed to a
    /// leading/trailing day completing a calendar week).
    pub in_window: bool,
    pub is_today: bool,
    pub is_past: bool,
    pub event: Option<CalendarEvent>,
    pub availability: Availability,
    pub waitlist_count: u32,
}

/// Project one date into its view-model.
///
/// For the public role, past, internal and non-show events are fully
/// suppressed: the event reference is omitted outright so downstream code
/// cannot leak it, and availability falls back to `Closed`.
pub fn project_day(
    date: NaiveDate,
    today: NaiveDate,
    in_window: bool,
    event: Option<&CalendarEvent>,
    booked_count: u32,
    waitlist_count: u32,
    role: Role,
) -> DayViewModel {
    let is_past = date < today;

    let visible = event.filter(|e| match role {
        Role::Staff => true,
        Role::Public => e.is_show() && e.visibility == crate::model::Visibility::Public && !is_past,
    });

    let availability = match visible {
        Some(event) => match &event.show {
            Some(show) if event.is_show() => classify(
                booked_count,
                show.capacity,
                waitlist_count,
                show.manual_status,
            ),
            // Non-show events are never bookable, staff-visible or not.
            _ => Availability::Closed,
        },
        None => Availability::Closed,
    };

    DayViewModel {
        date,
        in_window,
        is_today: date == today,
        is_past,
        event: visible.map(|e| {
            let mut e = e.clone();
            if let Some(show) = &mut e.show {
                show.booked_count = booked_count;
            }
            e
        }),
        availability,
        waitlist_count,
    }
}
