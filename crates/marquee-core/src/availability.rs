//! Availability status engine.
//!
//! A pure mapping from occupancy numbers plus the staff override to the
//! customer-facing status of a date. Total and deterministic for all
//! non-negative inputs; `capacity == 0` is simply "already full".
//!
//! Also hosts the occupancy aggregation helpers shared by the day
//! projector and the bulk planner: booked counts are always recomputed
//! from live reservations, never read off a stored event.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::{ManualStatus, Reservation, WaitlistEntry, WaitlistStatus};

/// Customer-facing status of a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    Open,
    Waitlist,
    Closed,
}

/// Pending waitlist entries beyond this count close the date outright.
pub const WAITLIST_LIMIT: u32 = 10;

/// Classify a date's availability.
///
/// Rules, in order:
/// 1. The staff override wins: manually closed is closed, full or not.
/// 2. Below capacity is open.
/// 3. At or over capacity: waitlistable until the waitlist itself is
///    full, then closed.
pub fn classify(
    booked_count: u32,
    capacity: u32,
    waitlist_count: u32,
    manual_status: ManualStatus,
) -> Availability {
    if manual_status == ManualStatus::Closed {
        return Availability::Closed;
    }
    if booked_count < capacity {
        return Availability::Open;
    }
    if waitlist_count >= WAITLIST_LIMIT {
        Availability::Closed
    } else {
        Availability::Waitlist
    }
}

/// Occupancy for a date: summed party size over operational reservations.
pub fn booked_count(reservations: &[Reservation], date: NaiveDate) -> u32 {
    reservations
        .iter()
        .filter(|r| r.date == date && r.status.is_operational())
        .map(|r| r.party_size)
        .sum()
}

/// Pending waitlist entries per date.
pub fn waitlist_counts(entries: &[WaitlistEntry]) -> BTreeMap<NaiveDate, u32> {
    let mut counts = BTreeMap::new();
    for entry in entries {
        if entry.status == WaitlistStatus::Pending {
            *counts.entry(entry.date).or_insert(0) += 1;
        }
    }
    counts
}
