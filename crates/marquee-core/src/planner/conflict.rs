//! Conflict classification for candidate dates.
//!
//! Two independent conflict classes per date, always evaluated against
//! the current store snapshot: an event already occupying the date, and
//! live (non-cancelled, non-archived) bookings on the date. The booking
//! conflict carries the summed party size so the operator can see what a
//! forced overwrite would disturb.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::store::StoreSnapshot;

/// Conflict state of one candidate date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateConflict {
    /// An event already exists on this date.
    pub existing_event: bool,
    /// Summed party size of live bookings on this date. Zero means no
    /// booking conflict.
    pub blocking_party_total: u32,
}

impl DateConflict {
    pub fn has_bookings(&self) -> bool {
        self.blocking_party_total > 0
    }

    pub fn is_clean(&self) -> bool {
        !self.existing_event && !self.has_bookings()
    }
}

/// Classify every selected date against a snapshot.
pub fn classify_dates<'a>(
    dates: impl IntoIterator<Item = &'a NaiveDate>,
    snapshot: &StoreSnapshot,
) -> BTreeMap<NaiveDate, DateConflict> {
    let mut conflicts: BTreeMap<NaiveDate, DateConflict> = dates
        .into_iter()
        .map(|date| (*date, DateConflict::default()))
        .collect();

    for event in &snapshot.events {
        if let Some(conflict) = conflicts.get_mut(&event.date) {
            conflict.existing_event = true;
        }
    }
    for reservation in &snapshot.reservations {
        if reservation.status.blocks_overwrite() {
            if let Some(conflict) = conflicts.get_mut(&reservation.date) {
                conflict.blocking_party_total += reservation.party_size;
            }
        }
    }
    conflicts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        CalendarEvent, EventKind, EventTimes, Reservation, ReservationStatus, Visibility,
    };

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 10, d).unwrap()
    }

    #[test]
    fn classifies_both_conflict_classes_independently() {
        let snapshot = StoreSnapshot {
            events: vec![CalendarEvent::new(
                date(1),
                EventKind::Show,
                Visibility::Public,
                EventTimes::default(),
            )],
            reservations: vec![
                Reservation::new(date(2), 4, ReservationStatus::Confirmed),
                Reservation::new(date(2), 2, ReservationStatus::Request),
                Reservation::new(date(2), 6, ReservationStatus::Cancelled),
            ],
            waitlist: Vec::new(),
        };
        let dates = [date(1), date(2), date(3)];
        let conflicts = classify_dates(&dates, &snapshot);

        let c1 = conflicts[&date(1)];
        assert!(c1.existing_event);
        assert!(!c1.has_bookings());

        // Requests still block; cancelled bookings do not.
        let c2 = conflicts[&date(2)];
        assert!(!c2.existing_event);
        assert_eq!(c2.blocking_party_total, 6);

        assert!(conflicts[&date(3)].is_clean());
    }
}
