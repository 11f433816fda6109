use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// What kind of entry occupies a calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Show,
    Rehearsal,
    Private,
    Blackout,
}

/// Who may see an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Internal,
}

/// Staff override on a show event. `Closed` always wins over occupancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ManualStatus {
    Open,
    Closed,
}

/// Start, doors-open and end times for an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventTimes {
    pub start: NaiveTime,
    pub doors_open: NaiveTime,
    pub end: NaiveTime,
}

impl EventTimes {
    pub fn new(start: NaiveTime, doors_open: NaiveTime, end: NaiveTime) -> Self {
        Self {
            start,
            doors_open,
            end,
        }
    }
}

impl Default for EventTimes {
    fn default() -> Self {
        Self {
            start: NaiveTime::from_hms_opt(20, 0, 0).unwrap_or_default(),
            doors_open: NaiveTime::from_hms_opt(19, 0, 0).unwrap_or_default(),
            end: NaiveTime::from_hms_opt(23, 0, 0).unwrap_or_default(),
        }
    }
}

/// Show-specific attributes carried only by `EventKind::Show` events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowDetails {
    pub show_id: String,
    pub profile_id: String,
    pub capacity: u32,
    pub manual_status: ManualStatus,
    /// Derived occupancy. Never trusted when read back from the store:
    /// it is recomputed from live reservations on every refresh and
    /// stripped to 0 before any write.
    #[serde(default)]
    pub booked_count: u32,
}

/// One calendar entry. The date is the natural key: at most one event
/// exists per date, and `id` is derived from the date to enforce that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: String,
    pub date: NaiveDate,
    pub kind: EventKind,
    pub visibility: Visibility,
    pub booking_enabled: bool,
    pub times: EventTimes,
    #[serde(default)]
    pub show: Option<ShowDetails>,
}

/// Deterministic identity key for the event occupying `date`.
pub fn event_id(date: NaiveDate) -> String {
    format!("evt-{date}")
}

impl CalendarEvent {
    /// Create a non-show event for a date.
    pub fn new(date: NaiveDate, kind: EventKind, visibility: Visibility, times: EventTimes) -> Self {
        Self {
            id: event_id(date),
            date,
            kind,
            visibility,
            booking_enabled: false,
            times,
            show: None,
        }
    }

    /// Reset derived fields that must never be persisted meaningfully.
    pub fn strip_derived(&mut self) {
        if let Some(show) = &mut self.show {
            show.booked_count = 0;
        }
    }

    pub fn is_show(&self) -> bool {
        self.kind == EventKind::Show
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_id_is_derived_from_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(event_id(date), "evt-2024-03-09");
    }

    #[test]
    fn strip_derived_zeroes_booked_count() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let mut event = CalendarEvent::new(
            date,
            EventKind::Show,
            Visibility::Public,
            EventTimes::default(),
        );
        event.show = Some(ShowDetails {
            show_id: "cabaret".into(),
            profile_id: "evening".into(),
            capacity: 80,
            manual_status: ManualStatus::Open,
            booked_count: 42,
        });
        event.strip_derived();
        assert_eq!(event.show.as_ref().unwrap().booked_count, 0);
    }
}
