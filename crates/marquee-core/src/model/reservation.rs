use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Booking lifecycle status.
///
/// Only the operational subset counts toward occupancy; anything that is
/// not cancelled or archived still blocks a bulk overwrite of its date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Request,
    Option,
    Confirmed,
    Arrived,
    Invited,
    Waitlist,
    NoShow,
    Cancelled,
    Archived,
}

impl ReservationStatus {
    /// Statuses that count toward capacity.
    pub fn is_operational(self) -> bool {
        matches!(self, Self::Confirmed | Self::Arrived | Self::Invited)
    }

    /// Statuses that make a date a booking conflict during bulk planning.
    pub fn blocks_overwrite(self) -> bool {
        !matches!(self, Self::Cancelled | Self::Archived)
    }
}

/// One party's booking for one date. Owned by the booking subsystem;
/// this core only ever reads aggregates and never mutates these records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: String,
    pub date: NaiveDate,
    pub party_size: u32,
    pub status: ReservationStatus,
}

impl Reservation {
    pub fn new(date: NaiveDate, party_size: u32, status: ReservationStatus) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            date,
            party_size,
            status,
        }
    }
}
