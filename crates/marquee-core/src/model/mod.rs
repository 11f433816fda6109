//! Record types for the venue calendar.
//!
//! Three collections make up the shared store: calendar events,
//! reservations, and waitlist entries. Events are keyed by date (at most
//! one event per date); reservations and waitlist entries belong to a date
//! and carry their own ids. The show catalog is read-only reference data.

mod catalog;
mod event;
mod reservation;
mod waitlist;

pub use catalog::{Catalog, Show, ShowProfile};
pub use event::{
    event_id, CalendarEvent, EventKind, EventTimes, ManualStatus, ShowDetails, Visibility,
};
pub use reservation::{Reservation, ReservationStatus};
pub use waitlist::{WaitlistEntry, WaitlistStatus};
