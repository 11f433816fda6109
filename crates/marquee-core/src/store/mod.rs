//! Injected record store.
//!
//! The core does not own persistence. It consumes a `CalendarStore`
//! exposing the three record collections with get-all / replace-all plus
//! targeted add/update/delete, and a `snapshot()` that reads all three in
//! one consistent cut (no torn reads within a refresh). Store operations
//! either succeed or raise; the core never retries and never rolls back.
//!
//! Two implementations ship with the crate: an in-memory store for tests
//! and embedding, and a JSON-file-backed store for the CLI.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::model::{CalendarEvent, Reservation, WaitlistEntry};

/// One consistent cut of all three collections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    #[serde(default)]
    pub events: Vec<CalendarEvent>,
    #[serde(default)]
    pub reservations: Vec<Reservation>,
    #[serde(default)]
    pub waitlist: Vec<WaitlistEntry>,
}

impl StoreSnapshot {
    pub fn event_on(&self, date: NaiveDate) -> Option<&CalendarEvent> {
        self.events.iter().find(|e| e.date == date)
    }
}

/// Synchronous read/write surface over the three record collections.
///
/// There is no transactional isolation: the tool assumes a single active
/// writer per date, and the later of two racing replace-alls wins.
pub trait CalendarStore: Send + Sync {
    /// Read all three collections as one consistent snapshot.
    fn snapshot(&self) -> Result<StoreSnapshot, StoreError>;

    // ── Events ───────────────────────────────────────────────────────

    fn events(&self) -> Result<Vec<CalendarEvent>, StoreError>;

    /// Replace the whole event collection (batch save).
    fn replace_events(&self, events: Vec<CalendarEvent>) -> Result<(), StoreError>;

    /// Insert or replace the single event occupying the given date.
    fn upsert_event(&self, event: CalendarEvent) -> Result<(), StoreError>;

    /// Delete the event on a date. Deletion is immediate, not soft.
    fn delete_event(&self, date: NaiveDate) -> Result<(), StoreError>;

    // ── Reservations ─────────────────────────────────────────────────

    fn reservations(&self) -> Result<Vec<Reservation>, StoreError>;

    fn replace_reservations(&self, reservations: Vec<Reservation>) -> Result<(), StoreError>;

    fn add_reservation(&self, reservation: Reservation) -> Result<(), StoreError>;

    fn update_reservation(&self, reservation: Reservation) -> Result<(), StoreError>;

    fn delete_reservation(&self, id: &str) -> Result<(), StoreError>;

    // ── Waitlist ─────────────────────────────────────────────────────

    fn waitlist_entries(&self) -> Result<Vec<WaitlistEntry>, StoreError>;

    fn replace_waitlist(&self, entries: Vec<WaitlistEntry>) -> Result<(), StoreError>;

    fn add_waitlist_entry(&self, entry: WaitlistEntry) -> Result<(), StoreError>;

    fn update_waitlist_entry(&self, entry: WaitlistEntry) -> Result<(), StoreError>;

    fn delete_waitlist_entry(&self, id: &str) -> Result<(), StoreError>;
}

/// Apply the one-event-per-date invariant to a collection about to be
/// written: the incoming event replaces any record on the same date, and
/// derived fields are stripped.
pub(crate) fn upsert_into(events: &mut Vec<CalendarEvent>, mut event: CalendarEvent) {
    event.strip_derived();
    events.retain(|e| e.date != event.date);
    events.push(event);
    events.sort_by_key(|e| e.date);
}
