//! In-memory store, the default for tests and embedding.

use std::sync::Mutex;

use chrono::NaiveDate;

use super::{upsert_into, CalendarStore, StoreSnapshot};
use crate::error::StoreError;
use crate::model::{CalendarEvent, Reservation, WaitlistEntry};

/// Mutex-guarded in-memory collections.
///
/// The lock only makes the store shareable; it is not a multi-writer
/// protocol. All access is synchronous and assumed uncontended.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<StoreSnapshot>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a pre-populated snapshot.
    pub fn with_snapshot(snapshot: StoreSnapshot) -> Self {
        Self {
            inner: Mutex::new(snapshot),
        }
    }

    fn with_inner<T>(
        &self,
        f: impl FnOnce(&mut StoreSnapshot) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut inner = self.inner.lock().map_err(|_| StoreError::Lock)?;
        f(&mut inner)
    }
}

impl CalendarStore for MemoryStore {
    fn snapshot(&self) -> Result<StoreSnapshot, StoreError> {
        self.with_inner(|inner| Ok(inner.clone()))
    }

    fn events(&self) -> Result<Vec<CalendarEvent>, StoreError> {
        self.with_inner(|inner| Ok(inner.events.clone()))
    }

    fn replace_events(&self, mut events: Vec<CalendarEvent>) -> Result<(), StoreError> {
        for event in &mut events {
            event.strip_derived();
        }
        events.sort_by_key(|e| e.date);
        self.with_inner(|inner| {
            inner.events = events;
            Ok(())
        })
    }

    fn upsert_event(&self, event: CalendarEvent) -> Result<(), StoreError> {
        self.with_inner(|inner| {
            upsert_into(&mut inner.events, event);
            Ok(())
        })
    }

    fn delete_event(&self, date: NaiveDate) -> Result<(), StoreError> {
        self.with_inner(|inner| {
            let before = inner.events.len();
            inner.events.retain(|e| e.date != date);
            if inner.events.len() == before {
                return Err(StoreError::NotFound {
                    kind: "event".into(),
                    key: date.to_string(),
                });
            }
            Ok(())
        })
    }

    fn reservations(&self) -> Result<Vec<Reservation>, StoreError> {
        self.with_inner(|inner| Ok(inner.reservations.clone()))
    }

    fn replace_reservations(&self, reservations: Vec<Reservation>) -> Result<(), StoreError> {
        self.with_inner(|inner| {
            inner.reservations = reservations;
            Ok(())
        })
    }

    fn add_reservation(&self, reservation: Reservation) -> Result<(), StoreError> {
        self.with_inner(|inner| {
            inner.reservations.push(reservation);
            Ok(())
        })
    }

    fn update_reservation(&self, reservation: Reservation) -> Result<(), StoreError> {
        self.with_inner(|inner| {
            match inner.reservations.iter_mut().find(|r| r.id == reservation.id) {
                Some(slot) => {
                    *slot = reservation;
                    Ok(())
                }
                None => Err(StoreError::NotFound {
                    kind: "reservation".into(),
                    key: reservation.id,
                }),
            }
        })
    }

    fn delete_reservation(&self, id: &str) -> Result<(), StoreError> {
        self.with_inner(|inner| {
            let before = inner.reservations.len();
            inner.reservations.retain(|r| r.id != id);
            if inner.reservations.len() == before {
                return Err(StoreError::NotFound {
                    kind: "reservation".into(),
                    key: id.into(),
                });
            }
            Ok(())
        })
    }

    fn waitlist_entries(&self) -> Result<Vec<WaitlistEntry>, StoreError> {
        self.with_inner(|inner| Ok(inner.waitlist.clone()))
    }

    fn replace_waitlist(&self, entries: Vec<WaitlistEntry>) -> Result<(), StoreError> {
        self.with_inner(|inner| {
            inner.waitlist = entries;
            Ok(())
        })
    }

    fn add_waitlist_entry(&self, entry: WaitlistEntry) -> Result<(), StoreError> {
        self.with_inner(|inner| {
            inner.waitlist.push(entry);
            Ok(())
        })
    }

    fn update_waitlist_entry(&self, entry: WaitlistEntry) -> Result<(), StoreError> {
        self.with_inner(|inner| match inner.waitlist.iter_mut().find(|w| w.id == entry.id) {
            Some(slot) => {
                *slot = entry;
                Ok(())
            }
            None => Err(StoreError::NotFound {
                kind: "waitlist entry".into(),
                key: entry.id,
            }),
        })
    }

    fn delete_waitlist_entry(&self, id: &str) -> Result<(), StoreError> {
        self.with_inner(|inner| {
            let before = inner.waitlist.len();
            inner.waitlist.retain(|w| w.id != id);
            if inner.waitlist.len() == before {
                return Err(StoreError::NotFound {
                    kind: "waitlist entry".into(),
                    key: id.into(),
                });
            }
            Ok(())
        })
    }
}
