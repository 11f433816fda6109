//! JSON-file-backed store for the CLI.
//!
//! Loads the whole record file on open and writes it back after every
//! mutation. Good enough for a single-admin tool; not a database.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::NaiveDate;

use super::{upsert_into, CalendarStore, StoreSnapshot};
use crate::error::StoreError;
use crate::model::{CalendarEvent, Reservation, WaitlistEntry};

pub struct FileStore {
    path: PathBuf,
    inner: Mutex<StoreSnapshot>,
}

impl FileStore {
    /// Open the store, starting empty if the file does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let snapshot = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            serde_json::from_str(&content)?
        } else {
            StoreSnapshot::default()
        };
        Ok(Self {
            path: path.clone(),
            inner: Mutex::new(snapshot),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Mutate the snapshot and write it through to disk.
    fn with_inner<T>(
        &self,
        f: impl FnOnce(&mut StoreSnapshot) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut inner = self.inner.lock().map_err(|_| StoreError::Lock)?;
        let result = f(&mut inner)?;
        self.persist(&inner)?;
        Ok(result)
    }

    fn read_inner<T>(
        &self,
        f: impl FnOnce(&StoreSnapshot) -> T,
    ) -> Result<T, StoreError> {
        let inner = self.inner.lock().map_err(|_| StoreError::Lock)?;
        Ok(f(&inner))
    }

    fn persist(&self, snapshot: &StoreSnapshot) -> Result<(), StoreError> {
        // Stored booked counts are stale by definition; strip them.
        let mut clean = snapshot.clone();
        for event in &mut clean.events {
            event.strip_derived();
        }
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&clean)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

impl CalendarStore for FileStore {
    fn snapshot(&self) -> Result<StoreSnapshot, StoreError> {
        self.read_inner(|inner| inner.clone())
    }

    fn events(&self) -> Result<Vec<CalendarEvent>, StoreError> {
        self.read_inner(|inner| inner.events.clone())
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
        self.read_inner(|inner| inner.reservations.clone())
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
        self.read_inner(|inner| inner.waitlist.clone())
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EventKind, EventTimes, ManualStatus, ShowDetails, Visibility};

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 8, d).unwrap()
    }

    #[test]
    fn roundtrip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.json");

        let store = FileStore::open(&path).unwrap();
        store
            .upsert_event(CalendarEvent::new(
                date(3),
                EventKind::Show,
                Visibility::Public,
                EventTimes::default(),
            ))
            .unwrap();
        drop(store);

        let reopened = FileStore::open(&path).unwrap();
        let events = reopened.events().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].date, date(3));
    }

    #[test]
    fn stale_booked_count_is_stripped_on_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.json");

        let store = FileStore::open(&path).unwrap();
        let mut event = CalendarEvent::new(
            date(4),
            EventKind::Show,
            Visibility::Public,
            EventTimes::default(),
        );
        event.show = Some(ShowDetails {
            show_id: "cabaret".into(),
            profile_id: "evening".into(),
            capacity: 80,
            manual_status: ManualStatus::Open,
            booked_count: 55,
        });
        store.replace_events(vec![event]).unwrap();
        drop(store);

        let reopened = FileStore::open(&path).unwrap();
        let events = reopened.events().unwrap();
        assert_eq!(events[0].show.as_ref().unwrap().booked_count, 0);
    }

    #[test]
    fn missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("nothing.json")).unwrap();
        assert!(store.events().unwrap().is_empty());
        assert!(store.reservations().unwrap().is_empty());
        assert!(store.waitlist_entries().unwrap().is_empty());
    }
}
