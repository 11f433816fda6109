//! Aggregator behavior over a live store: refresh idempotence, role
//! projection, and derived-count recomputation.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use marquee_core::{
    Availability, CalendarEvent, CalendarStore, CalendarView, EventKind, EventTimes, ManualStatus,
    MemoryStore, Reservation, ReservationStatus, Role, ShowDetails, Visibility, WaitlistEntry,
    WAITLIST_LIMIT,
};

fn date(m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, m, d).unwrap()
}

fn show_event(d: NaiveDate, capacity: u32) -> CalendarEvent {
    let mut event = CalendarEvent::new(
        d,
        EventKind::Show,
        Visibility::Public,
        EventTimes::new(
            NaiveTime::from_hms_opt(20, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(19, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(23, 0, 0).unwrap(),
        ),
    );
    event.booking_enabled = true;
    event.show = Some(ShowDetails {
        show_id: "cabaret".into(),
        profile_id: "evening".into(),
        capacity,
        manual_status: ManualStatus::Open,
        booked_count: 0,
    });
    event
}

#[test]
fn refresh_is_idempotent() {
    let store = Arc::new(MemoryStore::new());
    store.upsert_event(show_event(date(6, 14), 80)).unwrap();
    store
        .add_reservation(Reservation::new(date(6, 14), 4, ReservationStatus::Confirmed))
        .unwrap();
    store
        .add_waitlist_entry(WaitlistEntry::new(date(6, 14), 2))
        .unwrap();

    let mut view = CalendarView::anchored(store, Role::Staff, date(6, 1)).unwrap();
    let first = view.days().to_vec();
    view.refresh_for(date(6, 1)).unwrap();
    let second = view.days().to_vec();
    assert_eq!(first, second);
}

#[test]
fn booked_count_is_recomputed_from_scratch_every_refresh() {
    let store = Arc::new(MemoryStore::new());
    store.upsert_event(show_event(date(6, 14), 80)).unwrap();
    store
        .add_reservation(Reservation::new(date(6, 14), 4, ReservationStatus::Confirmed))
        .unwrap();

    let mut view = CalendarView::anchored(store.clone(), Role::Staff, date(6, 1)).unwrap();
    let day = |view: &CalendarView| {
        view.days()
            .iter()
            .find(|d| d.date == date(6, 14))
            .cloned()
            .unwrap()
    };
    assert_eq!(day(&view).event.unwrap().show.unwrap().booked_count, 4);

    // A cancelled booking stops counting after the next refresh.
    let mut all = store.reservations().unwrap();
    all[0].status = ReservationStatus::Cancelled;
    let cancelled = all.remove(0);
    store.update_reservation(cancelled).unwrap();
    store
        .add_reservation(Reservation::new(date(6, 14), 6, ReservationStatus::Arrived))
        .unwrap();

    view.refresh_for(date(6, 1)).unwrap();
    assert_eq!(day(&view).event.unwrap().show.unwrap().booked_count, 6);
}

#[test]
fn availability_tracks_occupancy_and_waitlist_pressure() {
    let store = Arc::new(MemoryStore::new());
    store.upsert_event(show_event(date(6, 14), 10)).unwrap();

    let mut view = CalendarView::anchored(store.clone(), Role::Staff, date(6, 1)).unwrap();
    let availability = |view: &CalendarView| {
        view.days()
            .iter()
            .find(|d| d.date == date(6, 14))
            .map(|d| d.availability)
            .unwrap()
    };
    assert_eq!(availability(&view), Availability::Open);

    store
        .add_reservation(Reservation::new(date(6, 14), 10, ReservationStatus::Confirmed))
        .unwrap();
    view.refresh_for(date(6, 1)).unwrap();
    assert_eq!(availability(&view), Availability::Waitlist);

    for _ in 0..WAITLIST_LIMIT {
        store
            .add_waitlist_entry(WaitlistEntry::new(date(6, 14), 2))
            .unwrap();
    }
    view.refresh_for(date(6, 1)).unwrap();
    assert_eq!(availability(&view), Availability::Closed);
}

#[test]
fn manual_close_overrides_open_capacity() {
    let store = Arc::new(MemoryStore::new());
    let mut event = show_event(date(6, 14), 100);
    if let Some(show) = &mut event.show {
        show.manual_status = ManualStatus::Closed;
    }
    store.upsert_event(event).unwrap();

    let view = CalendarView::anchored(store, Role::Public, date(6, 1)).unwrap();
    let day = view.days().iter().find(|d| d.date == date(6, 14)).unwrap();
    assert_eq!(day.availability, Availability::Closed);
}

#[test]
fn public_view_never_carries_past_events() {
    let store = Arc::new(MemoryStore::new());
    store.upsert_event(show_event(date(6, 3), 80)).unwrap();
    store.upsert_event(show_event(date(6, 21), 80)).unwrap();

    let today = date(6, 15);
    let staff = CalendarView::anchored(store.clone(), Role::Staff, today).unwrap();
    let public = CalendarView::anchored(store, Role::Public, today).unwrap();

    let on = |view: &CalendarView, d: NaiveDate| {
        view.days()
            .iter()
            .find(|day| day.date == d)
            .map(|day| day.event.is_some())
            .unwrap()
    };
    assert!(on(&staff, date(6, 3)));
    assert!(!on(&public, date(6, 3)));
    assert!(on(&public, date(6, 21)));
}
