//! End-to-end bulk planning: selection, conflict policy, commit merge.

use chrono::{NaiveDate, NaiveTime, Weekday};
use marquee_core::{
    BulkPlanner, CalendarEvent, CalendarStore, Catalog, CommitPolicy, Effect, EventKind,
    EventTimes, MemoryStore, Reservation, ReservationStatus, Show, ShowProfile, SkipReason,
};

fn date(m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, m, d).unwrap()
}

fn time(h: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, 0, 0).unwrap()
}

fn make_catalog() -> Catalog {
    Catalog {
        shows: vec![Show {
            id: "cabaret".into(),
            name: "Cabaret Royale".into(),
            profiles: vec![ShowProfile {
                id: "evening".into(),
                name: "Evening".into(),
                times: EventTimes::new(time(20), time(19), time(23)),
                default_capacity: 80,
            }],
        }],
    }
}

/// Walk a planner up to the Confirm stage for the given dates.
fn planner_for(dates: &[NaiveDate]) -> BulkPlanner {
    let catalog = make_catalog();
    let mut planner = BulkPlanner::new();
    for d in dates {
        planner.toggle(*d).unwrap();
    }
    planner.begin_configure().unwrap();
    planner
        .template_mut()
        .unwrap()
        .set_show(&catalog, "cabaret")
        .unwrap();
    planner.begin_confirm().unwrap();
    planner
}

#[test]
fn commit_creates_show_events_from_template() {
    let store = MemoryStore::new();
    let mut planner = planner_for(&[date(1, 5), date(1, 6)]);

    let summary = planner.commit(&store, CommitPolicy::default()).unwrap();
    assert_eq!(summary.created, vec![date(1, 5), date(1, 6)]);
    assert!(summary.skipped.is_empty());

    let events = store.events().unwrap();
    assert_eq!(events.len(), 2);
    for event in &events {
        assert_eq!(event.kind, EventKind::Show);
        let show = event.show.as_ref().unwrap();
        assert_eq!(show.capacity, 80);
        // Freshly created dates have no reservations yet.
        assert_eq!(show.booked_count, 0);
    }
}

#[test]
fn commit_without_overwrite_leaves_existing_event_untouched() {
    let store = MemoryStore::new();
    let existing = CalendarEvent::new(
        date(1, 5),
        EventKind::Blackout,
        marquee_core::Visibility::Internal,
        EventTimes::default(),
    );
    store.upsert_event(existing.clone()).unwrap();

    let mut planner = planner_for(&[date(1, 5)]);
    let summary = planner.commit(&store, CommitPolicy::default()).unwrap();

    assert!(summary.created.is_empty());
    assert_eq!(summary.skipped, vec![(date(1, 5), SkipReason::ExistingEvent)]);
    assert_eq!(store.events().unwrap(), vec![existing]);
}

#[test]
fn commit_with_overwrite_replaces_wholesale() {
    let store = MemoryStore::new();
    store
        .upsert_event(CalendarEvent::new(
            date(1, 5),
            EventKind::Blackout,
            marquee_core::Visibility::Internal,
            EventTimes::default(),
        ))
        .unwrap();

    let mut planner = planner_for(&[date(1, 5)]);
    let policy = CommitPolicy {
        overwrite: true,
        ..CommitPolicy::default()
    };
    let summary = planner.commit(&store, policy).unwrap();
    assert_eq!(summary.created, vec![date(1, 5)]);

    let events = store.events().unwrap();
    // Exactly one event per date, matching the new template.
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, EventKind::Show);
}

#[test]
fn booking_conflict_skips_before_event_conflict() {
    let store = MemoryStore::new();
    store
        .add_reservation(Reservation::new(date(1, 5), 6, ReservationStatus::Confirmed))
        .unwrap();
    store
        .add_reservation(Reservation::new(date(1, 5), 2, ReservationStatus::Request))
        .unwrap();

    let mut planner = planner_for(&[date(1, 5)]);
    // Overwrite alone does not help: the booking guard fires first.
    let summary = planner
        .commit(&store, CommitPolicy { overwrite: true, force_bookings: false })
        .unwrap();
    assert_eq!(
        summary.skipped,
        vec![(date(1, 5), SkipReason::LiveBookings { party_total: 8 })]
    );
    assert!(store.events().unwrap().is_empty());
    // The reservations themselves are untouched.
    assert_eq!(store.reservations().unwrap().len(), 2);
}

#[test]
fn force_bookings_writes_the_event_but_never_touches_reservations() {
    let store = MemoryStore::new();
    let reservation = Reservation::new(date(1, 5), 6, ReservationStatus::Confirmed);
    store.add_reservation(reservation.clone()).unwrap();

    let mut planner = planner_for(&[date(1, 5)]);
    let summary = planner
        .commit(&store, CommitPolicy { overwrite: true, force_bookings: true })
        .unwrap();
    assert_eq!(summary.created, vec![date(1, 5)]);
    assert_eq!(store.reservations().unwrap(), vec![reservation]);
}

#[test]
fn partial_batches_are_expected_outcomes() {
    let store = MemoryStore::new();
    // Jan 5 has an event, Jan 6 has bookings, Jan 12/13 are clean.
    store
        .upsert_event(CalendarEvent::new(
            date(1, 5),
            EventKind::Private,
            marquee_core::Visibility::Internal,
            EventTimes::default(),
        ))
        .unwrap();
    store
        .add_reservation(Reservation::new(date(1, 6), 4, ReservationStatus::Invited))
        .unwrap();
    let untouched = CalendarEvent::new(
        date(2, 1),
        EventKind::Rehearsal,
        marquee_core::Visibility::Internal,
        EventTimes::default(),
    );
    store.upsert_event(untouched.clone()).unwrap();

    let catalog = make_catalog();
    let mut planner = BulkPlanner::new();
    planner
        .select_range(date(1, 1), date(1, 14), &[Weekday::Fri, Weekday::Sat])
        .unwrap();
    planner.begin_configure().unwrap();
    planner
        .template_mut()
        .unwrap()
        .set_show(&catalog, "cabaret")
        .unwrap();
    planner.begin_confirm().unwrap();

    let summary = planner.commit(&store, CommitPolicy::default()).unwrap();
    assert_eq!(summary.created, vec![date(1, 12), date(1, 13)]);
    assert_eq!(summary.skipped.len(), 2);

    // The unrelated February date survived the merge untouched.
    let events = store.events().unwrap();
    assert!(events.contains(&untouched));
    assert_eq!(events.len(), 4);
}

#[test]
fn commit_reports_effects_for_the_caller_to_run() {
    let store = MemoryStore::new();
    let mut planner = planner_for(&[date(1, 5)]);
    let summary = planner.commit(&store, CommitPolicy::default()).unwrap();

    assert!(matches!(
        summary.effects[0],
        Effect::EmailNotification { ref dates } if dates == &vec![date(1, 5)]
    ));
    assert!(summary
        .effects
        .iter()
        .any(|e| matches!(e, Effect::AuditLog { .. })));
    assert!(summary
        .effects
        .iter()
        .any(|e| matches!(e, Effect::Toast { .. })));
}

#[test]
fn commit_is_terminal() {
    let store = MemoryStore::new();
    let mut planner = planner_for(&[date(1, 5)]);
    planner.commit(&store, CommitPolicy::default()).unwrap();
    assert!(planner.commit(&store, CommitPolicy::default()).is_err());
}
