use clap::Subcommand;
use marquee_core::{CalendarEvent, CalendarStore, EventTimes, ManualStatus, ShowDetails};

use crate::common::{
    load_catalog, open_store, parse_date, parse_kind, parse_time, parse_visibility,
};

#[derive(Subcommand)]
pub enum EventAction {
    /// List all events
    List,
    /// Create or replace the event on a date
    Set {
        /// Date (YYYY-MM-DD)
        date: String,
        /// Event kind: show, rehearsal, private, blackout
        #[arg(long, default_value = "show")]
        kind: String,
        /// Visibility: public or internal
        #[arg(long, default_value = "public")]
        visibility: String,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        doors: Option<String>,
        #[arg(long)]
        end: Option<String>,
        /// Show id from the catalog (show kind only)
        #[arg(long)]
        show: Option<String>,
        /// Profile id under the show (defaults to the show's first)
        #[arg(long)]
        profile: Option<String>,
        #[arg(long)]
        capacity: Option<u32>,
        /// Manually close the date regardless of occupancy
        #[arg(long)]
        closed: bool,
    },
    /// Delete the event on a date (immediate, not soft)
    Rm {
        date: String,
    },
}

pub fn run(action: EventAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store()?;
    match action {
        EventAction::List => {
            let events = store.events()?;
            println!("{}", serde_json::to_string_pretty(&events)?);
        }
        EventAction::Set {
            date,
            kind,
            visibility,
            start,
            doors,
            end,
            show,
            profile,
            capacity,
            closed,
        } => {
            let date = parse_date(&date)?;
            let kind = parse_kind(&kind)?;
            let mut event = CalendarEvent::new(
                date,
                kind,
                parse_visibility(&visibility)?,
                EventTimes::default(),
            );

            if kind == marquee_core::EventKind::Show {
                let catalog = load_catalog()?;
                let show_id = show.ok_or("show events require --show")?;
                let catalog_show = catalog
                    .show(&show_id)
                    .ok_or_else(|| format!("unknown show: {show_id}"))?;
                let profile = match profile {
                    Some(id) => catalog
                        .profile(&show_id, &id)
                        .ok_or_else(|| format!("unknown profile: {id}"))?,
                    None => catalog_show
                        .profiles
                        .first()
                        .ok_or_else(|| format!("show {show_id} has no profiles"))?,
                };
                event.times = profile.times;
                event.booking_enabled = true;
                event.show = Some(ShowDetails {
                    show_id: show_id.clone(),
                    profile_id: profile.id.clone(),
                    capacity: capacity.unwrap_or(profile.default_capacity),
                    manual_status: if closed {
                        ManualStatus::Closed
                    } else {
                        ManualStatus::Open
                    },
                    booked_count: 0,
                });
            }
            if let Some(start) = start {
                event.times.start = parse_time(&start)?;
            }
            if let Some(doors) = doors {
                event.times.doors_open = parse_time(&doors)?;
            }
            if let Some(end) = end {
                event.times.end = parse_time(&end)?;
            }

            store.upsert_event(event)?;
            println!("event set for {date}");
        }
        EventAction::Rm { date } => {
            let date = parse_date(&date)?;
            store.delete_event(date)?;
            println!("event removed for {date}");
        }
    }
    Ok(())
}
