use clap::Subcommand;
use marquee_core::{
    BulkPlanner, CalendarStore, CommitPolicy, Effect, EventKind, ManualStatus, SkipReason,
};

use crate::common::{
    load_catalog, open_store, parse_date, parse_kind, parse_time, parse_visibility,
    parse_weekdays,
};

#[derive(Subcommand)]
pub enum PlanAction {
    /// Preview conflicts for a date pattern without writing anything
    Preview {
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        /// Comma-separated weekdays, e.g. "fri,sat"
        #[arg(long)]
        weekdays: String,
        /// Extra explicit dates to include
        #[arg(long = "date")]
        dates: Vec<String>,
    },
    /// Generate events over a date pattern and commit them
    Generate {
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        /// Comma-separated weekdays, e.g. "fri,sat"
        #[arg(long)]
        weekdays: String,
        /// Extra explicit dates to include
        #[arg(long = "date")]
        dates: Vec<String>,
        /// Event kind for the template
        #[arg(long, default_value = "show")]
        kind: String,
        #[arg(long, default_value = "public")]
        visibility: String,
        /// Show id from the catalog (show kind only)
        #[arg(long)]
        show: Option<String>,
        /// Profile id (defaults to the show's first profile)
        #[arg(long)]
        profile: Option<String>,
        #[arg(long)]
        capacity: Option<u32>,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        doors: Option<String>,
        #[arg(long)]
        end: Option<String>,
        /// Create the new events manually closed
        #[arg(long)]
        closed: bool,
        /// Replace dates that already carry an event
        #[arg(long)]
        overwrite: bool,
        /// Write even onto dates with live bookings
        #[arg(long)]
        force_bookings: bool,
    },
}

pub fn run(action: PlanAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        PlanAction::Preview {
            from,
            to,
            weekdays,
            dates,
        } => {
            let store = open_store()?;
            let mut planner = BulkPlanner::new();
            select(&mut planner, &from, &to, &weekdays, &dates)?;

            let snapshot = store.snapshot()?;
            for (date, conflict) in planner.conflicts(&snapshot) {
                let mut notes = Vec::new();
                if conflict.existing_event {
                    notes.push("event exists".to_string());
                }
                if conflict.has_bookings() {
                    notes.push(format!("{} guests booked", conflict.blocking_party_total));
                }
                if notes.is_empty() {
                    notes.push("clean".into());
                }
                println!("{date}: {}", notes.join(", "));
            }
            // Nothing was written; the planner state just goes away.
            planner.abort();
        }
        PlanAction::Generate {
            from,
            to,
            weekdays,
            dates,
            kind,
            visibility,
            show,
            profile,
            capacity,
            start,
            doors,
            end,
            closed,
            overwrite,
            force_bookings,
        } => {
            let store = open_store()?;
            let catalog = load_catalog()?;
            let mut planner = BulkPlanner::new();
            select(&mut planner, &from, &to, &weekdays, &dates)?;

            planner.begin_configure()?;
            let kind = parse_kind(&kind)?;
            {
                let template = planner.template_mut()?;
                template.kind = kind;
                template.visibility = parse_visibility(&visibility)?;
                if let Some(show_id) = &show {
                    template.set_show(&catalog, show_id)?;
                    if let Some(profile_id) = &profile {
                        template.set_profile(&catalog, profile_id)?;
                    }
                } else if kind == EventKind::Show {
                    return Err("show templates require --show".into());
                }
                if let Some(capacity) = capacity {
                    template.capacity = capacity;
                }
                if closed {
                    template.manual_status = ManualStatus::Closed;
                }
                if start.is_some() || doors.is_some() || end.is_some() {
                    let mut times = template.times;
                    if let Some(start) = start {
                        times.start = parse_time(&start)?;
                    }
                    if let Some(doors) = doors {
                        times.doors_open = parse_time(&doors)?;
                    }
                    if let Some(end) = end {
                        times.end = parse_time(&end)?;
                    }
                    template.set_times(times);
                }
            }
            planner.begin_confirm()?;

            let summary = planner.commit(
                store.as_ref(),
                CommitPolicy {
                    overwrite,
                    force_bookings,
                },
            )?;

            for date in &summary.created {
                println!("created {date}");
            }
            for (date, reason) in &summary.skipped {
                match reason {
                    SkipReason::LiveBookings { party_total } => {
                        println!("skipped {date}: {party_total} guests booked")
                    }
                    SkipReason::ExistingEvent => println!("skipped {date}: event exists"),
                }
            }
            run_effects(&summary.effects);
        }
    }
    Ok(())
}

fn select(
    planner: &mut BulkPlanner,
    from: &str,
    to: &str,
    weekdays: &str,
    dates: &[String],
) -> Result<(), Box<dyn std::error::Error>> {
    let added = planner.select_range(
        parse_date(from)?,
        parse_date(to)?,
        &parse_weekdays(weekdays)?,
    )?;
    for date in dates {
        planner.toggle(parse_date(date)?)?;
    }
    println!(
        "{} date(s) selected ({added} from range)",
        planner.selection().len()
    );
    Ok(())
}

/// The CLI is the collaborator that executes commit effects: here that
/// just means printing them.
fn run_effects(effects: &[Effect]) {
    for effect in effects {
        match effect {
            Effect::EmailNotification { dates } => {
                println!("[email] notifying booking office about {} date(s)", dates.len())
            }
            Effect::AuditLog { message } => println!("[audit] {message}"),
            Effect::Toast { message } => println!("{message}"),
        }
    }
}
