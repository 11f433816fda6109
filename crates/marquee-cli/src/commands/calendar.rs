use chrono::{Datelike, Local, NaiveDate};
use clap::Subcommand;
use marquee_core::{Availability, CalendarView, Config, DayViewModel, EventKind};

use crate::common::{open_store, parse_role};

#[derive(Subcommand)]
pub enum CalendarAction {
    /// Render the month grid
    Show {
        /// Month to display (YYYY-MM), defaults to the current month
        #[arg(long)]
        month: Option<String>,
        /// Viewing role: staff or public (defaults to the configured role)
        #[arg(long)]
        role: Option<String>,
        /// Compact output
        #[arg(long)]
        dense: bool,
    },
    /// Linear agenda of event days in the month
    Agenda {
        #[arg(long)]
        month: Option<String>,
        #[arg(long)]
        role: Option<String>,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: CalendarAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        CalendarAction::Show { month, role, dense } => {
            let mut view = build_view(month.as_deref(), role.as_deref())?;
            view.set_dense(dense);
            render_grid(&view);
        }
        CalendarAction::Agenda { month, role, json } => {
            let view = build_view(month.as_deref(), role.as_deref())?;
            if json {
                let days: Vec<&DayViewModel> = view.agenda();
                println!("{}", serde_json::to_string_pretty(&days)?);
            } else {
                for day in view.agenda() {
                    println!("{}", format_agenda_line(day));
                }
            }
        }
    }
    Ok(())
}

fn build_view(
    month: Option<&str>,
    role: Option<&str>,
) -> Result<CalendarView, Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let store = open_store()?;
    let today = Local::now().date_naive();
    let role = match role {
        Some(role) => parse_role(role)?,
        None => config.role,
    };
    let mut view = CalendarView::anchored(store, role, today)?;
    view.set_poll_interval_ms(config.poll_interval_secs.saturating_mul(1000));

    if let Some(month) = month {
        let target = parse_month(month)?;
        let delta = (target.year() - view.month().year()) * 12
            + (target.month() as i32 - view.month().month() as i32);
        view.navigate(delta)?;
    }
    Ok(view)
}

fn parse_month(s: &str) -> Result<NaiveDate, Box<dyn std::error::Error>> {
    NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d")
        .map_err(|_| format!("invalid month (expected YYYY-MM): {s}").into())
}

fn render_grid(view: &CalendarView) {
    let sep = if view.dense() { "" } else { " " };
    if !view.dense() {
        println!("{}", view.month().format("%B %Y"));
        println!(" Mon  Tue  Wed  Thu  Fri  Sat  Sun");
    }
    for week in view.days().chunks(7) {
        let row: Vec<String> = week.iter().map(format_cell).collect();
        println!("{}", row.join(sep));
    }
}

fn format_cell(day: &DayViewModel) -> String {
    let marker = match &day.event {
        None => ' ',
        Some(event) => match event.kind {
            EventKind::Show => match day.availability {
                Availability::Open => 'o',
                Availability::Waitlist => 'w',
                Availability::Closed => 'c',
            },
            EventKind::Rehearsal => 'r',
            EventKind::Private => 'p',
            EventKind::Blackout => 'x',
        },
    };
    if day.in_window {
        format!("{:3}{marker}", day.date.day())
    } else {
        format!("  .{marker}")
    }
}

fn format_agenda_line(day: &DayViewModel) -> String {
    let Some(event) = &day.event else {
        return day.date.to_string();
    };
    let status = match day.availability {
        Availability::Open => "open",
        Availability::Waitlist => "waitlist",
        Availability::Closed => "closed",
    };
    let occupancy = event
        .show
        .as_ref()
        .map(|s| format!(" {}/{} booked, {} waiting", s.booked_count, s.capacity, day.waitlist_count))
        .unwrap_or_default();
    format!(
        "{} {:?} {}-{} [{status}]{occupancy}",
        day.date, event.kind, event.times.start, event.times.end
    )
}
