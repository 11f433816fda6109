use clap::Subcommand;
use marquee_core::{CalendarStore, Reservation, ReservationStatus};

use crate::common::{open_store, parse_date};

#[derive(Subcommand)]
pub enum ReservationAction {
    /// List reservations, optionally for one date
    List {
        #[arg(long)]
        date: Option<String>,
    },
    /// Add a reservation
    Add {
        date: String,
        /// Party size
        party: u32,
        /// Status: request, option, confirmed, arrived, invited,
        /// waitlist, noshow, cancelled, archived
        #[arg(long, default_value = "confirmed")]
        status: String,
    },
    /// Delete a reservation by id
    Rm {
        id: String,
    },
}

fn parse_status(s: &str) -> Result<ReservationStatus, Box<dyn std::error::Error>> {
    match s.to_ascii_lowercase().as_str() {
        "request" => Ok(ReservationStatus::Request),
        "option" => Ok(ReservationStatus::Option),
        "confirmed" => Ok(ReservationStatus::Confirmed),
        "arrived" => Ok(ReservationStatus::Arrived),
        "invited" => Ok(ReservationStatus::Invited),
        "waitlist" => Ok(ReservationStatus::Waitlist),
        "noshow" => Ok(ReservationStatus::NoShow),
        "cancelled" => Ok(ReservationStatus::Cancelled),
        "archived" => Ok(ReservationStatus::Archived),
        other => Err(format!("unknown reservation status: {other}").into()),
    }
}

pub fn run(action: ReservationAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store()?;
    match action {
        ReservationAction::List { date } => {
            let mut reservations = store.reservations()?;
            if let Some(date) = date {
                let date = parse_date(&date)?;
                reservations.retain(|r| r.date == date);
            }
            println!("{}", serde_json::to_string_pretty(&reservations)?);
        }
        ReservationAction::Add { date, party, status } => {
            if party == 0 {
                return Err("party size must be at least 1".into());
            }
            let reservation =
                Reservation::new(parse_date(&date)?, party, parse_status(&status)?);
            let id = reservation.id.clone();
            store.add_reservation(reservation)?;
            println!("reservation {id} added");
        }
        ReservationAction::Rm { id } => {
            store.delete_reservation(&id)?;
            println!("reservation {id} removed");
        }
    }
    Ok(())
}
