use clap::Subcommand;
use marquee_core::{CalendarStore, WaitlistEntry, WaitlistStatus};

use crate::common::{open_store, parse_date};

#[derive(Subcommand)]
pub enum WaitlistAction {
    /// List waitlist entries, optionally for one date
    List {
        #[arg(long)]
        date: Option<String>,
    },
    /// Add a pending waitlist entry
    Add {
        date: String,
        party: u32,
    },
    /// Mark an entry converted (a booking was made from it)
    Convert {
        id: String,
    },
    /// Delete an entry by id
    Rm {
        id: String,
    },
}

pub fn run(action: WaitlistAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store()?;
    match action {
        WaitlistAction::List { date } => {
            let mut entries = store.waitlist_entries()?;
            if let Some(date) = date {
                let date = parse_date(&date)?;
                entries.retain(|w| w.date == date);
            }
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        WaitlistAction::Add { date, party } => {
            let entry = WaitlistEntry::new(parse_date(&date)?, party);
            let id = entry.id.clone();
            store.add_waitlist_entry(entry)?;
            println!("waitlist entry {id} added");
        }
        WaitlistAction::Convert { id } => {
            let entries = store.waitlist_entries()?;
            let mut entry = entries
                .into_iter()
                .find(|w| w.id == id)
                .ok_or_else(|| format!("no waitlist entry '{id}'"))?;
            entry.status = WaitlistStatus::Converted;
            store.update_waitlist_entry(entry)?;
            println!("waitlist entry {id} converted");
        }
        WaitlistAction::Rm { id } => {
            store.delete_waitlist_entry(&id)?;
            println!("waitlist entry {id} removed");
        }
    }
    Ok(())
}
