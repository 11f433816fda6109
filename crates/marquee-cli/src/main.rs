use clap::{Parser, Subcommand};

mod commands;
mod common;

#[derive(Parser)]
#[command(name = "marquee", version, about = "Marquee venue calendar CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Month and agenda views
    Calendar {
        #[command(subcommand)]
        action: commands::calendar::CalendarAction,
    },
    /// Single-event editing
    Event {
        #[command(subcommand)]
        action: commands::event::EventAction,
    },
    /// Reservation records
    Reservation {
        #[command(subcommand)]
        action: commands::reservation::ReservationAction,
    },
    /// Waitlist records
    Waitlist {
        #[command(subcommand)]
        action: commands::waitlist::WaitlistAction,
    },
    /// Bulk calendar generation
    Plan {
        #[command(subcommand)]
        action: commands::plan::PlanAction,
    },
    /// Show catalog management
    Catalog {
        #[command(subcommand)]
        action: commands::catalog::CatalogAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Calendar { action } => commands::calendar::run(action),
        Commands::Event { action } => commands::event::run(action),
        Commands::Reservation { action } => commands::reservation::run(action),
        Commands::Waitlist { action } => commands::waitlist::run(action),
        Commands::Plan { action } => commands::plan::run(action),
        Commands::Catalog { action } => commands::catalog::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
