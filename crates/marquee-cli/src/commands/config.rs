use clap::Subcommand;
use marquee_core::Config;

use crate::common::parse_role;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
    /// Point at a different record store file
    SetStore { path: String },
    /// Set the poll interval in seconds
    SetPoll { secs: u64 },
    /// Set the default viewing role
    SetRole { role: String },
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Show => {
            let config = Config::load_or_default();
            println!("{}", toml::to_string_pretty(&config)?);
        }
        ConfigAction::SetStore { path } => {
            let mut config = Config::load_or_default();
            config.store_path = Some(path.into());
            config.save()?;
            println!("store path updated");
        }
        ConfigAction::SetPoll { secs } => {
            let mut config = Config::load_or_default();
            config.poll_interval_secs = secs;
            config.save()?;
            println!("poll interval updated");
        }
        ConfigAction::SetRole { role } => {
            let mut config = Config::load_or_default();
            config.role = parse_role(&role)?;
            config.save()?;
            println!("role updated");
        }
    }
    Ok(())
}
