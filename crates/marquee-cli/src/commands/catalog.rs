use chrono::NaiveTime;
use clap::Subcommand;
use marquee_core::{Catalog, EventTimes, Show, ShowProfile};

use crate::common::{catalog_path, load_catalog};

#[derive(Subcommand)]
pub enum CatalogAction {
    /// Print the show catalog
    List,
    /// Write a starter catalog with one show and two profiles
    Seed,
}

pub fn run(action: CatalogAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        CatalogAction::List => {
            let catalog = load_catalog()?;
            println!("{}", serde_json::to_string_pretty(&catalog)?);
        }
        CatalogAction::Seed => {
            let path = catalog_path()?;
            let catalog = starter_catalog();
            std::fs::write(&path, serde_json::to_string_pretty(&catalog)?)?;
            println!("catalog written to {}", path.display());
        }
    }
    Ok(())
}

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap_or_default()
}

fn starter_catalog() -> Catalog {
    Catalog {
        shows: vec![Show {
            id: "main-show".into(),
            name: "Main Show".into(),
            profiles: vec![
                ShowProfile {
                    id: "evening".into(),
                    name: "Evening".into(),
                    times: EventTimes::new(time(20, 0), time(19, 0), time(23, 0)),
                    default_capacity: 80,
                },
                ShowProfile {
                    id: "matinee".into(),
                    name: "Matinee".into(),
                    times: EventTimes::new(time(14, 30), time(13, 30), time(17, 0)),
                    default_capacity: 60,
                },
            ],
        }],
    }
}
