use serde::{Deserialize, Serialize};

use super::EventTimes;

/// Pricing/timing profile nested under a show. Selecting a profile is the
/// usual way to fill in an event template's times and capacity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowProfile {
    pub id: String,
    pub name: String,
    pub times: EventTimes,
    pub default_capacity: u32,
}

/// A show definition from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Show {
    pub id: String,
    pub name: String,
    pub profiles: Vec<ShowProfile>,
}

/// Read-only catalog of show definitions, supplied by an external
/// collaborator. The core never writes to it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub shows: Vec<Show>,
}

impl Catalog {
    pub fn show(&self, show_id: &str) -> Option<&Show> {
        self.shows.iter().find(|s| s.id == show_id)
    }

    pub fn profile(&self, show_id: &str, profile_id: &str) -> Option<&ShowProfile> {
        self.show(show_id)?
            .profiles
            .iter()
            .find(|p| p.id == profile_id)
    }
}
