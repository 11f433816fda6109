use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaitlistStatus {
    Pending,
    Converted,
    Removed,
}

/// One party waiting for a date. Only `Pending` entries count toward
/// waitlist pressure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitlistEntry {
    pub id: String,
    pub date: NaiveDate,
    pub party_size: u32,
    pub status: WaitlistStatus,
}

impl WaitlistEntry {
    pub fn new(date: NaiveDate, party_size: u32) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            date,
            party_size,
            status: WaitlistStatus::Pending,
        }
    }
}
