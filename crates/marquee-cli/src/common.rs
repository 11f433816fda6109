//! Shared helpers for the CLI commands.

use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime, Weekday};
use marquee_core::config::data_dir;
use marquee_core::{Catalog, Config, EventKind, FileStore, Role, Visibility};

/// Open the configured record store.
pub fn open_store() -> Result<Arc<FileStore>, Box<dyn Error>> {
    let config = Config::load_or_default();
    let store = FileStore::open(config.store_path()?)?;
    Ok(Arc::new(store))
}

pub fn catalog_path() -> Result<PathBuf, Box<dyn Error>> {
    Ok(data_dir()?.join("catalog.json"))
}

/// Load the show catalog, empty if none has been seeded yet.
pub fn load_catalog() -> Result<Catalog, Box<dyn Error>> {
    let path = catalog_path()?;
    if !path.exists() {
        return Ok(Catalog::default());
    }
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

pub fn parse_date(s: &str) -> Result<NaiveDate, Box<dyn Error>> {
    Ok(NaiveDate::parse_from_str(s, "%Y-%m-%d")?)
}

pub fn parse_time(s: &str) -> Result<NaiveTime, Box<dyn Error>> {
    Ok(NaiveTime::parse_from_str(s, "%H:%M")?)
}

/// Comma-separated weekday list, e.g. "fri,sat".
pub fn parse_weekdays(s: &str) -> Result<Vec<Weekday>, Box<dyn Error>> {
    s.split(',')
        .map(|part| {
            part.trim()
                .parse::<Weekday>()
                .map_err(|_| format!("unknown weekday: {part}").into())
        })
        .collect()
}

pub fn parse_kind(s: &str) -> Result<EventKind, Box<dyn Error>> {
    match s.to_ascii_lowercase().as_str() {
        "show" => Ok(EventKind::Show),
        "rehearsal" => Ok(EventKind::Rehearsal),
        "private" => Ok(EventKind::Private),
        "blackout" => Ok(EventKind::Blackout),
        other => Err(format!("unknown event kind: {other}").into()),
    }
}

pub fn parse_visibility(s: &str) -> Result<Visibility, Box<dyn Error>> {
    match s.to_ascii_lowercase().as_str() {
        "public" => Ok(Visibility::Public),
        "internal" => Ok(Visibility::Internal),
        other => Err(format!("unknown visibility: {other}").into()),
    }
}

pub fn parse_role(s: &str) -> Result<Role, Box<dyn Error>> {
    match s.to_ascii_lowercase().as_str() {
        "staff" => Ok(Role::Staff),
        "public" => Ok(Role::Public),
        other => Err(format!("unknown role: {other}").into()),
    }
}
