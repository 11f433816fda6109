//! Event template configured during the planner's CONFIGURE stage.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};
use crate::model::{
    CalendarEvent, Catalog, EventKind, EventTimes, ManualStatus, ShowDetails, Visibility,
};

/// Template from which every committed event is materialized.
///
/// Selecting a show auto-selects its first profile and applies that
/// profile's timing as a convenience default. The `times_dirty` flag is
/// set the moment the caller edits times by hand; from then on profile
/// changes stop re-applying their timing, so a manual edit is never
/// silently clobbered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventTemplate {
    pub kind: EventKind,
    pub visibility: Visibility,
    pub booking_enabled: bool,
    pub times: EventTimes,
    pub show_id: Option<String>,
    pub profile_id: Option<String>,
    pub capacity: u32,
    pub manual_status: ManualStatus,
    times_dirty: bool,
}

impl Default for EventTemplate {
    fn default() -> Self {
        Self {
            kind: EventKind::Show,
            visibility: Visibility::Public,
            booking_enabled: true,
            times: EventTimes::default(),
            show_id: None,
            profile_id: None,
            capacity: 0,
            manual_status: ManualStatus::Open,
            times_dirty: false,
        }
    }
}

impl EventTemplate {
    /// Manually edit the times. Marks the template dirty, which gates
    /// profile auto-fill for the rest of the session.
    pub fn set_times(&mut self, times: EventTimes) {
        self.times = times;
        self.times_dirty = true;
    }

    pub fn times_dirty(&self) -> bool {
        self.times_dirty
    }

    /// Point the template at a show. Auto-selects the show's first
    /// profile as the convenience default.
    pub fn set_show(&mut self, catalog: &Catalog, show_id: &str) -> Result<()> {
        let show = catalog
            .show(show_id)
            .ok_or_else(|| ValidationError::UnknownShow(show_id.into()))?;
        self.show_id = Some(show.id.clone());
        if let Some(first) = show.profiles.first() {
            let profile_id = first.id.clone();
            self.set_profile(catalog, &profile_id)?;
        } else {
            self.profile_id = None;
        }
        Ok(())
    }

    /// Switch to another profile of the current show. Re-applies the
    /// profile's timing unless the caller already edited times.
    pub fn set_profile(&mut self, catalog: &Catalog, profile_id: &str) -> Result<()> {
        let show_id = self
            .show_id
            .as_deref()
            .ok_or(ValidationError::MissingShowConfig)?;
        let profile = catalog
            .profile(show_id, profile_id)
            .ok_or_else(|| ValidationError::UnknownProfile(profile_id.into()))?;
        self.profile_id = Some(profile.id.clone());
        self.capacity = profile.default_capacity;
        if !self.times_dirty {
            self.times = profile.times;
        }
        Ok(())
    }

    /// Check the template is complete enough to commit.
    pub fn validate(&self) -> Result<()> {
        if self.kind == EventKind::Show && (self.show_id.is_none() || self.profile_id.is_none()) {
            return Err(ValidationError::MissingShowConfig.into());
        }
        Ok(())
    }

    /// Materialize an event for one date. The derived booked count is
    /// always reset to 0; it is never stored meaningfully.
    pub fn build_event(&self, date: chrono::NaiveDate) -> CalendarEvent {
        let mut event = CalendarEvent::new(date, self.kind, self.visibility, self.times);
        event.booking_enabled = self.booking_enabled;
        if self.kind == EventKind::Show {
            if let (Some(show_id), Some(profile_id)) = (&self.show_id, &self.profile_id) {
                event.show = Some(ShowDetails {
                    show_id: show_id.clone(),
                    profile_id: profile_id.clone(),
                    capacity: self.capacity,
                    manual_status: self.manual_status,
                    booked_count: 0,
                });
            }
        }
        event
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use crate::model::{Show, ShowProfile};

    fn time(h: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, 0, 0).unwrap()
    }

    fn make_catalog() -> Catalog {
        Catalog {
            shows: vec![Show {
                id: "cabaret".into(),
                name: "Cabaret Royale".into(),
                profiles: vec![
                    ShowProfile {
                        id: "evening".into(),
                        name: "Evening".into(),
                        times: EventTimes::new(time(20), time(19), time(23)),
                        default_capacity: 80,
                    },
                    ShowProfile {
                        id: "matinee".into(),
                        name: "Matinee".into(),
                        times: EventTimes::new(time(14), time(13), time(17)),
                        default_capacity: 60,
                    },
                ],
            }],
        }
    }

    #[test]
    fn selecting_show_defaults_to_first_profile() {
        let catalog = make_catalog();
        let mut template = EventTemplate::default();
        template.set_show(&catalog, "cabaret").unwrap();
        assert_eq!(template.profile_id.as_deref(), Some("evening"));
        assert_eq!(template.capacity, 80);
        assert_eq!(template.times.start, time(20));
    }

    #[test]
    fn profile_change_reapplies_timing() {
        let catalog = make_catalog();
        let mut template = EventTemplate::default();
        template.set_show(&catalog, "cabaret").unwrap();
        template.set_profile(&catalog, "matinee").unwrap();
        assert_eq!(template.times.start, time(14));
        assert_eq!(template.capacity, 60);
    }

    #[test]
    fn manual_times_survive_profile_change() {
        let catalog = make_catalog();
        let mut template = EventTemplate::default();
        template.set_show(&catalog, "cabaret").unwrap();

        let custom = EventTimes::new(time(21), time(20), time(23));
        template.set_times(custom);
        template.set_profile(&catalog, "matinee").unwrap();

        // Timing kept, the rest of the profile still applies.
        assert_eq!(template.times, custom);
        assert_eq!(template.capacity, 60);
    }

    #[test]
    fn unknown_show_is_rejected() {
        let catalog = make_catalog();
        let mut template = EventTemplate::default();
        assert!(template.set_show(&catalog, "nope").is_err());
        assert!(template.show_id.is_none());
    }

    #[test]
    fn show_template_without_reference_fails_validation() {
        let template = EventTemplate::default();
        assert!(template.validate().is_err());
    }

    #[test]
    fn built_event_resets_booked_count() {
        let catalog = make_catalog();
        let mut template = EventTemplate::default();
        template.set_show(&catalog, "cabaret").unwrap();
        let event = template.build_event(NaiveDate::from_ymd_opt(2024, 9, 6).unwrap());
        assert_eq!(event.show.unwrap().booked_count, 0);
    }
}
