//! # Marquee Core Library
//!
//! This library provides the core business logic for Marquee, a venue
//! calendar manager: for every date it decides whether a public showing
//! is bookable, wait-listable, or closed, and it lets staff generate or
//! mutate many calendar entries at once without silently corrupting
//! existing reservations. The CLI binary is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Status Engine**: a pure mapping from occupancy plus the staff
//!   override to a customer-facing availability value
//! - **Day Projector**: builds one calendar cell's view-model from a raw
//!   event plus aggregated booking/waitlist counts, with role-based
//!   visibility
//! - **Calendar Aggregator**: owns the visible month, re-derives all day
//!   view-models from a consistent store snapshot, and exposes a
//!   caller-driven poll instead of internal timers
//! - **Bulk Planner**: turns a date pattern into a candidate set,
//!   classifies conflicts, and commits a merge that creates, skips, or
//!   overwrites events under explicit policy flags
//!
//! ## Key Components
//!
//! - [`classify`]: the availability state machine
//! - [`CalendarView`]: role-aware month/agenda aggregation
//! - [`BulkPlanner`]: the SELECT / CONFIGURE / CONFIRM workflow
//! - [`CalendarStore`]: the injected record store the core reads/writes

pub mod availability;
pub mod calendar;
pub mod config;
pub mod effects;
pub mod error;
pub mod model;
pub mod planner;
pub mod projector;
pub mod store;

pub use availability::{booked_count, classify, waitlist_counts, Availability, WAITLIST_LIMIT};
pub use calendar::{CalendarView, ViewMode, DEFAULT_POLL_INTERVAL_MS};
pub use config::Config;
pub use effects::Effect;
pub use error::{ConfigError, CoreError, Result, StoreError, ValidationError};
pub use model::{
    event_id, CalendarEvent, Catalog, EventKind, EventTimes, ManualStatus, Reservation,
    ReservationStatus, Show, ShowDetails, ShowProfile, Visibility, WaitlistEntry, WaitlistStatus,
};
pub use planner::{
    BulkPlanner, CommitPolicy, CommitSummary, DateConflict, EventTemplate, PlannerStage,
    SkipReason, MAX_RANGE_DAYS,
};
pub use projector::{project_day, DayViewModel, Role};
pub use store::{CalendarStore, FileStore, MemoryStore, StoreSnapshot};
