pub mod calendar;
pub mod catalog;
pub mod config;
pub mod event;
pub mod plan;
pub mod reservation;
pub mod waitlist;
