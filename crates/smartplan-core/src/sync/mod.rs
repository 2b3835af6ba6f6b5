//! External calendar synchronization.
//!
//! The scheduling core only exposes (task, scheduled time, duration);
//! everything provider-specific lives here.

pub mod google;
pub mod oauth;

pub use google::{CalendarEvent, GoogleCalendarSync};
