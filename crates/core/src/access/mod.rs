//! Permission resolution for calendars and events.
//!
//! A requester is an optional authenticated user plus an optional sharing
//! code. Both entry points answer yes or no; a missing calendar, event or
//! sharing is a denial, and only a storage failure is an error.

mod permission;
mod resolver;

pub use permission::PermissionType;
pub use resolver::{resolve_calendar_permission, resolve_event_permission};
