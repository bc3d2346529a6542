//! Account and calendar services.
//!
//! Every service takes the unit of work it runs in, so several calls made
//! inside one transaction scope share one transaction.

mod accounts;
mod calendars;
mod cascade;
mod error;
mod events;
mod sharing;

pub use accounts::{find_user_by_email, get_user, register_user, update_user};
pub use calendars::{calendars_for_owner, create_calendar, get_calendar, update_calendar};
pub use cascade::{delete_calendar, delete_event, delete_sharing, delete_user};
pub use error::{service_error_to_status_code, Result, ServiceError};
pub use events::{create_event, events_for_calendar, get_event, update_event};
pub use sharing::{get_sharing, share_calendar, sharings_for_calendar, update_sharing};
