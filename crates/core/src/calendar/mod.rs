mod error;
mod operations;
mod requests;
mod types;

pub use error::ValidationError;
pub use operations::{validate_calendar, validate_email, validate_event, validate_user};
pub use requests::{
    CreateCalendarRequest, CreateEventRequest, CreateSharingRequest, NewUser,
    UpdateCalendarRequest, UpdateEventRequest, UpdateSharingRequest, UserUpdate,
};
pub use types::{Calendar, Event, Permission, Sharing, User};
