mod calendar;
mod user;

pub use calendar::{CalendarWithEvents, SharingsQuery};
pub use user::{LoginRequest, RegisterRequest, TokenResponse, UpdateUserRequest};
