pub mod authz;
pub mod calendars;
pub mod error;
pub mod events;
pub mod health;
pub mod login;
pub mod sharings;
pub mod users;

pub use error::AppError;
