use super::error::ValidationError;
use super::types::{Calendar, Event, User};

const MAX_USER_NAME: usize = 50;
const MAX_EMAIL: usize = 100;
const MAX_CALENDAR_NAME: usize = 100;
const MAX_EVENT_TITLE: usize = 100;

fn require_text(value: &str, field: &'static str, max: usize) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty { field });
    }
    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(())
}

/// Validates an email address: non-empty, bounded, with a local part and a domain.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    require_text(email, "email", MAX_EMAIL)?;
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(ValidationError::InvalidEmail(email.to_string())),
    }
}

/// Validates a user before registration or update.
pub fn validate_user(user: &User) -> Result<(), ValidationError> {
    require_text(&user.name, "name", MAX_USER_NAME)?;
    validate_email(&user.email)
}

/// Validates a calendar before creation or update.
pub fn validate_calendar(calendar: &Calendar) -> Result<(), ValidationError> {
    require_text(&calendar.name, "name", MAX_CALENDAR_NAME)
}

/// Validates an event before creation or update.
pub fn validate_event(event: &Event) -> Result<(), ValidationError> {
    require_text(&event.title, "title", MAX_EVENT_TITLE)?;
    if event.end_time < event.start_time {
        return Err(ValidationError::InvalidTimeRange);
    }
    Ok(())
}
