use serde::{Deserialize, Serialize};
use uuid::Uuid;

use calshare_core::calendar::{Calendar, Event};

/// A calendar together with its events, ordered by start time.
#[derive(Debug, Serialize, Deserialize)]
pub struct CalendarWithEvents {
    #[serde(flatten)]
    pub calendar: Calendar,
    pub events: Vec<Event>,
}

/// Query string of `GET /api/sharings`.
#[derive(Debug, Deserialize)]
pub struct SharingsQuery {
    pub calendar_id: Uuid,
}
