use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A bookable window of a provider's time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Slot {
    /// Stable slot ID for use in later calls.
    pub id: i64,

    /// Whose time this is.
    pub provider_id: i64,

    /// When the appointment would start.
    pub start_time: DateTime<Utc>,

    /// When it would end.
    pub end_time: DateTime<Utc>,

    /// Set once a patient books the slot. Booked slots never show up in the
    /// open-slot listing.
    pub is_booked: bool,
}
