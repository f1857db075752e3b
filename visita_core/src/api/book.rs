use crate::appointment::Appointment;
use serde::{Deserialize, Serialize};

/// The request to book a slot. The patient comes from the token, not the
/// body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Req {
    /// Whose time to book.
    pub provider_id: i64,

    /// Which slot to take.
    pub slot_id: i64,
}

/// The booked appointment.
pub type Resp = Appointment;

/// Where booking lives (a POST to the schedule.)
pub const PATH: &str = "/appointments";
