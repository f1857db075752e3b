use crate::slot::Slot;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The request to offer a new slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Req {
    /// When the slot starts.
    pub start_time: DateTime<Utc>,

    /// When it ends. Must be after the start.
    pub end_time: DateTime<Utc>,
}

/// The slot as created.
pub type Resp = Slot;

/// Where slot creation lives.
pub const PATH: &str = "/availability";
