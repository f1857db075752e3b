use crate::appointment::Summary;

/// The schedule: one summary per appointment, in exactly the order the
/// server returns them.
pub type Resp = Vec<Summary>;

/// Where the schedule lives.
pub const PATH: &str = "/appointments";
