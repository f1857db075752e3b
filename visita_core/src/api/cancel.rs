use crate::appointment::Appointment;

/// The canceled appointment, with its slot released.
pub type Resp = Appointment;

/// Where cancellation lives.
pub static PATH: &str = "/appointments/:id";

/// Make a path with the appointment ID in the correct segment
pub fn make_path(appointment_id: i64) -> String {
    PATH.replace(":id", &appointment_id.to_string())
}
