//! Common code across all visita clients (TUI today, anything else that
//! speaks the API tomorrow.)

/// Talk to the visita API server.
pub mod api;

/// A booked slot and its lifecycle.
pub mod appointment;
pub use appointment::Appointment;

/// A provider profile (the public face of a provider account.)
pub mod provider;
pub use provider::Provider;

/// What an account is allowed to do.
pub mod role;
pub use role::Role;

/// A bookable window of a provider's time.
pub mod slot;
pub use slot::Slot;

/// An account, as the API reports it.
pub mod user;
pub use user::User;

/// The checks every frontend runs before submitting a form.
pub mod validate;
