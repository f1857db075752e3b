/// Things that can go wrong in the API
pub mod error;
pub use error::Error;

/// The client all calls go through
pub mod client;
pub use client::Client;

/// Create an account
pub mod register;

/// Trade credentials for a token
pub mod login;

/// Check who the server thinks you are
pub mod me;

/// Browse the provider directory
pub mod providers;

/// Create a provider profile
pub mod enroll;

/// Browse a provider's open slots
pub mod availability;

/// Offer a new slot
pub mod add_slot;

/// List your schedule
pub mod appointments;

/// Book a slot
pub mod book;

/// Call off an appointment
pub mod cancel;
