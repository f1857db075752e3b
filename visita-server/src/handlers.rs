#![expect(clippy::missing_docs_in_private_items)]

pub mod add_slot;
pub mod appointments;
pub mod availability;
pub mod book;
pub mod cancel;
pub mod enroll;
pub mod health;
pub mod login;
pub mod me;
pub mod providers;
pub mod register;
