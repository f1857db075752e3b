use crossterm::event::KeyEvent;
use visita_core::api::{appointments, error, Client};
use visita_core::User;

/// Things that can happen to this app
#[derive(Debug)]
pub enum Action {
    /// We loaded (or failed to find) saved credentials on disk
    LoadedAuth(Client),

    /// We successfully saved the client auth
    SavedAuth,

    /// The registration attempt came back, one way or the other
    Registered(error::Result<User>),

    /// The login attempt came back. On success the client carries the new
    /// token.
    LoggedIn(error::Result<Client>),

    /// The schedule fetch came back
    GotAppointments(error::Result<appointments::Resp>),

    /// The user did something on the keyboard
    Key(KeyEvent),

    /// Something bad happened; display it to the user
    Problem(String),
}
