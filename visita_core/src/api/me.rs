use crate::user::User;

/// The account the token belongs to.
pub type Resp = User;

/// Where the current-user endpoint lives.
pub const PATH: &str = "/users/me";
