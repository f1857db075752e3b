use crate::provider::Provider;

/// The provider directory.
pub type Resp = Vec<Provider>;

/// Where the provider directory lives.
pub const PATH: &str = "/providers";
