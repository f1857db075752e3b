use crate::provider::Provider;
use serde::{Deserialize, Serialize};

/// The request to create a provider profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Req {
    /// What the provider practices.
    pub specialty: String,

    /// A free-form introduction.
    pub bio: String,

    /// Where appointments happen, if the provider lists a location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clinic_address: Option<String>,
}

/// The created profile.
pub type Resp = Provider;

/// Where profile creation lives (a POST to the directory.)
pub const PATH: &str = "/providers";
