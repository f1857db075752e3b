use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// What an account is allowed to do. Travels as a lowercase string, both on
/// the wire and in the database.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Someone booking appointments. The default for new registrations.
    #[default]
    Patient,

    /// Someone offering appointment slots.
    Provider,

    /// A site operator.
    Admin,
}

impl Role {
    /// The lowercase name, exactly as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Patient => "patient",
            Self::Provider => "provider",
            Self::Admin => "admin",
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "patient" => Ok(Self::Patient),
            "provider" => Ok(Self::Provider),
            "admin" => Ok(Self::Admin),
            _ => Err(UnknownRole(s.to_string())),
        }
    }
}

impl TryFrom<String> for Role {
    type Error = UnknownRole;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// A role we don't recognize, for example from a newer server.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(String);

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_every_known_role() {
        for role in [Role::Patient, Role::Provider, Role::Admin] {
            assert_eq!(role.as_str().parse(), Ok(role));
        }
    }

    #[test]
    fn rejects_unknown_roles() {
        assert_eq!(
            "surgeon".parse::<Role>(),
            Err(UnknownRole("surgeon".to_string()))
        );
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Role::Provider).unwrap(),
            "\"provider\""
        );
    }

    #[test]
    fn deserializes_lowercase() {
        assert_eq!(
            serde_json::from_str::<Role>("\"admin\"").unwrap(),
            Role::Admin
        );
    }
}
