use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// A booked slot, tying a patient to a provider's time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Appointment {
    /// Stable appointment ID for use in later calls.
    pub id: i64,

    /// Who booked.
    pub patient_id: i64,

    /// Whose time was booked.
    pub provider_id: i64,

    /// The slot this appointment occupies. One appointment per slot, ever.
    pub slot_id: i64,

    /// Where the appointment is in its lifecycle.
    #[sqlx(try_from = "String")]
    pub status: Status,

    /// When the booking was made.
    pub created_at: DateTime<Utc>,

    /// Set when the appointment is canceled. Canceled appointments stay in
    /// the table but drop out of every listing.
    pub deleted_at: Option<DateTime<Utc>>,
}

/// The appointment lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Booked and upcoming.
    #[default]
    Scheduled,

    /// The visit happened.
    Completed,

    /// Called off. The slot was released.
    Canceled,
}

impl Status {
    /// The lowercase name, exactly as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Completed => "completed",
            Self::Canceled => "canceled",
        }
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(Self::Scheduled),
            "completed" => Ok(Self::Completed),
            "canceled" => Ok(Self::Canceled),
            _ => Err(UnknownStatus(s.to_string())),
        }
    }
}

impl TryFrom<String> for Status {
    type Error = UnknownStatus;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// A status we don't recognize, for example from a newer server.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown appointment status: {0}")]
pub struct UnknownStatus(String);

/// The display model for schedule listings: when, and with whom.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Summary {
    /// When the appointment starts.
    pub date: DateTime<Utc>,

    /// Whose visit it is.
    pub patient_name: String,
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_every_known_status() {
        for status in [Status::Scheduled, Status::Completed, Status::Canceled] {
            assert_eq!(status.as_str().parse(), Ok(status));
        }
    }

    #[test]
    fn rejects_unknown_statuses() {
        assert_eq!(
            "rescheduled".parse::<Status>(),
            Err(UnknownStatus("rescheduled".to_string()))
        );
    }

    #[test]
    fn reads_a_summary_the_way_the_server_writes_it() {
        let summary: Summary =
            serde_json::from_str(r#"{"date":"2025-03-01T10:00:00Z","patient_name":"Ada Lovelace"}"#)
                .unwrap();

        assert_eq!(
            summary,
            Summary {
                date: Utc.with_ymd_and_hms(2025, 3, 1, 10, 0, 0).unwrap(),
                patient_name: "Ada Lovelace".to_string(),
            }
        );
    }
}
