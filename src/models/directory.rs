use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use super::enums::PatientPriority;

/// A doctor record from the scheduling directory. Read-only for the
/// session's lifetime; loaded once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doctor {
    pub id: String,
    pub name: String,
    pub specialty: String,
    /// Human-readable availability windows. The directory service sends
    /// either one string or an array; both normalize to a list here.
    #[serde(default, deserialize_with = "one_or_many")]
    pub availability: Vec<String>,
    #[serde(rename = "avgConsultationTime", skip_serializing_if = "Option::is_none")]
    pub avg_consultation_time: Option<u32>,
}

/// A patient record from the scheduling directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<PatientPriority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_appointment: Option<NaiveDate>,
    #[serde(
        rename = "frequentBookings",
        skip_serializing_if = "Option::is_none"
    )]
    pub frequent_bookings: Option<Vec<String>>,
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
        Nothing(()),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(s) => vec![s],
        OneOrMany::Many(v) => v,
        OneOrMany::Nothing(()) => Vec::new(),
    })
}
