use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A candidate appointment instant suggested by the scheduling service.
///
/// The service may send a bare RFC 3339 datetime or an annotated object;
/// both deserialize to this type. Slot identity is the instant; the
/// annotations are presentation metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "SlotWire")]
pub struct SuggestedSlot {
    pub datetime: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
    #[serde(
        rename = "estimatedDuration",
        skip_serializing_if = "Option::is_none"
    )]
    pub estimated_duration: Option<u32>,
    #[serde(rename = "isFrequent", skip_serializing_if = "Option::is_none")]
    pub is_frequent: Option<bool>,
}

impl SuggestedSlot {
    pub fn at(datetime: DateTime<Utc>) -> Self {
        Self {
            datetime,
            confidence: None,
            reasoning: None,
            estimated_duration: None,
            is_frequent: None,
        }
    }

    /// "Friday, January 10, 2025"
    pub fn display_date(&self) -> String {
        self.datetime.format("%A, %B %-d, %Y").to_string()
    }

    /// "9:00 AM"
    pub fn display_time(&self) -> String {
        self.datetime.format("%-I:%M %p").to_string()
    }

    /// Full human-readable rendering, used in booking confirmations.
    pub fn display(&self) -> String {
        format!("{} at {}", self.display_date(), self.display_time())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SlotWire {
    Annotated {
        datetime: DateTime<Utc>,
        confidence: Option<f32>,
        reasoning: Option<String>,
        #[serde(rename = "estimatedDuration")]
        estimated_duration: Option<u32>,
        #[serde(rename = "isFrequent")]
        is_frequent: Option<bool>,
    },
    Bare(DateTime<Utc>),
}

impl From<SlotWire> for SuggestedSlot {
    fn from(wire: SlotWire) -> Self {
        match wire {
            SlotWire::Bare(datetime) => Self::at(datetime),
            SlotWire::Annotated {
                datetime,
                confidence,
                reasoning,
                estimated_duration,
                is_frequent,
            } => Self {
                datetime,
                confidence,
                reasoning,
                estimated_duration,
                is_frequent,
            },
        }
    }
}

/// Input to a slot-suggestion request. Doubles as the wire body: optional
/// fields are omitted entirely rather than sent empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulingQuery {
    pub doctor_id: String,
    pub patient_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub problem: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_utc(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    #[test]
    fn bare_string_slot_deserializes() {
        let slot: SuggestedSlot =
            serde_json::from_str("\"2025-01-10T09:00:00Z\"").unwrap();
        assert_eq!(slot.datetime, parse_utc("2025-01-10T09:00:00Z"));
        assert!(slot.confidence.is_none());
    }

    #[test]
    fn annotated_slot_deserializes() {
        let json = r#"{
            "datetime": "2025-01-10T10:00:00Z",
            "confidence": 0.92,
            "reasoning": "Patient prefers mornings",
            "estimatedDuration": 30,
            "isFrequent": true
        }"#;
        let slot: SuggestedSlot = serde_json::from_str(json).unwrap();
        assert_eq!(slot.datetime, parse_utc("2025-01-10T10:00:00Z"));
        assert_eq!(slot.confidence, Some(0.92));
        assert_eq!(slot.estimated_duration, Some(30));
        assert_eq!(slot.is_frequent, Some(true));
    }

    #[test]
    fn malformed_slot_fails() {
        let result: Result<SuggestedSlot, _> =
            serde_json::from_str("\"next tuesday-ish\"");
        assert!(result.is_err());
    }

    #[test]
    fn slot_display_is_human_readable() {
        let slot = SuggestedSlot::at(parse_utc("2025-01-10T09:00:00Z"));
        assert_eq!(slot.display_date(), "Friday, January 10, 2025");
        assert_eq!(slot.display_time(), "9:00 AM");
        assert_eq!(slot.display(), "Friday, January 10, 2025 at 9:00 AM");
    }

    #[test]
    fn query_omits_unset_optionals() {
        let query = SchedulingQuery {
            doctor_id: "d1".into(),
            patient_id: "p1".into(),
            problem: None,
            date: None,
        };
        let json = serde_json::to_value(&query).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"doctor_id": "d1", "patient_id": "p1"})
        );
    }

    #[test]
    fn query_serializes_date_as_iso() {
        let query = SchedulingQuery {
            doctor_id: "d1".into(),
            patient_id: "p1".into(),
            problem: Some("Recurring migraines".into()),
            date: NaiveDate::from_ymd_opt(2025, 1, 10),
        };
        let json = serde_json::to_value(&query).unwrap();
        assert_eq!(json["date"], "2025-01-10");
        assert_eq!(json["problem"], "Recurring migraines");
    }
}
