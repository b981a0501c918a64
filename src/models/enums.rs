use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Returned when a string does not match any enum variant.
#[derive(Debug, Error)]
#[error("Invalid {field}: '{value}'")]
pub struct InvalidEnum {
    pub field: String,
    pub value: String,
}

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = InvalidEnum;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(Severity {
    Mild => "mild",
    Moderate => "moderate",
    Severe => "severe",
    Critical => "critical",
});

impl Severity {
    /// Human-readable label shown in the severity selector.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Mild => "Mild - Minor discomfort",
            Self::Moderate => "Moderate - Noticeable symptoms",
            Self::Severe => "Severe - Significant impact",
            Self::Critical => "Critical - Emergency situation",
        }
    }
}

str_enum!(MessageRole {
    User => "user",
    Assistant => "assistant",
});

/// Patient triage priority. Unknown wire values normalize to Routine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum PatientPriority {
    Urgent,
    Chronic,
    Routine,
}

impl PatientPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Urgent => "urgent",
            Self::Chronic => "chronic",
            Self::Routine => "routine",
        }
    }
}

impl From<String> for PatientPriority {
    fn from(s: String) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "urgent" => Self::Urgent,
            "chronic" => Self::Chronic,
            _ => Self::Routine,
        }
    }
}

impl Serialize for PatientPriority {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
