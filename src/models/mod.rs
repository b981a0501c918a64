pub mod chat;
pub mod consultation;
pub mod directory;
pub mod enums;
pub mod scheduling;

pub use chat::ChatMessage;
pub use consultation::ConsultationContext;
pub use directory::{Doctor, Patient};
pub use enums::{MessageRole, PatientPriority, Severity};
pub use scheduling::{SchedulingQuery, SuggestedSlot};
