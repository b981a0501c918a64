pub mod chat;
pub mod session;

use thiserror::Error;

use crate::backend::BackendError;

pub use chat::{ChatThread, CHAT_FALLBACK};
pub use session::{ConsultationPhase, ConsultationSession, MSG_FILL_ALL_FIELDS, MSG_SUGGESTION_FAILED};

#[derive(Debug, Error)]
pub enum ConsultationError {
    #[error("Please fill in all fields")]
    MissingFields,

    #[error("A request is already in flight")]
    RequestInFlight,

    #[error("Chat is unavailable until a suggestion exists")]
    NotSuggested,

    #[error(transparent)]
    Backend(#[from] BackendError),
}
