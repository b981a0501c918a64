pub mod http;
pub mod types;

use thiserror::Error;

pub use http::{HttpConsultationClient, HttpSchedulingClient, SimulatedBooking};
pub use types::{
    BookingApi, BookingConfirmation, ChatRequest, ChatRequestContext, ConsultationApi,
    MockBookingApi, MockConsultationApi, MockSchedulingApi, SchedulingApi, SlotSuggestions,
    SuggestionRequest,
};

/// Transport-level failures at the remote service boundary.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Cannot reach service at {0}")]
    Connection(String),

    #[error("Request timed out after {0}s")]
    Timeout(u64),

    #[error("Service returned {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Response parsing error: {0}")]
    ResponseParsing(String),
}
