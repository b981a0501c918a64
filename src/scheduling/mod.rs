pub mod booking;
pub mod directory;
pub mod session;

use thiserror::Error;

use crate::backend::BackendError;

pub use booking::BookingState;
pub use directory::Directory;
pub use session::{
    SchedulingPhase, SchedulingSession, MSG_BOOKING_FAILED, MSG_DIRECTORY_FAILED, MSG_NO_SLOTS,
    MSG_SELECT_BOTH, MSG_SLOTS_FAILED,
};

#[derive(Debug, Error)]
pub enum SchedulingError {
    #[error("Please select both doctor and patient")]
    NoSelection,

    #[error("Unknown doctor: {0}")]
    UnknownDoctor(String),

    #[error("Unknown patient: {0}")]
    UnknownPatient(String),

    #[error("A request is already in flight")]
    RequestInFlight,

    #[error("Slot is not among the current suggestions")]
    SlotNotOffered,

    #[error("An appointment is already booked for this cycle")]
    AlreadyBooked,

    #[error("A booking is already in progress")]
    BookingInProgress,

    #[error(transparent)]
    Backend(#[from] BackendError),
}
