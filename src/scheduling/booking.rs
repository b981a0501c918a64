//! Booking sub-state, owned by the scheduling session.
//!
//! Transitions unset → selected → confirmed. Confirmation is terminal for
//! the scheduling cycle; only a fresh slot query resets it.

use crate::models::SuggestedSlot;

#[derive(Debug, Clone, Default)]
pub struct BookingState {
    selected_slot: Option<SuggestedSlot>,
    confirmed: bool,
    in_progress: bool,
}

impl BookingState {
    pub fn selected_slot(&self) -> Option<&SuggestedSlot> {
        self.selected_slot.as_ref()
    }

    pub fn is_confirmed(&self) -> bool {
        self.confirmed
    }

    /// True while the booking collaborator call is outstanding. Booking
    /// controls stay disabled for the duration.
    pub fn is_in_progress(&self) -> bool {
        self.in_progress
    }

    /// Human-readable confirmation line, present only once confirmed.
    pub fn confirmation_message(&self) -> Option<String> {
        if !self.confirmed {
            return None;
        }
        self.selected_slot
            .as_ref()
            .map(|slot| format!("Appointment confirmed for {}", slot.display()))
    }

    pub(crate) fn begin(&mut self) {
        self.in_progress = true;
    }

    pub(crate) fn confirm(&mut self, slot: SuggestedSlot) {
        self.selected_slot = Some(slot);
        self.confirmed = true;
        self.in_progress = false;
    }

    /// Failed collaborator call: nothing is selected, the slot remains
    /// offerable for a retry.
    pub(crate) fn abort(&mut self) {
        self.in_progress = false;
    }

    pub(crate) fn reset(&mut self) {
        self.selected_slot = None;
        self.confirmed = false;
        self.in_progress = false;
    }
}
