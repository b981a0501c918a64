//! Scheduling session controller.
//!
//! Owns the selection (doctor/patient/problem/date), issues the
//! slot-suggestion request, holds the ranked candidates and the service's
//! reasoning, and drives the booking sub-flow. Booking becomes reachable
//! only once a slot list exists.

use chrono::NaiveDate;

use crate::backend::{BookingApi, SchedulingApi};
use crate::models::{Doctor, Patient, SchedulingQuery, SuggestedSlot};

use super::booking::BookingState;
use super::directory::Directory;
use super::SchedulingError;

/// Local validation failure for an incomplete selection.
pub const MSG_SELECT_BOTH: &str = "Please select both doctor and patient";

/// Advisory for a successful response carrying zero slots. Not an error.
pub const MSG_NO_SLOTS: &str = "No available slots found for the selected doctor and patient";

/// Generic prefix for a failed slot request; the failure detail follows.
pub const MSG_SLOTS_FAILED: &str = "Failed to get suggestions";

/// User-facing message for a failed booking call.
pub const MSG_BOOKING_FAILED: &str = "Failed to book appointment";

/// Aggregate message for a failed directory load.
pub const MSG_DIRECTORY_FAILED: &str = "Failed to load doctors and patients";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulingPhase {
    Idle,
    Suggesting,
    SlotsReady,
}

/// One scheduling session: directory load, slot query cycles, and at most
/// one confirmed booking per cycle.
#[derive(Debug)]
pub struct SchedulingSession {
    directory: Option<Directory>,
    selected_doctor_id: Option<String>,
    selected_patient_id: Option<String>,
    problem: String,
    preferred_date: Option<NaiveDate>,
    phase: SchedulingPhase,
    slots: Vec<SuggestedSlot>,
    reasoning: Option<String>,
    advisory: Option<String>,
    error: Option<String>,
    booking: BookingState,
}

impl SchedulingSession {
    pub fn new() -> Self {
        Self {
            directory: None,
            selected_doctor_id: None,
            selected_patient_id: None,
            problem: String::new(),
            preferred_date: None,
            phase: SchedulingPhase::Idle,
            slots: Vec::new(),
            reasoning: None,
            advisory: None,
            error: None,
            booking: BookingState::default(),
        }
    }

    // ── State reads ──────────────────────────────────────

    pub fn directory(&self) -> Option<&Directory> {
        self.directory.as_ref()
    }

    pub fn selected_doctor_id(&self) -> Option<&str> {
        self.selected_doctor_id.as_deref()
    }

    pub fn selected_patient_id(&self) -> Option<&str> {
        self.selected_patient_id.as_deref()
    }

    pub fn selected_doctor(&self) -> Option<&Doctor> {
        let directory = self.directory.as_ref()?;
        directory.doctor(self.selected_doctor_id.as_deref()?)
    }

    pub fn selected_patient(&self) -> Option<&Patient> {
        let directory = self.directory.as_ref()?;
        directory.patient(self.selected_patient_id.as_deref()?)
    }

    pub fn phase(&self) -> SchedulingPhase {
        self.phase
    }

    /// True while a slot request is outstanding. UIs disable the request
    /// control for the duration; a concurrent request is rejected either
    /// way.
    pub fn is_suggesting(&self) -> bool {
        self.phase == SchedulingPhase::Suggesting
    }

    /// Candidate slots in preference order, highest first.
    pub fn slots(&self) -> &[SuggestedSlot] {
        &self.slots
    }

    pub fn reasoning(&self) -> Option<&str> {
        self.reasoning.as_deref()
    }

    /// Set alongside an otherwise-successful response with zero slots.
    pub fn advisory(&self) -> Option<&str> {
        self.advisory.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn booking(&self) -> &BookingState {
        &self.booking
    }

    // ── Selection edits ──────────────────────────────────

    pub fn select_doctor(&mut self, id: &str) {
        self.selected_doctor_id = Some(id.to_string());
    }

    pub fn select_patient(&mut self, id: &str) {
        self.selected_patient_id = Some(id.to_string());
    }

    pub fn set_problem(&mut self, text: &str) {
        self.problem = text.to_string();
    }

    pub fn set_preferred_date(&mut self, date: Option<NaiveDate>) {
        self.preferred_date = date;
    }

    // ── Operations ───────────────────────────────────────

    /// Load the doctor/patient directory, both reads issued concurrently.
    ///
    /// On success the first entry of each list becomes the default
    /// selection. On failure of either read the session holds no directory
    /// at all and a single aggregate error; there is no automatic retry.
    pub async fn load_directory<A: SchedulingApi + ?Sized>(
        &mut self,
        api: &A,
    ) -> Result<(), SchedulingError> {
        match Directory::load(api).await {
            Ok(directory) => {
                self.selected_doctor_id = directory.default_doctor_id().map(str::to_string);
                self.selected_patient_id = directory.default_patient_id().map(str::to_string);
                self.directory = Some(directory);
                self.error = None;
                Ok(())
            }
            Err(e) => {
                self.directory = None;
                self.selected_doctor_id = None;
                self.selected_patient_id = None;
                tracing::error!(error = %e, "directory load failed");
                self.error = Some(format!("{MSG_DIRECTORY_FAILED}: {e}"));
                Err(e)
            }
        }
    }

    /// Request slot suggestions for the current selection.
    ///
    /// Fails fast without a remote call when either id is unset or not in
    /// the loaded directory. A fresh query clears prior slots, reasoning,
    /// advisory, and the booking state before the request resolves, so
    /// stale candidates never coexist with new criteria.
    pub async fn request_slots<A: SchedulingApi + ?Sized>(
        &mut self,
        api: &A,
    ) -> Result<(), SchedulingError> {
        if self.phase == SchedulingPhase::Suggesting {
            return Err(SchedulingError::RequestInFlight);
        }

        let (Some(doctor_id), Some(patient_id)) = (
            self.selected_doctor_id.clone(),
            self.selected_patient_id.clone(),
        ) else {
            self.error = Some(MSG_SELECT_BOTH.to_string());
            return Err(SchedulingError::NoSelection);
        };

        if !self
            .directory
            .as_ref()
            .is_some_and(|d| d.contains_doctor(&doctor_id))
        {
            let err = SchedulingError::UnknownDoctor(doctor_id);
            self.error = Some(err.to_string());
            return Err(err);
        }
        if !self
            .directory
            .as_ref()
            .is_some_and(|d| d.contains_patient(&patient_id))
        {
            let err = SchedulingError::UnknownPatient(patient_id);
            self.error = Some(err.to_string());
            return Err(err);
        }

        self.error = None;
        self.advisory = None;
        self.slots.clear();
        self.reasoning = None;
        self.booking.reset();
        self.phase = SchedulingPhase::Suggesting;

        let problem = self.problem.trim();
        let query = SchedulingQuery {
            doctor_id,
            patient_id,
            problem: (!problem.is_empty()).then(|| problem.to_string()),
            date: self.preferred_date,
        };
        tracing::info!(doctor = %query.doctor_id, patient = %query.patient_id, "requesting slots");

        match api.suggest_slots(&query).await {
            Ok(suggestions) => {
                self.slots = suggestions.slots;
                self.reasoning = suggestions.reasoning;
                self.phase = SchedulingPhase::SlotsReady;
                if self.slots.is_empty() {
                    tracing::warn!("slot request succeeded with zero candidates");
                    self.advisory = Some(MSG_NO_SLOTS.to_string());
                }
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "slot request failed");
                self.slots.clear();
                self.reasoning = None;
                self.error = Some(format!("{MSG_SLOTS_FAILED}: {e}"));
                self.phase = SchedulingPhase::Idle;
                Err(e.into())
            }
        }
    }

    /// Book one of the currently suggested slots.
    ///
    /// Rejected without side effects when a booking is in progress,
    /// already confirmed this cycle, or the slot is not among the current
    /// suggestions. A failed collaborator call leaves the slot offerable
    /// for a retry.
    pub async fn book<B: BookingApi + ?Sized>(
        &mut self,
        api: &B,
        slot: &SuggestedSlot,
    ) -> Result<(), SchedulingError> {
        if self.booking.is_in_progress() {
            return Err(SchedulingError::BookingInProgress);
        }
        if self.booking.is_confirmed() {
            return Err(SchedulingError::AlreadyBooked);
        }
        if !self.slots.iter().any(|s| s.datetime == slot.datetime) {
            return Err(SchedulingError::SlotNotOffered);
        }

        self.booking.begin();
        match api.book(slot).await {
            Ok(confirmation) => {
                tracing::info!(slot = %confirmation.slot, "booking confirmed");
                self.booking.confirm(slot.clone());
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "booking failed");
                self.booking.abort();
                self.error = Some(MSG_BOOKING_FAILED.to_string());
                Err(e.into())
            }
        }
    }
}

impl Default for SchedulingSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::types::{MockBookingApi, MockSchedulingApi};

    fn doctor(id: &str) -> Doctor {
        Doctor {
            id: id.into(),
            name: "Chen".into(),
            specialty: "GP".into(),
            availability: vec!["Mon 9-12".into()],
            avg_consultation_time: Some(20),
        }
    }

    fn patient(id: &str) -> Patient {
        Patient {
            id: id.into(),
            name: "Alice".into(),
            priority: None,
            last_appointment: None,
            frequent_bookings: None,
        }
    }

    fn slot(s: &str) -> SuggestedSlot {
        SuggestedSlot::at(s.parse().unwrap())
    }

    fn two_slots() -> Vec<SuggestedSlot> {
        vec![slot("2025-01-10T09:00:00Z"), slot("2025-01-10T10:00:00Z")]
    }

    async fn ready_session(api: &MockSchedulingApi) -> SchedulingSession {
        let mut session = SchedulingSession::new();
        session.load_directory(api).await.unwrap();
        session
    }

    #[tokio::test]
    async fn directory_load_preselects_defaults() {
        let api = MockSchedulingApi::new(vec![doctor("d1")], vec![patient("p1")]);
        let session = ready_session(&api).await;

        assert_eq!(session.selected_doctor_id(), Some("d1"));
        assert_eq!(session.selected_patient_id(), Some("p1"));
        assert_eq!(session.selected_doctor().unwrap().name, "Chen");
    }

    #[tokio::test]
    async fn directory_load_failure_leaves_nothing_trusted() {
        let api = MockSchedulingApi::new(vec![doctor("d1")], vec![patient("p1")])
            .with_failing_patients();
        let mut session = SchedulingSession::new();

        assert!(session.load_directory(&api).await.is_err());
        assert!(session.directory().is_none());
        assert!(session.selected_doctor_id().is_none());
        assert!(session.selected_patient_id().is_none());
        assert!(session.error().unwrap().starts_with(MSG_DIRECTORY_FAILED));
    }

    #[tokio::test]
    async fn request_slots_with_unset_selection_never_calls_service() {
        let api = MockSchedulingApi::new(vec![], vec![]);
        let mut session = SchedulingSession::new();

        let err = session.request_slots(&api).await.unwrap_err();
        assert!(matches!(err, SchedulingError::NoSelection));
        assert_eq!(session.error(), Some(MSG_SELECT_BOTH));
        assert_eq!(api.slot_calls(), 0);
    }

    #[tokio::test]
    async fn request_slots_with_unknown_doctor_never_calls_service() {
        let api = MockSchedulingApi::new(vec![doctor("d1")], vec![patient("p1")]);
        let mut session = ready_session(&api).await;
        session.select_doctor("d9");

        let err = session.request_slots(&api).await.unwrap_err();
        assert!(matches!(err, SchedulingError::UnknownDoctor(_)));
        assert_eq!(api.slot_calls(), 0);
    }

    #[tokio::test]
    async fn request_slots_success_replaces_slots_and_reasoning() {
        let api = MockSchedulingApi::new(vec![doctor("d1")], vec![patient("p1")])
            .with_slots(two_slots(), Some("Mornings suit this patient"));
        let mut session = ready_session(&api).await;

        session.request_slots(&api).await.unwrap();

        assert_eq!(session.phase(), SchedulingPhase::SlotsReady);
        assert_eq!(session.slots().len(), 2);
        assert_eq!(session.reasoning(), Some("Mornings suit this patient"));
        assert!(session.advisory().is_none());
        assert!(session.error().is_none());
        assert_eq!(api.slot_calls(), 1);
    }

    #[tokio::test]
    async fn query_omits_empty_problem_and_date() {
        let api = MockSchedulingApi::new(vec![doctor("d1")], vec![patient("p1")])
            .with_slots(two_slots(), None);
        let mut session = ready_session(&api).await;
        session.set_problem("   ");

        session.request_slots(&api).await.unwrap();

        let query = api.last_query().unwrap();
        assert_eq!(query.doctor_id, "d1");
        assert!(query.problem.is_none());
        assert!(query.date.is_none());
    }

    #[tokio::test]
    async fn query_carries_problem_and_date_when_set() {
        let api = MockSchedulingApi::new(vec![doctor("d1")], vec![patient("p1")])
            .with_slots(two_slots(), None);
        let mut session = ready_session(&api).await;
        session.set_problem("recurring migraines");
        session.set_preferred_date(NaiveDate::from_ymd_opt(2025, 1, 10));

        session.request_slots(&api).await.unwrap();

        let query = api.last_query().unwrap();
        assert_eq!(query.problem.as_deref(), Some("recurring migraines"));
        assert_eq!(query.date, NaiveDate::from_ymd_opt(2025, 1, 10));
    }

    #[tokio::test]
    async fn zero_slots_is_advisory_not_error() {
        let api = MockSchedulingApi::new(vec![doctor("d1")], vec![patient("p1")]);
        let mut session = ready_session(&api).await;

        session.request_slots(&api).await.unwrap();

        assert_eq!(session.phase(), SchedulingPhase::SlotsReady);
        assert!(session.slots().is_empty());
        assert_eq!(session.advisory(), Some(MSG_NO_SLOTS));
        assert!(session.error().is_none());
    }

    #[tokio::test]
    async fn failed_request_clears_slots_and_sets_detailed_error() {
        let ok_api = MockSchedulingApi::new(vec![doctor("d1")], vec![patient("p1")])
            .with_slots(two_slots(), Some("why"));
        let mut session = ready_session(&ok_api).await;
        session.request_slots(&ok_api).await.unwrap();

        let failing = MockSchedulingApi::new(vec![doctor("d1")], vec![patient("p1")])
            .with_failing_slots();
        let err = session.request_slots(&failing).await.unwrap_err();

        assert!(matches!(err, SchedulingError::Backend(_)));
        assert!(session.slots().is_empty());
        assert!(session.reasoning().is_none());
        assert_eq!(session.phase(), SchedulingPhase::Idle);
        let error = session.error().unwrap();
        assert!(error.starts_with(MSG_SLOTS_FAILED));
        assert!(error.contains("mock://unreachable"));
    }

    #[tokio::test]
    async fn fresh_query_resets_prior_booking() {
        let api = MockSchedulingApi::new(vec![doctor("d1")], vec![patient("p1")])
            .with_slots(two_slots(), None);
        let booking = MockBookingApi::new();
        let mut session = ready_session(&api).await;

        session.request_slots(&api).await.unwrap();
        let first = session.slots()[0].clone();
        session.book(&booking, &first).await.unwrap();
        assert!(session.booking().is_confirmed());

        session.request_slots(&api).await.unwrap();
        assert!(!session.booking().is_confirmed());
        assert!(session.booking().selected_slot().is_none());
    }

    #[tokio::test]
    async fn scenario_book_first_slot_then_second_is_rejected() {
        let api = MockSchedulingApi::new(vec![doctor("d1")], vec![patient("p1")])
            .with_slots(two_slots(), None);
        let booking = MockBookingApi::new();
        let mut session = ready_session(&api).await;
        session.request_slots(&api).await.unwrap();

        let first = session.slots()[0].clone();
        let second = session.slots()[1].clone();

        session.book(&booking, &first).await.unwrap();
        assert!(session.booking().is_confirmed());
        assert_eq!(
            session.booking().selected_slot().unwrap().datetime,
            first.datetime
        );

        let err = session.book(&booking, &second).await.unwrap_err();
        assert!(matches!(err, SchedulingError::AlreadyBooked));
        assert_eq!(booking.calls(), 1);
    }

    #[tokio::test]
    async fn booking_a_slot_not_offered_is_rejected() {
        let api = MockSchedulingApi::new(vec![doctor("d1")], vec![patient("p1")])
            .with_slots(two_slots(), None);
        let booking = MockBookingApi::new();
        let mut session = ready_session(&api).await;
        session.request_slots(&api).await.unwrap();

        let outsider = slot("2025-02-01T08:00:00Z");
        let err = session.book(&booking, &outsider).await.unwrap_err();

        assert!(matches!(err, SchedulingError::SlotNotOffered));
        assert_eq!(booking.calls(), 0);
        assert!(!session.booking().is_confirmed());
    }

    #[tokio::test]
    async fn failed_booking_leaves_slot_offerable_for_retry() {
        let api = MockSchedulingApi::new(vec![doctor("d1")], vec![patient("p1")])
            .with_slots(two_slots(), None);
        let mut session = ready_session(&api).await;
        session.request_slots(&api).await.unwrap();
        let first = session.slots()[0].clone();

        let failing = MockBookingApi::failing();
        let err = session.book(&failing, &first).await.unwrap_err();
        assert!(matches!(err, SchedulingError::Backend(_)));
        assert!(!session.booking().is_confirmed());
        assert_eq!(session.error(), Some(MSG_BOOKING_FAILED));

        let working = MockBookingApi::new();
        session.book(&working, &first).await.unwrap();
        assert!(session.booking().is_confirmed());
    }

    #[tokio::test]
    async fn confirmation_message_after_booking() {
        let api = MockSchedulingApi::new(vec![doctor("d1")], vec![patient("p1")])
            .with_slots(two_slots(), None);
        let booking = MockBookingApi::new();
        let mut session = ready_session(&api).await;
        session.request_slots(&api).await.unwrap();
        let first = session.slots()[0].clone();

        session.book(&booking, &first).await.unwrap();
        assert_eq!(
            session.booking().confirmation_message().as_deref(),
            Some("Appointment confirmed for Friday, January 10, 2025 at 9:00 AM")
        );
    }
}
