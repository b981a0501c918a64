//! Service traits, wire types, and mock implementations.
//!
//! The controllers depend only on the traits here; the reqwest clients in
//! `http` and the mocks below are interchangeable behind them. Mocks live
//! beside the traits so every controller test can reuse them.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::BackendError;
use crate::models::{Doctor, Patient, SchedulingQuery, Severity, SuggestedSlot};

// ─── Wire types ───────────────────────────────────────────────────────────────

/// Body of a suggestion request. Built by the consultation controller
/// after validation, so severity is always present here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionRequest {
    pub severity: Severity,
    pub problem: String,
    pub symptoms: String,
}

/// The consultation context a follow-up question is scoped to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequestContext {
    pub severity: Severity,
    pub problem: String,
    pub symptoms: String,
    pub suggestion: String,
}

/// Body of a follow-up chat request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub context: ChatRequestContext,
}

/// Result of a slot-suggestion request: preference-ordered candidates plus
/// the service's optional explanation.
#[derive(Debug, Clone, Default)]
pub struct SlotSuggestions {
    pub slots: Vec<SuggestedSlot>,
    pub reasoning: Option<String>,
}

/// Acknowledgement from the booking collaborator, echoing the booked
/// instant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingConfirmation {
    pub slot: chrono::DateTime<chrono::Utc>,
}

// ─── Service traits ───────────────────────────────────────────────────────────

/// The inference service behind the symptom-intake workflow.
#[async_trait]
pub trait ConsultationApi: Send + Sync {
    /// Turn a validated complaint into a treatment suggestion.
    async fn suggest(&self, request: &SuggestionRequest) -> Result<String, BackendError>;

    /// Answer a follow-up question scoped to the current consultation.
    async fn chat(&self, request: &ChatRequest) -> Result<String, BackendError>;
}

/// The directory + slot-suggestion service behind the scheduling workflow.
#[async_trait]
pub trait SchedulingApi: Send + Sync {
    async fn list_doctors(&self) -> Result<Vec<Doctor>, BackendError>;

    async fn list_patients(&self) -> Result<Vec<Patient>, BackendError>;

    async fn suggest_slots(
        &self,
        query: &SchedulingQuery,
    ) -> Result<SlotSuggestions, BackendError>;
}

/// The booking collaborator. The core's state machine is identical whether
/// this is the simulated implementation or a real backend.
#[async_trait]
pub trait BookingApi: Send + Sync {
    async fn book(&self, slot: &SuggestedSlot) -> Result<BookingConfirmation, BackendError>;
}

// ─── Mocks ────────────────────────────────────────────────────────────────────

fn mock_failure() -> BackendError {
    BackendError::Connection("mock://unreachable".into())
}

/// Mock consultation service: configurable responses, call counters, and
/// capture of the last chat request for context assertions.
pub struct MockConsultationApi {
    suggestion: String,
    reply: String,
    fail_suggest: bool,
    fail_chat: bool,
    suggest_calls: AtomicUsize,
    chat_calls: AtomicUsize,
    last_chat_request: Mutex<Option<ChatRequest>>,
}

impl MockConsultationApi {
    pub fn new(suggestion: &str, reply: &str) -> Self {
        Self {
            suggestion: suggestion.to_string(),
            reply: reply.to_string(),
            fail_suggest: false,
            fail_chat: false,
            suggest_calls: AtomicUsize::new(0),
            chat_calls: AtomicUsize::new(0),
            last_chat_request: Mutex::new(None),
        }
    }

    pub fn failing() -> Self {
        let mut mock = Self::new("", "");
        mock.fail_suggest = true;
        mock.fail_chat = true;
        mock
    }

    pub fn with_failing_chat(mut self) -> Self {
        self.fail_chat = true;
        self
    }

    pub fn suggest_calls(&self) -> usize {
        self.suggest_calls.load(Ordering::SeqCst)
    }

    pub fn chat_calls(&self) -> usize {
        self.chat_calls.load(Ordering::SeqCst)
    }

    pub fn last_chat_request(&self) -> Option<ChatRequest> {
        self.last_chat_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl ConsultationApi for MockConsultationApi {
    async fn suggest(&self, _request: &SuggestionRequest) -> Result<String, BackendError> {
        self.suggest_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_suggest {
            return Err(mock_failure());
        }
        Ok(self.suggestion.clone())
    }

    async fn chat(&self, request: &ChatRequest) -> Result<String, BackendError> {
        self.chat_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_chat_request.lock().unwrap() = Some(request.clone());
        if self.fail_chat {
            return Err(mock_failure());
        }
        Ok(self.reply.clone())
    }
}

/// Mock scheduling service with a fixed directory and slot list.
pub struct MockSchedulingApi {
    doctors: Vec<Doctor>,
    patients: Vec<Patient>,
    suggestions: SlotSuggestions,
    fail_doctors: bool,
    fail_patients: bool,
    fail_slots: bool,
    slot_calls: AtomicUsize,
    last_query: Mutex<Option<SchedulingQuery>>,
}

impl MockSchedulingApi {
    pub fn new(doctors: Vec<Doctor>, patients: Vec<Patient>) -> Self {
        Self {
            doctors,
            patients,
            suggestions: SlotSuggestions::default(),
            fail_doctors: false,
            fail_patients: false,
            fail_slots: false,
            slot_calls: AtomicUsize::new(0),
            last_query: Mutex::new(None),
        }
    }

    pub fn with_slots(mut self, slots: Vec<SuggestedSlot>, reasoning: Option<&str>) -> Self {
        self.suggestions = SlotSuggestions {
            slots,
            reasoning: reasoning.map(str::to_string),
        };
        self
    }

    pub fn with_failing_doctors(mut self) -> Self {
        self.fail_doctors = true;
        self
    }

    pub fn with_failing_patients(mut self) -> Self {
        self.fail_patients = true;
        self
    }

    pub fn with_failing_slots(mut self) -> Self {
        self.fail_slots = true;
        self
    }

    pub fn slot_calls(&self) -> usize {
        self.slot_calls.load(Ordering::SeqCst)
    }

    pub fn last_query(&self) -> Option<SchedulingQuery> {
        self.last_query.lock().unwrap().clone()
    }
}

#[async_trait]
impl SchedulingApi for MockSchedulingApi {
    async fn list_doctors(&self) -> Result<Vec<Doctor>, BackendError> {
        if self.fail_doctors {
            return Err(mock_failure());
        }
        Ok(self.doctors.clone())
    }

    async fn list_patients(&self) -> Result<Vec<Patient>, BackendError> {
        if self.fail_patients {
            return Err(mock_failure());
        }
        Ok(self.patients.clone())
    }

    async fn suggest_slots(
        &self,
        query: &SchedulingQuery,
    ) -> Result<SlotSuggestions, BackendError> {
        self.slot_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_query.lock().unwrap() = Some(query.clone());
        if self.fail_slots {
            return Err(mock_failure());
        }
        Ok(self.suggestions.clone())
    }
}

/// Mock booking collaborator.
pub struct MockBookingApi {
    fail: bool,
    calls: AtomicUsize,
}

impl MockBookingApi {
    pub fn new() -> Self {
        Self {
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockBookingApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BookingApi for MockBookingApi {
    async fn book(&self, slot: &SuggestedSlot) -> Result<BookingConfirmation, BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(mock_failure());
        }
        Ok(BookingConfirmation {
            slot: slot.datetime,
        })
    }
}
