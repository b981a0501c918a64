//! Consultation session controller.
//!
//! Owns the intake fields, the suggestion, the user-facing error, and the
//! follow-up transcript. Sole issuer of suggest/chat calls for its
//! workflow; the chat sub-flow is reachable only once a suggestion exists.

use crate::backend::{ChatRequestContext, ConsultationApi, SuggestionRequest};
use crate::models::{ChatMessage, ConsultationContext};

use super::chat::ChatThread;
use super::ConsultationError;

/// Local validation failure, surfaced before any network call.
pub const MSG_FILL_ALL_FIELDS: &str = "Please fill in all fields";

/// Generic user-facing message for a failed suggestion request.
pub const MSG_SUGGESTION_FAILED: &str = "Failed to fetch suggestion. Please try again.";

/// Where the session is in its request lifecycle. Validation is the
/// synchronous fail-fast step inside `submit`, so it has no observable
/// phase of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsultationPhase {
    Idle,
    Requesting,
    Suggested,
}

/// One symptom-intake session: from empty form to suggestion to follow-up
/// dialogue, until the next reset.
#[derive(Debug)]
pub struct ConsultationSession {
    context: ConsultationContext,
    phase: ConsultationPhase,
    suggestion: Option<String>,
    error: Option<String>,
    chat: ChatThread,
}

impl ConsultationSession {
    pub fn new() -> Self {
        Self {
            context: ConsultationContext::default(),
            phase: ConsultationPhase::Idle,
            suggestion: None,
            error: None,
            chat: ChatThread::new(),
        }
    }

    // ── State reads ──────────────────────────────────────

    pub fn context(&self) -> &ConsultationContext {
        &self.context
    }

    /// Direct edit access for the intake fields.
    pub fn context_mut(&mut self) -> &mut ConsultationContext {
        &mut self.context
    }

    pub fn phase(&self) -> ConsultationPhase {
        self.phase
    }

    /// True while a suggestion request is outstanding. UIs disable the
    /// submit control for the duration; a concurrent submit is rejected
    /// either way.
    pub fn is_requesting(&self) -> bool {
        self.phase == ConsultationPhase::Requesting
    }

    pub fn suggestion(&self) -> Option<&str> {
        self.suggestion.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        self.chat.messages()
    }

    pub fn chat(&self) -> &ChatThread {
        &self.chat
    }

    // ── Operations ───────────────────────────────────────

    /// Request a suggestion for the current intake fields.
    ///
    /// Fails fast with a validation error when any field is empty; no
    /// remote call is issued. Valid input clears the prior error and
    /// transcript (its validity was scoped to the previous
    /// context/suggestion pair), then issues exactly one suggest call.
    pub async fn submit<A: ConsultationApi + ?Sized>(
        &mut self,
        api: &A,
    ) -> Result<(), ConsultationError> {
        if self.phase == ConsultationPhase::Requesting {
            return Err(ConsultationError::RequestInFlight);
        }

        let Some(severity) = self.context.severity else {
            self.error = Some(MSG_FILL_ALL_FIELDS.to_string());
            return Err(ConsultationError::MissingFields);
        };
        if !self.context.is_complete() {
            self.error = Some(MSG_FILL_ALL_FIELDS.to_string());
            return Err(ConsultationError::MissingFields);
        }

        self.error = None;
        self.chat.clear();
        self.phase = ConsultationPhase::Requesting;

        let request = SuggestionRequest {
            severity,
            problem: self.context.problem.clone(),
            symptoms: self.context.symptoms.clone(),
        };
        tracing::info!(severity = severity.as_str(), "requesting suggestion");

        match api.suggest(&request).await {
            Ok(text) => {
                self.suggestion = Some(text);
                self.phase = ConsultationPhase::Suggested;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "suggestion request failed");
                self.error = Some(MSG_SUGGESTION_FAILED.to_string());
                // Back to the pre-request state: a suggestion already held
                // from an earlier cycle is not discarded by this failure.
                self.phase = if self.suggestion.is_some() {
                    ConsultationPhase::Suggested
                } else {
                    ConsultationPhase::Idle
                };
                Err(e.into())
            }
        }
    }

    /// Ask a follow-up question about the current suggestion.
    ///
    /// Only reachable once a suggestion exists. Empty text is a silent
    /// no-op; everything else appends a user message immediately and an
    /// assistant message (reply or fallback) when the call completes.
    pub async fn ask<A: ConsultationApi + ?Sized>(
        &mut self,
        api: &A,
        text: &str,
    ) -> Result<(), ConsultationError> {
        if self.phase != ConsultationPhase::Suggested {
            return Err(ConsultationError::NotSuggested);
        }
        let (Some(suggestion), Some(severity)) =
            (self.suggestion.as_ref(), self.context.severity)
        else {
            return Err(ConsultationError::NotSuggested);
        };

        let context = ChatRequestContext {
            severity,
            problem: self.context.problem.clone(),
            symptoms: self.context.symptoms.clone(),
            suggestion: suggestion.clone(),
        };

        self.chat.ask(api, text, context).await
    }

    /// Clear fields, suggestion, error, and transcript unconditionally.
    /// Always available, in any phase.
    pub fn reset(&mut self) {
        self.context.clear();
        self.suggestion = None;
        self.error = None;
        self.chat.clear();
        self.phase = ConsultationPhase::Idle;
    }
}

impl Default for ConsultationSession {
    fn default() -> Self {
        Self::new()
    }
}
