//! Follow-up chat sub-controller.
//!
//! Owns the ordered transcript of one consultation. Appends are two-phase:
//! the user entry is written synchronously before the network round-trip
//! and is never retracted; the assistant entry follows as either the
//! service reply or a fixed fallback. A transport failure therefore never
//! leaves the transcript visibly incomplete.

use crate::backend::{ChatRequest, ChatRequestContext, ConsultationApi};
use crate::models::ChatMessage;

use super::ConsultationError;

/// Shown in place of a reply when the follow-up call fails. Failures are
/// absorbed into the conversation, never surfaced as a banner error.
pub const CHAT_FALLBACK: &str = "Sorry, I couldn't process your question. Please try again.";

/// Append-only transcript plus the single-outstanding-request guard.
#[derive(Debug, Default)]
pub struct ChatThread {
    messages: Vec<ChatMessage>,
    pending: bool,
}

impl ChatThread {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages in conversation order (append order, not timestamp order).
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Whether an ask is awaiting its reply. UIs disable the input for the
    /// duration; a concurrent ask is rejected either way.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub(crate) fn clear(&mut self) {
        self.messages.clear();
        self.pending = false;
    }

    /// Send a follow-up question scoped to `context`.
    ///
    /// Empty (after trimming) text is a silent no-op: nothing appended, no
    /// request issued. Otherwise the transcript grows by exactly two
    /// entries, user first, whether the call succeeds or not.
    pub(crate) async fn ask<A: ConsultationApi + ?Sized>(
        &mut self,
        api: &A,
        text: &str,
        context: ChatRequestContext,
    ) -> Result<(), ConsultationError> {
        let message = text.trim();
        if message.is_empty() {
            return Ok(());
        }
        if self.pending {
            return Err(ConsultationError::RequestInFlight);
        }

        // Phase one: optimistic local append, before any network traffic.
        self.messages.push(ChatMessage::user(message));

        let request = ChatRequest {
            message: message.to_string(),
            context,
        };

        self.pending = true;
        let result = api.chat(&request).await;
        self.pending = false;

        // Phase two: reply or fallback, never a retraction.
        match result {
            Ok(reply) => self.messages.push(ChatMessage::assistant(&reply)),
            Err(e) => {
                tracing::warn!(error = %e, "follow-up failed, appending fallback");
                self.messages.push(ChatMessage::assistant(CHAT_FALLBACK));
            }
        }

        Ok(())
    }
}
