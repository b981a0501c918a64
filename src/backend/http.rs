//! Reqwest implementations of the service traits, plus the simulated
//! booking collaborator.
//!
//! Error mapping mirrors how the transport classifies failures: connect
//! errors, timeouts, non-2xx statuses, and undecodable bodies each get
//! their own `BackendError` variant so the controllers can surface the
//! right user-facing message.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use super::types::{
    BookingApi, BookingConfirmation, ChatRequest, ConsultationApi, SchedulingApi,
    SlotSuggestions, SuggestionRequest,
};
use super::BackendError;
use crate::config::BackendConfig;
use crate::models::{Doctor, Patient, SchedulingQuery, SuggestedSlot};

fn build_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .expect("Failed to create HTTP client")
}

fn map_transport(e: reqwest::Error, base_url: &str, timeout_secs: u64) -> BackendError {
    if e.is_connect() {
        BackendError::Connection(base_url.to_string())
    } else if e.is_timeout() {
        BackendError::Timeout(timeout_secs)
    } else {
        BackendError::ResponseParsing(e.to_string())
    }
}

async fn into_checked(response: reqwest::Response) -> Result<reqwest::Response, BackendError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(BackendError::Http {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response)
}

// ─── Consultation service ─────────────────────────────────────────────────────

/// HTTP client for the consultation assistant (suggest + chat).
pub struct HttpConsultationClient {
    base_url: String,
    client: reqwest::Client,
    timeout_secs: u64,
}

impl HttpConsultationClient {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: build_client(timeout),
            timeout_secs: timeout.as_secs(),
        }
    }

    pub fn from_config(config: &BackendConfig) -> Self {
        Self::new(&config.assistant_url, config.timeout)
    }
}

/// Response body from POST /suggest. The service echoes an assembled
/// context string alongside the suggestion; the core ignores it.
#[derive(Deserialize)]
struct SuggestResponse {
    suggestion: String,
    #[allow(dead_code)]
    context: Option<String>,
}

/// Response body from POST /chat.
#[derive(Deserialize)]
struct ChatResponse {
    reply: String,
}

#[async_trait]
impl ConsultationApi for HttpConsultationClient {
    async fn suggest(&self, request: &SuggestionRequest) -> Result<String, BackendError> {
        let url = format!("{}/suggest", self.base_url);
        tracing::debug!(url = %url, severity = request.severity.as_str(), "suggest request");

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| map_transport(e, &self.base_url, self.timeout_secs))?;

        let parsed: SuggestResponse = into_checked(response)
            .await?
            .json()
            .await
            .map_err(|e| BackendError::ResponseParsing(e.to_string()))?;

        Ok(parsed.suggestion)
    }

    async fn chat(&self, request: &ChatRequest) -> Result<String, BackendError> {
        let url = format!("{}/chat", self.base_url);
        tracing::debug!(url = %url, "chat request");

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| map_transport(e, &self.base_url, self.timeout_secs))?;

        let parsed: ChatResponse = into_checked(response)
            .await?
            .json()
            .await
            .map_err(|e| BackendError::ResponseParsing(e.to_string()))?;

        Ok(parsed.reply)
    }
}

// ─── Scheduling service ───────────────────────────────────────────────────────

/// HTTP client for the scheduling service (directory + slot suggestions).
pub struct HttpSchedulingClient {
    base_url: String,
    client: reqwest::Client,
    timeout_secs: u64,
}

impl HttpSchedulingClient {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: build_client(timeout),
            timeout_secs: timeout.as_secs(),
        }
    }

    pub fn from_config(config: &BackendConfig) -> Self {
        Self::new(&config.scheduler_url, config.timeout)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<T, BackendError> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| map_transport(e, &self.base_url, self.timeout_secs))?;

        into_checked(response)
            .await?
            .json()
            .await
            .map_err(|e| BackendError::ResponseParsing(e.to_string()))
    }
}

/// Response body from POST /api/suggest. `slots` may be absent entirely
/// when the service has nothing to offer.
#[derive(Deserialize)]
struct SlotsResponse {
    #[serde(default)]
    slots: Vec<SuggestedSlot>,
    reasoning: Option<String>,
}

#[async_trait]
impl SchedulingApi for HttpSchedulingClient {
    async fn list_doctors(&self) -> Result<Vec<Doctor>, BackendError> {
        self.get_json("/api/doctors").await
    }

    async fn list_patients(&self) -> Result<Vec<Patient>, BackendError> {
        self.get_json("/api/patients").await
    }

    async fn suggest_slots(
        &self,
        query: &SchedulingQuery,
    ) -> Result<SlotSuggestions, BackendError> {
        let url = format!("{}/api/suggest", self.base_url);
        tracing::debug!(url = %url, doctor = %query.doctor_id, patient = %query.patient_id, "slot request");

        let response = self
            .client
            .post(&url)
            .json(query)
            .send()
            .await
            .map_err(|e| map_transport(e, &self.base_url, self.timeout_secs))?;

        let parsed: SlotsResponse = into_checked(response)
            .await?
            .json()
            .await
            .map_err(|e| BackendError::ResponseParsing(e.to_string()))?;

        Ok(SlotSuggestions {
            slots: parsed.slots,
            reasoning: parsed.reasoning,
        })
    }
}

// ─── Booking collaborator ─────────────────────────────────────────────────────

/// Simulated booking backend: waits a moment, then confirms.
///
/// No booking-commit API is contracted yet; this stands in behind the
/// same trait a real backend would implement.
pub struct SimulatedBooking {
    delay: Duration,
}

impl SimulatedBooking {
    pub fn new() -> Self {
        Self {
            delay: Duration::from_secs(1),
        }
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for SimulatedBooking {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BookingApi for SimulatedBooking {
    async fn book(&self, slot: &SuggestedSlot) -> Result<BookingConfirmation, BackendError> {
        tokio::time::sleep(self.delay).await;
        tracing::info!(slot = %slot.datetime, "simulated booking confirmed");
        Ok(BookingConfirmation {
            slot: slot.datetime,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consultation_client_trims_trailing_slash() {
        let client = HttpConsultationClient::new(
            "http://localhost:5001/",
            Duration::from_secs(30),
        );
        assert_eq!(client.base_url, "http://localhost:5001");
        assert_eq!(client.timeout_secs, 30);
    }

    #[test]
    fn scheduling_client_from_config() {
        let client = HttpSchedulingClient::from_config(&BackendConfig::default());
        assert_eq!(client.base_url, "http://localhost:5002");
        assert_eq!(client.timeout_secs, 60);
    }

    #[tokio::test]
    async fn simulated_booking_confirms() {
        let backend = SimulatedBooking::with_delay(Duration::ZERO);
        let slot = SuggestedSlot::at("2025-01-10T09:00:00Z".parse().unwrap());
        let confirmation = backend.book(&slot).await.unwrap();
        assert_eq!(confirmation.slot, slot.datetime);
    }

    #[test]
    fn slots_response_tolerates_missing_slots() {
        let parsed: SlotsResponse = serde_json::from_str(r#"{"reasoning": "fully booked"}"#).unwrap();
        assert!(parsed.slots.is_empty());
        assert_eq!(parsed.reasoning.as_deref(), Some("fully booked"));
    }
}
