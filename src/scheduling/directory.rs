//! Doctor/patient reference directory.
//!
//! Loaded once per session: both lists are fetched concurrently and either
//! both are trusted or neither is. There is no partial-success state and
//! no automatic retry.

use crate::backend::SchedulingApi;
use crate::models::{Doctor, Patient};

use super::SchedulingError;

/// The loaded reference lists. Read-only for the session's lifetime.
#[derive(Debug, Clone)]
pub struct Directory {
    doctors: Vec<Doctor>,
    patients: Vec<Patient>,
}

impl Directory {
    /// Fetch doctors and patients concurrently and wait for both. A
    /// failure of either read fails the whole load.
    pub async fn load<A: SchedulingApi + ?Sized>(api: &A) -> Result<Self, SchedulingError> {
        let (doctors, patients) = tokio::try_join!(api.list_doctors(), api.list_patients())?;

        tracing::info!(
            doctors = doctors.len(),
            patients = patients.len(),
            "directory loaded"
        );
        Ok(Self { doctors, patients })
    }

    pub fn doctors(&self) -> &[Doctor] {
        &self.doctors
    }

    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    pub fn doctor(&self, id: &str) -> Option<&Doctor> {
        self.doctors.iter().find(|d| d.id == id)
    }

    pub fn patient(&self, id: &str) -> Option<&Patient> {
        self.patients.iter().find(|p| p.id == id)
    }

    pub fn contains_doctor(&self, id: &str) -> bool {
        self.doctor(id).is_some()
    }

    pub fn contains_patient(&self, id: &str) -> bool {
        self.patient(id).is_some()
    }

    /// Usability defaults: the first entry of each list, when non-empty.
    pub fn default_doctor_id(&self) -> Option<&str> {
        self.doctors.first().map(|d| d.id.as_str())
    }

    pub fn default_patient_id(&self) -> Option<&str> {
        self.patients.first().map(|p| p.id.as_str())
    }
}
