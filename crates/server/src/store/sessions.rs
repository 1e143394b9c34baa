//! In-memory session store.
//!
//! All state is session-scoped and lost on restart. Sessions are keyed by
//! patient id and never share mutable data with each other, so a single map
//! behind an RwLock is sufficient.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use setu_core::{AcceptedDiagnosis, DiagnosisEntry, PatientRecord, Session};

use crate::error::AppError;

/// Store for active patient sessions
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<String, Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session for a patient. At most one session per patient id.
    pub fn create(&self, patient: PatientRecord) -> Result<(), AppError> {
        let mut sessions = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let id = patient.id().to_owned();
        if sessions.contains_key(&id) {
            return Err(AppError::Conflict(format!(
                "Session/{id} is already active"
            )));
        }
        sessions.insert(id, Session::new(patient));
        Ok(())
    }

    /// Snapshot of a session, if one is active for this id.
    pub fn get(&self, id: &str) -> Option<Session> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    /// Append an accepted diagnosis to the front of a session's history.
    pub fn accept(
        &self,
        id: &str,
        entry: DiagnosisEntry,
        now: DateTime<Utc>,
    ) -> Result<AcceptedDiagnosis, AppError> {
        let mut sessions = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let session = sessions
            .get_mut(id)
            .ok_or_else(|| AppError::NotFound(format!("Session/{id} not found")))?;
        Ok(session.accept(entry, now).clone())
    }

    /// End a session, discarding the patient and history. Returns whether a
    /// session was active.
    pub fn end(&self, id: &str) -> bool {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id)
            .is_some()
    }

    pub fn active_count(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
