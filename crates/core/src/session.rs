//! Session state: one active patient and their accepted-diagnosis history.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::catalog::DiagnosisEntry;
use crate::error::IntakeError;

/// Demographics captured when a session starts.
///
/// Constructed only through [`PatientRecord::new`], which trims and rejects
/// blank fields, so downstream code never sees a malformed record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientRecord {
    name: String,
    age: u32,
    id: String,
}

impl PatientRecord {
    pub fn new(
        name: impl AsRef<str>,
        age: u32,
        id: impl AsRef<str>,
    ) -> Result<Self, IntakeError> {
        let name = name.as_ref().trim();
        if name.is_empty() {
            return Err(IntakeError::EmptyName);
        }
        let id = id.as_ref().trim();
        if id.is_empty() {
            return Err(IntakeError::EmptyId);
        }
        Ok(Self {
            name: name.to_owned(),
            age,
            id: id.to_owned(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

/// A catalog entry accepted into the record, stamped at acceptance time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AcceptedDiagnosis {
    #[serde(flatten)]
    pub entry: DiagnosisEntry,
    pub timestamp: DateTime<Utc>,
}

/// One patient session: the active patient plus their history, most recent
/// first. Dropped wholesale when the session ends.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    patient: PatientRecord,
    history: Vec<AcceptedDiagnosis>,
}

impl Session {
    pub fn new(patient: PatientRecord) -> Self {
        Self {
            patient,
            history: Vec::new(),
        }
    }

    pub fn patient(&self) -> &PatientRecord {
        &self.patient
    }

    /// Accepted diagnoses, most recent first.
    pub fn history(&self) -> &[AcceptedDiagnosis] {
        &self.history
    }

    /// Record an accepted diagnosis at the front of the history.
    pub fn accept(&mut self, entry: DiagnosisEntry, now: DateTime<Utc>) -> &AcceptedDiagnosis {
        self.history.insert(
            0,
            AcceptedDiagnosis {
                entry,
                timestamp: now,
            },
        );
        &self.history[0]
    }
}
