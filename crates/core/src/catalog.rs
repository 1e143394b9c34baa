//! The diagnosis catalog: the fixed set of known dual-coded concepts.
//!
//! Each entry pairs a NAMASTE code with its ICD-11 equivalent. The dataset is
//! embedded in the crate and parsed once; the catalog is immutable for the
//! lifetime of the process.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// Embedded catalog dataset. Stands in for a real terminology service.
const BUILTIN_DATASET: &str = include_str!("../data/catalog.json");

/// One dual-coded clinical concept.
///
/// `confidence` is a precomputed match-quality score carried with the entry,
/// not something derived at query time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisEntry {
    pub id: u32,
    pub term: String,
    pub namaste_code: String,
    pub icd11_code: String,
    pub confidence: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Validated, ordered collection of [`DiagnosisEntry`] records.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<DiagnosisEntry>,
}

impl Catalog {
    /// Validate and wrap a list of entries.
    ///
    /// Entry order is preserved; it is the order suggestions are returned in.
    pub fn from_entries(entries: Vec<DiagnosisEntry>) -> Result<Self, CatalogError> {
        let mut seen = std::collections::HashSet::new();
        for entry in &entries {
            if !seen.insert(entry.id) {
                return Err(CatalogError::DuplicateId(entry.id));
            }
            if entry.term.trim().is_empty() {
                return Err(CatalogError::InvalidEntry {
                    id: entry.id,
                    reason: "term must not be empty".into(),
                });
            }
            if entry.namaste_code.trim().is_empty() {
                return Err(CatalogError::InvalidEntry {
                    id: entry.id,
                    reason: "NAMASTE code must not be empty".into(),
                });
            }
            if entry.icd11_code.trim().is_empty() {
                return Err(CatalogError::InvalidEntry {
                    id: entry.id,
                    reason: "ICD-11 code must not be empty".into(),
                });
            }
            if entry.confidence > 100 {
                return Err(CatalogError::InvalidEntry {
                    id: entry.id,
                    reason: format!("confidence {} out of range 0-100", entry.confidence),
                });
            }
        }
        Ok(Self { entries })
    }

    /// Parse and validate a JSON dataset.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let entries: Vec<DiagnosisEntry> = serde_json::from_str(json)?;
        Self::from_entries(entries)
    }

    /// The embedded catalog, parsed and validated on first access.
    pub fn builtin() -> &'static Catalog {
        static CATALOG: OnceLock<Catalog> = OnceLock::new();
        CATALOG.get_or_init(|| {
            Catalog::from_json(BUILTIN_DATASET).expect("embedded catalog dataset is valid")
        })
    }

    pub fn entries(&self) -> &[DiagnosisEntry] {
        &self.entries
    }

    /// Look up an entry by its catalog id.
    pub fn get(&self, id: u32) -> Option<&DiagnosisEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
