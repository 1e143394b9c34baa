//! Simplified FHIR R4 resource shapes carried inside generated bundles.
//!
//! These are deliberately narrow: only the fields the prototype emits, with
//! serialization matching the R4 JSON representation field for field.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A resource that can appear in a bundle entry.
///
/// Untagged: each variant is distinguished by its required fields (and all
/// carry their own `resourceType` marker).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Resource {
    ConceptMap(ConceptMap),
    Condition(Condition),
    Patient(PatientResource),
}

/// Patient demographics entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PatientResource {
    pub resource_type: String,
    pub id: String,
    pub name: Vec<HumanNameText>,
    pub birth_date: NaiveDate,
}

impl PatientResource {
    pub fn new(id: String, name: String, birth_date: NaiveDate) -> Self {
        Self {
            resource_type: "Patient".to_string(),
            id,
            name: vec![HumanNameText { text: name }],
            birth_date,
        }
    }
}

/// Text-only rendering of a human name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HumanNameText {
    pub text: String,
}

/// A single code taken from a code system.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Coding {
    pub system: String,
    pub code: String,
    pub display: String,
}

/// A concept expressed as one or more codings, optionally with plain text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CodeableConcept {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub coding: Vec<Coding>,
}

/// Reference from one resource to another.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Reference {
    pub reference: String,
    pub display: String,
}

/// Equivalence mapping between a NAMASTE code and an ICD-11 code.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ConceptMap {
    pub resource_type: String,
    pub id: String,
    pub url: String,
    pub version: String,
    pub name: String,
    pub title: String,
    pub status: String,
    pub experimental: bool,
    pub description: String,
    pub source_uri: String,
    pub target_uri: String,
    pub group: Vec<ConceptMapGroup>,
}

/// Mappings between one source and one target system.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ConceptMapGroup {
    pub source: String,
    pub target: String,
    pub element: Vec<ConceptMapElement>,
}

/// One source concept and its mapped targets.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ConceptMapElement {
    pub code: String,
    pub display: String,
    pub target: Vec<ConceptMapTarget>,
}

/// Target concept of a mapping element.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ConceptMapTarget {
    pub code: String,
    pub display: String,
    pub equivalence: String,
}

/// A recorded clinical finding, dual-coded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    pub resource_type: String,
    pub id: String,
    pub clinical_status: CodeableConcept,
    pub verification_status: CodeableConcept,
    pub subject: Reference,
    pub recorded_date: DateTime<Utc>,
    pub code: CodeableConcept,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patient_serializes_with_r4_field_names() {
        let patient = PatientResource::new(
            "P1".into(),
            "Arjun Sharma".into(),
            NaiveDate::from_ymd_opt(1994, 1, 1).unwrap(),
        );
        let json = serde_json::to_value(&patient).unwrap();
        assert_eq!(json["resourceType"], "Patient");
        assert_eq!(json["name"][0]["text"], "Arjun Sharma");
        assert_eq!(json["birthDate"], "1994-01-01");
    }

    #[test]
    fn untagged_resource_deserializes_by_shape() {
        let patient = serde_json::json!({
            "resourceType": "Patient",
            "id": "P1",
            "name": [{"text": "Meera"}],
            "birthDate": "1990-06-15"
        });
        match serde_json::from_value::<Resource>(patient).unwrap() {
            Resource::Patient(p) => assert_eq!(p.id, "P1"),
            other => panic!("expected Patient, got {other:?}"),
        }
    }
}
