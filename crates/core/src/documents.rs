//! Document builders: turn session state into FHIR-shaped bundles.
//!
//! Both builders are pure. The generation instant is an explicit parameter,
//! never read from a wall clock, so output is fully determined by input.

use chrono::{DateTime, Datelike, NaiveDate, Utc};

use crate::bundle::{Bundle, BundleEntry};
use crate::catalog::DiagnosisEntry;
use crate::constants::{
    CONCEPT_MAP_URL_BASE, CONDITION_CLINICAL_SYSTEM, CONDITION_VER_STATUS_SYSTEM, ICD11_SYSTEM,
    NAMASTE_SYSTEM,
};
use crate::resources::{
    CodeableConcept, Coding, ConceptMap, ConceptMapElement, ConceptMapGroup, ConceptMapTarget,
    Condition, PatientResource, Reference, Resource,
};
use crate::session::{AcceptedDiagnosis, PatientRecord};

/// Estimate a birth date by winding the calendar year back by `age`.
///
/// Lossy on purpose: the intake form captures age, not date of birth, so the
/// month and day are taken from the generation instant. Feb 29 rolls over to
/// Mar 1 when the target year is not a leap year.
fn estimate_birth_date(now: DateTime<Utc>, age: u32) -> NaiveDate {
    let today = now.date_naive();
    let year = i64::from(today.year()) - i64::from(age);
    i32::try_from(year)
        .ok()
        .and_then(|year| {
            NaiveDate::from_ymd_opt(year, today.month(), today.day())
                .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
        })
        .unwrap_or(today)
}

fn patient_entry(patient: &PatientRecord, now: DateTime<Utc>) -> BundleEntry {
    BundleEntry::new(
        format!("urn:uuid:{}", patient.id()),
        Resource::Patient(PatientResource::new(
            patient.id().to_owned(),
            patient.name().to_owned(),
            estimate_birth_date(now, patient.age()),
        )),
    )
}

/// Build the dual-coding bundle for one selected diagnosis.
///
/// A collection of exactly two entries: the patient identity and a
/// ConceptMap describing the NAMASTE-to-ICD-11 equivalence for the selected
/// concept.
pub fn dual_coding_bundle(
    patient: &PatientRecord,
    diagnosis: &DiagnosisEntry,
    now: DateTime<Utc>,
) -> Bundle {
    let map_slug = format!("namaste-icd11-{}", diagnosis.namaste_code.to_lowercase());

    let concept_map = ConceptMap {
        resource_type: "ConceptMap".to_string(),
        id: map_slug.clone(),
        url: format!("{CONCEPT_MAP_URL_BASE}{map_slug}"),
        version: "1.0.0".to_string(),
        name: "NamasteToICD11Mapping".to_string(),
        title: format!(
            "Mapping from NAMASTE ({}) to ICD-11 ({})",
            diagnosis.namaste_code, diagnosis.icd11_code
        ),
        status: "active".to_string(),
        experimental: true,
        description: format!(
            "Dual-coding map for the clinical term '{}' for patient {}. AI Confidence: {}%.",
            diagnosis.term,
            patient.name(),
            diagnosis.confidence
        ),
        source_uri: NAMASTE_SYSTEM.to_string(),
        target_uri: ICD11_SYSTEM.to_string(),
        group: vec![ConceptMapGroup {
            source: NAMASTE_SYSTEM.to_string(),
            target: ICD11_SYSTEM.to_string(),
            element: vec![ConceptMapElement {
                code: diagnosis.namaste_code.clone(),
                display: diagnosis.term.clone(),
                target: vec![ConceptMapTarget {
                    code: diagnosis.icd11_code.clone(),
                    display: diagnosis.term.clone(),
                    equivalence: "equivalent".to_string(),
                }],
            }],
        }],
    };

    Bundle::collection(
        format!("bundle-{}-{}", patient.id(), diagnosis.id),
        now,
        vec![
            patient_entry(patient, now),
            BundleEntry::new(
                format!("urn:uuid:conceptmap-{}", diagnosis.id),
                Resource::ConceptMap(concept_map),
            ),
        ],
    )
}

fn status_concept(system: &str, code: &str, display: &str) -> CodeableConcept {
    CodeableConcept {
        text: None,
        coding: vec![Coding {
            system: system.to_string(),
            code: code.to_string(),
            display: display.to_string(),
        }],
    }
}

fn condition_entry(
    patient: &PatientRecord,
    accepted: &AcceptedDiagnosis,
    index: usize,
) -> BundleEntry {
    let id = format!("condition-{}-{}", patient.id(), index);
    let condition = Condition {
        resource_type: "Condition".to_string(),
        id: id.clone(),
        clinical_status: status_concept(CONDITION_CLINICAL_SYSTEM, "active", "Active"),
        verification_status: status_concept(CONDITION_VER_STATUS_SYSTEM, "confirmed", "Confirmed"),
        subject: Reference {
            reference: format!("Patient/{}", patient.id()),
            display: patient.name().to_owned(),
        },
        recorded_date: accepted.timestamp,
        code: CodeableConcept {
            text: Some(accepted.entry.term.clone()),
            coding: vec![
                Coding {
                    system: NAMASTE_SYSTEM.to_string(),
                    code: accepted.entry.namaste_code.clone(),
                    display: accepted.entry.term.clone(),
                },
                Coding {
                    system: ICD11_SYSTEM.to_string(),
                    code: accepted.entry.icd11_code.clone(),
                    display: accepted.entry.term.clone(),
                },
            ],
        },
    };
    BundleEntry::new(format!("urn:uuid:{id}"), Resource::Condition(condition))
}

/// Build the whole-session bundle: one patient entry plus one dual-coded
/// Condition per accepted diagnosis, most recent first.
///
/// Returns `None` when there is no patient or nothing has been accepted.
/// That is the normal empty state, not a failure; callers decide how to tell
/// the user nothing was generated.
pub fn session_bundle(
    patient: Option<&PatientRecord>,
    history: &[AcceptedDiagnosis],
    now: DateTime<Utc>,
) -> Option<Bundle> {
    let patient = patient?;
    if history.is_empty() {
        return None;
    }

    let mut entries = Vec::with_capacity(history.len() + 1);
    entries.push(patient_entry(patient, now));
    entries.extend(
        history
            .iter()
            .enumerate()
            .map(|(index, accepted)| condition_entry(patient, accepted, index)),
    );

    Some(Bundle::collection(
        format!(
            "session-bundle-{}-{}",
            patient.id(),
            now.timestamp_millis()
        ),
        now,
        entries,
    ))
}
