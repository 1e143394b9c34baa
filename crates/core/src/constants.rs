//! Fixed code-system and terminology URIs used in generated resources.

/// NAMASTE code system (Indian traditional medicine terminology).
pub const NAMASTE_SYSTEM: &str = "http://sih.gov.in/fhir/CodeSystem/NAMASTE";

/// WHO ICD-11 Mortality and Morbidity Statistics linearization.
pub const ICD11_SYSTEM: &str = "http://id.who.int/icd/release/11/mms";

/// Base URL for published NAMASTE-to-ICD-11 concept maps.
pub const CONCEPT_MAP_URL_BASE: &str = "http://sih.gov.in/fhir/ConceptMap/";

/// HL7 condition clinical status code system.
pub const CONDITION_CLINICAL_SYSTEM: &str =
    "http://terminology.hl7.org/CodeSystem/condition-clinical";

/// HL7 condition verification status code system.
pub const CONDITION_VER_STATUS_SYSTEM: &str =
    "http://terminology.hl7.org/CodeSystem/condition-ver-status";
