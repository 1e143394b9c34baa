//! setu-core: dual-coding domain logic for the Swasthya Setu prototype
//!
//! This crate holds everything that is pure: the embedded NAMASTE/ICD-11
//! diagnosis catalog, the suggestion matcher, per-session patient state, and
//! the builders that turn session state into FHIR R4-shaped bundles.

pub mod bundle;
pub mod capability;
pub mod catalog;
pub mod constants;
pub mod documents;
pub mod error;
pub mod matcher;
pub mod outcome;
pub mod resources;
pub mod session;

pub use bundle::{Bundle, BundleEntry, BundleType};
pub use capability::CapabilityStatement;
pub use catalog::{Catalog, DiagnosisEntry};
pub use documents::{dual_coding_bundle, session_bundle};
pub use error::{CatalogError, IntakeError};
pub use matcher::suggest;
pub use outcome::{IssueSeverity, IssueType, OperationOutcome, OperationOutcomeIssue};
pub use session::{AcceptedDiagnosis, PatientRecord, Session};
