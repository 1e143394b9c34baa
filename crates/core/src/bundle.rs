use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::resources::Resource;

/// FHIR Bundle types
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BundleType {
    Collection,
    Document,
    Searchset,
    History,
}

/// FHIR Bundle resource (simplified to what the generated documents need).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bundle {
    pub resource_type: String,

    pub id: String,

    #[serde(rename = "type")]
    pub bundle_type: BundleType,

    pub timestamp: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entry: Vec<BundleEntry>,
}

impl Bundle {
    /// A collection bundle holding the given entries.
    pub fn collection(id: String, timestamp: DateTime<Utc>, entry: Vec<BundleEntry>) -> Self {
        Self {
            resource_type: "Bundle".to_string(),
            id,
            bundle_type: BundleType::Collection,
            timestamp,
            entry,
        }
    }
}

/// One entry in a bundle: a resource plus the URI it is known by.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleEntry {
    pub full_url: String,
    pub resource: Resource,
}

impl BundleEntry {
    pub fn new(full_url: String, resource: Resource) -> Self {
        Self { full_url, resource }
    }
}
