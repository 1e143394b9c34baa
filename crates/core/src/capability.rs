use serde::{Deserialize, Serialize};

/// FHIR CapabilityStatement resource (simplified)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilityStatement {
    pub resource_type: String,
    pub status: String,
    pub date: String,
    pub kind: String,
    pub fhir_version: String,
    pub format: Vec<String>,
    pub rest: Vec<CapabilityRest>,
}

impl CapabilityStatement {
    /// Capability statement for the dual-coding prototype service.
    pub fn new() -> Self {
        Self {
            resource_type: "CapabilityStatement".to_string(),
            status: "active".to_string(),
            date: "2025-09-15".to_string(),
            kind: "instance".to_string(),
            fhir_version: "4.0.1".to_string(), // R4
            format: vec!["json".to_string()],
            rest: vec![CapabilityRest::default()],
        }
    }
}

impl Default for CapabilityStatement {
    fn default() -> Self {
        Self::new()
    }
}

/// REST capability declaration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapabilityRest {
    pub mode: String,
    pub resource: Vec<CapabilityResource>,
}

impl Default for CapabilityRest {
    fn default() -> Self {
        Self {
            mode: "server".to_string(),
            resource: vec![CapabilityResource::session()],
        }
    }
}

/// What the service supports for one resource type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapabilityResource {
    #[serde(rename = "type")]
    pub resource_type: String,
    pub interaction: Vec<CapabilityInteraction>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub operation: Vec<CapabilityOperation>,
}

impl CapabilityResource {
    /// The session surface: intake, read, end, plus the export operations.
    pub fn session() -> Self {
        let interactions = ["create", "read", "delete"];
        Self {
            resource_type: "Session".to_string(),
            interaction: interactions
                .iter()
                .map(|code| CapabilityInteraction {
                    code: code.to_string(),
                })
                .collect(),
            operation: vec![
                CapabilityOperation {
                    name: "dual-coding".to_string(),
                },
                CapabilityOperation {
                    name: "session-bundle".to_string(),
                },
            ],
        }
    }
}

/// A supported interaction code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapabilityInteraction {
    pub code: String,
}

/// A supported named operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapabilityOperation {
    pub name: String,
}
