//! Property domain types
//!
//! Properties are the environment of a pipeline. The same shape is used for
//! pipeline-level properties and for the properties attached to a trigger.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Property value type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    Secure,
    Text,
    Integration,
    SingleSelect,
    Appconfig,
}

impl PropertyType {
    /// Wire name of the type
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::Secure => "secure",
            PropertyType::Text => "text",
            PropertyType::Integration => "integration",
            PropertyType::SingleSelect => "single_select",
            PropertyType::Appconfig => "appconfig",
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pipeline or trigger property
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    /// Value of the property; secure values come back redacted
    pub value: Option<String>,
    pub href: Option<String>,
    /// Allowed values of a `single_select` property
    #[serde(rename = "enum", default)]
    pub options: Vec<String>,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    /// Locked trigger properties cannot be overridden when a run is started
    pub locked: Option<bool>,
    /// JSON path into the integration for `integration` properties
    pub path: Option<String>,
}

/// Properties of a pipeline or trigger
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertiesCollection {
    #[serde(default)]
    pub properties: Vec<Property>,
}

impl PropertiesCollection {
    /// Find a property by name
    pub fn get(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }
}
