//! Property DTOs
//!
//! Pipeline properties and trigger properties share their body and filter
//! types; only the path differs.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::property::PropertyType;
use crate::dto::Headers;
use crate::validation::{Validate, ValidationError, require_non_empty};

/// Request to create or replace a property
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateProperty {
    pub name: String,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(rename = "enum", skip_serializing_if = "Vec::is_empty", default)]
    pub options: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locked: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl CreateProperty {
    pub fn new(name: impl Into<String>, property_type: PropertyType) -> Self {
        Self {
            name: name.into(),
            property_type,
            value: None,
            options: Vec::new(),
            locked: None,
            path: None,
        }
    }

    /// Plain text property
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, PropertyType::Text).with_value(value)
    }

    /// Secure property, stored encrypted and redacted on read
    pub fn secure(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, PropertyType::Secure).with_value(value)
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Allowed values of a `single_select` property
    pub fn with_options(mut self, options: Vec<String>) -> Self {
        self.options = options;
        self
    }

    pub fn with_locked(mut self, locked: bool) -> Self {
        self.locked = Some(locked);
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

impl Validate for CreateProperty {
    fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("name", &self.name)?;
        if self.property_type == PropertyType::SingleSelect {
            if self.options.is_empty() {
                return Err(ValidationError::new(
                    "enum",
                    "single_select properties need at least one option",
                ));
            }
            if let Some(value) = &self.value {
                if !self.options.contains(value) {
                    return Err(ValidationError::new(
                        "value",
                        format!("`{}` is not one of the allowed options", value),
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Filters for property listings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyFilter {
    /// Exact property name
    pub name: Option<String>,
    /// Property types to keep; empty means all
    pub types: Vec<PropertyType>,
    /// Sort field, prefixed with `-` for descending order
    pub sort: Option<String>,
}

impl PropertyFilter {
    pub fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(name) = &self.name {
            query.push(("name", name.clone()));
        }
        if !self.types.is_empty() {
            let types = self
                .types
                .iter()
                .map(PropertyType::as_str)
                .collect::<Vec<_>>()
                .join(",");
            query.push(("type", types));
        }
        if let Some(sort) = &self.sort {
            query.push(("sort", sort.clone()));
        }
        query
    }
}

/// Options for `GET /tekton_pipelines/{pipeline_id}/properties`
#[derive(Debug, Clone)]
pub struct ListTektonPipelinePropertiesOptions {
    pub pipeline_id: Uuid,
    pub filter: PropertyFilter,
    pub headers: Headers,
}

impl ListTektonPipelinePropertiesOptions {
    pub fn new(pipeline_id: Uuid) -> Self {
        Self {
            pipeline_id,
            filter: PropertyFilter::default(),
            headers: Headers::new(),
        }
    }

    pub fn with_filter(mut self, filter: PropertyFilter) -> Self {
        self.filter = filter;
        self
    }
}

/// Options for `POST /tekton_pipelines/{pipeline_id}/properties`
#[derive(Debug, Clone)]
pub struct CreateTektonPipelinePropertiesOptions {
    pub pipeline_id: Uuid,
    pub property: CreateProperty,
    pub headers: Headers,
}

impl CreateTektonPipelinePropertiesOptions {
    pub fn new(pipeline_id: Uuid, property: CreateProperty) -> Self {
        Self {
            pipeline_id,
            property,
            headers: Headers::new(),
        }
    }
}

/// Options for `PUT /tekton_pipelines/{pipeline_id}/properties/{property_name}`
#[derive(Debug, Clone)]
pub struct ReplaceTektonPipelinePropertyOptions {
    pub pipeline_id: Uuid,
    pub property_name: String,
    pub property: CreateProperty,
    pub headers: Headers,
}

impl ReplaceTektonPipelinePropertyOptions {
    /// Replace the property named like `property`
    pub fn new(pipeline_id: Uuid, property: CreateProperty) -> Self {
        Self {
            pipeline_id,
            property_name: property.name.clone(),
            property,
            headers: Headers::new(),
        }
    }
}

/// Options for `GET /tekton_pipelines/{pipeline_id}/triggers/{trigger_id}/properties`
#[derive(Debug, Clone)]
pub struct ListTektonPipelineTriggerPropertiesOptions {
    pub pipeline_id: Uuid,
    pub trigger_id: Uuid,
    pub filter: PropertyFilter,
    pub headers: Headers,
}

impl ListTektonPipelineTriggerPropertiesOptions {
    pub fn new(pipeline_id: Uuid, trigger_id: Uuid) -> Self {
        Self {
            pipeline_id,
            trigger_id,
            filter: PropertyFilter::default(),
            headers: Headers::new(),
        }
    }

    pub fn with_filter(mut self, filter: PropertyFilter) -> Self {
        self.filter = filter;
        self
    }
}

/// Options for `POST /tekton_pipelines/{pipeline_id}/triggers/{trigger_id}/properties`
#[derive(Debug, Clone)]
pub struct CreateTektonPipelineTriggerPropertiesOptions {
    pub pipeline_id: Uuid,
    pub trigger_id: Uuid,
    pub property: CreateProperty,
    pub headers: Headers,
}

impl CreateTektonPipelineTriggerPropertiesOptions {
    pub fn new(pipeline_id: Uuid, trigger_id: Uuid, property: CreateProperty) -> Self {
        Self {
            pipeline_id,
            trigger_id,
            property,
            headers: Headers::new(),
        }
    }
}

/// Options for
/// `PUT /tekton_pipelines/{pipeline_id}/triggers/{trigger_id}/properties/{property_name}`
#[derive(Debug, Clone)]
pub struct ReplaceTektonPipelineTriggerPropertyOptions {
    pub pipeline_id: Uuid,
    pub trigger_id: Uuid,
    pub property_name: String,
    pub property: CreateProperty,
    pub headers: Headers,
}

impl ReplaceTektonPipelineTriggerPropertyOptions {
    pub fn new(pipeline_id: Uuid, trigger_id: Uuid, property: CreateProperty) -> Self {
        Self {
            pipeline_id,
            trigger_id,
            property_name: property.name.clone(),
            property,
            headers: Headers::new(),
        }
    }
}

/// Body name and path name must agree for a replace
fn validate_replace(property_name: &str, property: &CreateProperty) -> Result<(), ValidationError> {
    require_non_empty("property_name", property_name)?;
    property.validate()?;
    if property.name != property_name {
        return Err(ValidationError::new(
            "name",
            format!(
                "body name `{}` does not match property `{}`",
                property.name, property_name
            ),
        ));
    }
    Ok(())
}

impl Validate for CreateTektonPipelinePropertiesOptions {
    fn validate(&self) -> Result<(), ValidationError> {
        self.property.validate()
    }
}

impl Validate for ReplaceTektonPipelinePropertyOptions {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_replace(&self.property_name, &self.property)
    }
}

impl Validate for CreateTektonPipelineTriggerPropertiesOptions {
    fn validate(&self) -> Result<(), ValidationError> {
        self.property.validate()
    }
}

impl Validate for ReplaceTektonPipelineTriggerPropertyOptions {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_replace(&self.property_name, &self.property)
    }
}

/// Options addressing a pipeline property by name
#[derive(Debug, Clone)]
pub struct PipelinePropertyPath {
    pub pipeline_id: Uuid,
    pub property_name: String,
    pub headers: Headers,
}

impl PipelinePropertyPath {
    pub fn new(pipeline_id: Uuid, property_name: impl Into<String>) -> Self {
        Self {
            pipeline_id,
            property_name: property_name.into(),
            headers: Headers::new(),
        }
    }
}

impl Validate for PipelinePropertyPath {
    fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("property_name", &self.property_name)
    }
}

/// Options addressing a trigger property by name
#[derive(Debug, Clone)]
pub struct TriggerPropertyPath {
    pub pipeline_id: Uuid,
    pub trigger_id: Uuid,
    pub property_name: String,
    pub headers: Headers,
}

impl TriggerPropertyPath {
    pub fn new(pipeline_id: Uuid, trigger_id: Uuid, property_name: impl Into<String>) -> Self {
        Self {
            pipeline_id,
            trigger_id,
            property_name: property_name.into(),
            headers: Headers::new(),
        }
    }
}

impl Validate for TriggerPropertyPath {
    fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("property_name", &self.property_name)
    }
}

/// Options for `GET /tekton_pipelines/{pipeline_id}/properties/{property_name}`
pub type GetTektonPipelinePropertyOptions = PipelinePropertyPath;
/// Options for `DELETE /tekton_pipelines/{pipeline_id}/properties/{property_name}`
pub type DeleteTektonPipelinePropertyOptions = PipelinePropertyPath;
/// Options for `GET .../triggers/{trigger_id}/properties/{property_name}`
pub type GetTektonPipelineTriggerPropertyOptions = TriggerPropertyPath;
/// Options for `DELETE .../triggers/{trigger_id}/properties/{property_name}`
pub type DeleteTektonPipelineTriggerPropertyOptions = TriggerPropertyPath;

impl_request_options!(
    ListTektonPipelinePropertiesOptions,
    CreateTektonPipelinePropertiesOptions,
    ReplaceTektonPipelinePropertyOptions,
    ListTektonPipelineTriggerPropertiesOptions,
    CreateTektonPipelineTriggerPropertiesOptions,
    ReplaceTektonPipelineTriggerPropertyOptions,
    PipelinePropertyPath,
    TriggerPropertyPath,
);
