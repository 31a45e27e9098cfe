//! Tool resource.

use crate::entity::{merge, null_as_default, Entity};
use crate::enums::ToolType;
use crate::error::ValidationError;
use crate::identity::{lenient_timestamp, ResourceId, Timestamp};
use crate::validation;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    pub id: ResourceId,
    pub name: String,
    #[serde(rename = "type", alias = "tool_type", default, deserialize_with = "null_as_default")]
    pub tool_type: ToolType,
    #[serde(default, deserialize_with = "null_as_default")]
    pub endpoint: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(alias = "is_enabled", default, deserialize_with = "null_as_default")]
    pub enabled: bool,
    /// Opaque key/value configuration forwarded to the tool runtime.
    #[serde(default, deserialize_with = "null_as_default")]
    pub config_params: Map<String, Value>,
    #[serde(default, with = "lenient_timestamp")]
    pub created_at: Option<Timestamp>,
}

impl Entity for Tool {
    type Patch = ToolPatch;

    fn id(&self) -> &ResourceId {
        &self.id
    }

    fn apply_patch(&mut self, patch: &ToolPatch) {
        merge(&mut self.name, &patch.name);
        merge(&mut self.tool_type, &patch.tool_type);
        merge(&mut self.endpoint, &patch.endpoint);
        merge(&mut self.description, &patch.description);
        merge(&mut self.enabled, &patch.enabled);
        merge(&mut self.config_params, &patch.config_params);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDraft {
    pub name: String,
    #[serde(rename = "type")]
    pub tool_type: ToolType,
    pub endpoint: String,
    pub description: String,
    pub enabled: bool,
    pub config_params: Map<String, Value>,
}

impl ToolDraft {
    /// Build a draft from raw form input, parsing the JSON config box.
    pub fn from_form(
        name: &str,
        tool_type: ToolType,
        endpoint: &str,
        description: &str,
        config_text: &str,
        enabled: bool,
    ) -> Result<Self, ValidationError> {
        let draft = Self {
            name: name.trim().to_string(),
            tool_type,
            endpoint: endpoint.trim().to_string(),
            description: description.to_string(),
            enabled,
            config_params: validation::parse_json_object("config_params", config_text)?,
        };
        draft.validate()?;
        Ok(draft)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::require("name", &self.name)?;
        if self.tool_type == ToolType::Api {
            validation::require("endpoint", &self.endpoint)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub tool_type: Option<ToolType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_params: Option<Map<String, Value>>,
}

impl ToolPatch {
    pub fn toggle(tool: &Tool) -> Self {
        Self {
            enabled: Some(!tool.enabled),
            ..Self::default()
        }
    }
}

impl From<ToolDraft> for ToolPatch {
    fn from(draft: ToolDraft) -> Self {
        Self {
            name: Some(draft.name),
            tool_type: Some(draft.tool_type),
            endpoint: Some(draft.endpoint),
            description: Some(draft.description),
            enabled: Some(draft.enabled),
            config_params: Some(draft.config_params),
        }
    }
}
