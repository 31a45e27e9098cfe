//! Agent resource.

use crate::entity::{merge, merge_opt, null_as_default, present_or_null, Entity};
use crate::enums::{AgentStatus, Visibility};
use crate::error::ValidationError;
use crate::identity::ResourceId;
use crate::validation;
use serde::{Deserialize, Deserializer, Serialize};

fn default_agent_type() -> String {
    "assistant".to_string()
}

fn agent_type_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?
        .filter(|agent_type| !agent_type.trim().is_empty())
        .unwrap_or_else(default_agent_type))
}

/// Sampling parameters an agent passes to its model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelParams {
    pub temperature: f64,
    pub max_tokens: u32,
}

impl Default for ModelParams {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 2000,
        }
    }
}

/// One choice served by the agent option endpoints.
///
/// Served either as a bare string or as `{value, label}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "OptionWire")]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OptionWire {
    Plain(String),
    Labelled {
        value: String,
        #[serde(default)]
        label: Option<String>,
    },
}

impl From<OptionWire> for SelectOption {
    fn from(wire: OptionWire) -> Self {
        match wire {
            OptionWire::Plain(value) => Self {
                label: value.clone(),
                value,
            },
            OptionWire::Labelled { value, label } => Self {
                label: label.unwrap_or_else(|| value.clone()),
                value,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub id: ResourceId,
    pub name: String,
    #[serde(default)]
    pub name_zh: Option<String>,
    #[serde(default)]
    pub name_en: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pricing: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub visibility: Visibility,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: AgentStatus,
    #[serde(rename = "type", default = "default_agent_type", deserialize_with = "agent_type_or_default")]
    pub agent_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tool_ids: Vec<ResourceId>,
    #[serde(default)]
    pub model_id: Option<ResourceId>,
    #[serde(default)]
    pub prompt_zh: Option<String>,
    #[serde(default)]
    pub prompt_en: Option<String>,
    #[serde(default)]
    pub model_params: Option<ModelParams>,
}

impl Agent {
    /// Name to show in tables: the explicit name, then the localized ones.
    pub fn display_name(&self) -> &str {
        if !self.name.trim().is_empty() {
            return &self.name;
        }
        self.name_en
            .as_deref()
            .or(self.name_zh.as_deref())
            .unwrap_or("")
    }
}

impl Entity for Agent {
    type Patch = AgentPatch;

    fn id(&self) -> &ResourceId {
        &self.id
    }

    fn apply_patch(&mut self, patch: &AgentPatch) {
        merge(&mut self.name, &patch.name);
        merge_opt(&mut self.name_zh, &patch.name_zh);
        merge_opt(&mut self.name_en, &patch.name_en);
        merge(&mut self.description, &patch.description);
        merge(&mut self.pricing, &patch.pricing);
        merge(&mut self.visibility, &patch.visibility);
        merge(&mut self.status, &patch.status);
        merge(&mut self.agent_type, &patch.agent_type);
        merge(&mut self.tool_ids, &patch.tool_ids);
        merge(&mut self.model_id, &patch.model_id);
        merge_opt(&mut self.prompt_zh, &patch.prompt_zh);
        merge_opt(&mut self.prompt_en, &patch.prompt_en);
        merge_opt(&mut self.model_params, &patch.model_params);
    }
}

/// Create payload for a new agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentDraft {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_zh: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_en: Option<String>,
    pub description: String,
    pub pricing: f64,
    pub visibility: Visibility,
    pub status: AgentStatus,
    #[serde(rename = "type")]
    pub agent_type: String,
}

impl Default for AgentDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            name_zh: None,
            name_en: None,
            description: String::new(),
            pricing: 0.0,
            visibility: Visibility::Public,
            status: AgentStatus::Draft,
            agent_type: default_agent_type(),
        }
    }
}

impl AgentDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::require("name", &self.name)?;
        validation::require("description", &self.description)?;
        validation::non_negative("pricing", self.pricing)?;
        Ok(())
    }
}

/// Partial agent update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_zh: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_en: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pricing: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<AgentStatus>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub agent_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_ids: Option<Vec<ResourceId>>,
    /// `Some(None)` unbinds the model and is sent as `null`.
    #[serde(
        default,
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub model_id: Option<Option<ResourceId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_zh: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_en: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_params: Option<ModelParams>,
}

impl AgentPatch {
    pub fn is_empty(&self) -> bool {
        *self == AgentPatch::default()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(name) = &self.name {
            validation::require("name", name)?;
        }
        if let Some(pricing) = self.pricing {
            validation::non_negative("pricing", pricing)?;
        }
        if let Some(params) = &self.model_params {
            validation::in_range("temperature", params.temperature, 0.0, 2.0)?;
            validation::positive("max_tokens", params.max_tokens)?;
        }
        Ok(())
    }
}

impl From<AgentDraft> for AgentPatch {
    fn from(draft: AgentDraft) -> Self {
        Self {
            name: Some(draft.name),
            name_zh: draft.name_zh,
            name_en: draft.name_en,
            description: Some(draft.description),
            pricing: Some(draft.pricing),
            visibility: Some(draft.visibility),
            status: Some(draft.status),
            agent_type: Some(draft.agent_type),
            ..Self::default()
        }
    }
}

/// Prompt, tool and model binding saved from the agent configuration screen.
///
/// Applied to the backend as an ordinary agent update.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentConfiguration {
    pub prompt_zh: String,
    pub prompt_en: String,
    pub tool_ids: Vec<ResourceId>,
    pub model_id: Option<ResourceId>,
    pub model_params: ModelParams,
}

impl AgentConfiguration {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::in_range("temperature", self.model_params.temperature, 0.0, 2.0)?;
        validation::positive("max_tokens", self.model_params.max_tokens)?;
        Ok(())
    }
}

impl From<AgentConfiguration> for AgentPatch {
    fn from(config: AgentConfiguration) -> Self {
        Self {
            prompt_zh: Some(config.prompt_zh),
            prompt_en: Some(config.prompt_en),
            tool_ids: Some(config.tool_ids),
            model_id: Some(config.model_id),
            model_params: Some(config.model_params),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agent() -> Agent {
        serde_json::from_value(serde_json::json!({
            "id": 3,
            "name": "Helper",
            "description": "answers questions",
            "pricing": 1.5,
            "visibility": "private",
            "status": "published",
        }))
        .unwrap()
    }

    #[test]
    fn options_accept_plain_strings() {
        let options: Vec<SelectOption> =
            serde_json::from_str(r#"["public", {"value": "private", "label": "Private"}]"#).unwrap();
        assert_eq!(options[0].label, "public");
        assert_eq!(options[1].label, "Private");
    }

    #[test]
    fn missing_fields_take_console_defaults() {
        let agent = agent();
        assert_eq!(agent.id.as_str(), "3");
        assert_eq!(agent.agent_type, "assistant");
        assert!(agent.tool_ids.is_empty());
        assert_eq!(agent.model_params, None);
    }

    #[test]
    fn null_fields_read_as_missing() {
        let agent: Agent = serde_json::from_value(serde_json::json!({
            "id": "a1",
            "name": "Helper",
            "description": null,
            "pricing": null,
            "visibility": null,
            "type": null,
            "tool_ids": null,
            "model_id": null
        }))
        .unwrap();
        assert_eq!(agent.description, "");
        assert_eq!(agent.pricing, 0.0);
        assert_eq!(agent.visibility, Visibility::default());
        assert_eq!(agent.agent_type, "assistant");
        assert!(agent.tool_ids.is_empty());
        assert_eq!(agent.model_id, None);
    }

    #[test]
    fn patch_only_touches_present_fields() {
        let mut agent = agent();
        agent.apply_patch(&AgentPatch {
            status: Some(AgentStatus::Archived),
            ..AgentPatch::default()
        });
        assert_eq!(agent.status, AgentStatus::Archived);
        assert_eq!(agent.name, "Helper");
        assert_eq!(agent.visibility, Visibility::Private);
    }

    #[test]
    fn patch_serializes_only_present_fields() {
        let patch = AgentPatch {
            pricing: Some(2.0),
            agent_type: Some("workflow".into()),
            ..AgentPatch::default()
        };
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json, serde_json::json!({"pricing": 2.0, "type": "workflow"}));
    }

    #[test]
    fn draft_requires_name_and_description() {
        let draft = AgentDraft::default();
        assert_eq!(draft.validate().unwrap_err().field, "name");
        let draft = AgentDraft {
            name: "x".into(),
            description: "y".into(),
            pricing: -1.0,
            ..AgentDraft::default()
        };
        assert_eq!(draft.validate().unwrap_err().field, "pricing");
    }

    #[test]
    fn configuration_becomes_binding_patch() {
        let patch: AgentPatch = AgentConfiguration {
            prompt_zh: "你好".into(),
            prompt_en: "hello".into(),
            tool_ids: vec!["t1".into()],
            model_id: Some("m1".into()),
            model_params: ModelParams::default(),
        }
        .into();
        assert_eq!(patch.tool_ids, Some(vec![ResourceId::from("t1")]));
        assert_eq!(patch.name, None);
        assert_eq!(patch.model_id, Some(Some(ResourceId::from("m1"))));
        assert_eq!(patch.model_params.unwrap().max_tokens, 2000);
    }

    #[test]
    fn configuration_without_model_unbinds_it() {
        let patch: AgentPatch = AgentConfiguration {
            prompt_zh: String::new(),
            prompt_en: String::new(),
            tool_ids: Vec::new(),
            model_id: None,
            model_params: ModelParams::default(),
        }
        .into();
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json["model_id"], serde_json::Value::Null);
        assert!(json.as_object().unwrap().contains_key("model_id"));

        let mut agent: Agent = serde_json::from_value(serde_json::json!({
            "id": "a1",
            "name": "bot",
            "model_id": "m1"
        }))
        .unwrap();
        agent.apply_patch(&patch);
        assert_eq!(agent.model_id, None);

        let read_back: AgentPatch = serde_json::from_value(json).unwrap();
        assert_eq!(read_back.model_id, Some(None));
        let untouched: AgentPatch = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(untouched.model_id, None);
    }
}
