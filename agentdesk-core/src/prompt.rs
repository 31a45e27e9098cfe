//! Prompt templates owned by an agent.

use crate::entity::{merge, merge_opt, null_as_default, Entity};
use crate::error::ValidationError;
use crate::identity::ResourceId;
use crate::validation;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prompt {
    pub id: ResourceId,
    #[serde(default)]
    pub agent_id: Option<ResourceId>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, alias = "prompt_zh", deserialize_with = "null_as_default")]
    pub content_zh: String,
    #[serde(default, alias = "prompt_en", deserialize_with = "null_as_default")]
    pub content_en: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
}

impl Entity for Prompt {
    type Patch = PromptPatch;

    fn id(&self) -> &ResourceId {
        &self.id
    }

    fn apply_patch(&mut self, patch: &PromptPatch) {
        merge(&mut self.name, &patch.name);
        merge(&mut self.content_zh, &patch.content_zh);
        merge(&mut self.content_en, &patch.content_en);
        merge_opt(&mut self.category, &patch.category);
        merge(&mut self.tags, &patch.tags);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptDraft {
    pub agent_id: ResourceId,
    pub name: String,
    pub content_zh: String,
    pub content_en: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub tags: Vec<String>,
}

impl PromptDraft {
    /// Both locale variants are required.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::require("name", &self.name)?;
        validation::require("content_zh", &self.content_zh)?;
        validation::require("content_en", &self.content_en)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PromptPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_zh: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_en: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl PromptPatch {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(content) = &self.content_zh {
            validation::require("content_zh", content)?;
        }
        if let Some(content) = &self.content_en {
            validation::require("content_en", content)?;
        }
        Ok(())
    }
}

/// Split a comma separated tag box into trimmed, non-empty tags.
pub fn parse_tags(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_prompt_field_names_decode() {
        let prompt: Prompt = serde_json::from_str(
            r#"{"id": 1, "agent_id": "a1", "prompt_zh": "你好", "prompt_en": "hi"}"#,
        )
        .unwrap();
        assert_eq!(prompt.content_zh, "你好");
        assert_eq!(prompt.content_en, "hi");
    }

    #[test]
    fn both_locales_are_required() {
        let draft = PromptDraft {
            agent_id: "a1".into(),
            name: "greeting".into(),
            content_zh: "你好".into(),
            content_en: "".into(),
            category: None,
            tags: parse_tags("a, ,b"),
        };
        assert_eq!(draft.tags, vec!["a", "b"]);
        assert_eq!(draft.validate().unwrap_err().field, "content_en");
    }
}
