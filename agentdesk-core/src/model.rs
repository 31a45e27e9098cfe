//! Model configuration resource.
//!
//! The API key is write-only: it is sent in drafts and patches but the
//! projection of a stored model never carries it, and `Debug` output of the
//! payloads redacts it.

use crate::entity::{merge, null_as_default, Entity};
use crate::enums::ModelKind;
use crate::error::ValidationError;
use crate::identity::ResourceId;
use crate::validation;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Parameters for chat/completion models.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
}

/// Parameters for embedding models.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EmbeddingParams {
    pub dimensions: u32,
}

/// Parameters for image generation models.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImageParams {
    pub size: String,
    pub quality: String,
}

/// Nested generation parameters, shaped by the model kind.
///
/// On the wire this is the bare parameter object; the arm is recovered from
/// the fields present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ModelParamsShape {
    Embedding(EmbeddingParams),
    Image(ImageParams),
    Chat(GenerationParams),
}

impl Default for ModelParamsShape {
    fn default() -> Self {
        ModelParamsShape::Chat(GenerationParams::default())
    }
}

impl ModelParamsShape {
    pub fn kind(&self) -> ModelKind {
        match self {
            ModelParamsShape::Chat(_) => ModelKind::Chat,
            ModelParamsShape::Embedding(_) => ModelKind::Embedding,
            ModelParamsShape::Image(_) => ModelKind::Image,
        }
    }

    pub fn empty(kind: ModelKind) -> Self {
        match kind {
            ModelKind::Chat => ModelParamsShape::Chat(GenerationParams::default()),
            ModelKind::Embedding => ModelParamsShape::Embedding(EmbeddingParams { dimensions: 1536 }),
            ModelKind::Image => ModelParamsShape::Image(ImageParams {
                size: "1024x1024".to_string(),
                quality: "standard".to_string(),
            }),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            ModelParamsShape::Chat(params) => {
                if let Some(temperature) = params.temperature {
                    validation::in_range("temperature", temperature, 0.0, 2.0)?;
                }
                if let Some(top_p) = params.top_p {
                    validation::in_range("top_p", top_p, 0.0, 1.0)?;
                }
                if let Some(max_tokens) = params.max_tokens {
                    validation::positive("max_tokens", max_tokens)?;
                }
            }
            ModelParamsShape::Embedding(params) => {
                validation::positive("dimensions", params.dimensions)?;
            }
            ModelParamsShape::Image(params) => {
                validation::require("size", &params.size)?;
                validation::require("quality", &params.quality)?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    pub id: ResourceId,
    pub model_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub weight: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub priority: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub base_api_url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_enabled: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub config: ModelParamsShape,
}

impl Entity for ModelConfig {
    type Patch = ModelConfigPatch;

    fn id(&self) -> &ResourceId {
        &self.id
    }

    fn apply_patch(&mut self, patch: &ModelConfigPatch) {
        merge(&mut self.model_name, &patch.model_name);
        merge(&mut self.weight, &patch.weight);
        merge(&mut self.priority, &patch.priority);
        merge(&mut self.base_api_url, &patch.base_api_url);
        merge(&mut self.is_enabled, &patch.is_enabled);
        merge(&mut self.config, &patch.config);
    }
}

#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfigDraft {
    pub model_name: String,
    pub weight: u32,
    pub priority: i32,
    pub base_api_url: String,
    pub api_key: String,
    pub is_enabled: bool,
    pub config: ModelParamsShape,
}

impl ModelConfigDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::require("model_name", &self.model_name)?;
        validation::require("base_api_url", &self.base_api_url)?;
        validation::require("api_key", &self.api_key)?;
        self.config.validate()
    }
}

impl fmt::Debug for ModelConfigDraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelConfigDraft")
            .field("model_name", &self.model_name)
            .field("weight", &self.weight)
            .field("priority", &self.priority)
            .field("base_api_url", &self.base_api_url)
            .field("api_key", &"[REDACTED]")
            .field("is_enabled", &self.is_enabled)
            .field("config", &self.config)
            .finish()
    }
}

#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelConfigPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_api_url: Option<String>,
    /// Only sent when the operator typed a new key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<ModelParamsShape>,
}

impl ModelConfigPatch {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(name) = &self.model_name {
            validation::require("model_name", name)?;
        }
        if let Some(config) = &self.config {
            config.validate()?;
        }
        Ok(())
    }
}

impl fmt::Debug for ModelConfigPatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelConfigPatch")
            .field("model_name", &self.model_name)
            .field("weight", &self.weight)
            .field("priority", &self.priority)
            .field("base_api_url", &self.base_api_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("is_enabled", &self.is_enabled)
            .field("config", &self.config)
            .finish()
    }
}

impl From<ModelConfigDraft> for ModelConfigPatch {
    fn from(draft: ModelConfigDraft) -> Self {
        Self {
            model_name: Some(draft.model_name),
            weight: Some(draft.weight),
            priority: Some(draft.priority),
            base_api_url: Some(draft.base_api_url),
            api_key: Some(draft.api_key).filter(|key| !key.trim().is_empty()),
            is_enabled: Some(draft.is_enabled),
            config: Some(draft.config),
        }
    }
}
