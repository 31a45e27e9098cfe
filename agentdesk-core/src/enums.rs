//! Enum types for console resources

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error when parsing an enum from its wire string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumParseError {
    pub kind: &'static str,
    pub value: String,
}

impl fmt::Display for EnumParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid {}: {}", self.kind, self.value)
    }
}

impl std::error::Error for EnumParseError {}

/// Who can see and use an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    #[default]
    Public,
    Private,
    /// Restricted to the owning organization.
    #[serde(alias = "restricted")]
    Organization,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
            Visibility::Organization => "organization",
        }
    }

    pub fn all() -> &'static [Visibility] {
        &[
            Visibility::Public,
            Visibility::Private,
            Visibility::Organization,
        ]
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Visibility {
    type Err = EnumParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "public" => Ok(Visibility::Public),
            "private" => Ok(Visibility::Private),
            "organization" | "restricted" => Ok(Visibility::Organization),
            _ => Err(EnumParseError {
                kind: "visibility",
                value: s.to_string(),
            }),
        }
    }
}

/// Publication state of an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentStatus {
    #[default]
    Draft,
    Published,
    #[serde(alias = "inactive")]
    Archived,
}

impl AgentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentStatus::Draft => "draft",
            AgentStatus::Published => "published",
            AgentStatus::Archived => "archived",
        }
    }

    pub fn all() -> &'static [AgentStatus] {
        &[
            AgentStatus::Draft,
            AgentStatus::Published,
            AgentStatus::Archived,
        ]
    }
}

impl fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AgentStatus {
    type Err = EnumParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "draft" => Ok(AgentStatus::Draft),
            "published" => Ok(AgentStatus::Published),
            "archived" | "inactive" => Ok(AgentStatus::Archived),
            _ => Err(EnumParseError {
                kind: "agent status",
                value: s.to_string(),
            }),
        }
    }
}

/// How a tool is invoked by an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolType {
    #[default]
    Api,
    Function,
    Plugin,
}

impl ToolType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolType::Api => "api",
            ToolType::Function => "function",
            ToolType::Plugin => "plugin",
        }
    }

    pub fn all() -> &'static [ToolType] {
        &[ToolType::Api, ToolType::Function, ToolType::Plugin]
    }
}

impl fmt::Display for ToolType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolType {
    type Err = EnumParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "api" => Ok(ToolType::Api),
            "function" => Ok(ToolType::Function),
            "plugin" => Ok(ToolType::Plugin),
            _ => Err(EnumParseError {
                kind: "tool type",
                value: s.to_string(),
            }),
        }
    }
}

/// Outcome of a recorded agent invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvocationStatus {
    Success,
    Failed,
}

impl InvocationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvocationStatus::Success => "success",
            InvocationStatus::Failed => "failed",
        }
    }

    pub fn all() -> &'static [InvocationStatus] {
        &[InvocationStatus::Success, InvocationStatus::Failed]
    }
}

impl fmt::Display for InvocationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvocationStatus {
    type Err = EnumParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "success" => Ok(InvocationStatus::Success),
            "failed" => Ok(InvocationStatus::Failed),
            _ => Err(EnumParseError {
                kind: "invocation status",
                value: s.to_string(),
            }),
        }
    }
}

/// Discriminant selecting which generation parameter shape a model uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    #[default]
    Chat,
    Embedding,
    Image,
}

impl ModelKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelKind::Chat => "chat",
            ModelKind::Embedding => "embedding",
            ModelKind::Image => "image",
        }
    }

    pub fn all() -> &'static [ModelKind] {
        &[ModelKind::Chat, ModelKind::Embedding, ModelKind::Image]
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelKind {
    type Err = EnumParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "chat" => Ok(ModelKind::Chat),
            "embedding" => Ok(ModelKind::Embedding),
            "image" => Ok(ModelKind::Image),
            _ => Err(EnumParseError {
                kind: "model kind",
                value: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_aliases_are_accepted() {
        let v: Visibility = serde_json::from_str("\"restricted\"").unwrap();
        assert_eq!(v, Visibility::Organization);
        let s: AgentStatus = serde_json::from_str("\"inactive\"").unwrap();
        assert_eq!(s, AgentStatus::Archived);
        assert_eq!("Inactive".parse::<AgentStatus>().unwrap(), AgentStatus::Archived);
    }

    #[test]
    fn display_matches_wire_form() {
        for status in AgentStatus::all() {
            let wire = serde_json::to_string(status).unwrap();
            assert_eq!(wire, format!("\"{}\"", status));
        }
        for tool_type in ToolType::all() {
            assert_eq!(tool_type.as_str().parse::<ToolType>().unwrap(), *tool_type);
        }
    }

    #[test]
    fn unknown_value_is_rejected() {
        let err = "sometimes".parse::<InvocationStatus>().unwrap_err();
        assert_eq!(err.to_string(), "Invalid invocation status: sometimes");
    }
}
