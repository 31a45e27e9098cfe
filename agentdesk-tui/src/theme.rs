//! Palette and the label/color table for every displayed enum.
//!
//! Views never spell out enum labels themselves; they go through the
//! `*_badge` functions so that one table per enum decides both.

use agentdesk_client::NotificationLevel;
use agentdesk_core::{AgentStatus, InvocationStatus, ModelKind, ToolType, Visibility};
use ratatui::style::Color;

#[derive(Debug, Clone)]
pub struct Theme {
    pub bg: Color,
    pub bg_highlight: Color,
    pub primary: Color,
    pub primary_dim: Color,
    pub secondary: Color,
    pub tertiary: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,
    pub text: Color,
    pub text_dim: Color,
    pub border: Color,
    pub border_focus: Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            bg: Color::Rgb(10, 10, 10),
            bg_highlight: Color::Rgb(42, 42, 42),
            primary: Color::Rgb(0, 255, 255),
            primary_dim: Color::Rgb(0, 136, 136),
            secondary: Color::Rgb(255, 0, 255),
            tertiary: Color::Rgb(255, 255, 0),
            success: Color::Rgb(0, 255, 0),
            warning: Color::Rgb(255, 255, 0),
            error: Color::Rgb(255, 0, 0),
            info: Color::Rgb(0, 255, 255),
            text: Color::Rgb(255, 255, 255),
            text_dim: Color::Rgb(136, 136, 136),
            border: Color::Rgb(68, 68, 68),
            border_focus: Color::Rgb(0, 255, 255),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

/// Display label and color for one enum value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Badge {
    pub label: &'static str,
    pub color: Color,
}

impl Badge {
    fn new(label: &'static str, color: Color) -> Self {
        Self { label, color }
    }
}

pub fn visibility_badge(visibility: Visibility, theme: &Theme) -> Badge {
    match visibility {
        Visibility::Public => Badge::new("Public", theme.success),
        Visibility::Private => Badge::new("Private", theme.text_dim),
        Visibility::Organization => Badge::new("Organization", theme.info),
    }
}

pub fn agent_status_badge(status: AgentStatus, theme: &Theme) -> Badge {
    match status {
        AgentStatus::Draft => Badge::new("Draft", theme.warning),
        AgentStatus::Published => Badge::new("Published", theme.success),
        AgentStatus::Archived => Badge::new("Archived", theme.text_dim),
    }
}

pub fn tool_type_badge(tool_type: ToolType, theme: &Theme) -> Badge {
    match tool_type {
        ToolType::Api => Badge::new("API", theme.primary),
        ToolType::Function => Badge::new("Function", theme.secondary),
        ToolType::Plugin => Badge::new("Plugin", theme.tertiary),
    }
}

pub fn invocation_status_badge(status: InvocationStatus, theme: &Theme) -> Badge {
    match status {
        InvocationStatus::Success => Badge::new("Success", theme.success),
        InvocationStatus::Failed => Badge::new("Failed", theme.error),
    }
}

pub fn model_kind_badge(kind: ModelKind, theme: &Theme) -> Badge {
    match kind {
        ModelKind::Chat => Badge::new("Chat", theme.primary),
        ModelKind::Embedding => Badge::new("Embedding", theme.secondary),
        ModelKind::Image => Badge::new("Image", theme.tertiary),
    }
}

pub fn enabled_badge(enabled: bool, theme: &Theme) -> Badge {
    if enabled {
        Badge::new("Enabled", theme.success)
    } else {
        Badge::new("Disabled", theme.error)
    }
}

pub fn notification_badge(level: NotificationLevel, theme: &Theme) -> Badge {
    match level {
        NotificationLevel::Info => Badge::new("INFO", theme.info),
        NotificationLevel::Warning => Badge::new("WARN", theme.warning),
        NotificationLevel::Error => Badge::new("ERROR", theme.error),
        NotificationLevel::Success => Badge::new("SUCCESS", theme.success),
    }
}
