//! Form drafts owned by the views.
//!
//! A form is a flat list of fields edited in place. Submitting validates
//! locally and turns the values into a [`Command`]; a validation failure
//! stays inside the form and nothing is dispatched.

use crate::commands::Command;
use crate::keys::FormAction;
use agentdesk_core::prompt::parse_tags;
use agentdesk_core::validation::{self, parse_number, parse_optional_number};
use agentdesk_core::{
    Agent, AgentConfiguration, AgentDraft, AgentPatch, AgentStatus, EmbeddingParams,
    GenerationParams, ImageParams, InvocationStatus, LoginRequest, ModelConfig, ModelConfigDraft,
    ModelConfigPatch, ModelKind, ModelParams, ModelParamsShape, Prompt, PromptDraft, PromptPatch,
    ResourceId, SelectOption, Tool, ToolDraft, ToolPatch, ToolType, TriggerQuery, User, UserPatch,
    ValidationError, Visibility,
};
use chrono::{NaiveDate, NaiveTime};

#[derive(Debug, Clone, PartialEq)]
pub enum FieldInput {
    Text { value: String, secret: bool },
    Choice { options: Vec<SelectOption>, selected: usize },
    Toggle(bool),
    /// Any number of options; left/right move between them, space flips one.
    MultiChoice {
        options: Vec<SelectOption>,
        chosen: Vec<bool>,
        cursor: usize,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    pub name: &'static str,
    pub label: &'static str,
    pub input: FieldInput,
}

impl FormField {
    pub fn text(name: &'static str, label: &'static str, value: impl Into<String>) -> Self {
        Self {
            name,
            label,
            input: FieldInput::Text {
                value: value.into(),
                secret: false,
            },
        }
    }

    pub fn secret(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            input: FieldInput::Text {
                value: String::new(),
                secret: true,
            },
        }
    }

    /// Starts on the option whose value is `current`, or the first one.
    pub fn choice(name: &'static str, label: &'static str, options: Vec<SelectOption>, current: &str) -> Self {
        let selected = options.iter().position(|option| option.value == current).unwrap_or(0);
        Self {
            name,
            label,
            input: FieldInput::Choice { options, selected },
        }
    }

    /// Options whose value is in `current` start out chosen.
    pub fn multi_choice(name: &'static str, label: &'static str, options: Vec<SelectOption>, current: &[&str]) -> Self {
        let chosen = options
            .iter()
            .map(|option| current.contains(&option.value.as_str()))
            .collect();
        Self {
            name,
            label,
            input: FieldInput::MultiChoice {
                options,
                chosen,
                cursor: 0,
            },
        }
    }

    pub fn toggle(name: &'static str, label: &'static str, value: bool) -> Self {
        Self {
            name,
            label,
            input: FieldInput::Toggle(value),
        }
    }

    /// What the form widget shows for this field.
    pub fn display(&self) -> String {
        match &self.input {
            FieldInput::Text { value, secret: true } => "*".repeat(value.chars().count()),
            FieldInput::Text { value, .. } => value.clone(),
            FieldInput::Choice { options, selected } => options
                .get(*selected)
                .map(|option| format!("< {} >", option.label))
                .unwrap_or_default(),
            FieldInput::Toggle(true) => "[x]".to_string(),
            FieldInput::Toggle(false) => "[ ]".to_string(),
            FieldInput::MultiChoice { options, .. } if options.is_empty() => "(nothing to choose)".to_string(),
            FieldInput::MultiChoice {
                options,
                chosen,
                cursor,
            } => {
                let mark = if chosen.get(*cursor).copied().unwrap_or(false) { "[x]" } else { "[ ]" };
                let count = chosen.iter().filter(|on| **on).count();
                let label = options.get(*cursor).map_or("", |option| option.label.as_str());
                format!("< {} {} > {}/{} chosen", mark, label, count, options.len())
            }
        }
    }

    fn apply(&mut self, action: FormAction) {
        match (&mut self.input, action) {
            (FieldInput::Text { value, .. }, FormAction::Input(c)) => value.push(c),
            (FieldInput::Text { value, .. }, FormAction::Backspace) => {
                value.pop();
            }
            (FieldInput::Choice { options, selected }, FormAction::CycleNext | FormAction::Input(' ')) => {
                if !options.is_empty() {
                    *selected = (*selected + 1) % options.len();
                }
            }
            (FieldInput::Choice { options, selected }, FormAction::CyclePrev) => {
                if !options.is_empty() {
                    *selected = (*selected + options.len() - 1) % options.len();
                }
            }
            (FieldInput::MultiChoice { options, cursor, .. }, FormAction::CycleNext) => {
                if !options.is_empty() {
                    *cursor = (*cursor + 1) % options.len();
                }
            }
            (FieldInput::MultiChoice { options, cursor, .. }, FormAction::CyclePrev) => {
                if !options.is_empty() {
                    *cursor = (*cursor + options.len() - 1) % options.len();
                }
            }
            (FieldInput::MultiChoice { chosen, cursor, .. }, FormAction::Input(' ')) => {
                if let Some(on) = chosen.get_mut(*cursor) {
                    *on = !*on;
                }
            }
            (
                FieldInput::Toggle(value),
                FormAction::CycleNext | FormAction::CyclePrev | FormAction::Input(' '),
            ) => *value = !*value,
            _ => {}
        }
    }
}

/// What a form is for; carries the id of the entity being edited.
#[derive(Debug, Clone, PartialEq)]
pub enum FormKind {
    Login,
    CreateAgent,
    EditAgent(ResourceId),
    ConfigureAgent(ResourceId),
    CreateTool,
    EditTool(ResourceId),
    CreateModel,
    EditModel(ResourceId),
    CreatePrompt,
    EditPrompt(ResourceId),
    EditProfile,
    TriggerFilter,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormOutcome {
    Editing,
    Submitted(Command),
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct Form {
    pub kind: FormKind,
    pub title: String,
    pub fields: Vec<FormField>,
    pub focus: usize,
    /// Local validation failure or the server's rejection of the last submit.
    pub error: Option<String>,
    /// Set while the submitted command is in flight.
    pub submitting: bool,
}

impl Form {
    fn new(kind: FormKind, title: impl Into<String>, fields: Vec<FormField>) -> Self {
        Self {
            kind,
            title: title.into(),
            fields,
            focus: 0,
            error: None,
            submitting: false,
        }
    }

    pub fn handle(&mut self, action: FormAction) -> FormOutcome {
        match action {
            FormAction::Cancel => return FormOutcome::Cancelled,
            FormAction::NextField if !self.fields.is_empty() => {
                self.focus = (self.focus + 1) % self.fields.len();
            }
            FormAction::PrevField if !self.fields.is_empty() => {
                self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
            }
            FormAction::Submit if !self.submitting => match self.submit() {
                Ok(command) => {
                    self.error = None;
                    self.submitting = true;
                    return FormOutcome::Submitted(command);
                }
                Err(err) => self.error = Some(err.to_string()),
            },
            other => {
                if let Some(field) = self.fields.get_mut(self.focus) {
                    field.apply(other);
                }
            }
        }
        FormOutcome::Editing
    }

    /// Server rejected the submitted command; keep the draft for a retry.
    pub fn reject(&mut self, message: impl Into<String>) {
        self.submitting = false;
        self.error = Some(message.into());
    }

    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut FormField> {
        self.fields.iter_mut().find(|field| field.name == name)
    }

    /// Text of a text field, or the selected value of a choice field.
    pub fn value(&self, name: &str) -> &str {
        match self.field(name).map(|field| &field.input) {
            Some(FieldInput::Text { value, .. }) => value,
            Some(FieldInput::Choice { options, selected }) => {
                options.get(*selected).map(|option| option.value.as_str()).unwrap_or("")
            }
            _ => "",
        }
    }

    pub fn set_value(&mut self, name: &str, text: &str) {
        if let Some(FormField {
            input: FieldInput::Text { value, .. },
            ..
        }) = self.field_mut(name)
        {
            *value = text.to_string();
        }
    }

    pub fn checked(&self, name: &str) -> bool {
        matches!(
            self.field(name).map(|field| &field.input),
            Some(FieldInput::Toggle(true))
        )
    }

    /// Values of the chosen options of a multi-choice field, in option order.
    pub fn chosen(&self, name: &str) -> Vec<&str> {
        match self.field(name).map(|field| &field.input) {
            Some(FieldInput::MultiChoice { options, chosen, .. }) => options
                .iter()
                .zip(chosen)
                .filter(|(_, on)| **on)
                .map(|(option, _)| option.value.as_str())
                .collect(),
            _ => Vec::new(),
        }
    }

    fn optional(&self, name: &str) -> Option<String> {
        let value = self.value(name).trim();
        (!value.is_empty()).then(|| value.to_string())
    }

    fn parsed<T: std::str::FromStr>(&self, field: &'static str) -> Result<T, ValidationError> {
        self.value(field)
            .parse()
            .map_err(|_| ValidationError::new(field, "unknown choice"))
    }

    pub fn submit(&self) -> Result<Command, ValidationError> {
        match &self.kind {
            FormKind::Login => {
                let request = LoginRequest {
                    email: self.value("email").trim().to_string(),
                    password: self.value("password").to_string(),
                };
                request.validate()?;
                Ok(Command::Login(request))
            }
            FormKind::CreateAgent => {
                let draft = self.agent_draft()?;
                draft.validate()?;
                Ok(Command::CreateAgent(draft))
            }
            FormKind::EditAgent(id) => {
                let patch = AgentPatch::from(self.agent_draft()?);
                patch.validate()?;
                Ok(Command::UpdateAgent(id.clone(), patch))
            }
            FormKind::ConfigureAgent(id) => {
                let configuration = AgentConfiguration {
                    prompt_zh: self.value("prompt_zh").to_string(),
                    prompt_en: self.value("prompt_en").to_string(),
                    tool_ids: self.chosen("tool_ids").into_iter().map(ResourceId::new).collect(),
                    model_id: self.optional("model_id").map(ResourceId::new),
                    model_params: ModelParams {
                        temperature: parse_number("temperature", self.value("temperature"))?,
                        max_tokens: parse_number("max_tokens", self.value("max_tokens"))?,
                    },
                };
                configuration.validate()?;
                Ok(Command::ConfigureAgent(id.clone(), configuration))
            }
            FormKind::CreateTool => Ok(Command::CreateTool(self.tool_draft()?)),
            FormKind::EditTool(id) => Ok(Command::UpdateTool(id.clone(), ToolPatch::from(self.tool_draft()?))),
            FormKind::CreateModel => {
                let draft = self.model_draft()?;
                draft.validate()?;
                Ok(Command::CreateModel(draft))
            }
            FormKind::EditModel(id) => {
                let patch = ModelConfigPatch::from(self.model_draft()?);
                patch.validate()?;
                Ok(Command::UpdateModel(id.clone(), patch))
            }
            FormKind::CreatePrompt => {
                validation::require("agent_id", self.value("agent_id"))?;
                let draft = PromptDraft {
                    agent_id: ResourceId::new(self.value("agent_id").trim()),
                    name: self.value("name").trim().to_string(),
                    content_zh: self.value("content_zh").to_string(),
                    content_en: self.value("content_en").to_string(),
                    category: self.optional("category"),
                    tags: parse_tags(self.value("tags")),
                };
                draft.validate()?;
                Ok(Command::CreatePrompt(draft))
            }
            FormKind::EditPrompt(id) => {
                let patch = PromptPatch {
                    name: Some(self.value("name").trim().to_string()),
                    content_zh: Some(self.value("content_zh").to_string()),
                    content_en: Some(self.value("content_en").to_string()),
                    category: self.optional("category"),
                    tags: Some(parse_tags(self.value("tags"))),
                };
                patch.validate()?;
                Ok(Command::UpdatePrompt(id.clone(), patch))
            }
            FormKind::EditProfile => {
                let patch = UserPatch {
                    email: self.optional("email"),
                    username: self.optional("username"),
                    password: self.optional("password"),
                };
                patch.validate()?;
                Ok(Command::UpdateProfile(patch))
            }
            FormKind::TriggerFilter => Ok(Command::FetchTriggers(self.trigger_query()?)),
        }
    }

    fn agent_draft(&self) -> Result<AgentDraft, ValidationError> {
        Ok(AgentDraft {
            name: self.value("name").trim().to_string(),
            name_zh: self.optional("name_zh"),
            name_en: self.optional("name_en"),
            description: self.value("description").to_string(),
            pricing: parse_number("pricing", self.value("pricing"))?,
            visibility: self.parsed::<Visibility>("visibility")?,
            status: self.parsed::<AgentStatus>("status")?,
            agent_type: self.optional("type").unwrap_or_else(|| "assistant".to_string()),
        })
    }

    fn tool_draft(&self) -> Result<ToolDraft, ValidationError> {
        ToolDraft::from_form(
            self.value("name"),
            self.parsed::<ToolType>("type")?,
            self.value("endpoint"),
            self.value("description"),
            self.value("config_params"),
            self.checked("enabled"),
        )
    }

    fn model_draft(&self) -> Result<ModelConfigDraft, ValidationError> {
        let kind = self.parsed::<ModelKind>("kind")?;
        let config = match kind {
            ModelKind::Chat => ModelParamsShape::Chat(GenerationParams {
                temperature: parse_optional_number("temperature", self.value("temperature"))?,
                max_tokens: parse_optional_number("max_tokens", self.value("max_tokens"))?,
                top_p: parse_optional_number("top_p", self.value("top_p"))?,
            }),
            ModelKind::Embedding => ModelParamsShape::Embedding(EmbeddingParams {
                dimensions: parse_number("dimensions", self.value("dimensions"))?,
            }),
            ModelKind::Image => ModelParamsShape::Image(ImageParams {
                size: self.value("size").trim().to_string(),
                quality: self.value("quality").trim().to_string(),
            }),
        };
        Ok(ModelConfigDraft {
            model_name: self.value("model_name").trim().to_string(),
            weight: parse_number("weight", self.value("weight"))?,
            priority: parse_number("priority", self.value("priority"))?,
            base_api_url: self.value("base_api_url").trim().to_string(),
            api_key: self.value("api_key").trim().to_string(),
            is_enabled: self.checked("is_enabled"),
            config,
        })
    }

    fn trigger_query(&self) -> Result<TriggerQuery, ValidationError> {
        let status = match self.value("status") {
            "" | "any" => None,
            other => Some(
                other
                    .parse::<InvocationStatus>()
                    .map_err(|_| ValidationError::new("status", "unknown choice"))?,
            ),
        };
        let start_time = parse_date("start_date", self.value("start_date"), NaiveTime::MIN)?;
        let end_time = parse_date(
            "end_date",
            self.value("end_date"),
            NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN),
        )?;
        if start_time.is_some() != end_time.is_some() {
            return Err(ValidationError::new("end_date", "start and end dates go together"));
        }
        if let (Some(start), Some(end)) = (start_time, end_time) {
            if end < start {
                return Err(ValidationError::new("end_date", "must not be before the start date"));
            }
        }
        let page_size = parse_number("page_size", self.value("page_size"))?;
        validation::positive("page_size", page_size)?;
        Ok(TriggerQuery {
            agent_id: self.optional("agent_id").map(ResourceId::new),
            status,
            start_time,
            end_time,
            page: 1,
            page_size,
        })
    }
}

/// `YYYY-MM-DD` at `time` UTC, as epoch milliseconds.
fn parse_date(field: &'static str, text: &str, time: NaiveTime) -> Result<Option<i64>, ValidationError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    let date = NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map_err(|_| ValidationError::new(field, "expected YYYY-MM-DD"))?;
    Ok(Some(date.and_time(time).and_utc().timestamp_millis()))
}

fn options_from<T: Copy + ToString>(values: &[T], label: impl Fn(T) -> &'static str) -> Vec<SelectOption> {
    values
        .iter()
        .map(|value| SelectOption {
            value: value.to_string(),
            label: label(*value).to_string(),
        })
        .collect()
}

fn or_fallback(served: &[SelectOption], fallback: Vec<SelectOption>) -> Vec<SelectOption> {
    if served.is_empty() {
        fallback
    } else {
        served.to_vec()
    }
}

// === Builders ===

pub fn login() -> Form {
    Form::new(
        FormKind::Login,
        "Sign in",
        vec![FormField::text("email", "Email", ""), FormField::secret("password", "Password")],
    )
}

/// Create (no `existing`) or edit form for an agent. Choice lists come from
/// the backend when it served them.
pub fn agent(existing: Option<&Agent>, visibility: &[SelectOption], status: &[SelectOption]) -> Form {
    let visibility = or_fallback(
        visibility,
        options_from(Visibility::all(), |v| crate::theme::visibility_badge(v, &Default::default()).label),
    );
    let status = or_fallback(
        status,
        options_from(AgentStatus::all(), |s| crate::theme::agent_status_badge(s, &Default::default()).label),
    );
    let draft = AgentDraft::default();
    let (kind, title) = match existing {
        Some(agent) => (FormKind::EditAgent(agent.id.clone()), format!("Edit agent {}", agent.display_name())),
        None => (FormKind::CreateAgent, "New agent".to_string()),
    };
    let fields = vec![
        FormField::text("name", "Name", existing.map_or(draft.name.clone(), |a| a.name.clone())),
        FormField::text("name_zh", "Name (zh)", existing.and_then(|a| a.name_zh.clone()).unwrap_or_default()),
        FormField::text("name_en", "Name (en)", existing.and_then(|a| a.name_en.clone()).unwrap_or_default()),
        FormField::text(
            "description",
            "Description",
            existing.map_or(String::new(), |a| a.description.clone()),
        ),
        FormField::text("pricing", "Pricing", existing.map_or(draft.pricing, |a| a.pricing).to_string()),
        FormField::choice(
            "visibility",
            "Visibility",
            visibility,
            existing.map_or(draft.visibility, |a| a.visibility).as_str(),
        ),
        FormField::choice("status", "Status", status, existing.map_or(draft.status, |a| a.status).as_str()),
        FormField::text("type", "Type", existing.map_or(draft.agent_type, |a| a.agent_type.clone())),
    ];
    Form::new(kind, title, fields)
}

/// Prompt, tool and model binding of one agent. Tools are picked from the
/// loaded list; a bound id missing from it stays listed so saving does not
/// drop it silently.
pub fn agent_configuration(agent: &Agent, models: &[ModelConfig], tools: &[Tool]) -> Form {
    let params = agent.model_params.clone().unwrap_or_default();
    let mut model_options = vec![SelectOption {
        value: String::new(),
        label: "(none)".to_string(),
    }];
    model_options.extend(models.iter().map(|model| SelectOption {
        value: model.id.to_string(),
        label: model.model_name.clone(),
    }));
    let current_model = agent.model_id.as_ref().map(ResourceId::as_str).unwrap_or("");
    let mut tool_options: Vec<SelectOption> = tools
        .iter()
        .map(|tool| SelectOption {
            value: tool.id.to_string(),
            label: tool.name.clone(),
        })
        .collect();
    for id in &agent.tool_ids {
        if !tools.iter().any(|tool| &tool.id == id) {
            tool_options.push(SelectOption {
                value: id.to_string(),
                label: format!("{} (not loaded)", id),
            });
        }
    }
    let bound_tools: Vec<&str> = agent.tool_ids.iter().map(ResourceId::as_str).collect();
    Form::new(
        FormKind::ConfigureAgent(agent.id.clone()),
        format!("Configure {}", agent.display_name()),
        vec![
            FormField::text("prompt_zh", "Prompt (zh)", agent.prompt_zh.clone().unwrap_or_default()),
            FormField::text("prompt_en", "Prompt (en)", agent.prompt_en.clone().unwrap_or_default()),
            FormField::multi_choice("tool_ids", "Tools", tool_options, &bound_tools),
            FormField::choice("model_id", "Model", model_options, current_model),
            FormField::text("temperature", "Temperature", params.temperature.to_string()),
            FormField::text("max_tokens", "Max tokens", params.max_tokens.to_string()),
        ],
    )
}

pub fn tool(existing: Option<&Tool>) -> Form {
    let types = options_from(ToolType::all(), |t| crate::theme::tool_type_badge(t, &Default::default()).label);
    let (kind, title) = match existing {
        Some(tool) => (FormKind::EditTool(tool.id.clone()), format!("Edit tool {}", tool.name)),
        None => (FormKind::CreateTool, "New tool".to_string()),
    };
    let config = existing
        .filter(|tool| !tool.config_params.is_empty())
        .and_then(|tool| serde_json::to_string(&tool.config_params).ok())
        .unwrap_or_default();
    Form::new(
        kind,
        title,
        vec![
            FormField::text("name", "Name", existing.map_or(String::new(), |t| t.name.clone())),
            FormField::choice(
                "type",
                "Type",
                types,
                existing.map_or(ToolType::default(), |t| t.tool_type).as_str(),
            ),
            FormField::text("endpoint", "Endpoint", existing.map_or(String::new(), |t| t.endpoint.clone())),
            FormField::text(
                "description",
                "Description",
                existing.map_or(String::new(), |t| t.description.clone()),
            ),
            FormField::text("config_params", "Config (JSON)", config),
            FormField::toggle("enabled", "Enabled", existing.map_or(true, |t| t.enabled)),
        ],
    )
}

pub fn model(existing: Option<&ModelConfig>) -> Form {
    let kinds = options_from(ModelKind::all(), |k| crate::theme::model_kind_badge(k, &Default::default()).label);
    let (kind, title) = match existing {
        Some(model) => (FormKind::EditModel(model.id.clone()), format!("Edit model {}", model.model_name)),
        None => (FormKind::CreateModel, "New model configuration".to_string()),
    };
    let config = existing.map(|m| m.config.clone()).unwrap_or_default();
    let chat = match &config {
        ModelParamsShape::Chat(params) => params.clone(),
        _ => GenerationParams::default(),
    };
    let dimensions = match (&config, ModelParamsShape::empty(ModelKind::Embedding)) {
        (ModelParamsShape::Embedding(params), _) => params.dimensions,
        (_, ModelParamsShape::Embedding(defaults)) => defaults.dimensions,
        _ => 0,
    };
    let image = match (&config, ModelParamsShape::empty(ModelKind::Image)) {
        (ModelParamsShape::Image(params), _) => params.clone(),
        (_, ModelParamsShape::Image(defaults)) => defaults,
        _ => ImageParams {
            size: String::new(),
            quality: String::new(),
        },
    };
    let show = |value: Option<String>| value.unwrap_or_default();
    Form::new(
        kind,
        title,
        vec![
            FormField::text("model_name", "Model name", existing.map_or(String::new(), |m| m.model_name.clone())),
            FormField::text(
                "base_api_url",
                "Base API URL",
                existing.map_or(String::new(), |m| m.base_api_url.clone()),
            ),
            // Never prefilled; left blank on edit to keep the stored key.
            FormField::secret("api_key", "API key"),
            FormField::text("weight", "Weight", existing.map_or(1, |m| m.weight).to_string()),
            FormField::text("priority", "Priority", existing.map_or(0, |m| m.priority).to_string()),
            FormField::toggle("is_enabled", "Enabled", existing.map_or(true, |m| m.is_enabled)),
            FormField::choice("kind", "Kind", kinds, config.kind().as_str()),
            FormField::text("temperature", "Temperature", show(chat.temperature.map(|v| v.to_string()))),
            FormField::text("max_tokens", "Max tokens", show(chat.max_tokens.map(|v| v.to_string()))),
            FormField::text("top_p", "Top p", show(chat.top_p.map(|v| v.to_string()))),
            FormField::text("dimensions", "Dimensions", dimensions.to_string()),
            FormField::text("size", "Image size", image.size),
            FormField::text("quality", "Image quality", image.quality),
        ],
    )
}

pub fn prompt(existing: Option<&Prompt>, owner: Option<&ResourceId>) -> Form {
    let (kind, title) = match existing {
        Some(prompt) => (FormKind::EditPrompt(prompt.id.clone()), format!("Edit prompt {}", prompt.name)),
        None => (FormKind::CreatePrompt, "New prompt".to_string()),
    };
    let mut fields = Vec::new();
    if existing.is_none() {
        fields.push(FormField::text(
            "agent_id",
            "Agent id",
            owner.map(ResourceId::to_string).unwrap_or_default(),
        ));
    }
    fields.extend([
        FormField::text("name", "Name", existing.map_or(String::new(), |p| p.name.clone())),
        FormField::text("content_zh", "Content (zh)", existing.map_or(String::new(), |p| p.content_zh.clone())),
        FormField::text("content_en", "Content (en)", existing.map_or(String::new(), |p| p.content_en.clone())),
        FormField::text("category", "Category", existing.and_then(|p| p.category.clone()).unwrap_or_default()),
        FormField::text("tags", "Tags", existing.map_or(String::new(), |p| p.tags.join(", "))),
    ]);
    Form::new(kind, title, fields)
}

pub fn profile(user: Option<&User>) -> Form {
    Form::new(
        FormKind::EditProfile,
        "Edit profile",
        vec![
            FormField::text("email", "Email", user.map_or(String::new(), |u| u.email.clone())),
            FormField::text("username", "Username", user.and_then(|u| u.username.clone()).unwrap_or_default()),
            FormField::secret("password", "New password"),
        ],
    )
}

pub fn trigger_filter(query: &TriggerQuery) -> Form {
    let mut statuses = vec![SelectOption {
        value: "any".to_string(),
        label: "Any".to_string(),
    }];
    statuses.extend(options_from(InvocationStatus::all(), |s| {
        crate::theme::invocation_status_badge(s, &Default::default()).label
    }));
    let format_date = |millis: Option<i64>| {
        millis
            .and_then(chrono::DateTime::from_timestamp_millis)
            .map(|at| at.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    };
    Form::new(
        FormKind::TriggerFilter,
        "Filter invocations",
        vec![
            FormField::text(
                "agent_id",
                "Agent id",
                query.agent_id.as_ref().map(ResourceId::to_string).unwrap_or_default(),
            ),
            FormField::choice(
                "status",
                "Status",
                statuses,
                query.status.map_or("any", |status| status.as_str()),
            ),
            FormField::text("start_date", "From (YYYY-MM-DD)", format_date(query.start_time)),
            FormField::text("end_date", "To (YYYY-MM-DD)", format_date(query.end_time)),
            FormField::text("page_size", "Page size", query.page_size.to_string()),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_into(form: &mut Form, text: &str) {
        for c in text.chars() {
            form.handle(FormAction::Input(c));
        }
    }

    #[test]
    fn login_submits_trimmed_credentials() {
        let mut form = login();
        type_into(&mut form, " admin@example.com ");
        form.handle(FormAction::NextField);
        type_into(&mut form, "secret-pass");

        match form.handle(FormAction::Submit) {
            FormOutcome::Submitted(Command::Login(request)) => {
                assert_eq!(request.email, "admin@example.com");
                assert_eq!(request.password, "secret-pass");
            }
            other => panic!("unexpected outcome {:?}", other),
        }
        assert!(form.submitting);
    }

    #[test]
    fn validation_failure_stays_in_the_form() {
        let mut form = login();
        assert_eq!(form.handle(FormAction::Submit), FormOutcome::Editing);
        assert!(form.error.is_some());
        assert!(!form.submitting);
    }

    #[test]
    fn tool_form_rejects_non_object_config() {
        let mut form = tool(None);
        form.set_value("name", "search");
        form.set_value("endpoint", "https://tools.example.com/search");
        form.set_value("config_params", "[1, 2]");
        assert_eq!(form.handle(FormAction::Submit), FormOutcome::Editing);
        assert!(form.error.as_deref().unwrap_or("").contains("config_params"));
    }

    #[test]
    fn choice_fields_cycle_and_wrap() {
        let mut form = tool(None);
        form.focus = 1;
        let first = form.value("type").to_string();
        for _ in ToolType::all() {
            form.handle(FormAction::CycleNext);
        }
        assert_eq!(form.value("type"), first);
        form.handle(FormAction::CyclePrev);
        assert_ne!(form.value("type"), first);
    }

    #[test]
    fn blank_api_key_is_not_sent_on_edit() {
        let model = ModelConfig {
            id: ResourceId::new("m1"),
            model_name: "gpt-4o".into(),
            weight: 1,
            priority: 0,
            base_api_url: "https://llm.example.com/v1".into(),
            is_enabled: true,
            config: ModelParamsShape::default(),
        };
        match super::model(Some(&model)).submit().unwrap() {
            Command::UpdateModel(id, patch) => {
                assert_eq!(id, ResourceId::new("m1"));
                assert_eq!(patch.api_key, None);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn trigger_dates_become_a_millisecond_range() {
        let mut form = trigger_filter(&TriggerQuery::default());
        form.set_value("start_date", "2024-06-01");
        form.set_value("end_date", "2024-06-02");
        match form.submit().unwrap() {
            Command::FetchTriggers(query) => {
                assert_eq!(query.start_time, Some(1_717_200_000_000));
                assert_eq!(query.end_time, Some(1_717_372_799_999));
                assert_eq!(query.status, None);
                assert_eq!(query.page, 1);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    fn configurable_agent() -> Agent {
        serde_json::from_value(serde_json::json!({
            "id": "a1",
            "name": "helper",
            "tool_ids": ["t2", "gone"],
            "model_id": "m1"
        }))
        .unwrap()
    }

    fn loaded_tools() -> Vec<Tool> {
        serde_json::from_value(serde_json::json!([
            {"id": "t1", "name": "search"},
            {"id": "t2", "name": "fetch"}
        ]))
        .unwrap()
    }

    fn submitted_configuration(form: &Form) -> AgentConfiguration {
        match form.submit().unwrap() {
            Command::ConfigureAgent(id, configuration) => {
                assert_eq!(id, ResourceId::new("a1"));
                configuration
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn tools_are_picked_from_the_loaded_list() {
        let mut form = agent_configuration(&configurable_agent(), &[], &loaded_tools());
        assert_eq!(form.chosen("tool_ids"), vec!["t2", "gone"]);

        form.focus = form.fields.iter().position(|f| f.name == "tool_ids").unwrap();
        assert!(form.fields[form.focus].display().contains("search"));
        form.handle(FormAction::Input(' '));
        form.handle(FormAction::CycleNext);
        form.handle(FormAction::CycleNext);
        form.handle(FormAction::Input(' '));
        // Letters do not type into a choice list.
        type_into(&mut form, "t9");

        let configuration = submitted_configuration(&form);
        assert_eq!(configuration.tool_ids, vec![ResourceId::new("t1"), ResourceId::new("t2")]);
    }

    #[test]
    fn choosing_no_model_unbinds_it() {
        let models: Vec<ModelConfig> = serde_json::from_value(serde_json::json!([
            {"id": "m1", "model_name": "gpt-4o"}
        ]))
        .unwrap();
        let mut form = agent_configuration(&configurable_agent(), &models, &loaded_tools());
        assert_eq!(form.value("model_id"), "m1");

        form.focus = form.fields.iter().position(|f| f.name == "model_id").unwrap();
        form.handle(FormAction::CyclePrev);
        assert_eq!(form.value("model_id"), "");

        let patch = AgentPatch::from(submitted_configuration(&form));
        assert_eq!(patch.model_id, Some(None));
    }

    #[test]
    fn half_open_date_range_is_rejected() {
        let mut form = trigger_filter(&TriggerQuery::default());
        form.set_value("start_date", "2024-06-01");
        assert!(form.submit().is_err());
    }
}
