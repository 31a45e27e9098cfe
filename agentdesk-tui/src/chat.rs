//! Local test chat shown next to an agent.
//!
//! Nothing is sent to the backend: every message gets a canned reply
//! naming the agent.

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
    pub sent_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct ChatPanel {
    pub agent_name: String,
    pub messages: Vec<ChatMessage>,
    pub input: String,
}

impl ChatPanel {
    pub fn new(agent_name: impl Into<String>) -> Self {
        Self {
            agent_name: agent_name.into(),
            messages: Vec::new(),
            input: String::new(),
        }
    }

    /// Send the pending input. Blank input is ignored.
    pub fn send(&mut self) -> bool {
        let content = self.input.trim().to_string();
        if content.is_empty() {
            return false;
        }
        self.input.clear();
        self.messages.push(ChatMessage {
            role: ChatRole::User,
            content,
            sent_at: Utc::now(),
        });
        self.messages.push(ChatMessage {
            role: ChatRole::Assistant,
            content: canned_reply(&self.agent_name),
            sent_at: Utc::now(),
        });
        true
    }

    pub fn speaker<'a>(&'a self, message: &ChatMessage) -> &'a str {
        match message.role {
            ChatRole::User => "You",
            ChatRole::Assistant if self.agent_name.is_empty() => "Agent",
            ChatRole::Assistant => &self.agent_name,
        }
    }
}

fn canned_reply(agent_name: &str) -> String {
    let name = if agent_name.trim().is_empty() { "Agent" } else { agent_name };
    format!(
        "This is a test reply from {}. A real deployment would answer through the backend.",
        name
    )
}
