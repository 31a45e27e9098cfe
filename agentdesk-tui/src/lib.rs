//! agentdesk TUI library exports.

pub mod app;
pub mod chat;
pub mod commands;
pub mod config;
pub mod error;
pub mod events;
pub mod forms;
pub mod keys;
pub mod logging;
pub mod nav;
pub mod persistence;
pub mod theme;
pub mod views;
pub mod widgets;
