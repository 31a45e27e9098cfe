//! Event types for the TUI event loop.

use crate::commands::Settled;
use agentdesk_client::ClientEvent;
use agentdesk_store::StoreChange;
use crossterm::event::KeyEvent;

#[derive(Debug, Clone)]
pub enum TuiEvent {
    Input(KeyEvent),
    Tick,
    Resize { width: u16, height: u16 },
    /// Notification or session expiry raised by the HTTP adapter.
    Client(ClientEvent),
    /// A slice changed; the next draw picks it up.
    Store(StoreChange),
    /// A spawned command finished.
    Settled(Settled),
}
