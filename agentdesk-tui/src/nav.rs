//! Navigation and view switching utilities.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum View {
    Login,
    Dashboard,
    Agents,
    Tools,
    Models,
    Prompts,
    Triggers,
    Profile,
}

impl View {
    pub fn title(&self) -> &'static str {
        match self {
            View::Login => "Login",
            View::Dashboard => "Dashboard",
            View::Agents => "Agents",
            View::Tools => "Tools",
            View::Models => "Models",
            View::Prompts => "Prompts",
            View::Triggers => "Triggers",
            View::Profile => "Profile",
        }
    }

    /// Views reachable from the tab bar, in tab order. All of them need a
    /// session.
    pub fn all() -> &'static [View] {
        &[
            View::Dashboard,
            View::Agents,
            View::Tools,
            View::Models,
            View::Prompts,
            View::Triggers,
            View::Profile,
        ]
    }

    pub fn requires_auth(&self) -> bool {
        !matches!(self, View::Login)
    }

    /// Views that page through a list and remember their page size.
    pub fn is_paged(&self) -> bool {
        matches!(
            self,
            View::Agents | View::Tools | View::Models | View::Prompts | View::Triggers
        )
    }

    pub fn index(&self) -> Option<usize> {
        Self::all().iter().position(|v| v == self)
    }

    pub fn from_index(index: usize) -> Option<View> {
        Self::all().get(index).copied()
    }

    pub fn next(&self) -> View {
        let all = Self::all();
        match self.index() {
            Some(idx) => all[(idx + 1) % all.len()],
            None => all[0],
        }
    }

    pub fn previous(&self) -> View {
        let all = Self::all();
        match self.index() {
            Some(0) | None => all[all.len() - 1],
            Some(idx) => all[idx - 1],
        }
    }
}

/// Where a navigation request actually lands.
pub fn resolve(target: View, authenticated: bool) -> View {
    if target.requires_auth() && !authenticated {
        View::Login
    } else if target == View::Login && authenticated {
        View::Dashboard
    } else {
        target
    }
}
