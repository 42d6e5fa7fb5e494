//! # Presence
//!
//! Who else is looking at the document, and who holds the editing lock.
//!
//! The session only talks to a [`PresenceProvider`]. [`StaticPresence`] is
//! the in-memory roster used when there is no real-time channel; a networked
//! provider would update the same two pieces of state from incoming events.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

pub const ADJECTIVES: [&str; 8] = [
    "Happy",
    "Creative",
    "Energetic",
    "Thoughtful",
    "Brilliant",
    "Calm",
    "Eager",
    "Gentle",
];

pub const NOUNS: [&str; 8] = [
    "Explorer",
    "Dreamer",
    "Creator",
    "Thinker",
    "Artist",
    "Writer",
    "Designer",
    "Innovator",
];

pub const USER_COLORS: [&str; 8] = [
    "#FF6B6B", "#4ECDC4", "#FFD166", "#6B5B95", "#88B04B", "#EFC050", "#7FDBFF", "#2ECC40",
];

/// One entry in the roster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collaborator {
    pub id: String,
    pub username: String,
    pub color: String,
    pub is_editing: bool,
}

impl Collaborator {
    pub fn new(id: impl Into<String>, username: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            color: color.into(),
            is_editing: false,
        }
    }

    /// Two-letter avatar label
    pub fn initials(&self) -> String {
        self.username.chars().take(2).collect()
    }
}

/// The person at this keyboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalUser {
    pub username: String,
    pub color: String,
}

impl LocalUser {
    pub fn new(username: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            color: color.into(),
        }
    }

    /// Name and color picked from the word and color lists by `seed`
    pub fn from_seed(seed: u64) -> Self {
        let pick = |shift: u32, len: usize| ((seed >> shift) % len as u64) as usize;
        let adjective = ADJECTIVES[pick(0, ADJECTIVES.len())];
        let noun = NOUNS[pick(8, NOUNS.len())];
        let color = USER_COLORS[pick(16, USER_COLORS.len())];
        Self::new(format!("{} {}", adjective, noun), color)
    }

    /// A fresh random-looking identity for a new session
    pub fn generate() -> Self {
        let now = chrono::Utc::now();
        let seed = now.timestamp_subsec_nanos() as u64 ^ (now.timestamp() as u64).rotate_left(24);
        Self::from_seed(seed)
    }
}

/// Source of roster and editing-lock state
pub trait PresenceProvider {
    /// Everyone currently connected, the local user included
    fn roster(&self) -> Vec<Collaborator>;

    /// Username holding the editing lock
    fn current_editor(&self) -> Option<String>;

    fn set_current_editor(&mut self, username: Option<String>);
}

/// Fixed roster with a client-local lock
#[derive(Debug, Clone)]
pub struct StaticPresence {
    collaborators: Vec<Collaborator>,
    current_editor: Option<String>,
}

impl StaticPresence {
    pub fn new(collaborators: Vec<Collaborator>) -> Self {
        Self {
            collaborators,
            current_editor: None,
        }
    }

    /// Two sample collaborators plus the local user
    pub fn demo(local: &LocalUser) -> Self {
        Self::new(vec![
            Collaborator::new("1", "Alice Writer", "#FF6B6B"),
            Collaborator::new("2", "Bob Editor", "#4ECDC4"),
            Collaborator::new("3", local.username.clone(), local.color.clone()),
        ])
    }

    /// Roster holding only the local user
    pub fn solo(local: &LocalUser) -> Self {
        Self::new(vec![Collaborator::new(
            "1",
            local.username.clone(),
            local.color.clone(),
        )])
    }
}

impl PresenceProvider for StaticPresence {
    fn roster(&self) -> Vec<Collaborator> {
        self.collaborators
            .iter()
            .map(|c| Collaborator {
                is_editing: self.current_editor.as_deref() == Some(c.username.as_str()),
                ..c.clone()
            })
            .collect()
    }

    fn current_editor(&self) -> Option<String> {
        self.current_editor.clone()
    }

    fn set_current_editor(&mut self, username: Option<String>) {
        self.current_editor = username;
    }
}

/// True when someone other than `local` holds the lock
pub fn is_locked_for(presence: &dyn PresenceProvider, local: &LocalUser) -> bool {
    presence
        .current_editor()
        .map(|editor| editor != local.username)
        .unwrap_or(false)
}

/// Update the lock holder, logging when another user takes it
pub fn hand_lock_to(presence: &mut dyn PresenceProvider, local: &LocalUser, username: Option<String>) {
    match &username {
        Some(name) if *name != local.username => {
            warn!(editor = %name, "{} is currently editing...", name)
        }
        Some(name) => info!(editor = %name, "Editing lock claimed"),
        None => info!("Editing lock released"),
    }
    presence.set_current_editor(username);
}
