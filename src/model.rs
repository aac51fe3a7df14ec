//! Core data model.
//!
//! An event is a named campaign with a date window. Questions are matched
//! against its aliases and answered from its fields.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Event
// ---------------------------------------------------------------------------

/// A time-bounded campaign.
///
/// Field names match the persisted JSON layout exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Display name. Expected to be unique, not enforced.
    pub name: String,

    /// Substrings that identify this event in free text, in match order.
    /// An empty list makes the event unreachable.
    pub aliases: Vec<String>,

    /// First day of the window, `YYYY-MM-DD`. Kept raw so bad data
    /// surfaces when the window is evaluated.
    pub start: String,

    /// Last day of the window, `YYYY-MM-DD`.
    pub end: String,

    /// What the event entails.
    pub content: String,

    /// What participants receive.
    pub reward: String,
}

// ---------------------------------------------------------------------------
// Intent
// ---------------------------------------------------------------------------

/// Which aspect of an event a question asks about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentKind {
    Start,
    End,
    Reward,
    Content,
    /// Whether the event is running right now.
    Active,
}

impl std::fmt::Display for IntentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            IntentKind::Start => "start",
            IntentKind::End => "end",
            IntentKind::Reward => "reward",
            IntentKind::Content => "content",
            IntentKind::Active => "active",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for IntentKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "start" => Ok(IntentKind::Start),
            "end" => Ok(IntentKind::End),
            "reward" => Ok(IntentKind::Reward),
            "content" => Ok(IntentKind::Content),
            "active" => Ok(IntentKind::Active),
            other => Err(format!("unknown intent: {other}")),
        }
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Builder for events entered by an operator (admin form or CLI).
pub struct NewEvent {
    name: String,
    aliases: Vec<String>,
    start: String,
    end: String,
    content: String,
    reward: String,
}

impl NewEvent {
    pub fn new(name: impl Into<String>, start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
            start: start.into(),
            end: end.into(),
            content: String::new(),
            reward: String::new(),
        }
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Split a comma-separated alias list. Entries are trimmed and
    /// empty ones dropped.
    pub fn aliases_csv(mut self, csv: &str) -> Self {
        self.aliases.extend(
            csv.split(',')
                .map(str::trim)
                .filter(|a| !a.is_empty())
                .map(String::from),
        );
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn reward(mut self, reward: impl Into<String>) -> Self {
        self.reward = reward.into();
        self
    }

    /// Finish the event without validation.
    pub fn build(self) -> Event {
        Event {
            name: self.name,
            aliases: self.aliases,
            start: self.start,
            end: self.end,
            content: self.content,
            reward: self.reward,
        }
    }
}
