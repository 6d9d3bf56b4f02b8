//! Conversation turns.

use crate::error::BridgeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Who spoke a [`Turn`]. Closed set: anything else is a malformed envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The human on the client side.
    User,
    /// The agent.
    Assistant,
    /// Instructions injected by the client application.
    System,
}

impl Role {
    /// Wire name of the role.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::System => "system",
        }
    }

    pub(crate) fn from_name(s: &str) -> Option<Self> {
        match s {
            "user" => Some(Role::User),
            "assistant" => Some(Role::Assistant),
            "system" => Some(Role::System),
            _ => None,
        }
    }

    pub(crate) fn unknown(s: &str) -> String {
        format!("unknown role `{s}`, expected one of user, assistant, system")
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::from_name(s).ok_or_else(|| BridgeError::malformed("role", Role::unknown(s)))
    }
}

/// One message in the conversation. Order across turns is significant
/// (oldest first) and is never changed by the bridge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Turn {
    role: Role,
    content: String,
}

impl Turn {
    /// Create a turn.
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// A `user` turn.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// An `assistant` turn.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// A `system` turn.
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    /// Who spoke.
    pub fn role(&self) -> Role {
        self.role
    }

    /// What was said.
    pub fn content(&self) -> &str {
        &self.content
    }
}
