//! Field naming spoken by a client.

/// Which body shape a client sent, and so which one it reads back.
///
/// | Dialect | Request | Response |
/// |---------|---------|----------|
/// | `Current` | `{turns, operations?, snapshot?}` | `{reply, operations?, snapshot?}` |
/// | `Conversation` | `{messages, actions?, context?}` | `{response, actions?, context?}` |
/// | `SingleMessage` | `{message, state?}` | `{response, actions?, state?}` |
///
/// Older dialects write operations as `{type, payload}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    /// The envelope's own field names.
    #[default]
    Current,
    /// `messages` / `actions` / `context`, with `type` for an operation's kind.
    Conversation,
    /// One `message` plus `state`, no history.
    SingleMessage,
}

impl Dialect {
    /// Key carrying the reply text.
    pub(crate) fn reply_key(self) -> &'static str {
        match self {
            Dialect::Current => "reply",
            Dialect::Conversation | Dialect::SingleMessage => "response",
        }
    }

    pub(crate) fn operations_key(self) -> &'static str {
        match self {
            Dialect::Current => "operations",
            Dialect::Conversation | Dialect::SingleMessage => "actions",
        }
    }

    pub(crate) fn kind_key(self) -> &'static str {
        match self {
            Dialect::Current => "kind",
            Dialect::Conversation | Dialect::SingleMessage => "type",
        }
    }

    pub(crate) fn snapshot_key(self) -> &'static str {
        match self {
            Dialect::Current => "snapshot",
            Dialect::Conversation => "context",
            Dialect::SingleMessage => "state",
        }
    }
}
