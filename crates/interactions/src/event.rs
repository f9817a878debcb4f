//! Interaction event types.

use std::collections::HashMap;
use std::fmt;

pub type UserId = u64;
pub type ChannelId = u64;
pub type GuildId = u64;

/// The kind of a command parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    String,
    Integer,
    Boolean,
    User,
    Channel,
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OptionKind::String => "string",
            OptionKind::Integer => "integer",
            OptionKind::Boolean => "boolean",
            OptionKind::User => "user",
            OptionKind::Channel => "channel",
        };
        f.write_str(name)
    }
}

/// A caller-supplied argument value, tagged with its wire kind.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    String(String),
    Integer(i64),
    Boolean(bool),
    User(UserId),
    Channel(ChannelId),
}

impl OptionValue {
    pub fn kind(&self) -> OptionKind {
        match self {
            OptionValue::String(_) => OptionKind::String,
            OptionValue::Integer(_) => OptionKind::Integer,
            OptionValue::Boolean(_) => OptionKind::Boolean,
            OptionValue::User(_) => OptionKind::User,
            OptionValue::Channel(_) => OptionKind::Channel,
        }
    }
}

/// An immutable snapshot of one user invocation, delivered once per event.
///
/// `guild_id` is absent for direct-message invocations. The token is the
/// platform's per-interaction response credential and is consumed by the
/// responder, never by handlers directly.
#[derive(Debug, Clone)]
pub struct InteractionEvent {
    pub id: u64,
    pub token: String,
    pub command: String,
    pub arguments: HashMap<String, OptionValue>,
    pub user_id: UserId,
    pub guild_id: Option<GuildId>,
    pub channel_id: ChannelId,
}
