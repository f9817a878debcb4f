//! Discord interaction wire types.
//!
//! Snowflake ids travel as strings on the wire and as `u64` in memory.

use interactions::{InteractionEvent, OptionValue};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

/// Interaction types.
pub const INTERACTION_PING: u8 = 1;
pub const INTERACTION_APPLICATION_COMMAND: u8 = 2;

/// Interaction callback types.
pub const CALLBACK_PONG: u8 = 1;
pub const CALLBACK_CHANNEL_MESSAGE: u8 = 4;
pub const CALLBACK_DEFERRED_CHANNEL_MESSAGE: u8 = 5;

/// Application command option type codes.
pub const OPTION_STRING: u8 = 3;
pub const OPTION_INTEGER: u8 = 4;
pub const OPTION_BOOLEAN: u8 = 5;
pub const OPTION_USER: u8 = 6;
pub const OPTION_CHANNEL: u8 = 7;

/// Message flag marking a response visible only to the invoker.
pub const MESSAGE_FLAG_EPHEMERAL: u64 = 1 << 6;

pub(crate) mod snowflake {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

pub(crate) mod snowflake_opt {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<u64>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        raw.map(|s| s.parse().map_err(serde::de::Error::custom))
            .transpose()
    }
}

/// An incoming interaction as delivered by the platform.
#[derive(Debug, Clone, Deserialize)]
pub struct Interaction {
    #[serde(with = "snowflake")]
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: u8,
    pub token: String,
    #[serde(default)]
    pub data: Option<InteractionData>,
    #[serde(default, with = "snowflake_opt")]
    pub guild_id: Option<u64>,
    #[serde(default, with = "snowflake_opt")]
    pub channel_id: Option<u64>,
    /// Present for guild invocations.
    #[serde(default)]
    pub member: Option<GuildMember>,
    /// Present for direct-message invocations.
    #[serde(default)]
    pub user: Option<User>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InteractionData {
    pub name: String,
    #[serde(default)]
    pub options: Vec<CommandOption>,
}

/// One submitted argument, tagged with its type code.
#[derive(Debug, Clone, Deserialize)]
pub struct CommandOption {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: u8,
    #[serde(default)]
    pub value: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    #[serde(with = "snowflake")]
    pub id: u64,
    pub username: String,
    #[serde(default)]
    pub global_name: Option<String>,
    #[serde(default)]
    pub bot: bool,
    #[serde(default)]
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GuildMember {
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub nick: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Channel {
    #[serde(with = "snowflake")]
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Guild {
    #[serde(with = "snowflake")]
    pub id: u64,
    pub name: String,
}

/// Outgoing interaction response payload.
#[derive(Debug, Clone, Serialize)]
pub struct InteractionResponse {
    #[serde(rename = "type")]
    pub kind: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<CallbackData>,
}

impl InteractionResponse {
    pub fn pong() -> Self {
        Self {
            kind: CALLBACK_PONG,
            data: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CallbackData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<u64>,
}

impl Interaction {
    /// Convert an application-command interaction into the core event.
    ///
    /// Pings, component interactions and structurally incomplete payloads
    /// yield `None`. Options with unsupported type codes are skipped; the
    /// registry's declared specs decide what handlers may read.
    pub fn to_event(&self) -> Option<InteractionEvent> {
        if self.kind != INTERACTION_APPLICATION_COMMAND {
            return None;
        }
        let data = self.data.as_ref()?;
        let user = self
            .member
            .as_ref()
            .and_then(|m| m.user.as_ref())
            .or(self.user.as_ref())?;
        let channel_id = self.channel_id?;

        let mut arguments = HashMap::new();
        for option in &data.options {
            match decode_option(option) {
                Some(value) => {
                    arguments.insert(option.name.clone(), value);
                }
                None => {
                    warn!(
                        option = %option.name,
                        kind = option.kind,
                        "skipping option with unsupported type code"
                    );
                }
            }
        }

        Some(InteractionEvent {
            id: self.id,
            token: self.token.clone(),
            command: data.name.clone(),
            arguments,
            user_id: user.id,
            guild_id: self.guild_id,
            channel_id,
        })
    }
}

fn decode_option(option: &CommandOption) -> Option<OptionValue> {
    let value = option.value.as_ref()?;
    match option.kind {
        OPTION_STRING => value.as_str().map(|s| OptionValue::String(s.to_string())),
        OPTION_INTEGER => value.as_i64().map(OptionValue::Integer),
        OPTION_BOOLEAN => value.as_bool().map(OptionValue::Boolean),
        OPTION_USER => value
            .as_str()
            .and_then(|s| s.parse().ok())
            .map(OptionValue::User),
        OPTION_CHANNEL => value
            .as_str()
            .and_then(|s| s.parse().ok())
            .map(OptionValue::Channel),
        _ => None,
    }
}
