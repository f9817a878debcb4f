//! Command registry and interaction-response lifecycle management.
//!
//! Holds the catalogue of invocable commands, dispatches each incoming
//! interaction to its handler exactly once, and tracks the platform's
//! acknowledgment state machine (unacknowledged → responded/deferred →
//! edits/follow-ups) so handlers can't double-respond or miss the
//! acknowledgment window silently.

mod command;
mod dispatcher;
mod error;
mod event;
mod options;
mod registry;
mod responder;
mod session;

pub use command::{CommandDefinition, CommandHandler, ParameterSpec};
pub use dispatcher::Dispatcher;
pub use error::{
    DispatchError, RegistryError, ResponderError, TransportError, TypeMismatch,
};
pub use event::{ChannelId, GuildId, InteractionEvent, OptionKind, OptionValue, UserId};
pub use options::Options;
pub use registry::CommandRegistry;
pub use responder::{AckState, Responder};
pub use session::{ChannelProfile, GuildProfile, Session, UserProfile};
