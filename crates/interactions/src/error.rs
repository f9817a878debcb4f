//! Core error types.

use crate::event::OptionKind;
use thiserror::Error;

/// A platform call failed at the transport level (network error, rate limit,
/// rejected payload). Local acknowledgment state is never advanced past a
/// transport failure, so the caller may retry with a follow-up or give up.
#[derive(Error, Debug)]
#[error("transport error: {0}")]
pub struct TransportError(String);

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Errors raised while building the command catalogue. These are
/// configuration errors: the process should not start with a broken registry.
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("duplicate command name: {0}")]
    DuplicateCommand(String),

    #[error("invalid command definition: {0}")]
    InvalidDefinition(String),
}

/// Errors from the per-interaction acknowledgment state machine.
#[derive(Error, Debug)]
pub enum ResponderError {
    /// A first acknowledgment (respond/defer) was attempted twice.
    #[error("interaction already acknowledged")]
    AlreadyAcknowledged,

    /// Edit or follow-up was attempted before any acknowledgment.
    #[error("interaction not yet acknowledged")]
    NotYetAcknowledged,

    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// An accessor asked for a kind that does not match the submitted value.
/// This is a registry/handler mismatch bug, not user error.
#[derive(Error, Debug)]
#[error("option '{name}' carries a {found} value, accessor requested {requested}")]
pub struct TypeMismatch {
    pub name: String,
    pub requested: OptionKind,
    pub found: OptionKind,
}

/// Dispatch-time failures.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// The platform delivered a command absent from the local registry.
    /// Indicates a stale platform catalogue; the event is dropped.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// The shutdown latch is set; no new events are accepted.
    #[error("dispatcher is closed")]
    Closed,
}
