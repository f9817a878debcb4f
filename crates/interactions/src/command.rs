//! Command definitions and the handler trait.

use crate::event::{InteractionEvent, OptionKind};
use crate::options::Options;
use crate::responder::Responder;
use async_trait::async_trait;
use std::sync::Arc;

/// Declared shape of one command parameter.
#[derive(Debug, Clone)]
pub struct ParameterSpec {
    pub name: String,
    pub kind: OptionKind,
    pub required: bool,
    /// Closed set of allowed literal values. Enforced by the platform before
    /// dispatch; carried here for the help surface only.
    pub choices: Vec<String>,
    pub min: Option<i64>,
    pub max: Option<i64>,
}

impl ParameterSpec {
    pub fn new(name: impl Into<String>, kind: OptionKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required: false,
            choices: Vec::new(),
            min: None,
            max: None,
        }
    }

    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, OptionKind::String)
    }

    pub fn integer(name: impl Into<String>) -> Self {
        Self::new(name, OptionKind::Integer)
    }

    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, OptionKind::Boolean)
    }

    pub fn user(name: impl Into<String>) -> Self {
        Self::new(name, OptionKind::User)
    }

    pub fn channel(name: impl Into<String>) -> Self {
        Self::new(name, OptionKind::Channel)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn choices<I, S>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.choices = choices.into_iter().map(Into::into).collect();
        self
    }

    pub fn bounds(mut self, min: i64, max: i64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }
}

/// Handler for one command.
///
/// The responder is bound to the dispatched event; the accessor reads the
/// event's arguments against the command's declared parameters. Returned
/// errors are logged by the dispatcher and never crash the process.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    async fn handle(
        &self,
        event: &InteractionEvent,
        responder: &Responder,
        options: &Options<'_>,
    ) -> anyhow::Result<()>;
}

/// One entry in the command catalogue. Immutable once registered.
pub struct CommandDefinition {
    pub name: String,
    pub description: String,
    /// Free-form grouping label, display-only.
    pub category: String,
    pub options: Vec<ParameterSpec>,
    pub handler: Arc<dyn CommandHandler>,
}

impl CommandDefinition {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
        handler: Arc<dyn CommandHandler>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            category: category.into(),
            options: Vec::new(),
            handler,
        }
    }

    pub fn option(mut self, spec: ParameterSpec) -> Self {
        self.options.push(spec);
        self
    }
}

impl std::fmt::Debug for CommandDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandDefinition")
            .field("name", &self.name)
            .field("category", &self.category)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
