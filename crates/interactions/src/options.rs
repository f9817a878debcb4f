//! Typed access to an interaction's submitted arguments.

use crate::command::ParameterSpec;
use crate::error::TypeMismatch;
use crate::event::{ChannelId, InteractionEvent, OptionKind, OptionValue, UserId};

/// Accessor bound to one event and its command's declared parameters.
///
/// Omitted optional parameters read as the kind's zero value; a present value
/// of the wrong kind is a registry/handler mismatch and surfaces as
/// [`TypeMismatch`] so the bug lands in logs instead of in front of the user.
pub struct Options<'a> {
    event: &'a InteractionEvent,
    specs: &'a [ParameterSpec],
}

impl<'a> Options<'a> {
    pub fn bind(event: &'a InteractionEvent, specs: &'a [ParameterSpec]) -> Self {
        Self { event, specs }
    }

    /// String argument; empty string when omitted.
    pub fn string(&self, name: &str) -> Result<String, TypeMismatch> {
        match self.event.arguments.get(name) {
            None => Ok(String::new()),
            Some(OptionValue::String(s)) => Ok(s.clone()),
            Some(other) => Err(self.mismatch(name, OptionKind::String, other)),
        }
    }

    /// Integer argument; zero when omitted. Clamped to the declared
    /// `min`/`max` bounds when present.
    pub fn integer(&self, name: &str) -> Result<i64, TypeMismatch> {
        let value = match self.event.arguments.get(name) {
            None => return Ok(0),
            Some(OptionValue::Integer(v)) => *v,
            Some(other) => return Err(self.mismatch(name, OptionKind::Integer, other)),
        };
        Ok(self.clamp(name, value))
    }

    /// Boolean argument; false when omitted.
    pub fn boolean(&self, name: &str) -> Result<bool, TypeMismatch> {
        match self.event.arguments.get(name) {
            None => Ok(false),
            Some(OptionValue::Boolean(b)) => Ok(*b),
            Some(other) => Err(self.mismatch(name, OptionKind::Boolean, other)),
        }
    }

    /// User reference; `None` when omitted.
    pub fn user(&self, name: &str) -> Result<Option<UserId>, TypeMismatch> {
        match self.event.arguments.get(name) {
            None => Ok(None),
            Some(OptionValue::User(id)) => Ok(Some(*id)),
            Some(other) => Err(self.mismatch(name, OptionKind::User, other)),
        }
    }

    /// Channel reference; `None` when omitted.
    pub fn channel(&self, name: &str) -> Result<Option<ChannelId>, TypeMismatch> {
        match self.event.arguments.get(name) {
            None => Ok(None),
            Some(OptionValue::Channel(id)) => Ok(Some(*id)),
            Some(other) => Err(self.mismatch(name, OptionKind::Channel, other)),
        }
    }

    // The platform is expected to enforce bounds before dispatch; clamping
    // here keeps a misbehaving catalogue from leaking out-of-range values
    // into handlers.
    fn clamp(&self, name: &str, mut value: i64) -> i64 {
        if let Some(spec) = self.specs.iter().find(|s| s.name == name) {
            if let Some(min) = spec.min {
                value = value.max(min);
            }
            if let Some(max) = spec.max {
                value = value.min(max);
            }
        }
        value
    }

    fn mismatch(&self, name: &str, requested: OptionKind, found: &OptionValue) -> TypeMismatch {
        TypeMismatch {
            name: name.to_string(),
            requested,
            found: found.kind(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn event(arguments: HashMap<String, OptionValue>) -> InteractionEvent {
        InteractionEvent {
            id: 1,
            token: "tok".into(),
            command: "fetch".into(),
            arguments,
            user_id: 10,
            guild_id: Some(20),
            channel_id: 30,
        }
    }

    #[test]
    fn test_present_values() {
        let mut args = HashMap::new();
        args.insert("id".to_string(), OptionValue::Integer(42));
        args.insert("name".to_string(), OptionValue::String("cat".into()));
        args.insert("loud".to_string(), OptionValue::Boolean(true));
        args.insert("who".to_string(), OptionValue::User(777));
        args.insert("where".to_string(), OptionValue::Channel(888));
        let event = event(args);
        let options = Options::bind(&event, &[]);

        assert_eq!(options.integer("id").unwrap(), 42);
        assert_eq!(options.string("name").unwrap(), "cat");
        assert!(options.boolean("loud").unwrap());
        assert_eq!(options.user("who").unwrap(), Some(777));
        assert_eq!(options.channel("where").unwrap(), Some(888));
    }

    #[test]
    fn test_omitted_optionals_read_as_zero_values() {
        let event = event(HashMap::new());
        let options = Options::bind(&event, &[]);

        assert_eq!(options.string("note").unwrap(), "");
        assert_eq!(options.integer("count").unwrap(), 0);
        assert!(!options.boolean("flag").unwrap());
        assert_eq!(options.user("who").unwrap(), None);
        assert_eq!(options.channel("where").unwrap(), None);
    }

    #[test]
    fn test_kind_mismatch_is_an_error() {
        let mut args = HashMap::new();
        args.insert("id".to_string(), OptionValue::String("42".into()));
        let event = event(args);
        let options = Options::bind(&event, &[]);

        let err = options.integer("id").unwrap_err();
        assert_eq!(err.name, "id");
        assert_eq!(err.requested, OptionKind::Integer);
        assert_eq!(err.found, OptionKind::String);
    }

    #[test]
    fn test_integer_clamped_to_declared_bounds() {
        let specs = vec![ParameterSpec::integer("minutes").bounds(1, 60)];

        let mut args = HashMap::new();
        args.insert("minutes".to_string(), OptionValue::Integer(500));
        let high = event(args);
        assert_eq!(Options::bind(&high, &specs).integer("minutes").unwrap(), 60);

        let mut args = HashMap::new();
        args.insert("minutes".to_string(), OptionValue::Integer(-3));
        let low = event(args);
        assert_eq!(Options::bind(&low, &specs).integer("minutes").unwrap(), 1);
    }

    #[test]
    fn test_unbounded_integer_passes_through() {
        let mut args = HashMap::new();
        args.insert("count".to_string(), OptionValue::Integer(i64::MAX));
        let event = event(args);
        let options = Options::bind(&event, &[]);

        assert_eq!(options.integer("count").unwrap(), i64::MAX);
    }
}
