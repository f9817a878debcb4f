//! Per-interaction acknowledgment state machine.

use crate::error::ResponderError;
use crate::event::InteractionEvent;
use crate::session::Session;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// Acknowledgment state of one interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AckState {
    /// No acknowledgment sent yet; the short platform window is running.
    Unacknowledged,
    /// A final immediate reply was sent.
    Responded,
    /// A deferred acknowledgment was sent; content arrives via edits.
    Deferred,
}

struct ResponderState {
    ack: AckState,
    /// Fixed at defer/respond time, cannot change afterwards.
    ephemeral: bool,
    follow_ups: u32,
}

/// Wraps the platform's four response primitives behind state-checked
/// operations for exactly one [`InteractionEvent`].
///
/// The first acknowledgment must be exactly one of `respond`,
/// `respond_ephemeral` or `defer`; wrong-state calls fail fast without
/// touching the wire. Local state only advances after the remote call
/// returns success, so a transport failure leaves the machine where it was
/// and the caller decides whether to retry with a follow-up or give up.
///
/// The internal mutex is held across the platform call: a handler that hands
/// the responder to concurrent sub-tasks gets serialized wire writes.
pub struct Responder {
    session: Arc<dyn Session>,
    interaction_id: u64,
    token: String,
    state: Mutex<ResponderState>,
}

impl Responder {
    /// Bind a fresh responder to one event. Never reuse across events.
    pub fn new(session: Arc<dyn Session>, event: &InteractionEvent) -> Self {
        Self {
            session,
            interaction_id: event.id,
            token: event.token.clone(),
            state: Mutex::new(ResponderState {
                ack: AckState::Unacknowledged,
                ephemeral: false,
                follow_ups: 0,
            }),
        }
    }

    /// Send the final reply immediately. Terminal for the first-ack choice.
    pub async fn respond(&self, content: &str) -> Result<(), ResponderError> {
        self.first_ack(content, false).await
    }

    /// Send the final reply immediately, visible only to the invoker.
    pub async fn respond_ephemeral(&self, content: &str) -> Result<(), ResponderError> {
        self.first_ack(content, true).await
    }

    /// Acknowledge without content, acquiring the extended delivery window.
    /// The ephemeral flag is fixed here and applies to all later edits.
    pub async fn defer(&self, ephemeral: bool) -> Result<(), ResponderError> {
        let mut state = self.state.lock().await;
        if state.ack != AckState::Unacknowledged {
            return Err(ResponderError::AlreadyAcknowledged);
        }
        self.session
            .defer(self.interaction_id, &self.token, ephemeral)
            .await?;
        state.ack = AckState::Deferred;
        state.ephemeral = ephemeral;
        debug!(interaction = self.interaction_id, ephemeral, "interaction deferred");
        Ok(())
    }

    /// Replace the deferred placeholder. Legal any number of times while
    /// deferred; last write wins. Illegal before acknowledgment and after a
    /// final immediate reply.
    pub async fn edit_response(&self, content: &str) -> Result<(), ResponderError> {
        let state = self.state.lock().await;
        match state.ack {
            AckState::Unacknowledged => Err(ResponderError::NotYetAcknowledged),
            AckState::Responded => Err(ResponderError::AlreadyAcknowledged),
            AckState::Deferred => {
                self.session.edit_response(&self.token, content).await?;
                Ok(())
            }
        }
    }

    /// Send an additional, separate message. Legal after either first
    /// acknowledgment, any number of times.
    pub async fn follow_up(&self, content: &str) -> Result<(), ResponderError> {
        let mut state = self.state.lock().await;
        if state.ack == AckState::Unacknowledged {
            return Err(ResponderError::NotYetAcknowledged);
        }
        self.session.follow_up(&self.token, content).await?;
        state.follow_ups += 1;
        Ok(())
    }

    pub async fn state(&self) -> AckState {
        self.state.lock().await.ack
    }

    pub async fn is_ephemeral(&self) -> bool {
        self.state.lock().await.ephemeral
    }

    pub async fn follow_up_count(&self) -> u32 {
        self.state.lock().await.follow_ups
    }

    async fn first_ack(&self, content: &str, ephemeral: bool) -> Result<(), ResponderError> {
        let mut state = self.state.lock().await;
        if state.ack != AckState::Unacknowledged {
            return Err(ResponderError::AlreadyAcknowledged);
        }
        self.session
            .respond(self.interaction_id, &self.token, content, ephemeral)
            .await?;
        state.ack = AckState::Responded;
        state.ephemeral = ephemeral;
        debug!(interaction = self.interaction_id, ephemeral, "interaction responded");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;
    use crate::event::{ChannelId, GuildId, UserId};
    use crate::session::{ChannelProfile, GuildProfile, UserProfile};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, Ordering};

    /// Records every platform call; optionally fails all of them.
    #[derive(Default)]
    struct RecordingSession {
        calls: std::sync::Mutex<Vec<String>>,
        fail: AtomicBool,
    }

    impl RecordingSession {
        fn record(&self, call: impl Into<String>) -> Result<(), TransportError> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(TransportError::new("connection reset"));
            }
            self.calls.lock().unwrap().push(call.into());
            Ok(())
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Session for RecordingSession {
        async fn respond(
            &self,
            _interaction_id: u64,
            _token: &str,
            content: &str,
            ephemeral: bool,
        ) -> Result<(), TransportError> {
            self.record(format!("respond:{content}:{ephemeral}"))
        }

        async fn defer(
            &self,
            _interaction_id: u64,
            _token: &str,
            ephemeral: bool,
        ) -> Result<(), TransportError> {
            self.record(format!("defer:{ephemeral}"))
        }

        async fn edit_response(&self, _token: &str, content: &str) -> Result<(), TransportError> {
            self.record(format!("edit:{content}"))
        }

        async fn follow_up(&self, _token: &str, content: &str) -> Result<(), TransportError> {
            self.record(format!("follow_up:{content}"))
        }

        async fn send_message(
            &self,
            _channel_id: ChannelId,
            content: &str,
        ) -> Result<(), TransportError> {
            self.record(format!("send:{content}"))
        }

        async fn fetch_user(&self, user_id: UserId) -> Result<UserProfile, TransportError> {
            self.record(format!("fetch_user:{user_id}"))?;
            Ok(UserProfile {
                id: user_id,
                username: "tester".into(),
                display_name: None,
                bot: false,
                avatar: None,
            })
        }

        async fn fetch_guild(&self, guild_id: GuildId) -> Result<GuildProfile, TransportError> {
            self.record(format!("fetch_guild:{guild_id}"))?;
            Ok(GuildProfile {
                id: guild_id,
                name: "test guild".into(),
            })
        }

        async fn fetch_channel(
            &self,
            channel_id: ChannelId,
        ) -> Result<ChannelProfile, TransportError> {
            self.record(format!("fetch_channel:{channel_id}"))?;
            Ok(ChannelProfile {
                id: channel_id,
                name: Some("general".into()),
            })
        }
    }

    fn event() -> InteractionEvent {
        InteractionEvent {
            id: 99,
            token: "tok".into(),
            command: "ping".into(),
            arguments: HashMap::new(),
            user_id: 1,
            guild_id: None,
            channel_id: 2,
        }
    }

    fn responder(session: &Arc<RecordingSession>) -> Responder {
        Responder::new(session.clone() as Arc<dyn Session>, &event())
    }

    #[tokio::test]
    async fn test_respond_transitions_to_responded() {
        let session = Arc::new(RecordingSession::default());
        let r = responder(&session);

        r.respond("Pong!").await.unwrap();

        assert_eq!(r.state().await, AckState::Responded);
        assert_eq!(r.follow_up_count().await, 0);
        assert_eq!(session.calls(), vec!["respond:Pong!:false"]);
    }

    #[tokio::test]
    async fn test_second_first_ack_fails_without_wire_call() {
        let session = Arc::new(RecordingSession::default());
        let r = responder(&session);

        r.defer(false).await.unwrap();

        assert!(matches!(
            r.respond("late").await,
            Err(ResponderError::AlreadyAcknowledged)
        ));
        assert!(matches!(
            r.defer(true).await,
            Err(ResponderError::AlreadyAcknowledged)
        ));
        assert_eq!(session.calls(), vec!["defer:false"]);
    }

    #[tokio::test]
    async fn test_edit_and_follow_up_before_ack_fail() {
        let session = Arc::new(RecordingSession::default());
        let r = responder(&session);

        assert!(matches!(
            r.edit_response("early").await,
            Err(ResponderError::NotYetAcknowledged)
        ));
        assert!(matches!(
            r.follow_up("early").await,
            Err(ResponderError::NotYetAcknowledged)
        ));
        assert_eq!(r.state().await, AckState::Unacknowledged);
        assert!(session.calls().is_empty());
    }

    #[tokio::test]
    async fn test_deferred_allows_repeated_edits_keeping_ephemeral() {
        let session = Arc::new(RecordingSession::default());
        let r = responder(&session);

        r.defer(true).await.unwrap();
        r.edit_response("first").await.unwrap();
        r.edit_response("second").await.unwrap();

        assert_eq!(r.state().await, AckState::Deferred);
        assert!(r.is_ephemeral().await);
        assert_eq!(
            session.calls(),
            vec!["defer:true", "edit:first", "edit:second"]
        );
    }

    #[tokio::test]
    async fn test_follow_ups_counted_after_defer() {
        let session = Arc::new(RecordingSession::default());
        let r = responder(&session);

        r.defer(false).await.unwrap();
        r.follow_up("one").await.unwrap();
        r.follow_up("two").await.unwrap();

        assert_eq!(r.state().await, AckState::Deferred);
        assert_eq!(r.follow_up_count().await, 2);
        let calls = session.calls();
        assert!(!calls.iter().any(|c| c.starts_with("respond")));
    }

    #[tokio::test]
    async fn test_follow_up_after_respond_allowed() {
        let session = Arc::new(RecordingSession::default());
        let r = responder(&session);

        r.respond("done").await.unwrap();
        r.follow_up("ps").await.unwrap();

        assert_eq!(r.state().await, AckState::Responded);
        assert_eq!(r.follow_up_count().await, 1);
    }

    #[tokio::test]
    async fn test_edit_after_respond_rejected() {
        let session = Arc::new(RecordingSession::default());
        let r = responder(&session);

        r.respond("final").await.unwrap();

        assert!(matches!(
            r.edit_response("again").await,
            Err(ResponderError::AlreadyAcknowledged)
        ));
        assert_eq!(session.calls(), vec!["respond:final:false"]);
    }

    #[tokio::test]
    async fn test_transport_failure_leaves_state_unchanged() {
        let session = Arc::new(RecordingSession::default());
        session.fail.store(true, Ordering::SeqCst);
        let r = responder(&session);

        assert!(matches!(
            r.respond("hello").await,
            Err(ResponderError::Transport(_))
        ));
        assert_eq!(r.state().await, AckState::Unacknowledged);

        // The window is still open: a retry may succeed.
        session.fail.store(false, Ordering::SeqCst);
        r.respond("hello").await.unwrap();
        assert_eq!(r.state().await, AckState::Responded);
    }

    #[tokio::test]
    async fn test_failed_follow_up_not_counted() {
        let session = Arc::new(RecordingSession::default());
        let r = responder(&session);
        r.defer(false).await.unwrap();

        session.fail.store(true, Ordering::SeqCst);
        assert!(r.follow_up("lost").await.is_err());
        assert_eq!(r.follow_up_count().await, 0);
    }

    #[tokio::test]
    async fn test_ephemeral_respond_flag_reaches_session() {
        let session = Arc::new(RecordingSession::default());
        let r = responder(&session);

        r.respond_ephemeral("only for you").await.unwrap();

        assert!(r.is_ephemeral().await);
        assert_eq!(session.calls(), vec!["respond:only for you:true"]);
    }
}
