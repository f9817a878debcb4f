//! Routes incoming interaction events to registered handlers.

use crate::error::DispatchError;
use crate::event::InteractionEvent;
use crate::options::Options;
use crate::registry::CommandRegistry;
use crate::responder::{AckState, Responder};
use crate::session::Session;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

/// Dispatches each event on its own tokio task.
///
/// Holds the read-only registry and the platform session; constructs exactly
/// one [`Responder`] per event. Handlers may block on network I/O without
/// affecting other in-flight interactions. After [`close`](Self::close), new
/// events are rejected while in-flight tasks finish naturally.
pub struct Dispatcher {
    registry: Arc<CommandRegistry>,
    session: Arc<dyn Session>,
    closed: AtomicBool,
    in_flight: Arc<AtomicUsize>,
}

impl Dispatcher {
    pub fn new(registry: Arc<CommandRegistry>, session: Arc<dyn Session>) -> Self {
        Self {
            registry,
            session,
            closed: AtomicBool::new(false),
            in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Set the shutdown latch. Idempotent.
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Number of handler tasks currently running.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Route one event to its handler.
    ///
    /// Unknown commands are dropped without any session call: the local
    /// registry and the platform catalogue are synchronized at startup, so a
    /// miss means a stale catalogue, which is an operational concern.
    /// Handler failures are logged, never propagated; a handler that fails
    /// without acknowledging loses the invocation from the user's
    /// perspective, which is recorded as an error outcome.
    pub fn dispatch(&self, event: InteractionEvent) -> Result<JoinHandle<()>, DispatchError> {
        if self.is_closed() {
            return Err(DispatchError::Closed);
        }

        let Some(definition) = self.registry.lookup(&event.command) else {
            warn!(command = %event.command, "dropping interaction for unregistered command");
            return Err(DispatchError::UnknownCommand(event.command));
        };

        let session = Arc::clone(&self.session);
        let in_flight = Arc::clone(&self.in_flight);
        in_flight.fetch_add(1, Ordering::SeqCst);

        let handle = tokio::spawn(async move {
            let responder = Responder::new(session, &event);
            let options = Options::bind(&event, &definition.options);

            match definition.handler.handle(&event, &responder, &options).await {
                Ok(()) => {
                    debug!(command = %definition.name, user = event.user_id, "command completed");
                }
                Err(e) => {
                    error!(command = %definition.name, error = %e, "command handler failed");
                    if responder.state().await == AckState::Unacknowledged {
                        error!(
                            command = %definition.name,
                            interaction = event.id,
                            "handler failed before acknowledging; invocation lost"
                        );
                    }
                }
            }

            in_flight.fetch_sub(1, Ordering::SeqCst);
        });

        Ok(handle)
    }
}
