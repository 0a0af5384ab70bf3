//! Producer side of a session channel.

use super::events::SessionEvent;
use super::state::{ProtocolError, SessionState, SessionTracker};
use thiserror::Error;
use tokio::sync::mpsc;

/// Why an event could not be delivered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmitError {
    /// The consumer dropped its end of the channel
    #[error("session consumer disconnected")]
    Disconnected,

    /// The event would break session ordering
    #[error("session protocol violation: {0}")]
    Protocol(#[from] ProtocolError),
}

/// Writes events in protocol order onto a bounded channel.
///
/// Each event is checked by a [`SessionTracker`] before it is sent, so a
/// consumer can never observe progress going backwards or anything after a
/// terminal event.
#[derive(Debug)]
pub struct SessionEmitter {
    tx: mpsc::Sender<SessionEvent>,
    tracker: SessionTracker,
}

impl SessionEmitter {
    pub fn new(tx: mpsc::Sender<SessionEvent>) -> Self {
        Self {
            tx,
            tracker: SessionTracker::new(),
        }
    }

    /// Validate and send one event, waiting for channel capacity.
    pub async fn emit(&mut self, event: SessionEvent) -> Result<SessionState, EmitError> {
        let state = self.tracker.observe(&event)?;
        self.tx
            .send(event)
            .await
            .map_err(|_| EmitError::Disconnected)?;
        Ok(state)
    }

    pub fn state(&self) -> SessionState {
        self.tracker.state()
    }

    /// Whether the consumer has gone away.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::{ErrorPayload, ProgressEvent};

    #[tokio::test]
    async fn test_emits_in_order() {
        let (tx, mut rx) = mpsc::channel(8);
        let mut emitter = SessionEmitter::new(tx);

        emitter.emit(SessionEvent::Started { total: 2 }).await.unwrap();
        emitter
            .emit(SessionEvent::Progress(ProgressEvent::new(2, 2, None)))
            .await
            .unwrap();
        emitter
            .emit(SessionEvent::Failed(ErrorPayload::new("late failure")))
            .await
            .unwrap();

        assert_eq!(rx.recv().await.map(|e| e.kind()), Some("started"));
        assert_eq!(rx.recv().await.map(|e| e.kind()), Some("progress"));
        assert_eq!(rx.recv().await.map(|e| e.kind()), Some("failed"));
    }

    #[tokio::test]
    async fn test_rejects_event_after_terminal() {
        let (tx, _rx) = mpsc::channel(8);
        let mut emitter = SessionEmitter::new(tx);

        emitter.emit(SessionEvent::Started { total: 1 }).await.unwrap();
        emitter
            .emit(SessionEvent::Failed(ErrorPayload::new("x")))
            .await
            .unwrap();

        let err = emitter
            .emit(SessionEvent::Failed(ErrorPayload::new("again")))
            .await
            .unwrap_err();
        assert!(matches!(err, EmitError::Protocol(_)));
    }

    #[tokio::test]
    async fn test_disconnected_consumer() {
        let (tx, rx) = mpsc::channel(8);
        let mut emitter = SessionEmitter::new(tx);
        drop(rx);

        assert!(emitter.is_closed());
        let err = emitter
            .emit(SessionEvent::Started { total: 1 })
            .await
            .unwrap_err();
        assert_eq!(err, EmitError::Disconnected);
    }
}
