//! Consumer side of a session channel.

use super::events::{ErrorPayload, SessionEvent};
use crate::result::DistanceResult;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// An ordered stream of events for one computation.
///
/// Yields `Started`, zero or more `Progress` events, then exactly one
/// terminal event, after which [`next`](Self::next) returns `None`.
/// Dropping the session (or calling [`cancel`](Self::cancel)) stops the
/// computation; there is no resumption, a new request must be issued.
#[derive(Debug)]
pub struct DistanceSession {
    rx: mpsc::Receiver<SessionEvent>,
    cancellation: CancellationToken,
    total: usize,
    finished: bool,
}

impl DistanceSession {
    pub fn new(
        rx: mpsc::Receiver<SessionEvent>,
        cancellation: CancellationToken,
        total: usize,
    ) -> Self {
        Self {
            rx,
            cancellation,
            total,
            finished: false,
        }
    }

    /// Total number of pairs this session computes.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Whether the terminal event has been received (or the channel closed).
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Receive the next event in order.
    pub async fn next(&mut self) -> Option<SessionEvent> {
        if self.finished {
            return None;
        }

        let event = self.rx.recv().await;
        match &event {
            Some(e) if e.is_terminal() => {
                self.finished = true;
                self.rx.close();
            }
            None => self.finished = true,
            Some(_) => {}
        }
        event
    }

    /// Stop the computation. In-flight batches finish and are discarded.
    pub fn cancel(&self) {
        self.cancellation.cancel();
    }

    /// Drain every remaining event.
    pub async fn collect_events(mut self) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        while let Some(event) = self.next().await {
            events.push(event);
        }
        events
    }

    /// Skip progress and return the terminal outcome.
    pub async fn wait(mut self) -> Result<Arc<DistanceResult>, ErrorPayload> {
        while let Some(event) = self.next().await {
            match event {
                SessionEvent::Completed(result) => return Ok(result),
                SessionEvent::Failed(payload) => return Err(payload),
                SessionEvent::Started { .. } | SessionEvent::Progress(_) => {}
            }
        }
        Err(ErrorPayload::new("session ended without a result"))
    }
}

impl Drop for DistanceSession {
    fn drop(&mut self) {
        self.cancellation.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::ProgressEvent;

    #[tokio::test]
    async fn test_stops_after_terminal() {
        let (tx, rx) = mpsc::channel(8);
        let mut session = DistanceSession::new(rx, CancellationToken::new(), 1);

        tx.send(SessionEvent::Started { total: 1 }).await.unwrap();
        tx.send(SessionEvent::Failed(ErrorPayload::new("x")))
            .await
            .unwrap();

        assert!(session.next().await.is_some());
        assert!(session.next().await.unwrap().is_terminal());
        assert!(session.is_finished());
        assert!(session.next().await.is_none());

        // The producer sees the closed channel
        assert!(tx
            .send(SessionEvent::Progress(ProgressEvent::new(1, 1, None)))
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_drop_cancels() {
        let (_tx, rx) = mpsc::channel(8);
        let token = CancellationToken::new();
        let session = DistanceSession::new(rx, token.clone(), 1);

        assert!(!token.is_cancelled());
        drop(session);
        assert!(token.is_cancelled());
    }

    #[tokio::test]
    async fn test_wait_without_terminal() {
        let (tx, rx) = mpsc::channel(8);
        let session = DistanceSession::new(rx, CancellationToken::new(), 1);
        tx.send(SessionEvent::Started { total: 1 }).await.unwrap();
        drop(tx);

        let err = session.wait().await.unwrap_err();
        assert!(err.error.contains("without a result"));
    }
}
