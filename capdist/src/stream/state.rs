//! Session state machine.

use super::events::SessionEvent;
use thiserror::Error;

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No event emitted yet
    Pending,
    /// `Started` emitted
    Started,
    /// At least one `Progress` emitted
    Progressing,
    /// Terminal: result delivered
    Completed,
    /// Terminal: error delivered
    Failed,
}

impl SessionState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

/// An event that would break the session's ordering guarantees.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    #[error("'{event}' is not allowed in state {state:?}")]
    InvalidTransition {
        state: SessionState,
        event: &'static str,
    },

    #[error("progress went backwards: {previous} -> {next}")]
    ProgressDecreased { previous: usize, next: usize },

    #[error("total changed mid-session: {expected} -> {actual}")]
    TotalChanged { expected: usize, actual: usize },

    #[error("progress {done} exceeds total {total}")]
    ProgressOverflow { done: usize, total: usize },

    #[error("completed at {done}/{total} without reaching total")]
    IncompleteResult { done: usize, total: usize },
}

/// Validates a sequence of session events.
///
/// Accepts `Started → Progress* → (Completed | Failed)` where `done` never
/// decreases, `total` never changes, and `Completed` only follows progress
/// that reached `total`.
#[derive(Debug, Clone)]
pub struct SessionTracker {
    state: SessionState,
    total: usize,
    done: usize,
}

impl Default for SessionTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionTracker {
    pub fn new() -> Self {
        Self {
            state: SessionState::Pending,
            total: 0,
            done: 0,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn done(&self) -> usize {
        self.done
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Check an event against the current state and advance on success.
    pub fn observe(&mut self, event: &SessionEvent) -> Result<SessionState, ProtocolError> {
        use SessionState::*;

        let invalid = |state| ProtocolError::InvalidTransition {
            state,
            event: event.kind(),
        };

        let next = match (self.state, event) {
            (Pending, SessionEvent::Started { total }) => {
                self.total = *total;
                Started
            }
            (Started | Progressing, SessionEvent::Progress(progress)) => {
                if progress.total != self.total {
                    return Err(ProtocolError::TotalChanged {
                        expected: self.total,
                        actual: progress.total,
                    });
                }
                if progress.done < self.done {
                    return Err(ProtocolError::ProgressDecreased {
                        previous: self.done,
                        next: progress.done,
                    });
                }
                if progress.done > self.total {
                    return Err(ProtocolError::ProgressOverflow {
                        done: progress.done,
                        total: self.total,
                    });
                }
                self.done = progress.done;
                Progressing
            }
            (Started | Progressing, SessionEvent::Completed(_)) => {
                if self.done != self.total {
                    return Err(ProtocolError::IncompleteResult {
                        done: self.done,
                        total: self.total,
                    });
                }
                Completed
            }
            (Started | Progressing, SessionEvent::Failed(_)) => Failed,
            (state, _) => return Err(invalid(state)),
        };

        self.state = next;
        Ok(next)
    }
}
