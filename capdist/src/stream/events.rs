//! Session event types and their wire encoding.

use super::metrics::ProgressMetrics;
use crate::pairs::Pair;
use crate::result::DistanceResult;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

/// Cumulative progress of one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressEvent {
    /// Pairs computed so far
    pub done: usize,
    /// Total pairs in the session
    pub total: usize,
    /// Last pair of the most recently completed batch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest: Option<Pair>,
    /// Throughput and ETA, flattened into the same object
    #[serde(flatten)]
    pub metrics: Option<ProgressMetrics>,
}

impl ProgressEvent {
    pub fn new(done: usize, total: usize, latest: Option<Pair>) -> Self {
        Self {
            done,
            total,
            latest,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: ProgressMetrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Progress as a fraction (0.0 to 1.0).
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.done as f64 / self.total as f64
        }
    }

    /// Whether every pair has been computed.
    pub fn is_complete(&self) -> bool {
        self.done >= self.total
    }
}

/// `Progress: 66.7% (2/3)`, followed by speed and ETA when measured.
impl fmt::Display for ProgressEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Progress: {:.1}% ({}/{})",
            self.fraction() * 100.0,
            self.done,
            self.total
        )?;
        if let Some(metrics) = &self.metrics {
            write!(f, " | {metrics}")?;
        }
        Ok(())
    }
}

/// Error body of a failed session or request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub error: String,
}

impl ErrorPayload {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// One event of a streaming session.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// Request accepted; computation of `total` pairs begins
    Started { total: usize },
    /// Cumulative progress
    Progress(ProgressEvent),
    /// Terminal: the full sorted result
    Completed(Arc<DistanceResult>),
    /// Terminal: the computation failed
    Failed(ErrorPayload),
}

impl SessionEvent {
    /// Whether this event ends the session.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed(_) | Self::Failed(_))
    }

    /// Short name for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Started { .. } => "started",
            Self::Progress(_) => "progress",
            Self::Completed(_) => "completed",
            Self::Failed(_) => "failed",
        }
    }
}

impl Serialize for SessionEvent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Started { total } => ProgressEvent::new(0, *total, None).serialize(serializer),
            Self::Progress(progress) => progress.serialize(serializer),
            Self::Completed(result) => result.serialize(serializer),
            Self::Failed(payload) => payload.serialize(serializer),
        }
    }
}
