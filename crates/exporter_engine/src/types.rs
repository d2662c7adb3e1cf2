use std::path::PathBuf;
use std::sync::mpsc;

use bytes::Bytes;

pub type JobId = u64;

/// Pipeline stages reported through [`ProgressSink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Selecting,
    Converting,
    Rendering,
    Paginating,
    Assembling,
    Writing,
    Done,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobProgress {
    pub job_id: JobId,
    pub stage: Stage,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportEvent {
    Progress(JobProgress),
    JobCompleted {
        job_id: JobId,
        /// Failures are reduced to a human-readable message; no structured
        /// data crosses this boundary.
        result: Result<ExportOutcome, String>,
    },
}

/// Immutable result of content selection.
///
/// `text` is the flattened human-readable content; `markup` is the cleaned
/// serialized subtree. Both come from a detached copy with no ties to the
/// source document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanedContent {
    pub text: String,
    pub markup: String,
}

/// Named byte payload handed to the persistence collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub filename: String,
    pub mime: &'static str,
    pub bytes: Bytes,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOutcome {
    pub path: PathBuf,
    pub filename: String,
    pub mime: &'static str,
    pub byte_len: u64,
    /// Number of pages for paginated exports, `None` otherwise.
    pub page_count: Option<usize>,
}

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: ExportEvent);
}

pub struct ChannelProgressSink {
    tx: mpsc::Sender<ExportEvent>,
}

impl ChannelProgressSink {
    pub fn new(tx: mpsc::Sender<ExportEvent>) -> Self {
        Self { tx }
    }
}

impl ProgressSink for ChannelProgressSink {
    fn emit(&self, event: ExportEvent) {
        let _ = self.tx.send(event);
    }
}

/// Sink for callers that do not observe progress.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiscardProgress;

impl ProgressSink for DiscardProgress {
    fn emit(&self, _event: ExportEvent) {}
}
