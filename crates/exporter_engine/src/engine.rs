use std::sync::{mpsc, Arc};
use std::thread;

use exporter_logging::export_warn;

use crate::export::{ExportFormat, ExportOptions, ExportPipeline};
use crate::types::{ChannelProgressSink, ExportEvent, JobId};

/// One export job: the serialized source document, an optional set of
/// user-selected range fragments, and the target format.
#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub job_id: JobId,
    pub document_html: String,
    pub selection: Option<Vec<String>>,
    pub format: ExportFormat,
    pub options: ExportOptions,
}

enum EngineCommand {
    Export(ExportRequest),
}

/// Handle to the export engine: commands in, events out.
///
/// Jobs run detached on a dedicated runtime thread; two concurrent requests
/// share nothing and cannot interfere.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<ExportEvent>,
}

impl EngineHandle {
    pub fn new(pipeline: ExportPipeline) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let pipeline = Arc::new(pipeline);

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(EngineCommand::Export(request)) = cmd_rx.recv() {
                let pipeline = pipeline.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    run_job(&pipeline, request, event_tx).await;
                });
            }
        });

        Self { cmd_tx, event_rx }
    }

    pub fn submit(&self, request: ExportRequest) {
        let _ = self.cmd_tx.send(EngineCommand::Export(request));
    }

    pub fn try_recv(&self) -> Option<ExportEvent> {
        self.event_rx.try_recv().ok()
    }
}

async fn run_job(
    pipeline: &ExportPipeline,
    request: ExportRequest,
    event_tx: mpsc::Sender<ExportEvent>,
) {
    let sink = ChannelProgressSink::new(event_tx.clone());
    let result = pipeline
        .export(
            request.job_id,
            &request.document_html,
            request.selection.as_deref(),
            request.format,
            &request.options,
            &sink,
        )
        .await;

    if let Err(err) = &result {
        export_warn!("job {}: export failed: {err}", request.job_id);
    }
    let _ = event_tx.send(ExportEvent::JobCompleted {
        job_id: request.job_id,
        result: result.map_err(|err| err.to_string()),
    });
}
