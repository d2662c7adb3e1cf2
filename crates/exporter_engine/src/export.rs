use bytes::Bytes;
use exporter_core::{paginate, slice_height_units, PageGeometry, PaginateError, RasterSurface};
use exporter_logging::{export_debug, export_info};

use crate::assemble::{AssembleError, AssembledPage, DocumentAssembler, PagePlacement};
use crate::convert::Converter;
use crate::dom::ScraperDocument;
use crate::filename::export_filename;
use crate::persist::{ArtifactSink, PersistError};
use crate::render::{RenderConstraints, RenderError, Renderer};
use crate::select::{select_content, SelectError};
use crate::types::{
    CleanedContent, ExportArtifact, ExportEvent, ExportOutcome, JobId, JobProgress, ProgressSink,
    Stage,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Text,
    Markdown,
    Pdf,
}

impl ExportFormat {
    pub fn mime(self) -> &'static str {
        match self {
            ExportFormat::Text => "text/plain",
            ExportFormat::Markdown => "text/markdown",
            ExportFormat::Pdf => "application/pdf",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Text => "txt",
            ExportFormat::Markdown => "md",
            ExportFormat::Pdf => "pdf",
        }
    }
}

/// Settings for one export run. The timestamp comes from the host; nothing
/// in the pipeline reads a clock.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOptions {
    pub filename_prefix: String,
    pub timestamp_utc: String,
    pub geometry: PageGeometry,
    pub scale: f32,
}

/// Every failure surfaces unmodified; a failed export produces no artifact,
/// never a truncated one.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error(transparent)]
    Select(#[from] SelectError),
    #[error("render failure: {0}")]
    Render(#[from] RenderError),
    #[error(transparent)]
    Paginate(#[from] PaginateError),
    #[error("document assembly failed: {0}")]
    Assemble(#[from] AssembleError),
    #[error("persist error: {0}")]
    Persist(#[from] PersistError),
}

/// Runs select -> (text | markdown | render -> paginate -> assemble) -> save.
///
/// Each call owns its own detached document copy and raster buffer; nothing
/// is cached or shared between export invocations.
pub struct ExportPipeline {
    converter: Box<dyn Converter>,
    renderer: Box<dyn Renderer>,
    assembler: Box<dyn DocumentAssembler>,
    sink: Box<dyn ArtifactSink>,
}

impl ExportPipeline {
    pub fn new(
        converter: Box<dyn Converter>,
        renderer: Box<dyn Renderer>,
        assembler: Box<dyn DocumentAssembler>,
        sink: Box<dyn ArtifactSink>,
    ) -> Self {
        Self {
            converter,
            renderer,
            assembler,
            sink,
        }
    }

    pub async fn export(
        &self,
        job_id: JobId,
        document_html: &str,
        selection: Option<&[String]>,
        format: ExportFormat,
        options: &ExportOptions,
        progress: &dyn ProgressSink,
    ) -> Result<ExportOutcome, ExportError> {
        progress.emit(stage_event(job_id, Stage::Selecting));
        // The parsed document lives only inside this block; the selector
        // hands back owned strings with no ties to it.
        let content = {
            let doc = ScraperDocument::parse(document_html);
            select_content(&doc, selection)?
        };
        export_debug!(
            "job {job_id}: selected {} characters",
            content.text.chars().count()
        );

        let (bytes, page_count) = match format {
            ExportFormat::Text => (Bytes::from(content.text.into_bytes()), None),
            ExportFormat::Markdown => {
                progress.emit(stage_event(job_id, Stage::Converting));
                let markdown = self.converter.to_markdown(&content.markup);
                (Bytes::from(markdown.into_bytes()), None)
            }
            ExportFormat::Pdf => {
                let (bytes, pages) = self
                    .paginated_document(job_id, &content, options, progress)
                    .await?;
                (bytes, Some(pages))
            }
        };

        let filename = export_filename(
            &options.filename_prefix,
            &options.timestamp_utc,
            format.extension(),
        );
        let artifact = ExportArtifact {
            filename: filename.clone(),
            mime: format.mime(),
            bytes,
        };

        progress.emit(stage_event(job_id, Stage::Writing));
        let path = self.sink.save(&artifact)?;
        progress.emit(stage_event(job_id, Stage::Done));
        export_info!("job {job_id}: wrote {} to {:?}", filename, path);

        Ok(ExportOutcome {
            path,
            filename,
            mime: format.mime(),
            byte_len: artifact.bytes.len() as u64,
            page_count,
        })
    }

    async fn paginated_document(
        &self,
        job_id: JobId,
        content: &CleanedContent,
        options: &ExportOptions,
        progress: &dyn ProgressSink,
    ) -> Result<(Bytes, usize), ExportError> {
        progress.emit(stage_event(job_id, Stage::Rendering));
        let constraints = RenderConstraints {
            content_width_units: options.geometry.content_width_units(),
            scale: options.scale,
        };
        let surface = self.renderer.render(&content.markup, constraints).await?;

        progress.emit(stage_event(job_id, Stage::Paginating));
        let geometry = &options.geometry;
        let slices = paginate(&surface, geometry)?;
        export_debug!(
            "job {job_id}: {} slices from a {}x{} surface",
            slices.len(),
            surface.width(),
            surface.height()
        );

        progress.emit(stage_event(job_id, Stage::Assembling));
        let pages: Vec<AssembledPage> = slices
            .iter()
            .map(|slice| AssembledPage {
                image: surface.crop(slice),
                placement: PagePlacement {
                    offset_x_units: geometry.margin_units,
                    offset_y_units: geometry.margin_units,
                    width_units: geometry.content_width_units(),
                    height_units: slice_height_units(slice, surface.width(), geometry),
                    page_width_units: geometry.page_width_units,
                    page_height_units: geometry.page_height_units,
                },
            })
            .collect();

        let bytes = self.assembler.assemble(&pages)?;
        Ok((bytes, pages.len()))
    }
}

fn stage_event(job_id: JobId, stage: Stage) -> ExportEvent {
    ExportEvent::Progress(JobProgress { job_id, stage })
}
