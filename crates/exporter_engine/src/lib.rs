//! Exporter engine: content selection, cleaning and the export pipeline.
mod assemble;
mod clean;
mod config;
mod convert;
mod decode;
mod dom;
mod engine;
mod export;
mod filename;
mod persist;
mod render;
mod select;
mod surface;
mod types;

pub use assemble::{AssembleError, AssembledPage, DocumentAssembler, PagePlacement};
pub use clean::clean_fragment;
pub use config::{load_config, save_config, ExporterConfig, CONFIG_FILENAME};
pub use convert::{Converter, Html2MdConverter};
pub use decode::{decode_document, DecodeError, DecodedDocument};
pub use dom::{DocumentModel, ScraperDocument};
pub use engine::{EngineHandle, ExportRequest};
pub use export::{ExportError, ExportFormat, ExportOptions, ExportPipeline};
pub use filename::export_filename;
pub use persist::{ensure_output_dir, ArtifactSink, AtomicFileWriter, FileArtifactSink, PersistError};
pub use render::{RenderConstraints, RenderError, Renderer, DEFAULT_RENDER_SCALE};
pub use select::{
    first_qualifying, select_content, ContentProbe, SelectError, CONTENT_PROBES,
    MIN_CONTENT_CHARS,
};
pub use surface::ImageSurface;
pub use types::{
    ChannelProgressSink, CleanedContent, DiscardProgress, ExportArtifact, ExportEvent,
    ExportOutcome, JobId, JobProgress, ProgressSink, Stage,
};
