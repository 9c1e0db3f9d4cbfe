//! Interior Style Common Library
//!
//! CLIとWeb(WASM)で共有される状態機械・型・パーサー

pub mod types;
pub mod error;
pub mod parser;
pub mod render;
pub mod version;
pub mod workflow;

pub use types::{
    is_image_mime, AnalysisResult, ColorEntry, FileHandle, InputSource, SelectedFile, Ticket,
    WorkflowState,
};
pub use error::{Error, Result};
pub use parser::{http_failure_message, parse_analysis_response, parse_error_detail};
pub use render::{render_result, sanitize_hex, PaletteEntry, ResultView};
pub use version::VersionInfo;
pub use workflow::{
    Capabilities, DragPhase, Effect, Event, SubmissionOutcome, UploadRequest, UploadWorkflow,
    WorkflowSnapshot, UPLOAD_FIELD, UPLOAD_PATH,
};
