//! Sensitive Detect Common Library
//!
//! CLIとWeb(WASM)で共有される型・状態・画面コントローラ

pub mod types;
pub mod error;
pub mod validation;
pub mod format;
pub mod state;
pub mod view;
pub mod render;
pub mod api;
pub mod controller;

pub use types::{
    DetectionData, DetectionFlow, DetectionResult, DetectionSource, Detected, LibraryContent,
    LibraryUpdate, ModelOutcome, RuleDetection, RuleOutcome, RuleTiming, TextDetectRequest,
    Verdict, WordLibrary, DetectionStatus,
};
pub use error::{Error, Result, ValidationError};
pub use validation::{parse_words, validate_text, validate_upload, ALLOWED_MIME_TYPES, MAX_UPLOAD_SIZE};
pub use format::format_file_size;
pub use state::{ActiveLibraries, AppState, EditorState, SelectedFile, Tab, UploadState};
pub use view::{ElementId, Notice, NoticeLevel, UiEvent, ViewBinding, ViewGuard};
pub use api::{DetectionApi, DEFAULT_BASE_URL};
pub use controller::Controller;
