//! 画面バインディング
//!
//! コントローラは DOM を直接触らず、ViewBinding 越しに描画する。
//! ブラウザ版は web-sys、CLI版はターミナル出力で実装する。

use crate::format::{StatusTag, TimingPanel};
use crate::state::Tab;

/// 画面要素
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementId {
    // タブとパネル
    TabText,
    TabDocument,
    TabLibraries,
    PanelText,
    PanelDocument,
    PanelLibraries,
    LoadingOverlay,

    // 文本检测
    TextInput,
    CharCount,
    StrictModeCheckbox,
    DetectTextButton,
    TextResult,
    OriginalText,
    UsedLibraries,
    RuleDetected,
    LlmDetected,
    DetectionTiming,
    FinalResult,

    // 文档检测
    UploadArea,
    FileInput,
    SelectFileButton,
    FileInfo,
    FileName,
    FileSize,
    DetectDocumentButton,
    ResetDocumentButton,
    DocumentResult,
    DocFilename,
    DocFileType,
    DocTextLength,
    DocRuleDetected,
    DocLlmDetected,
    DocDetectionTiming,
    DocFinalResult,

    // 词库管理
    LibrariesTable,
    UsedLibrariesList,
    UsedLibrariesCount,
    CurrentLibraryStatus,
    LastUpdateTime,
    UpdateDetectionButton,
    CreateLibraryButton,
    LibraryEditor,
    EditorTitle,
    LibraryNameInput,
    LibraryWordsInput,
    WordCount,
    SaveLibraryButton,
    CancelEditButton,
}

impl ElementId {
    /// DOM上の id 属性
    pub fn dom_id(&self) -> &'static str {
        match self {
            ElementId::TabText => "tab-text",
            ElementId::TabDocument => "tab-document",
            ElementId::TabLibraries => "tab-libraries",
            ElementId::PanelText => "text-panel",
            ElementId::PanelDocument => "document-panel",
            ElementId::PanelLibraries => "libraries-panel",
            ElementId::LoadingOverlay => "loading-overlay",
            ElementId::TextInput => "text-input",
            ElementId::CharCount => "char-count",
            ElementId::StrictModeCheckbox => "strict-mode-checkbox",
            ElementId::DetectTextButton => "detect-text-btn",
            ElementId::TextResult => "text-result",
            ElementId::OriginalText => "original-text",
            ElementId::UsedLibraries => "used-libraries",
            ElementId::RuleDetected => "rule-detected",
            ElementId::LlmDetected => "llm-detected",
            ElementId::DetectionTiming => "detection-timing",
            ElementId::FinalResult => "final-result",
            ElementId::UploadArea => "upload-area",
            ElementId::FileInput => "file-input",
            ElementId::SelectFileButton => "select-file-btn",
            ElementId::FileInfo => "file-info",
            ElementId::FileName => "file-name",
            ElementId::FileSize => "file-size",
            ElementId::DetectDocumentButton => "detect-document-btn",
            ElementId::ResetDocumentButton => "reset-document-btn",
            ElementId::DocumentResult => "document-result",
            ElementId::DocFilename => "doc-filename",
            ElementId::DocFileType => "doc-file-type",
            ElementId::DocTextLength => "doc-text-length",
            ElementId::DocRuleDetected => "doc-rule-detected",
            ElementId::DocLlmDetected => "doc-llm-detected",
            ElementId::DocDetectionTiming => "doc-detection-timing",
            ElementId::DocFinalResult => "doc-final-result",
            ElementId::LibrariesTable => "libraries-table",
            ElementId::UsedLibrariesList => "used-libraries-list",
            ElementId::UsedLibrariesCount => "used-libraries-count",
            ElementId::CurrentLibraryStatus => "current-library-status",
            ElementId::LastUpdateTime => "last-update-time",
            ElementId::UpdateDetectionButton => "update-detection-libraries-btn",
            ElementId::CreateLibraryButton => "create-library-btn",
            ElementId::LibraryEditor => "library-editor",
            ElementId::EditorTitle => "editor-title",
            ElementId::LibraryNameInput => "library-name-input",
            ElementId::LibraryWordsInput => "library-words-textarea",
            ElementId::WordCount => "word-count",
            ElementId::SaveLibraryButton => "save-library-btn",
            ElementId::CancelEditButton => "cancel-edit-btn",
        }
    }

    pub fn tab(tab: Tab) -> Self {
        match tab {
            Tab::Text => ElementId::TabText,
            Tab::Document => ElementId::TabDocument,
            Tab::Libraries => ElementId::TabLibraries,
        }
    }

    pub fn panel(tab: Tab) -> Self {
        match tab {
            Tab::Text => ElementId::PanelText,
            Tab::Document => ElementId::PanelDocument,
            Tab::Libraries => ElementId::PanelLibraries,
        }
    }
}

/// 通知レベル
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

impl NoticeLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoticeLevel::Info => "info",
            NoticeLevel::Success => "success",
            NoticeLevel::Error => "error",
        }
    }
}

/// 一時的な画面通知
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Info, message: message.into() }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Success, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, message: message.into() }
    }
}

/// 画面イベント
///
/// ハンドラは起動時に bind で明示的に登録する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    SwitchTab(Tab),
    DetectText,
    TextChanged,
    DetectDocument,
    ResetDocument,
    DragOver,
    DragLeave,
    /// Ctrl+Enter
    DetectShortcut,
    CreateLibrary,
    EditLibrary(String),
    DeleteLibrary(String),
    SaveLibrary,
    CancelEdit,
    WordsChanged,
    AddToActive(String),
    RemoveFromActive(String),
    SyncActiveLibraries,
}

/// 词库一覧の1行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryRow {
    pub name: String,
    pub details: String,
    /// 既に選択済み（「添加」ボタンを無効化）
    pub active: bool,
    pub add_label: String,
    pub add: UiEvent,
    pub edit: UiEvent,
    pub delete: UiEvent,
}

/// 使用词库リストの1項目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveItem {
    pub name: String,
    pub remove: UiEvent,
}

/// 画面操作のケイパビリティ
pub trait ViewBinding {
    /// テキスト（入力欄は value、それ以外は textContent）
    fn text(&self, id: ElementId) -> String;
    fn set_text(&self, id: ElementId, text: &str);

    fn is_visible(&self, id: ElementId) -> bool;
    fn set_visible(&self, id: ElementId, visible: bool);

    fn is_checked(&self, id: ElementId) -> bool;
    fn set_enabled(&self, id: ElementId, enabled: bool);
    fn set_class(&self, id: ElementId, class: &str, on: bool);

    fn set_tag(&self, id: ElementId, tag: &StatusTag);
    fn set_timing(&self, id: ElementId, panel: &TimingPanel);

    /// 词库一覧（空なら案内文）
    fn render_library_rows(&self, rows: &[LibraryRow]);
    fn render_active_items(&self, items: &[ActiveItem]);

    /// クリックにイベントを結び付ける
    fn bind(&self, id: ElementId, event: UiEvent);

    fn notify(&self, notice: &Notice);
    fn confirm(&self, message: &str) -> bool;
}

/// スコープ終了時に表示を戻すガード
///
/// 成功・失敗・早期 return のいずれでも Drop で解除される。
pub struct ViewGuard<'a, V: ViewBinding + ?Sized> {
    view: &'a V,
    release: fn(&V),
}

impl<'a, V: ViewBinding + ?Sized> ViewGuard<'a, V> {
    /// 全画面ローディング
    pub fn loading(view: &'a V) -> Self {
        view.set_visible(ElementId::LoadingOverlay, true);
        Self {
            view,
            release: |v| v.set_visible(ElementId::LoadingOverlay, false),
        }
    }

    /// 「更新检测词库」ボタンを更新中表示にする
    pub fn updating(view: &'a V) -> Self {
        view.set_enabled(ElementId::UpdateDetectionButton, false);
        view.set_text(ElementId::UpdateDetectionButton, "更新中...");
        Self {
            view,
            release: |v| {
                v.set_enabled(ElementId::UpdateDetectionButton, true);
                v.set_text(ElementId::UpdateDetectionButton, "更新检测词库");
            },
        }
    }
}

impl<V: ViewBinding + ?Sized> Drop for ViewGuard<'_, V> {
    fn drop(&mut self) {
        (self.release)(self.view);
    }
}
