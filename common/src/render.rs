//! 描画関数
//!
//! 状態・結果を引数で受け取り ViewBinding に書き出す。グローバル状態は持たない。

use crate::format::{
    self, active_count_text, format_file_size, format_model_outcome, format_rule_outcome,
    format_verdict, library_details, status_indicator, timing_panel, used_libraries_text,
};
use crate::state::{ActiveLibraries, AppState, EditorState, Tab, UploadState};
use crate::types::{DetectionResult, DetectionSource};
use crate::view::{ActiveItem, ElementId, LibraryRow, UiEvent, ViewBinding};

/// 結果パネルの要素セット（文本/文档で共通の描画ロジックを使う）
struct ResultElements {
    rule: ElementId,
    llm: ElementId,
    timing: ElementId,
    verdict: ElementId,
    section: ElementId,
}

const TEXT_RESULT: ResultElements = ResultElements {
    rule: ElementId::RuleDetected,
    llm: ElementId::LlmDetected,
    timing: ElementId::DetectionTiming,
    verdict: ElementId::FinalResult,
    section: ElementId::TextResult,
};

const DOCUMENT_RESULT: ResultElements = ResultElements {
    rule: ElementId::DocRuleDetected,
    llm: ElementId::DocLlmDetected,
    timing: ElementId::DocDetectionTiming,
    verdict: ElementId::DocFinalResult,
    section: ElementId::DocumentResult,
};

/// タブ切り替え: 1つだけ表示・active
pub fn render_tab<V: ViewBinding + ?Sized>(view: &V, current: Tab) {
    for tab in Tab::ALL {
        let on = tab == current;
        view.set_class(ElementId::tab(tab), "active", on);
        view.set_class(ElementId::panel(tab), "active", on);
        view.set_visible(ElementId::panel(tab), on);
    }
}

/// 検出結果を描画
pub fn render_result<V: ViewBinding + ?Sized>(view: &V, result: &DetectionResult, active: &ActiveLibraries) {
    let elements = match &result.source {
        DetectionSource::Text { original_text } => {
            view.set_text(ElementId::OriginalText, original_text);
            view.set_text(
                ElementId::UsedLibraries,
                &used_libraries_text(active.names(), result.word_count),
            );
            &TEXT_RESULT
        }
        DetectionSource::Document { filename, file_type, text_length } => {
            view.set_text(ElementId::DocFilename, filename);
            view.set_text(ElementId::DocFileType, &file_type.to_uppercase());
            view.set_text(ElementId::DocTextLength, &format::char_count_text(*text_length as usize));
            &DOCUMENT_RESULT
        }
    };

    view.set_tag(elements.rule, &format_rule_outcome(&result.rule));
    view.set_tag(elements.llm, &format_model_outcome(&result.model));
    view.set_timing(elements.timing, &timing_panel(result));
    view.set_tag(elements.verdict, &format_verdict(result.verdict));
    view.set_visible(elements.section, true);
}

/// アップロード欄: 空 ↔ ファイル選択済み
pub fn render_upload<V: ViewBinding + ?Sized, H>(view: &V, upload: &UploadState<H>, dragging: bool) {
    view.set_class(ElementId::UploadArea, "dragover", dragging);
    match upload {
        UploadState::Empty => {
            view.set_text(ElementId::FileName, "");
            view.set_text(ElementId::FileSize, "");
            view.set_visible(ElementId::FileInfo, false);
            view.set_visible(ElementId::UploadArea, true);
        }
        UploadState::Selected(file) => {
            view.set_text(ElementId::FileName, &file.name);
            view.set_text(ElementId::FileSize, &format_file_size(file.size));
            view.set_visible(ElementId::UploadArea, false);
            view.set_visible(ElementId::FileInfo, true);
        }
    }
}

pub fn library_rows<H>(state: &AppState<H>) -> Vec<LibraryRow> {
    state
        .libraries
        .iter()
        .map(|library| {
            let active = state.active.contains(&library.name);
            LibraryRow {
                name: library.name.clone(),
                details: library_details(library),
                active,
                add_label: if active { "已添加" } else { "添加使用" }.to_string(),
                add: UiEvent::AddToActive(library.name.clone()),
                edit: UiEvent::EditLibrary(library.name.clone()),
                delete: UiEvent::DeleteLibrary(library.name.clone()),
            }
        })
        .collect()
}

/// 词库一覧
pub fn render_library_table<V: ViewBinding + ?Sized, H>(view: &V, state: &AppState<H>) {
    view.render_library_rows(&library_rows(state));
}

/// 使用词库リスト（ローカル選択）
pub fn render_active_list<V: ViewBinding + ?Sized>(view: &V, active: &ActiveLibraries) {
    let items: Vec<ActiveItem> = active
        .names()
        .iter()
        .map(|name| ActiveItem {
            name: name.clone(),
            remove: UiEvent::RemoveFromActive(name.clone()),
        })
        .collect();
    view.render_active_items(&items);
    view.set_text(ElementId::UsedLibrariesCount, &active_count_text(active.len()));
}

/// サーバ側で有効な词库のステータス表示
pub fn render_status_indicator<V: ViewBinding + ?Sized>(view: &V, enforced: usize, updated_at: &str) {
    let (text, class) = status_indicator(enforced);
    view.set_text(ElementId::CurrentLibraryStatus, &text);
    view.set_class(ElementId::CurrentLibraryStatus, "status-default", class == "status-default");
    view.set_class(ElementId::CurrentLibraryStatus, "status-custom", class == "status-custom");
    view.set_text(ElementId::LastUpdateTime, updated_at);
}

/// 词库エディタ
pub fn render_editor<V: ViewBinding + ?Sized>(view: &V, editor: &EditorState) {
    match editor {
        EditorState::Closed => {
            view.set_visible(ElementId::LibraryEditor, false);
            view.set_enabled(ElementId::LibraryNameInput, true);
        }
        EditorState::Creating => {
            view.set_text(ElementId::EditorTitle, "创建新词库");
            view.set_text(ElementId::LibraryNameInput, "");
            view.set_text(ElementId::LibraryWordsInput, "");
            view.set_enabled(ElementId::LibraryNameInput, true);
            view.set_visible(ElementId::LibraryEditor, true);
        }
        EditorState::Editing(_) => {
            view.set_text(ElementId::EditorTitle, "编辑词库");
            view.set_enabled(ElementId::LibraryNameInput, false);
            view.set_visible(ElementId::LibraryEditor, true);
        }
    }
}
