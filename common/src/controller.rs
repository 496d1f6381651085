//! 画面コントローラ
//!
//! タブ切り替え、文本/文档检测、词库管理、使用词库の同期をまとめる。
//! 状態は RefCell で保持し、await をまたいで借用しない
//! （重複リクエストは到着順にそのまま反映される）。

use std::cell::{Ref, RefCell};

use crate::api::{document_error_message, DetectionApi, GENERIC_DETECT_ERROR};
use crate::error::{Error, Result, ValidationError};
use crate::format::{char_count_text, format_update_time, synced_count_text, word_count_text};
use crate::render;
use crate::state::{AppState, EditorState, SelectedFile, Tab, UploadState};
use crate::types::{DetectionResult, LibraryUpdate, TextDetectRequest};
use crate::validation::{parse_words, validate_library_form, validate_text, validate_upload};
use crate::view::{ElementId, Notice, UiEvent, ViewBinding, ViewGuard};

/// 静的な操作要素とイベントの対応
fn control_bindings() -> [(ElementId, UiEvent); 10] {
    [
        (ElementId::TabText, UiEvent::SwitchTab(Tab::Text)),
        (ElementId::TabDocument, UiEvent::SwitchTab(Tab::Document)),
        (ElementId::TabLibraries, UiEvent::SwitchTab(Tab::Libraries)),
        (ElementId::DetectTextButton, UiEvent::DetectText),
        (ElementId::DetectDocumentButton, UiEvent::DetectDocument),
        (ElementId::ResetDocumentButton, UiEvent::ResetDocument),
        (ElementId::CreateLibraryButton, UiEvent::CreateLibrary),
        (ElementId::SaveLibraryButton, UiEvent::SaveLibrary),
        (ElementId::CancelEditButton, UiEvent::CancelEdit),
        (ElementId::UpdateDetectionButton, UiEvent::SyncActiveLibraries),
    ]
}

/// 失敗時の通知文言: サーバのメッセージ → HTTPなら fallback → エラー表示
fn failure_message(error: &Error, fallback: &str) -> String {
    match (error.server_message(), error) {
        (Some(message), _) => message.to_string(),
        (None, Error::Http { .. }) => fallback.to_string(),
        (None, other) => other.to_string(),
    }
}

pub struct Controller<A: DetectionApi, V> {
    api: A,
    view: V,
    state: RefCell<AppState<A::Upload>>,
}

impl<A: DetectionApi, V: ViewBinding> Controller<A, V> {
    pub fn new(api: A, view: V) -> Self {
        Self {
            api,
            view,
            state: RefCell::new(AppState::default()),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn state(&self) -> Ref<'_, AppState<A::Upload>> {
        self.state.borrow()
    }

    fn reject(&self, error: ValidationError) -> Error {
        self.view.notify(&Notice::error(error.to_string()));
        error.into()
    }

    /// 静的な操作要素にイベントを登録
    pub fn bind_controls(&self) {
        for (id, event) in control_bindings() {
            self.view.bind(id, event);
        }
    }

    /// 起動時の初期化: 初期表示 → 词库一覧 → サーバ側の使用词库
    pub async fn initialize(&self) -> Result<()> {
        {
            let state = self.state.borrow();
            render::render_tab(&self.view, state.tab);
            render::render_upload(&self.view, &state.upload, state.dragging);
            render::render_editor(&self.view, &state.editor);
        }
        self.update_char_count();

        let libraries = self.load_libraries().await;
        let status = self.load_detection_status().await;
        libraries.and(status)
    }

    /// イベントを対応する操作に振り分ける
    pub async fn dispatch(&self, event: UiEvent) {
        tracing::debug!(?event, "dispatch");
        let outcome = match event {
            UiEvent::SwitchTab(tab) => {
                self.switch_tab(tab);
                Ok(())
            }
            UiEvent::DetectText => self.detect_text().await.map(|_| ()),
            UiEvent::TextChanged => {
                self.update_char_count();
                Ok(())
            }
            UiEvent::DetectDocument => self.detect_document().await.map(|_| ()),
            UiEvent::ResetDocument => {
                self.reset_document();
                Ok(())
            }
            UiEvent::DragOver => {
                self.drag_over();
                Ok(())
            }
            UiEvent::DragLeave => {
                self.drag_leave();
                Ok(())
            }
            UiEvent::DetectShortcut => self.detect_shortcut().await.map(|_| ()),
            UiEvent::CreateLibrary => self.show_library_editor(None).await,
            UiEvent::EditLibrary(name) => self.show_library_editor(Some(&name)).await,
            UiEvent::DeleteLibrary(name) => self.delete_library(&name).await.map(|_| ()),
            UiEvent::SaveLibrary => self.save_library().await,
            UiEvent::CancelEdit => {
                self.hide_library_editor();
                Ok(())
            }
            UiEvent::WordsChanged => {
                self.update_word_count();
                Ok(())
            }
            UiEvent::AddToActive(name) => {
                self.add_to_active(&name);
                Ok(())
            }
            UiEvent::RemoveFromActive(name) => {
                self.remove_from_active(&name);
                Ok(())
            }
            UiEvent::SyncActiveLibraries => self.sync_active_libraries().await.map(|_| ()),
        };

        if let Err(err) = outcome {
            tracing::debug!(error = %err, "event finished with error");
        }
    }

    // =============================================
    // タブ
    // =============================================

    pub fn switch_tab(&self, tab: Tab) {
        self.state.borrow_mut().tab = tab;
        render::render_tab(&self.view, tab);
    }

    // =============================================
    // 文本检测
    // =============================================

    pub fn update_char_count(&self) {
        let count = self.view.text(ElementId::TextInput).chars().count();
        self.view.set_text(ElementId::CharCount, &char_count_text(count));
    }

    pub async fn detect_text(&self) -> Result<DetectionResult> {
        let raw = self.view.text(ElementId::TextInput);
        let text = validate_text(&raw).map_err(|e| self.reject(e))?;
        let request = TextDetectRequest::new(text, self.view.is_checked(ElementId::StrictModeCheckbox));

        let _loading = ViewGuard::loading(&self.view);
        match self.api.detect_text(&request).await {
            Ok(data) => {
                let result = DetectionResult::resolve(data);
                self.show_result(&result);
                Ok(result)
            }
            Err(err) => {
                tracing::error!(error = %err, "文本检测失败");
                self.view.notify(&Notice::error(GENERIC_DETECT_ERROR));
                Err(err)
            }
        }
    }

    fn show_result(&self, result: &DetectionResult) {
        let mut state = self.state.borrow_mut();
        render::render_result(&self.view, result, &state.active);
        state.last_result = Some(result.clone());
    }

    // =============================================
    // 文档检测
    // =============================================

    /// ファイル選択・ドロップの共通受け口（検証はしない）
    pub fn select_file(&self, file: SelectedFile<A::Upload>) {
        let mut state = self.state.borrow_mut();
        tracing::debug!(name = %file.name, mime = %file.mime, size = file.size, "file selected");
        state.upload = UploadState::Selected(file);
        state.dragging = false;
        render::render_upload(&self.view, &state.upload, state.dragging);
    }

    pub fn drag_over(&self) {
        self.set_dragging(true);
    }

    pub fn drag_leave(&self) {
        self.set_dragging(false);
    }

    fn set_dragging(&self, dragging: bool) {
        self.state.borrow_mut().dragging = dragging;
        self.view.set_class(ElementId::UploadArea, "dragover", dragging);
    }

    /// ドロップ: 先頭のファイルのみ受け付ける
    pub fn drop_file(&self, file: Option<SelectedFile<A::Upload>>) {
        self.set_dragging(false);
        if let Some(file) = file {
            self.select_file(file);
        }
    }

    pub fn reset_document(&self) {
        let mut state = self.state.borrow_mut();
        state.upload = UploadState::Empty;
        state.dragging = false;
        self.view.set_text(ElementId::FileInput, "");
        self.view.set_visible(ElementId::DocumentResult, false);
        render::render_upload(&self.view, &state.upload, state.dragging);
    }

    pub async fn detect_document(&self) -> Result<DetectionResult> {
        // 借用したまま検証し、通ったときだけハンドルを複製する
        let checked = {
            let state = self.state.borrow();
            match state.upload.file() {
                Some(file) => validate_upload(&file.mime, file.size).map(|()| file.clone()),
                None => Err(ValidationError::NoFile),
            }
        };
        let file = checked.map_err(|e| self.reject(e))?;

        let _loading = ViewGuard::loading(&self.view);
        match self.api.detect_document(&file).await {
            Ok(data) => {
                let result = DetectionResult::resolve(data);
                self.show_result(&result);
                Ok(result)
            }
            Err(err) => {
                tracing::error!(error = %err, file = %file.name, "文档检测失败");
                self.view.notify(&Notice::error(document_error_message(&err)));
                Err(err)
            }
        }
    }

    /// Ctrl+Enter: 表示中のパネルの検出を実行
    ///
    /// 文档パネルでファイル未選択のときは何もしない。
    pub async fn detect_shortcut(&self) -> Result<Option<DetectionResult>> {
        let (tab, has_file) = {
            let state = self.state.borrow();
            (state.tab, state.upload.file().is_some())
        };
        match tab {
            Tab::Text => self.detect_text().await.map(Some),
            Tab::Document if has_file => self.detect_document().await.map(Some),
            _ => Ok(None),
        }
    }

    // =============================================
    // 词库管理
    // =============================================

    pub async fn load_libraries(&self) -> Result<()> {
        match self.api.list_libraries().await {
            Ok(libraries) => {
                let mut state = self.state.borrow_mut();
                state.libraries = libraries;
                render::render_library_table(&self.view, &state);
                Ok(())
            }
            Err(err) => {
                tracing::error!(error = %err, "加载词库列表失败");
                self.view.notify(&Notice::error("加载词库列表失败"));
                Err(err)
            }
        }
    }

    /// サーバ側で有効な词库を取得し、ローカル選択を置き換える
    pub async fn load_detection_status(&self) -> Result<()> {
        let status = self.api.detection_status().await.map_err(|err| {
            tracing::error!(error = %err, "加载检测词库状态失败");
            err
        })?;

        let mut state = self.state.borrow_mut();
        state.active.replace(&status.used_libraries);
        render::render_active_list(&self.view, &state.active);
        render::render_library_table(&self.view, &state);
        render::render_status_indicator(
            &self.view,
            state.active.len(),
            &format_update_time(chrono::Local::now()),
        );
        if let Some(word_count) = status.word_count.filter(|&n| n > 0) {
            self.view.set_text(
                ElementId::UsedLibrariesCount,
                &synced_count_text(state.active.len(), word_count),
            );
        }
        tracing::info!(libraries = ?state.active.names(), "检测词库状态已加载");
        Ok(())
    }

    pub async fn show_library_editor(&self, name: Option<&str>) -> Result<()> {
        let editor = match name {
            Some(name) => EditorState::Editing(name.to_string()),
            None => EditorState::Creating,
        };
        render::render_editor(&self.view, &editor);
        self.state.borrow_mut().editor = editor;

        match name {
            Some(name) => {
                self.view.set_text(ElementId::LibraryNameInput, name);
                self.load_library_content(name).await
            }
            None => {
                self.update_word_count();
                Ok(())
            }
        }
    }

    async fn load_library_content(&self, name: &str) -> Result<()> {
        match self.api.get_library(name).await {
            Ok(content) => {
                self.view.set_text(ElementId::LibraryNameInput, &content.name);
                self.view.set_text(ElementId::LibraryWordsInput, &content.words.join("\n"));
                self.update_word_count();
                Ok(())
            }
            Err(err) => {
                tracing::error!(error = %err, library = name, "加载词库内容失败");
                self.view.notify(&Notice::error("加载词库内容失败"));
                Err(err)
            }
        }
    }

    pub fn hide_library_editor(&self) {
        let mut state = self.state.borrow_mut();
        state.editor = EditorState::Closed;
        render::render_editor(&self.view, &state.editor);
    }

    pub fn update_word_count(&self) {
        let count = parse_words(&self.view.text(ElementId::LibraryWordsInput)).len();
        self.view.set_text(ElementId::WordCount, &word_count_text(count));
    }

    /// 作成 or 更新（編集中の名前は変更不可）
    pub async fn save_library(&self) -> Result<()> {
        let editing = self.state.borrow().editor.editing_name().map(str::to_string);
        let name_input = match &editing {
            Some(name) => name.clone(),
            None => self.view.text(ElementId::LibraryNameInput),
        };
        let (name, words) = validate_library_form(&name_input, &self.view.text(ElementId::LibraryWordsInput))
            .map_err(|e| self.reject(e))?;

        let _loading = ViewGuard::loading(&self.view);
        let saved = match &editing {
            Some(name) => self.api.update_library(name, &words).await,
            None => self.api.create_library(&name, &words).await,
        };

        match saved {
            Ok(()) => {
                let message = if editing.is_some() { "词库更新成功" } else { "词库创建成功" };
                tracing::info!(library = %name, words = words.len(), "{}", message);
                self.view.notify(&Notice::success(message));
                let _ = self.load_libraries().await;
                self.hide_library_editor();
                Ok(())
            }
            Err(err) => {
                tracing::error!(error = %err, library = %name, "保存词库失败");
                self.view.notify(&Notice::error(format!(
                    "保存词库失败: {}",
                    failure_message(&err, "操作失败")
                )));
                Err(err)
            }
        }
    }

    /// 削除（確認ダイアログで拒否されたら false）
    pub async fn delete_library(&self, name: &str) -> Result<bool> {
        let question = format!("确定要删除词库 \"{}\" 吗？此操作不可恢复。", name);
        if !self.view.confirm(&question) {
            return Ok(false);
        }

        let _loading = ViewGuard::loading(&self.view);
        match self.api.delete_library(name).await {
            Ok(()) => {
                tracing::info!(library = name, "词库删除成功");
                self.view.notify(&Notice::success("词库删除成功"));
                let _ = self.load_libraries().await;
                Ok(true)
            }
            Err(err) => {
                tracing::error!(error = %err, library = name, "删除词库失败");
                self.view.notify(&Notice::error(format!(
                    "删除词库失败: {}",
                    failure_message(&err, "删除失败")
                )));
                Err(err)
            }
        }
    }

    // =============================================
    // 使用词库（ローカル選択 → 明示的に同期）
    // =============================================

    /// ローカル選択に追加（同期はしない）
    pub fn add_to_active(&self, name: &str) -> bool {
        {
            let mut state = self.state.borrow_mut();
            if !state.active.add(name) {
                return false;
            }
            render::render_active_list(&self.view, &state.active);
            render::render_library_table(&self.view, &state);
        }
        self.view.notify(&Notice::success(format!(
            "已将 \"{}\" 添加到使用列表，请点击\"更新检测词库\"按钮应用更改",
            name
        )));
        true
    }

    /// ローカル選択から削除（含まれていなければ何もしない）
    pub fn remove_from_active(&self, name: &str) -> bool {
        {
            let mut state = self.state.borrow_mut();
            if !state.active.remove(name) {
                return false;
            }
            render::render_active_list(&self.view, &state.active);
            render::render_library_table(&self.view, &state);
        }
        self.view.notify(&Notice::success(format!(
            "已将 \"{}\" 从使用列表移除，请点击\"更新检测词库\"按钮应用更改",
            name
        )));
        true
    }

    /// ローカル選択をサーバへ反映
    pub async fn sync_active_libraries(&self) -> Result<LibraryUpdate> {
        let names = self.state.borrow().active.names().to_vec();

        let _busy = ViewGuard::updating(&self.view);
        match self.api.update_detection_libraries(&names).await {
            Ok(update) => {
                let word_count = update.word_count.unwrap_or_default();
                render::render_status_indicator(
                    &self.view,
                    names.len(),
                    &format_update_time(chrono::Local::now()),
                );
                self.view.set_text(
                    ElementId::UsedLibrariesCount,
                    &synced_count_text(names.len(), word_count),
                );
                tracing::info!(libraries = names.len(), word_count, "检测词库更新成功");
                self.view.notify(&Notice::success(format!(
                    "检测词库更新成功！使用 {} 个词库，共 {} 个敏感词",
                    names.len(),
                    word_count
                )));
                Ok(update)
            }
            Err(err) => {
                tracing::error!(error = %err, "更新检测词库失败");
                let message = match &err {
                    Error::Server(message) => format!("检测词库更新失败: {}", message),
                    other => format!("更新检测词库失败: {}", failure_message(other, "操作失败")),
                };
                self.view.notify(&Notice::error(message));
                Err(err)
            }
        }
    }
}
