//! アプリケーション状態
//!
//! コントローラが所有し、描画関数へ明示的に渡す。

use crate::types::{DetectionResult, WordLibrary};

/// タブ（表示パネル）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tab {
    #[default]
    Text,
    Document,
    Libraries,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Text, Tab::Document, Tab::Libraries];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tab::Text => "text",
            Tab::Document => "document",
            Tab::Libraries => "libraries",
        }
    }
}

impl std::str::FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Tab::Text),
            "document" => Ok(Tab::Document),
            "libraries" => Ok(Tab::Libraries),
            _ => Err(format!("Unknown tab: {}", s)),
        }
    }
}

/// 検出に使う词库の選択（ローカル、同期前）
///
/// 順序を保ち、重複を持たない。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveLibraries {
    names: Vec<String>,
}

impl ActiveLibraries {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加。既に含まれていれば何もせず false
    pub fn add(&mut self, name: &str) -> bool {
        if self.contains(name) {
            return false;
        }
        self.names.push(name.to_string());
        true
    }

    /// 削除。含まれていなければ何もせず false
    pub fn remove(&mut self, name: &str) -> bool {
        match self.names.iter().position(|n| n == name) {
            Some(index) => {
                self.names.remove(index);
                true
            }
            None => false,
        }
    }

    /// サーバ状態で置き換える（重複は先勝ちで除去）
    pub fn replace<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.names.clear();
        for name in names {
            self.add(name.as_ref());
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// 選択中のファイル
///
/// 中身は持たない。`handle` は各フロントエンドのファイル実体
/// （CLI ではパス、ブラウザでは File）で、検証を通った後にだけ読み出す。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile<H> {
    pub name: String,
    /// 宣言されたMIMEタイプ（ブラウザの File.type 相当）
    pub mime: String,
    /// メタデータ上のサイズ（バイト）
    pub size: u64,
    pub handle: H,
}

impl<H> SelectedFile<H> {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, size: u64, handle: H) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            size,
            handle,
        }
    }
}

/// アップロード欄の状態
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadState<H> {
    Empty,
    Selected(SelectedFile<H>),
}

impl<H> Default for UploadState<H> {
    fn default() -> Self {
        UploadState::Empty
    }
}

impl<H> UploadState<H> {
    pub fn file(&self) -> Option<&SelectedFile<H>> {
        match self {
            UploadState::Selected(file) => Some(file),
            UploadState::Empty => None,
        }
    }
}

/// 词库エディタの状態
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditorState {
    #[default]
    Closed,
    Creating,
    /// 編集中（名前は変更不可）
    Editing(String),
}

impl EditorState {
    pub fn editing_name(&self) -> Option<&str> {
        match self {
            EditorState::Editing(name) => Some(name.as_str()),
            _ => None,
        }
    }
}

/// 画面全体の状態
#[derive(Debug, Clone)]
pub struct AppState<H> {
    pub tab: Tab,
    pub libraries: Vec<WordLibrary>,
    pub active: ActiveLibraries,
    pub upload: UploadState<H>,
    pub dragging: bool,
    pub editor: EditorState,
    pub last_result: Option<DetectionResult>,
}

impl<H> Default for AppState<H> {
    fn default() -> Self {
        Self {
            tab: Tab::default(),
            libraries: Vec::new(),
            active: ActiveLibraries::default(),
            upload: UploadState::Empty,
            dragging: false,
            editor: EditorState::default(),
            last_result: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_add_is_idempotent() {
        let mut active = ActiveLibraries::new();
        assert!(active.add("foo"));
        assert!(!active.add("foo"));
        assert_eq!(active.names(), &["foo".to_string()]);
    }

    #[test]
    fn test_active_remove_missing_is_noop() {
        let mut active = ActiveLibraries::new();
        active.add("a");
        assert!(!active.remove("b"));
        assert_eq!(active.len(), 1);
        assert!(active.remove("a"));
        assert!(active.is_empty());
    }

    #[test]
    fn test_active_keeps_order() {
        let mut active = ActiveLibraries::new();
        active.add("c");
        active.add("a");
        active.add("b");
        active.remove("a");
        assert_eq!(active.names(), &["c".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_active_replace_dedups() {
        let mut active = ActiveLibraries::new();
        active.add("old");
        active.replace(["x", "y", "x"]);
        assert_eq!(active.names(), &["x".to_string(), "y".to_string()]);
        assert!(!active.contains("old"));
    }

    #[test]
    fn test_tab_parse() {
        assert_eq!("libraries".parse::<Tab>(), Ok(Tab::Libraries));
        assert!("settings".parse::<Tab>().is_err());
        assert_eq!(Tab::Document.as_str(), "document");
    }

    #[test]
    fn test_selected_file_keeps_handle() {
        let file = SelectedFile::new("a.txt", "text/plain", 5, "/tmp/a.txt");
        assert_eq!(file.size, 5);
        assert_eq!(file.handle, "/tmp/a.txt");
        assert_eq!(UploadState::Selected(file.clone()).file(), Some(&file));
        assert_eq!(UploadState::<&str>::Empty.file(), None);
    }

    #[test]
    fn test_default_state_needs_no_default_handle() {
        struct Opaque;
        let state: AppState<Opaque> = AppState::default();
        assert!(state.upload.file().is_none());
        assert_eq!(state.tab, Tab::Text);
    }

    #[test]
    fn test_editor_state() {
        assert_eq!(EditorState::Editing("x".into()).editing_name(), Some("x"));
        assert_eq!(EditorState::Creating.editing_name(), None);
    }
}
