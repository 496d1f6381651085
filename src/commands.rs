//! サブコマンドの実行
//!
//! 各コマンドはターミナル版の画面に入力を書き込み、共通コントローラの操作を呼ぶ。

use crate::cli::WordsArgs;
use crate::client::HttpApi;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::mime::mime_from_path;
use crate::terminal::TerminalView;
use sensitive_detect_common::types::{DetectionResult, LibraryUpdate};
use sensitive_detect_common::{Controller, ElementId, SelectedFile, ViewBinding};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub type CliController = Controller<HttpApi, TerminalView>;

/// 設定からコントローラを組み立てる
pub fn build_controller(config: &Config, base_url: Option<&str>, assume_yes: bool) -> Result<CliController> {
    let url = config.resolve_base_url(base_url);
    let timeout = config.timeout_seconds.map(Duration::from_secs);
    tracing::debug!(%url, ?timeout, "api client");

    let api = HttpApi::new(url, timeout)?;
    let view = TerminalView::new(assume_yes || config.assume_yes);
    Ok(Controller::new(api, view))
}

/// 文書ファイルを選択する（MIME は拡張子から推定）
///
/// サイズはメタデータから取る。中身は検証後の送信時に読む。
pub fn load_document(path: &Path) -> Result<SelectedFile<PathBuf>> {
    if !path.is_file() {
        return Err(CliError::FileNotFound(path.display().to_string()));
    }
    let size = std::fs::metadata(path)?.len();
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    Ok(SelectedFile::new(name, mime_from_path(path), size, path.to_path_buf()))
}

/// --word と --words-file を1行1語のテキストにまとめる
pub fn read_words(args: &WordsArgs) -> Result<String> {
    let mut lines = args.words.clone();
    if let Some(path) = &args.words_file {
        if !path.is_file() {
            return Err(CliError::FileNotFound(path.display().to_string()));
        }
        lines.push(std::fs::read_to_string(path)?);
    }
    Ok(lines.join("\n"))
}

pub async fn detect_text(controller: &CliController, text: &str, strict: bool) -> Result<DetectionResult> {
    let view = controller.view();
    view.set_text(ElementId::TextInput, text);
    view.set_checked(ElementId::StrictModeCheckbox, strict);
    controller.update_char_count();
    Ok(controller.detect_text().await?)
}

pub async fn detect_document(controller: &CliController, path: &Path) -> Result<DetectionResult> {
    let file = load_document(path)?;
    controller.select_file(file);
    Ok(controller.detect_document().await?)
}

/// 词库一覧（使用中の词库に印を付ける）
pub async fn list_libraries(controller: &CliController) -> Result<String> {
    if let Err(err) = controller.load_detection_status().await {
        tracing::warn!(error = %err, "使用词库の取得に失敗、印なしで表示");
    }
    controller.load_libraries().await?;
    Ok(controller.view().library_table())
}

pub async fn show_library(controller: &CliController, name: &str) -> Result<String> {
    controller.show_library_editor(Some(name)).await?;
    Ok(controller.view().editor_report())
}

pub async fn create_library(controller: &CliController, name: &str, words: &str) -> Result<()> {
    controller.show_library_editor(None).await?;
    let view = controller.view();
    view.set_text(ElementId::LibraryNameInput, name);
    view.set_text(ElementId::LibraryWordsInput, words);
    controller.update_word_count();
    Ok(controller.save_library().await?)
}

/// 既存の词库を読み込んでから敏感词を置き換える
pub async fn update_library(controller: &CliController, name: &str, words: &str) -> Result<()> {
    controller.show_library_editor(Some(name)).await?;
    controller.view().set_text(ElementId::LibraryWordsInput, words);
    controller.update_word_count();
    Ok(controller.save_library().await?)
}

pub async fn delete_library(controller: &CliController, name: &str) -> Result<bool> {
    Ok(controller.delete_library(name).await?)
}

pub async fn active_status(controller: &CliController) -> Result<String> {
    controller.load_detection_status().await?;
    Ok(controller.view().active_report())
}

/// 選択を names で置き換えて同期
pub async fn apply_active(controller: &CliController, names: &[String]) -> Result<LibraryUpdate> {
    for name in names {
        controller.add_to_active(name);
    }
    Ok(controller.sync_active_libraries().await?)
}

/// サーバ側の選択に追加して同期
pub async fn add_active(controller: &CliController, names: &[String]) -> Result<LibraryUpdate> {
    controller.load_detection_status().await?;
    for name in names {
        controller.add_to_active(name);
    }
    Ok(controller.sync_active_libraries().await?)
}

/// サーバ側の選択から外して同期
pub async fn remove_active(controller: &CliController, names: &[String]) -> Result<LibraryUpdate> {
    controller.load_detection_status().await?;
    for name in names {
        if !controller.remove_from_active(name) {
            tracing::warn!(library = %name, "使用中の词库ではありません");
        }
    }
    Ok(controller.sync_active_libraries().await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_document() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("report.PDF");
        std::fs::write(&path, b"%PDF-1.4").unwrap();

        let file = load_document(&path).unwrap();
        assert_eq!(file.name, "report.PDF");
        assert_eq!(file.mime, "application/pdf");
        assert_eq!(file.size, 8);
        assert_eq!(file.handle, path);
    }

    /// サイズはメタデータから取り、中身は読まない
    #[test]
    fn test_load_document_sparse_size() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("huge.pdf");
        std::fs::File::create(&path).unwrap().set_len(1 << 30).unwrap();

        let file = load_document(&path).unwrap();
        assert_eq!(file.size, 1 << 30);
        assert_eq!(file.mime, "application/pdf");
    }

    #[test]
    fn test_load_document_missing() {
        let result = load_document(Path::new("/nonexistent/path/report.pdf"));
        assert!(matches!(result, Err(CliError::FileNotFound(_))));
    }

    #[test]
    fn test_read_words_merges_sources() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("words.txt");
        std::fs::write(&path, "赌博\n\n色情\n").unwrap();

        let args = WordsArgs {
            words: vec!["诈骗".into()],
            words_file: Some(path),
        };
        let text = read_words(&args).unwrap();
        assert_eq!(sensitive_detect_common::parse_words(&text), vec!["诈骗", "赌博", "色情"]);
    }

    #[test]
    fn test_build_controller_uses_flag() {
        let config = Config::default();
        let controller = build_controller(&config, Some("http://flag:1"), false).unwrap();
        assert_eq!(controller.api().base_url(), "http://flag:1");
    }
}
