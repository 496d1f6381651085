//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use sensitive_detect::commands;
use sensitive_detect::error::CliError;
use sensitive_detect_common::{Error, ValidationError};
use std::path::Path;
use tempfile::tempdir;

/// 存在しない文書を指定した場合
#[test]
fn test_load_nonexistent_document() {
    let result = commands::load_document(Path::new("/nonexistent/path/12345.pdf"));
    assert!(result.is_err());

    let err = result.unwrap_err();
    assert!(matches!(err, CliError::FileNotFound(_)));
}

/// ディレクトリは文書として扱わない
#[test]
fn test_load_directory_as_document() {
    let dir = tempdir().expect("Failed to create temp dir");
    let result = commands::load_document(dir.path());
    assert!(matches!(result, Err(CliError::FileNotFound(_))));
}

/// 空ファイルは読み込めるがサイズ 0
#[test]
fn test_load_empty_document() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("empty.txt");
    std::fs::write(&path, "").unwrap();

    let file = commands::load_document(&path).unwrap();
    assert_eq!(file.size, 0);
    assert_eq!(file.mime, "text/plain");
}

/// CliErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        CliError::Config("テスト設定エラー".to_string()),
        CliError::FileNotFound("report.pdf".to_string()),
        CliError::Detect(Error::Network("connection refused".to_string())),
        CliError::Detect(Error::Server("词库不存在".to_string())),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

/// 検出エラーはそのままの文言で表示される
#[test]
fn test_detect_error_is_transparent() {
    let err: CliError = Error::from(ValidationError::EmptyText).into();
    assert_eq!(err.to_string(), "请输入需要检测的文本内容");

    let err: CliError = Error::Http { status: 404, detail: Some("词库不存在".into()) }.into();
    assert_eq!(err.to_string(), "HTTP error! status: 404");
}

/// std::io::Error から変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: CliError = io_err.into();
    assert!(matches!(err, CliError::Io(_)));
    assert!(err.to_string().contains("IOエラー"));
}

/// serde_json::Error から変換
#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{invalid").unwrap_err();
    let err: CliError = json_err.into();
    assert!(matches!(err, CliError::JsonParse(_)));
}

/// 壊れた設定ファイル
#[test]
fn test_broken_config_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{not json").unwrap();

    let result = sensitive_detect::config::Config::load_from(&path);
    assert!(matches!(result, Err(CliError::JsonParse(_))));
}
