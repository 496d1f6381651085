//! 検出サービスのHTTP契約
//!
//! 通信そのものは各フロントエンド（reqwest / fetch）が実装し、
//! パス組み立てとレスポンス解釈はここで共有する。

use crate::error::{Error, Result};
use crate::state::SelectedFile;
use crate::types::{
    DetectionData, DetectionStatus, LibraryContent, LibraryUpdate, TextDetectRequest, WordLibrary,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// 既定のAPIベースURL
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// 検出サービスAPI
///
/// ブラウザ（spawn_local）でも使うため Send を要求しない。
#[allow(async_fn_in_trait)]
pub trait DetectionApi {
    /// 選択ファイルの実体。検証を通った後に `detect_document` が読み出す
    type Upload: Clone;

    async fn detect_text(&self, request: &TextDetectRequest) -> Result<DetectionData>;
    async fn detect_document(&self, file: &SelectedFile<Self::Upload>) -> Result<DetectionData>;

    async fn list_libraries(&self) -> Result<Vec<WordLibrary>>;
    async fn get_library(&self, name: &str) -> Result<LibraryContent>;
    async fn create_library(&self, name: &str, words: &[String]) -> Result<()>;
    async fn update_library(&self, name: &str, words: &[String]) -> Result<()>;
    async fn delete_library(&self, name: &str) -> Result<()>;

    async fn detection_status(&self) -> Result<DetectionStatus>;
    async fn update_detection_libraries(&self, names: &[String]) -> Result<LibraryUpdate>;
}

/// エンドポイントのパス
pub mod endpoint {
    pub const DETECT_TEXT: &str = "/detect/text";
    pub const DETECT_DOCUMENT: &str = "/detect/document";
    pub const WORD_LIBRARIES: &str = "/word-libraries";
    pub const DETECTION_STATUS: &str = "/detection-libraries/status";
    pub const DETECTION_UPDATE: &str = "/detection-libraries/update";
    pub const HEALTH: &str = "/health";
    pub const MODEL_STATUS: &str = "/model-status";
    pub const WARM_UP_MODEL: &str = "/warm-up-model";

    /// /word-libraries/{name}（名前はパーセントエンコード）
    pub fn word_library(name: &str) -> String {
        format!("{}/{}", WORD_LIBRARIES, urlencoding::encode(name))
    }
}

/// ベースURLとパスを結合
pub fn join_url(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

/// 词库作成リクエスト
#[derive(Debug, Serialize)]
pub struct CreateLibraryBody<'a> {
    pub name: &'a str,
    pub words: &'a [String],
}

/// 词库更新リクエスト
#[derive(Debug, Serialize)]
pub struct UpdateLibraryBody<'a> {
    pub words: &'a [String],
}

/// 检测词库更新リクエスト
#[derive(Debug, Serialize)]
pub struct UpdateDetectionBody<'a> {
    pub library_names: &'a [String],
}

/// 共通レスポンス {status, data?, message?}
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(default)]
    status: Option<String>,
    data: Option<T>,
    #[serde(default)]
    message: Option<String>,
}

/// FastAPI のエラーレスポンス {detail}
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<serde_json::Value>,
    #[serde(default)]
    message: Option<String>,
}

fn error_detail(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    match parsed.detail {
        Some(serde_json::Value::String(detail)) => Some(detail),
        Some(other) => Some(other.to_string()),
        None => parsed.message,
    }
}

fn check_status(status: u16, body: &str) -> Result<()> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(Error::Http { status, detail: error_detail(body) })
    }
}

/// レスポンスを解釈して data を取り出す
///
/// - 2xx 以外 → Error::Http（detail 付き）
/// - status: "error" → Error::Server
/// - data 欠落 → Error::Server
pub fn parse_envelope<T: DeserializeOwned>(status: u16, body: &str) -> Result<T> {
    check_status(status, body)?;

    let envelope: Envelope<T> = serde_json::from_str(body)?;
    if envelope.status.as_deref() == Some("error") {
        return Err(Error::Server(envelope.message.unwrap_or_else(|| "操作失败".to_string())));
    }
    envelope
        .data
        .ok_or_else(|| Error::Server(envelope.message.unwrap_or_else(|| "响应缺少数据".to_string())))
}

/// エンベロープを持たないレスポンス（/health など）
pub fn parse_plain<T: DeserializeOwned>(status: u16, body: &str) -> Result<T> {
    check_status(status, body)?;
    Ok(serde_json::from_str(body)?)
}

/// data を使わない操作（作成・更新・削除）のレスポンス解釈
pub fn parse_ack(status: u16, body: &str) -> Result<Option<String>> {
    check_status(status, body)?;

    let envelope: Envelope<serde_json::Value> = serde_json::from_str(body)?;
    match envelope.status.as_deref() {
        Some("error") => Err(Error::Server(envelope.message.unwrap_or_else(|| "操作失败".to_string()))),
        _ => Ok(envelope.message),
    }
}

/// 文档检测エラーの通知文言（HTTPステータスで分岐）
pub fn document_error_message(error: &Error) -> String {
    match error {
        Error::Http { status: 400, detail: Some(detail) } => format!("文件格式错误：{}", detail),
        Error::Http { status: 400, detail: None } => {
            "文件格式不支持或文件已损坏，请检查文件格式是否正确".to_string()
        }
        Error::Http { status: 500, .. } => "服务器处理文件时出错，请稍后重试或联系管理员".to_string(),
        Error::Network(_) => "网络连接失败，请检查网络连接后重试".to_string(),
        _ => GENERIC_DETECT_ERROR.to_string(),
    }
}

/// 検出失敗時の汎用文言
pub const GENERIC_DETECT_ERROR: &str = "检测失败，请检查网络连接或稍后重试";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_library_path_encodes_name() {
        assert_eq!(endpoint::word_library("ads"), "/word-libraries/ads");
        assert_eq!(endpoint::word_library("政治 词库"), "/word-libraries/%E6%94%BF%E6%B2%BB%20%E8%AF%8D%E5%BA%93");
    }

    #[test]
    fn test_join_url() {
        assert_eq!(join_url("http://localhost:8000/", "/health"), "http://localhost:8000/health");
        assert_eq!(join_url("http://h", endpoint::DETECT_TEXT), "http://h/detect/text");
    }

    #[test]
    fn test_parse_envelope_success() {
        let body = r#"{"status": "success", "data": {"used_libraries": ["a"], "word_count": 42}}"#;
        let update: LibraryUpdate = parse_envelope(200, body).unwrap();
        assert_eq!(update.word_count, Some(42));
        assert_eq!(update.used_libraries, vec!["a"]);
    }

    #[test]
    fn test_parse_envelope_server_error() {
        let body = r#"{"status": "error", "message": "没有找到有效的词库"}"#;
        let err = parse_envelope::<LibraryUpdate>(200, body).unwrap_err();
        assert!(matches!(err, Error::Server(ref m) if m == "没有找到有效的词库"));
    }

    #[test]
    fn test_parse_envelope_http_error_with_detail() {
        let body = r#"{"detail": "文档内容为空或无法提取文本"}"#;
        let err = parse_envelope::<DetectionData>(400, body).unwrap_err();
        assert_eq!(err.status(), Some(400));
        assert_eq!(err.server_message(), Some("文档内容为空或无法提取文本"));
    }

    #[test]
    fn test_parse_envelope_http_error_non_json() {
        let err = parse_envelope::<DetectionData>(502, "Bad Gateway").unwrap_err();
        assert!(matches!(err, Error::Http { status: 502, detail: None }));
    }

    #[test]
    fn test_parse_ack() {
        let body = r#"{"status": "success", "message": "敏感词库 'a' 已删除"}"#;
        assert_eq!(parse_ack(200, body).unwrap(), Some("敏感词库 'a' 已删除".to_string()));
        assert!(parse_ack(200, r#"{"status": "error"}"#).is_err());
    }

    #[test]
    fn test_parse_plain() {
        let value: serde_json::Value = parse_plain(200, r#"{"status": "healthy"}"#).unwrap();
        assert_eq!(value["status"], "healthy");
        assert!(parse_plain::<serde_json::Value>(503, "").is_err());
    }

    #[test]
    fn test_document_error_message() {
        let err = Error::Http { status: 400, detail: Some("x".into()) };
        assert_eq!(document_error_message(&err), "文件格式错误：x");

        let err = Error::Http { status: 400, detail: None };
        assert!(document_error_message(&err).starts_with("文件格式不支持"));

        let err = Error::Http { status: 500, detail: Some("文档解析失败".into()) };
        assert!(document_error_message(&err).starts_with("服务器处理文件时出错"));

        let err = Error::Network("connection refused".into());
        assert!(document_error_message(&err).starts_with("网络连接失败"));

        let err = Error::Http { status: 413, detail: None };
        assert_eq!(document_error_message(&err), GENERIC_DETECT_ERROR);
    }
}
