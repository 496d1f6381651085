//! HTTPクライアントのテスト
//!
//! mockito のサーバに対してパス・本文・エラー変換を検証

use mockito::Matcher;
use sensitive_detect::client::HttpApi;
use sensitive_detect_common::{
    DetectionApi, DetectionFlow, Error, SelectedFile, TextDetectRequest,
};
use serde_json::json;
use std::path::PathBuf;
use tempfile::{tempdir, TempDir};

/// 一時ディレクトリにファイルを書き、選択状態を作る
fn selected(dir: &TempDir, name: &str, mime: &str, content: &[u8]) -> SelectedFile<PathBuf> {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("Failed to write fixture");
    SelectedFile::new(name, mime, content.len() as u64, path)
}

fn api_for(server: &mockito::Server) -> HttpApi {
    HttpApi::new(server.url(), None).expect("Failed to build client")
}

/// 文本检测は JSON 本文で送る（fast_mode は常に false）
#[tokio::test]
async fn test_detect_text_posts_json() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/detect/text")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({
            "text": "测试文本",
            "fast_mode": false,
            "strict_mode": true
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "status": "success",
                "data": {
                    "original_text": "测试文本",
                    "llm_detected": "正常",
                    "llm_time": 812.5,
                    "detection_flow": "strict_mode",
                    "final_result": "正常"
                }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let api = api_for(&server);
    let data = api
        .detect_text(&TextDetectRequest::new("测试文本", true))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(data.detection_flow, Some(DetectionFlow::StrictMode));
    assert_eq!(data.llm_time, Some(812.5));
    assert_eq!(data.final_result.as_deref(), Some("正常"));
}

/// 文档检测は multipart の file フィールドで送る
#[tokio::test]
async fn test_detect_document_multipart() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/detect/document")
        .match_header("content-type", Matcher::Regex("^multipart/form-data".into()))
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#"name="file"; filename="notes.txt""#.into()),
            Matcher::Regex("(?i)content-type: text/plain".into()),
            Matcher::Regex("hello world".into()),
        ]))
        .with_status(200)
        .with_body(
            json!({
                "status": "success",
                "data": {
                    "filename": "notes.txt",
                    "file_type": "TXT",
                    "text_length": 11,
                    "rule_detection": {"all_results": [], "word_count": 0},
                    "llm_time": 0,
                    "detection_flow": "rule_only",
                    "final_result": "正常"
                }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let dir = tempdir().expect("Failed to create temp dir");
    let api = api_for(&server);
    let file = selected(&dir, "notes.txt", "text/plain", b"hello world");
    let data = api.detect_document(&file).await.unwrap();

    mock.assert_async().await;
    assert_eq!(data.filename.as_deref(), Some("notes.txt"));
    assert_eq!(data.text_length, Some(11));
}

/// 400 の detail はエラーに保持される
#[tokio::test]
async fn test_detect_document_bad_request_detail() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/detect/document")
        .with_status(400)
        .with_body(r#"{"detail": "PDF 解析失败"}"#)
        .create_async()
        .await;

    let dir = tempdir().expect("Failed to create temp dir");
    let api = api_for(&server);
    let file = selected(&dir, "a.pdf", "application/pdf", b"%PDF");
    let err = api.detect_document(&file).await.unwrap_err();

    assert!(matches!(err, Error::Http { status: 400, .. }));
    assert_eq!(err.server_message(), Some("PDF 解析失败"));
}

/// 送信時にファイルが消えていれば読み出しエラー
#[tokio::test]
async fn test_detect_document_missing_file_is_read_error() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/detect/document")
        .expect(0)
        .create_async()
        .await;

    let dir = tempdir().expect("Failed to create temp dir");
    let file = selected(&dir, "gone.txt", "text/plain", b"bye");
    std::fs::remove_file(&file.handle).unwrap();

    let err = api_for(&server).detect_document(&file).await.unwrap_err();

    mock.assert_async().await;
    assert!(matches!(err, Error::FileRead(_)));
}

/// 词库名はパスでパーセントエンコードされる
#[tokio::test]
async fn test_get_library_encodes_name() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/word-libraries/%E6%94%BF%E6%B2%BB")
        .with_status(200)
        .with_body(
            json!({
                "status": "success",
                "data": {"name": "政治", "words": ["a", "b"], "word_count": 2}
            })
            .to_string(),
        )
        .create_async()
        .await;

    let api = api_for(&server);
    let content = api.get_library("政治").await.unwrap();

    mock.assert_async().await;
    assert_eq!(content.name, "政治");
    assert_eq!(content.words, vec!["a", "b"]);
}

#[tokio::test]
async fn test_library_crud_requests() {
    let mut server = mockito::Server::new_async().await;
    let ok = json!({"status": "success", "message": "ok"}).to_string();

    let create = server
        .mock("POST", "/word-libraries")
        .match_body(Matcher::Json(json!({"name": "广告", "words": ["推广", "加微信"]})))
        .with_status(200)
        .with_body(&ok)
        .create_async()
        .await;
    let update = server
        .mock("PUT", "/word-libraries/ads")
        .match_body(Matcher::Json(json!({"words": ["spam"]})))
        .with_status(200)
        .with_body(&ok)
        .create_async()
        .await;
    let delete = server
        .mock("DELETE", "/word-libraries/ads")
        .with_status(200)
        .with_body(&ok)
        .create_async()
        .await;

    let api = api_for(&server);
    api.create_library("广告", &["推广".into(), "加微信".into()]).await.unwrap();
    api.update_library("ads", &["spam".into()]).await.unwrap();
    api.delete_library("ads").await.unwrap();

    create.assert_async().await;
    update.assert_async().await;
    delete.assert_async().await;
}

/// status: "error" はサーバのメッセージ付きで失敗する
#[tokio::test]
async fn test_error_status_in_body() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/word-libraries")
        .with_status(200)
        .with_body(r#"{"status": "error", "message": "词库已存在"}"#)
        .create_async()
        .await;

    let api = api_for(&server);
    let err = api.create_library("广告", &["x".into()]).await.unwrap_err();
    assert!(matches!(err, Error::Server(ref m) if m == "词库已存在"));
}

#[tokio::test]
async fn test_update_detection_libraries_body() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/detection-libraries/update")
        .match_body(Matcher::Json(json!({"library_names": ["政治", "广告"]})))
        .with_status(200)
        .with_body(
            json!({
                "status": "success",
                "data": {"used_libraries": ["政治", "广告"], "word_count": 120}
            })
            .to_string(),
        )
        .create_async()
        .await;

    let api = api_for(&server);
    let update = api
        .update_detection_libraries(&["政治".into(), "广告".into()])
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(update.word_count, Some(120));
}

#[tokio::test]
async fn test_health_and_model_status() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/health")
        .with_status(200)
        .with_body(r#"{"status": "healthy", "timestamp": 1718000000.5, "version": "2.0.0"}"#)
        .create_async()
        .await;
    server
        .mock("GET", "/model-status")
        .with_status(200)
        .with_body(
            json!({
                "status": "success",
                "data": {"is_warmed_up": true, "warmup_status": "active", "time_since_warmup": 12.0}
            })
            .to_string(),
        )
        .create_async()
        .await;
    let warm = server
        .mock("POST", "/warm-up-model")
        .with_status(200)
        .with_body(r#"{"status": "success", "message": "模型预热完成"}"#)
        .create_async()
        .await;

    let api = api_for(&server);
    let health = api.health().await.unwrap();
    assert_eq!(health.status, "healthy");
    assert_eq!(health.version.as_deref(), Some("2.0.0"));

    let model = api.model_status().await.unwrap();
    assert!(model.is_warmed_up);
    assert_eq!(model.warmup_status, "active");

    assert_eq!(api.warm_up_model().await.unwrap(), "模型预热完成");
    warm.assert_async().await;
}

/// 接続できない場合は Network エラー
#[tokio::test]
async fn test_connection_refused_is_network_error() {
    let api = HttpApi::new("http://127.0.0.1:1", None).unwrap();
    let err = api.list_libraries().await.unwrap_err();
    assert!(matches!(err, Error::Network(_)));
}
