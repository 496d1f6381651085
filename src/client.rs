//! reqwest による検出サービスAPIクライアント

use crate::error::CliError;
use reqwest::multipart::{Form, Part};
use reqwest::RequestBuilder;
use sensitive_detect_common::api::{
    endpoint, join_url, parse_ack, parse_envelope, parse_plain, CreateLibraryBody,
    UpdateDetectionBody, UpdateLibraryBody,
};
use sensitive_detect_common::{
    DetectionApi, DetectionData, DetectionStatus, Error, LibraryContent, LibraryUpdate, Result,
    SelectedFile, TextDetectRequest, WordLibrary,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// GET /health
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: Option<f64>,
    pub version: Option<String>,
}

/// GET /model-status の data
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelStatus {
    pub is_warmed_up: bool,
    pub warm_up_time: Option<f64>,
    pub last_call_time: Option<f64>,
    pub current_time: Option<f64>,
    pub time_since_warmup: Option<f64>,
    /// active / stale / not_warmed
    pub warmup_status: String,
}

fn network(error: reqwest::Error) -> Error {
    Error::Network(error.to_string())
}

pub struct HttpApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpApi {
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> std::result::Result<Self, CliError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    /// 送信してステータスと本文を返す
    async fn send(&self, request: RequestBuilder) -> Result<(u16, String)> {
        let response = request.send().await.map_err(network)?;
        let status = response.status().as_u16();
        let url = response.url().to_string();
        let body = response.text().await.map_err(network)?;
        tracing::debug!(status, bytes = body.len(), %url, "response");
        Ok((status, body))
    }

    pub async fn health(&self) -> Result<HealthStatus> {
        let (status, body) = self.send(self.client.get(self.url(endpoint::HEALTH))).await?;
        parse_plain(status, &body)
    }

    pub async fn model_status(&self) -> Result<ModelStatus> {
        let (status, body) = self.send(self.client.get(self.url(endpoint::MODEL_STATUS))).await?;
        parse_envelope(status, &body)
    }

    /// モデルの予熱（サーバのメッセージを返す）
    pub async fn warm_up_model(&self) -> Result<String> {
        let (status, body) = self
            .send(self.client.post(self.url(endpoint::WARM_UP_MODEL)))
            .await?;
        Ok(parse_ack(status, &body)?.unwrap_or_default())
    }
}

impl DetectionApi for HttpApi {
    type Upload = PathBuf;

    async fn detect_text(&self, request: &TextDetectRequest) -> Result<DetectionData> {
        tracing::info!(chars = request.text.chars().count(), strict = request.strict_mode, "POST /detect/text");
        let (status, body) = self
            .send(self.client.post(self.url(endpoint::DETECT_TEXT)).json(request))
            .await?;
        parse_envelope(status, &body)
    }

    async fn detect_document(&self, file: &SelectedFile<PathBuf>) -> Result<DetectionData> {
        tracing::info!(file = %file.name, mime = %file.mime, size = file.size, "POST /detect/document");
        let content = tokio::fs::read(&file.handle)
            .await
            .map_err(|e| Error::FileRead(format!("{}: {}", file.handle.display(), e)))?;
        let part = Part::bytes(content)
            .file_name(file.name.clone())
            .mime_str(&file.mime)
            .map_err(network)?;
        let form = Form::new().part("file", part);
        let (status, body) = self
            .send(self.client.post(self.url(endpoint::DETECT_DOCUMENT)).multipart(form))
            .await?;
        parse_envelope(status, &body)
    }

    async fn list_libraries(&self) -> Result<Vec<WordLibrary>> {
        let (status, body) = self
            .send(self.client.get(self.url(endpoint::WORD_LIBRARIES)))
            .await?;
        parse_envelope(status, &body)
    }

    async fn get_library(&self, name: &str) -> Result<LibraryContent> {
        let (status, body) = self
            .send(self.client.get(self.url(&endpoint::word_library(name))))
            .await?;
        parse_envelope(status, &body)
    }

    async fn create_library(&self, name: &str, words: &[String]) -> Result<()> {
        let request = self
            .client
            .post(self.url(endpoint::WORD_LIBRARIES))
            .json(&CreateLibraryBody { name, words });
        let (status, body) = self.send(request).await?;
        parse_ack(status, &body).map(|_| ())
    }

    async fn update_library(&self, name: &str, words: &[String]) -> Result<()> {
        let request = self
            .client
            .put(self.url(&endpoint::word_library(name)))
            .json(&UpdateLibraryBody { words });
        let (status, body) = self.send(request).await?;
        parse_ack(status, &body).map(|_| ())
    }

    async fn delete_library(&self, name: &str) -> Result<()> {
        let (status, body) = self
            .send(self.client.delete(self.url(&endpoint::word_library(name))))
            .await?;
        parse_ack(status, &body).map(|_| ())
    }

    async fn detection_status(&self) -> Result<DetectionStatus> {
        let (status, body) = self
            .send(self.client.get(self.url(endpoint::DETECTION_STATUS)))
            .await?;
        parse_envelope(status, &body)
    }

    async fn update_detection_libraries(&self, names: &[String]) -> Result<LibraryUpdate> {
        let request = self
            .client
            .post(self.url(endpoint::DETECTION_UPDATE))
            .json(&UpdateDetectionBody { library_names: names });
        let (status, body) = self.send(request).await?;
        parse_envelope(status, &body)
    }
}
