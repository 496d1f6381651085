//! 検出サービスへの fetch 呼び出し
//!
//! レスポンスの解釈は common::api に任せ、ここは送受信だけを行う。

use sensitive_detect_common::api::{
    endpoint, join_url, parse_ack, parse_envelope, CreateLibraryBody, UpdateDetectionBody,
    UpdateLibraryBody,
};
use sensitive_detect_common::{
    DetectionApi, DetectionData, DetectionStatus, Error, LibraryContent, LibraryUpdate, Result,
    SelectedFile, TextDetectRequest, WordLibrary, DEFAULT_BASE_URL,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FormData, Headers, Request, RequestInit, RequestMode, Response};

/// ビルド時に SENSITIVE_DETECT_API_URL が指定されていればそれを使う
pub fn base_url() -> &'static str {
    option_env!("SENSITIVE_DETECT_API_URL").unwrap_or(DEFAULT_BASE_URL)
}

fn js_error(value: JsValue) -> Error {
    Error::Network(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
}

enum Body {
    Empty,
    Json(String),
    Form(FormData),
}

impl Body {
    fn json<T: serde::Serialize>(value: &T) -> Result<Self> {
        Ok(Body::Json(serde_json::to_string(value)?))
    }
}

pub struct FetchApi {
    base_url: String,
}

impl FetchApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into() }
    }

    /// リクエスト送信（ステータスと本文を返す）
    async fn send(&self, method: &str, path: &str, body: Body) -> Result<(u16, String)> {
        let url = join_url(&self.base_url, path);
        let headers = Headers::new().map_err(js_error)?;

        let opts = RequestInit::new();
        opts.set_method(method);
        opts.set_mode(RequestMode::Cors);
        match &body {
            Body::Empty => {}
            Body::Json(text) => {
                headers.set("Content-Type", "application/json").map_err(js_error)?;
                opts.set_body(&JsValue::from_str(text));
            }
            // multipart の境界はブラウザが付ける
            Body::Form(form) => opts.set_body(form.as_ref()),
        }
        opts.set_headers(headers.as_ref());

        let request = Request::new_with_str_and_init(&url, &opts).map_err(js_error)?;
        let window = web_sys::window().ok_or_else(|| Error::Network("window is unavailable".into()))?;
        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(js_error)?;
        let resp: Response = resp_value.dyn_into().map_err(js_error)?;

        let text = JsFuture::from(resp.text().map_err(js_error)?)
            .await
            .map_err(js_error)?;
        Ok((resp.status(), text.as_string().unwrap_or_default()))
    }
}

/// アップロード用の FormData（フィールド名 file）
///
/// File をそのまま渡すので、中身はブラウザが送信時に読む。
fn file_form(file: &SelectedFile<File>) -> Result<FormData> {
    let form = FormData::new().map_err(js_error)?;
    form.append_with_blob_and_filename("file", &file.handle, &file.name)
        .map_err(js_error)?;
    Ok(form)
}

impl DetectionApi for FetchApi {
    type Upload = File;

    async fn detect_text(&self, request: &TextDetectRequest) -> Result<DetectionData> {
        let (status, body) = self
            .send("POST", endpoint::DETECT_TEXT, Body::json(request)?)
            .await?;
        parse_envelope(status, &body)
    }

    async fn detect_document(&self, file: &SelectedFile<File>) -> Result<DetectionData> {
        let (status, body) = self
            .send("POST", endpoint::DETECT_DOCUMENT, Body::Form(file_form(file)?))
            .await?;
        parse_envelope(status, &body)
    }

    async fn list_libraries(&self) -> Result<Vec<WordLibrary>> {
        let (status, body) = self.send("GET", endpoint::WORD_LIBRARIES, Body::Empty).await?;
        parse_envelope(status, &body)
    }

    async fn get_library(&self, name: &str) -> Result<LibraryContent> {
        let (status, body) = self
            .send("GET", &endpoint::word_library(name), Body::Empty)
            .await?;
        parse_envelope(status, &body)
    }

    async fn create_library(&self, name: &str, words: &[String]) -> Result<()> {
        let body = Body::json(&CreateLibraryBody { name, words })?;
        let (status, body) = self.send("POST", endpoint::WORD_LIBRARIES, body).await?;
        parse_ack(status, &body).map(|_| ())
    }

    async fn update_library(&self, name: &str, words: &[String]) -> Result<()> {
        let body = Body::json(&UpdateLibraryBody { words })?;
        let (status, body) = self
            .send("PUT", &endpoint::word_library(name), body)
            .await?;
        parse_ack(status, &body).map(|_| ())
    }

    async fn delete_library(&self, name: &str) -> Result<()> {
        let (status, body) = self
            .send("DELETE", &endpoint::word_library(name), Body::Empty)
            .await?;
        parse_ack(status, &body).map(|_| ())
    }

    async fn detection_status(&self) -> Result<DetectionStatus> {
        let (status, body) = self.send("GET", endpoint::DETECTION_STATUS, Body::Empty).await?;
        parse_envelope(status, &body)
    }

    async fn update_detection_libraries(&self, names: &[String]) -> Result<LibraryUpdate> {
        let body = Body::json(&UpdateDetectionBody { library_names: names })?;
        let (status, body) = self.send("POST", endpoint::DETECTION_UPDATE, body).await?;
        parse_envelope(status, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_default() {
        if option_env!("SENSITIVE_DETECT_API_URL").is_none() {
            assert_eq!(base_url(), DEFAULT_BASE_URL);
        }
    }
}
