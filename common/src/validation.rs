//! クライアント側の入力検証
//!
//! ここで弾いたものはネットワークに出ない。

use crate::error::ValidationError;

/// アップロード可能なMIMEタイプ（文書 + OCR対象の画像）
pub const ALLOWED_MIME_TYPES: &[&str] = &[
    "text/plain",
    "application/pdf",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "application/msword",
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/bmp",
    "image/gif",
    "image/tiff",
];

/// アップロード上限 10MB
pub const MAX_UPLOAD_SIZE: u64 = 10 * 1024 * 1024;

/// 検出テキストを検証してトリム済みの文字列を返す
pub fn validate_text(raw: &str) -> Result<&str, ValidationError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(ValidationError::EmptyText);
    }
    Ok(text)
}

pub fn is_allowed_mime(mime: &str) -> bool {
    ALLOWED_MIME_TYPES.contains(&mime)
}

/// 文書アップロードの検証（種類 → サイズの順）
pub fn validate_upload(mime: &str, size: u64) -> Result<(), ValidationError> {
    if !is_allowed_mime(mime) {
        return Err(ValidationError::UnsupportedType(mime.to_string()));
    }
    if size > MAX_UPLOAD_SIZE {
        return Err(ValidationError::FileTooLarge(size));
    }
    Ok(())
}

/// 1行1語の敏感词テキストを分解（トリムして空行を除く）
pub fn parse_words(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|word| !word.is_empty())
        .map(String::from)
        .collect()
}

/// 词库フォームの検証
///
/// # Returns
/// (トリム済みの名前, 敏感词リスト)
pub fn validate_library_form(name: &str, words_text: &str) -> Result<(String, Vec<String>), ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyLibraryName);
    }
    if words_text.trim().is_empty() {
        return Err(ValidationError::EmptyWords);
    }

    let words = parse_words(words_text);
    if words.is_empty() {
        return Err(ValidationError::NoValidWords);
    }
    Ok((name.to_string(), words))
}
