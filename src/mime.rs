//! 拡張子から MIME タイプを推定（ブラウザの File.type 相当）

use std::path::Path;

/// 判定できない場合の MIME（アップロード検証で拒否される）
pub const UNKNOWN_MIME: &str = "application/octet-stream";

pub fn mime_from_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "txt" => "text/plain",
        "pdf" => "application/pdf",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "doc" => "application/msword",
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "bmp" => "image/bmp",
        "gif" => "image/gif",
        "tif" | "tiff" => "image/tiff",
        _ => UNKNOWN_MIME,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sensitive_detect_common::validation::is_allowed_mime;

    #[test]
    fn test_known_extensions_are_uploadable() {
        for name in ["a.txt", "b.PDF", "c.docx", "d.doc", "e.JPG", "f.png", "g.tiff"] {
            let mime = mime_from_path(Path::new(name));
            assert!(is_allowed_mime(mime), "{} -> {}", name, mime);
        }
    }

    #[test]
    fn test_unknown_extension() {
        assert_eq!(mime_from_path(Path::new("setup.exe")), UNKNOWN_MIME);
        assert_eq!(mime_from_path(Path::new("README")), UNKNOWN_MIME);
        assert!(!is_allowed_mime(UNKNOWN_MIME));
    }
}
