//! エラー型定義
//!
//! - ValidationError: 通信前にクライアント側で弾く入力エラー
//! - Error: 通信・サーバ応答を含む共通エラー

use thiserror::Error;

/// 入力検証エラー（ネットワーク呼び出し前に検出）
///
/// Display はそのまま画面通知の文言になる。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("请输入需要检测的文本内容")]
    EmptyText,

    #[error("请选择要检测的文档")]
    NoFile,

    #[error("不支持的文件类型！支持 TXT、PDF、DOCX、DOC、图片格式（OCR）")]
    UnsupportedType(String),

    #[error("文件大小不能超过 10MB")]
    FileTooLarge(u64),

    #[error("请输入词库名称")]
    EmptyLibraryName,

    #[error("请输入敏感词")]
    EmptyWords,

    #[error("请输入有效的敏感词")]
    NoValidWords,
}

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("HTTP error! status: {status}")]
    Http { status: u16, detail: Option<String> },

    #[error("Network error: {0}")]
    Network(String),

    #[error("{0}")]
    Server(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    /// 検証後、送信のためにファイルを読み出せなかった
    #[error("文件读取失败: {0}")]
    FileRead(String),
}

impl Error {
    /// サーバが返したメッセージ（detail / message）があれば取り出す
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Error::Http { detail, .. } => detail.as_deref(),
            Error::Server(message) => Some(message.as_str()),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
