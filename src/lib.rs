//! 敏感内容检测サービスのCLIクライアント

pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod mime;
pub mod terminal;
