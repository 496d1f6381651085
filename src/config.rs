use crate::error::{CliError, Result};
use sensitive_detect_common::DEFAULT_BASE_URL;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// ベースURLを上書きする環境変数
pub const BASE_URL_ENV: &str = "SENSITIVE_DETECT_API_URL";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub base_url: String,
    /// リクエストのタイムアウト（未設定なら無制限）
    pub timeout_seconds: Option<u64>,
    /// 削除確認を省略する
    pub assume_yes: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            timeout_seconds: None,
            assume_yes: false,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("sensitive-detect").join("config.json"))
    }

    /// ベースURLの決定: フラグ → 環境変数 → 設定ファイル
    pub fn resolve_base_url(&self, flag: Option<&str>) -> String {
        let env = std::env::var(BASE_URL_ENV).ok();
        pick_base_url(flag, env.as_deref(), &self.base_url)
    }

    pub fn set_base_url(&mut self, url: String) -> Result<()> {
        let url = url.trim().trim_end_matches('/').to_string();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(CliError::Config(format!("URLは http:// または https:// で始めてください: {}", url)));
        }
        self.base_url = url;
        self.save()
    }
}

fn pick_base_url(flag: Option<&str>, env: Option<&str>, configured: &str) -> String {
    [flag, env, Some(configured)]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|url| !url.is_empty())
        .unwrap_or(DEFAULT_BASE_URL)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_pick_base_url_precedence() {
        assert_eq!(pick_base_url(Some("http://flag"), Some("http://env"), "http://file"), "http://flag");
        assert_eq!(pick_base_url(None, Some("http://env"), "http://file"), "http://env");
        assert_eq!(pick_base_url(None, None, "http://file"), "http://file");
        assert_eq!(pick_base_url(None, Some(" "), ""), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_load_missing_file_uses_default() {
        let dir = tempdir().expect("Failed to create temp dir");
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.base_url, "http://localhost:8000");
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("nested").join("config.json");
        let config = Config {
            base_url: "http://detect.internal:9000".into(),
            timeout_seconds: Some(30),
            assume_yes: true,
        };

        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"assume_yes": true}"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert!(config.assume_yes);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_seconds, None);
    }
}
