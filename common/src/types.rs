//! 検出APIの型定義
//!
//! - TextDetectRequest: /detect/text のリクエスト
//! - DetectionData: /detect/text と /detect/document の生レスポンス
//! - DetectionResult: 生レスポンスを一度だけ解決した表示用の結果
//! - WordLibrary / LibraryContent / DetectionStatus / LibraryUpdate: 词库API

use serde::{Deserialize, Serialize};

/// 最終判定・大模型判定で「敏感」を表すラベル
pub const SENSITIVE_LABEL: &str = "敏感";

/// 文本检测リクエスト
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextDetectRequest {
    pub text: String,
    pub fast_mode: bool,
    pub strict_mode: bool,
}

impl TextDetectRequest {
    /// fast_mode は常に false（サーバ側で廃止済み）
    pub fn new(text: impl Into<String>, strict_mode: bool) -> Self {
        Self {
            text: text.into(),
            fast_mode: false,
            strict_mode,
        }
    }
}

/// 規則エンジンの段階別用時（ミリ秒）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleTiming {
    pub preprocess_time: f64,
    pub ac_time: f64,
    pub dfa_time: f64,
    pub total_time: f64,
}

/// 規則エンジンの検出結果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleDetection {
    pub all_results: Vec<String>,
    pub word_count: Option<u64>,
    pub timing: Option<RuleTiming>,
    pub normalized_text: Option<String>,
}

/// 検出出力: 敏感词リスト or ラベル（"敏感"/"正常"）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Detected {
    Matches(Vec<String>),
    Label(String),
}

impl Detected {
    pub fn is_sensitive(&self) -> bool {
        match self {
            Detected::Matches(words) => !words.is_empty(),
            Detected::Label(label) => label == SENSITIVE_LABEL,
        }
    }
}

/// サーバ側の検出フロー
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionFlow {
    StrictMode,
    RuleOnly,
    RuleThenLlm,
    #[serde(other)]
    Unknown,
}

/// /detect/text, /detect/document の data 部分（生の形）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionData {
    pub original_text: Option<String>,
    pub filename: Option<String>,
    pub file_type: Option<String>,
    pub text_length: Option<u64>,
    pub rule_detection: Option<RuleDetection>,
    /// 旧版APIの互換フィールド
    pub rule_detected: Option<Vec<String>>,
    pub llm_detected: Option<Detected>,
    pub llm_time: Option<f64>,
    pub detection_flow: Option<DetectionFlow>,
    pub final_result: Option<String>,
}

/// 検出対象
#[derive(Debug, Clone, PartialEq)]
pub enum DetectionSource {
    Text {
        original_text: String,
    },
    Document {
        filename: String,
        file_type: String,
        text_length: u64,
    },
}

/// 規則エンジンの結果（新旧レスポンス形を統合）
#[derive(Debug, Clone, PartialEq)]
pub enum RuleOutcome {
    /// 严格模式: 規則エンジンを通していない
    Skipped,
    Engine(RuleDetection),
    Legacy(Vec<String>),
}

/// 大模型の結果
#[derive(Debug, Clone, PartialEq)]
pub enum ModelOutcome {
    /// llm_time が 0（規則段階で打ち切り）
    Skipped,
    Ran { detected: Detected, time_ms: f64 },
}

/// 最終判定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Sensitive,
    Normal,
}

impl Verdict {
    pub fn from_label(label: Option<&str>) -> Self {
        match label {
            Some(SENSITIVE_LABEL) => Verdict::Sensitive,
            _ => Verdict::Normal,
        }
    }
}

/// 表示用に解決済みの検出結果
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionResult {
    pub source: DetectionSource,
    pub rule: RuleOutcome,
    pub model: ModelOutcome,
    pub flow: DetectionFlow,
    pub verdict: Verdict,
    /// 規則エンジンが報告した敏感词数
    pub word_count: Option<u64>,
    /// 規則エンジンの計時（严格模式でも報告されていれば保持）
    pub rule_timing: Option<RuleTiming>,
}

impl DetectionResult {
    /// 生レスポンスをどの形か一度だけ判定して解決する
    pub fn resolve(data: DetectionData) -> Self {
        let flow = data.detection_flow.unwrap_or(DetectionFlow::Unknown);
        let word_count = data
            .rule_detection
            .as_ref()
            .and_then(|r| r.word_count)
            .filter(|&n| n > 0);
        let rule_timing = data.rule_detection.as_ref().and_then(|r| r.timing.clone());

        let rule = if flow == DetectionFlow::StrictMode {
            RuleOutcome::Skipped
        } else if let Some(detection) = data.rule_detection {
            RuleOutcome::Engine(detection)
        } else {
            RuleOutcome::Legacy(data.rule_detected.unwrap_or_default())
        };

        let model = match data.llm_time {
            Some(time_ms) if time_ms > 0.0 => ModelOutcome::Ran {
                detected: data
                    .llm_detected
                    .unwrap_or_else(|| Detected::Matches(Vec::new())),
                time_ms,
            },
            _ => ModelOutcome::Skipped,
        };

        let source = match data.filename {
            Some(filename) => DetectionSource::Document {
                filename,
                file_type: data.file_type.unwrap_or_default(),
                text_length: data.text_length.unwrap_or_default(),
            },
            None => DetectionSource::Text {
                original_text: data.original_text.unwrap_or_default(),
            },
        };

        Self {
            source,
            rule,
            model,
            flow,
            verdict: Verdict::from_label(data.final_result.as_deref()),
            word_count,
            rule_timing,
        }
    }

    /// 規則エンジンの合計用時
    ///
    /// 检测流程に関係なく rule_detection.timing.total_time を数える（無ければ 0）。
    pub fn rule_time_ms(&self) -> f64 {
        self.rule_timing.as_ref().map(|t| t.total_time).unwrap_or(0.0)
    }

    pub fn model_time_ms(&self) -> f64 {
        match &self.model {
            ModelOutcome::Ran { time_ms, .. } => *time_ms,
            ModelOutcome::Skipped => 0.0,
        }
    }

    pub fn total_time_ms(&self) -> f64 {
        self.rule_time_ms() + self.model_time_ms()
    }
}

/// 词库一覧の1件
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WordLibrary {
    pub name: String,
    pub word_count: u64,
    pub created_time: String,
    pub size: u64,
}

/// 词库の内容
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryContent {
    pub name: String,
    pub words: Vec<String>,
    pub word_count: Option<u64>,
}

/// /detection-libraries/status の data
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionStatus {
    pub used_libraries: Vec<String>,
    pub word_count: Option<u64>,
    pub last_updated: Option<String>,
}

/// /detection-libraries/update の data
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryUpdate {
    pub used_libraries: Vec<String>,
    pub word_count: Option<u64>,
}
