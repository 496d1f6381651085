//! 表示文言の整形
//!
//! DOMにもターミナルにも依存しない純粋関数のみ。

use crate::types::{Detected, DetectionFlow, DetectionResult, ModelOutcome, RuleOutcome, Verdict, WordLibrary};

const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// ステータスタグの種類（CSSクラス status-* に対応）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    Sensitive,
    Normal,
    Skipped,
}

impl TagKind {
    pub fn css_class(&self) -> &'static str {
        match self {
            TagKind::Sensitive => "status-sensitive",
            TagKind::Normal => "status-normal",
            TagKind::Skipped => "status-skipped",
        }
    }
}

/// ステータスタグ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusTag {
    pub kind: TagKind,
    pub text: String,
}

impl StatusTag {
    pub fn new(kind: TagKind, text: impl Into<String>) -> Self {
        Self { kind, text: text.into() }
    }

    pub fn skipped() -> Self {
        Self::new(TagKind::Skipped, "跳过")
    }
}

/// 用時パネルの1セクション
#[derive(Debug, Clone, PartialEq)]
pub struct TimingSection {
    pub title: String,
    pub items: Vec<String>,
    pub total: String,
    pub overall: bool,
}

/// 用時パネル
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TimingPanel {
    pub sections: Vec<TimingSection>,
    pub strict_notice: Option<String>,
}

/// ファイルサイズを人間向けに整形
///
/// 小数点以下2桁に丸め、末尾の0は落とす。
///
/// # Examples
/// ```
/// use sensitive_detect_common::format_file_size;
///
/// assert_eq!(format_file_size(0), "0 Bytes");
/// assert_eq!(format_file_size(1536), "1.5 KB");
/// ```
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let k = 1024f64;
    let value = bytes as f64;
    let index = ((value.ln() / k.ln()).floor() as usize).min(SIZE_UNITS.len() - 1);
    let scaled = value / k.powi(index as i32);

    format!("{} {}", trim_decimal(&format!("{:.2}", scaled)), SIZE_UNITS[index])
}

fn trim_decimal(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

/// 検出出力をタグに
pub fn format_detected(detected: &Detected) -> StatusTag {
    match detected {
        Detected::Matches(words) if !words.is_empty() => StatusTag::new(
            TagKind::Sensitive,
            format!("检测到 {} 个敏感词: {}", words.len(), words.join(", ")),
        ),
        Detected::Label(_) if detected.is_sensitive() => StatusTag::new(TagKind::Sensitive, "敏感"),
        _ => StatusTag::new(TagKind::Normal, "正常"),
    }
}

pub fn format_matches(words: &[String]) -> StatusTag {
    format_detected(&Detected::Matches(words.to_vec()))
}

pub fn format_verdict(verdict: Verdict) -> StatusTag {
    match verdict {
        Verdict::Sensitive => StatusTag::new(TagKind::Sensitive, "敏感"),
        Verdict::Normal => StatusTag::new(TagKind::Normal, "正常"),
    }
}

pub fn format_rule_outcome(rule: &RuleOutcome) -> StatusTag {
    match rule {
        RuleOutcome::Skipped => StatusTag::skipped(),
        RuleOutcome::Engine(detection) => format_matches(&detection.all_results),
        RuleOutcome::Legacy(words) => format_matches(words),
    }
}

pub fn format_model_outcome(model: &ModelOutcome) -> StatusTag {
    match model {
        ModelOutcome::Skipped => StatusTag::skipped(),
        ModelOutcome::Ran { detected, .. } => format_detected(detected),
    }
}

/// ミリ秒表記（整数値は小数点なし）
pub fn format_ms(ms: f64) -> String {
    format!("{}ms", ms)
}

/// 用時パネルを組み立てる
pub fn timing_panel(result: &DetectionResult) -> TimingPanel {
    let mut sections = Vec::new();

    match &result.rule {
        RuleOutcome::Skipped => sections.push(TimingSection {
            title: "规则引擎检测".into(),
            items: Vec::new(),
            total: "跳过 (严格模式)".into(),
            overall: false,
        }),
        RuleOutcome::Engine(detection) => {
            if let Some(timing) = &detection.timing {
                sections.push(TimingSection {
                    title: "规则引擎检测".into(),
                    items: vec![
                        format!("预处理: {}", format_ms(timing.preprocess_time)),
                        format!("AC: {}", format_ms(timing.ac_time)),
                        format!("DFA: {}", format_ms(timing.dfa_time)),
                    ],
                    total: format!("总计: {}", format_ms(timing.total_time)),
                    overall: false,
                });
            }
        }
        RuleOutcome::Legacy(_) => {}
    }

    let model_total = match &result.model {
        ModelOutcome::Ran { time_ms, .. } => format_ms(*time_ms),
        ModelOutcome::Skipped => "跳过 (规则匹配无敏感词)".to_string(),
    };
    sections.push(TimingSection {
        title: "大模型检测".into(),
        items: Vec::new(),
        total: model_total,
        overall: false,
    });

    sections.push(TimingSection {
        title: "总用时".into(),
        items: Vec::new(),
        total: format!("{:.2}ms", result.total_time_ms()),
        overall: true,
    });

    let strict_notice = (result.flow == DetectionFlow::StrictMode)
        .then(|| "🔒 严格模式：跳过规则匹配，直接使用大模型检测".to_string());

    TimingPanel { sections, strict_notice }
}

/// 「使用的词库」欄: 词库名 + 敏感词数
pub fn used_libraries_text(active: &[String], word_count: Option<u64>) -> String {
    let names = if active.is_empty() {
        "默认词库".to_string()
    } else {
        active.join(", ")
    };
    match word_count {
        Some(count) if count > 0 => format!("{} ({} 个敏感词)", names, count),
        _ => names,
    }
}

pub fn char_count_text(count: usize) -> String {
    format!("{} 字符", count)
}

pub fn word_count_text(count: usize) -> String {
    format!("{} 个敏感词", count)
}

/// ローカルの選択数（未同期）
pub fn active_count_text(count: usize) -> String {
    if count == 0 {
        "当前使用 0 个词库".to_string()
    } else {
        format!("已选择 {} 个词库", count)
    }
}

/// 同期成功後の選択数 + サーバ側の敏感词数
pub fn synced_count_text(count: usize, word_count: u64) -> String {
    format!("当前使用 {} 个词库 ({} 个敏感词)", count, word_count)
}

/// サーバ側で有効な词库のステータス表示（文言, CSSクラス）
pub fn status_indicator(count: usize) -> (String, &'static str) {
    if count == 0 {
        ("使用默认词库".to_string(), "status-default")
    } else {
        (format!("使用 {} 个自定义词库", count), "status-custom")
    }
}

/// 作成日時（ISO 8601）を日付だけにする
pub fn format_created_date(created_time: &str) -> String {
    let parsed = chrono::NaiveDateTime::parse_from_str(created_time, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|dt| dt.date())
        .or_else(|_| chrono::NaiveDate::parse_from_str(created_time, "%Y-%m-%d"));

    match parsed {
        Ok(date) => date.format("%Y/%-m/%-d").to_string(),
        Err(_) => created_time.to_string(),
    }
}

/// 词库一覧の詳細行
pub fn library_details(library: &WordLibrary) -> String {
    format!(
        "敏感词数量: {} | 创建时间: {} | 文件大小: {:.1} KB",
        library.word_count,
        format_created_date(&library.created_time),
        library.size as f64 / 1024.0
    )
}

/// 最終更新時刻
pub fn format_update_time(time: chrono::DateTime<chrono::Local>) -> String {
    time.format("%Y/%-m/%-d %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DetectionData, DetectionResult, RuleDetection, RuleTiming};

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(1), "1 Bytes");
        assert_eq!(format_file_size(1023), "1023 Bytes");
        assert_eq!(format_file_size(1024), "1 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(10 * 1024 * 1024), "10 MB");
        assert_eq!(format_file_size(1_234_567), "1.18 MB");
        assert_eq!(format_file_size(5 * 1024 * 1024 * 1024 * 1024), "5120 GB");
    }

    #[test]
    fn test_format_detected() {
        let tag = format_detected(&Detected::Matches(vec!["赌博".into(), "色情".into()]));
        assert_eq!(tag.kind, TagKind::Sensitive);
        assert_eq!(tag.text, "检测到 2 个敏感词: 赌博, 色情");

        assert_eq!(format_detected(&Detected::Label("敏感".into())).text, "敏感");
        assert_eq!(format_detected(&Detected::Label("正常".into())).kind, TagKind::Normal);
        assert_eq!(format_detected(&Detected::Matches(vec![])).text, "正常");
    }

    #[test]
    fn test_format_verdict() {
        assert_eq!(format_verdict(Verdict::Sensitive).kind, TagKind::Sensitive);
        assert_eq!(format_verdict(Verdict::Normal).text, "正常");
    }

    fn engine_result(llm_time: f64) -> DetectionResult {
        DetectionResult::resolve(DetectionData {
            original_text: Some("x".into()),
            rule_detection: Some(RuleDetection {
                all_results: vec!["a".into()],
                word_count: Some(10),
                timing: Some(RuleTiming {
                    preprocess_time: 0.0,
                    ac_time: 1.25,
                    dfa_time: 0.5,
                    total_time: 1.75,
                }),
                normalized_text: None,
            }),
            llm_detected: Some(Detected::Label("敏感".into())),
            llm_time: Some(llm_time),
            detection_flow: Some(DetectionFlow::RuleThenLlm),
            final_result: Some("敏感".into()),
            ..Default::default()
        })
    }

    #[test]
    fn test_timing_panel_with_model() {
        let panel = timing_panel(&engine_result(150.0));
        assert_eq!(panel.sections.len(), 3);
        assert_eq!(panel.sections[0].items, vec!["预处理: 0ms", "AC: 1.25ms", "DFA: 0.5ms"]);
        assert_eq!(panel.sections[0].total, "总计: 1.75ms");
        assert_eq!(panel.sections[1].total, "150ms");
        assert_eq!(panel.sections[2].total, "151.75ms");
        assert!(panel.sections[2].overall);
        assert!(panel.strict_notice.is_none());
    }

    #[test]
    fn test_timing_panel_model_skipped() {
        let panel = timing_panel(&engine_result(0.0));
        assert_eq!(panel.sections[1].total, "跳过 (规则匹配无敏感词)");
        assert_eq!(panel.sections[2].total, "1.75ms");
    }

    #[test]
    fn test_timing_panel_strict_mode() {
        let result = DetectionResult::resolve(DetectionData {
            llm_detected: Some(Detected::Label("正常".into())),
            llm_time: Some(42.5),
            detection_flow: Some(DetectionFlow::StrictMode),
            ..Default::default()
        });
        let panel = timing_panel(&result);
        assert_eq!(panel.sections[0].total, "跳过 (严格模式)");
        assert_eq!(panel.sections[2].total, "42.50ms");
        assert!(panel.strict_notice.is_some());
    }

    #[test]
    fn test_used_libraries_text() {
        assert_eq!(used_libraries_text(&[], None), "默认词库");
        assert_eq!(used_libraries_text(&[], Some(0)), "默认词库");
        assert_eq!(
            used_libraries_text(&["政治".into(), "广告".into()], Some(42)),
            "政治, 广告 (42 个敏感词)"
        );
    }

    #[test]
    fn test_counts_and_indicator() {
        assert_eq!(active_count_text(0), "当前使用 0 个词库");
        assert_eq!(active_count_text(2), "已选择 2 个词库");
        assert_eq!(synced_count_text(3, 42), "当前使用 3 个词库 (42 个敏感词)");
        assert_eq!(status_indicator(0), ("使用默认词库".to_string(), "status-default"));
        assert_eq!(status_indicator(3), ("使用 3 个自定义词库".to_string(), "status-custom"));
    }

    #[test]
    fn test_library_details() {
        let library = WordLibrary {
            name: "政治".into(),
            word_count: 42,
            created_time: "2024-03-01T10:20:30.123456".into(),
            size: 1536,
        };
        assert_eq!(library_details(&library), "敏感词数量: 42 | 创建时间: 2024/3/1 | 文件大小: 1.5 KB");
    }

    #[test]
    fn test_format_created_date_fallback() {
        assert_eq!(format_created_date("2024-12-25"), "2024/12/25");
        assert_eq!(format_created_date("yesterday"), "yesterday");
    }
}
