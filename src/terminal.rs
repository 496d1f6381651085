//! ターミナル版の画面バインディング
//!
//! 要素の内容はメモリに保持し、結果セクションが表示された時点で標準出力に書き出す。
//! ローディングは indicatif のスピナー、確認は dialoguer で行う。

use dialoguer::Confirm;
use indicatif::{ProgressBar, ProgressStyle};
use sensitive_detect_common::format::{StatusTag, TagKind, TimingPanel};
use sensitive_detect_common::view::{ActiveItem, LibraryRow};
use sensitive_detect_common::{ElementId, Notice, NoticeLevel, UiEvent, ViewBinding};
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write as _;
use std::time::Duration;

/// 結果セクションの見出しと項目
const TEXT_FIELDS: &[(&str, ElementId)] = &[
    ("原始文本", ElementId::OriginalText),
    ("使用的词库", ElementId::UsedLibraries),
];
const DOCUMENT_FIELDS: &[(&str, ElementId)] = &[
    ("文件名", ElementId::DocFilename),
    ("文件类型", ElementId::DocFileType),
    ("文本长度", ElementId::DocTextLength),
];

fn tag_mark(tag: &StatusTag) -> &'static str {
    match tag.kind {
        TagKind::Sensitive => "⚠",
        TagKind::Normal => "✔",
        TagKind::Skipped => "-",
    }
}

#[derive(Default)]
pub struct TerminalView {
    texts: RefCell<BTreeMap<ElementId, String>>,
    visible: RefCell<BTreeSet<ElementId>>,
    checked: RefCell<BTreeSet<ElementId>>,
    disabled: RefCell<BTreeSet<ElementId>>,
    tags: RefCell<BTreeMap<ElementId, StatusTag>>,
    timings: RefCell<BTreeMap<ElementId, TimingPanel>>,
    rows: RefCell<Vec<LibraryRow>>,
    active: RefCell<Vec<ActiveItem>>,
    notices: RefCell<Vec<Notice>>,
    spinner: RefCell<Option<ProgressBar>>,
    assume_yes: bool,
}

impl TerminalView {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes, ..Default::default() }
    }

    /// チェックボックスの状態を設定（--strict など）
    pub fn set_checked(&self, id: ElementId, checked: bool) {
        if checked {
            self.checked.borrow_mut().insert(id);
        } else {
            self.checked.borrow_mut().remove(&id);
        }
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.borrow().clone()
    }

    pub fn rows(&self) -> Vec<LibraryRow> {
        self.rows.borrow().clone()
    }

    fn get(&self, id: ElementId) -> String {
        self.texts.borrow().get(&id).cloned().unwrap_or_default()
    }

    fn tag_line(&self, id: ElementId) -> String {
        match self.tags.borrow().get(&id) {
            Some(tag) => format!("{} {}", tag_mark(tag), tag.text),
            None => "-".to_string(),
        }
    }

    fn timing_lines(&self, id: ElementId, out: &mut String) {
        let timings = self.timings.borrow();
        let Some(panel) = timings.get(&id) else {
            return;
        };
        let _ = writeln!(out, "  用时:");
        for section in &panel.sections {
            if section.items.is_empty() {
                let _ = writeln!(out, "    {}: {}", section.title, section.total);
            } else {
                let _ = writeln!(out, "    {}: {} ({})", section.title, section.total, section.items.join(" | "));
            }
        }
        if let Some(notice) = &panel.strict_notice {
            let _ = writeln!(out, "  {}", notice);
        }
    }

    /// 検出結果セクションの表示内容
    pub fn result_report(&self, section: ElementId) -> String {
        let (fields, rule, llm, timing, verdict) = match section {
            ElementId::DocumentResult => (
                DOCUMENT_FIELDS,
                ElementId::DocRuleDetected,
                ElementId::DocLlmDetected,
                ElementId::DocDetectionTiming,
                ElementId::DocFinalResult,
            ),
            _ => (
                TEXT_FIELDS,
                ElementId::RuleDetected,
                ElementId::LlmDetected,
                ElementId::DetectionTiming,
                ElementId::FinalResult,
            ),
        };

        let mut out = String::from("检测结果\n");
        for (label, id) in fields {
            let _ = writeln!(out, "  {}: {}", label, self.get(*id));
        }
        let _ = writeln!(out, "  规则匹配: {}", self.tag_line(rule));
        let _ = writeln!(out, "  大模型检测: {}", self.tag_line(llm));
        self.timing_lines(timing, &mut out);
        let _ = write!(out, "  最终结果: {}", self.tag_line(verdict));
        out
    }

    /// 词库一覧（● は使用中）
    pub fn library_table(&self) -> String {
        let rows = self.rows.borrow();
        if rows.is_empty() {
            return "暂无词库".to_string();
        }
        let mut out = String::new();
        for row in rows.iter() {
            let mark = if row.active { "●" } else { "○" };
            let _ = writeln!(out, "{} {}", mark, row.name);
            let _ = writeln!(out, "    {}", row.details);
        }
        out.trim_end().to_string()
    }

    /// 使用词库の状態
    pub fn active_report(&self) -> String {
        let mut out = String::new();
        let status = self.get(ElementId::CurrentLibraryStatus);
        if !status.is_empty() {
            let _ = writeln!(out, "{}  (最后更新: {})", status, self.get(ElementId::LastUpdateTime));
        }
        let _ = writeln!(out, "{}", self.get(ElementId::UsedLibrariesCount));
        for item in self.active.borrow().iter() {
            let _ = writeln!(out, "  - {}", item.name);
        }
        out.trim_end().to_string()
    }

    /// エディタに読み込まれた词库の内容
    pub fn editor_report(&self) -> String {
        format!(
            "{} ({})\n{}",
            self.get(ElementId::LibraryNameInput),
            self.get(ElementId::WordCount),
            self.get(ElementId::LibraryWordsInput)
        )
    }

    /// スピナー表示中は一時停止して出力
    fn print(&self, output: impl FnOnce()) {
        match self.spinner.borrow().as_ref() {
            Some(spinner) => spinner.suspend(output),
            None => output(),
        }
    }

    fn start_spinner(&self) {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message("处理中...");
        spinner.enable_steady_tick(Duration::from_millis(100));
        *self.spinner.borrow_mut() = Some(spinner);
    }

    fn stop_spinner(&self) {
        if let Some(spinner) = self.spinner.borrow_mut().take() {
            spinner.finish_and_clear();
        }
    }
}

impl ViewBinding for TerminalView {
    fn text(&self, id: ElementId) -> String {
        self.get(id)
    }

    fn set_text(&self, id: ElementId, text: &str) {
        self.texts.borrow_mut().insert(id, text.to_string());
    }

    fn is_visible(&self, id: ElementId) -> bool {
        self.visible.borrow().contains(&id)
    }

    fn set_visible(&self, id: ElementId, visible: bool) {
        if id == ElementId::LoadingOverlay {
            if visible {
                self.start_spinner();
            } else {
                self.stop_spinner();
            }
        }

        if visible {
            self.visible.borrow_mut().insert(id);
        } else {
            self.visible.borrow_mut().remove(&id);
        }

        if visible && matches!(id, ElementId::TextResult | ElementId::DocumentResult) {
            let report = self.result_report(id);
            self.print(|| println!("{}", report));
        }
    }

    fn is_checked(&self, id: ElementId) -> bool {
        self.checked.borrow().contains(&id)
    }

    fn set_enabled(&self, id: ElementId, enabled: bool) {
        if enabled {
            self.disabled.borrow_mut().remove(&id);
        } else {
            self.disabled.borrow_mut().insert(id);
        }
    }

    fn set_class(&self, _id: ElementId, _class: &str, _on: bool) {}

    fn set_tag(&self, id: ElementId, tag: &StatusTag) {
        self.tags.borrow_mut().insert(id, tag.clone());
    }

    fn set_timing(&self, id: ElementId, panel: &TimingPanel) {
        self.timings.borrow_mut().insert(id, panel.clone());
    }

    fn render_library_rows(&self, rows: &[LibraryRow]) {
        *self.rows.borrow_mut() = rows.to_vec();
    }

    fn render_active_items(&self, items: &[ActiveItem]) {
        *self.active.borrow_mut() = items.to_vec();
    }

    fn bind(&self, id: ElementId, event: UiEvent) {
        // CLI はサブコマンドから操作を直接呼ぶ
        tracing::trace!(?id, ?event, "bind ignored");
    }

    fn notify(&self, notice: &Notice) {
        let line = match notice.level {
            NoticeLevel::Success => format!("✔ {}", notice.message),
            NoticeLevel::Error => format!("✖ {}", notice.message),
            NoticeLevel::Info => format!("ℹ {}", notice.message),
        };
        self.print(|| eprintln!("{}", line));
        self.notices.borrow_mut().push(notice.clone());
    }

    fn confirm(&self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        Confirm::new()
            .with_prompt(message)
            .default(false)
            .interact()
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sensitive_detect_common::format::TimingSection;

    #[test]
    fn test_result_report_text() {
        let view = TerminalView::new(false);
        view.set_text(ElementId::OriginalText, "测试");
        view.set_text(ElementId::UsedLibraries, "默认词库");
        view.set_tag(ElementId::RuleDetected, &StatusTag::new(TagKind::Sensitive, "检测到 1 个敏感词: 赌博"));
        view.set_tag(ElementId::LlmDetected, &StatusTag::skipped());
        view.set_tag(ElementId::FinalResult, &StatusTag::new(TagKind::Sensitive, "敏感"));
        view.set_timing(
            ElementId::DetectionTiming,
            &TimingPanel {
                sections: vec![TimingSection {
                    title: "总用时".into(),
                    items: Vec::new(),
                    total: "2.00ms".into(),
                    overall: true,
                }],
                strict_notice: None,
            },
        );

        let report = view.result_report(ElementId::TextResult);
        assert!(report.contains("原始文本: 测试"));
        assert!(report.contains("规则匹配: ⚠ 检测到 1 个敏感词: 赌博"));
        assert!(report.contains("大模型检测: - 跳过"));
        assert!(report.contains("总用时: 2.00ms"));
        assert!(report.ends_with("最终结果: ⚠ 敏感"));
    }

    #[test]
    fn test_result_report_document_fields() {
        let view = TerminalView::new(false);
        view.set_text(ElementId::DocFileType, "PDF");
        let report = view.result_report(ElementId::DocumentResult);
        assert!(report.contains("文件类型: PDF"));
        assert!(!report.contains("原始文本"));
    }

    #[test]
    fn test_library_table() {
        let view = TerminalView::new(false);
        assert_eq!(view.library_table(), "暂无词库");

        view.render_library_rows(&[LibraryRow {
            name: "政治".into(),
            details: "敏感词数量: 3".into(),
            active: true,
            add_label: "已添加".into(),
            add: UiEvent::AddToActive("政治".into()),
            edit: UiEvent::EditLibrary("政治".into()),
            delete: UiEvent::DeleteLibrary("政治".into()),
        }]);
        assert_eq!(view.library_table(), "● 政治\n    敏感词数量: 3");
    }

    #[test]
    fn test_assume_yes_confirms() {
        assert!(TerminalView::new(true).confirm("确定要删除词库 \"a\" 吗？"));
    }

    #[test]
    fn test_notices_recorded() {
        let view = TerminalView::new(false);
        view.notify(&Notice::error("x"));
        assert_eq!(view.notices(), vec![Notice::error("x")]);
    }
}
