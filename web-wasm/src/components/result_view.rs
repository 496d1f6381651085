//! 検出結果の部品（文本/文档で共通）

use leptos::prelude::*;
use sensitive_detect_common::format::{TimingPanel, TimingSection};
use sensitive_detect_common::ElementId;

use crate::binding::SignalView;

/// ステータスタグ
#[component]
pub fn StatusTagView(ui: SignalView, id: ElementId) -> impl IntoView {
    view! {
        <span id=id.dom_id()>
            {move || {
                ui.tag(id).map(|tag| {
                    view! {
                        <span class=format!("status-tag {}", tag.kind.css_class())>{tag.text}</span>
                    }
                })
            }}
        </span>
    }
}

fn timing_section(section: TimingSection) -> impl IntoView {
    let class = if section.overall { "timing-section timing-overall" } else { "timing-section" };
    view! {
        <div class=class>
            <h4 class="timing-title">{section.title}</h4>
            {section
                .items
                .into_iter()
                .map(|item| view! { <div class="timing-item">{item}</div> })
                .collect_view()}
            <div class="timing-total">{section.total}</div>
        </div>
    }
}

/// 用時パネル
#[component]
pub fn TimingView(ui: SignalView, id: ElementId) -> impl IntoView {
    view! {
        <div id=id.dom_id() class="detection-timing">
            {move || {
                ui.timing(id).map(|TimingPanel { sections, strict_notice }| {
                    view! {
                        {sections.into_iter().map(timing_section).collect_view()}
                        {strict_notice.map(|notice| view! { <div class="strict-mode-notice">{notice}</div> })}
                    }
                })
            }}
        </div>
    }
}

/// 「ラベル：値」の1行
#[component]
pub fn ResultLine(label: &'static str, ui: SignalView, id: ElementId) -> impl IntoView {
    view! {
        <p>
            {label}
            <span id=id.dom_id()>{move || ui.text_of(id)}</span>
        </p>
    }
}
