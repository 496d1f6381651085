//! タブ切り替えコンポーネント

use leptos::prelude::*;
use sensitive_detect_common::{ElementId, Tab};

use crate::app::Dispatch;
use crate::binding::SignalView;

fn tab_label(tab: Tab) -> &'static str {
    match tab {
        Tab::Text => "文本检测",
        Tab::Document => "文档检测",
        Tab::Libraries => "词库管理",
    }
}

#[component]
pub fn Tabs(ui: SignalView, dispatch: Dispatch) -> impl IntoView {
    view! {
        <nav class="tabs">
            {Tab::ALL
                .into_iter()
                .map(move |tab| {
                    let id = ElementId::tab(tab);
                    view! {
                        <button
                            id=id.dom_id()
                            class=move || ui.class_names("tab-btn", id)
                            on:click=move |_| dispatch.click(id)
                        >
                            {tab_label(tab)}
                        </button>
                    }
                })
                .collect_view()}
        </nav>
    }
}
