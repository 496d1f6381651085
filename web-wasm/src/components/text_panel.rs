//! 文本检测パネル

use leptos::prelude::*;
use sensitive_detect_common::{ElementId, UiEvent, ViewBinding};

use crate::app::Dispatch;
use crate::binding::SignalView;
use crate::components::result_view::{ResultLine, StatusTagView, TimingView};

#[component]
pub fn TextPanel(ui: SignalView, dispatch: Dispatch) -> impl IntoView {
    let panel = ElementId::PanelText;

    view! {
        <section
            id=panel.dom_id()
            class=move || ui.class_names("panel", panel)
            hidden=move || !ui.shown(panel)
        >
            <textarea
                id=ElementId::TextInput.dom_id()
                placeholder="请输入需要检测的文本内容（Ctrl+Enter 快速检测）"
                prop:value=move || ui.text_of(ElementId::TextInput)
                on:input=move |ev| {
                    ui.set_text(ElementId::TextInput, &event_target_value(&ev));
                    dispatch.send(UiEvent::TextChanged);
                }
            />
            <div>
                <span id=ElementId::CharCount.dom_id()>{move || ui.text_of(ElementId::CharCount)}</span>
            </div>
            <label>
                <input
                    type="checkbox"
                    id=ElementId::StrictModeCheckbox.dom_id()
                    prop:checked=move || ui.checked(ElementId::StrictModeCheckbox)
                    on:change=move |ev| {
                        ui.set_checked(ElementId::StrictModeCheckbox, event_target_checked(&ev));
                    }
                />
                " 严格模式（跳过规则匹配，直接使用大模型）"
            </label>
            <button
                id=ElementId::DetectTextButton.dom_id()
                class="btn btn-primary"
                on:click=move |_| dispatch.click(ElementId::DetectTextButton)
            >
                "开始检测"
            </button>

            <Show when=move || ui.shown(ElementId::TextResult)>
                <div id=ElementId::TextResult.dom_id() class="result-section">
                    <h3>"检测结果"</h3>
                    <ResultLine label="原始文本：" ui=ui id=ElementId::OriginalText />
                    <ResultLine label="使用的词库：" ui=ui id=ElementId::UsedLibraries />
                    <p>"规则匹配：" <StatusTagView ui=ui id=ElementId::RuleDetected /></p>
                    <p>"大模型检测：" <StatusTagView ui=ui id=ElementId::LlmDetected /></p>
                    <TimingView ui=ui id=ElementId::DetectionTiming />
                    <p>"最终结果：" <StatusTagView ui=ui id=ElementId::FinalResult /></p>
                </div>
            </Show>
        </section>
    }
}
