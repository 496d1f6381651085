//! 文档检测パネル（アップロード欄とドラッグ&ドロップ）

use leptos::html::Input;
use leptos::prelude::*;
use sensitive_detect_common::ElementId;
use web_sys::{DragEvent, Event, MouseEvent};

use crate::app::{selected_file, Dispatch};
use crate::binding::SignalView;
use crate::components::result_view::{ResultLine, StatusTagView, TimingView};

/// ファイル選択ダイアログで絞り込む拡張子
const ACCEPT: &str = ".txt,.pdf,.docx,.doc,.jpg,.jpeg,.png,.bmp,.gif,.tiff";

#[component]
pub fn DocumentPanel(ui: SignalView, dispatch: Dispatch) -> impl IntoView {
    let panel = ElementId::PanelDocument;
    let file_input = NodeRef::<Input>::new();

    let open_dialog = move |_: MouseEvent| {
        if let Some(input) = file_input.get() {
            input.click();
        }
    };

    let on_change = move |_: Event| {
        let Some(input) = file_input.get() else {
            return;
        };
        let file = input.files().and_then(|files| files.get(0));
        // 同じファイルを続けて選んでも change が届くように空にする
        input.set_value("");
        if let Some(file) = file {
            dispatch.with_page(move |page| page.select_file(selected_file(file)));
        }
    };

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        dispatch.with_page(|page| page.drag_over());
    };

    let on_dragleave = move |_: DragEvent| {
        dispatch.with_page(|page| page.drag_leave());
    };

    let on_drop = move |ev: DragEvent| {
        ev.prevent_default();
        let file = ev
            .data_transfer()
            .and_then(|dt| dt.files())
            .and_then(|files| files.get(0));
        dispatch.with_page(move |page| page.drop_file(file.map(selected_file)));
    };

    view! {
        <section
            id=panel.dom_id()
            class=move || ui.class_names("panel", panel)
            hidden=move || !ui.shown(panel)
        >
            <input
                type="file"
                id=ElementId::FileInput.dom_id()
                style="display: none"
                accept=ACCEPT
                node_ref=file_input
                on:change=on_change
            />

            <Show when=move || ui.shown(ElementId::UploadArea)>
                <div
                    id=ElementId::UploadArea.dom_id()
                    class=move || ui.class_names("upload-area", ElementId::UploadArea)
                    on:click=open_dialog
                    on:dragover=on_dragover
                    on:dragleave=on_dragleave
                    on:drop=on_drop
                >
                    <div class="upload-icon">"📄"</div>
                    <p>"拖拽文件到此处，或"</p>
                    <button id=ElementId::SelectFileButton.dom_id() class="btn btn-secondary">
                        "选择文件"
                    </button>
                    <p class="text-muted">"支持 TXT、PDF、DOCX、DOC、图片格式（OCR），最大 10MB"</p>
                </div>
            </Show>

            <Show when=move || ui.shown(ElementId::FileInfo)>
                <div id=ElementId::FileInfo.dom_id() class="file-info">
                    <span id=ElementId::FileName.dom_id()>{move || ui.text_of(ElementId::FileName)}</span>
                    " ("
                    <span id=ElementId::FileSize.dom_id()>{move || ui.text_of(ElementId::FileSize)}</span>
                    ")"
                    <button
                        id=ElementId::DetectDocumentButton.dom_id()
                        class="btn btn-primary"
                        on:click=move |_| dispatch.click(ElementId::DetectDocumentButton)
                    >
                        "开始检测"
                    </button>
                    <button
                        id=ElementId::ResetDocumentButton.dom_id()
                        class="btn btn-secondary"
                        on:click=move |_| dispatch.click(ElementId::ResetDocumentButton)
                    >
                        "重新选择"
                    </button>
                </div>
            </Show>

            <Show when=move || ui.shown(ElementId::DocumentResult)>
                <div id=ElementId::DocumentResult.dom_id() class="result-section">
                    <h3>"检测结果"</h3>
                    <ResultLine label="文件名：" ui=ui id=ElementId::DocFilename />
                    <ResultLine label="文件类型：" ui=ui id=ElementId::DocFileType />
                    <ResultLine label="文本长度：" ui=ui id=ElementId::DocTextLength />
                    <p>"规则匹配：" <StatusTagView ui=ui id=ElementId::DocRuleDetected /></p>
                    <p>"大模型检测：" <StatusTagView ui=ui id=ElementId::DocLlmDetected /></p>
                    <TimingView ui=ui id=ElementId::DocDetectionTiming />
                    <p>"最终结果：" <StatusTagView ui=ui id=ElementId::DocFinalResult /></p>
                </div>
            </Show>
        </section>
    }
}
