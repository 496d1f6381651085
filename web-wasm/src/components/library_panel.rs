//! 词库管理パネル
//!
//! 使用中の词库、全词库の一覧、エディタの3つで構成する。

use leptos::prelude::*;
use sensitive_detect_common::view::{ActiveItem, LibraryRow};
use sensitive_detect_common::{ElementId, UiEvent, ViewBinding};

use crate::app::Dispatch;
use crate::binding::SignalView;

#[component]
pub fn LibraryPanel(ui: SignalView, dispatch: Dispatch) -> impl IntoView {
    let panel = ElementId::PanelLibraries;
    let status = ElementId::CurrentLibraryStatus;
    let update = ElementId::UpdateDetectionButton;

    view! {
        <section
            id=panel.dom_id()
            class=move || ui.class_names("panel", panel)
            hidden=move || !ui.shown(panel)
        >
            <div class="library-status">
                <span id=status.dom_id() class=move || ui.class_names("", status)>
                    {move || ui.text_of(status)}
                </span>
                <small>
                    "最后更新："
                    <span id=ElementId::LastUpdateTime.dom_id()>
                        {move || ui.text_of(ElementId::LastUpdateTime)}
                    </span>
                </small>
            </div>

            <h3>
                "使用中的词库 "
                <small id=ElementId::UsedLibrariesCount.dom_id()>
                    {move || ui.text_of(ElementId::UsedLibrariesCount)}
                </small>
            </h3>
            <ActiveList ui=ui dispatch=dispatch />
            <button
                id=update.dom_id()
                class="btn btn-primary"
                prop:disabled=move || ui.disabled(update)
                on:click=move |_| dispatch.click(update)
            >
                {move || ui.text_of(update)}
            </button>

            <h3>"全部词库"</h3>
            <button
                id=ElementId::CreateLibraryButton.dom_id()
                class="btn btn-success"
                on:click=move |_| dispatch.click(ElementId::CreateLibraryButton)
            >
                "创建词库"
            </button>
            <LibraryTable ui=ui dispatch=dispatch />
            <LibraryEditor ui=ui dispatch=dispatch />
        </section>
    }
}

/// 使用词库リスト
#[component]
fn ActiveList(ui: SignalView, dispatch: Dispatch) -> impl IntoView {
    view! {
        <div id=ElementId::UsedLibrariesList.dom_id()>
            <Show
                when=move || ui.has_active()
                fallback=|| view! { <div class="empty-state">"暂无使用的词库，将使用默认词库"</div> }
            >
                <For
                    each=move || ui.active_items()
                    key=|item: &ActiveItem| item.name.clone()
                    children=move |item: ActiveItem| {
                        let ActiveItem { name, remove } = item;
                        view! {
                            <div class="used-library-item">
                                <span class="used-library-name">{name}</span>
                                <button
                                    class="btn btn-danger btn-sm"
                                    on:click=move |_| dispatch.send(remove.clone())
                                >
                                    "移除"
                                </button>
                            </div>
                        }
                    }
                />
            </Show>
        </div>
    }
}

/// 词库一覧
#[component]
fn LibraryTable(ui: SignalView, dispatch: Dispatch) -> impl IntoView {
    view! {
        <div id=ElementId::LibrariesTable.dom_id()>
            <Show
                when=move || ui.has_rows()
                fallback=|| view! { <div class="empty-state">"暂无词库，点击上方按钮创建新词库"</div> }
            >
                <For
                    each=move || ui.rows()
                    // 選択状態や件数が変わった行は作り直す
                    key=|row: &LibraryRow| (row.name.clone(), row.active, row.details.clone())
                    children=move |row: LibraryRow| view! { <LibraryRowView row=row dispatch=dispatch /> }
                />
            </Show>
        </div>
    }
}

#[component]
fn LibraryRowView(row: LibraryRow, dispatch: Dispatch) -> impl IntoView {
    let LibraryRow { name, details, active, add_label, add, edit, delete } = row;

    view! {
        <div class="library-item">
            <div class="library-info">
                <div class="library-name">{name}</div>
                <div class="library-details">{details}</div>
            </div>
            <div class="library-actions">
                <button
                    class="btn btn-success btn-sm"
                    disabled=active
                    on:click=move |_| dispatch.send(add.clone())
                >
                    {add_label}
                </button>
                <button class="btn btn-secondary btn-sm" on:click=move |_| dispatch.send(edit.clone())>
                    "编辑"
                </button>
                <button class="btn btn-danger btn-sm" on:click=move |_| dispatch.send(delete.clone())>
                    "删除"
                </button>
            </div>
        </div>
    }
}

/// 词库エディタ（作成・編集）
#[component]
fn LibraryEditor(ui: SignalView, dispatch: Dispatch) -> impl IntoView {
    let name = ElementId::LibraryNameInput;
    let words = ElementId::LibraryWordsInput;

    view! {
        <Show when=move || ui.shown(ElementId::LibraryEditor)>
            <div id=ElementId::LibraryEditor.dom_id() class="library-editor">
                <h3 id=ElementId::EditorTitle.dom_id()>{move || ui.text_of(ElementId::EditorTitle)}</h3>
                <input
                    type="text"
                    id=name.dom_id()
                    placeholder="词库名称"
                    prop:value=move || ui.text_of(name)
                    prop:disabled=move || ui.disabled(name)
                    on:input=move |ev| ui.set_text(name, &event_target_value(&ev))
                />
                <textarea
                    id=words.dom_id()
                    placeholder="每行一个敏感词"
                    prop:value=move || ui.text_of(words)
                    on:input=move |ev| {
                        ui.set_text(words, &event_target_value(&ev));
                        dispatch.send(UiEvent::WordsChanged);
                    }
                />
                <div>
                    <span id=ElementId::WordCount.dom_id()>{move || ui.text_of(ElementId::WordCount)}</span>
                </div>
                <button
                    id=ElementId::SaveLibraryButton.dom_id()
                    class="btn btn-primary"
                    on:click=move |_| dispatch.click(ElementId::SaveLibraryButton)
                >
                    "保存"
                </button>
                <button
                    id=ElementId::CancelEditButton.dom_id()
                    class="btn btn-secondary"
                    on:click=move |_| dispatch.click(ElementId::CancelEditButton)
                >
                    "取消"
                </button>
            </div>
        </Show>
    }
}
