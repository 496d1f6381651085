//! メインアプリケーションコンポーネント

use std::rc::Rc;

use leptos::ev;
use leptos::prelude::*;
use sensitive_detect_common::{Controller, ElementId, SelectedFile, UiEvent};
use wasm_bindgen_futures::spawn_local;
use web_sys::File;

use crate::api::{self, FetchApi};
use crate::binding::SignalView;
use crate::components::{
    document_panel::DocumentPanel, library_panel::LibraryPanel, loading_overlay::LoadingOverlay,
    notifications::Notifications, tabs::Tabs, text_panel::TextPanel,
};

/// ブラウザ版のコントローラ
pub type Page = Controller<FetchApi, SignalView>;

/// Ctrl+Enter
pub fn is_detect_shortcut(ctrl: bool, key: &str) -> bool {
    ctrl && key == "Enter"
}

/// 選択・ドロップされた File を選択状態にする（中身は送信時まで読まない）
pub fn selected_file(file: File) -> SelectedFile<File> {
    // MIME を判定できなかったファイルは空文字（検証で弾かれる）
    SelectedFile::new(file.name(), file.type_(), file.size() as u64, file)
}

/// コンポーネントからコントローラへの窓口
#[derive(Clone, Copy)]
pub struct Dispatch {
    page: StoredValue<Rc<Page>, LocalStorage>,
}

impl Dispatch {
    pub fn new(page: Rc<Page>) -> Self {
        Self { page: StoredValue::new_local(page) }
    }

    /// 同期的に済む操作（選択・ドラッグ）
    pub fn with_page(&self, f: impl FnOnce(&Page)) {
        match self.page.try_get_value() {
            Some(page) => f(&page),
            None => gloo::console::warn!("page is disposed"),
        }
    }

    /// イベントを非同期で処理する
    pub fn send(&self, event: UiEvent) {
        if let Some(page) = self.page.try_get_value() {
            spawn_local(async move { page.dispatch(event).await });
        }
    }

    /// bind で登録された要素のクリック
    pub fn click(&self, id: ElementId) {
        let event = self.page.try_get_value().and_then(|page| page.view().binding(id));
        match event {
            Some(event) => self.send(event),
            None => gloo::console::warn!(format!("#{} has no binding", id.dom_id())),
        }
    }
}

#[component]
pub fn App() -> impl IntoView {
    let ui = SignalView::new();
    let page = Rc::new(Controller::new(FetchApi::new(api::base_url()), ui));
    page.bind_controls();
    let dispatch = Dispatch::new(Rc::clone(&page));

    let _shortcut = window_event_listener(ev::keydown, move |ev| {
        if is_detect_shortcut(ev.ctrl_key(), &ev.key()) {
            dispatch.send(UiEvent::DetectShortcut);
        }
    });

    gloo::console::log!(format!("API: {}", api::base_url()));
    spawn_local(async move {
        if let Err(err) = page.initialize().await {
            gloo::console::error!(format!("initialize failed: {}", err));
        }
    });

    view! {
        <main class="container">
            <h1>"敏感内容检测"</h1>
            <Tabs ui=ui dispatch=dispatch />
            <TextPanel ui=ui dispatch=dispatch />
            <DocumentPanel ui=ui dispatch=dispatch />
            <LibraryPanel ui=ui dispatch=dispatch />
        </main>
        <LoadingOverlay ui=ui />
        <Notifications ui=ui />
    }
}
