//! ローディング表示コンポーネント

use leptos::prelude::*;
use sensitive_detect_common::ElementId;

use crate::binding::SignalView;

#[component]
pub fn LoadingOverlay(ui: SignalView) -> impl IntoView {
    view! {
        <Show when=move || ui.shown(ElementId::LoadingOverlay)>
            <div id=ElementId::LoadingOverlay.dom_id() class="loading-overlay">
                <div class="spinner"></div>
                <p>"检测中..."</p>
            </div>
        </Show>
    }
}
