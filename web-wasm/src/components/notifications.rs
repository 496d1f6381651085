//! 通知コンポーネント

use leptos::prelude::*;
use sensitive_detect_common::Notice;

use crate::binding::SignalView;

#[component]
pub fn Notifications(ui: SignalView) -> impl IntoView {
    view! {
        <div class="notifications">
            <For
                each=move || ui.notices()
                key=|(key, _): &(u64, Notice)| *key
                children=|(_, notice): (u64, Notice)| {
                    view! {
                        <div class=format!("notification notification-{}", notice.level.as_str())>
                            {notice.message}
                        </div>
                    }
                }
            />
        </div>
    }
}
