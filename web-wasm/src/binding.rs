//! シグナルによる画面バインディング
//!
//! コントローラは ViewBinding 越しにシグナルへ書き込み、
//! コンポーネントはそのシグナルを読んで描画する。

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use gloo::timers::callback::Timeout;
use leptos::prelude::*;
use sensitive_detect_common::format::{StatusTag, TimingPanel};
use sensitive_detect_common::view::{ActiveItem, LibraryRow};
use sensitive_detect_common::{ElementId, Notice, UiEvent, ViewBinding};

/// 通知の表示時間
const NOTICE_DURATION_MS: u32 = 3_000;

/// 基本クラスと追加クラスを1つの class 属性にまとめる（追加分は名前順）
pub fn join_classes<'a>(base: &'a str, extra: impl IntoIterator<Item = &'a str>) -> String {
    let mut extra: Vec<&str> = extra.into_iter().collect();
    extra.sort_unstable();
    std::iter::once(base)
        .chain(extra)
        .filter(|class| !class.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn toggle<T>(set: RwSignal<HashSet<T>>, item: T, on: bool)
where
    T: Eq + Hash + Send + Sync + 'static,
{
    if set.with_untracked(|s| s.contains(&item)) == on {
        return;
    }
    set.update(|s| {
        if on {
            s.insert(item);
        } else {
            s.remove(&item);
        }
    });
}

#[derive(Clone, Copy)]
pub struct SignalView {
    texts: RwSignal<HashMap<ElementId, String>>,
    visible: RwSignal<HashSet<ElementId>>,
    checked: RwSignal<HashSet<ElementId>>,
    disabled: RwSignal<HashSet<ElementId>>,
    classes: RwSignal<HashSet<(ElementId, String)>>,
    tags: RwSignal<HashMap<ElementId, StatusTag>>,
    timings: RwSignal<HashMap<ElementId, TimingPanel>>,
    rows: RwSignal<Vec<LibraryRow>>,
    active: RwSignal<Vec<ActiveItem>>,
    notices: RwSignal<Vec<(u64, Notice)>>,
    next_notice: StoredValue<u64>,
    bindings: StoredValue<HashMap<ElementId, UiEvent>>,
}

impl SignalView {
    /// 初期表示（文本检测タブ、词库は既定）
    pub fn new() -> Self {
        let texts: HashMap<ElementId, String> = [
            (ElementId::CharCount, "0 字符"),
            (ElementId::WordCount, "0 个敏感词"),
            (ElementId::CurrentLibraryStatus, "使用默认词库"),
            (ElementId::LastUpdateTime, "-"),
            (ElementId::UsedLibrariesCount, "当前使用 0 个词库"),
            (ElementId::EditorTitle, "创建新词库"),
            (ElementId::UpdateDetectionButton, "更新检测词库"),
        ]
        .into_iter()
        .map(|(id, text)| (id, text.to_string()))
        .collect();

        let classes: HashSet<(ElementId, String)> = [
            (ElementId::TabText, "active"),
            (ElementId::PanelText, "active"),
            (ElementId::CurrentLibraryStatus, "status-default"),
        ]
        .into_iter()
        .map(|(id, class)| (id, class.to_string()))
        .collect();

        Self {
            texts: RwSignal::new(texts),
            visible: RwSignal::new(HashSet::from([ElementId::PanelText, ElementId::UploadArea])),
            checked: RwSignal::new(HashSet::new()),
            disabled: RwSignal::new(HashSet::new()),
            classes: RwSignal::new(classes),
            tags: RwSignal::new(HashMap::new()),
            timings: RwSignal::new(HashMap::new()),
            rows: RwSignal::new(Vec::new()),
            active: RwSignal::new(Vec::new()),
            notices: RwSignal::new(Vec::new()),
            next_notice: StoredValue::new(0),
            bindings: StoredValue::new(HashMap::new()),
        }
    }

    // ---- コンポーネントから読む（追跡あり） ----

    pub fn text_of(&self, id: ElementId) -> String {
        self.texts.with(|t| t.get(&id).cloned().unwrap_or_default())
    }

    pub fn shown(&self, id: ElementId) -> bool {
        self.visible.with(|v| v.contains(&id))
    }

    pub fn checked(&self, id: ElementId) -> bool {
        self.checked.with(|c| c.contains(&id))
    }

    pub fn disabled(&self, id: ElementId) -> bool {
        self.disabled.with(|d| d.contains(&id))
    }

    pub fn class_names(&self, base: &str, id: ElementId) -> String {
        self.classes.with(|classes| {
            join_classes(
                base,
                classes
                    .iter()
                    .filter(|(owner, _)| *owner == id)
                    .map(|(_, class)| class.as_str()),
            )
        })
    }

    pub fn tag(&self, id: ElementId) -> Option<StatusTag> {
        self.tags.with(|t| t.get(&id).cloned())
    }

    pub fn timing(&self, id: ElementId) -> Option<TimingPanel> {
        self.timings.with(|t| t.get(&id).cloned())
    }

    pub fn rows(&self) -> Vec<LibraryRow> {
        self.rows.get()
    }

    pub fn has_rows(&self) -> bool {
        self.rows.with(|r| !r.is_empty())
    }

    pub fn active_items(&self) -> Vec<ActiveItem> {
        self.active.get()
    }

    pub fn has_active(&self) -> bool {
        self.active.with(|a| !a.is_empty())
    }

    pub fn notices(&self) -> Vec<(u64, Notice)> {
        self.notices.get()
    }

    // ---- 入力イベントから書く ----

    pub fn set_checked(&self, id: ElementId, checked: bool) {
        toggle(self.checked, id, checked);
    }

    /// bind で登録されたイベント
    pub fn binding(&self, id: ElementId) -> Option<UiEvent> {
        self.bindings.with_value(|b| b.get(&id).cloned())
    }
}

impl Default for SignalView {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewBinding for SignalView {
    fn text(&self, id: ElementId) -> String {
        self.texts.with_untracked(|t| t.get(&id).cloned().unwrap_or_default())
    }

    fn set_text(&self, id: ElementId, text: &str) {
        if self.texts.with_untracked(|t| t.get(&id).map(String::as_str) == Some(text)) {
            return;
        }
        self.texts.update(|t| {
            t.insert(id, text.to_string());
        });
    }

    fn is_visible(&self, id: ElementId) -> bool {
        self.visible.with_untracked(|v| v.contains(&id))
    }

    fn set_visible(&self, id: ElementId, visible: bool) {
        toggle(self.visible, id, visible);
    }

    fn is_checked(&self, id: ElementId) -> bool {
        self.checked.with_untracked(|c| c.contains(&id))
    }

    fn set_enabled(&self, id: ElementId, enabled: bool) {
        toggle(self.disabled, id, !enabled);
    }

    fn set_class(&self, id: ElementId, class: &str, on: bool) {
        toggle(self.classes, (id, class.to_string()), on);
    }

    fn set_tag(&self, id: ElementId, tag: &StatusTag) {
        self.tags.update(|t| {
            t.insert(id, tag.clone());
        });
    }

    fn set_timing(&self, id: ElementId, panel: &TimingPanel) {
        self.timings.update(|t| {
            t.insert(id, panel.clone());
        });
    }

    fn render_library_rows(&self, rows: &[LibraryRow]) {
        self.rows.set(rows.to_vec());
    }

    fn render_active_items(&self, items: &[ActiveItem]) {
        self.active.set(items.to_vec());
    }

    fn bind(&self, id: ElementId, event: UiEvent) {
        self.bindings.update_value(|b| {
            b.insert(id, event);
        });
    }

    fn notify(&self, notice: &Notice) {
        let key = self.next_notice.get_value();
        self.next_notice.set_value(key + 1);
        self.notices.update(|n| n.push((key, notice.clone())));

        let notices = self.notices;
        Timeout::new(NOTICE_DURATION_MS, move || {
            let _ = notices.try_update(|n| n.retain(|(k, _)| *k != key));
        })
        .forget();
    }

    fn confirm(&self, message: &str) -> bool {
        gloo::dialogs::confirm(message)
    }
}
