//! Sensitive Detect Web App (Leptos + WASM)
//!
//! 画面は Leptos のコンポーネントで描き、操作は共通コントローラで行う。

mod api;
mod app;
mod binding;
mod components;

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    leptos::mount::mount_to_body(app::App);
}
