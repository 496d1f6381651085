//! 画面コンポーネント

pub mod document_panel;
pub mod library_panel;
pub mod loading_overlay;
pub mod notifications;
pub mod result_view;
pub mod tabs;
pub mod text_panel;
