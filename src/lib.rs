// pager-tab-strip/src/lib.rs
//! A sliding tab strip for [ratatui] that follows a paged view.
//!
//! [`TabStrip`] draws one tab per page of a [`PageHost`], moves an indicator
//! line under the tabs while the pages are swiped, and scrolls itself so the
//! current tab stays in view. [`Pager`] is a small host that drives it from
//! keyboard or mouse drags.

mod widgets;
pub use widgets::*;

mod tui;
pub use tui::*;

pub mod tui_theme;

pub use ratatui;
