// pager-tab-strip/src/widgets/tab_strip/mod.rs
mod error;
pub use error::*;

mod style_config;
pub use style_config::*;

mod saved_state;
pub use saved_state::*;

mod registry;
pub use registry::*;

mod geometry;
pub use geometry::*;

mod tint;
pub use tint::*;

pub mod indicator;

mod page_sync;
pub use page_sync::*;

mod tab_strip_widget;
pub use tab_strip_widget::*;
