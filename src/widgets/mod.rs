// pager-tab-strip/src/widgets/mod.rs
mod pager;
pub use pager::*;

mod tab_strip;
pub use tab_strip::*;
