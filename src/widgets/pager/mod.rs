// pager-tab-strip/src/widgets/pager/mod.rs
mod page_source;
pub use page_source::*;

mod pager_host;
pub use pager_host::*;
