// pager-tab-strip/src/widgets/tab_strip/error.rs
use thiserror::Error;

/// Errors surfaced by [`TabStrip`](crate::TabStrip) configuration calls.
///
/// Rendering never produces one of these: a strip with nothing to draw
/// simply draws nothing.
#[derive(Debug, Error)]
pub enum TabStripError {
    #[error("page host does not have a page source attached")]
    MissingAdapter,

    #[error("tab index {index} is out of range for {len} built tabs")]
    TabIndexOutOfRange { index: usize, len: usize },

    #[error("tab {0} was not built with a notification badge")]
    NoNotificationBadge(usize),

    #[error("unknown color resource: {0}")]
    UnknownColorResource(String),

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

pub type TabStripResult<T> = std::result::Result<T, TabStripError>;
