// pager-tab-strip/src/widgets/tab_strip/saved_state.rs
use serde::{Deserialize, Serialize};

use super::TabStripResult;

/// State of a tab strip that survives tearing the widget down and building
/// it again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SavedState {
    pub current_position: usize,
}

impl SavedState {
    pub fn to_json(&self) -> TabStripResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> TabStripResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
