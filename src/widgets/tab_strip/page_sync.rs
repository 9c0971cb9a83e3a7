// pager-tab-strip/src/widgets/tab_strip/page_sync.rs
use tracing::trace;

use super::{TabGeometry, TabStrip};
use crate::{PageChangeListener, ScrollState};

/// Where the strip stands relative to the pages.
///
/// `current_offset` is the fraction of the way from `current_position` to
/// the next tab; zero means the strip is at rest on a single tab.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StripState {
    pub tab_count: usize,
    pub current_position: usize,
    pub current_offset: f32,
    /// Last requested scroll, before clamping to the content.
    pub last_scroll_x: i32,
}

impl TabStrip {
    /// Scrolls so that tab `position`, shifted by `offset` columns, sits one
    /// scroll-offset margin from the left edge. Returns whether a scroll was
    /// issued.
    pub(super) fn scroll_to_child(&mut self, position: usize, offset: i32) -> bool {
        if self.state.tab_count == 0 {
            return false;
        }
        let Some(layout) = &self.layout else {
            return false;
        };
        let Some(tab) = layout.bounds(position) else {
            return false;
        };

        let mut new_scroll_x = tab.left + offset;
        if position > 0 || offset > 0 {
            new_scroll_x -= self.style.scroll_offset as i32;
        }

        if new_scroll_x == self.state.last_scroll_x {
            return false;
        }
        self.state.last_scroll_x = new_scroll_x;
        self.scroll_x = new_scroll_x.clamp(0, layout.max_scroll());
        trace!(position, offset, new_scroll_x, scroll_x = self.scroll_x, "strip scrolled");
        self.redraw_requested = true;
        true
    }
}

impl PageChangeListener for TabStrip {
    fn on_page_scrolled(&mut self, position: usize, offset: f32, offset_pixels: i32) {
        self.state.current_position = position.min(self.state.tab_count.saturating_sub(1));
        self.state.current_offset = offset;

        let tab_width = self
            .layout
            .as_ref()
            .and_then(|l| l.bounds(self.state.current_position))
            .map_or(0, |b| b.width());
        self.scroll_to_child(
            self.state.current_position,
            (offset * tab_width as f32) as i32,
        );
        self.redraw_requested = true;

        if let Some(delegate) = &mut self.delegate {
            delegate.on_page_scrolled(position, offset, offset_pixels);
        }
        if let Some(tint) = &mut self.tint {
            tint.on_offset_changed(position, offset, &mut self.registry);
        }
    }

    fn on_page_scroll_state_changed(&mut self, state: ScrollState) {
        if state == ScrollState::Idle {
            self.scroll_to_child(self.state.current_position, 0);
        }
        if let Some(delegate) = &mut self.delegate {
            delegate.on_page_scroll_state_changed(state);
        }
    }

    fn on_page_selected(&mut self, position: usize) {
        if let Some(delegate) = &mut self.delegate {
            delegate.on_page_selected(position);
        }
    }
}
