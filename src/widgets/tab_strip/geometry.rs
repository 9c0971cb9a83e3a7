// pager-tab-strip/src/widgets/tab_strip/geometry.rs
use unicode_width::UnicodeWidthStr;

use super::{StyleConfig, TabKind, TabRegistry, TabView};

/// Horizontal extent of a tab inside the strip content, in columns.
/// `right` is exclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TabBounds {
    pub left: i32,
    pub right: i32,
}

impl TabBounds {
    pub fn new(left: i32, right: i32) -> Self {
        Self { left, right }
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn contains(&self, x: i32) -> bool {
        x >= self.left && x < self.right
    }
}

/// Where each tab sits inside the strip.
pub trait TabGeometry {
    fn tab_count(&self) -> usize;
    fn bounds(&self, index: usize) -> Option<TabBounds>;
    /// Total width of the strip content (at least the viewport width).
    fn content_width(&self) -> i32;
}

/// Result of a layout pass over the registry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabLayout {
    bounds: Vec<TabBounds>,
    content_width: i32,
    viewport_width: i32,
    content_rows: u16,
}

impl TabLayout {
    pub fn from_bounds(bounds: Vec<TabBounds>, viewport_width: i32) -> Self {
        let used = bounds.last().map_or(0, |b| b.right);
        Self {
            content_width: used.max(viewport_width),
            bounds,
            viewport_width,
            content_rows: 1,
        }
    }

    /// Lays the tabs out left to right for a viewport of `width` x `height`.
    pub fn measure(
        registry: &TabRegistry,
        style: &StyleConfig,
        width: u16,
        height: u16,
        screen_width: u16,
    ) -> Self {
        let content_rows = height.saturating_sub(style.reserved_rows()).max(1);
        let tab_count = registry.len();

        let mut widths: Vec<i32> = registry
            .iter()
            .map(|tab| {
                if style.fit_window && tab.kind() == TabKind::IconWithText && screen_width > 0 {
                    (screen_width as usize / tab_count) as i32
                } else {
                    tab_content_width(tab, content_rows) as i32 + 2 * style.tab_padding as i32
                }
            })
            .collect();

        let total: i32 = widths.iter().sum();
        let viewport = width as i32;
        if style.should_expand && tab_count > 0 && total < viewport {
            let extra = viewport - total;
            let share = extra / tab_count as i32;
            let remainder = extra % tab_count as i32;
            for (i, w) in widths.iter_mut().enumerate() {
                *w += share + i32::from((i as i32) < remainder);
            }
        }

        let mut left = 0;
        let bounds = widths
            .into_iter()
            .map(|w| {
                let bounds = TabBounds::new(left, left + w);
                left += w;
                bounds
            })
            .collect();

        Self {
            bounds,
            content_width: left.max(viewport),
            viewport_width: viewport,
            content_rows,
        }
    }

    pub fn viewport_width(&self) -> i32 {
        self.viewport_width
    }

    pub fn content_rows(&self) -> u16 {
        self.content_rows
    }

    /// Furthest the strip can scroll.
    pub fn max_scroll(&self) -> i32 {
        (self.content_width - self.viewport_width).max(0)
    }

    /// Tab under content column `x`.
    pub fn hit_test(&self, x: i32) -> Option<usize> {
        self.bounds.iter().position(|b| b.contains(x))
    }
}

impl TabGeometry for TabLayout {
    fn tab_count(&self) -> usize {
        self.bounds.len()
    }

    fn bounds(&self, index: usize) -> Option<TabBounds> {
        self.bounds.get(index).copied()
    }

    fn content_width(&self) -> i32 {
        self.content_width
    }
}

/// Width of a tab's content, without padding.
pub fn tab_content_width(tab: &TabView, content_rows: u16) -> u16 {
    let text = tab
        .text
        .as_ref()
        .map_or(0, |t| t.display().width() as u16);
    let icon = tab
        .icon
        .as_ref()
        .map_or(0, |i| i.size.max(i.glyph.width() as u16));

    match tab.kind() {
        TabKind::Text => text,
        TabKind::Icon => icon,
        TabKind::IconWithText if content_rows >= 2 => icon.max(text),
        TabKind::IconWithText => icon + 1 + text,
        TabKind::TextWithNotification => match &tab.badge {
            Some(badge) if badge.is_visible() => text + 1 + badge.text().width() as u16,
            _ => text,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{IconRef, StaticPages};
    use ratatui::style::Color;

    fn registry(source: &StaticPages) -> TabRegistry {
        TabRegistry::build(source, 1, Color::Gray, None)
    }

    #[test]
    fn tabs_are_laid_out_left_to_right() {
        let reg = registry(&StaticPages::from_titles(["A", "BB", "CCC"]));
        let layout = TabLayout::measure(&reg, &StyleConfig::default(), 80, 3, 0);
        assert_eq!(layout.bounds(0), Some(TabBounds::new(0, 5)));
        assert_eq!(layout.bounds(1), Some(TabBounds::new(5, 11)));
        assert_eq!(layout.bounds(2), Some(TabBounds::new(11, 18)));
        assert_eq!(layout.content_width(), 80);
        assert_eq!(layout.max_scroll(), 0);
        assert_eq!(layout.hit_test(6), Some(1));
        assert_eq!(layout.hit_test(40), None);
    }

    #[test]
    fn overflowing_tabs_can_scroll() {
        let reg = registry(&StaticPages::from_titles(["AAAA", "BBBB", "CCCC"]));
        let layout = TabLayout::measure(&reg, &StyleConfig::default(), 10, 3, 0);
        assert_eq!(layout.content_width(), 24);
        assert_eq!(layout.max_scroll(), 14);
    }

    #[test]
    fn expand_spreads_spare_width() {
        let reg = registry(&StaticPages::from_titles(["A", "B", "C"]));
        let style = StyleConfig {
            should_expand: true,
            ..StyleConfig::default()
        };
        let layout = TabLayout::measure(&reg, &style, 20, 3, 0);
        assert_eq!(layout.bounds(0), Some(TabBounds::new(0, 7)));
        assert_eq!(layout.bounds(1), Some(TabBounds::new(7, 14)));
        assert_eq!(layout.bounds(2), Some(TabBounds::new(14, 20)));
    }

    #[test]
    fn fit_window_sizes_icon_text_tabs_to_screen_share() {
        let source = StaticPages::new()
            .icon_page(IconRef::Glyph("@".into()), Some("Mail"))
            .icon_page(IconRef::Glyph("#".into()), Some("Tags"));
        let style = StyleConfig {
            fit_window: true,
            ..StyleConfig::default()
        };
        let layout = TabLayout::measure(&registry(&source), &style, 40, 3, 60);
        assert_eq!(layout.bounds(1), Some(TabBounds::new(30, 60)));
    }

    #[test]
    fn icon_text_stacks_when_there_is_room() {
        let source = StaticPages::new().icon_page(IconRef::Glyph("@".into()), Some("Mail"));
        let reg = registry(&source);
        let tab = reg.get(0).unwrap();
        assert_eq!(tab_content_width(tab, 2), 4);
        assert_eq!(tab_content_width(tab, 1), 6);
    }
}
