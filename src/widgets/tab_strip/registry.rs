// pager-tab-strip/src/widgets/tab_strip/registry.rs
use std::borrow::Cow;

use itertools::Itertools;
use ratatui::style::{Color, Style};
use tracing::debug;

use super::{StyleConfig, TabStripError, TabStripResult};
use crate::{IconRef, PageSource};

/// How a tab presents its page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TabKind {
    Text,
    Icon,
    IconWithText,
    TextWithNotification,
}

/// What a page source says about one tab, captured at rebuild time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabSpec {
    pub index: usize,
    pub kind: TabKind,
    pub title: Option<String>,
    pub icon: Option<IconRef>,
    pub notification_count: Option<u32>,
}

impl TabSpec {
    /// Picks the tab kind from the declared capabilities: icons win over
    /// notifications, which win over plain text.
    pub fn from_source(source: &dyn PageSource, index: usize) -> Self {
        let capabilities = source.capabilities();
        let title = source.page_title(index);

        if capabilities.icons {
            let icon = source.page_icon(index);
            let kind = match (&icon, &title) {
                (Some(IconRef::Resource(_)), _) | (_, None) => TabKind::Icon,
                _ => TabKind::IconWithText,
            };
            let title = if kind == TabKind::Icon { None } else { title };
            return Self {
                index,
                kind,
                title,
                icon,
                notification_count: None,
            };
        }

        if capabilities.notifications && source.has_notification(index) {
            return Self {
                index,
                kind: TabKind::TextWithNotification,
                title,
                icon: None,
                notification_count: Some(0),
            };
        }

        Self {
            index,
            kind: TabKind::Text,
            title,
            icon: None,
            notification_count: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextElement {
    pub content: String,
    pub style: Style,
    pub all_caps: bool,
}

impl TextElement {
    fn new(content: impl Into<String>, style: Style) -> Self {
        Self {
            content: content.into(),
            style,
            all_caps: false,
        }
    }

    /// The text as drawn, with the uppercase transform applied.
    pub fn display(&self) -> Cow<'_, str> {
        if self.all_caps {
            Cow::Owned(self.content.to_uppercase())
        } else {
            Cow::Borrowed(&self.content)
        }
    }

    pub fn set_color(&mut self, color: Color) {
        self.style = self.style.fg(color);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconElement {
    pub glyph: String,
    pub size: u16,
    /// Color filter; `None` draws the glyph with the tab's style.
    pub tint: Option<Color>,
}

/// Notification counter shown after a tab title.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Badge {
    count: u32,
    visible: bool,
}

impl Badge {
    /// Zero hides the badge, anything else shows it.
    pub fn set_count(&mut self, count: u32) {
        self.count = count;
        self.visible = count != 0;
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn text(&self) -> String {
        self.count.to_string()
    }
}

/// The visual handle of one tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabView {
    pub spec: TabSpec,
    pub text: Option<TextElement>,
    pub icon: Option<IconElement>,
    pub badge: Option<Badge>,
    pub background: Style,
}

impl TabView {
    pub fn kind(&self) -> TabKind {
        self.spec.kind
    }
}

/// Tabs of a strip, in page order, plus the icon and text elements in the
/// order they were created.
#[derive(Debug, Clone, Default)]
pub struct TabRegistry {
    tabs: Vec<TabView>,
    icons: Vec<usize>,
    texts: Vec<usize>,
}

impl TabRegistry {
    /// Builds one tab per page. `color_filter` tints icons (and texts) from
    /// the start, as configured by the color filters.
    pub fn build(
        source: &dyn PageSource,
        icon_size: u16,
        text_color: Color,
        color_filter: Option<Color>,
    ) -> Self {
        let mut registry = Self::default();
        for index in 0..source.count() {
            registry.push(TabSpec::from_source(source, index), icon_size, text_color, color_filter);
        }
        debug!(
            tabs = registry.tabs.len(),
            icons = registry.icons.len(),
            texts = registry.texts.len(),
            "tab registry rebuilt"
        );
        registry
    }

    fn push(
        &mut self,
        spec: TabSpec,
        icon_size: u16,
        text_color: Color,
        color_filter: Option<Color>,
    ) {
        let index = self.tabs.len();
        let base = Style::default().fg(color_filter.unwrap_or(text_color));
        let title = spec.title.clone().unwrap_or_default();

        let icon = matches!(spec.kind, TabKind::Icon | TabKind::IconWithText).then(|| IconElement {
            glyph: spec.icon.as_ref().map(|i| i.glyph().to_owned()).unwrap_or_default(),
            size: icon_size,
            tint: color_filter,
        });
        let text = (spec.kind != TabKind::Icon).then(|| TextElement::new(title, base));
        let badge = spec.notification_count.map(|count| {
            let mut badge = Badge::default();
            badge.set_count(count);
            badge
        });

        if icon.is_some() {
            self.icons.push(index);
        }
        if text.is_some() {
            self.texts.push(index);
        }
        self.tabs.push(TabView {
            spec,
            text,
            icon,
            badge,
            background: Style::default(),
        });
    }

    /// Re-applies the uniform styling to every tab.
    ///
    /// Icon+text tabs keep their own text color, which belongs to the tint.
    pub fn apply_styles(&mut self, style: &StyleConfig) {
        for tab in &mut self.tabs {
            tab.background = style.tab_background;
            let keep_color = tab.spec.kind == TabKind::IconWithText;
            if let Some(text) = &mut tab.text {
                let own_fg = text.style.fg;
                text.style = style.text_style();
                if keep_color {
                    text.style.fg = own_fg;
                }
                text.all_caps = style.text_all_caps;
            }
        }
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TabView> {
        self.tabs.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TabView> {
        self.tabs.iter()
    }

    pub fn icon_count(&self) -> usize {
        self.icons.len()
    }

    pub fn text_count(&self) -> usize {
        self.texts.len()
    }

    /// Tab index of the `ordinal`-th icon element.
    pub fn icon_tab(&self, ordinal: usize) -> Option<usize> {
        self.icons.get(ordinal).copied()
    }

    /// Tab index of the `ordinal`-th text element.
    pub fn text_tab(&self, ordinal: usize) -> Option<usize> {
        self.texts.get(ordinal).copied()
    }

    pub fn set_icon_tint(&mut self, ordinal: usize, color: Color) {
        if let Some(icon) = self
            .icon_tab(ordinal)
            .and_then(|i| self.tabs[i].icon.as_mut())
        {
            icon.tint = Some(color);
        }
    }

    pub fn set_text_color(&mut self, ordinal: usize, color: Color) {
        if let Some(text) = self
            .text_tab(ordinal)
            .and_then(|i| self.tabs[i].text.as_mut())
        {
            text.set_color(color);
        }
    }

    pub fn badge_mut(&mut self, index: usize) -> TabStripResult<&mut Badge> {
        let len = self.tabs.len();
        let tab = self
            .tabs
            .get_mut(index)
            .ok_or(TabStripError::TabIndexOutOfRange { index, len })?;
        tab.badge
            .as_mut()
            .ok_or(TabStripError::NoNotificationBadge(index))
    }

    pub fn kinds(&self) -> Vec<TabKind> {
        self.tabs.iter().map(TabView::kind).collect_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Capabilities, StaticPages, TypefaceStyle, tui_theme};
    use ratatui::style::Modifier;

    fn build(source: &StaticPages) -> TabRegistry {
        TabRegistry::build(source, 1, Color::Gray, None)
    }

    #[test]
    fn plain_titles_build_text_tabs() {
        let registry = build(&StaticPages::from_titles(["A", "B", "C"]));
        assert_eq!(registry.kinds(), vec![TabKind::Text; 3]);
        assert_eq!(registry.text_count(), 3);
        assert_eq!(registry.icon_count(), 0);
        for (i, tab) in registry.iter().enumerate() {
            assert_eq!(tab.spec.index, i);
        }
    }

    #[test]
    fn icon_capability_wins_over_notifications() {
        let source = StaticPages::new()
            .icon_page(IconRef::Resource(tui_theme::ICON_HOME), Some("Home"))
            .icon_page(IconRef::Glyph("@".into()), Some("Mail"))
            .icon_page(IconRef::Glyph("#".into()), None)
            .notification_page("Inbox");
        let registry = build(&source);
        assert_eq!(
            registry.kinds(),
            vec![
                TabKind::Icon,
                TabKind::IconWithText,
                TabKind::Icon,
                TabKind::IconWithText,
            ]
        );
        assert!(registry.get(0).unwrap().text.is_none());
        assert_eq!(registry.icon_count(), 4);
        assert_eq!(registry.text_count(), 2);
    }

    #[test]
    fn notification_capability_only_applies_to_flagged_pages() {
        let source = StaticPages::new().page("Feed").notification_page("Inbox");
        let registry = build(&source);
        assert_eq!(
            registry.kinds(),
            vec![TabKind::Text, TabKind::TextWithNotification]
        );
    }

    #[test]
    fn missing_capability_falls_through_to_text() {
        let source = StaticPages::new()
            .notification_page("Inbox")
            .with_capabilities(Capabilities::NONE);
        assert_eq!(build(&source).kinds(), vec![TabKind::Text]);
    }

    #[test]
    fn badge_hides_at_zero() {
        let source = StaticPages::new().notification_page("Inbox");
        let mut registry = build(&source);
        let badge = registry.badge_mut(0).unwrap();
        assert!(!badge.is_visible());
        badge.set_count(3);
        assert!(badge.is_visible());
        badge.set_count(0);
        assert!(!badge.is_visible());
        badge.set_count(5);
        assert!(badge.is_visible());
        assert_eq!(badge.text(), "5");
    }

    #[test]
    fn badge_errors() {
        let source = StaticPages::new().page("Feed").notification_page("Inbox");
        let mut registry = build(&source);
        assert!(matches!(
            registry.badge_mut(0),
            Err(TabStripError::NoNotificationBadge(0))
        ));
        assert!(matches!(
            registry.badge_mut(7),
            Err(TabStripError::TabIndexOutOfRange { index: 7, len: 2 })
        ));
    }

    #[test]
    fn styles_apply_uniformly_except_icon_text_color() {
        let source = StaticPages::new()
            .icon_page(IconRef::Glyph("@".into()), Some("mail"))
            .with_capabilities(Capabilities::NONE.with_icons());
        let mut registry = TabRegistry::build(&source, 1, Color::Gray, Some(Color::Blue));
        let style = StyleConfig {
            typeface: TypefaceStyle::Italic,
            text_color: Color::Red,
            ..StyleConfig::default()
        };
        registry.apply_styles(&style);
        let text = registry.get(0).unwrap().text.as_ref().unwrap();
        assert_eq!(text.style.fg, Some(Color::Blue));
        assert!(text.style.add_modifier.contains(Modifier::ITALIC));
        assert_eq!(text.display(), "MAIL");

        let mut plain = build(&StaticPages::from_titles(["feed"]));
        plain.apply_styles(&style);
        let text = plain.get(0).unwrap().text.as_ref().unwrap();
        assert_eq!(text.style.fg, Some(Color::Red));
    }
}
