// pager-tab-strip/src/widgets/pager/page_source.rs
use std::fmt;

/// Optional features a [`PageSource`] declares on top of titles.
///
/// Icon support takes precedence over notification support when the strip
/// decides how to build a tab.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Capabilities {
    pub icons: bool,
    pub notifications: bool,
}

impl Capabilities {
    pub const NONE: Self = Self {
        icons: false,
        notifications: false,
    };

    pub fn with_icons(mut self) -> Self {
        self.icons = true;
        self
    }

    pub fn with_notifications(mut self) -> Self {
        self.notifications = true;
        self
    }
}

/// Reference to the glyph shown in an icon tab.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IconRef {
    /// A named glyph from the theme. Always rendered without a title.
    Resource(&'static str),
    /// An arbitrary glyph, rendered together with the page title if any.
    Glyph(String),
}

impl IconRef {
    pub fn glyph(&self) -> &str {
        match self {
            IconRef::Resource(glyph) => glyph,
            IconRef::Glyph(glyph) => glyph,
        }
    }
}

impl fmt::Display for IconRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.glyph())
    }
}

/// The data behind a paged view: how many pages, and how to label them.
///
/// Only [`count`](PageSource::count) and [`page_title`](PageSource::page_title)
/// are required. Icons and notification flags are only consulted when the
/// matching [`Capabilities`] flag is declared.
pub trait PageSource: Send + Sync {
    fn count(&self) -> usize;
    fn page_title(&self, position: usize) -> Option<String>;
    fn capabilities(&self) -> Capabilities {
        Capabilities::NONE
    }
    fn page_icon(&self, #[allow(unused)] position: usize) -> Option<IconRef> {
        None
    }
    fn has_notification(&self, #[allow(unused)] position: usize) -> bool {
        false
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageEntry {
    pub title: Option<String>,
    pub icon: Option<IconRef>,
    pub notification: bool,
}

/// A fixed list of pages, built up front.
#[derive(Debug, Clone, Default)]
pub struct StaticPages {
    pages: Vec<PageEntry>,
    capabilities: Capabilities,
}

impl StaticPages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_titles<Iter>(titles: Iter) -> Self
    where
        Iter: IntoIterator,
        Iter::Item: Into<String>,
    {
        let mut pages = Self::new();
        for title in titles {
            pages = pages.page(title);
        }
        pages
    }

    /// Adds a plain titled page.
    pub fn page(mut self, title: impl Into<String>) -> Self {
        self.pages.push(PageEntry {
            title: Some(title.into()),
            ..Default::default()
        });
        self
    }

    /// Adds a page with an icon and an optional title. Declares icon support.
    pub fn icon_page(mut self, icon: IconRef, title: Option<&str>) -> Self {
        self.pages.push(PageEntry {
            title: title.map(str::to_owned),
            icon: Some(icon),
            notification: false,
        });
        self.capabilities = self.capabilities.with_icons();
        self
    }

    /// Adds a page that carries a notification badge. Declares notification support.
    pub fn notification_page(mut self, title: impl Into<String>) -> Self {
        self.pages.push(PageEntry {
            title: Some(title.into()),
            icon: None,
            notification: true,
        });
        self.capabilities = self.capabilities.with_notifications();
        self
    }

    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub fn entries(&self) -> &[PageEntry] {
        &self.pages
    }
}

impl PageSource for StaticPages {
    fn count(&self) -> usize {
        self.pages.len()
    }

    fn page_title(&self, position: usize) -> Option<String> {
        self.pages.get(position).and_then(|p| p.title.clone())
    }

    fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    fn page_icon(&self, position: usize) -> Option<IconRef> {
        self.pages.get(position).and_then(|p| p.icon.clone())
    }

    fn has_notification(&self, position: usize) -> bool {
        self.pages.get(position).is_some_and(|p| p.notification)
    }
}
