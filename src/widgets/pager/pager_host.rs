// pager-tab-strip/src/widgets/pager/pager_host.rs
use std::time::Duration;

use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, error::TryRecvError};
use tracing::{debug, trace};

use super::PageSource;

/// Scroll state of a paged view, as reported to listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScrollState {
    Idle,
    Dragging,
    Settling,
}

/// A page-change notification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PageEvent {
    /// `offset` is the fraction in `[0, 1)` between `position` and `position + 1`.
    Scrolled {
        position: usize,
        offset: f32,
        offset_pixels: i32,
    },
    ScrollStateChanged(ScrollState),
    PageSelected(usize),
}

/// Requests a listener can send back to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageCommand {
    SetCurrentItem(usize),
}

/// Receives page-change notifications.
pub trait PageChangeListener {
    fn on_page_scrolled(&mut self, position: usize, offset: f32, offset_pixels: i32);
    fn on_page_scroll_state_changed(&mut self, state: ScrollState);
    fn on_page_selected(&mut self, position: usize);

    fn on_page_event(&mut self, event: PageEvent) {
        match event {
            PageEvent::Scrolled {
                position,
                offset,
                offset_pixels,
            } => self.on_page_scrolled(position, offset, offset_pixels),
            PageEvent::ScrollStateChanged(state) => self.on_page_scroll_state_changed(state),
            PageEvent::PageSelected(position) => self.on_page_selected(position),
        }
    }
}

/// A registered listener's connection to its host.
///
/// Dropping the link unregisters the listener: the host prunes closed
/// subscribers the next time it emits.
#[derive(Debug)]
pub struct PageLink {
    pub events: UnboundedReceiver<PageEvent>,
    pub commands: UnboundedSender<PageCommand>,
}

impl PageLink {
    /// Pops every pending event without blocking.
    pub fn drain(&mut self) -> Vec<PageEvent> {
        let mut events = Vec::new();
        loop {
            match self.events.try_recv() {
                Ok(event) => events.push(event),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        events
    }
}

/// A paged content host that a tab strip can bind to.
pub trait PageHost {
    fn adapter(&self) -> Option<&dyn PageSource>;
    fn current_item(&self) -> usize;
    fn subscribe(&mut self) -> PageLink;
}

const DEFAULT_SETTLE_SPEED: f32 = 4.0;

/// Minimal paged view host: tracks a fractional page position and reports
/// scrolling to its subscribers.
pub struct Pager {
    adapter: Option<Box<dyn PageSource>>,
    current_item: usize,
    /// Scroll position in pages.
    scroll: f32,
    target: Option<usize>,
    state: ScrollState,
    page_width: u16,
    settle_speed: f32,
    listeners: Vec<UnboundedSender<PageEvent>>,
    commands_tx: UnboundedSender<PageCommand>,
    commands_rx: UnboundedReceiver<PageCommand>,
}

impl std::fmt::Debug for Pager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pager")
            .field("has_adapter", &self.adapter.is_some())
            .field("current_item", &self.current_item)
            .field("scroll", &self.scroll)
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Default for Pager {
    fn default() -> Self {
        Self::new()
    }
}

impl Pager {
    pub fn new() -> Self {
        let (commands_tx, commands_rx) = tokio::sync::mpsc::unbounded_channel();
        Self {
            adapter: None,
            current_item: 0,
            scroll: 0.0,
            target: None,
            state: ScrollState::Idle,
            page_width: 80,
            settle_speed: DEFAULT_SETTLE_SPEED,
            listeners: Vec::new(),
            commands_tx,
            commands_rx,
        }
    }

    pub fn with_adapter(mut self, adapter: impl PageSource + 'static) -> Self {
        self.set_adapter(adapter);
        self
    }

    /// Page width in cells, used to report pixel offsets.
    pub fn with_page_width(mut self, width: u16) -> Self {
        self.page_width = width;
        self
    }

    /// Settle speed in pages per second.
    pub fn with_settle_speed(mut self, pages_per_sec: f32) -> Self {
        self.settle_speed = pages_per_sec.max(0.1);
        self
    }

    pub fn set_adapter(&mut self, adapter: impl PageSource + 'static) {
        self.adapter = Some(Box::new(adapter));
        let last = self.page_count().saturating_sub(1);
        self.current_item = self.current_item.min(last);
        self.scroll = self.current_item as f32;
        self.target = None;
    }

    pub fn set_page_width(&mut self, width: u16) {
        self.page_width = width;
    }

    pub fn page_count(&self) -> usize {
        self.adapter.as_ref().map_or(0, |a| a.count())
    }

    pub fn scroll_state(&self) -> ScrollState {
        self.state
    }

    /// Fractional scroll position in pages.
    pub fn scroll_position(&self) -> f32 {
        self.scroll
    }

    /// Starts a smooth scroll to `item`.
    pub fn set_current_item(&mut self, item: usize) {
        let count = self.page_count();
        if count == 0 {
            return;
        }
        let item = item.min(count - 1);
        if item == self.current_item && self.target.is_none() && self.state == ScrollState::Idle {
            return;
        }
        debug!(item, "pager settling to page");
        self.target = Some(item);
        self.set_state(ScrollState::Settling);
        if item != self.current_item {
            self.current_item = item;
            self.emit(PageEvent::PageSelected(item));
        }
    }

    pub fn begin_drag(&mut self) {
        if self.page_count() == 0 {
            return;
        }
        self.target = None;
        self.set_state(ScrollState::Dragging);
    }

    /// Moves the pages by `pages` (positive reveals the next page).
    pub fn drag_by(&mut self, pages: f32) {
        if self.state != ScrollState::Dragging {
            return;
        }
        let last = self.page_count().saturating_sub(1) as f32;
        self.scroll = (self.scroll + pages).clamp(0.0, last);
        self.emit_scrolled();
    }

    /// Releases a drag and settles on the nearest page.
    pub fn end_drag(&mut self) {
        if self.state != ScrollState::Dragging {
            return;
        }
        let nearest = self.scroll.round() as usize;
        self.target = Some(nearest);
        self.set_state(ScrollState::Settling);
        if nearest != self.current_item {
            self.current_item = nearest;
            self.emit(PageEvent::PageSelected(nearest));
        }
    }

    /// Applies pending commands and advances a settle by `dt`.
    pub fn tick(&mut self, dt: Duration) {
        self.process_commands();

        let Some(target) = self.target else {
            return;
        };
        let goal = target as f32;
        let step = self.settle_speed * dt.as_secs_f32();
        let distance = goal - self.scroll;
        if distance.abs() <= step {
            self.scroll = goal;
            self.target = None;
            self.emit_scrolled();
            self.set_state(ScrollState::Idle);
        } else {
            self.scroll += step.copysign(distance);
            self.emit_scrolled();
        }
    }

    pub fn process_commands(&mut self) {
        while let Ok(command) = self.commands_rx.try_recv() {
            match command {
                PageCommand::SetCurrentItem(item) => self.set_current_item(item),
            }
        }
    }

    fn set_state(&mut self, state: ScrollState) {
        if self.state != state {
            self.state = state;
            self.emit(PageEvent::ScrollStateChanged(state));
        }
    }

    fn emit_scrolled(&mut self) {
        let position = self.scroll.floor();
        let offset = self.scroll - position;
        let event = PageEvent::Scrolled {
            position: position as usize,
            offset,
            offset_pixels: (offset * self.page_width as f32) as i32,
        };
        trace!(?event, "pager scrolled");
        self.emit(event);
    }

    fn emit(&mut self, event: PageEvent) {
        self.listeners.retain(|tx| tx.send(event).is_ok());
    }
}

impl PageHost for Pager {
    fn adapter(&self) -> Option<&dyn PageSource> {
        self.adapter.as_deref()
    }

    fn current_item(&self) -> usize {
        self.current_item
    }

    fn subscribe(&mut self) -> PageLink {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        self.listeners.push(tx);
        PageLink {
            events: rx,
            commands: self.commands_tx.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StaticPages;

    fn pager() -> Pager {
        Pager::new()
            .with_adapter(StaticPages::from_titles(["A", "B", "C"]))
            .with_page_width(10)
    }

    #[test]
    fn settle_reports_scroll_and_idle() {
        let mut pager = pager();
        let mut link = pager.subscribe();

        pager.set_current_item(1);
        pager.tick(Duration::from_millis(125));
        pager.tick(Duration::from_millis(200));

        let events = link.drain();
        assert_eq!(
            events[0],
            PageEvent::ScrollStateChanged(ScrollState::Settling)
        );
        assert_eq!(events[1], PageEvent::PageSelected(1));
        assert_eq!(
            events[2],
            PageEvent::Scrolled {
                position: 0,
                offset: 0.5,
                offset_pixels: 5
            }
        );
        assert_eq!(
            events[3],
            PageEvent::Scrolled {
                position: 1,
                offset: 0.0,
                offset_pixels: 0
            }
        );
        assert_eq!(events[4], PageEvent::ScrollStateChanged(ScrollState::Idle));
        assert_eq!(pager.current_item(), 1);
    }

    #[test]
    fn drag_settles_on_nearest_page() {
        let mut pager = pager();
        pager.begin_drag();
        pager.drag_by(1.75);
        pager.end_drag();
        assert_eq!(pager.current_item(), 2);
        pager.tick(Duration::from_secs(1));
        assert_eq!(pager.scroll_state(), ScrollState::Idle);
        assert_eq!(pager.scroll_position(), 2.0);
    }

    #[test]
    fn drag_is_clamped_to_pages() {
        let mut pager = pager();
        pager.begin_drag();
        pager.drag_by(-3.0);
        assert_eq!(pager.scroll_position(), 0.0);
        pager.drag_by(10.0);
        assert_eq!(pager.scroll_position(), 2.0);
    }

    #[test]
    fn commands_from_link_select_pages() {
        let mut pager = pager();
        let link = pager.subscribe();
        link.commands
            .send(PageCommand::SetCurrentItem(2))
            .expect("pager alive");
        pager.tick(Duration::ZERO);
        assert_eq!(pager.current_item(), 2);
    }

    #[test]
    fn dropped_links_are_pruned() {
        let mut pager = pager();
        let link = pager.subscribe();
        drop(link);
        pager.set_current_item(1);
        assert!(pager.listeners.is_empty());
    }
}
