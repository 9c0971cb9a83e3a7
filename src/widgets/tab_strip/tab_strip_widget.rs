// pager-tab-strip/src/widgets/tab_strip/tab_strip_widget.rs
use std::time::Duration;

use ratatui::{
    buffer::Buffer,
    crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind},
    layout::{Position, Rect},
    style::{Color, Style},
};
use tracing::{debug, warn};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::{
    SavedState, StripState, StyleConfig, TabBounds, TabGeometry, TabKind, TabLayout, TabRegistry,
    TabStripError, TabStripResult, TabView, TintAnimator, TypefaceStyle, indicator,
    tab_content_width,
};
use crate::{PageChangeListener, PageCommand, PageHost, PageLink, TuiWidget, tui_theme};

/// Runs once, on the first layout pass after the tabs were rebuilt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingLayout {
    current_item: usize,
}

/// A horizontally scrolling strip of tabs kept in sync with a paged view.
///
/// The strip listens to its [`PageHost`] through a [`PageLink`]: scroll
/// events move the indicator line under the tabs and scroll the strip so the
/// selected tab stays in view. Clicking a tab (or using the arrow keys when
/// focused) asks the host to change page.
///
/// # Example
///
/// ```
/// use pager_tab_strip::{Pager, StaticPages, TabStrip};
///
/// let mut pager = Pager::new().with_adapter(StaticPages::from_titles(["One", "Two", "Three"]));
/// let mut strip = TabStrip::new();
/// strip.set_view_pager(&mut pager).unwrap();
/// assert_eq!(strip.tab_count(), 3);
/// ```
pub struct TabStrip {
    pub(super) style: StyleConfig,
    pub(super) registry: TabRegistry,
    pub(super) layout: Option<TabLayout>,
    pub(super) state: StripState,
    /// Applied horizontal scroll, clamped to the content.
    pub(super) scroll_x: i32,
    pub(super) tint: Option<TintAnimator>,
    pub(super) delegate: Option<Box<dyn PageChangeListener + Send + Sync>>,
    pub(super) redraw_requested: bool,
    icon_color_filter: Option<Color>,
    link: Option<PageLink>,
    pending_layout: Option<PendingLayout>,
    layout_requested: bool,
    screen_width: u16,
    preview_mode: bool,
    is_focused: bool,
    area: Rect,
}

impl std::fmt::Debug for TabStrip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TabStrip")
            .field("state", &self.state)
            .field("scroll_x", &self.scroll_x)
            .field("tabs", &self.registry.len())
            .field("tint", &self.tint.is_some())
            .field("delegate", &self.delegate.is_some())
            .field("linked", &self.link.is_some())
            .field("is_focused", &self.is_focused)
            .finish()
    }
}

impl Default for TabStrip {
    fn default() -> Self {
        Self::new()
    }
}

impl TabStrip {
    pub fn new() -> Self {
        Self {
            style: StyleConfig::default(),
            registry: TabRegistry::default(),
            layout: None,
            state: StripState::default(),
            scroll_x: 0,
            tint: None,
            delegate: None,
            redraw_requested: true,
            icon_color_filter: None,
            link: None,
            pending_layout: None,
            layout_requested: true,
            screen_width: 0,
            preview_mode: false,
            is_focused: false,
            area: Rect::default(),
        }
    }

    /* ******************************************************************
     * Binding to the pages
     * *****************************************************************/

    /// Binds the strip to `host` and builds one tab per page.
    ///
    /// Fails when the host has no page source yet.
    pub fn set_view_pager<H: PageHost + ?Sized>(&mut self, host: &mut H) -> TabStripResult<()> {
        if host.adapter().is_none() {
            return Err(TabStripError::MissingAdapter);
        }
        self.link = Some(host.subscribe());
        self.screen_width = ratatui::crossterm::terminal::size().map_or(0, |(w, _)| w);
        self.notify_data_set_changed(&*host)
    }

    /// Drops the link to the host; no further page events are received.
    pub fn detach(&mut self) {
        self.link = None;
    }

    pub fn is_attached(&self) -> bool {
        self.link.is_some()
    }

    /// Listener that receives every page event after the strip handled it,
    /// with the arguments unchanged.
    pub fn set_on_page_change_listener(
        &mut self,
        listener: impl PageChangeListener + Send + Sync + 'static,
    ) {
        self.delegate = Some(Box::new(listener));
    }

    /// Rebuilds every tab from the host's page source.
    ///
    /// The scroll is brought back to the host's current page on the next
    /// layout pass.
    pub fn notify_data_set_changed<H: PageHost + ?Sized>(&mut self, host: &H) -> TabStripResult<()> {
        let adapter = host.adapter().ok_or(TabStripError::MissingAdapter)?;

        self.registry = TabRegistry::build(
            adapter,
            self.style.icon_size,
            self.style.text_color,
            self.icon_color_filter,
        );
        self.registry.apply_styles(&self.style);
        self.state.tab_count = self.registry.len();
        self.state.current_position = self
            .state
            .current_position
            .min(self.state.tab_count.saturating_sub(1));
        if let Some(tint) = &mut self.tint {
            tint.reset_targets();
        }

        self.pending_layout = Some(PendingLayout {
            current_item: host.current_item(),
        });
        self.request_layout();
        debug!(tabs = self.state.tab_count, "tab strip rebuilt");
        Ok(())
    }

    /// Handles every page event the host has queued.
    pub fn process_page_events(&mut self) {
        let events = match &mut self.link {
            Some(link) => link.drain(),
            None => return,
        };
        for event in events {
            self.on_page_event(event);
        }
    }

    /// Asks the host to show page `index`.
    pub fn select_tab(&mut self, index: usize) {
        if index >= self.state.tab_count {
            return;
        }
        let Some(link) = &self.link else {
            return;
        };
        if link.commands.send(PageCommand::SetCurrentItem(index)).is_err() {
            warn!(index, "page host is gone, dropping tab selection");
        }
    }

    /* ******************************************************************
     * State
     * *****************************************************************/

    pub fn tab_count(&self) -> usize {
        self.state.tab_count
    }

    pub fn current_position(&self) -> usize {
        self.state.current_position
    }

    pub fn current_offset(&self) -> f32 {
        self.state.current_offset
    }

    pub fn strip_state(&self) -> StripState {
        self.state
    }

    /// Applied scroll of the strip, in columns.
    pub fn scroll_x(&self) -> i32 {
        self.scroll_x
    }

    /// Last requested scroll, before it was clamped to the content.
    pub fn last_scroll_x(&self) -> i32 {
        self.state.last_scroll_x
    }

    pub fn registry(&self) -> &TabRegistry {
        &self.registry
    }

    pub fn tab_layout(&self) -> Option<&TabLayout> {
        self.layout.as_ref()
    }

    pub fn tint(&self) -> Option<&TintAnimator> {
        self.tint.as_ref()
    }

    pub fn save_state(&self) -> SavedState {
        SavedState {
            current_position: self.state.current_position,
        }
    }

    /// Restores a saved position; takes effect from the next layout pass.
    pub fn restore_state(&mut self, saved: SavedState) {
        self.state.current_position = saved.current_position;
        self.request_layout();
    }

    /// Shows `value` on the badge of tab `index`; zero hides the badge.
    pub fn update_notification_counter(&mut self, index: usize, value: u32) -> TabStripResult<()> {
        self.registry.badge_mut(index)?.set_count(value);
        self.request_layout();
        Ok(())
    }

    fn request_layout(&mut self) {
        self.layout_requested = true;
        self.redraw_requested = true;
    }

    fn invalidate(&mut self) {
        self.redraw_requested = true;
    }

    fn update_tab_styles(&mut self) {
        self.registry.apply_styles(&self.style);
        self.request_layout();
    }

    /* ******************************************************************
     * Appearance
     * *****************************************************************/

    pub fn with_style(mut self, style: StyleConfig) -> Self {
        self.set_style_config(style);
        self
    }

    pub fn set_style_config(&mut self, style: StyleConfig) {
        self.style = style;
        self.update_tab_styles();
    }

    pub fn style_config(&self) -> &StyleConfig {
        &self.style
    }

    pub fn set_indicator_color(&mut self, color: Color) {
        self.style.indicator_color = color;
        self.invalidate();
    }

    /// Sets the indicator color from a theme resource name.
    pub fn set_indicator_color_resource(&mut self, name: &str) -> TabStripResult<()> {
        let color = tui_theme::color_resource(name)
            .ok_or_else(|| TabStripError::UnknownColorResource(name.to_owned()))?;
        self.set_indicator_color(color);
        Ok(())
    }

    pub fn indicator_color(&self) -> Color {
        self.style.indicator_color
    }

    pub fn set_indicator_height(&mut self, rows: u16) {
        self.style.indicator_height = rows;
        self.request_layout();
    }

    pub fn indicator_height(&self) -> u16 {
        self.style.indicator_height
    }

    pub fn set_underline_color(&mut self, color: Color) {
        self.style.underline_color = color;
        self.invalidate();
    }

    pub fn set_underline_color_resource(&mut self, name: &str) -> TabStripResult<()> {
        let color = tui_theme::color_resource(name)
            .ok_or_else(|| TabStripError::UnknownColorResource(name.to_owned()))?;
        self.set_underline_color(color);
        Ok(())
    }

    pub fn underline_color(&self) -> Color {
        self.style.underline_color
    }

    pub fn set_underline_height(&mut self, rows: u16) {
        self.style.underline_height = rows;
        self.request_layout();
    }

    pub fn underline_height(&self) -> u16 {
        self.style.underline_height
    }

    pub fn set_divider_color(&mut self, color: Color) {
        self.style.divider_color = color;
        self.invalidate();
    }

    pub fn set_divider_color_resource(&mut self, name: &str) -> TabStripResult<()> {
        let color = tui_theme::color_resource(name)
            .ok_or_else(|| TabStripError::UnknownColorResource(name.to_owned()))?;
        self.set_divider_color(color);
        Ok(())
    }

    pub fn divider_color(&self) -> Color {
        self.style.divider_color
    }

    pub fn set_divider_padding(&mut self, rows: u16) {
        self.style.divider_padding = rows;
        self.invalidate();
    }

    pub fn divider_padding(&self) -> u16 {
        self.style.divider_padding
    }

    pub fn set_divider_width(&mut self, columns: u16) {
        self.style.divider_width = columns;
        self.invalidate();
    }

    pub fn divider_width(&self) -> u16 {
        self.style.divider_width
    }

    pub fn set_scroll_offset(&mut self, columns: u16) {
        self.style.scroll_offset = columns;
        self.invalidate();
    }

    pub fn scroll_offset(&self) -> u16 {
        self.style.scroll_offset
    }

    pub fn set_should_expand(&mut self, should_expand: bool) {
        self.style.should_expand = should_expand;
        self.request_layout();
    }

    pub fn should_expand(&self) -> bool {
        self.style.should_expand
    }

    pub fn set_all_caps(&mut self, all_caps: bool) {
        self.style.text_all_caps = all_caps;
        self.update_tab_styles();
    }

    pub fn is_text_all_caps(&self) -> bool {
        self.style.text_all_caps
    }

    pub fn set_text_color(&mut self, color: Color) {
        self.style.text_color = color;
        self.update_tab_styles();
    }

    pub fn set_text_color_resource(&mut self, name: &str) -> TabStripResult<()> {
        let color = tui_theme::color_resource(name)
            .ok_or_else(|| TabStripError::UnknownColorResource(name.to_owned()))?;
        self.set_text_color(color);
        Ok(())
    }

    pub fn text_color(&self) -> Color {
        self.style.text_color
    }

    pub fn set_typeface(&mut self, typeface: TypefaceStyle) {
        self.style.typeface = typeface;
        self.update_tab_styles();
    }

    pub fn typeface(&self) -> TypefaceStyle {
        self.style.typeface
    }

    pub fn set_tab_background(&mut self, background: Style) {
        self.style.tab_background = background;
        self.update_tab_styles();
    }

    pub fn tab_background(&self) -> Style {
        self.style.tab_background
    }

    pub fn set_tab_padding_left_right(&mut self, columns: u16) {
        self.style.tab_padding = columns;
        self.update_tab_styles();
    }

    pub fn tab_padding_left_right(&self) -> u16 {
        self.style.tab_padding
    }

    pub fn set_line_padding_from_bottom(&mut self, rows: u16) {
        self.style.line_padding_from_bottom = rows;
        self.request_layout();
    }

    pub fn line_padding_from_bottom(&self) -> u16 {
        self.style.line_padding_from_bottom
    }

    pub fn set_fit_window(&mut self, fit_window: bool) {
        self.style.fit_window = fit_window;
        self.request_layout();
    }

    pub fn is_fit_window(&self) -> bool {
        self.style.fit_window
    }

    /// Icon size for tabs built from now on.
    pub fn set_icon_size(&mut self, columns: u16) {
        self.style.icon_size = columns;
    }

    pub fn icon_size(&self) -> u16 {
        self.style.icon_size
    }

    /// Width used by fit-window tabs; read from the terminal when binding.
    pub fn set_screen_width(&mut self, width: u16) {
        self.screen_width = width;
        self.request_layout();
    }

    pub fn screen_width(&self) -> u16 {
        self.screen_width
    }

    /// Color filter for icons (and texts) of tabs built from now on.
    pub fn set_icon_color_filter(&mut self, color: Option<Color>) {
        self.icon_color_filter = color;
    }

    pub fn icon_color_filter(&self) -> Option<Color> {
        self.icon_color_filter
    }

    /// Enables the swipe tint: tabs fade from `inactive` to `active` as they
    /// are approached. `ramp` scales how the offset maps onto the ramps.
    pub fn set_color_filters(&mut self, active: Color, inactive: Color, ramp: Duration) {
        self.icon_color_filter = Some(inactive);
        self.tint = Some(TintAnimator::new(active, inactive, ramp));
    }

    /// Preview mode draws the tabs but none of the lines under them.
    pub fn set_preview_mode(&mut self, preview: bool) {
        self.preview_mode = preview;
        self.invalidate();
    }

    pub fn is_preview_mode(&self) -> bool {
        self.preview_mode
    }

    /* ******************************************************************
     * Layout and rendering
     * *****************************************************************/

    /// Lays the tabs out for `area` when needed, then runs the pending
    /// post-rebuild scroll once.
    pub fn layout(&mut self, area: Rect) {
        let stale = self.layout.is_none() || self.layout_requested || self.area != area;
        if stale {
            let layout = TabLayout::measure(
                &self.registry,
                &self.style,
                area.width,
                area.height,
                self.screen_width,
            );
            self.scroll_x = self.state.last_scroll_x.clamp(0, layout.max_scroll());
            self.layout = Some(layout);
            self.layout_requested = false;
            self.area = area;
        }

        if let Some(pending) = self.pending_layout.take() {
            self.state.current_position = pending
                .current_item
                .min(self.state.tab_count.saturating_sub(1));
            self.scroll_to_child(self.state.current_position, 0);
        }
    }

    fn render_tabs(&self, area: Rect, buf: &mut Buffer) {
        let Some(layout) = &self.layout else {
            return;
        };
        let content_rows = layout.content_rows().min(area.height);
        for (i, tab) in self.registry.iter().enumerate() {
            if let Some(bounds) = layout.bounds(i) {
                self.render_tab(tab, bounds, content_rows, area, buf);
            }
        }
    }

    fn render_tab(
        &self,
        tab: &TabView,
        bounds: TabBounds,
        content_rows: u16,
        area: Rect,
        buf: &mut Buffer,
    ) {
        let x0 = bounds.left - self.scroll_x;
        for row in 0..area.height {
            for col in x0.max(0)..(x0 + bounds.width()).min(area.width as i32) {
                if let Some(cell) = buf.cell_mut(Position::new(area.x + col as u16, area.y + row)) {
                    cell.set_style(tab.background);
                }
            }
        }

        let centered = |width: u16| x0 + (bounds.width() - width as i32) / 2;
        let middle_row = content_rows.saturating_sub(1) / 2;
        let text_style = tab.text.as_ref().map_or(Style::default(), |t| t.style);
        let icon_style = match tab.icon.as_ref().and_then(|i| i.tint) {
            Some(tint) => Style::default().fg(tint),
            None => Style::default().fg(self.style.text_color),
        };
        let text = tab.text.as_ref().map(|t| t.display()).unwrap_or_default();
        let glyph = tab.icon.as_ref().map_or("", |i| i.glyph.as_str());
        let icon_width = tab
            .icon
            .as_ref()
            .map_or(0, |i| i.size.max(glyph.width() as u16));

        match tab.kind() {
            TabKind::Text => {
                put_str(buf, area, centered(text.width() as u16), middle_row, &text, text_style);
            }
            TabKind::Icon => {
                put_str(buf, area, centered(glyph.width() as u16), middle_row, glyph, icon_style);
            }
            TabKind::IconWithText if content_rows >= 2 => {
                let top = (content_rows - 2) / 2;
                put_str(buf, area, centered(glyph.width() as u16), top, glyph, icon_style);
                put_str(buf, area, centered(text.width() as u16), top + 1, &text, text_style);
            }
            TabKind::IconWithText => {
                let start = centered(tab_content_width(tab, content_rows));
                put_str(buf, area, start, middle_row, glyph, icon_style);
                put_str(buf, area, start + icon_width as i32 + 1, middle_row, &text, text_style);
            }
            TabKind::TextWithNotification => {
                let start = centered(tab_content_width(tab, content_rows));
                put_str(buf, area, start, middle_row, &text, text_style);
                if let Some(badge) = tab.badge.filter(|b| b.is_visible()) {
                    let badge_style = Style::default().fg(tui_theme::BADGE_FG).bg(tui_theme::BADGE_BG);
                    let x = start + text.width() as i32 + 1;
                    put_str(buf, area, x, middle_row, &badge.text(), badge_style);
                }
            }
        }
    }

    fn previous_tab(&self) -> usize {
        self.state.current_position.saturating_sub(1)
    }

    fn next_tab(&self) -> usize {
        (self.state.current_position + 1).min(self.state.tab_count.saturating_sub(1))
    }
}

/// Writes `text` starting at column `x` (relative to `area`, may be
/// negative), dropping whatever falls outside the area.
fn put_str(buf: &mut Buffer, area: Rect, x: i32, row: u16, text: &str, style: Style) {
    if row >= area.height {
        return;
    }
    let mut x = x;
    for ch in text.chars() {
        let width = ch.width().unwrap_or(0) as i32;
        if width == 0 {
            continue;
        }
        if x >= area.width as i32 {
            break;
        }
        if x >= 0 && x + width <= area.width as i32 {
            let position = Position::new(area.x + x as u16, area.y + row);
            if let Some(cell) = buf.cell_mut(position) {
                cell.set_char(ch).set_style(style);
            }
        }
        x += width;
    }
}

impl TuiWidget for TabStrip {
    fn preprocess(&mut self) {
        self.process_page_events();
    }

    fn draw(&mut self, area: Rect, buf: &mut Buffer) {
        self.layout(area);
        if self.state.tab_count == 0 {
            self.redraw_requested = false;
            return;
        }

        self.render_tabs(area, buf);
        if let Some(layout) = &self.layout {
            let commands = indicator::draw_commands(
                &self.state,
                &self.style,
                layout,
                area.height,
                self.preview_mode,
            );
            indicator::paint(&commands, &self.style, area, self.scroll_x, buf);
        }
        self.redraw_requested = false;
    }

    fn key_event(&mut self, key: KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press || self.state.tab_count == 0 {
            return false;
        }

        match key.code {
            KeyCode::Left | KeyCode::BackTab => self.select_tab(self.previous_tab()),
            KeyCode::Right | KeyCode::Tab => self.select_tab(self.next_tab()),
            KeyCode::Home => self.select_tab(0),
            KeyCode::End => self.select_tab(self.state.tab_count - 1),
            KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::CONTROL) => {
                // Ctrl+1 selects the first tab
                match c.to_digit(10).map(|d| (d as usize).saturating_sub(1)) {
                    Some(idx) if idx < self.state.tab_count => self.select_tab(idx),
                    _ => return false,
                }
            }
            _ => return false,
        }
        true
    }

    fn mouse_event(&mut self, event: MouseEvent) -> bool {
        if event.kind != MouseEventKind::Down(MouseButton::Left) {
            return false;
        }
        if !self.area.contains(Position::new(event.column, event.row)) {
            return false;
        }
        let x = (event.column - self.area.x) as i32 + self.scroll_x;
        match self.layout.as_ref().and_then(|l| l.hit_test(x)) {
            Some(index) => {
                self.select_tab(index);
                true
            }
            None => false,
        }
    }

    fn focus(&mut self) {
        self.is_focused = true;
        self.invalidate();
    }

    fn unfocus(&mut self) {
        self.is_focused = false;
        self.invalidate();
    }

    fn is_focused(&self) -> bool {
        self.is_focused
    }

    fn need_draw(&self) -> bool {
        self.redraw_requested || self.layout_requested
    }
}
