// pager-tab-strip/demos/tab_strip_demo.rs
use std::{
    fs::File,
    path::{Path, PathBuf},
    sync::Mutex,
    time::Duration,
};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use rand::Rng;
use ratatui::{
    crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind},
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};
use tokio_util::sync::CancellationToken;
use tracing::{Level, info, warn};

use pager_tab_strip::{
    IconRef, PageHost, PageSource, Pager, SavedState, ScrollState, StaticPages, StyleConfig,
    TabStrip, Tui, TuiApp, TuiWidget, tui_theme,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TabMode {
    Text,
    Icons,
    IconText,
    Notifications,
}

/// Swipe between pages and watch the tab strip follow.
#[derive(Debug, Parser)]
struct Args {
    /// What the tabs show.
    #[arg(long, value_enum, default_value_t = TabMode::Text)]
    mode: TabMode,

    /// Number of pages.
    #[arg(long, default_value_t = 8)]
    pages: usize,

    /// Fade tabs between two colors while swiping.
    #[arg(long)]
    tint: bool,

    /// Spread the tabs over the whole width when they are narrower.
    #[arg(long)]
    expand: bool,

    /// JSON style config to apply to the strip.
    #[arg(long)]
    style: Option<PathBuf>,

    /// Where to write the log.
    #[arg(long, default_value = "tab-strip.log")]
    log_file: PathBuf,

    #[arg(long, default_value_t = Level::DEBUG)]
    log_level: Level,
}

fn page_source(mode: TabMode, count: usize) -> StaticPages {
    const ICONS: [&str; 6] = [
        tui_theme::ICON_HOME,
        tui_theme::ICON_STAR,
        tui_theme::ICON_MAIL,
        tui_theme::ICON_GEAR,
        tui_theme::ICON_MUSIC,
        tui_theme::ICON_HEART,
    ];
    let title = |i: usize| format!("page {}", i + 1);

    match mode {
        TabMode::Text => StaticPages::from_titles((0..count).map(title)),
        TabMode::Icons => (0..count).fold(StaticPages::new(), |pages, i| {
            pages.icon_page(IconRef::Resource(ICONS[i % ICONS.len()]), None)
        }),
        TabMode::IconText => (0..count).fold(StaticPages::new(), |pages, i| {
            let glyph = IconRef::Glyph(ICONS[i % ICONS.len()].to_owned());
            pages.icon_page(glyph, Some(&title(i)))
        }),
        TabMode::Notifications => (0..count).fold(StaticPages::new(), |pages, i| {
            if i % 2 == 0 {
                pages.notification_page(title(i))
            } else {
                pages.page(title(i))
            }
        }),
    }
}

struct TabStripDemo {
    pager: Pager,
    strip: TabStrip,
    mode: TabMode,
    unread: Vec<u32>,
    page_area: Rect,
    drag_from: Option<u16>,
    saved: Option<SavedState>,
    run_token: CancellationToken,
    dirty: bool,
}

impl TabStripDemo {
    fn new(args: &Args, run_token: CancellationToken) -> Result<Self> {
        let mut pager = Pager::new().with_adapter(page_source(args.mode, args.pages));
        let mut strip = TabStrip::new();

        if let Some(path) = &args.style {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading style config {}", path.display()))?;
            strip.set_style_config(StyleConfig::from_json(&json)?);
        }
        strip.set_should_expand(args.expand);
        if args.tint {
            strip.set_color_filters(Color::Cyan, tui_theme::GRAY3_FG, Duration::from_millis(1000));
        }
        strip.set_view_pager(&mut pager)?;
        strip.focus();

        Ok(Self {
            pager,
            strip,
            mode: args.mode,
            unread: vec![0; args.pages],
            page_area: Rect::default(),
            drag_from: None,
            saved: None,
            run_token,
            dirty: true,
        })
    }

    fn nudge(&mut self, pages: f32) {
        self.pager.begin_drag();
        self.pager.drag_by(pages);
        self.dirty = true;
    }

    fn new_mail(&mut self) {
        if !matches!(self.mode, TabMode::Notifications) || self.unread.is_empty() {
            return;
        }
        let index = rand::thread_rng().gen_range(0..self.unread.len()) & !1;
        self.unread[index] += 1;
        if let Err(err) = self.strip.update_notification_counter(index, self.unread[index]) {
            warn!(%err, index, "could not update counter");
        }
    }

    fn read_current(&mut self) {
        let index = self.pager.current_item();
        if self.unread.get(index).is_some_and(|&n| n > 0) {
            self.unread[index] = 0;
            let _ = self.strip.update_notification_counter(index, 0);
        }
    }

    /// Tears the strip down and builds a new one from the saved state.
    fn recreate_strip(&mut self) -> Result<()> {
        let saved = self.strip.save_state();
        let style = self.strip.style_config().clone();
        let mut strip = TabStrip::new().with_style(style);
        strip.restore_state(saved);
        strip.set_view_pager(&mut self.pager)?;
        strip.focus();
        self.strip = strip;
        self.saved = Some(saved);
        info!(?saved, "tab strip recreated");
        Ok(())
    }

    fn render_page(&self, frame: &mut pager_tab_strip::TerminalFrame) {
        let position = self.pager.scroll_position();
        let current = self.pager.current_item();
        let title = self
            .pager
            .adapter()
            .and_then(|pages| pages.page_title(current))
            .unwrap_or_else(|| format!("page {}", current + 1));

        let mut lines = vec![
            Line::from(format!("scroll position: {position:.2} pages")),
            Line::from(format!("scroll state:    {:?}", self.pager.scroll_state())),
            Line::from(format!(
                "strip:           position {} offset {:.2} scroll {} (requested {})",
                self.strip.current_position(),
                self.strip.current_offset(),
                self.strip.scroll_x(),
                self.strip.last_scroll_x(),
            )),
            Line::from(""),
            Line::from("←/→ tabs · h/l swipe · drag pages · r recreate strip · n mail · ctrl+q quit"),
        ];
        if let Some(saved) = self.saved {
            lines.push(Line::from(format!("restored at {}", saved.current_position)));
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(tui_theme::BORDER_DEFAULT));
        frame.render_widget(Paragraph::new(lines).block(block), self.page_area);
    }
}

impl TuiApp for TabStripDemo {
    fn should_draw(&mut self) -> bool {
        self.dirty || self.strip.need_draw() || self.pager.scroll_state() != ScrollState::Idle
    }

    fn tick(&mut self, dt: Duration) {
        self.pager.tick(dt);
        self.strip.preprocess();
        if self.pager.scroll_state() == ScrollState::Idle {
            self.read_current();
        }
    }

    fn render(&mut self, frame: &mut pager_tab_strip::TerminalFrame) {
        let [strip_area, page_area] =
            Layout::vertical([Constraint::Length(3), Constraint::Fill(1)]).areas(frame.area());
        self.page_area = page_area;
        self.pager.set_page_width(page_area.width);

        self.strip.draw(strip_area, frame.buffer_mut());
        self.render_page(frame);
        self.dirty = false;
    }

    fn should_quit(&self) -> bool {
        self.run_token.is_cancelled()
    }

    fn handle_key_events(&mut self, keys: Vec<KeyEvent>) {
        for key in keys {
            match key.code {
                KeyCode::Char('q') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    self.run_token.cancel();
                }
                KeyCode::Char('h') => self.nudge(-0.25),
                KeyCode::Char('l') => self.nudge(0.25),
                KeyCode::Char(' ') => self.pager.end_drag(),
                KeyCode::Char('n') => self.new_mail(),
                KeyCode::Char('r') => {
                    if let Err(err) = self.recreate_strip() {
                        warn!(%err, "could not recreate tab strip");
                    }
                }
                _ => {
                    self.strip.key_event(key);
                }
            }
            self.dirty = true;
        }
    }

    fn handle_mouse_events(&mut self, events: Vec<MouseEvent>) {
        for event in events {
            let width = self.page_area.width.max(1) as f32;
            match event.kind {
                MouseEventKind::Down(MouseButton::Left) if event.row >= self.page_area.y => {
                    self.drag_from = Some(event.column);
                    self.pager.begin_drag();
                }
                MouseEventKind::Drag(MouseButton::Left) => {
                    if let Some(from) = self.drag_from.replace(event.column) {
                        // dragging left reveals the next page
                        self.pager.drag_by((from as f32 - event.column as f32) / width);
                    }
                }
                MouseEventKind::Up(MouseButton::Left) if self.drag_from.take().is_some() => {
                    self.pager.end_drag();
                }
                MouseEventKind::ScrollRight => self.nudge(0.1),
                MouseEventKind::ScrollLeft => self.nudge(-0.1),
                _ => {
                    self.strip.mouse_event(event);
                }
            }
            self.dirty = true;
        }
    }
}

fn init_logging(path: &Path, level: Level) -> Result<()> {
    // the terminal belongs to the UI, so logs go to a file
    let log_file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(log_file))
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_file, args.log_level)?;

    let run_token = CancellationToken::new();
    let app = TabStripDemo::new(&args, run_token.clone())?;
    let app = Tui::new()?.run(app)?;

    info!(position = app.strip.current_position(), "demo finished");
    Ok(())
}
