// pager-tab-strip/src/tui/tui_app.rs
use anyhow::Result;
use ratatui::{
    Terminal,
    crossterm::{
        event::{DisableMouseCapture, EnableMouseCapture, KeyEvent, MouseEvent},
        execute,
        terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
    },
    prelude::CrosstermBackend,
};
use std::{
    io::stdout,
    time::{Duration, Instant},
};
use tracing::debug;

use crate::tui::input_backend::{InputBatch, InputHandler};

pub trait TuiApp {
    fn render(&mut self, frame: &mut TerminalFrame);
    #[allow(unused)]
    fn handle_mouse_events(&mut self, mouse_events: Vec<MouseEvent>) {}
    fn handle_key_events(&mut self, keys_events: Vec<KeyEvent>);
    /// Advances animations by the time since the previous frame.
    #[allow(unused)]
    fn tick(&mut self, dt: Duration) {}
    fn before_frame(&mut self, #[allow(unused)] terminal: &TerminalBackend) {}
    fn after_frame(&mut self, #[allow(unused)] terminal: &TerminalBackend) {}
    fn should_quit(&self) -> bool;
    fn should_draw(&mut self) -> bool {
        true
    }
}
pub use ratatui::{buffer::Buffer, layout::Rect};

// Widget trait that all renderable components must implement
pub trait TuiWidget: Send + Sync {
    fn preprocess(&mut self) {}
    fn draw(&mut self, area: Rect, buf: &mut Buffer);
    fn key_event(&mut self, event: KeyEvent) -> bool; // Return true if handled
    #[allow(unused)]
    fn mouse_event(&mut self, event: MouseEvent) -> bool {
        false
    }
    fn focus(&mut self);
    fn unfocus(&mut self);
    fn is_focused(&self) -> bool;
    fn need_draw(&self) -> bool {
        true
    }
}

pub type TerminalBackend = ratatui::DefaultTerminal;
pub type TerminalFrame<'a> = ratatui::Frame<'a>;

// ~30 fps keeps a settling strip smooth
const DEFAULT_FRAME_TIME: Duration = Duration::from_millis(33);

pub struct Tui {
    input: Option<InputHandler>,
    frame_sync: bool,
    frame_length: Duration,
}

impl Tui {
    pub fn new() -> Result<Self> {
        Ok(Tui {
            input: Some(InputHandler::new()),
            frame_sync: true,
            frame_length: DEFAULT_FRAME_TIME,
        })
    }

    pub fn without_input_capture(mut self) -> Self {
        self.input = None;
        self
    }

    pub fn without_frame_sync(mut self) -> Self {
        self.frame_sync = false;
        self
    }

    pub fn with_frame_length(mut self, frame_time: Duration) -> Self {
        self.frame_length = frame_time;
        self
    }

    /// Runs `app` until it asks to quit, then restores the terminal and
    /// hands the app back.
    pub fn run<A: TuiApp>(mut self, mut app: A) -> Result<A> {
        enable_raw_mode()?;
        execute!(stdout(), EnterAlternateScreen, EnableMouseCapture)?;
        let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
        if let Some(handler) = &mut self.input {
            handler.start()?;
        }
        debug!(frame_length = ?self.frame_length, "terminal loop started");

        let mut last_size = ratatui::layout::Size::default();
        let mut last_tick = Instant::now();
        loop {
            let frame_start = Instant::now();
            if app.should_quit() {
                break;
            }

            app.before_frame(&terminal);

            if let Some(handler) = &mut self.input {
                if let Some(InputBatch { keys, mouse }) = handler.flush_events() {
                    if !keys.is_empty() {
                        app.handle_key_events(keys);
                    }
                    if !mouse.is_empty() {
                        app.handle_mouse_events(mouse);
                    }
                }
            }

            app.tick(last_tick.elapsed());
            last_tick = Instant::now();

            let frame_size = terminal.size().unwrap_or(last_size);
            let resized = frame_size != last_size;
            if app.should_draw() || resized {
                last_size = frame_size;
                terminal.draw(|frame| app.render(frame))?;
            }

            app.after_frame(&terminal);

            if self.frame_sync {
                let frame_elapsed = frame_start.elapsed();
                if frame_elapsed < self.frame_length {
                    std::thread::sleep(self.frame_length - frame_elapsed);
                }
            }
        }

        if let Some(handler) = &mut self.input {
            handler.stop();
        }

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
        debug!("terminal restored");

        Ok(app)
    }
}
