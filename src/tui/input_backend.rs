// pager-tab-strip/src/tui/input_backend.rs
use std::time::Duration;

use anyhow::{Result, anyhow};
use crossterm::event::{
    Event as CrosstermEvent, EventStream, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent,
    MouseEventKind,
};
use futures::{FutureExt, StreamExt};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::trace;

/// Input gathered since the previous flush, in arrival order per kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputBatch {
    pub keys: Vec<KeyEvent>,
    pub mouse: Vec<MouseEvent>,
}

impl InputBatch {
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty() && self.mouse.is_empty()
    }

    fn extend(&mut self, other: InputBatch) {
        self.keys.extend(other.keys);
        self.mouse.extend(other.mouse);
    }
}

#[derive(Clone, Copy, Debug)]
pub struct InputBackendOpts {
    key_buffer: usize,
    mouse_buffer: usize,
    tick_rate: Duration,
    flush_cap: usize,
}

impl Default for InputBackendOpts {
    fn default() -> Self {
        Self {
            key_buffer: 5,
            mouse_buffer: 8,
            tick_rate: Duration::from_millis(16),
            flush_cap: 512,
        }
    }
}

impl InputBackendOpts {
    pub fn with_tick_rate(mut self, tick_rate: Duration) -> Self {
        self.tick_rate = tick_rate;
        self
    }
}

/// Reads terminal input on a tokio task and hands it to the UI loop in
/// batches.
pub struct InputHandler {
    batch_rx: UnboundedReceiver<InputBatch>,
    task_handle: Option<JoinHandle<JoinHandle<()>>>,
    cancel: CancellationToken,
    backend: Option<InputBackend>,
    opts: InputBackendOpts,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::with_opts(InputBackendOpts::default())
    }

    pub fn with_opts(opts: InputBackendOpts) -> Self {
        let (batch_tx, batch_rx) = tokio::sync::mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        Self {
            batch_rx,
            task_handle: None,
            backend: Some(InputBackend::new(opts, batch_tx, cancel.clone())),
            opts,
            cancel,
        }
    }

    pub fn is_running(&self) -> bool {
        !self.cancel.is_cancelled()
    }

    pub fn start(&mut self) -> Result<()> {
        let backend = self
            .backend
            .take()
            .ok_or(anyhow!("input handler already started"))?;

        self.task_handle = Some(tokio::task::spawn_blocking(move || {
            tokio::spawn(backend.run())
        }));
        Ok(())
    }

    pub fn stop(&mut self) {
        self.cancel.cancel();
        if let Some(handle) = self.task_handle.take() {
            handle.abort();
        }
    }

    /// Everything that is ready right now, or `None` when nothing is.
    pub fn flush_events(&mut self) -> Option<InputBatch> {
        if !self.is_running() {
            return None;
        }

        let mut batch = InputBatch::default();
        while let Ok(next) = self.batch_rx.try_recv() {
            batch.extend(next);
            if batch.keys.len() + batch.mouse.len() > self.opts.flush_cap {
                break;
            }
        }
        (!batch.is_empty()).then_some(batch)
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Folds a run of mouse events: consecutive drags with the same button
/// collapse into the latest one, horizontal wheel ticks are summed until the
/// next tick of the backend.
#[derive(Debug, Default)]
struct MouseCoalescer {
    pending: Vec<MouseEvent>,
    wheel_delta: i32, // +N right, -N left
}

impl MouseCoalescer {
    fn push(&mut self, event: MouseEvent) {
        match event.kind {
            MouseEventKind::ScrollLeft => self.wheel_delta -= 1,
            MouseEventKind::ScrollRight => self.wheel_delta += 1,
            MouseEventKind::Drag(button) => match self.pending.last_mut() {
                Some(last) if last.kind == MouseEventKind::Drag(button) => *last = event,
                _ => self.pending.push(event),
            },
            _ => self.pending.push(event),
        }
    }

    fn len(&self) -> usize {
        self.pending.len()
    }

    /// Drained events, with the summed wheel delta turned back into ticks.
    fn take(&mut self) -> Vec<MouseEvent> {
        let mut events = std::mem::take(&mut self.pending);
        if self.wheel_delta != 0 {
            let kind = if self.wheel_delta > 0 {
                MouseEventKind::ScrollRight
            } else {
                MouseEventKind::ScrollLeft
            };
            for _ in 0..self.wheel_delta.unsigned_abs() {
                events.push(MouseEvent {
                    kind,
                    column: 0,
                    row: 0,
                    modifiers: KeyModifiers::NONE,
                });
            }
            self.wheel_delta = 0;
        }
        events
    }
}

struct InputBackend {
    tx: UnboundedSender<InputBatch>,
    keys: Vec<KeyEvent>,
    mouse: MouseCoalescer,
    cancel: CancellationToken,
    event_reader: EventStream,
    interval: tokio::time::Interval,
    opts: InputBackendOpts,
}

impl InputBackend {
    fn new(opts: InputBackendOpts, tx: UnboundedSender<InputBatch>, cancel: CancellationToken) -> Self {
        Self {
            tx,
            keys: Vec::with_capacity(opts.key_buffer),
            mouse: MouseCoalescer::default(),
            cancel,
            event_reader: EventStream::new(),
            interval: tokio::time::interval(opts.tick_rate),
            opts,
        }
    }

    /// Push the current buffers through the channel in one packet.
    fn flush(&mut self) {
        let batch = InputBatch {
            keys: std::mem::take(&mut self.keys),
            mouse: self.mouse.take(),
        };
        if batch.is_empty() {
            return;
        }
        trace!(keys = batch.keys.len(), mouse = batch.mouse.len(), "input flushed");
        let _ = self.tx.send(batch);
    }

    async fn run(mut self) {
        loop {
            if self.cancel.is_cancelled() {
                break;
            }

            tokio::select! {
                maybe_event = self.event_reader.next().fuse() => {
                    match maybe_event {
                        Some(Ok(CrosstermEvent::Mouse(event))) => {
                            self.mouse.push(event);
                            if self.mouse.len() >= self.opts.mouse_buffer {
                                self.flush();
                            }
                        }
                        Some(Ok(CrosstermEvent::Key(event))) if event.kind == KeyEventKind::Press => {
                            self.keys.push(event);
                            if self.keys.len() >= self.opts.key_buffer {
                                self.flush();
                            }
                        }
                        Some(_) => {} // releases, resizes, focus changes
                        None => break,
                    }
                }
                _ = self.cancel.cancelled() => break,
                _ = self.interval.tick() => self.flush(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::MouseButton;

    fn mouse(kind: MouseEventKind, column: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row: 0,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn drags_collapse_into_the_latest() {
        let mut coalescer = MouseCoalescer::default();
        coalescer.push(mouse(MouseEventKind::Down(MouseButton::Left), 1));
        coalescer.push(mouse(MouseEventKind::Drag(MouseButton::Left), 2));
        coalescer.push(mouse(MouseEventKind::Drag(MouseButton::Left), 5));
        coalescer.push(mouse(MouseEventKind::Drag(MouseButton::Left), 9));
        coalescer.push(mouse(MouseEventKind::Up(MouseButton::Left), 9));

        let events = coalescer.take();
        assert_eq!(events.len(), 3);
        assert_eq!(events[1].column, 9);
        assert!(coalescer.take().is_empty());
    }

    #[test]
    fn horizontal_wheel_is_summed() {
        let mut coalescer = MouseCoalescer::default();
        coalescer.push(mouse(MouseEventKind::ScrollRight, 0));
        coalescer.push(mouse(MouseEventKind::ScrollRight, 0));
        coalescer.push(mouse(MouseEventKind::ScrollLeft, 0));
        coalescer.push(mouse(MouseEventKind::ScrollRight, 0));

        let events = coalescer.take();
        assert_eq!(events.len(), 2);
        assert!(events.iter().all(|e| e.kind == MouseEventKind::ScrollRight));
    }

    #[test]
    fn batches_merge_in_arrival_order() {
        let mut batch = InputBatch::default();
        assert!(batch.is_empty());
        batch.extend(InputBatch {
            keys: vec![KeyEvent::from(crossterm::event::KeyCode::Left)],
            mouse: vec![],
        });
        batch.extend(InputBatch {
            keys: vec![KeyEvent::from(crossterm::event::KeyCode::Right)],
            mouse: vec![mouse(MouseEventKind::Moved, 3)],
        });
        assert_eq!(batch.keys.len(), 2);
        assert_eq!(batch.keys[1].code, crossterm::event::KeyCode::Right);
        assert_eq!(batch.mouse.len(), 1);
    }
}
