// pager-tab-strip/src/widgets/tab_strip/tint.rs
use std::time::Duration;

use ratatui::style::Color;
use tracing::trace;

use super::TabRegistry;
use crate::tui_theme;

/// Linear per-channel RGB interpolation between two colors.
///
/// The ramp is scrubbed rather than played: callers set a play time within
/// `duration` and read the color at that point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorRamp {
    from: [u8; 3],
    to: [u8; 3],
    duration: Duration,
    value: Color,
}

impl ColorRamp {
    pub fn new(from: Color, to: Color, duration: Duration) -> Self {
        let from = tui_theme::to_rgb(from);
        Self {
            from,
            to: tui_theme::to_rgb(to),
            duration,
            value: Color::Rgb(from[0], from[1], from[2]),
        }
    }

    /// Color at fraction `t` of the ramp, clamped to `[0, 1]`.
    pub fn sample(&self, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        let channel = |a: u8, b: u8| {
            let a = a as f32;
            (a + (b as f32 - a) * t).round() as u8
        };
        Color::Rgb(
            channel(self.from[0], self.to[0]),
            channel(self.from[1], self.to[1]),
            channel(self.from[2], self.to[2]),
        )
    }

    /// Moves the ramp to `play_time` and returns the color there.
    pub fn set_current_play_time(&mut self, play_time: Duration) -> Color {
        let fraction = if self.duration.is_zero() {
            1.0
        } else {
            (play_time.as_secs_f64() / self.duration.as_secs_f64()) as f32
        };
        self.value = self.sample(fraction);
        self.value
    }

    /// Play time a swipe `progress` in `[0, 1]` maps to, truncated to whole
    /// milliseconds.
    pub fn play_time_for(&self, progress: f32) -> Duration {
        Duration::from_millis((progress * self.duration.as_millis() as f32) as u64)
    }

    pub fn value(&self) -> Color {
        self.value
    }
}

/// Element ordinals the tint is currently writing to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TintTargets {
    pub current_icon: Option<usize>,
    pub next_icon: Option<usize>,
    pub current_text: Option<usize>,
    pub next_text: Option<usize>,
}

/// Crossfades tab icons and texts between an inactive and an active color
/// as the pages are swiped.
///
/// The tab being left receives the untint ramp, the tab being approached the
/// tint ramp. On a backward swipe the roles of `position` and `position + 1`
/// swap and both ramps run from `1 - offset`; this asymmetry is the long
/// standing behavior and is kept as is.
#[derive(Debug, Clone)]
pub struct TintAnimator {
    active: Color,
    inactive: Color,
    duration: Duration,
    tint: ColorRamp,
    untint: ColorRamp,
    targets: TintTargets,
    previous_offset: f32,
    rest_color: Color,
}

impl TintAnimator {
    pub fn new(active: Color, inactive: Color, duration: Duration) -> Self {
        Self {
            active,
            inactive,
            duration,
            tint: ColorRamp::new(inactive, active, duration),
            untint: ColorRamp::new(active, inactive, duration),
            targets: TintTargets::default(),
            previous_offset: 0.0,
            rest_color: tui_theme::TINT_REST_FG,
        }
    }

    pub fn active(&self) -> Color {
        self.active
    }

    pub fn inactive(&self) -> Color {
        self.inactive
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn tint_ramp(&self) -> &ColorRamp {
        &self.tint
    }

    pub fn untint_ramp(&self) -> &ColorRamp {
        &self.untint
    }

    pub fn targets(&self) -> TintTargets {
        self.targets
    }

    /// Forgets element targets, which become stale when tabs are rebuilt.
    pub fn reset_targets(&mut self) {
        self.targets = TintTargets::default();
        self.previous_offset = 0.0;
    }

    pub fn on_offset_changed(&mut self, position: usize, offset: f32, registry: &mut TabRegistry) {
        let delta = if offset != 0.0 {
            offset - self.previous_offset
        } else {
            0.0
        };
        self.previous_offset = offset;

        if delta > 0.0 {
            self.retarget(registry, position, position + 1);
            let play_time = self.tint.play_time_for(offset);
            self.apply(play_time, registry);
        } else if delta < 0.0 {
            self.retarget(registry, position + 1, position);
            let play_time = self.tint.play_time_for(1.0 - offset);
            self.apply(play_time, registry);
        } else {
            trace!(position, "tint at rest");
            if registry.icon_count() > 0 {
                registry.set_icon_tint(position, self.rest_color);
            }
            if registry.text_count() > 0 {
                registry.set_text_color(position, self.rest_color);
            }
        }
    }

    fn retarget(&mut self, registry: &TabRegistry, current: usize, next: usize) {
        if registry.icon_count() > 0 {
            self.targets.current_icon = Some(current);
            self.targets.next_icon = Some(next);
        }
        if registry.text_count() > 0 {
            self.targets.current_text = Some(current);
            self.targets.next_text = Some(next);
        }
    }

    fn apply(&mut self, play_time: Duration, registry: &mut TabRegistry) {
        let tinted = self.tint.set_current_play_time(play_time);
        let untinted = self.untint.set_current_play_time(play_time);
        let targets = self.targets;

        if let Some(next) = targets.next_icon {
            registry.set_icon_tint(next, tinted);
        }
        if let Some(next) = targets.next_text {
            registry.set_text_color(next, tinted);
        }
        if let Some(current) = targets.current_icon {
            registry.set_icon_tint(current, untinted);
        }
        if let Some(current) = targets.current_text {
            registry.set_text_color(current, untinted);
        }
    }
}
