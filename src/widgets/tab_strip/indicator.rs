// pager-tab-strip/src/widgets/tab_strip/indicator.rs
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::{Color, Style},
};

use super::{StripState, StyleConfig, TabGeometry};

/// A rectangle in strip content coordinates (columns, rows from the top of
/// the strip). `right` and `bottom` are exclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineRect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Underline {
        rect: LineRect,
        color: Color,
    },
    Divider {
        x: f32,
        top: f32,
        bottom: f32,
        width: f32,
        color: Color,
    },
    Indicator {
        rect: LineRect,
        color: Color,
    },
}

/// Left and right edges of the indicator for the given state.
///
/// While the pages are between `current_position` and the next one, both
/// edges slide linearly towards the next tab's edges.
pub fn indicator_span(state: &StripState, geometry: &dyn TabGeometry) -> Option<(f32, f32)> {
    let current = geometry.bounds(state.current_position)?;
    let mut left = current.left as f32;
    let mut right = current.right as f32;

    let offset = state.current_offset;
    if offset > 0.0 && state.current_position + 1 < state.tab_count {
        if let Some(next) = geometry.bounds(state.current_position + 1) {
            left = offset * next.left as f32 + (1.0 - offset) * left;
            right = offset * next.right as f32 + (1.0 - offset) * right;
        }
    }
    Some((left, right))
}

/// Decorations to draw under the tabs of a strip `height` rows tall.
///
/// The indicator comes last so it wins where it overlaps the underline.
pub fn draw_commands(
    state: &StripState,
    style: &StyleConfig,
    geometry: &dyn TabGeometry,
    height: u16,
    preview: bool,
) -> Vec<DrawCommand> {
    if preview || state.tab_count == 0 {
        return Vec::new();
    }
    let height = height as f32;
    let mut commands = Vec::with_capacity(state.tab_count + 1);

    commands.push(DrawCommand::Underline {
        rect: LineRect {
            left: 0.0,
            top: height - style.underline_height as f32,
            right: geometry.content_width() as f32,
            bottom: height,
        },
        color: style.underline_color,
    });

    let padding = style.divider_padding as f32;
    for i in 0..state.tab_count.saturating_sub(1) {
        if let Some(tab) = geometry.bounds(i) {
            commands.push(DrawCommand::Divider {
                x: tab.right as f32,
                top: padding,
                bottom: height - padding,
                width: style.divider_width as f32,
                color: style.divider_color,
            });
        }
    }

    if let Some((left, right)) = indicator_span(state, geometry) {
        let bottom = height - style.line_padding_from_bottom as f32;
        commands.push(DrawCommand::Indicator {
            rect: LineRect {
                left,
                top: bottom - style.indicator_height as f32,
                right,
                bottom,
            },
            color: style.indicator_color,
        });
    }
    commands
}

/// Rasterizes draw commands into `buf`.
///
/// Edges round to the nearest cell, `scroll_x` shifts content columns onto
/// the screen and anything outside `area` is clipped. A divider covers the
/// `width` columns just left of its x, inside the tab's trailing padding.
pub fn paint(
    commands: &[DrawCommand],
    style: &StyleConfig,
    area: Rect,
    scroll_x: i32,
    buf: &mut Buffer,
) {
    for command in commands {
        match command {
            DrawCommand::Underline { rect, color } => {
                fill(buf, area, scroll_x, rect, &style.underline_symbol, *color);
            }
            DrawCommand::Divider {
                x,
                top,
                bottom,
                width,
                color,
            } => {
                let rect = LineRect {
                    left: x - width,
                    top: *top,
                    right: *x,
                    bottom: *bottom,
                };
                fill(buf, area, scroll_x, &rect, &style.divider_symbol, *color);
            }
            DrawCommand::Indicator { rect, color } => {
                fill(buf, area, scroll_x, rect, &style.indicator_symbol, *color);
            }
        }
    }
}

fn fill(buf: &mut Buffer, area: Rect, scroll_x: i32, rect: &LineRect, symbol: &str, color: Color) {
    let left = rect.left.round() as i32 - scroll_x;
    let right = rect.right.round() as i32 - scroll_x;
    let top = rect.top.round().max(0.0) as i32;
    let bottom = (rect.bottom.round() as i32).min(area.height as i32);

    let left = left.max(0);
    let right = right.min(area.width as i32);
    let style = Style::default().fg(color);

    for row in top..bottom {
        for col in left..right {
            let position = Position::new(area.x + col as u16, area.y + row as u16);
            if let Some(cell) = buf.cell_mut(position) {
                cell.set_symbol(symbol).set_style(style);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{TabBounds, TabLayout};

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(buf.area.x + x, y)].symbol())
            .collect()
    }

    fn three_tabs() -> TabLayout {
        TabLayout::from_bounds(
            vec![
                TabBounds::new(0, 5),
                TabBounds::new(5, 11),
                TabBounds::new(11, 18),
            ],
            30,
        )
    }

    fn state(position: usize, offset: f32) -> StripState {
        StripState {
            tab_count: 3,
            current_position: position,
            current_offset: offset,
            last_scroll_x: 0,
        }
    }

    #[test]
    fn span_matches_tab_at_rest() {
        let layout = three_tabs();
        assert_eq!(indicator_span(&state(1, 0.0), &layout), Some((5.0, 11.0)));
    }

    #[test]
    fn span_blends_towards_next_tab() {
        let layout = three_tabs();
        assert_eq!(indicator_span(&state(0, 0.5), &layout), Some((2.5, 8.0)));

        for step in 0..100 {
            let offset = step as f32 / 100.0;
            let (left, right) = indicator_span(&state(0, offset), &layout).unwrap();
            assert!((0.0..=5.0).contains(&left));
            assert!((5.0..=11.0).contains(&right));
        }
        let (left, right) = indicator_span(&state(1, 0.9999), &layout).unwrap();
        assert!((left - 11.0).abs() < 0.01);
        assert!((right - 18.0).abs() < 0.01);
    }

    #[test]
    fn last_tab_ignores_offset() {
        let layout = three_tabs();
        assert_eq!(indicator_span(&state(2, 0.5), &layout), Some((11.0, 18.0)));
    }

    #[test]
    fn no_tabs_or_preview_draws_nothing() {
        let layout = TabLayout::default();
        let empty = StripState::default();
        assert!(draw_commands(&empty, &StyleConfig::default(), &layout, 3, false).is_empty());
        let layout = three_tabs();
        assert!(draw_commands(&state(0, 0.0), &StyleConfig::default(), &layout, 3, true).is_empty());
    }

    #[test]
    fn commands_cover_underline_dividers_and_indicator() {
        let layout = three_tabs();
        let style = StyleConfig {
            indicator_height: 2,
            line_padding_from_bottom: 1,
            divider_padding: 1,
            ..StyleConfig::default()
        };
        let commands = draw_commands(&state(0, 0.0), &style, &layout, 4, false);
        assert_eq!(commands.len(), 4);
        assert!(matches!(
            commands[0],
            DrawCommand::Underline { rect, .. } if rect == LineRect { left: 0.0, top: 3.0, right: 30.0, bottom: 4.0 }
        ));
        assert!(matches!(
            commands[1],
            DrawCommand::Divider { x, top, bottom, .. } if x == 5.0 && top == 1.0 && bottom == 3.0
        ));
        assert!(matches!(commands[2], DrawCommand::Divider { x, .. } if x == 11.0));
        assert!(matches!(
            commands[3],
            DrawCommand::Indicator { rect, .. } if rect == LineRect { left: 0.0, top: 1.0, right: 5.0, bottom: 3.0 }
        ));
    }

    #[test]
    fn paint_draws_indicator_over_underline() {
        let layout = three_tabs();
        let style = StyleConfig {
            underline_symbol: "-".into(),
            indicator_symbol: "=".into(),
            divider_symbol: "|".into(),
            ..StyleConfig::default()
        };
        let area = Rect::new(0, 0, 20, 2);
        let mut buf = Buffer::empty(area);
        let commands = draw_commands(&state(1, 0.0), &style, &layout, 2, false);
        paint(&commands, &style, area, 0, &mut buf);

        assert_eq!(row(&buf, 0), "    |     |         ");
        assert_eq!(row(&buf, 1), "----|======---------");
    }

    #[test]
    fn paint_applies_scroll_and_clips() {
        let layout = three_tabs();
        let style = StyleConfig {
            underline_height: 0,
            indicator_symbol: "=".into(),
            divider_symbol: "|".into(),
            ..StyleConfig::default()
        };
        let area = Rect::new(0, 0, 6, 1);
        let mut buf = Buffer::empty(area);
        let commands = draw_commands(&state(2, 0.0), &style, &layout, 1, false);
        paint(&commands, &style, area, 10, &mut buf);
        assert_eq!(row(&buf, 0), "|=====");
    }
}
