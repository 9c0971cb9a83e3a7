// pager-tab-strip/tests/strip_scenarios.rs
use std::time::Duration;

use pager_tab_strip::{
    IconRef, PageHost, Pager, SavedState, ScrollState, StaticPages, StyleConfig, TabGeometry,
    TabStrip, TabStripError, TuiWidget, tui_theme,
};
use ratatui::{
    buffer::Buffer,
    crossterm::event::{KeyModifiers, MouseButton, MouseEvent, MouseEventKind},
    layout::Rect,
    style::Color,
};

const FRAME: Duration = Duration::from_millis(50);

fn ascii_style() -> StyleConfig {
    StyleConfig {
        indicator_symbol: "=".into(),
        underline_symbol: "-".into(),
        divider_symbol: "|".into(),
        ..StyleConfig::default()
    }
}

fn row(buf: &Buffer, y: u16) -> String {
    (0..buf.area.width)
        .map(|x| buf[(buf.area.x + x, y)].symbol())
        .collect()
}

fn render(strip: &mut TabStrip, area: Rect) -> Buffer {
    let mut buf = Buffer::empty(area);
    strip.preprocess();
    strip.draw(area, &mut buf);
    buf
}

fn settle(pager: &mut Pager, strip: &mut TabStrip) {
    for _ in 0..200 {
        pager.tick(FRAME);
        strip.preprocess();
        if pager.scroll_state() == ScrollState::Idle {
            return;
        }
    }
    panic!("pager never settled");
}

#[test]
fn dragging_halfway_blends_the_indicator() {
    let mut pager = Pager::new().with_adapter(StaticPages::from_titles(["a", "b", "c"]));
    let mut strip = TabStrip::new().with_style(ascii_style());
    strip.set_view_pager(&mut pager).unwrap();
    let area = Rect::new(0, 0, 30, 2);
    render(&mut strip, area);

    pager.begin_drag();
    pager.drag_by(0.5);
    let buf = render(&mut strip, area);

    assert_eq!(strip.current_position(), 0);
    assert_eq!(strip.current_offset(), 0.5);
    assert_eq!(row(&buf, 0), format!("  A |  B |  C{}", " ".repeat(17)));
    // indicator spans 2.5..8, halfway between tab 0 (0..5) and tab 1 (5..11)
    assert_eq!(row(&buf, 1), format!("---=====-|{}", "-".repeat(20)));
}

#[test]
fn releasing_a_drag_snaps_to_the_nearest_tab() {
    let mut pager = Pager::new().with_adapter(StaticPages::from_titles(["a", "b", "c"]));
    let mut strip = TabStrip::new();
    strip.set_view_pager(&mut pager).unwrap();
    render(&mut strip, Rect::new(0, 0, 30, 2));

    pager.begin_drag();
    pager.drag_by(0.5);
    pager.end_drag();
    settle(&mut pager, &mut strip);

    assert_eq!(pager.current_item(), 1);
    assert_eq!(strip.current_position(), 1);
    assert_eq!(strip.current_offset(), 0.0);
    let tab1 = strip.tab_layout().and_then(|l| l.bounds(1)).unwrap();
    assert_eq!(strip.last_scroll_x(), tab1.left - strip.scroll_offset() as i32);
    assert_eq!(strip.scroll_x(), 0);
}

#[test]
fn long_strips_follow_the_current_page() {
    let titles = (0..10).map(|i| format!("tab{i}"));
    let mut pager = Pager::new().with_adapter(StaticPages::from_titles(titles));
    let mut strip = TabStrip::new().with_style(ascii_style());
    strip.set_view_pager(&mut pager).unwrap();
    let area = Rect::new(0, 0, 20, 2);
    render(&mut strip, area);

    pager.set_current_item(7);
    settle(&mut pager, &mut strip);
    let buf = render(&mut strip, area);

    assert_eq!(strip.scroll_x(), 48);
    assert_eq!(row(&buf, 0), "  TAB6 |  TAB7 |  TA");
    assert_eq!(row(&buf, 1), "-------|========----");
}

#[test]
fn clicking_a_tab_moves_the_pages() {
    let mut pager = Pager::new().with_adapter(StaticPages::from_titles(["a", "b", "c"]));
    let mut strip = TabStrip::new();
    strip.set_view_pager(&mut pager).unwrap();
    render(&mut strip, Rect::new(0, 0, 30, 2));

    let click = MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column: 12,
        row: 0,
        modifiers: KeyModifiers::NONE,
    };
    assert!(strip.mouse_event(click));
    settle(&mut pager, &mut strip);

    assert_eq!(pager.current_item(), 2);
    assert_eq!(strip.current_position(), 2);
}

#[test]
fn recreated_strip_restores_its_position() {
    let mut pager = Pager::new().with_adapter(StaticPages::from_titles(["a", "b", "c"]));
    let mut strip = TabStrip::new();
    strip.set_view_pager(&mut pager).unwrap();
    render(&mut strip, Rect::new(0, 0, 30, 2));
    pager.set_current_item(2);
    settle(&mut pager, &mut strip);

    let saved = strip.save_state().to_json().unwrap();
    drop(strip);

    let mut recreated = TabStrip::new();
    recreated.restore_state(SavedState::from_json(&saved).unwrap());
    assert_eq!(recreated.current_position(), 2);
    recreated.set_view_pager(&mut pager).unwrap();
    render(&mut recreated, Rect::new(0, 0, 30, 2));
    assert_eq!(recreated.current_position(), 2);
}

#[test]
fn detached_strip_ignores_the_pages() {
    let mut pager = Pager::new().with_adapter(StaticPages::from_titles(["a", "b", "c"]));
    let mut strip = TabStrip::new();
    strip.set_view_pager(&mut pager).unwrap();
    render(&mut strip, Rect::new(0, 0, 30, 2));

    strip.detach();
    pager.set_current_item(2);
    settle_without(&mut pager);
    strip.preprocess();
    assert_eq!(strip.current_position(), 0);
}

fn settle_without(pager: &mut Pager) {
    while pager.scroll_state() != ScrollState::Idle {
        pager.tick(FRAME);
    }
}

#[test]
fn swipe_tints_icons_and_rests_on_arrival() {
    const ACTIVE: Color = Color::Rgb(200, 100, 0);
    const INACTIVE: Color = Color::Rgb(0, 100, 200);

    let pages = StaticPages::new()
        .icon_page(IconRef::Glyph("a".into()), Some("one"))
        .icon_page(IconRef::Glyph("b".into()), Some("two"))
        .icon_page(IconRef::Glyph("c".into()), Some("three"));
    let mut pager = Pager::new().with_adapter(pages);
    let mut strip = TabStrip::new();
    strip.set_color_filters(ACTIVE, INACTIVE, Duration::from_millis(1000));
    strip.set_view_pager(&mut pager).unwrap();
    render(&mut strip, Rect::new(0, 0, 40, 3));

    let icon_tint = |strip: &TabStrip, i: usize| {
        strip
            .registry()
            .get(i)
            .and_then(|t| t.icon.as_ref())
            .and_then(|icon| icon.tint)
    };
    assert_eq!(icon_tint(&strip, 1), Some(INACTIVE));

    pager.begin_drag();
    pager.drag_by(0.5);
    strip.preprocess();
    assert_eq!(icon_tint(&strip, 0), Some(Color::Rgb(100, 100, 100)));
    assert_eq!(icon_tint(&strip, 1), Some(Color::Rgb(100, 100, 100)));

    pager.end_drag();
    settle(&mut pager, &mut strip);
    assert_eq!(icon_tint(&strip, 1), Some(tui_theme::TINT_REST_FG));
    assert_eq!(icon_tint(&strip, 2), Some(INACTIVE));
}

#[test]
fn notification_badges_follow_their_counters() {
    let pages = StaticPages::new().page("feed").notification_page("inbox");
    let mut pager = Pager::new().with_adapter(pages);
    let mut strip = TabStrip::new().with_style(ascii_style());
    strip.set_view_pager(&mut pager).unwrap();
    let area = Rect::new(0, 0, 20, 2);

    strip.update_notification_counter(1, 3).unwrap();
    assert_eq!(row(&render(&mut strip, area), 0), "  FEED |  INBOX 3   ");

    strip.update_notification_counter(1, 0).unwrap();
    assert_eq!(row(&render(&mut strip, area), 0), "  FEED |  INBOX     ");

    strip.update_notification_counter(1, 5).unwrap();
    assert_eq!(row(&render(&mut strip, area), 0), "  FEED |  INBOX 5   ");

    assert!(matches!(
        strip.update_notification_counter(0, 1),
        Err(TabStripError::NoNotificationBadge(0))
    ));
}

#[test]
fn rebuilding_with_fewer_pages_clamps_the_position() {
    let mut pager = Pager::new().with_adapter(StaticPages::from_titles(["a", "b", "c"]));
    let mut strip = TabStrip::new();
    strip.set_view_pager(&mut pager).unwrap();
    render(&mut strip, Rect::new(0, 0, 30, 2));
    pager.set_current_item(2);
    settle(&mut pager, &mut strip);

    pager.set_adapter(StaticPages::from_titles(["a"]));
    strip.notify_data_set_changed(&pager).unwrap();
    render(&mut strip, Rect::new(0, 0, 30, 2));
    assert_eq!(strip.tab_count(), 1);
    assert_eq!(strip.current_position(), 0);
}

#[test]
fn empty_pages_draw_nothing() {
    let mut pager = Pager::new().with_adapter(StaticPages::new());
    let mut strip = TabStrip::new().with_style(ascii_style());
    strip.set_view_pager(&mut pager).unwrap();
    pager.set_current_item(3);
    let buf = render(&mut strip, Rect::new(0, 0, 10, 2));
    assert_eq!(row(&buf, 0), " ".repeat(10));
    assert_eq!(row(&buf, 1), " ".repeat(10));
    assert_eq!(strip.scroll_x(), 0);
}
