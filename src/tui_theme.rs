// pager-tab-strip/src/tui_theme.rs
use ratatui::style::Color;

pub const BORDER_DEFAULT: Color = Color::Rgb(100, 100, 100);
pub const BORDER_FOCUSED: Color = Color::Yellow;

pub const INDICATOR_DEFAULT: Color = Color::Rgb(102, 102, 102);
pub const UNDERLINE_DEFAULT: Color = Color::Rgb(60, 60, 60);
pub const DIVIDER_DEFAULT: Color = Color::Rgb(60, 60, 60);
pub const TAB_TEXT_DEFAULT: Color = Color::Rgb(102, 102, 102);

pub const BADGE_FG: Color = Color::White;
pub const BADGE_BG: Color = Color::Rgb(200, 40, 40);

/// Color forced onto the resting tab's icon and text once a swipe settles.
pub const TINT_REST_FG: Color = Color::White;

pub const COLOR_ORANGE: Color = Color::Rgb(255, 165, 0);
pub const COLOR_PURPLE: Color = Color::Rgb(128, 0, 128);
pub const COLOR_PINK: Color = Color::Rgb(255, 192, 203);
pub const COLOR_BROWN: Color = Color::Rgb(165, 42, 42);
pub const COLOR_TEAL: Color = Color::Rgb(0, 128, 128);
pub const COLOR_LIME: Color = Color::Rgb(50, 205, 50);
pub const COLOR_INDIGO: Color = Color::Rgb(75, 0, 130);
pub const COLOR_GOLD: Color = Color::Rgb(255, 215, 0);
pub const COLOR_SILVER: Color = Color::Rgb(192, 192, 192);
pub const COLOR_NAVY: Color = Color::Rgb(0, 0, 128);
pub const COLOR_MAROON: Color = Color::Rgb(128, 0, 0);

const GRAY_BASE: u8 = 30;
const GRAY_STEP: u8 = 30;
pub const GRAY0_FG: Color = Color::Rgb(GRAY_BASE, GRAY_BASE, GRAY_BASE);
pub const GRAY3_FG: Color = Color::Rgb(
    GRAY_BASE + (GRAY_STEP * 3),
    GRAY_BASE + (GRAY_STEP * 3),
    GRAY_BASE + (GRAY_STEP * 3),
);
pub const GRAY6_FG: Color = Color::Rgb(
    GRAY_BASE + (GRAY_STEP * 6),
    GRAY_BASE + (GRAY_STEP * 6),
    GRAY_BASE + (GRAY_STEP * 6),
);

/// Named glyphs usable as icon resources.
pub const ICON_HOME: &str = "⌂";
pub const ICON_STAR: &str = "★";
pub const ICON_MAIL: &str = "✉";
pub const ICON_GEAR: &str = "⚙";
pub const ICON_MUSIC: &str = "♪";
pub const ICON_HEART: &str = "♥";

/// Resolves a theme color resource by name.
pub fn color_resource(name: &str) -> Option<Color> {
    let color = match name {
        "orange" => COLOR_ORANGE,
        "purple" => COLOR_PURPLE,
        "pink" => COLOR_PINK,
        "brown" => COLOR_BROWN,
        "teal" => COLOR_TEAL,
        "lime" => COLOR_LIME,
        "indigo" => COLOR_INDIGO,
        "gold" => COLOR_GOLD,
        "silver" => COLOR_SILVER,
        "navy" => COLOR_NAVY,
        "maroon" => COLOR_MAROON,
        "gray0" => GRAY0_FG,
        "gray3" => GRAY3_FG,
        "gray6" => GRAY6_FG,
        "indicator" => INDICATOR_DEFAULT,
        "underline" => UNDERLINE_DEFAULT,
        "divider" => DIVIDER_DEFAULT,
        "text" => TAB_TEXT_DEFAULT,
        "border" => BORDER_DEFAULT,
        "focused" => BORDER_FOCUSED,
        _ => return None,
    };
    Some(color)
}

const ANSI_RGB: [[u8; 3]; 16] = [
    [0, 0, 0],
    [205, 0, 0],
    [0, 205, 0],
    [205, 205, 0],
    [0, 0, 238],
    [205, 0, 205],
    [0, 205, 205],
    [229, 229, 229],
    [127, 127, 127],
    [255, 0, 0],
    [0, 255, 0],
    [255, 255, 0],
    [92, 92, 255],
    [255, 0, 255],
    [0, 255, 255],
    [255, 255, 255],
];

/// Converts any terminal color to RGB using the xterm palette.
///
/// `Reset` has no defined value and is treated as white.
pub fn to_rgb(color: Color) -> [u8; 3] {
    match color {
        Color::Rgb(r, g, b) => [r, g, b],
        Color::Indexed(i) => indexed_rgb(i),
        Color::Reset => [255, 255, 255],
        Color::Black => ANSI_RGB[0],
        Color::Red => ANSI_RGB[1],
        Color::Green => ANSI_RGB[2],
        Color::Yellow => ANSI_RGB[3],
        Color::Blue => ANSI_RGB[4],
        Color::Magenta => ANSI_RGB[5],
        Color::Cyan => ANSI_RGB[6],
        Color::Gray => ANSI_RGB[7],
        Color::DarkGray => ANSI_RGB[8],
        Color::LightRed => ANSI_RGB[9],
        Color::LightGreen => ANSI_RGB[10],
        Color::LightYellow => ANSI_RGB[11],
        Color::LightBlue => ANSI_RGB[12],
        Color::LightMagenta => ANSI_RGB[13],
        Color::LightCyan => ANSI_RGB[14],
        Color::White => ANSI_RGB[15],
    }
}

fn indexed_rgb(index: u8) -> [u8; 3] {
    match index {
        0..=15 => ANSI_RGB[index as usize],
        16..=231 => {
            // 6x6x6 cube
            let level = |v: u8| if v == 0 { 0 } else { 55 + v * 40 };
            let i = index - 16;
            [level(i / 36), level((i / 6) % 6), level(i % 6)]
        }
        _ => {
            let v = 8 + (index - 232) * 10;
            [v, v, v]
        }
    }
}
