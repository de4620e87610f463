use clap::ValueEnum;
use ratatui::{buffer::Buffer, layout::Rect, style::Style, widgets::Widget};
use serde::{Deserialize, Serialize};

const HEX_TILE: [&str; 2] = ["/  \\__", "\\__/  "];

/// Decorative backdrop drawn faintly behind the timer
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    ValueEnum,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundPattern {
    #[default]
    None,
    Dots,
    Grid,
    Waves,
    Hexagons,
}

impl BackgroundPattern {
    pub const ALL: [BackgroundPattern; 5] = [
        BackgroundPattern::None,
        BackgroundPattern::Dots,
        BackgroundPattern::Grid,
        BackgroundPattern::Waves,
        BackgroundPattern::Hexagons,
    ];

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|p| *p == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|p| *p == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Glyph at a cell offset from the pattern origin, or None for blank
    pub fn glyph(self, x: u16, y: u16) -> Option<char> {
        match self {
            BackgroundPattern::None => None,
            BackgroundPattern::Dots => (x % 4 == 1 && y % 2 == 1).then_some('·'),
            BackgroundPattern::Grid => match (x % 6 == 0, y % 3 == 0) {
                (true, true) => Some('┼'),
                (true, false) => Some('│'),
                (false, true) => Some('─'),
                (false, false) => None,
            },
            BackgroundPattern::Waves => {
                let offset = if y % 2 == 0 { 0 } else { 3 };
                ((x + offset) % 6 == 0).then_some('~')
            }
            BackgroundPattern::Hexagons => {
                let row = HEX_TILE[usize::from(y % 2)];
                row.chars()
                    .nth(usize::from(x % 6))
                    .filter(|c| *c != ' ')
            }
        }
    }
}

/// Fills an area with a pattern, leaving blank cells untouched
pub struct PatternFill {
    pattern: BackgroundPattern,
    style: Style,
}

impl PatternFill {
    pub fn new(pattern: BackgroundPattern, style: Style) -> Self {
        Self { pattern, style }
    }
}

impl Widget for PatternFill {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.pattern == BackgroundPattern::None {
            return;
        }
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                if let Some(c) = self.pattern.glyph(x - area.x, y - area.y) {
                    if let Some(cell) = buf.cell_mut((x, y)) {
                        cell.set_char(c).set_style(self.style);
                    }
                }
            }
        }
    }
}
