//! Custom widgets for the terminal UI

use crate::terminal::MatrixRain;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// Quiz score as a labelled bar
pub struct ScoreBar {
    value: u8,
    max: u8,
    label: String,
    pass_color: Color,
    fail_color: Color,
    pass_threshold: u8,
}

impl ScoreBar {
    pub fn new(label: &str, value: u8, max: u8) -> Self {
        Self {
            value: value.min(max),
            max: max.max(1),
            label: label.to_string(),
            pass_color: Color::Green,
            fail_color: Color::Red,
            pass_threshold: 80,
        }
    }

    pub fn pass_color(mut self, color: Color) -> Self {
        self.pass_color = color;
        self
    }

    pub fn fail_color(mut self, color: Color) -> Self {
        self.fail_color = color;
        self
    }

    pub fn pass_threshold(mut self, threshold: u8) -> Self {
        self.pass_threshold = threshold;
        self
    }
}

impl Widget for ScoreBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 3 || area.height < 1 {
            return;
        }

        let color = if self.value >= self.pass_threshold {
            self.pass_color
        } else {
            self.fail_color
        };

        let inner = area.width - 2;
        let filled = (u32::from(self.value) * u32::from(inner) / u32::from(self.max)) as u16;

        let label = format!("{}: {}%", self.label, self.value);
        buf.set_string(area.x, area.y, &label, Style::default().fg(color));

        if area.height > 1 {
            let bar_y = area.y + 1;
            buf.set_string(area.x, bar_y, "[", Style::default());
            buf.set_string(area.x + area.width - 1, bar_y, "]", Style::default());

            for x in 0..filled {
                buf.set_string(area.x + 1 + x, bar_y, "█", Style::default().fg(color));
            }
            for x in filled..inner {
                buf.set_string(area.x + 1 + x, bar_y, "░", Style::default().fg(Color::DarkGray));
            }
        }
    }
}

/// Background rain, drawn before everything else
pub struct RainBackground<'a> {
    rain: &'a MatrixRain,
}

impl<'a> RainBackground<'a> {
    pub fn new(rain: &'a MatrixRain) -> Self {
        Self { rain }
    }
}

impl Widget for RainBackground<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for y in 0..area.height {
            for x in 0..area.width {
                if let Some(cell) = self.rain.cell(x, y) {
                    let green = cell.intensity.max(40);
                    buf.set_string(
                        area.x + x,
                        area.y + y,
                        cell.glyph.to_string(),
                        Style::default().fg(Color::Rgb(0, green, 0)),
                    );
                }
            }
        }
    }
}

/// Greedy word wrap on character counts. Words longer than `width` are split.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split(' ') {
        let mut word: Vec<char> = word.chars().collect();
        loop {
            let sep = if current_len == 0 { 0 } else { 1 };
            if current_len + sep + word.len() <= width {
                if sep == 1 {
                    current.push(' ');
                }
                current.extend(word.iter());
                current_len += sep + word.len();
                break;
            }
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
                continue;
            }
            let rest = word.split_off(width);
            lines.push(word.into_iter().collect());
            word = rest;
        }
    }
    lines.push(current);
    lines
}
