/// Text surfaces: the two independent output panes.
///
/// A `Surface` only knows clear / write / flush. `flush` is the display-swap
/// boundary: nothing written is guaranteed visible until it is called.
/// `TermSurface` maps a surface onto a band of terminal rows.

use std::io::{self, BufWriter, Write};

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Color, Print, SetForegroundColor},
    terminal::{Clear, ClearType},
};

use crate::domain::error::EngineError;

/// Small fixed palette. Choice styles are keyed to the input button.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Style {
    Default,
    Dim,
    Heading,
    /// 1-based choice index.
    Choice(u8),
}

/// A (red), B (yellow), X (blue), Y (green).
const CHOICE_COLORS: [Color; 4] = [
    Color::Rgb { r: 230, g: 70, b: 70 },
    Color::Rgb { r: 235, g: 200, b: 60 },
    Color::Rgb { r: 80, g: 140, b: 240 },
    Color::Rgb { r: 90, g: 200, b: 110 },
];

impl Style {
    pub fn color(self) -> Color {
        match self {
            Style::Default => Color::White,
            Style::Dim => Color::DarkGrey,
            Style::Heading => Color::Rgb { r: 200, g: 200, b: 255 },
            Style::Choice(n) => CHOICE_COLORS[(n.clamp(1, 4) - 1) as usize],
        }
    }
}

pub trait Surface {
    fn clear(&mut self) -> Result<(), EngineError>;
    fn write(&mut self, text: &str, style: Style) -> Result<(), EngineError>;
    fn flush(&mut self) -> Result<(), EngineError>;
    /// Columns available per line.
    fn width(&self) -> usize;
}

/// A rectangular band of the terminal, `rows` tall, starting at row `top`.
///
/// Text past the right edge wraps; text past the last row is clipped.
pub struct TermSurface {
    writer: BufWriter<io::Stdout>,
    top: u16,
    rows: u16,
    cols: u16,
    row: u16,
    col: u16,
}

impl TermSurface {
    pub fn new(top: u16, rows: u16, cols: u16) -> Self {
        TermSurface {
            writer: BufWriter::with_capacity(4096, io::stdout()),
            top,
            rows,
            cols: cols.max(1),
            row: 0,
            col: 0,
        }
    }

    fn newline(&mut self) {
        self.row = self.row.saturating_add(1);
        self.col = 0;
    }
}

impl Surface for TermSurface {
    fn clear(&mut self) -> Result<(), EngineError> {
        for r in 0..self.rows {
            queue!(self.writer, MoveTo(0, self.top + r), Clear(ClearType::UntilNewLine))?;
        }
        self.row = 0;
        self.col = 0;
        Ok(())
    }

    fn write(&mut self, text: &str, style: Style) -> Result<(), EngineError> {
        queue!(self.writer, SetForegroundColor(style.color()))?;
        for ch in text.chars() {
            if ch == '\n' {
                self.newline();
                continue;
            }
            if self.col >= self.cols {
                self.newline();
            }
            if self.row >= self.rows {
                continue;
            }
            queue!(self.writer, MoveTo(self.col, self.top + self.row), Print(ch))?;
            self.col += 1;
        }
        queue!(self.writer, SetForegroundColor(Color::Reset))?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), EngineError> {
        self.writer.flush()?;
        Ok(())
    }

    fn width(&self) -> usize {
        self.cols as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn choice_colors_are_distinct() {
        let colors: Vec<Color> = (1..=4).map(|n| Style::Choice(n).color()).collect();
        for i in 0..colors.len() {
            for j in i + 1..colors.len() {
                assert_ne!(colors[i], colors[j]);
            }
        }
        assert_ne!(Style::Default.color(), Style::Dim.color());
    }

    #[test]
    fn out_of_range_choice_style_is_clamped() {
        assert_eq!(Style::Choice(0).color(), Style::Choice(1).color());
        assert_eq!(Style::Choice(9).color(), Style::Choice(4).color());
    }
}
