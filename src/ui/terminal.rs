/// Terminal bootstrap: raw mode, alternate screen, and the split into the
/// primary (narrative) and secondary (choice menu) surfaces.
///
/// Layout, top to bottom:
///   primary surface   ~60% of the rows
///   divider           1 row
///   secondary surface the rest

use std::io::{self, Write};

use crossterm::{
    cursor::{self, MoveTo},
    execute,
    style::{Print, ResetColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};

use crate::ui::surface::{Style, TermSurface};

const MIN_SECONDARY_ROWS: u16 = 8;

pub struct Terminal {
    out: io::Stdout,
}

/// Rows given to the primary surface; the divider sits on the next row.
pub fn primary_rows(height: u16) -> u16 {
    let room = height.saturating_sub(MIN_SECONDARY_ROWS + 1).max(4);
    (height * 3 / 5).clamp(4, room)
}

impl Terminal {
    pub fn init() -> io::Result<(Terminal, TermSurface, TermSurface)> {
        let mut out = io::stdout();
        terminal::enable_raw_mode()?;

        let (w, h) = terminal::size().unwrap_or((80, 24));
        let rows = primary_rows(h);
        let divider = rows;

        if let Err(e) = draw_frame(&mut out, divider, w) {
            let _ = execute!(out, cursor::Show, terminal::LeaveAlternateScreen);
            let _ = terminal::disable_raw_mode();
            return Err(e);
        }

        let primary = TermSurface::new(0, rows, w);
        let secondary_top = divider + 1;
        let secondary = TermSurface::new(secondary_top, h.saturating_sub(secondary_top), w);

        Ok((Terminal { out }, primary, secondary))
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        execute!(
            self.out,
            ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()
    }
}

/// Switch to the alternate screen and draw the divider row.
fn draw_frame<W: Write>(out: &mut W, divider: u16, width: u16) -> io::Result<()> {
    execute!(out, terminal::EnterAlternateScreen, cursor::Hide, Clear(ClearType::All))?;
    execute!(
        out,
        MoveTo(0, divider),
        SetForegroundColor(Style::Dim.color()),
        Print("─".repeat(width as usize)),
        ResetColor
    )?;
    out.flush()
}
