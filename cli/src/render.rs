use std::fmt::Display;
use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{
    Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use crossterm::terminal::{Clear, ClearType};
use minegrid_core::{Cell, Coord, SnakeGame};

use crate::session::{Session, SessionState};

const BORDER_CORNER: char = '@';
const BORDER_HORIZONTAL: char = '-';
const BORDER_VERTICAL: char = '|';
const BORDER_COLOR: Color = Color::Grey;

const HAZARD_GLYPH: char = '#';
const COVERED_GLYPH: char = '-';
const FLAG_GLYPH: char = '?';

const SNAKE_GLYPH: char = '#';
const SNAKE_COLOR: Color = Color::Yellow;
const FOOD_GLYPH: char = '+';
const FOOD_COLOR: Color = Color::Red;
const SCORE_COLOR: Color = Color::Magenta;

const BANNER: Style = Style::fg(Color::Yellow).on(Color::DarkRed);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Style {
    fg: Color,
    bg: Option<Color>,
    reverse: bool,
}

impl Style {
    const fn fg(fg: Color) -> Self {
        Self {
            fg,
            bg: None,
            reverse: false,
        }
    }

    const fn on(self, bg: Color) -> Self {
        Self {
            bg: Some(bg),
            ..self
        }
    }

    const fn reversed(self) -> Self {
        Self {
            reverse: true,
            ..self
        }
    }
}

/// Draws a game as one frame of text per call.
///
/// On a terminal (see [`Renderer::for_terminal`]) each frame clears the
/// screen and ends lines with `\r\n` so it reads right in raw mode. Without
/// color no escape sequences are written besides those.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Renderer {
    padding: u8,
    color: bool,
    terminal: bool,
}

impl Renderer {
    /// `padding` is the gap (in rows and columns) between the frame edge and
    /// the first cell, border included, so it is at least 1.
    pub fn new(padding: u8, color: bool) -> Self {
        Self {
            padding: padding.max(1),
            color,
            terminal: false,
        }
    }

    pub fn for_terminal(self) -> Self {
        Self {
            terminal: true,
            ..self
        }
    }

    pub fn draw_mines(&self, session: &Session, out: &mut impl Write) -> io::Result<()> {
        let grid = session.grid();
        let (width, height) = grid.size();

        self.begin_frame(out)?;
        self.blank_lines(out, self.gap())?;

        self.border_edge(out, width)?;
        for y in 0..height {
            self.border_side(out, true)?;
            for x in 0..width {
                let Some(cell) = grid.cell_at((x, y)) else {
                    continue;
                };
                let style = cell_style(cell);
                let style = if grid.selection() == (x, y) {
                    style.reversed()
                } else {
                    style
                };
                self.print_styled(out, glyph(cell), style)?;
            }
            self.border_side(out, false)?;
            self.newline(out)?;
        }
        self.border_edge(out, width)?;

        let banner = match session.state() {
            SessionState::Won => Some("WINNER!!"),
            SessionState::Lost => Some("LOSER!!!"),
            SessionState::Running | SessionState::Quit => None,
        };
        if let Some(banner) = banner {
            self.banner(out, width, banner)?;
        }
        self.blank_lines(out, self.gap())?;

        let (x, y) = grid.selection();
        self.line(
            out,
            format_args!(
                " Hazards left: {}  Selection: ({}, {})",
                grid.hazards_left(),
                x,
                y
            ),
        )?;
        self.line(out, " - [Arrow Keys / h j k l] to Move")?;
        self.line(out, " - [d] to Dig")?;
        self.line(out, " - [f] to Flag")?;
        self.line(out, " - [q] to Quit")?;
        out.flush()
    }

    pub fn draw_snake(&self, game: &SnakeGame, out: &mut impl Write) -> io::Result<()> {
        let (width, height) = game.size();

        self.begin_frame(out)?;
        self.indent(out, self.gap() + 1)?;
        self.print_styled(
            out,
            format_args!("SCORE: {}", game.score()),
            Style::fg(SCORE_COLOR),
        )?;
        self.newline(out)?;
        self.blank_lines(out, self.gap().saturating_sub(1))?;

        self.border_edge(out, width)?;
        for y in 0..height {
            self.border_side(out, true)?;
            for x in 0..width {
                if game.occupies((x, y)) {
                    self.print_styled(out, SNAKE_GLYPH, Style::fg(SNAKE_COLOR))?;
                } else if game.food() == Some((x, y)) {
                    self.print_styled(out, FOOD_GLYPH, Style::fg(FOOD_COLOR))?;
                } else {
                    queue!(out, Print(' '))?;
                }
            }
            self.border_side(out, false)?;
            self.newline(out)?;
        }
        self.border_edge(out, width)?;

        if game.is_dead() {
            self.banner(out, width, "DEAD")?;
        }
        self.blank_lines(out, self.gap())?;

        self.line(out, " - [Arrow Keys / h j k l] to Steer")?;
        self.line(out, " - [q] to Quit")?;
        out.flush()
    }

    fn gap(&self) -> usize {
        usize::from(self.padding - 1)
    }

    fn begin_frame(&self, out: &mut impl Write) -> io::Result<()> {
        if self.terminal {
            queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        Ok(())
    }

    fn newline(&self, out: &mut impl Write) -> io::Result<()> {
        let end = if self.terminal { "\r\n" } else { "\n" };
        queue!(out, Print(end))
    }

    fn blank_lines(&self, out: &mut impl Write, count: usize) -> io::Result<()> {
        for _ in 0..count {
            self.newline(out)?;
        }
        Ok(())
    }

    fn indent(&self, out: &mut impl Write, width: usize) -> io::Result<()> {
        queue!(out, Print(format_args!("{:width$}", "")))
    }

    fn line(&self, out: &mut impl Write, text: impl Display) -> io::Result<()> {
        queue!(out, Print(text))?;
        self.newline(out)
    }

    fn border_edge(&self, out: &mut impl Write, width: Coord) -> io::Result<()> {
        let edge: String = core::iter::repeat_n(BORDER_HORIZONTAL, usize::from(width)).collect();
        self.indent(out, self.gap())?;
        self.print_styled(
            out,
            format_args!("{BORDER_CORNER}{edge}{BORDER_CORNER}"),
            Style::fg(BORDER_COLOR),
        )?;
        self.newline(out)
    }

    fn border_side(&self, out: &mut impl Write, left: bool) -> io::Result<()> {
        if left {
            self.indent(out, self.gap())?;
        }
        self.print_styled(out, BORDER_VERTICAL, Style::fg(BORDER_COLOR))
    }

    /// Centered under the cells of a board `width` wide.
    fn banner(&self, out: &mut impl Write, width: Coord, text: &str) -> io::Result<()> {
        let offset = self.gap() + 1 + (usize::from(width) / 2).saturating_sub(text.len() / 2);
        self.indent(out, offset)?;
        self.print_styled(out, text, BANNER)?;
        self.newline(out)
    }

    fn print_styled(&self, out: &mut impl Write, text: impl Display, style: Style) -> io::Result<()> {
        if !self.color {
            return queue!(out, Print(text));
        }

        queue!(out, SetForegroundColor(style.fg))?;
        if let Some(bg) = style.bg {
            queue!(out, SetBackgroundColor(bg))?;
        }
        if style.reverse {
            queue!(out, SetAttribute(Attribute::Reverse))?;
        }
        queue!(out, Print(text), SetAttribute(Attribute::Reset), ResetColor)
    }
}

/// A revealed hazard shows even under a flag; otherwise the flag wins over
/// the revealed count.
fn glyph(cell: &Cell) -> char {
    if cell.has_hazard() && cell.is_revealed() {
        HAZARD_GLYPH
    } else if cell.is_flagged() {
        FLAG_GLYPH
    } else if cell.is_revealed() {
        match cell.adjacent_hazard_count() {
            0 => ' ',
            count => char::from(b'0' + count),
        }
    } else {
        COVERED_GLYPH
    }
}

fn cell_style(cell: &Cell) -> Style {
    let color = if cell.has_hazard() && cell.is_revealed() {
        Color::DarkRed
    } else if cell.is_flagged() {
        Color::Cyan
    } else if cell.is_revealed() {
        match cell.adjacent_hazard_count() {
            0 => Color::DarkGrey,
            1 => Color::Green,
            2 => Color::DarkGreen,
            3 => Color::Yellow,
            4 => Color::DarkYellow,
            5 => Color::Magenta,
            6 => Color::DarkMagenta,
            7 => Color::Red,
            _ => Color::DarkRed,
        }
    } else {
        Color::White
    };
    Style::fg(color)
}
