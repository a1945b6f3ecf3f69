//! # Canvas
//!
//! A rectangular window onto the frame's cell buffer. Components draw in
//! local coordinates; the canvas translates them to absolute cells and drops
//! anything that falls outside its own rectangle or the buffer.
//!
//! Out of range is policy, not failure: there is no error path, so a widget
//! can overdraw freely without computing visible ranges first.

use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect};
use ratatui::style::Style;

pub struct Canvas<'a> {
    buf: &'a mut Buffer,
    area: Rect,
}

impl<'a> Canvas<'a> {
    pub fn new(buf: &'a mut Buffer, area: Rect) -> Self {
        Self { buf, area }
    }

    pub fn width(&self) -> u16 {
        self.area.width
    }

    pub fn height(&self) -> u16 {
        self.area.height
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    /// Write one cell at local `(x, y)`. No-op when out of bounds.
    pub fn set_cell(&mut self, x: u16, y: u16, ch: char, style: Style) {
        if x >= self.area.width || y >= self.area.height {
            return;
        }
        let (Some(abs_x), Some(abs_y)) = (self.area.x.checked_add(x), self.area.y.checked_add(y))
        else {
            return;
        };
        if let Some(cell) = self.buf.cell_mut(Position::new(abs_x, abs_y)) {
            cell.set_char(ch).set_style(style);
        }
    }

    pub fn fill(&mut self, ch: char, style: Style) {
        for y in 0..self.area.height {
            for x in 0..self.area.width {
                self.set_cell(x, y, ch, style);
            }
        }
    }

    pub fn clear(&mut self, style: Style) {
        self.fill(' ', style);
    }
}
