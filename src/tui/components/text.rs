//! # Text Component
//!
//! A block of text laid out cell by cell.
//!
//! ## Layout rules
//!
//! - `\n` starts a new row without using a cell.
//! - `\r` is skipped, so CRLF line endings from a device render cleanly.
//! - Reaching the right edge wraps to the next row before the next
//!   character is placed. A line that exactly fills the width does not
//!   leave a blank row behind it.
//! - Drawing stops at the bottom edge. Whatever doesn't fit is simply not
//!   shown this frame, which is why the body is fed only the newest lines.

use ratatui::style::Style;

use crate::tui::canvas::Canvas;
use crate::tui::component::Component;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    content: String,
    style: Style,
}

impl Text {
    pub fn new(content: impl Into<String>, style: Style) -> Self {
        Self {
            content: content.into(),
            style,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    pub fn style(&self) -> Style {
        self.style
    }
}

impl Component for Text {
    fn draw(&self, canvas: &mut Canvas) {
        canvas.clear(self.style);

        let (width, height) = (canvas.width(), canvas.height());
        let (mut x, mut y) = (0u16, 0u16);

        for c in self.content.chars() {
            if y >= height {
                return;
            }
            match c {
                '\n' => {
                    x = 0;
                    y += 1;
                }
                '\r' => {}
                c => {
                    if x >= width {
                        x = 0;
                        y += 1;
                        if y >= height {
                            return;
                        }
                    }
                    canvas.set_cell(x, y, c, self.style);
                    x += 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::buffer::Buffer;
    use ratatui::layout::Rect;
    use ratatui::style::{Color, Modifier};

    fn render(content: &str, width: u16, height: u16) -> Buffer {
        let mut buf = Buffer::empty(Rect::new(0, 0, width, height));
        let text = Text::new(content, Style::default());
        text.draw(&mut Canvas::new(&mut buf, Rect::new(0, 0, width, height)));
        buf
    }

    fn rows(buf: &Buffer) -> Vec<String> {
        let area = buf.area;
        (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buf[(x, y)].symbol())
                    .collect::<String>()
                    .trim_end()
                    .to_string()
            })
            .collect()
    }

    #[test]
    fn test_crlf_content_renders_without_cr_cells() {
        let buf = render("AB\r\nCD", 2, 5);
        assert_eq!(rows(&buf), vec!["AB", "CD", "", "", ""]);
    }

    #[test]
    fn test_long_line_wraps() {
        let buf = render("abcdefg", 3, 4);
        assert_eq!(rows(&buf), vec!["abc", "def", "g", ""]);
    }

    #[test]
    fn test_exact_width_line_does_not_add_blank_row() {
        let buf = render("abc\ndef", 3, 3);
        assert_eq!(rows(&buf), vec!["abc", "def", ""]);
    }

    #[test]
    fn test_content_past_bottom_is_truncated() {
        let buf = render("1\n2\n3\n4", 4, 2);
        assert_eq!(rows(&buf), vec!["1", "2"]);
    }

    #[test]
    fn test_never_writes_outside_canvas() {
        let samples = [
            "",
            "x",
            "\n\n\n",
            "AB\r\nCD",
            "a very long line that keeps going and going",
            "tab\tand\u{FFFD}and unicode µ ✓\nshort\n\nlast",
        ];
        for content in samples {
            for width in 0..6u16 {
                for height in 0..6u16 {
                    // Canvas sits inside a larger buffer; the frame around it must stay blank
                    let outer = Rect::new(0, 0, width + 4, height + 4);
                    let inner = Rect::new(2, 2, width, height);
                    let mut buf = Buffer::empty(outer);
                    let text = Text::new(content, Style::default().bg(Color::Blue));
                    text.draw(&mut Canvas::new(&mut buf, inner));

                    for y in 0..outer.height {
                        for x in 0..outer.width {
                            let touched = buf[(x, y)] != Buffer::empty(outer)[(x, y)];
                            let inside = inner.contains((x, y).into());
                            assert!(
                                !touched || inside,
                                "{content:?} in {width}x{height} wrote to ({x},{y})"
                            );
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_draw_clears_previous_frame() {
        let area = Rect::new(0, 0, 5, 2);
        let mut buf = Buffer::empty(area);
        let mut text = Text::new("hello\nworld", Style::default());
        text.draw(&mut Canvas::new(&mut buf, area));

        text.set_content("hi");
        text.draw(&mut Canvas::new(&mut buf, area));
        assert_eq!(rows(&buf), vec!["hi", ""]);
    }

    #[test]
    fn test_style_is_applied_to_every_cell() {
        let area = Rect::new(0, 0, 4, 1);
        let mut buf = Buffer::empty(area);
        let style = Style::default().add_modifier(Modifier::REVERSED);
        Text::new("ab", style).draw(&mut Canvas::new(&mut buf, area));

        for x in 0..4u16 {
            assert!(buf[(x, 0)].modifier.contains(Modifier::REVERSED));
        }
    }

    #[test]
    fn test_text_is_not_focusable() {
        assert!(!Text::new("", Style::default()).focusable());
    }
}
