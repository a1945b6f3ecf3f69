//! # Application State
//!
//! Core monitoring state for Sermon. Domain logic only, no TUI types.
//! Presentation (widgets, canvases) lives in the `tui` module.
//!
//! ```text
//! App
//! ├── device: String             // port path shown in the header
//! ├── baud: u32
//! ├── link: LinkStatus           // connected / disconnected + reason
//! ├── scrollback: Scrollback     // completed lines, bounded FIFO
//! ├── assembler: LineAssembler   // bytes not yet terminated by '\n'
//! ├── bytes_received: u64
//! └── lines_received: u64
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use crate::core::config::ResolvedConfig;
use crate::core::line_assembler::LineAssembler;
use crate::core::scrollback::{self, Scrollback};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkStatus {
    Connected,
    Disconnected(String),
}

pub struct App {
    pub device: String,
    pub baud: u32,
    pub link: LinkStatus,
    pub scrollback: Scrollback,
    pub assembler: LineAssembler,
    pub bytes_received: u64,
    /// Lines ever completed, including ones since evicted from scrollback.
    pub lines_received: u64,
}

impl App {
    pub fn new(device: String, baud: u32, scrollback_lines: usize) -> Self {
        Self {
            device,
            baud,
            link: LinkStatus::Connected,
            scrollback: Scrollback::new(scrollback_lines),
            assembler: LineAssembler::new(),
            bytes_received: 0,
            lines_received: 0,
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self::new(
            config.serial.device.clone(),
            config.serial.baud,
            config.scrollback_lines,
        )
    }

    pub fn header_text(&self) -> String {
        match &self.link {
            LinkStatus::Connected => {
                format!("Connected to {} ({} baud)", self.device, self.baud)
            }
            LinkStatus::Disconnected(reason) => {
                format!("Disconnected from {}: {}", self.device, reason)
            }
        }
    }

    pub fn footer_text(&self) -> String {
        format!(
            "[q] Quit    {} lines  {} bytes",
            self.lines_received, self.bytes_received
        )
    }

    /// Newest content that fits a `width` × `rows` body, in display order.
    ///
    /// The in-progress line (no `\n` yet) is treated as the newest line.
    pub fn body_text(&self, rows: u16, width: u16) -> String {
        let pending = self
            .assembler
            .has_pending()
            .then(|| self.assembler.pending());
        let lines = self.scrollback.iter().chain(pending.as_deref());
        scrollback::wrapped_tail(lines, rows, width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_app() -> App {
        App::new("/dev/ttyACM0".to_string(), 115200, 100)
    }

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert_eq!(app.link, LinkStatus::Connected);
        assert!(app.scrollback.is_empty());
        assert_eq!(app.header_text(), "Connected to /dev/ttyACM0 (115200 baud)");
        assert_eq!(app.footer_text(), "[q] Quit    0 lines  0 bytes");
    }

    #[test]
    fn test_header_reports_disconnect_reason() {
        let mut app = test_app();
        app.link = LinkStatus::Disconnected("device closed".to_string());
        assert_eq!(app.header_text(), "Disconnected from /dev/ttyACM0: device closed");
    }

    #[test]
    fn test_body_text_includes_pending_line() {
        let mut app = test_app();
        for line in app.assembler.push(b"one\ntwo\n> ") {
            app.scrollback.append(line);
        }
        assert_eq!(app.body_text(10, 80), "one\ntwo\n> ");
        assert_eq!(app.body_text(2, 80), "two\n> ");
    }
}
