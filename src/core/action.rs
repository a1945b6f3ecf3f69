//! # Actions
//!
//! Everything that can happen in Sermon becomes an `Action`.
//! Bytes from the port? That's `Action::SerialData(bytes)`.
//! User presses `q`? That's `Action::Quit`.
//!
//! The `update()` function applies an action to the state and returns an
//! `Effect` telling the event loop what to do next. No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  Effect
//! ```

use log::{debug, info, warn};

use crate::core::state::{App, LinkStatus};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Raw bytes read from the serial port.
    SerialData(Vec<u8>),
    /// The reader hit an unrecoverable error.
    SerialFailed(String),
    /// The port reported end of stream.
    SerialClosed,
    /// Terminal size changed.
    Resize(u16, u16),
    /// Quit key, Ctrl+C or an interrupt signal.
    Quit,
    /// Key with no binding yet.
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    Redraw,
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::SerialData(bytes) => {
            if bytes.is_empty() {
                return Effect::None;
            }
            app.bytes_received += bytes.len() as u64;
            let lines = app.assembler.push(&bytes);
            app.lines_received += lines.len() as u64;
            for line in lines {
                app.scrollback.append(line);
            }
            Effect::Redraw
        }
        Action::SerialFailed(reason) => {
            warn!("Serial link to {} failed: {}", app.device, reason);
            app.link = LinkStatus::Disconnected(reason);
            Effect::Redraw
        }
        Action::SerialClosed => {
            info!("Serial device {} closed", app.device);
            app.link = LinkStatus::Disconnected("device closed".to_string());
            Effect::Redraw
        }
        Action::Resize(width, height) => {
            debug!("Resize to {}x{}", width, height);
            Effect::Redraw
        }
        Action::Quit => {
            info!("Quit requested");
            Effect::Quit
        }
        Action::Ignored => Effect::None,
    }
}
