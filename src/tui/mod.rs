//! # TUI Adapter
//!
//! The ratatui-specific layer. Owns the terminal, renders the UI and runs
//! the dispatch loop that serializes terminal input, serial data and
//! interrupts onto one task.
//!
//! ## Lifecycle
//!
//! ```text
//! Initializing ──▶ Running ──▶ Terminating
//!  open port        recv one event       restore terminal
//!  enter terminal   drain what's queued  stop + join serial reader
//!  spawn producers  redraw at most once
//! ```
//!
//! ## Redraw Strategy
//!
//! The loop sleeps in `recv()` until any producer has something. It then
//! drains everything already queued (bounded by the queue depth) and draws
//! once, so a burst of serial data costs one frame rather than one per line.
//! `Terminal::draw` builds the whole frame in memory and flushes it in one
//! go, so a half-drawn frame is never visible.

mod canvas;
mod component;
mod components;
mod event;
mod layout;
mod ui;

pub use canvas::Canvas;
pub use component::Component;
pub use components::Text;
pub use event::{LoopEvent, TuiEvent, spawn_input_pump, translate};
pub use layout::{Regions, compose};
pub use ui::{Screen, draw_ui};

use log::{debug, info};
use std::io::stdout;

use crossterm::cursor::{Hide, Show};
use crossterm::event::EventStream;
use crossterm::execute;
use ratatui::Terminal;
use ratatui::backend::Backend;
use tokio::sync::mpsc;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::error::SermonError;
use crate::serial::{self, SerialReader};

/// Depth of the event queue, and the most events handled per redraw.
pub const EVENT_QUEUE_DEPTH: usize = 256;

/// Puts the terminal in full-screen mode and always puts it back.
struct TerminalSession;

impl TerminalSession {
    fn enter() -> std::io::Result<(Self, ratatui::DefaultTerminal)> {
        let terminal = ratatui::try_init()?;
        // From here on the guard owns restoration, even if Hide fails
        let session = Self;
        execute!(stdout(), Hide)?;
        info!("Terminal initialized");
        Ok((session, terminal))
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = execute!(stdout(), Show);
        ratatui::restore();
        info!("Terminal restored");
    }
}

/// Open the port, run the UI until quit, then tear down in order:
/// terminal first, serial reader second.
pub async fn run(config: ResolvedConfig) -> Result<(), SermonError> {
    // Before the terminal is touched, so a bad device shows no UI at all
    let port = serial::open(&config.serial)?;

    let (tx, mut rx) = mpsc::channel(EVENT_QUEUE_DEPTH);
    let reader = SerialReader::spawn(port, tx.clone())?;

    let result = run_session(&config, &mut rx, tx).await;

    // The session's guard has already restored the terminal
    drop(rx);
    reader.close();
    info!("Serial reader closed");
    result
}

async fn run_session(
    config: &ResolvedConfig,
    rx: &mut mpsc::Receiver<LoopEvent>,
    tx: mpsc::Sender<LoopEvent>,
) -> Result<(), SermonError> {
    let (_session, mut terminal) = TerminalSession::enter()?;

    let input = spawn_input_pump(EventStream::new(), tx.clone());
    let interrupt = event::spawn_interrupt_listener(tx);

    let mut app = App::from_config(config);
    let mut screen = Screen::new(&app);
    let result = dispatch(&mut terminal, &mut app, &mut screen, rx).await;

    input.abort();
    interrupt.abort();
    result
}

/// The dispatch loop.
///
/// Returns on quit, or when every producer has gone away. Errors only come
/// from the terminal backend; serial trouble is shown in the header instead.
pub async fn dispatch<B>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    screen: &mut Screen,
    events: &mut mpsc::Receiver<LoopEvent>,
) -> Result<(), SermonError>
where
    B: Backend,
    SermonError: From<B::Error>,
{
    terminal.draw(|f| draw_ui(f, app, screen))?;

    while let Some(first) = events.recv().await {
        let mut needs_redraw = false;
        let mut handled = 0;
        let mut next = Some(first);

        while let Some(event) = next {
            match update(app, Action::from(event)) {
                Effect::Quit => return Ok(()),
                Effect::Redraw => needs_redraw = true,
                Effect::None => {}
            }
            handled += 1;
            // Bounded so a flooding source can't keep us from drawing
            next = if handled < EVENT_QUEUE_DEPTH {
                events.try_recv().ok()
            } else {
                None
            };
        }

        if needs_redraw {
            debug!("Redraw after {} events", handled);
            terminal.draw(|f| draw_ui(f, app, screen))?;
        }
    }

    info!("All event sources closed");
    Ok(())
}
