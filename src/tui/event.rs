//! Event fan-in.
//!
//! Terminal input, serial data and the interrupt signal are produced
//! independently. Each producer pushes [`LoopEvent`]s into one bounded queue
//! and the dispatch loop is the only consumer, so every state change and
//! every draw happens on a single task.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::{Stream, StreamExt};
use log::{debug, warn};
use std::io;
use tokio::sync::mpsc::Sender;
use tokio::task::JoinHandle;

use crate::core::action::Action;
use crate::serial::SerialEvent;

/// TUI-specific input events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuiEvent {
    Quit,
    Resize(u16, u16),
    /// Any other key press. Reserved for a command mode.
    Key(KeyCode),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoopEvent {
    Input(TuiEvent),
    Serial(SerialEvent),
    Interrupt,
}

impl From<SerialEvent> for LoopEvent {
    fn from(event: SerialEvent) -> Self {
        LoopEvent::Serial(event)
    }
}

impl From<LoopEvent> for Action {
    fn from(event: LoopEvent) -> Self {
        match event {
            LoopEvent::Input(TuiEvent::Quit) | LoopEvent::Interrupt => Action::Quit,
            LoopEvent::Input(TuiEvent::Resize(w, h)) => Action::Resize(w, h),
            LoopEvent::Input(TuiEvent::Key(_)) => Action::Ignored,
            LoopEvent::Serial(SerialEvent::Data(bytes)) => Action::SerialData(bytes),
            LoopEvent::Serial(SerialEvent::Failed(reason)) => Action::SerialFailed(reason),
            LoopEvent::Serial(SerialEvent::Closed) => Action::SerialClosed,
        }
    }
}

pub fn is_quit_key(key: &KeyEvent) -> bool {
    match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => true,
        (KeyModifiers::NONE, KeyCode::Char('q')) => true,
        _ => false,
    }
}

/// Map a raw terminal event; `None` for events the loop never cares about.
pub fn translate(event: Event) -> Option<TuiEvent> {
    match event {
        // Only presses, so keyboards that report releases don't double up
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            debug!("Key event: {:?} with modifiers {:?}", key.code, key.modifiers);
            if is_quit_key(&key) {
                Some(TuiEvent::Quit)
            } else {
                Some(TuiEvent::Key(key.code))
            }
        }
        Event::Resize(width, height) => Some(TuiEvent::Resize(width, height)),
        _ => None,
    }
}

/// Forward terminal events into the queue until the stream ends or the
/// loop goes away.
pub fn spawn_input_pump<S>(mut input: S, tx: Sender<LoopEvent>) -> JoinHandle<()>
where
    S: Stream<Item = io::Result<Event>> + Send + Unpin + 'static,
{
    tokio::spawn(async move {
        while let Some(next) = input.next().await {
            let event = match next {
                Ok(event) => event,
                Err(e) => {
                    warn!("Terminal input error: {}", e);
                    return;
                }
            };
            if let Some(event) = translate(event)
                && tx.send(LoopEvent::Input(event)).await.is_err()
            {
                return;
            }
        }
        debug!("Terminal input stream ended");
    })
}

/// Turn SIGINT (or Ctrl+C outside raw mode) into a quit.
pub fn spawn_interrupt_listener(tx: Sender<LoopEvent>) -> JoinHandle<()> {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                let _ = tx.send(LoopEvent::Interrupt).await;
            }
            Err(e) => warn!("Could not listen for interrupt signal: {}", e),
        }
    })
}
