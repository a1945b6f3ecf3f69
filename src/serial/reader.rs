//! Background thread that turns a blocking byte source into queued events.
//!
//! The thread never touches the screen. It only pushes [`SerialEvent`]s into
//! the event loop's queue; a full queue makes it wait, which is the
//! backpressure that keeps a fast device from outrunning the redraws.

use log::{debug, info, warn};
use std::io::{self, Read};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tokio::sync::mpsc::Sender;
use tokio::sync::mpsc::error::TrySendError;

const READ_CHUNK: usize = 4096;
const QUEUE_FULL_BACKOFF: Duration = Duration::from_millis(2);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SerialEvent {
    Data(Vec<u8>),
    Failed(String),
    Closed,
}

pub struct SerialReader {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl SerialReader {
    /// Start reading `source` on its own thread.
    ///
    /// `source` should return `TimedOut` periodically when idle so a stop
    /// request is noticed; a serial port opened with a read timeout does.
    pub fn spawn<R, T>(source: R, tx: Sender<T>) -> io::Result<Self>
    where
        R: Read + Send + 'static,
        T: From<SerialEvent> + Send + 'static,
    {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);
        let handle = thread::Builder::new()
            .name("serial-reader".to_string())
            .spawn(move || read_loop(source, &tx, &flag))?;
        Ok(Self {
            stop,
            handle: Some(handle),
        })
    }

    /// Stop the thread and wait for it. The source is dropped (and the port
    /// closed) before this returns.
    pub fn close(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.stop.store(true, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("Serial reader thread panicked");
            } else {
                debug!("Serial reader joined");
            }
        }
    }
}

impl Drop for SerialReader {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn read_loop<R, T>(mut source: R, tx: &Sender<T>, stop: &AtomicBool)
where
    R: Read,
    T: From<SerialEvent>,
{
    let mut buf = [0u8; READ_CHUNK];
    while !stop.load(Ordering::SeqCst) {
        match source.read(&mut buf) {
            Ok(0) => {
                forward(tx, stop, SerialEvent::Closed);
                return;
            }
            Ok(n) => {
                if !forward(tx, stop, SerialEvent::Data(buf[..n].to_vec())) {
                    return;
                }
            }
            Err(e)
                if matches!(
                    e.kind(),
                    io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted
                ) =>
            {
                continue;
            }
            Err(e) => {
                warn!("Serial read failed: {}", e);
                forward(tx, stop, SerialEvent::Failed(e.to_string()));
                return;
            }
        }
    }
    info!("Serial reader stopping");
}

/// Queue one event, waiting while the queue is full.
///
/// Returns false once the loop is gone or a stop was requested.
fn forward<T: From<SerialEvent>>(tx: &Sender<T>, stop: &AtomicBool, event: SerialEvent) -> bool {
    let mut pending = T::from(event);
    loop {
        match tx.try_send(pending) {
            Ok(()) => return true,
            Err(TrySendError::Closed(_)) => return false,
            Err(TrySendError::Full(back)) => {
                if stop.load(Ordering::SeqCst) {
                    return false;
                }
                pending = back;
                thread::sleep(QUEUE_FULL_BACKOFF);
            }
        }
    }
}
