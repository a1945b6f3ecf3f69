//! Groups raw serial bytes into display lines.
//!
//! Bytes are buffered until a `\n` arrives, so a UTF-8 sequence split across
//! two reads still decodes cleanly. Control characters never reach the screen
//! buffer: `\r` is dropped, tabs become spaces and everything else becomes
//! U+FFFD.

/// A pending line this long is completed even without a newline.
pub const MAX_LINE_BYTES: usize = 4096;

const TAB_STOP: usize = 8;

#[derive(Debug, Default)]
pub struct LineAssembler {
    pending: Vec<u8>,
}

impl LineAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a chunk of bytes and collect every line it completes.
    pub fn push(&mut self, bytes: &[u8]) -> Vec<String> {
        let mut lines = Vec::new();
        for &byte in bytes {
            if byte == b'\n' {
                lines.push(self.take_line());
                continue;
            }
            self.pending.push(byte);
            if self.pending.len() >= MAX_LINE_BYTES {
                lines.push(self.take_capped_line());
            }
        }
        lines
    }

    /// The unterminated line decoded up to its last complete character.
    pub fn pending(&self) -> String {
        let complete = self.pending.len() - incomplete_tail(&self.pending);
        sanitize(&String::from_utf8_lossy(&self.pending[..complete]))
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    fn take_line(&mut self) -> String {
        let raw = std::mem::take(&mut self.pending);
        sanitize(&String::from_utf8_lossy(&raw))
    }

    /// Complete an overlong line at its last character boundary. A
    /// multi-byte sequence cut by the cap starts the next line instead.
    fn take_capped_line(&mut self) -> String {
        let cut = self.pending.len() - incomplete_tail(&self.pending);
        let rest = self.pending.split_off(cut);
        let line = std::mem::replace(&mut self.pending, rest);
        sanitize(&String::from_utf8_lossy(&line))
    }
}

/// Length of a UTF-8 sequence at the end of `bytes` that is still waiting
/// for continuation bytes. Zero when the tail is complete or not UTF-8.
fn incomplete_tail(bytes: &[u8]) -> usize {
    for back in 1..=bytes.len().min(3) {
        let byte = bytes[bytes.len() - back];
        if byte & 0xC0 == 0x80 {
            continue;
        }
        let expected = match byte {
            0xC2..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF4 => 4,
            _ => return 0,
        };
        return if back < expected { back } else { 0 };
    }
    0
}

/// Replace characters that would corrupt the terminal grid. Carriage
/// returns are consumed, so CRLF and CR-only devices render cleanly.
pub fn sanitize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut column = 0;
    for c in text.chars() {
        match c {
            '\r' => {}
            '\t' => {
                let spaces = TAB_STOP - column % TAB_STOP;
                out.extend(std::iter::repeat_n(' ', spaces));
                column += spaces;
            }
            c if c.is_control() => {
                out.push(char::REPLACEMENT_CHARACTER);
                column += 1;
            }
            c => {
                out.push(c);
                column += 1;
            }
        }
    }
    out
}
