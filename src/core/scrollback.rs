//! # Scrollback
//!
//! Bounded FIFO of completed serial lines. The body widget only ever sees the
//! newest slice of it, so drawing cost depends on the viewport, not on how
//! much data the device has sent.

use std::collections::VecDeque;

/// Default number of lines kept before the oldest are evicted.
pub const DEFAULT_CAPACITY: usize = 10_000;

#[derive(Debug, Clone)]
pub struct Scrollback {
    lines: VecDeque<String>,
    capacity: usize,
}

impl Scrollback {
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(capacity.min(1024)),
            capacity,
        }
    }

    /// Push a completed line, evicting from the front until we're within capacity.
    pub fn append(&mut self, line: String) {
        self.lines.push_back(line);
        while self.lines.len() > self.capacity {
            self.lines.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    /// The newest `max_lines` lines, oldest first, joined with `\n`.
    ///
    /// Counts logical lines. The body uses [`wrapped_tail`], the wrap-aware
    /// form, so a narrow terminal never pushes the newest line off screen.
    pub fn visible_tail(&self, max_lines: usize) -> String {
        let take = max_lines.min(self.lines.len());
        let start = self.lines.len() - take;
        let tail: Vec<&str> = self.lines.range(start..).map(String::as_str).collect();
        tail.join("\n")
    }
}

impl Default for Scrollback {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

/// Rows a line occupies once soft-wrapped at `width` columns.
///
/// Matches the text widget's wrap rule: a line that exactly fills the width
/// does not spill onto an extra row, and an empty line still takes one row.
pub fn wrapped_rows(line: &str, width: u16) -> usize {
    let width = usize::from(width.max(1));
    let chars = line.chars().filter(|c| *c != '\r').count();
    chars.div_ceil(width).max(1)
}

/// Join the newest lines that fit into `rows` rows of `width` columns.
///
/// This is what feeds the body region; it equals
/// [`Scrollback::visible_tail`] when no line wraps.
///
/// `lines` is walked from the back. The newest line is always included, even
/// when it alone overflows the viewport; the widget then truncates its end.
pub fn wrapped_tail<'a, I>(lines: I, rows: u16, width: u16) -> String
where
    I: DoubleEndedIterator<Item = &'a str>,
{
    if rows == 0 || width == 0 {
        return String::new();
    }

    let budget = usize::from(rows);
    let mut used = 0;
    let mut picked = Vec::new();
    for line in lines.rev() {
        let needed = wrapped_rows(line, width);
        if !picked.is_empty() && used + needed > budget {
            break;
        }
        used += needed;
        picked.push(line);
        if used >= budget {
            break;
        }
    }

    picked.reverse();
    picked.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(capacity: usize, lines: &[&str]) -> Scrollback {
        let mut sb = Scrollback::new(capacity);
        for line in lines {
            sb.append(line.to_string());
        }
        sb
    }

    #[test]
    fn test_evicts_oldest_first() {
        let sb = filled(3, &["a", "b", "c", "d"]);
        let lines: Vec<&str> = sb.iter().collect();
        assert_eq!(lines, vec!["b", "c", "d"]);
    }

    #[test]
    fn test_full_buffer_plus_one_keeps_last_n() {
        let names: Vec<String> = (0..=50).map(|i| format!("line {i}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let sb = filled(50, &refs);

        assert_eq!(sb.len(), 50);
        assert_eq!(sb.iter().next(), Some("line 1"));
        assert_eq!(sb.iter().last(), Some("line 50"));
    }

    #[test]
    fn test_zero_capacity_keeps_nothing() {
        let sb = filled(0, &["a", "b"]);
        assert!(sb.is_empty());
        assert_eq!(sb.visible_tail(10), "");
    }

    #[test]
    fn test_visible_tail_returns_newest_in_order() {
        let sb = filled(10, &["one", "two", "three", "four"]);
        assert_eq!(sb.visible_tail(2), "three\nfour");
    }

    #[test]
    fn test_visible_tail_clamps_to_length() {
        let sb = filled(10, &["one", "two"]);
        assert_eq!(sb.visible_tail(100), "one\ntwo");
        assert_eq!(sb.visible_tail(0), "");
    }

    #[test]
    fn test_wrapped_rows() {
        assert_eq!(wrapped_rows("", 10), 1);
        assert_eq!(wrapped_rows("abcd", 4), 1);
        assert_eq!(wrapped_rows("abcde", 4), 2);
        assert_eq!(wrapped_rows("ab\r", 2), 1);
    }

    #[test]
    fn test_wrapped_tail_counts_rows_not_lines() {
        let lines = ["old", "0123456789", "new"];
        // "new" takes 1 row and the long line takes 3 at width 4
        assert_eq!(wrapped_tail(lines.iter().copied(), 4, 4), "0123456789\nnew");
        assert_eq!(wrapped_tail(lines.iter().copied(), 3, 4), "new");
    }

    #[test]
    fn test_wrapped_tail_keeps_oversized_newest_line() {
        let lines = ["a", "0123456789"];
        assert_eq!(wrapped_tail(lines.iter().copied(), 2, 3), "0123456789");
    }

    #[test]
    fn test_wrapped_tail_empty_viewport() {
        let lines = ["a", "b"];
        assert_eq!(wrapped_tail(lines.iter().copied(), 0, 80), "");
        assert_eq!(wrapped_tail(lines.iter().copied(), 5, 0), "");
    }

    #[test]
    fn test_wrapped_tail_matches_visible_tail_without_wrapping() {
        let sb = filled(10, &["one", "two", "three", "four"]);
        for rows in 0..6u16 {
            assert_eq!(
                wrapped_tail(sb.iter(), rows, 80),
                sb.visible_tail(usize::from(rows))
            );
        }
    }
}
