//! Console line assembly
//!
//! Bytes arrive from the UART in whatever chunks the peripheral hands
//! out. The assembler collects them into lines so that a line split across
//! several ticks is still echoed once, whole.

use core::fmt::{self, Write};

use heapless::Vec;

/// Longest line kept in one piece; longer input is split
pub const MAX_LINE_LEN: usize = 128;

/// One complete console line, without its terminator
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Line {
    bytes: Vec<u8, MAX_LINE_LEN>,
}

impl Line {
    /// Build a line from raw bytes
    ///
    /// Returns `None` if `bytes` is longer than [`MAX_LINE_LEN`].
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        Vec::from_slice(bytes).ok().map(|bytes| Self { bytes })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Display for Line {
    /// Writes the line as text, with each invalid UTF-8 sequence replaced
    /// by `?`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut rest: &[u8] = &self.bytes;
        loop {
            match core::str::from_utf8(rest) {
                Ok(text) => return f.write_str(text),
                Err(e) => {
                    let (valid, after) = rest.split_at(e.valid_up_to());
                    f.write_str(core::str::from_utf8(valid).map_err(|_| fmt::Error)?)?;
                    f.write_char('?')?;
                    match e.error_len() {
                        Some(len) => rest = &after[len..],
                        // Truncated sequence at the end of the line
                        None => return Ok(()),
                    }
                }
            }
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Line {
    fn format(&self, f: defmt::Formatter) {
        match core::str::from_utf8(&self.bytes) {
            Ok(text) => defmt::write!(f, "{=str}", text),
            Err(_) => defmt::write!(f, "{=[u8]}", self.as_bytes()),
        }
    }
}

/// Collects bytes into [`Line`]s
///
/// `\n` and `\r` both end a line; the `\n` of a `\r\n` pair is swallowed
/// so a terminal sending CRLF gets one line per Enter.
#[derive(Debug, Default)]
pub struct LineAssembler {
    pending: Vec<u8, MAX_LINE_LEN>,
    after_cr: bool,
}

impl LineAssembler {
    pub const fn new() -> Self {
        Self {
            pending: Vec::new(),
            after_cr: false,
        }
    }

    /// Bytes of the line still being assembled
    pub fn pending(&self) -> &[u8] {
        &self.pending
    }

    /// Feed one byte; returns a line when this byte completes one
    ///
    /// A byte that does not fit ends the current line early: the full
    /// buffer is returned and the byte starts the next line. A multi-byte
    /// UTF-8 character cut by the split moves whole to the next line.
    pub fn push(&mut self, byte: u8) -> Option<Line> {
        let after_cr = core::mem::replace(&mut self.after_cr, false);

        match byte {
            b'\n' if after_cr => None,
            b'\n' => Some(self.take()),
            b'\r' => {
                self.after_cr = true;
                Some(self.take())
            }
            _ => {
                if self.pending.is_full() {
                    let keep = self.pending.len() - incomplete_tail(&self.pending);
                    let mut next: Vec<u8, MAX_LINE_LEN> = Vec::new();
                    // At most three bytes carry over
                    let _ = next.extend_from_slice(&self.pending[keep..]);
                    let _ = next.push(byte);
                    self.pending.truncate(keep);
                    let line = self.take();
                    self.pending = next;
                    return Some(line);
                }
                let _ = self.pending.push(byte);
                None
            }
        }
    }

    fn take(&mut self) -> Line {
        Line {
            bytes: core::mem::take(&mut self.pending),
        }
    }
}

/// Number of trailing bytes that start a UTF-8 sequence without finishing it
fn incomplete_tail(bytes: &[u8]) -> usize {
    for back in 1..=bytes.len().min(3) {
        let b = bytes[bytes.len() - back];
        if b & 0xC0 == 0x80 {
            continue;
        }
        let needed = match b {
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF7 => 4,
            _ => 1,
        };
        return if needed > back { back } else { 0 };
    }
    0
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::String;

    fn feed(asm: &mut LineAssembler, bytes: &[u8]) -> Vec<Line, 8> {
        let mut lines = Vec::new();
        for &b in bytes {
            if let Some(line) = asm.push(b) {
                lines.push(line).unwrap();
            }
        }
        lines
    }

    fn text(line: &Line) -> String<256> {
        let mut s = String::new();
        write!(s, "{}", line).unwrap();
        s
    }

    #[test]
    fn test_single_line() {
        let mut asm = LineAssembler::new();
        let lines = feed(&mut asm, b"hello\n");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].as_bytes(), b"hello");
        assert!(asm.pending().is_empty());
    }

    #[test]
    fn test_line_split_across_chunks() {
        let mut asm = LineAssembler::new();
        assert!(feed(&mut asm, b"hel").is_empty());
        assert_eq!(asm.pending(), b"hel");

        let lines = feed(&mut asm, b"lo\r");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].as_bytes(), b"hello");
    }

    #[test]
    fn test_crlf_is_one_line() {
        let mut asm = LineAssembler::new();
        let lines = feed(&mut asm, b"a\r\nb\r\n");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].as_bytes(), b"a");
        assert_eq!(lines[1].as_bytes(), b"b");
    }

    #[test]
    fn test_empty_lines_are_kept() {
        let mut asm = LineAssembler::new();
        let lines = feed(&mut asm, b"\n\r\r");
        assert_eq!(lines.len(), 3);
        assert!(lines.iter().all(Line::is_empty));
    }

    #[test]
    fn test_overlong_line_is_split() {
        let mut asm = LineAssembler::new();
        let mut input = [b'x'; MAX_LINE_LEN + 3];
        input[MAX_LINE_LEN + 2] = b'\n';

        let lines = feed(&mut asm, &input);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].len(), MAX_LINE_LEN);
        assert_eq!(lines[1].as_bytes(), b"xx");
    }

    #[test]
    fn test_overlong_line_keeps_characters_whole() {
        let mut asm = LineAssembler::new();
        let mut input = [b'a'; MAX_LINE_LEN + 2];
        input[MAX_LINE_LEN - 1..].copy_from_slice("é\n".as_bytes());

        let lines = feed(&mut asm, &input);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].len(), MAX_LINE_LEN - 1);
        assert!(lines[0].as_bytes().iter().all(|&b| b == b'a'));
        assert_eq!(text(&lines[1]).as_str(), "é");
    }

    #[test]
    fn test_split_carries_three_byte_character() {
        let mut asm = LineAssembler::new();
        let mut input = [b'a'; MAX_LINE_LEN + 3];
        input[MAX_LINE_LEN - 2..].copy_from_slice("€b\n".as_bytes());

        let lines = feed(&mut asm, &input);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].len(), MAX_LINE_LEN - 2);
        assert_eq!(text(&lines[1]).as_str(), "€b");
    }

    #[test]
    fn test_incomplete_tail() {
        assert_eq!(incomplete_tail(b"abc"), 0);
        assert_eq!(incomplete_tail("é".as_bytes()), 0);
        assert_eq!(incomplete_tail(&[b'a', 0xC3]), 1);
        assert_eq!(incomplete_tail(&[b'a', 0xE2, 0x82]), 2);
        assert_eq!(incomplete_tail(&[0xF0, 0x9F, 0x98]), 3);
        assert_eq!(incomplete_tail(&[]), 0);
    }

    #[test]
    fn test_invalid_utf8_replaced() {
        let line = Line::from_bytes(b"ok\xFFfine\xE2\x82").unwrap();
        assert_eq!(text(&line).as_str(), "ok?fine?");

        let line = Line::from_bytes("caf\u{e9}".as_bytes()).unwrap();
        assert_eq!(text(&line).as_str(), "caf\u{e9}");
    }
}
