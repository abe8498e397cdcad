//! Counted, sequential access to the lines of a byte stream.

use std::io::BufRead;

use tracing::debug;

use crate::utils::{decode_line, is_blank, strip_eol};

/// Reads one physical line per [`advance`](LineReader::advance) and keeps a
/// 1-based counter of how many lines were attempted.
///
/// The counter moves on every `advance` call, including the one that hits end
/// of stream, so after exhaustion it sits one past the last real line.
#[derive(Debug)]
pub struct LineReader<R> {
    inner: R,
    buf: Vec<u8>,
    line_number: usize,
    current: Option<String>,
    exhausted: bool,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            buf: Vec::new(),
            line_number: 0,
            current: None,
            exhausted: false,
        }
    }

    /// Reads the next physical line. Returns `false` once the stream has no
    /// more lines; a read error counts as end of stream.
    pub fn advance(&mut self) -> bool {
        self.line_number += 1;
        if self.exhausted {
            return false;
        }

        self.buf.clear();
        match self.inner.read_until(b'\n', &mut self.buf) {
            Ok(0) => self.finish(),
            Ok(_) => {
                self.current = Some(decode_line(strip_eol(&self.buf)));
                true
            }
            Err(e) => {
                debug!(
                    line = self.line_number,
                    error = %e,
                    "read failed, treating as end of stream"
                );
                self.finish()
            }
        }
    }

    fn finish(&mut self) -> bool {
        self.exhausted = true;
        self.current = None;
        false
    }

    /// Text of the last line read, untouched. Empty when nothing is loaded.
    pub fn current_line(&self) -> &str {
        self.current.as_deref().unwrap_or("")
    }

    /// Moves forward to the next line that is not blank after trimming.
    ///
    /// A non-blank current line is returned as is. Otherwise the reader
    /// advances until it finds one, returning it trimmed, or runs out and
    /// returns an empty string. Every line consumed here bumps the counter.
    pub fn skip_to_next_non_blank(&mut self) -> String {
        if !is_blank(self.current_line()) {
            return self.current_line().to_owned();
        }
        while self.advance() {
            let text = self.current_line().trim();
            if !text.is_empty() {
                return text.to_owned();
            }
        }
        String::new()
    }

    pub fn line_number(&self) -> usize {
        self.line_number
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }
}
