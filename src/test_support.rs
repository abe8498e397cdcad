use std::cell::Cell;
use std::io::{self, BufRead, Read};
use std::path::{Path, PathBuf};

use crate::error::TraversalError;
use crate::tree::FileTree;

/// Serves `data`, then fails every read once it runs out.
pub(crate) struct FailingReader {
    data: &'static [u8],
}

impl FailingReader {
    pub(crate) fn new(data: &'static str) -> Self {
        Self {
            data: data.as_bytes(),
        }
    }
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = {
            let avail = self.fill_buf()?;
            let n = avail.len().min(buf.len());
            buf[..n].copy_from_slice(&avail[..n]);
            n
        };
        self.consume(n);
        Ok(n)
    }
}

impl BufRead for FailingReader {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        if self.data.is_empty() {
            return Err(io::Error::new(io::ErrorKind::Other, "device went away"));
        }
        Ok(self.data)
    }

    fn consume(&mut self, amt: usize) {
        self.data = &self.data[amt..];
    }
}

/// A one-file tree whose stream records when it is dropped.
pub(crate) struct DropTrackingTree {
    data: Vec<u8>,
    dropped: Cell<bool>,
}

impl DropTrackingTree {
    pub(crate) fn new(data: &str) -> Self {
        Self {
            data: data.as_bytes().to_vec(),
            dropped: Cell::new(false),
        }
    }

    pub(crate) fn was_dropped(&self) -> bool {
        self.dropped.get()
    }
}

struct TrackedStream<'a> {
    data: &'a [u8],
    dropped: &'a Cell<bool>,
}

impl Read for TrackedStream<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.data.read(buf)
    }
}

impl BufRead for TrackedStream<'_> {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.data.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.data.consume(amt)
    }
}

impl Drop for TrackedStream<'_> {
    fn drop(&mut self) {
        self.dropped.set(true);
    }
}

impl FileTree for DropTrackingTree {
    fn open(&self, _path: &Path) -> io::Result<Box<dyn BufRead + '_>> {
        Ok(Box::new(TrackedStream {
            data: &self.data,
            dropped: &self.dropped,
        }))
    }

    fn files(&self) -> Box<dyn Iterator<Item = Result<PathBuf, TraversalError>> + '_> {
        Box::new(std::iter::empty())
    }
}
