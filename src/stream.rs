//! Lazily cuts a character stream into records at a chosen separator byte,
//! grounded on `diffhouse.pipelines.utils.split_stream`.
//!
//! The first element produced is always the (possibly empty) prefix before
//! the first separator; callers that use a leading sentinel (every
//! pipeline here does — the record separator `0x1E`) must skip it, exactly
//! as the Python original's callers do with `next(commits)`.

use std::io::Read;

/// A pull-style iterator that reads `R` in fixed-size chunks and yields
/// `String` records delimited by `sep`.
///
/// Never buffers more than one partial record plus one chunk, so the
/// memory bound is independent of how large the whole stream is. Invalid
/// UTF-8 bytes are replaced (lossy), never fatal, matching the driver's
/// `errors='replace'` decoding policy.
pub struct StreamSplitter<R> {
    reader: R,
    sep: u8,
    chunk_size: usize,
    buffer: Vec<u8>,
    chunk_buf: Vec<u8>,
    eof: bool,
    done: bool,
}

impl<R: Read> StreamSplitter<R> {
    pub fn new(reader: R, sep: u8, chunk_size: usize) -> Self {
        Self {
            reader,
            sep,
            chunk_size,
            buffer: Vec::new(),
            chunk_buf: vec![0u8; chunk_size],
            eof: false,
            done: false,
        }
    }
}

impl<R: Read> Iterator for StreamSplitter<R> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        loop {
            if self.done {
                return None;
            }
            // A separator already buffered: split it off without reading more.
            if let Some(pos) = self.buffer.iter().position(|&b| b == self.sep) {
                let record = self.buffer.drain(..=pos).collect::<Vec<u8>>();
                // Drop the trailing separator itself.
                let record = &record[..record.len() - 1];
                return Some(String::from_utf8_lossy(record).into_owned());
            }
            if self.eof {
                self.done = true;
                if self.buffer.is_empty() {
                    return None;
                }
                return Some(String::from_utf8_lossy(&self.buffer).into_owned());
            }
            match self.reader.read(&mut self.chunk_buf[..self.chunk_size]) {
                Ok(0) => self.eof = true,
                Ok(n) => self.buffer.extend_from_slice(&self.chunk_buf[..n]),
                Err(ref e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(_) => {
                    self.eof = true;
                }
            }
        }
    }
}
