// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Reader with look-ahead

use std::io::{self, Read};

const FILL_CHUNK: usize = 512;

/// Wraps a reader so the head of the stream can be inspected without
/// consuming it. Bytes seen through [`peek`](Self::peek) are returned again
/// by the next reads.
#[derive(Debug)]
pub struct PeekReader<R> {
    inner: R,
    buf: Vec<u8>,
    pos: usize,
}

impl<R: Read> PeekReader<R> {
    /// Wrap a reader
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            buf: Vec::new(),
            pos: 0,
        }
    }

    /// Return up to `n` upcoming bytes without consuming them.
    ///
    /// Fewer than `n` bytes come back only when the stream ends first.
    pub fn peek(&mut self, n: usize) -> io::Result<&[u8]> {
        let mut chunk = [0u8; FILL_CHUNK];
        while self.buf.len() - self.pos < n {
            let want = (n - (self.buf.len() - self.pos)).min(FILL_CHUNK);
            match self.inner.read(&mut chunk[..want]) {
                Ok(0) => break,
                Ok(read) => self.buf.extend_from_slice(&chunk[..read]),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        let end = (self.pos + n).min(self.buf.len());
        Ok(&self.buf[self.pos..end])
    }

    /// Number of bytes peeked but not read yet
    pub fn buffered(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Get a reference to the wrapped reader
    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    /// Unwrap the reader. Peeked bytes that were not read are dropped.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> Read for PeekReader<R> {
    fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        if self.pos < self.buf.len() {
            let n = (self.buf.len() - self.pos).min(out.len());
            out[..n].copy_from_slice(&self.buf[self.pos..self.pos + n]);
            self.pos += n;
            if self.pos == self.buf.len() {
                self.buf.clear();
                self.pos = 0;
            }
            return Ok(n);
        }
        self.inner.read(out)
    }
}
