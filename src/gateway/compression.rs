//! Gateway payload decompression.
//!
//! Two independent modes, selected by [`crate::gateway::GatewayConfig`]:
//! per-payload (each binary frame is a standalone zlib stream) and
//! zlib-stream (one inflate context spans the whole connection, with frames
//! delimited by the deflate empty-block marker `00 00 FF FF`).

use flate2::{Decompress, FlushDecompress, Status};

use crate::error::{Error, Result};

const FLUSH_MARKER: [u8; 4] = [0x00, 0x00, 0xff, 0xff];
const CHUNK_SIZE: usize = 16 * 1024;

fn ends_with_flush_marker(buf: &[u8]) -> bool {
    buf.len() >= 4 && buf[buf.len() - 4..] == FLUSH_MARKER
}

/// Inflates one standalone zlib-compressed frame.
pub fn inflate_payload(chunk: &[u8]) -> Result<Vec<u8>> {
    let mut decompress = Decompress::new(true);
    let mut output = Vec::with_capacity(chunk.len() * 4);
    let mut buf = [0u8; CHUNK_SIZE];
    let mut consumed = 0usize;

    loop {
        let before_in = decompress.total_in();
        let before_out = decompress.total_out();
        let status = decompress
            .decompress(&chunk[consumed..], &mut buf, FlushDecompress::Finish)
            .map_err(|e| Error::BadFormat(format!("zlib inflate error: {e}")))?;
        output.extend_from_slice(&buf[..(decompress.total_out() - before_out) as usize]);
        consumed += (decompress.total_in() - before_in) as usize;
        match status {
            Status::StreamEnd => break,
            Status::BufError => break,
            Status::Ok if consumed >= chunk.len() => break,
            Status::Ok => continue,
        }
    }
    Ok(output)
}

/// An inflate context that spans the whole gateway connection.
///
/// Binary frames are fed in as they arrive; a frame is only complete — and
/// this returns `Some(json_bytes)` — once the connection-spanning deflate
/// stream reaches the `00 00 FF FF` sync-flush marker.
pub struct StreamInflater {
    decompress: Decompress,
    pending: Vec<u8>,
}

impl StreamInflater {
    pub fn new() -> Self {
        Self { decompress: Decompress::new(true), pending: Vec::new() }
    }

    pub fn feed(&mut self, chunk: &[u8]) -> Result<Option<Vec<u8>>> {
        self.pending.extend_from_slice(chunk);
        if !ends_with_flush_marker(&self.pending) {
            return Ok(None);
        }

        let mut output = Vec::with_capacity(self.pending.len() * 4);
        let mut buf = [0u8; CHUNK_SIZE];
        let mut consumed = 0usize;

        loop {
            let before_in = self.decompress.total_in();
            let before_out = self.decompress.total_out();
            let status = self
                .decompress
                .decompress(&self.pending[consumed..], &mut buf, FlushDecompress::Sync)
                .map_err(|e| Error::BadFormat(format!("zlib-stream inflate error: {e}")))?;
            output.extend_from_slice(&buf[..(self.decompress.total_out() - before_out) as usize]);
            consumed += (self.decompress.total_in() - before_in) as usize;
            match status {
                Status::StreamEnd | Status::BufError => break,
                Status::Ok if consumed >= self.pending.len() => break,
                Status::Ok => continue,
            }
        }

        self.pending.clear();
        Ok(Some(output))
    }
}

impl Default for StreamInflater {
    fn default() -> Self {
        Self::new()
    }
}
