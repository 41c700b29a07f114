// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Byte stream to UTF-8 transcoding

use std::io::{self, Read};

use encoding_rs::{CoderResult, Encoding, UTF_8};

use crate::error::Result;

const READ_CHUNK: usize = 8 * 1024;

/// Turns a byte stream in some charset into UTF-8 text
pub trait Transcoder: Send + Sync {
    /// Read `source` to the end and decode it as `charset`
    fn transcode(&self, charset: &str, source: &mut dyn Read) -> Result<String>;
}

/// Transcoder backed by the WHATWG label table of `encoding_rs`.
///
/// Unknown labels are treated as UTF-8. Malformed sequences become U+FFFD.
#[derive(Debug, Clone, Copy, Default)]
pub struct EncodingRsTranscoder;

impl Transcoder for EncodingRsTranscoder {
    fn transcode(&self, charset: &str, source: &mut dyn Read) -> Result<String> {
        let encoding = resolve_encoding(charset);
        let mut decoder = encoding.new_decoder_without_bom_handling();
        let mut output = String::new();
        let mut chunk = vec![0u8; READ_CHUNK];

        loop {
            let n = match source.read(&mut chunk) {
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            let last = n == 0;
            let mut input = &chunk[..n];

            loop {
                if let Some(needed) = decoder.max_utf8_buffer_length(input.len()) {
                    output.reserve(needed);
                }
                let (result, read, _) = decoder.decode_to_string(input, &mut output, last);
                input = &input[read..];
                if let CoderResult::InputEmpty = result {
                    break;
                }
            }

            if last {
                return Ok(output);
            }
        }
    }
}

/// Look up an encoding by label, falling back to UTF-8
pub fn resolve_encoding(charset: &str) -> &'static Encoding {
    Encoding::for_label(charset.as_bytes()).unwrap_or_else(|| {
        tracing::warn!(charset, "Unknown charset, decoding as UTF-8");
        UTF_8
    })
}
