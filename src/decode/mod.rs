// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Response decoding
//!
//! Turns a response into UTF-8 text: inflate gzip bodies, sniff the charset
//! from the first kilobyte, apply the caller override and the charset
//! policy, then transcode.

mod charset;
mod decoder;
mod peek;
mod transcode;

pub use charset::{
    detect_charset, label_of, sniff, CharsetPolicy, GbkFallbackPolicy, PassthroughPolicy,
    DEFAULT_CHARSET, GBK_LABEL, PEEK_WINDOW, WINDOWS_1252_LABEL,
};
pub use decoder::{inflate, ResponseDecoder, GZIP_CHUNK};
pub use peek::PeekReader;
pub use transcode::{resolve_encoding, EncodingRsTranscoder, Transcoder};
