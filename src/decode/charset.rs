// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Charset sniffing
//!
//! The sniffer looks at the first [`PEEK_WINDOW`] bytes of a body, in this
//! order:
//!
//! 1. a byte-order mark
//! 2. a `<meta charset=...>` tag, or a `content="...charset=..."` next to
//!    `http-equiv="content-type"`
//! 3. UTF-8 validity, if the window contains any non-ASCII byte
//!
//! and otherwise answers `windows-1252`. That last answer is mostly noise
//! for the pages we fetch, so a [`CharsetPolicy`] gets a second look at it.

use std::io::Read;

use encoding_rs::{Encoding, UTF_16BE, UTF_16LE, UTF_8, WINDOWS_1252, X_USER_DEFINED};
use lazy_static::lazy_static;
use regex::bytes::Regex;

use super::peek::PeekReader;

/// Number of bytes inspected when sniffing
pub const PEEK_WINDOW: usize = 1024;

/// Charset used when sniffing has nothing to go on
pub const DEFAULT_CHARSET: &str = "utf-8";

/// Sniffer's last-resort answer
pub const WINDOWS_1252_LABEL: &str = "windows-1252";

/// Simplified Chinese, the usual real encoding behind a windows-1252 guess
pub const GBK_LABEL: &str = "GBK";

lazy_static! {
    static ref META_TAG: Regex = Regex::new(r"(?i-u)<meta\b[^>]*>").unwrap();
    static ref META_ATTR: Regex = Regex::new(
        r#"(?i-u)([a-z][a-z0-9_:.\-]*)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#
    )
    .unwrap();
    static ref META_CHARSET: Regex =
        Regex::new(r#"(?i-u)charset\s*=\s*["']?\s*([a-z0-9_:.\-]+)"#).unwrap();
}

/// Decides what a sniffed charset really means for the content population
/// being fetched.
pub trait CharsetPolicy: Send + Sync {
    /// Second look at the sniffer's answer, with the window it came from
    fn refine(&self, sniffed: &str, window: &[u8]) -> String;

    /// Last adjustment to the charset the decoder is about to use, after
    /// any caller override has been applied
    fn coerce(&self, resolved: &str) -> String;
}

/// Reads a windows-1252 guess as GBK, unless the page itself declares
/// UTF-8 and does not also declare GBK.
#[derive(Debug, Clone, Copy, Default)]
pub struct GbkFallbackPolicy;

impl CharsetPolicy for GbkFallbackPolicy {
    fn refine(&self, sniffed: &str, window: &[u8]) -> String {
        if sniffed != WINDOWS_1252_LABEL {
            return sniffed.to_string();
        }
        let text = String::from_utf8_lossy(window).to_lowercase();
        if text.contains("charset=utf-8") && !text.contains("charset=gbk") {
            DEFAULT_CHARSET.to_string()
        } else {
            GBK_LABEL.to_string()
        }
    }

    fn coerce(&self, resolved: &str) -> String {
        if resolved == WINDOWS_1252_LABEL {
            GBK_LABEL.to_string()
        } else {
            resolved.to_string()
        }
    }
}

/// Passes every charset through untouched
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughPolicy;

impl CharsetPolicy for PassthroughPolicy {
    fn refine(&self, sniffed: &str, _window: &[u8]) -> String {
        sniffed.to_string()
    }

    fn coerce(&self, resolved: &str) -> String {
        resolved.to_string()
    }
}

/// Guess the charset of a stream without consuming it.
///
/// Needs a full [`PEEK_WINDOW`]; shorter streams get [`DEFAULT_CHARSET`].
pub fn detect_charset<R: Read>(reader: &mut PeekReader<R>, policy: &dyn CharsetPolicy) -> String {
    match reader.peek(PEEK_WINDOW) {
        Ok(window) if window.len() == PEEK_WINDOW => {
            let sniffed = sniff(window);
            let charset = policy.refine(sniffed, window);
            tracing::trace!(sniffed, charset = %charset, "Sniffed charset");
            charset
        }
        Ok(window) => {
            tracing::trace!(len = window.len(), "Window too short to sniff");
            DEFAULT_CHARSET.to_string()
        }
        Err(e) => {
            tracing::trace!(error = %e, "Peek failed");
            DEFAULT_CHARSET.to_string()
        }
    }
}

/// Sniff the charset of the head of a document
pub fn sniff(content: &[u8]) -> &'static str {
    let content = &content[..content.len().min(PEEK_WINDOW)];

    if let Some((encoding, _)) = Encoding::for_bom(content) {
        return label_of(encoding);
    }

    if let Some(encoding) = prescan_meta(content) {
        return label_of(encoding);
    }

    let content = trim_partial_char(content);
    if content.iter().any(|&b| b >= 0x80) && std::str::from_utf8(content).is_ok() {
        return DEFAULT_CHARSET;
    }

    WINDOWS_1252_LABEL
}

/// Name under which an encoding is reported
pub fn label_of(encoding: &'static Encoding) -> &'static str {
    if encoding == UTF_8 {
        DEFAULT_CHARSET
    } else {
        encoding.name()
    }
}

fn prescan_meta(content: &[u8]) -> Option<&'static Encoding> {
    META_TAG.find_iter(content).find_map(|tag| {
        let encoding = Encoding::for_label(&meta_label(tag.as_bytes())?)?;
        // A document that can be read as ASCII cannot be UTF-16
        Some(if encoding == UTF_16LE || encoding == UTF_16BE {
            UTF_8
        } else if encoding == X_USER_DEFINED {
            WINDOWS_1252
        } else {
            encoding
        })
    })
}

/// Charset label declared by a single `<meta>` tag.
///
/// A `charset` attribute is taken as is. A `content` attribute only counts
/// next to `http-equiv="content-type"`.
fn meta_label(tag: &[u8]) -> Option<Vec<u8>> {
    let mut content = None;
    let mut pragma = false;

    for attr in META_ATTR.captures_iter(tag) {
        let name = attr.get(1)?.as_bytes();
        let value = attr.get(2).or(attr.get(3)).or(attr.get(4))?.as_bytes();

        if name.eq_ignore_ascii_case(b"charset") {
            let label = trim_whitespace(value);
            if !label.is_empty() {
                return Some(label.to_vec());
            }
        } else if name.eq_ignore_ascii_case(b"http-equiv") {
            pragma = trim_whitespace(value).eq_ignore_ascii_case(b"content-type");
        } else if name.eq_ignore_ascii_case(b"content") && content.is_none() {
            content = META_CHARSET
                .captures(value)
                .and_then(|c| c.get(1))
                .map(|m| m.as_bytes().to_vec());
        }
    }

    content.filter(|_| pragma)
}

fn trim_whitespace(value: &[u8]) -> &[u8] {
    let start = value
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(value.len());
    let end = value
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(start, |i| i + 1);
    &value[start..end]
}

/// Drop a trailing multi-byte sequence that may have been cut by the window
fn trim_partial_char(content: &[u8]) -> &[u8] {
    let len = content.len();
    for i in (len.saturating_sub(3)..len).rev() {
        let b = content[i];
        if b < 0x80 {
            break;
        }
        if b & 0xC0 != 0x80 {
            return &content[..i];
        }
    }
    content
}
