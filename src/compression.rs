//! Per-file compression decision
//!
//! Content is stored gzip-compressed only when compression is enabled and the
//! space saved reaches the configured threshold. Each file is decided on its
//! own, so the encoder never needs more than one file in memory.

use flate2::write::GzEncoder;
use flate2::{Compression, GzBuilder};
use std::borrow::Cow;
use std::io::Write;

/// Default minimum space savings, in percent.
pub const DEFAULT_MIN_SPACE_SAVINGS: f64 = 5.0;

/// How stored content is represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Raw,
    Gzip,
}

/// Outcome of a compression decision.
#[derive(Debug, Clone)]
pub struct StoredContent<'a> {
    pub bytes: Cow<'a, [u8]>,
    pub encoding: Encoding,
    pub original_size: u64,
}

impl StoredContent<'_> {
    pub fn is_compressed(&self) -> bool {
        self.encoding == Encoding::Gzip
    }

    pub fn stored_size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Compression settings for one generation run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompressionPolicy {
    pub enabled: bool,
    pub min_space_savings: f64,
}

impl Default for CompressionPolicy {
    fn default() -> Self {
        Self {
            enabled: false,
            min_space_savings: DEFAULT_MIN_SPACE_SAVINGS,
        }
    }
}

impl CompressionPolicy {
    pub fn new(enabled: bool, min_space_savings: f64) -> Self {
        Self {
            enabled,
            min_space_savings,
        }
    }

    /// Pick the stored representation of `content`.
    pub fn decide<'a>(&self, content: &'a [u8]) -> std::io::Result<StoredContent<'a>> {
        let raw = StoredContent {
            bytes: Cow::Borrowed(content),
            encoding: Encoding::Raw,
            original_size: content.len() as u64,
        };
        if !self.enabled || content.is_empty() {
            return Ok(raw);
        }

        let compressed = gzip(content)?;
        let savings = space_savings(content.len() as u64, compressed.len() as u64);
        if savings >= self.min_space_savings {
            Ok(StoredContent {
                bytes: Cow::Owned(compressed),
                encoding: Encoding::Gzip,
                original_size: content.len() as u64,
            })
        } else {
            Ok(raw)
        }
    }
}

/// Percentage of `original` saved by storing `stored` bytes instead.
///
/// Empty originals save nothing.
pub fn space_savings(original: u64, stored: u64) -> f64 {
    if original == 0 {
        return 0.0;
    }
    (1.0 - stored as f64 / original as f64) * 100.0
}

/// Gzip with a fixed header so identical input always yields identical bytes.
pub fn gzip(content: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut encoder: GzEncoder<Vec<u8>> = GzBuilder::new()
        .mtime(0)
        .write(Vec::with_capacity(content.len() / 2 + 64), Compression::best());
    encoder.write_all(content)?;
    encoder.finish()
}
