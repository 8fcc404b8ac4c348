//! Records embedded by the encoder.

use chrono::{DateTime, Utc};
use std::time::SystemTime;

/// Absolute modification time as seconds and nanoseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ModTime {
    pub secs: i64,
    pub nanos: u32,
}

impl ModTime {
    pub const fn new(secs: i64, nanos: u32) -> Self {
        Self { secs, nanos }
    }

    /// Out-of-range values fall back to the Unix epoch.
    pub fn to_datetime(self) -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(self.secs, self.nanos).unwrap_or_default()
    }
}

impl From<DateTime<Utc>> for ModTime {
    fn from(time: DateTime<Utc>) -> Self {
        Self {
            secs: time.timestamp(),
            nanos: time.timestamp_subsec_nanos(),
        }
    }
}

impl From<SystemTime> for ModTime {
    fn from(time: SystemTime) -> Self {
        DateTime::<Utc>::from(time).into()
    }
}

/// One embedded file.
///
/// Generated modules hold a `static` slice of `FileRecord<'static>`; tests and
/// tools may build records over borrowed buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileRecord<'a> {
    /// Canonical logical path.
    pub path: &'a str,
    /// Stored bytes: gzip stream when `compressed`, the file itself otherwise.
    pub content: &'a [u8],
    pub compressed: bool,
    pub original_size: u64,
    pub stored_size: u64,
    pub mod_time: ModTime,
}

impl<'a> FileRecord<'a> {
    /// Last path segment.
    pub fn name(&self) -> &'a str {
        self.path.rsplit('/').next().unwrap_or(self.path)
    }

    /// Size bookkeeping that must hold for every record.
    pub(crate) fn check_sizes(&self) -> Result<(), String> {
        if self.stored_size != self.content.len() as u64 {
            return Err(format!(
                "{}: stored size {} does not match {} content bytes",
                self.path,
                self.stored_size,
                self.content.len()
            ));
        }
        if !self.compressed && self.original_size != self.stored_size {
            return Err(format!(
                "{}: uncompressed record with original size {} and stored size {}",
                self.path, self.original_size, self.stored_size
            ));
        }
        Ok(())
    }
}
