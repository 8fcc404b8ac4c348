//! Per-open handles over embedded files and directories.

use super::record::FileRecord;
use super::tree::NodeId;
use super::{EmbeddedFs, FileKind, Metadata};
use crate::error::VfsError;
use flate2::read::GzDecoder;
use std::io::{self, Read, Seek, SeekFrom, Write};

/// Result of [`EmbeddedFs::open`].
#[derive(Debug)]
pub enum Handle<'fs> {
    File(EmbeddedFile<'fs>),
    Dir(EmbeddedDir<'fs>),
}

impl<'fs> Handle<'fs> {
    pub fn stat(&self) -> Metadata {
        match self {
            Handle::File(file) => file.stat(),
            Handle::Dir(dir) => dir.stat(),
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, Handle::Dir(_))
    }

    pub fn into_file(self) -> Option<EmbeddedFile<'fs>> {
        match self {
            Handle::File(file) => Some(file),
            Handle::Dir(_) => None,
        }
    }

    pub fn into_dir(self) -> Option<EmbeddedDir<'fs>> {
        match self {
            Handle::Dir(dir) => Some(dir),
            Handle::File(_) => None,
        }
    }

    /// Immediate children; fails for files.
    pub fn read_dir(&self) -> Result<Vec<Metadata>, VfsError> {
        match self {
            Handle::Dir(dir) => Ok(dir.read_dir()),
            Handle::File(file) => Err(VfsError::NotADirectory(file.record.path.to_string())),
        }
    }
}

/// Readable, seekable view of one file's original bytes.
///
/// Compressed content is inflated on the first read and kept only for the
/// lifetime of this handle.
#[derive(Debug)]
pub struct EmbeddedFile<'fs> {
    record: &'fs FileRecord<'fs>,
    position: u64,
    decoded: Option<Vec<u8>>,
}

impl<'fs> EmbeddedFile<'fs> {
    pub(crate) fn new(record: &'fs FileRecord<'fs>) -> Self {
        Self {
            record,
            position: 0,
            decoded: None,
        }
    }

    pub fn stat(&self) -> Metadata {
        Metadata {
            name: self.record.name().to_string(),
            kind: FileKind::File,
            size: self.record.original_size,
            mod_time: self.record.mod_time.to_datetime(),
        }
    }

    pub fn path(&self) -> &'fs str {
        self.record.path
    }

    /// Length of the original content.
    pub fn len(&self) -> u64 {
        self.record.original_size
    }

    pub fn is_empty(&self) -> bool {
        self.record.original_size == 0
    }

    pub fn position(&self) -> u64 {
        self.position
    }

    /// Move the cursor. Targets past the end are allowed.
    pub fn seek_to(&mut self, pos: SeekFrom) -> Result<u64, VfsError> {
        let target = match pos {
            SeekFrom::Start(offset) => i128::from(offset),
            SeekFrom::End(delta) => i128::from(self.record.original_size) + i128::from(delta),
            SeekFrom::Current(delta) => i128::from(self.position) + i128::from(delta),
        };
        let position = u64::try_from(target).map_err(|_| VfsError::InvalidOffset(target))?;
        self.position = position;
        Ok(position)
    }

    /// Whole original content, inflating it if needed.
    pub fn contents(&mut self) -> Result<&[u8], VfsError> {
        if !self.record.compressed {
            return Ok(self.record.content);
        }
        let decoded = match self.decoded.take() {
            Some(decoded) => decoded,
            None => self.inflate()?,
        };
        Ok(self.decoded.insert(decoded).as_slice())
    }

    fn inflate(&self) -> Result<Vec<u8>, VfsError> {
        let capacity = usize::try_from(self.record.original_size).unwrap_or(0);
        let mut decoded = Vec::with_capacity(capacity);
        GzDecoder::new(self.record.content)
            .read_to_end(&mut decoded)
            .map_err(|err| VfsError::Decompress {
                path: self.record.path.to_string(),
                message: err.to_string(),
            })?;
        if decoded.len() as u64 != self.record.original_size {
            return Err(VfsError::Decompress {
                path: self.record.path.to_string(),
                message: format!(
                    "expected {} bytes, got {}",
                    self.record.original_size,
                    decoded.len()
                ),
            });
        }
        Ok(decoded)
    }
}

impl Read for EmbeddedFile<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.position >= self.record.original_size || buf.is_empty() {
            return Ok(0);
        }
        let start = self.position as usize;
        let available = self.contents()?.get(start..).unwrap_or_default();
        let n = buf.len().min(available.len());
        buf[..n].copy_from_slice(&available[..n]);
        self.position += n as u64;
        Ok(n)
    }
}

impl Seek for EmbeddedFile<'_> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        Ok(self.seek_to(pos)?)
    }
}

/// Writing is part of the `Write` contract only so embedded files can stand in
/// where a generic file is expected; every call fails.
impl Write for EmbeddedFile<'_> {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(VfsError::Unsupported("write").into())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Directory handle.
#[derive(Debug)]
pub struct EmbeddedDir<'fs> {
    fs: &'fs EmbeddedFs<'fs>,
    node: NodeId,
}

impl<'fs> EmbeddedDir<'fs> {
    pub(crate) fn new(fs: &'fs EmbeddedFs<'fs>, node: NodeId) -> Self {
        Self { fs, node }
    }

    pub fn stat(&self) -> Metadata {
        self.fs.node_metadata(self.node)
    }

    /// Immediate children, directories and files alike, ordered by name.
    pub fn read_dir(&self) -> Vec<Metadata> {
        self.fs
            .tree
            .children(self.node)
            .map(|child| self.fs.node_metadata(child))
            .collect()
    }
}
