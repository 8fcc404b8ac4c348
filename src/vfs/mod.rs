//! Runtime Virtual Filesystem
//!
//! Serves the records embedded by the encoder through path lookup, streaming
//! reads and directory listings. The directory tree is derived from record
//! paths once and is immutable afterwards, so any number of readers can share
//! one [`EmbeddedFs`] without locking. Every [`EmbeddedFs::open`] returns an
//! independent handle with its own cursor.

pub mod cell;
pub mod handle;
pub mod record;
mod tree;

pub use cell::EmbeddedFsCell;
pub use handle::{EmbeddedDir, EmbeddedFile, Handle};
pub use record::{FileRecord, ModTime};

use crate::error::VfsError;
use crate::path::normalize_query;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Read;
use tracing::debug;
use tree::{NodeId, NodeKind, Tree};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    File,
    Directory,
}

/// Stat-style information about a file or directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metadata {
    pub name: String,
    pub kind: FileKind,
    /// Original (uncompressed) size; 0 for directories.
    pub size: u64,
    pub mod_time: DateTime<Utc>,
}

impl Metadata {
    pub fn is_dir(&self) -> bool {
        self.kind == FileKind::Directory
    }

    pub fn is_file(&self) -> bool {
        self.kind == FileKind::File
    }
}

/// Generic read-only filesystem surface.
///
/// Write-class operations exist for callers that expect them and always fail
/// with [`VfsError::Unsupported`].
pub trait FileSystem {
    fn open(&self, path: &str) -> Result<Handle<'_>, VfsError>;

    fn metadata(&self, path: &str) -> Result<Metadata, VfsError>;

    fn read_dir(&self, path: &str) -> Result<Vec<Metadata>, VfsError>;

    fn create(&self, _path: &str) -> Result<EmbeddedFile<'_>, VfsError> {
        Err(VfsError::Unsupported("create"))
    }

    fn create_dir(&self, _path: &str) -> Result<(), VfsError> {
        Err(VfsError::Unsupported("create_dir"))
    }

    fn remove(&self, _path: &str) -> Result<(), VfsError> {
        Err(VfsError::Unsupported("remove"))
    }

    fn rename(&self, _from: &str, _to: &str) -> Result<(), VfsError> {
        Err(VfsError::Unsupported("rename"))
    }
}

/// Filesystem over a flat slice of records.
#[derive(Debug)]
pub struct EmbeddedFs<'a> {
    records: &'a [FileRecord<'a>],
    tree: Tree<'a>,
}

impl<'a> EmbeddedFs<'a> {
    /// Build the directory tree.
    ///
    /// Fails with [`VfsError::CorruptManifest`] when records are not canonical,
    /// repeat a path, or use one path both as a file and as a directory.
    pub fn new(records: &'a [FileRecord<'a>]) -> Result<Self, VfsError> {
        let tree = Tree::build(records)?;
        debug!(
            files = records.len(),
            nodes = tree.len(),
            "built embedded filesystem"
        );
        Ok(Self { records, tree })
    }

    /// Number of files.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Paths of all files in record order.
    pub fn files(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.records.iter().map(|record| record.path)
    }

    pub fn records(&self) -> &'a [FileRecord<'a>] {
        self.records
    }

    fn resolve(&self, path: &str) -> Result<NodeId, VfsError> {
        let segments = normalize_query(path)?;
        self.tree
            .lookup(&segments)
            .ok_or_else(|| VfsError::NotFound(path.to_string()))
    }

    pub fn exists(&self, path: &str) -> bool {
        self.resolve(path).is_ok()
    }

    /// Open a file or directory. `""`, `"."` and `"/"` name the root.
    pub fn open(&self, path: &str) -> Result<Handle<'_>, VfsError> {
        let id = self.resolve(path)?;
        Ok(match self.tree.node(id).kind {
            NodeKind::File { record } => Handle::File(EmbeddedFile::new(&self.records[record])),
            NodeKind::Dir { .. } => Handle::Dir(EmbeddedDir::new(self, id)),
        })
    }

    /// Metadata without opening the entry.
    pub fn metadata(&self, path: &str) -> Result<Metadata, VfsError> {
        Ok(self.node_metadata(self.resolve(path)?))
    }

    pub fn read_dir(&self, path: &str) -> Result<Vec<Metadata>, VfsError> {
        match self.open(path)? {
            Handle::Dir(dir) => Ok(dir.read_dir()),
            Handle::File(_) => Err(VfsError::NotADirectory(path.to_string())),
        }
    }

    /// Whole content of a file.
    pub fn read(&self, path: &str) -> Result<Vec<u8>, VfsError> {
        match self.open(path)? {
            Handle::File(mut file) => Ok(file.contents()?.to_vec()),
            Handle::Dir(_) => Err(VfsError::IsADirectory(path.to_string())),
        }
    }

    /// Whole content of a file as UTF-8 text.
    pub fn read_to_string(&self, path: &str) -> Result<String, std::io::Error> {
        let mut file = self
            .open(path)?
            .into_file()
            .ok_or_else(|| VfsError::IsADirectory(path.to_string()))?;
        let mut text = String::new();
        file.read_to_string(&mut text)?;
        Ok(text)
    }

    pub(crate) fn node_metadata(&self, id: NodeId) -> Metadata {
        let node = self.tree.node(id);
        match node.kind {
            NodeKind::File { record } => Metadata {
                name: node.name.to_string(),
                kind: FileKind::File,
                size: self.records[record].original_size,
                mod_time: node.mod_time.to_datetime(),
            },
            NodeKind::Dir { .. } => Metadata {
                name: node.name.to_string(),
                kind: FileKind::Directory,
                size: 0,
                mod_time: node.mod_time.to_datetime(),
            },
        }
    }
}

impl FileSystem for EmbeddedFs<'_> {
    fn open(&self, path: &str) -> Result<Handle<'_>, VfsError> {
        EmbeddedFs::open(self, path)
    }

    fn metadata(&self, path: &str) -> Result<Metadata, VfsError> {
        EmbeddedFs::metadata(self, path)
    }

    fn read_dir(&self, path: &str) -> Result<Vec<Metadata>, VfsError> {
        EmbeddedFs::read_dir(self, path)
    }
}
