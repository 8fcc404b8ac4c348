//! embedfs: files compiled into a read-only virtual filesystem
//!
//! Two halves share this crate. The build-time [`encoder`] turns a sequence of
//! files into a generated Rust module holding one [`FileRecord`] per file,
//! optionally gzip-compressed. The runtime [`vfs`] rebuilds the directory tree
//! from those records and serves lookups, streaming reads and listings.
//!
//! Generated modules refer to this crate by absolute path (`::embedfs::...`),
//! so the runtime types below are re-exported at the root.

pub mod compression;
pub mod config;
pub mod encoder;
pub mod error;
pub mod logging;
pub mod path;
pub mod report;
pub mod tooling;
pub mod vfs;

pub use encoder::{generate, Encoder, EncoderOptions, GenerationReport, RecordSummary};
pub use error::{CliError, EncodeError, PathError, VfsError};
pub use vfs::{
    EmbeddedDir, EmbeddedFile, EmbeddedFs, EmbeddedFsCell, FileKind, FileRecord, FileSystem,
    Handle, Metadata, ModTime,
};
