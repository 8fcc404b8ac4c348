//! Process-wide holder used by generated modules.

use super::record::FileRecord;
use super::EmbeddedFs;
use crate::error::VfsError;
use once_cell::sync::OnceCell;
use tracing::error;

/// Lazily built filesystem over a `static` record table.
///
/// The tree is built by the first caller; concurrent first calls wait for that
/// build instead of racing it, and later calls return the same tree or the
/// same error.
pub struct EmbeddedFsCell {
    records: &'static [FileRecord<'static>],
    fs: OnceCell<Result<EmbeddedFs<'static>, VfsError>>,
}

impl EmbeddedFsCell {
    pub const fn new(records: &'static [FileRecord<'static>]) -> Self {
        Self {
            records,
            fs: OnceCell::new(),
        }
    }

    pub fn get(&self) -> Result<&EmbeddedFs<'static>, VfsError> {
        self.fs
            .get_or_init(|| {
                EmbeddedFs::new(self.records).map_err(|err| {
                    error!(error = %err, "embedded records are inconsistent");
                    err
                })
            })
            .as_ref()
            .map_err(Clone::clone)
    }

    pub fn is_initialized(&self) -> bool {
        self.fs.get().is_some()
    }
}
