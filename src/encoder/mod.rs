//! Embedded module encoder
//!
//! Streams a generated Rust module into a sink: a header opening the module and
//! the record table, one `FileRecord` literal per file, and a footer that closes
//! the table and exposes the runtime filesystem. Only the file currently being
//! added is held in memory; the manifest keeps sizes and paths, never content.

pub mod literal;

use crate::compression::{space_savings, CompressionPolicy, DEFAULT_MIN_SPACE_SAVINGS};
use crate::error::EncodeError;
use crate::path::PathNormalizer;
use crate::vfs::ModTime;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;
use tracing::{debug, info};

const INDENT: &str = "    ";

/// Generation options.
#[derive(Debug, Clone, PartialEq)]
pub struct EncoderOptions {
    /// `cfg` predicates, emitted verbatim as `#[cfg(any(..))]`; empty disables
    /// conditional compilation.
    pub tags: Vec<String>,
    /// Consider gzip compression for each file.
    pub gzip: bool,
    /// Minimum space savings (percent) required to store compressed content.
    pub min_gzip_space_savings: f64,
    /// Leading path elements removed from every added path.
    pub strip: usize,
}

impl Default for EncoderOptions {
    fn default() -> Self {
        Self {
            tags: Vec::new(),
            gzip: false,
            min_gzip_space_savings: DEFAULT_MIN_SPACE_SAVINGS,
            strip: 0,
        }
    }
}

impl EncoderOptions {
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_gzip(mut self, gzip: bool) -> Self {
        self.gzip = gzip;
        self
    }

    pub fn with_min_gzip_space_savings(mut self, percent: f64) -> Self {
        self.min_gzip_space_savings = percent;
        self
    }

    pub fn with_strip(mut self, strip: usize) -> Self {
        self.strip = strip;
        self
    }

    fn compression_policy(&self) -> CompressionPolicy {
        CompressionPolicy::new(self.gzip, self.min_gzip_space_savings)
    }
}

/// What was written for one file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordSummary {
    pub path: String,
    pub original_size: u64,
    pub stored_size: u64,
    pub compressed: bool,
    pub mod_time: DateTime<Utc>,
}

impl RecordSummary {
    pub fn space_savings(&self) -> f64 {
        space_savings(self.original_size, self.stored_size)
    }
}

/// Manifest of a finished generation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationReport {
    pub package: String,
    pub tags: Vec<String>,
    pub records: Vec<RecordSummary>,
}

impl GenerationReport {
    pub fn total_original_size(&self) -> u64 {
        self.records.iter().map(|r| r.original_size).sum()
    }

    pub fn total_stored_size(&self) -> u64 {
        self.records.iter().map(|r| r.stored_size).sum()
    }

    pub fn compressed_count(&self) -> usize {
        self.records.iter().filter(|r| r.compressed).count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Nothing written yet.
    Fresh,
    /// Header written, records may follow.
    Open,
    /// Footer written.
    Closed,
    /// A write to the sink failed; the output is unusable.
    Failed,
}

/// Streaming writer for one generated module.
///
/// Owned by its creator; independent encoders share no state.
pub struct Encoder<W: Write> {
    sink: W,
    package: String,
    tags: Vec<String>,
    policy: CompressionPolicy,
    normalizer: PathNormalizer,
    manifest: Vec<RecordSummary>,
    state: State,
}

impl<W: Write> Encoder<W> {
    /// Create an encoder writing a module named `package` into `sink`.
    ///
    /// Nothing is written until the first record or the footer.
    pub fn new(sink: W, package: &str, options: EncoderOptions) -> Self {
        let tags = options
            .tags
            .iter()
            .filter(|tag| !tag.is_empty())
            .cloned()
            .collect();
        Self {
            sink,
            package: package.to_string(),
            tags,
            policy: options.compression_policy(),
            normalizer: PathNormalizer::new(options.strip),
            manifest: Vec::new(),
            state: State::Fresh,
        }
    }

    /// Records written so far, in emission order.
    pub fn manifest(&self) -> &[RecordSummary] {
        &self.manifest
    }

    pub fn is_closed(&self) -> bool {
        matches!(self.state, State::Closed | State::Failed)
    }

    /// Add one file.
    ///
    /// Path errors leave the encoder usable: nothing was written for the
    /// rejected file. A failed write closes the encoder for good.
    pub fn add_file(
        &mut self,
        path: &str,
        content: &[u8],
        mod_time: DateTime<Utc>,
    ) -> Result<&RecordSummary, EncodeError> {
        if self.is_closed() {
            return Err(EncodeError::Closed);
        }
        let path = self.normalizer.normalize(path)?;
        let stored = self.policy.decide(content)?;

        let summary = RecordSummary {
            path,
            original_size: stored.original_size,
            stored_size: stored.stored_size(),
            compressed: stored.is_compressed(),
            mod_time,
        };
        if let Err(err) = self.write_record(&summary, &stored.bytes) {
            self.state = State::Failed;
            return Err(err.into());
        }
        debug!(
            path = %summary.path,
            original_size = summary.original_size,
            stored_size = summary.stored_size,
            compressed = summary.compressed,
            "embedded file"
        );
        self.manifest.push(summary);
        Ok(&self.manifest[self.manifest.len() - 1])
    }

    /// Close the record table and the module.
    ///
    /// Valid with zero records. Fails with [`EncodeError::Closed`] when called
    /// twice or after a failed write.
    pub fn write_footer(&mut self) -> Result<GenerationReport, EncodeError> {
        if self.is_closed() {
            return Err(EncodeError::Closed);
        }
        if let Err(err) = self.write_footer_inner() {
            self.state = State::Failed;
            return Err(err.into());
        }
        self.state = State::Closed;

        let report = GenerationReport {
            package: self.package.clone(),
            tags: self.tags.clone(),
            records: std::mem::take(&mut self.manifest),
        };
        info!(
            package = %report.package,
            files = report.records.len(),
            original_bytes = report.total_original_size(),
            stored_bytes = report.total_stored_size(),
            "wrote embedded module"
        );
        Ok(report)
    }

    /// Give back the sink.
    pub fn into_inner(self) -> W {
        self.sink
    }

    fn ensure_header(&mut self) -> std::io::Result<()> {
        if self.state != State::Fresh {
            return Ok(());
        }
        let sink = &mut self.sink;
        writeln!(sink, "// Code generated by embedfs. DO NOT EDIT.")?;
        writeln!(sink)?;
        if !self.tags.is_empty() {
            writeln!(sink, "#[cfg(any({}))]", self.tags.join(", "))?;
        }
        writeln!(sink, "#[allow(dead_code)]")?;
        writeln!(sink, "pub mod {} {{", self.package)?;
        writeln!(
            sink,
            "{INDENT}static RECORDS: &[::embedfs::FileRecord<'static>] = &["
        )?;
        self.state = State::Open;
        Ok(())
    }

    fn write_record(&mut self, summary: &RecordSummary, bytes: &[u8]) -> std::io::Result<()> {
        self.ensure_header()?;
        let mod_time = ModTime::from(summary.mod_time);
        let pad = INDENT.repeat(2);
        let field = INDENT.repeat(3);
        let sink = &mut self.sink;
        writeln!(sink, "{pad}::embedfs::FileRecord {{")?;
        writeln!(sink, "{field}path: {},", literal::string_literal(&summary.path))?;
        write!(sink, "{field}content: ")?;
        literal::write_byte_string(sink, bytes)?;
        writeln!(sink, ",")?;
        writeln!(sink, "{field}compressed: {},", summary.compressed)?;
        writeln!(sink, "{field}original_size: {},", summary.original_size)?;
        writeln!(sink, "{field}stored_size: {},", summary.stored_size)?;
        writeln!(
            sink,
            "{field}mod_time: ::embedfs::ModTime::new({}, {}),",
            mod_time.secs, mod_time.nanos
        )?;
        writeln!(sink, "{pad}}},")?;
        Ok(())
    }

    fn write_footer_inner(&mut self) -> std::io::Result<()> {
        self.ensure_header()?;
        let sink = &mut self.sink;
        writeln!(sink, "{INDENT}];")?;
        writeln!(sink)?;
        writeln!(
            sink,
            "{INDENT}static FS: ::embedfs::EmbeddedFsCell = ::embedfs::EmbeddedFsCell::new(RECORDS);"
        )?;
        writeln!(sink)?;
        writeln!(
            sink,
            "{INDENT}/// Embedded filesystem, built on first use."
        )?;
        writeln!(
            sink,
            "{INDENT}pub fn fs() -> ::core::result::Result<&'static ::embedfs::EmbeddedFs<'static>, ::embedfs::VfsError> {{"
        )?;
        writeln!(sink, "{INDENT}{INDENT}FS.get()")?;
        writeln!(sink, "{INDENT}}}")?;
        writeln!(sink)?;
        writeln!(
            sink,
            "{INDENT}pub fn open(path: &str) -> ::core::result::Result<::embedfs::Handle<'static>, ::embedfs::VfsError> {{"
        )?;
        writeln!(sink, "{INDENT}{INDENT}fs()?.open(path)")?;
        writeln!(sink, "{INDENT}}}")?;
        writeln!(sink, "}}")?;
        sink.flush()
    }
}

/// Run `body` against a fresh encoder and write the footer if it succeeds.
///
/// When `body` fails the footer is never written and the error is returned;
/// whatever reached the sink must be discarded by the caller.
pub fn generate<W, E, F>(
    sink: W,
    package: &str,
    options: EncoderOptions,
    body: F,
) -> Result<(W, GenerationReport), E>
where
    W: Write,
    E: From<EncodeError>,
    F: FnOnce(&mut Encoder<W>) -> Result<(), E>,
{
    let mut encoder = Encoder::new(sink, package, options);
    body(&mut encoder)?;
    let report = encoder.write_footer()?;
    Ok((encoder.into_inner(), report))
}
