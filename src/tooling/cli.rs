//! CLI Tooling
//!
//! Command-line generator: expands the given files and directories, feeds them
//! through the encoder and writes the generated module to a file or stdout.

use crate::config::{ConfigLoader, GeneratorConfig};
use crate::encoder::{generate, GenerationReport};
use crate::error::CliError;
use crate::logging::overlay_env;
use crate::report::{format_report_json, format_report_text};
use crate::tooling::inputs::{expand_inputs, InputFile};
use chrono::{DateTime, Utc};
use clap::{Parser, ValueEnum};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Report printed after generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    None,
    Text,
    Json,
}

/// embedfs - embed files into a generated Rust module
#[derive(Parser, Debug)]
#[command(name = "embedfs")]
#[command(about = "Generate a Rust module embedding files behind a read-only virtual filesystem")]
pub struct Cli {
    /// Name of the generated module
    pub package: String,

    /// Files to embed; directories are added recursively
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Resolve inputs and output relative to this directory
    #[arg(short = 'w', long = "cwd")]
    pub cwd: Option<PathBuf>,

    /// Comma-delimited cfg predicates guarding the module
    #[arg(long, value_delimiter = ',')]
    pub tags: Option<Vec<String>>,

    /// Compress data with gzip
    #[arg(long)]
    pub gzip: bool,

    /// Minimal reduction in size relative to the uncompressed size, in percent
    #[arg(long)]
    pub min_gzip_space_savings: Option<f64>,

    /// Remove the specified number of leading path elements
    #[arg(long)]
    pub strip: Option<usize>,

    /// Report printed to stderr after generation
    #[arg(long, value_enum, default_value = "none")]
    pub report: ReportFormat,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off); overrides EMBEDFS_LOG
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Resolved settings for one CLI invocation.
pub struct CliContext {
    config: GeneratorConfig,
    base: PathBuf,
}

impl CliContext {
    /// Load configuration and apply command-line overrides.
    pub fn new(cli: &Cli) -> Result<Self, CliError> {
        let mut config = match &cli.config {
            Some(path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load()?,
        };
        layer_overrides(&mut config, cli, |name| std::env::var(name).ok());
        config.validate()?;

        Ok(Self {
            config,
            base: cli.cwd.clone().unwrap_or_else(|| PathBuf::from(".")),
        })
    }

    /// Build a context from an already merged configuration.
    pub fn with_config(config: GeneratorConfig, base: PathBuf) -> Self {
        Self { config, base }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Run the generator and return the report text (empty for `--report none`).
    pub fn execute(&self, cli: &Cli) -> Result<String, CliError> {
        let inputs = expand_inputs(&self.base, &cli.files)?;
        info!(files = inputs.len(), package = %cli.package, "collected inputs");

        let report = match &cli.output {
            Some(output) => self.generate_to_file(&cli.package, &inputs, &self.base.join(output))?,
            None => {
                let stdout = std::io::stdout();
                let (mut sink, report) =
                    self.generate_into(BufWriter::new(stdout.lock()), &cli.package, &inputs)?;
                sink.flush()
                    .map_err(|e| CliError::io("flush stdout", e))?;
                report
            }
        };

        Ok(match cli.report {
            ReportFormat::None => String::new(),
            ReportFormat::Text => format_report_text(&report),
            ReportFormat::Json => format_report_json(&report)
                .map_err(|e| CliError::ConfigError(format!("Failed to render report: {}", e)))?,
        })
    }

    /// Write the module through a temporary file that only replaces `output`
    /// once the footer is written.
    pub fn generate_to_file(
        &self,
        package: &str,
        inputs: &[InputFile],
        output: &Path,
    ) -> Result<GenerationReport, CliError> {
        let dir = match output.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir)
            .map_err(|e| CliError::io(format!("create directories {}", dir.display()), e))?;
        let temp = tempfile::NamedTempFile::new_in(&dir)
            .map_err(|e| CliError::io(format!("create temporary file in {}", dir.display()), e))?;

        let (sink, report) = self.generate_into(BufWriter::new(temp), package, inputs)?;
        let temp = sink
            .into_inner()
            .map_err(|e| CliError::io("flush output", e.into_error()))?;
        temp.persist(output)
            .map_err(|e| CliError::io(format!("write {}", output.display()), e.error))?;
        debug!(output = %output.display(), "persisted generated module");
        Ok(report)
    }

    /// Encode `inputs` into `sink`.
    pub fn generate_into<W: Write>(
        &self,
        sink: W,
        package: &str,
        inputs: &[InputFile],
    ) -> Result<(W, GenerationReport), CliError> {
        generate(sink, package, self.config.encoder_options(), |encoder| {
            for input in inputs {
                let (content, mod_time) = read_input(&input.source)?;
                encoder.add_file(&input.logical.to_string_lossy(), &content, mod_time)?;
            }
            Ok(())
        })
    }
}

fn read_input(path: &Path) -> Result<(Vec<u8>, DateTime<Utc>), CliError> {
    let metadata =
        std::fs::metadata(path).map_err(|e| CliError::io(format!("stat {}", path.display()), e))?;
    let modified = metadata
        .modified()
        .map_err(|e| CliError::io(format!("mod time {}", path.display()), e))?;
    let content =
        std::fs::read(path).map_err(|e| CliError::io(format!("read file {}", path.display()), e))?;
    Ok((content, DateTime::<Utc>::from(modified)))
}

/// Logging environment variables, then command-line flags, over `config`.
fn layer_overrides(
    config: &mut GeneratorConfig,
    cli: &Cli,
    env: impl Fn(&str) -> Option<String>,
) {
    overlay_env(&mut config.logging, env);
    apply_overrides(config, cli);
}

fn apply_overrides(config: &mut GeneratorConfig, cli: &Cli) {
    if cli.gzip {
        config.gzip = true;
    }
    if let Some(percent) = cli.min_gzip_space_savings {
        config.min_gzip_space_savings = percent;
    }
    if let Some(strip) = cli.strip {
        config.strip = strip;
    }
    if let Some(tags) = &cli.tags {
        config.tags = tags.clone();
    }
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    if let Some(format) = &cli.log_format {
        config.logging.format = format.clone();
    }
    if let Some(output) = &cli.log_output {
        config.logging.output = output.clone();
    }
    if let Some(file) = &cli.log_file {
        config.logging.file = Some(file.clone());
    }
}
