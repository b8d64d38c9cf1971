use clap::Parser;
use std::path::PathBuf;

use crate::schema::SourceTool;

/// Default output directory name, created under the input directory.
pub const DEFAULT_OUTPUT_DIR: &str = "__STD_RAW_OUTPUT";

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Standardization of raw performance-log exports
#[derive(Parser, Debug, Clone)]
#[command(
    name = "powerlog-standardize",
    about = "Standardization of raw performance-log exports",
    version
)]
pub struct Settings {
    /// Directory to scan for raw exports
    #[arg(long, default_value = ".")]
    pub indir: PathBuf,

    /// Directory for standardized output (default: <indir>/__STD_RAW_OUTPUT)
    #[arg(long)]
    pub outdir: Option<PathBuf>,

    /// Restrict processing to one source tool
    #[arg(long, default_value = "all", value_parser = ["ipg", "script2", "all"])]
    pub source: String,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Settings {
    /// The output directory, falling back to `<indir>/__STD_RAW_OUTPUT`.
    pub fn resolved_outdir(&self) -> PathBuf {
        self.outdir
            .clone()
            .unwrap_or_else(|| self.indir.join(DEFAULT_OUTPUT_DIR))
    }

    /// The source-tool filter implied by `--source`; `None` means all tools.
    pub fn source_filter(&self) -> Option<SourceTool> {
        match self.source.as_str() {
            "ipg" => Some(SourceTool::PowerGadget),
            "script2" => Some(SourceTool::StatsScript),
            _ => None,
        }
    }
}
