mod bootstrap;

use anyhow::Result;
use clap::Parser;
use powerlog_core::settings::Settings;
use powerlog_data::standardize::standardize_dir;

fn main() -> Result<()> {
    let settings = Settings::parse();

    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;

    tracing::info!(
        "powerlog-standardize v{} starting",
        env!("CARGO_PKG_VERSION")
    );

    let outdir = settings.resolved_outdir();
    bootstrap::ensure_output_dir(&outdir)?;

    tracing::info!(
        "Scanning {} (source: {}); results go to {}",
        settings.indir.display(),
        settings.source,
        outdir.display()
    );

    let batch = standardize_dir(&settings.indir, &outdir, settings.source_filter())?;

    for summary in &batch.summaries {
        println!(
            "{} -> {}  [{} rows, {} {} .. {} {}]",
            summary.source_file,
            summary.standardized_file,
            summary.rows,
            summary.start_date,
            summary.start_time,
            summary.end_date,
            summary.end_time
        );
    }
    for (path, err) in &batch.skipped {
        eprintln!("skipped {}: {}", path.display(), err);
    }

    println!(
        "{} file(s) standardized, {} skipped",
        batch.processed(),
        batch.skipped.len()
    );

    Ok(())
}
