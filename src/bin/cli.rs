use anyhow::{Context, Result};
use clap::Parser;
use clarity::config::ReportFormat;
use clarity::report::to_json;
use clarity::{run_batch, Channel, ClarityConfig, ReportWriter};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

/// Rank the images of a directory from most blurred to sharpest
#[derive(Parser, Debug)]
#[command(name = "clarity", version, about)]
struct Args {
    /// Directory of images (defaults to input.directory from the config)
    dir: Option<PathBuf>,
    /// Optional TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Sobel aperture for Tenengrad (odd, 1-31)
    #[arg(long)]
    ksize: Option<usize>,
    /// Colour component to measure (default: blue, the first BGR channel)
    #[arg(long, value_enum)]
    channel: Option<Channel>,
    /// Decimal places for printed scores (default: six significant digits)
    #[arg(long)]
    precision: Option<usize>,
    /// Print the report as JSON
    #[arg(long)]
    json: bool,
    /// Group the final report by image instead of by rank
    #[arg(long)]
    grouped: bool,
}

impl Args {
    fn resolve_config(&self) -> Result<ClarityConfig> {
        let mut config = match &self.config {
            Some(path) => ClarityConfig::load_from_file(path)?,
            None => ClarityConfig::default(),
        };

        if let Some(dir) = &self.dir {
            config.input.directory = dir.clone();
        }
        if let Some(ksize) = self.ksize {
            config.analysis.teng_kernel_size = ksize;
        }
        if let Some(channel) = self.channel {
            config.analysis.channel = channel;
        }
        if self.precision.is_some() {
            config.report.precision = self.precision;
        }
        if self.json {
            config.report.format = ReportFormat::Json;
        }
        if self.grouped {
            config.report.grouped = true;
        }

        config.validate()?;
        Ok(config)
    }
}

fn run(args: &Args) -> Result<i32> {
    let config = args.resolve_config()?;
    let writer = ReportWriter::new(config.report.precision);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    log::info!(
        "Analyzing {:?} (channel={}, teng ksize={})",
        config.input.directory,
        config.analysis.channel.as_str(),
        config.analysis.teng_kernel_size
    );

    let text = config.report.format == ReportFormat::Text;
    let mut write_error = None;
    let report = run_batch(&config.input.directory, &config, |path, metrics| {
        if text && write_error.is_none() {
            write_error = writer.write_image_scores(&mut out, path, metrics).err();
        }
    })?;
    if let Some(e) = write_error {
        return Err(e).context("Failed to write image scores");
    }

    match config.report.format {
        ReportFormat::Json => writeln!(out, "{}", to_json(&report)?)?,
        ReportFormat::Text if config.report.grouped => writer.write_grouped(&mut out, &report)?,
        ReportFormat::Text => writer.write_ranked(&mut out, &report)?,
    }
    out.flush()?;

    writer.write_failures(&mut io::stderr(), &report)?;
    Ok(report.exit_code())
}

fn main() -> ExitCode {
    clarity::init_logging();
    let args = Args::parse();

    match run(&args) {
        Ok(code) => ExitCode::from(code as u8),
        Err(e) => {
            eprintln!("clarity: {:#}", e);
            ExitCode::from(2)
        }
    }
}
