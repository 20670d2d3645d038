use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "eventslides", version, about = "Render upcoming events as venue-screen slides")]
struct Cli {
    /// JSON configuration file; absent keys keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Pin the current time (RFC 3339), e.g. for reproducible decks.
    #[arg(long)]
    now: Option<String>,

    /// Override the output directory.
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Log at debug level.
    #[arg(long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut cfg = match &cli.config {
        Some(path) => eventslides::DeckConfig::from_path(path)?,
        None => eventslides::DeckConfig::default(),
    };
    if let Some(out_dir) = cli.out_dir {
        cfg.paths.output_dir = out_dir;
    }

    let now = match &cli.now {
        Some(raw) => chrono::DateTime::parse_from_rfc3339(raw)
            .with_context(|| format!("parse --now '{raw}'"))?
            .with_timezone(&cfg.time_zone),
        None => chrono::Utc::now().with_timezone(&cfg.time_zone),
    };

    let source = eventslides::JsonEventFiles::from_config(&cfg);
    let report = eventslides::DeckGenerator::new(&cfg).run(&source, now)?;
    eprintln!(
        "wrote {} slides ({} events, {} info) to {}",
        report.slides_written(),
        report.events,
        report.info_slides,
        cfg.paths.output_dir.display()
    );
    Ok(())
}
