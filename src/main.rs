use anyhow::Context;
use clap::Parser;
use coordinates_to_star::cli::{run, Cli};
use std::fs::File;
use std::sync::Mutex;
use tracing::Level;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let file = cli.file.display().to_string();
    run(cli).with_context(|| format!("Failed to convert {}", file))
}

/// Logs go to stderr or a file; stdout carries the STAR document.
fn init_logging(cli: &Cli) -> anyhow::Result<()> {
    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };

    let writer = match &cli.log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        None => BoxMakeWriter::new(std::io::stderr),
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(writer)
        .with_ansi(cli.log_file.is_none())
        .init();

    Ok(())
}
