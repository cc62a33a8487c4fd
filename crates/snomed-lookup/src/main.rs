//! SNOMED CT concept lookup binary.

use std::io::Write;
use std::process::ExitCode;

use snomed_finder::{ConceptFinder, SqliteSource};
use snomed_lookup::{report, Command, LookupConfig, LookupError};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

fn run() -> Result<(), LookupError> {
    let command = Command::parse(std::env::args().skip(1))?;
    let config = LookupConfig::from_env();

    tracing::info!("Opening reference database: {}", config.db_path.display());
    let source = SqliteSource::open(&config.db_path)?.with_max_rows(config.max_rows);
    let finder = ConceptFinder::with_config(source, config.finder_config());

    tracing::debug!("Running {:?} (max rows {})", command, config.max_rows);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    report::run(&finder, &command, &mut out)?;
    out.flush()?;

    Ok(())
}
