//! token-build - design token compiler
//!
//! Main entry point for the `token-build` binary.

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use token_build::{run, BuildError};
use tracing::{error, info};

mod cli;

use cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing(&cli);

    match execute(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Error building tokens: {e:#}");
            let code = e.downcast_ref::<BuildError>().map_or(1, BuildError::exit_code);
            ExitCode::from(code)
        }
    }
}

fn execute(cli: &Cli) -> anyhow::Result<()> {
    info!("Building design tokens");

    let manifest = cli.load_manifest()?;
    let report = run(&manifest, &cli.options()).with_context(|| {
        format!("token build from {} failed", manifest.tokens_dir.display())
    })?;

    if !report.diagnostics.is_empty() {
        info!(skipped = report.diagnostics.len(), "Some token nodes were skipped");
    }
    info!(
        tokens = report.token_count,
        css = %report.css_path.display(),
        module = %report.module_path.display(),
        "Done"
    );

    Ok(())
}

fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = match std::env::var("RUST_LOG") {
        Ok(directives) if cli.verbose == 0 && !cli.quiet => EnvFilter::new(directives),
        _ => match cli.verbose {
            0 if cli.quiet => EnvFilter::new("error"),
            0 => EnvFilter::new("info"),
            1 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        },
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(cli.verbose >= 2))
        .init();
}
