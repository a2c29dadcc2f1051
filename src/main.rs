//! Binary entry point: parse the command line, set up file logging, and drive
//! the Ratatui event loop until the user exits.
use clap::Parser;
use roster_manager::telemetry::init_tracing;
use roster_manager::{run_app, App, Cli, TRACING_TARGET_STARTUP};

fn main() -> anyhow::Result<()> {
    let settings = Cli::parse().into_settings()?;

    if let Some(log_file) = &settings.log_file {
        init_tracing(log_file)?;
    }
    tracing::info!(
        target: TRACING_TARGET_STARTUP,
        start = ?settings.start,
        courses = ?settings.courses,
        salary_threshold = settings.salary_threshold,
        "starting roster manager"
    );

    let mut app = App::new(settings);
    let result = run_app(&mut app);

    match &result {
        Ok(()) => tracing::info!(target: TRACING_TARGET_STARTUP, "roster manager exited"),
        Err(error) => tracing::error!(
            target: TRACING_TARGET_STARTUP,
            error = %error,
            "roster manager terminated with error"
        ),
    }
    result
}
