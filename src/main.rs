// Entrypoint for the CLI application.
// - Keeps `main` small: parse arguments, build an API client and hand it to
//   the selected mode.
// - Errors are printed on stderr and mapped to an exit code.

use anyhow::Context;
use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};
use vws_targets::api::{ApiClient, ClientConfig, Credentials};
use vws_targets::cli::Cli;
use vws_targets::error::{exitcode, VwsError};
use vws_targets::ui;

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.debug);

    let code = match execute(&cli) {
        Ok(()) => exitcode::OK,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            e.downcast_ref::<VwsError>()
                .map(VwsError::exit_code)
                .unwrap_or(exitcode::REMOTE)
        }
    };
    std::process::exit(code);
}

fn execute(cli: &Cli) -> anyhow::Result<()> {
    let credentials = Credentials::new(cli.access_key.as_str(), cli.secret_key.as_bytes());
    let api = ApiClient::new(ClientConfig::with_base_url(cli.endpoint.as_str()), credentials)
        .context("Failed to build HTTP client")?;
    ui::run(&api, cli.mode, cli.path.as_deref())?;
    Ok(())
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(filter);

    tracing_subscriber::registry().with(fmt_layer).init();
}
