//! systags CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use systags::cli::{Cli, CommandDispatcher};
use systags::store::FileRepository;
use systags::ui::{ConsoleUI, UserInterface};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag (or `SYSTAGS_DEBUG`) sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("systags=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("systags=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    // Flag and subcommand parse failures exit 1 like every other failure;
    // --help and --version surface as clap "errors" but still exit 0.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(u8::from(e.use_stderr()));
        }
    };
    init_tracing(cli.debug);

    tracing::debug!("systags starting with args: {:?}", cli);

    let repository = FileRepository::new(&cli.config_dir, &cli.system_dir);
    let dispatcher = CommandDispatcher::new(repository);
    let mut ui = ConsoleUI::new();

    match dispatcher.dispatch(&cli, &mut ui) {
        Ok(result) => ExitCode::from(result.exit_code as u8),
        Err(e) => {
            ui.error(&format!("Error: {}", e));
            ExitCode::from(1)
        }
    }
}
