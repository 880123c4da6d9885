use clap::Parser;
use pmlite::cli::commands::{Cli, Commands};
use pmlite::cli::handlers;
use tracing_subscriber::EnvFilter;

/// Log filter: PMLITE_LOG when set, otherwise warn, raised by each -v.
fn init_tracing(verbose: u8) {
    let fallback = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_env("PMLITE_LOG").unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        // Init is handled before workspace discovery
        Commands::Init(args) => handlers::cmd_init(args, cli.project_dir.as_deref()),
        _ => handlers::dispatch(cli),
    };
    if let Err(e) = result {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
