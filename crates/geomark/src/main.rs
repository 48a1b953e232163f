use clap::Parser;
use geomark::{
    banner,
    cli::{Cli, Command},
    config::Config,
    core::{
        bootstrap::Bootstrap,
        mode::Mode,
        store::{CollectionStore, FileStore},
    },
    inspect, telemetry,
};
use std::process::ExitCode;
use tracing::{error, info};

fn main() -> ExitCode {
    // resolved before clap so a stray --dev anywhere still counts
    let mode = Mode::resolve(std::env::args_os());
    let cli = Cli::parse();

    let config = match cli.load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("geomark: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = telemetry::init(&config.log, cli.verbose) {
        eprintln!("geomark: failed to initialise logging: {e}");
        return ExitCode::FAILURE;
    }

    match cli.command() {
        Command::Bootstrap => run_bootstrap(mode, &config),
        Command::Inspect => run_inspect(&config),
    }
}

fn open_store(config: &Config) -> Option<FileStore> {
    match FileStore::open(&config.store.path) {
        Ok(store) => Some(store),
        Err(e) => {
            error!(class = %e.class(), "failed to open store: {e}");
            None
        }
    }
}

fn run_bootstrap(mode: Mode, config: &Config) -> ExitCode {
    info!("{}", banner::render(mode));

    let Some(mut store) = open_store(config) else {
        return ExitCode::FAILURE;
    };

    let report = Bootstrap::new(mode)
        .with_fixture(&config.seed.fixture)
        .with_truncate(config.seed.truncate)
        .run(&mut store);

    match report {
        Ok(report) => {
            info!(
                store = %store.path().display(),
                created = ?report.schema.created,
                kept = ?report.schema.kept,
                dropped = ?report.schema.dropped,
                seeded = !report.seed.skipped,
                clusters = report.seed.clusters,
                markers = report.seed.markers,
                "store ready"
            );
            info!("Running in {} mode", mode.label());

            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("bootstrap failed: {}", e.display_with_class());

            ExitCode::FAILURE
        }
    }
}

fn run_inspect(config: &Config) -> ExitCode {
    let Some(store) = open_store(config) else {
        return ExitCode::FAILURE;
    };

    let rendered = inspect::summarize(&store)
        .map_err(|e| e.to_string())
        .and_then(|summary| serde_json::to_string_pretty(&summary).map_err(|e| e.to_string()));

    match rendered {
        Ok(json) => {
            println!("{json}");
            info!(
                store = %store.path().display(),
                collections = store.collections().len(),
                "inspected"
            );

            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("inspect failed: {e}");

            ExitCode::FAILURE
        }
    }
}
