//! Generation report processor entry point: CLI wiring, config and the watch loop.

use std::process;
use std::sync::Arc;

use generation_report::cli::{parse_args, print_usage};
use generation_report::config::AppConfig;
use generation_report::runner::Processor;
use generation_report::telemetry::init_tracing;
use generation_report::watch::watch_until_quit;
use tracing::error;

fn main() {
    let cli = match parse_args() {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("error: {e}");
            print_usage();
            process::exit(1);
        }
    };
    if cli.help {
        print_usage();
        return;
    }

    init_tracing();

    // Load config: --config, then appsettings.toml if present, then defaults
    let mut config = match AppConfig::load(cli.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("{e}");
            process::exit(1);
        }
    };

    // Apply path overrides
    if let Some(input) = cli.input {
        config.paths.input_folder = input;
    }
    if let Some(output) = cli.output {
        config.paths.output_folder = output;
    }
    if let Some(reference) = cli.reference {
        config.paths.reference_data = reference;
    }

    // Validate
    let errors = config.validate();
    if !errors.is_empty() {
        for e in &errors {
            error!("{e}");
        }
        process::exit(1);
    }

    let processor = Arc::new(Processor::new(config));

    if let Err(e) = processor.process_existing() {
        error!("{e}");
        process::exit(1);
    }

    if cli.once {
        return;
    }

    if let Err(e) = watch_until_quit(processor) {
        error!("{e}");
        process::exit(1);
    }
}
