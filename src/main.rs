use clap::Command;
use ringlog::*;

use std::time::Duration;

mod aggregate;
mod config;
mod dataset;
mod error;
mod figure;
mod figures;
mod interaction;
mod viewer;

fn main() {
    let cli = Command::new(env!("CARGO_BIN_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .about("Interactive dashboard of world energy consumption")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(viewer::command())
        .subcommand(figures::command())
        .get_matches();

    let result = match cli.subcommand() {
        Some(("serve", args)) => {
            let config = viewer::Config::try_from(args.clone()).unwrap_or_else(|e| fail(&e));
            configure_logging(config.verbose);
            viewer::run(config)
        }
        Some(("figures", args)) => {
            let config = figures::Config::try_from(args.clone()).unwrap_or_else(|e| fail(&e));
            configure_logging(config.verbose);
            figures::run(config)
        }
        _ => unreachable!("subcommand_required"),
    };

    if let Err(e) = result {
        fail(&format!("{e:#}"));
    }
}

fn fail(message: &str) -> ! {
    eprintln!("error: {message}");
    std::process::exit(1);
}

/// Log to stderr at a level picked by the `-v` count, with a background
/// thread flushing the log buffer.
fn configure_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::Info,
        1 => Level::Debug,
        _ => Level::Trace,
    };

    let debug_output: Box<dyn Output> = Box::new(Stderr::new());

    let debug_log = if level <= Level::Info {
        LogBuilder::new().format(ringlog::default_format)
    } else {
        LogBuilder::new()
    }
    .output(debug_output)
    .build();

    let debug_log = match debug_log {
        Ok(log) => log,
        Err(e) => fail(&format!("failed to initialize logging: {e:?}")),
    };

    let mut log = MultiLogBuilder::new()
        .level_filter(level.to_level_filter())
        .default(debug_log)
        .build()
        .start();

    std::thread::spawn(move || loop {
        let _ = log.flush();
        std::thread::sleep(Duration::from_millis(100));
    });
}
