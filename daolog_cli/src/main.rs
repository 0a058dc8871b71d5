mod cli;
mod error_fmt;
mod logging;
mod run;

use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;

use crate::cli::{Cli, JSON_MODE};
use crate::error_fmt::{exit_code_for_error, format_error_json, humanize};

fn main() {
    let cli = Cli::parse();
    let _ = JSON_MODE.set(cli.json);

    if !cli.json {
        let _ = color_eyre::install();
    }

    let guard = match logging::init(&cli.log_level, cli.json, cli.diag_file.as_deref()) {
        Ok(g) => g,
        Err(e) => report_and_exit(&e, None),
    };

    match run::run(&cli) {
        Ok(outcome) => println!("{}", outcome.render(cli.json)),
        Err(e) => {
            tracing::error!(error = %e, "daolog failed");
            report_and_exit(&e, guard);
        }
    }
}

fn report_and_exit(err: &eyre::Report, guard: Option<WorkerGuard>) -> ! {
    // process::exit skips destructors; flush the diagnostics file first.
    drop(guard);
    if JSON_MODE.get().copied().unwrap_or(false) {
        eprintln!("{}", format_error_json(err));
    } else {
        eprintln!("{}", humanize(err));
    }
    std::process::exit(exit_code_for_error(err));
}
