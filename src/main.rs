//! `baku` command-line entry point.
use anyhow::Result;
use clap::Parser;

use baku::cli::{Cli, Command};
use baku::commands;
use baku::config::Settings;
use baku::logging::{Logger, init_subscriber};

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = Cli::parse();

    if let Some(Command::Version) = args.command {
        commands::version::run();
        return Ok(());
    }

    let settings = Settings::resolve(&args.backup)?;
    init_subscriber(args.verbose, settings.log_file.as_deref());
    let log = Logger::new(settings.log_file.clone());

    let result = commands::backup::run(&settings, &log);
    log.print_summary();
    result
}
