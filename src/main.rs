use clap::Parser;
use cellpick::cli::commands::Cli;
use cellpick::cli::handlers;
use cellpick::io::config_io::load_config;
use cellpick::logging::{self, LogTarget};

fn main() {
    let cli = Cli::parse();

    // The TUI owns the terminal, so it only logs to a file
    let target = match (&cli.log_file, &cli.command) {
        (Some(path), _) => LogTarget::File(path),
        (None, None) => LogTarget::Off,
        (None, Some(_)) => LogTarget::Stderr,
    };
    if let Err(e) = logging::init(target) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }

    let result = if cli.command.is_none() {
        run_tui(&cli)
    } else {
        handlers::dispatch(cli)
    };
    if let Err(e) = result {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run_tui(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(cli.config.as_deref())?;
    cellpick::tui::run(cli.workbook.as_deref(), cli.sheet.as_deref(), config)
}
