use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "cellpick",
    about = concat!("cellpick v", env!("CARGO_PKG_VERSION"), " - list dropdowns and column autocomplete for a spreadsheet grid"),
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Workbook JSON file
    #[arg(short = 'w', long, global = true)]
    pub workbook: Option<PathBuf>,

    /// Sheet to work on (name or id); defaults to the workbook's current sheet
    #[arg(long, global = true)]
    pub sheet: Option<String>,

    /// Config file (cellpick.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Append logs to this file (filter with CELLPICK_LOG)
    #[arg(long = "log-file", global = true)]
    pub log_file: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show what the overlay would offer for a cell
    Candidates(CandidatesArgs),
    /// Choose a value for a cell and save the workbook
    Pick(PickArgs),
    /// List the sheet's validation rules
    Rules,
}

#[derive(Args)]
pub struct CandidatesArgs {
    /// Cell in A1 notation
    pub cell: String,
    /// Text typed into the cell so far
    #[arg(long)]
    pub filter: Option<String>,
}

#[derive(Args)]
pub struct PickArgs {
    /// Cell in A1 notation
    pub cell: String,
    /// Value to choose; multi-select cells toggle it
    pub value: String,
}
