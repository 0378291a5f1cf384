use std::error::Error;
use std::path::Path;

use crate::cli::commands::{CandidatesArgs, Cli, Commands, PickArgs};
use crate::cli::output::{CandidatesJson, PickJson, RuleJson, print_json};
use crate::io::config_io::load_config;
use crate::io::workbook_io::{load_workbook_sheet, save_workbook};
use crate::model::{AppConfig, GridContext, GridCoordinate, Workbook, parse_rule_key};
use crate::ops::list_source::resolve_dropdown_list;
use crate::overlay::{GridView, OverlayController, OverlayEvent, OverlayKind};
use crate::parse::cell_ref::{cell_name, parse_cell};

type HandlerResult = Result<(), Box<dyn Error>>;

/// Run a subcommand against the workbook named by `--workbook`.
pub fn dispatch(cli: Cli) -> HandlerResult {
    let json = cli.json;
    let Some(command) = cli.command else {
        return Ok(());
    };
    let config = load_config(cli.config.as_deref())?;
    let path = cli
        .workbook
        .ok_or("--workbook is required for this command")?;
    let workbook = load_workbook_sheet(&path, cli.sheet.as_deref())?;

    match command {
        Commands::Candidates(args) => cmd_candidates(workbook, &config, args, json),
        Commands::Pick(args) => cmd_pick(workbook, &config, &path, args, json),
        Commands::Rules => cmd_rules(&workbook, json),
    }
}

/// A grid focused on `coord` with an overlay that has caught up to it.
fn focused(
    workbook: Workbook,
    config: &AppConfig,
    coord: GridCoordinate,
) -> (GridContext, OverlayController) {
    let mut grid = GridContext::new(workbook).with_delimiter(config.overlay.delimiter.clone());
    grid.focus_on(coord);
    let mut overlay = OverlayController::new(config.overlay.clone());
    overlay.notify(OverlayEvent::FocusChanged);
    overlay.flush(&grid);
    (grid, overlay)
}

fn cmd_candidates(
    workbook: Workbook,
    config: &AppConfig,
    args: CandidatesArgs,
    json: bool,
) -> HandlerResult {
    let coord = parse_cell(&args.cell)?;
    let (grid, mut overlay) = focused(workbook, config, coord);
    let filter = args.filter.unwrap_or_default();
    if !filter.is_empty() {
        overlay.notify(OverlayEvent::BufferChanged(filter.clone()));
        overlay.flush(&grid);
    }

    let value = grid.cell_value(coord);
    let mode = match overlay.kind() {
        Some(OverlayKind::Dropdown) => "dropdown",
        Some(OverlayKind::Autocomplete) => "autocomplete",
        None => "none",
    };
    let multi = overlay.is_multi();
    let selected = if multi {
        overlay.selection().map(|s| s.to_vec()).unwrap_or_default()
    } else {
        Vec::new()
    };

    if json {
        print_json(&CandidatesJson {
            cell: cell_name(coord),
            mode,
            multi,
            value,
            selected,
            filter,
            candidates: overlay.candidates().to_vec(),
            shown: overlay.display().to_vec(),
        })?;
        return Ok(());
    }

    let multi_note = if multi { " (multi-select)" } else { "" };
    println!("{}  {}{}", cell_name(coord), mode, multi_note);
    if let Some(v) = &value {
        println!("value: {}", v);
    }
    let current = value.map(|v| v.to_string());
    for item in overlay.display() {
        let label = item.to_string();
        let chosen = if multi {
            selected.contains(&label)
        } else {
            current.as_deref() == Some(label.as_str())
        };
        println!("{} {}", if chosen { "*" } else { " " }, label);
    }
    Ok(())
}

fn cmd_pick(
    workbook: Workbook,
    config: &AppConfig,
    path: &Path,
    args: PickArgs,
    json: bool,
) -> HandlerResult {
    let coord = parse_cell(&args.cell)?;
    let (mut grid, mut overlay) = focused(workbook, config, coord);
    let report = overlay.pick(&args.value, &mut grid)?;
    if report.document_changed() {
        save_workbook(path, &grid.workbook)?;
    }

    let value = grid.cell_value(coord);
    if json {
        print_json(&PickJson {
            cell: cell_name(coord),
            value,
        })?;
    } else {
        match value {
            Some(v) => println!("{} = {}", cell_name(coord), v),
            None => println!("{} cleared", cell_name(coord)),
        }
    }
    Ok(())
}

fn cmd_rules(workbook: &Workbook, json: bool) -> HandlerResult {
    let sheet = workbook
        .current_sheet()
        .ok_or("workbook has no current sheet")?;

    let mut rules: Vec<_> = sheet
        .data_verification
        .iter()
        .filter_map(|(key, rule)| parse_rule_key(key).map(|pos| (pos, rule)))
        .collect();
    rules.sort_by_key(|(pos, _)| *pos);

    let rows: Vec<RuleJson> = rules
        .into_iter()
        .map(|((row, col), rule)| RuleJson {
            cell: cell_name(GridCoordinate::new(row, col)),
            kind: rule.kind.clone(),
            multi: rule.is_multi_select(),
            source: rule.value1.clone(),
            values: resolve_dropdown_list(workbook, sheet, rule),
        })
        .collect();

    if json {
        print_json(&rows)?;
        return Ok(());
    }
    if rows.is_empty() {
        println!("no validation rules on {}", sheet.name);
    }
    for r in &rows {
        let multi = if r.multi { "  [multi]" } else { "" };
        println!("{:<6} {:<10} {}{}", r.cell, r.kind, r.source, multi);
    }
    Ok(())
}
