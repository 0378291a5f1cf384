use crate::model::{ActiveRange, CellValue, GridContext, GridCoordinate};

/// A discrete change to grid state. The overlay never touches the grid
/// directly; it hands a batch of these to [`GridContext::apply`].
#[derive(Debug, Clone, PartialEq)]
pub enum GridCommand {
    /// Replace a cell's value outright.
    ReplaceValue {
        coord: GridCoordinate,
        value: CellValue,
    },
    /// Store a multi-select result: `value` was toggled, `selection` is the
    /// resulting set in insertion order.
    ToggleCandidate {
        coord: GridCoordinate,
        value: String,
        selection: Vec<String>,
    },
    /// Move the focused cell one row down, keeping the column.
    AdvanceFocusDown,
    OpenDropdown,
    CloseOverlay,
    /// Drop the "cell is being edited" marker.
    ClearPendingEdit,
    RequestRedraw,
}

/// What a batch actually changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyReport {
    pub values_written: usize,
    pub focus_advanced: bool,
    pub dropdown_closed: bool,
}

impl ApplyReport {
    pub fn document_changed(&self) -> bool {
        self.values_written > 0
    }
}

/// Apply a batch as one logical update. Value writes never depend on the
/// active-range record; a missing record only skips the focus advance.
pub fn apply_batch(ctx: &mut GridContext, batch: &[GridCommand]) -> ApplyReport {
    let mut report = ApplyReport::default();

    for command in batch {
        match command {
            GridCommand::ReplaceValue { coord, value } => {
                if write_cell(ctx, *coord, Some(value.clone())) {
                    report.values_written += 1;
                }
            }
            GridCommand::ToggleCandidate {
                coord, selection, ..
            } => {
                let joined = selection.join(&ctx.delimiter);
                if write_cell(ctx, *coord, Some(CellValue::Text(joined))) {
                    report.values_written += 1;
                }
            }
            GridCommand::AdvanceFocusDown => {
                report.focus_advanced = advance_focus_down(ctx);
            }
            GridCommand::OpenDropdown => ctx.dropdown_open = true,
            GridCommand::CloseOverlay => {
                report.dropdown_closed = ctx.dropdown_open;
                ctx.dropdown_open = false;
            }
            GridCommand::ClearPendingEdit => ctx.cell_update = false,
            GridCommand::RequestRedraw => ctx.needs_redraw = true,
        }
    }

    if report.values_written > 0 {
        ctx.revision += 1;
        ctx.refresh_layout();
        ctx.needs_redraw = true;
    }
    tracing::debug!(?report, commands = batch.len(), "applied grid batch");
    report
}

fn write_cell(ctx: &mut GridContext, coord: GridCoordinate, value: Option<CellValue>) -> bool {
    match ctx.workbook.current_sheet_mut() {
        Some(sheet) => {
            sheet.set_cell(coord.row, coord.col, value);
            true
        }
        None => {
            tracing::debug!(?coord, "no current sheet; value write dropped");
            false
        }
    }
}

fn advance_focus_down(ctx: &mut GridContext) -> bool {
    let Some(last) = ctx.select_save.last() else {
        tracing::debug!("no active range; focus stays put");
        return false;
    };
    let focus = last.focus();
    let max_row = ctx.row_count().saturating_sub(1);
    let next = GridCoordinate::new((focus.row + 1).min(max_row.max(focus.row)), focus.col);
    ctx.select_save = vec![ActiveRange::single(next)];
    true
}
