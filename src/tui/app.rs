use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;

use crate::io::watcher::WorkbookWatcher;
use crate::io::workbook_io::{load_workbook_sheet, save_workbook};
use crate::model::{AppConfig, CellValue, GridContext, GridCoordinate, Workbook};
use crate::ops::write_back::GridCommand;
use crate::overlay::{GridView, OverlayController, OverlayEvent};
use crate::parse::cell_ref::cell_name;

use super::theme::Theme;
use super::{input, render};

/// Width of the row-number gutter left of the grid
pub const GUTTER_W: u16 = 5;
/// Height of the column-letter header above the grid
pub const HEADER_H: u16 = 1;

const BLANK_ROWS: usize = 100;
const BLANK_COLS: usize = 26;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    Edit,
}

/// Main application state
pub struct App {
    pub grid: GridContext,
    pub overlay: OverlayController,
    pub theme: Theme,
    pub mode: Mode,
    pub edit_buffer: String,
    /// Top-left cell of the scrolled grid
    pub first_row: usize,
    pub first_col: usize,
    /// Where the grid (including headers) was last drawn
    pub grid_area: Rect,
    pub message: Option<String>,
    pub workbook_path: Option<PathBuf>,
    saved_revision: u64,
    pub should_quit: bool,
}

impl App {
    pub fn new(workbook: Workbook, config: &AppConfig, workbook_path: Option<PathBuf>) -> Self {
        let grid = GridContext::new(workbook).with_delimiter(config.overlay.delimiter.clone());
        let mut overlay = OverlayController::new(config.overlay.clone());
        overlay.notify(OverlayEvent::FocusChanged);
        App {
            grid,
            overlay,
            theme: Theme::from_config(&config.ui),
            mode: Mode::Navigate,
            edit_buffer: String::new(),
            first_row: 0,
            first_col: 0,
            grid_area: Rect::new(0, 0, 80, 23),
            message: None,
            workbook_path,
            saved_revision: 0,
            should_quit: false,
        }
    }

    pub fn focus(&self) -> GridCoordinate {
        self.grid.focus().unwrap_or(GridCoordinate::new(0, 0))
    }

    pub fn is_dirty(&self) -> bool {
        self.grid.revision != self.saved_revision
    }

    // -----------------------------------------------------------------------
    // Focus and scrolling

    pub fn set_focus(&mut self, coord: GridCoordinate) {
        if self.grid.dropdown_open {
            self.grid.apply(&[GridCommand::CloseOverlay]);
        }
        self.grid.focus_on(coord);
        self.overlay.notify(OverlayEvent::FocusChanged);
        self.ensure_visible();
    }

    /// Move focus by whole cells, skipping hidden rows and columns.
    pub fn move_focus(&mut self, d_row: isize, d_col: isize) {
        let Some(sheet) = self.grid.sheet() else {
            return;
        };
        let cur = self.focus();
        let row = step(cur.row, d_row, sheet.rows(), |r| sheet.row_height(r) > 0);
        let col = step(cur.col, d_col, sheet.cols(), |c| sheet.col_width(c) > 0);
        if (row, col) != (cur.row, cur.col) {
            self.set_focus(GridCoordinate::new(row, col));
        }
    }

    /// Scroll so the focused cell is inside the last drawn grid area.
    pub fn ensure_visible(&mut self) {
        let focus = self.focus();
        let visible_h = self.grid_area.height.saturating_sub(HEADER_H) as u32;
        let visible_w = self.grid_area.width.saturating_sub(GUTTER_W) as u32;
        self.first_row = scroll_to(self.first_row, focus.row, self.grid.row_edges(), visible_h);
        self.first_col = scroll_to(self.first_col, focus.col, self.grid.col_edges(), visible_w);
    }

    /// Grid-space offset of the scrolled origin.
    pub fn scroll_offset(&self) -> (u32, u32) {
        (
            near_edge(self.grid.col_edges(), self.first_col),
            near_edge(self.grid.row_edges(), self.first_row),
        )
    }

    /// Screen position of the grid-space origin.
    pub fn grid_origin(&self) -> (u16, u16) {
        (self.grid_area.x + GUTTER_W, self.grid_area.y + HEADER_H)
    }

    /// Map a screen cell to grid space. `None` over headers or off the grid.
    pub fn to_grid_space(&self, column: u16, row: u16) -> Option<(u32, u32)> {
        let (ox, oy) = self.grid_origin();
        let area = self.grid_area;
        if column < ox || row < oy || column >= area.right() || row >= area.bottom() {
            return None;
        }
        let (sx, sy) = self.scroll_offset();
        Some(((column - ox) as u32 + sx, (row - oy) as u32 + sy))
    }

    /// The cell under a grid-space point.
    pub fn cell_at(&self, x: u32, y: u32) -> Option<GridCoordinate> {
        let rows = self.grid.row_edges();
        let cols = self.grid.col_edges();
        let row = rows.partition_point(|&edge| edge <= y);
        let col = cols.partition_point(|&edge| edge <= x);
        (row < rows.len() && col < cols.len()).then(|| GridCoordinate::new(row, col))
    }

    pub fn scroll_rows(&mut self, delta: i32) {
        let max = self.grid.row_count().saturating_sub(1) as i64;
        self.first_row = (self.first_row as i64 + delta as i64).clamp(0, max.max(0)) as usize;
    }

    // -----------------------------------------------------------------------
    // Editing

    /// Start editing the focused cell. A typed character replaces the cell
    /// text; otherwise the buffer starts from the current value.
    pub fn begin_edit(&mut self, initial: Option<char>) {
        let coord = self.focus();
        self.mode = Mode::Edit;
        self.grid.cell_update = true;
        match initial {
            Some(c) => {
                self.edit_buffer = c.to_string();
                self.overlay
                    .notify(OverlayEvent::BufferChanged(self.edit_buffer.clone()));
            }
            None => {
                self.edit_buffer = self
                    .grid
                    .cell(coord)
                    .map(|v| v.to_string())
                    .unwrap_or_default();
            }
        }
        if self.grid.validation_rule(coord).is_some() {
            self.overlay.open_dropdown(&mut self.grid);
        }
    }

    pub fn edit_push(&mut self, c: char) {
        self.edit_buffer.push(c);
        self.overlay
            .notify(OverlayEvent::BufferChanged(self.edit_buffer.clone()));
    }

    pub fn edit_backspace(&mut self) {
        crate::util::unicode::pop_grapheme(&mut self.edit_buffer);
        self.overlay
            .notify(OverlayEvent::BufferChanged(self.edit_buffer.clone()));
    }

    /// Write the buffer as typed into the focused cell.
    pub fn commit_edit(&mut self, advance: bool) {
        let coord = self.focus();
        let mut batch = vec![
            GridCommand::ReplaceValue {
                coord,
                value: CellValue::from_input(&self.edit_buffer),
            },
            GridCommand::CloseOverlay,
            GridCommand::ClearPendingEdit,
        ];
        if advance {
            batch.push(GridCommand::AdvanceFocusDown);
        }
        let report = self.grid.apply(&batch);
        self.finish_edit();
        if report.document_changed() {
            self.overlay.notify(OverlayEvent::DocumentChanged);
        }
        if report.focus_advanced {
            self.overlay.notify(OverlayEvent::FocusChanged);
            self.ensure_visible();
        }
    }

    pub fn cancel_edit(&mut self) {
        self.grid
            .apply(&[GridCommand::CloseOverlay, GridCommand::ClearPendingEdit]);
        self.finish_edit();
    }

    fn finish_edit(&mut self) {
        self.mode = Mode::Navigate;
        self.edit_buffer.clear();
        self.overlay.notify(OverlayEvent::BufferChanged(String::new()));
    }

    /// Reconcile host state after the overlay consumed an input: a commit
    /// may have ended the edit or moved focus.
    pub fn after_overlay_input(&mut self) {
        if self.mode == Mode::Edit && !self.grid.cell_update {
            self.finish_edit();
        }
        self.ensure_visible();
    }

    pub fn clear_cell(&mut self) {
        let coord = self.focus();
        let report = self.grid.apply(&[GridCommand::ReplaceValue {
            coord,
            value: CellValue::text(""),
        }]);
        if report.document_changed() {
            self.overlay.notify(OverlayEvent::DocumentChanged);
        }
    }

    pub fn open_dropdown(&mut self) {
        if !self.overlay.open_dropdown(&mut self.grid) {
            self.message = Some(format!("{} has no list", cell_name(self.focus())));
        }
    }

    // -----------------------------------------------------------------------
    // Persistence

    pub fn save(&mut self) {
        let Some(path) = self.workbook_path.clone() else {
            self.message = Some("no workbook file (start with -w PATH)".into());
            return;
        };
        match save_workbook(&path, &self.grid.workbook) {
            Ok(()) => {
                self.saved_revision = self.grid.revision;
                self.message = Some(format!("saved {}", path.display()));
            }
            Err(e) => {
                tracing::warn!(error = %e, "save failed");
                self.message = Some(format!("save failed: {}", e));
            }
        }
    }

    /// Pick up an external change to the workbook file. Local unsaved edits
    /// win over the file.
    pub fn reload(&mut self) {
        let Some(path) = self.workbook_path.clone() else {
            return;
        };
        let sheet = self.grid.workbook.current_sheet_id.clone();
        let workbook = match load_workbook_sheet(&path, Some(&sheet)) {
            Ok(wb) => wb,
            Err(e) => {
                tracing::warn!(error = %e, "reload failed");
                return;
            }
        };
        if workbook == self.grid.workbook {
            return;
        }
        if self.is_dirty() {
            self.message = Some("workbook changed on disk; keeping unsaved edits".into());
            return;
        }

        tracing::debug!(path = %path.display(), "workbook reloaded");
        self.grid.replace_workbook(workbook);
        self.saved_revision = self.grid.revision;
        let focus = self.focus();
        let row = focus.row.min(self.grid.row_count().saturating_sub(1));
        let col = focus.col.min(self.grid.col_count().saturating_sub(1));
        if (row, col) != (focus.row, focus.col) {
            self.set_focus(GridCoordinate::new(row, col));
        }
        self.overlay.notify(OverlayEvent::DocumentChanged);
        self.message = Some("reloaded from disk".into());
    }
}

/// Move `delta` visible steps from `start` within `0..len`.
fn step(start: usize, delta: isize, len: usize, visible: impl Fn(usize) -> bool) -> usize {
    let mut pos = start;
    let mut remaining = delta.unsigned_abs();
    let mut probe = start;
    while remaining > 0 {
        let next = if delta < 0 {
            match probe.checked_sub(1) {
                Some(n) => n,
                None => break,
            }
        } else if probe + 1 < len {
            probe + 1
        } else {
            break;
        };
        probe = next;
        if visible(probe) {
            pos = probe;
            remaining -= 1;
        }
    }
    pos
}

fn near_edge(edges: &[u32], index: usize) -> u32 {
    match index {
        0 => 0,
        i => edges.get(i - 1).copied().unwrap_or(0),
    }
}

/// New first index so `target` fits in `span` grid units starting there.
fn scroll_to(first: usize, target: usize, edges: &[u32], span: u32) -> usize {
    if target < first {
        return target;
    }
    let Some(&far) = edges.get(target) else {
        return first;
    };
    let mut first = first;
    while first < target && far - near_edge(edges, first) > span {
        first += 1;
    }
    first
}

/// Run the TUI application
pub fn run(
    workbook_path: Option<&Path>,
    sheet: Option<&str>,
    config: AppConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let workbook = match workbook_path {
        Some(path) if path.exists() => load_workbook_sheet(path, sheet)?,
        _ => Workbook::blank(BLANK_ROWS, BLANK_COLS),
    };
    let mut app = App::new(workbook, &config, workbook_path.map(Path::to_path_buf));

    let watcher = match workbook_path.filter(|p| p.exists()) {
        Some(path) => match WorkbookWatcher::start(path) {
            Ok(w) => Some(w),
            Err(e) => {
                tracing::warn!(error = %e, "file watching disabled");
                None
            }
        },
        None => None,
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app, watcher.as_ref());

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    watcher: Option<&WorkbookWatcher>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        if let Some(w) = watcher
            && w.poll()
        {
            app.reload();
        }

        // Overlay notifications queued since the last frame take effect here
        app.overlay.flush(&app.grid);
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => input::handle_key(app, key),
                Event::Mouse(mouse) => input::handle_mouse(app, mouse),
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
