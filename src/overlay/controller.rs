use crate::model::{CellValue, GridCoordinate, OverlayConfig};
use crate::ops::write_back::{ApplyReport, GridCommand};
use crate::util::unicode::display_width;

use super::commit::{SelectionSet, commit_autocomplete, commit_dropdown};
use super::geometry::{self, OverlayGeometry, PanelBounds};
use super::nav::{Navigation, Viewport};
use super::{GridView, GridWriter, OverlayKind, filter, source};

/// Notifications from the host. They are queued by [`OverlayController::notify`]
/// and take effect at the next [`OverlayController::flush`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayEvent {
    /// The active-range record (and so possibly the focused cell) changed.
    FocusChanged,
    /// The edit buffer's text is now this.
    BufferChanged(String),
    /// Cell values changed somewhere in the document.
    DocumentChanged,
}

/// Keys the overlay reacts to. Everything else is `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Up,
    Down,
    Enter,
    Tab,
    Escape,
    Other,
}

/// Pointer input in grid-space coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    Down { x: u32, y: u32 },
    Move { x: u32, y: u32 },
    Wheel { x: u32, y: u32, delta: i32 },
}

/// Whether the host should still act on an input the overlay has seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    Consumed,
    PassThrough,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PickError {
    #[error("no cell is focused")]
    NoFocus,
    #[error("{value:?} is not one of the allowed values for {cell}")]
    NotInList { value: String, cell: String },
}

/// One visible list row, ready to draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelRow {
    pub label: String,
    pub active: bool,
    pub checked: bool,
}

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelView {
    pub kind: OverlayKind,
    pub multi: bool,
    pub bounds: PanelBounds,
    pub rows: Vec<PanelRow>,
    /// Items above and below the visible window
    pub hidden_above: usize,
    pub hidden_below: usize,
}

/// Latest-wins queue of host notifications. A focus change discards text
/// that was queued for the previous cell.
#[derive(Debug, Default)]
struct Pending {
    focus: bool,
    text: Option<String>,
    document: bool,
}

impl Pending {
    fn is_empty(&self) -> bool {
        !self.focus && self.text.is_none() && !self.document
    }
}

/// Per-focus state. Rebuilt wholesale whenever the focused cell changes.
#[derive(Debug)]
struct Session {
    coord: GridCoordinate,
    kind: OverlayKind,
    multi: bool,
    candidates: Vec<CellValue>,
    selection: SelectionSet,
    geometry: Option<OverlayGeometry>,
    display: Vec<CellValue>,
    nav: Navigation,
    viewport: Viewport,
}

impl Session {
    /// Swap in a new displayed list. Navigation always resets with it.
    fn replace_display(&mut self, display: Vec<CellValue>) {
        self.nav = Navigation::reset(display.len());
        self.viewport = Viewport::default();
        self.display = display;
    }
}

/// Drives the dropdown and autocomplete overlays for the focused cell.
#[derive(Debug)]
pub struct OverlayController {
    config: OverlayConfig,
    session: Option<Session>,
    filter_text: String,
    pending: Pending,
}

impl OverlayController {
    pub fn new(config: OverlayConfig) -> Self {
        OverlayController {
            config,
            session: None,
            filter_text: String::new(),
            pending: Pending::default(),
        }
    }

    /// Queue a host notification.
    pub fn notify(&mut self, event: OverlayEvent) {
        match event {
            OverlayEvent::FocusChanged => {
                self.pending.focus = true;
                self.pending.text = None;
            }
            OverlayEvent::BufferChanged(text) => self.pending.text = Some(text),
            OverlayEvent::DocumentChanged => self.pending.document = true,
        }
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Apply everything queued since the last flush, reading the grid as it
    /// is now. Focus is applied first, then text, then document changes.
    pub fn flush<G: GridView + ?Sized>(&mut self, grid: &G) {
        if self.pending.is_empty() {
            return;
        }
        let pending = std::mem::take(&mut self.pending);
        if pending.focus {
            self.refocus(grid);
        }
        if let Some(text) = pending.text {
            self.filter_text = text;
            self.refilter();
        }
        if pending.document && !pending.focus {
            self.resync_document(grid);
        }
    }

    fn refocus<G: GridView + ?Sized>(&mut self, grid: &G) {
        self.filter_text.clear();
        let Some(coord) = grid.focus() else {
            self.session = None;
            return;
        };
        let Some(set) = source::resolve(grid, coord, self.config.autocomplete) else {
            self.session = None;
            return;
        };

        let geometry = geometry::resolve(
            coord,
            grid.row_edges(),
            grid.col_edges(),
            grid.merge_at(coord),
            set.kind,
        );
        let selection = SelectionSet::seed(grid.cell_value(coord).as_ref(), grid.delimiter());
        let display = filter::apply(set.kind, &set.values, &self.filter_text);

        tracing::debug!(
            ?coord,
            kind = ?set.kind,
            candidates = set.values.len(),
            multi = set.multi,
            "overlay focus"
        );
        self.session = Some(Session {
            coord,
            kind: set.kind,
            multi: set.multi,
            candidates: set.values,
            selection,
            geometry,
            nav: Navigation::reset(display.len()),
            viewport: Viewport::default(),
            display,
        });
    }

    fn refilter(&mut self) {
        if let Some(session) = &mut self.session {
            let display = filter::apply(session.kind, &session.candidates, &self.filter_text);
            session.replace_display(display);
        }
    }

    /// Reseed from the document without disturbing the highlight unless the
    /// displayed list really changed.
    fn resync_document<G: GridView + ?Sized>(&mut self, grid: &G) {
        let autocomplete = self.config.autocomplete;
        let Some(session) = &mut self.session else {
            return;
        };
        let Some(set) = source::resolve(grid, session.coord, autocomplete) else {
            self.session = None;
            return;
        };
        if set.kind != session.kind {
            self.pending.focus = true;
            self.flush(&*grid);
            return;
        }

        session.candidates = set.values;
        session.multi = set.multi;
        session.geometry = geometry::resolve(
            session.coord,
            grid.row_edges(),
            grid.col_edges(),
            grid.merge_at(session.coord),
            session.kind,
        );
        if session.kind == OverlayKind::Dropdown {
            session.selection =
                SelectionSet::seed(grid.cell_value(session.coord).as_ref(), grid.delimiter());
        }
        let display = filter::apply(session.kind, &session.candidates, &self.filter_text);
        if display != session.display {
            session.replace_display(display);
        }
    }

    // -----------------------------------------------------------------------
    // Queries

    pub fn kind(&self) -> Option<OverlayKind> {
        self.session.as_ref().map(|s| s.kind)
    }

    pub fn coord(&self) -> Option<GridCoordinate> {
        self.session.as_ref().map(|s| s.coord)
    }

    pub fn filter_text(&self) -> &str {
        &self.filter_text
    }

    pub fn candidates(&self) -> &[CellValue] {
        self.session.as_ref().map_or(&[], |s| s.candidates.as_slice())
    }

    pub fn display(&self) -> &[CellValue] {
        self.session.as_ref().map_or(&[], |s| s.display.as_slice())
    }

    pub fn active(&self) -> Option<usize> {
        self.session.as_ref().and_then(|s| s.nav.active())
    }

    pub fn is_multi(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.multi)
    }

    pub fn selection(&self) -> Option<&SelectionSet> {
        self.session.as_ref().map(|s| &s.selection)
    }

    pub fn geometry(&self) -> Option<OverlayGeometry> {
        self.session.as_ref().and_then(|s| s.geometry)
    }

    /// The overlay is visible: it has items and an anchor, it belongs to the
    /// focused cell, and (for the dropdown) the grid has it open.
    pub fn is_open<G: GridView + ?Sized>(&self, grid: &G) -> bool {
        let Some(session) = &self.session else {
            return false;
        };
        if session.display.is_empty() || session.geometry.is_none() {
            return false;
        }
        if grid.focus() != Some(session.coord) {
            return false;
        }
        match session.kind {
            OverlayKind::Dropdown => grid.dropdown_open(),
            OverlayKind::Autocomplete => true,
        }
    }

    fn visible_rows(&self, len: usize) -> usize {
        len.min(self.config.max_visible.max(1))
    }

    /// Panel rectangle in grid space, when open.
    pub fn bounds<G: GridView + ?Sized>(&self, grid: &G) -> Option<PanelBounds> {
        if !self.is_open(&*grid) {
            return None;
        }
        let session = self.session.as_ref()?;
        let geometry = session.geometry?;
        let width = match geometry.width {
            Some(w) => w,
            None => {
                let widest = session
                    .display
                    .iter()
                    .map(|v| display_width(&v.to_string()) as u32)
                    .max()
                    .unwrap_or(0);
                let marker = if session.multi { 2 } else { 0 };
                (widest + marker + 6).clamp(self.config.min_width, self.config.max_width.max(self.config.min_width))
            }
        };
        Some(PanelBounds {
            left: geometry.left,
            top: geometry.top,
            width,
            height: self.visible_rows(session.display.len()) as u32 + 2,
        })
    }

    /// Snapshot of the visible window for rendering.
    pub fn panel<G: GridView + ?Sized>(&self, grid: &G) -> Option<PanelView> {
        let bounds = self.bounds(&*grid)?;
        let session = self.session.as_ref()?;
        let height = self.visible_rows(session.display.len());
        let offset = session.viewport.offset;
        let rows = session
            .display
            .iter()
            .enumerate()
            .skip(offset)
            .take(height)
            .map(|(i, value)| {
                let label = value.to_string();
                PanelRow {
                    active: session.nav.active() == Some(i),
                    checked: session.multi && session.selection.contains(&label),
                    label,
                }
            })
            .collect::<Vec<_>>();
        Some(PanelView {
            kind: session.kind,
            multi: session.multi,
            bounds,
            hidden_above: offset,
            hidden_below: session.display.len().saturating_sub(offset + rows.len()),
            rows,
        })
    }

    // -----------------------------------------------------------------------
    // Input

    /// Open the dropdown for the focused cell if it has a list rule.
    /// Returns false when there is nothing to open.
    pub fn open_dropdown<G: GridWriter + ?Sized>(&mut self, grid: &mut G) -> bool {
        self.flush(&*grid);
        let Some(session) = &mut self.session else {
            return false;
        };
        if session.kind != OverlayKind::Dropdown {
            return false;
        }
        let len = session.display.len();
        session.nav = Navigation::reset(len);
        session.viewport = Viewport::default();
        grid.apply(&[GridCommand::OpenDropdown]);
        true
    }

    /// Offer a key to the overlay before anything else sees it.
    pub fn handle_key<G: GridWriter + ?Sized>(&mut self, key: NavKey, grid: &mut G) -> Disposition {
        self.flush(&*grid);
        if !self.is_open(&*grid) {
            return Disposition::PassThrough;
        }
        let height = self.config.max_visible.max(1);
        let Some(session) = &mut self.session else {
            return Disposition::PassThrough;
        };

        match (session.kind, key) {
            (_, NavKey::Down) => {
                session.nav.advance_down();
                session.viewport.follow(session.nav.active(), height);
                Disposition::Consumed
            }
            (_, NavKey::Up) => {
                session.nav.advance_up();
                session.viewport.follow(session.nav.active(), height);
                Disposition::Consumed
            }
            (OverlayKind::Dropdown, NavKey::Enter)
            | (OverlayKind::Autocomplete, NavKey::Enter | NavKey::Tab) => {
                match session.nav.active() {
                    Some(index) => {
                        self.commit_index(index, true, grid);
                        Disposition::Consumed
                    }
                    None => Disposition::PassThrough,
                }
            }
            (OverlayKind::Dropdown, NavKey::Escape) => {
                grid.apply(&[GridCommand::CloseOverlay]);
                Disposition::PassThrough
            }
            (OverlayKind::Autocomplete, NavKey::Escape) => {
                session.replace_display(Vec::new());
                self.filter_text.clear();
                Disposition::PassThrough
            }
            _ => Disposition::PassThrough,
        }
    }

    /// Offer a pointer event to the overlay. Presses outside an open dropdown
    /// close it; presses and wheel turns inside the panel never reach the grid.
    pub fn handle_pointer<G: GridWriter + ?Sized>(
        &mut self,
        event: PointerEvent,
        grid: &mut G,
    ) -> Disposition {
        self.flush(&*grid);
        let Some(bounds) = self.bounds(&*grid) else {
            return Disposition::PassThrough;
        };
        let height = self.visible_rows(self.display().len());
        let Some(session) = &mut self.session else {
            return Disposition::PassThrough;
        };

        match event {
            PointerEvent::Down { x, y } => {
                if !bounds.contains(x, y) {
                    if session.kind == OverlayKind::Dropdown {
                        grid.apply(&[GridCommand::CloseOverlay]);
                    }
                    return Disposition::PassThrough;
                }
                if let Some(row) = bounds.row_at(x, y) {
                    let index = session.viewport.offset + row;
                    if index < session.display.len() {
                        self.commit_index(index, false, grid);
                    }
                }
                Disposition::Consumed
            }
            PointerEvent::Move { x, y } => {
                if !bounds.contains(x, y) {
                    return Disposition::PassThrough;
                }
                if let Some(row) = bounds.row_at(x, y) {
                    session.nav.hover(session.viewport.offset + row);
                }
                Disposition::Consumed
            }
            PointerEvent::Wheel { x, y, delta } => {
                if !bounds.contains(x, y) {
                    return Disposition::PassThrough;
                }
                session.viewport.scroll(delta, session.display.len(), height);
                Disposition::Consumed
            }
        }
    }

    /// Commit a value by its text, as if it had been chosen from the list.
    /// Dropdown cells only accept their own candidates; any other cell takes
    /// the text verbatim. Focus does not move.
    pub fn pick<G: GridWriter + ?Sized>(
        &mut self,
        value: &str,
        grid: &mut G,
    ) -> Result<ApplyReport, PickError> {
        self.flush(&*grid);
        let coord = grid.focus().ok_or(PickError::NoFocus)?;

        let batch = match &mut self.session {
            Some(session) if session.kind == OverlayKind::Dropdown => {
                let candidate = session
                    .candidates
                    .iter()
                    .find(|c| c.to_string() == value)
                    .cloned()
                    .ok_or_else(|| PickError::NotInList {
                        value: value.to_string(),
                        cell: crate::parse::cell_ref::cell_name(coord),
                    })?;
                commit_dropdown(
                    coord,
                    &candidate,
                    &mut session.selection,
                    session.multi,
                    false,
                )
            }
            Some(session) => {
                session.replace_display(Vec::new());
                self.filter_text.clear();
                commit_autocomplete(coord, value)
            }
            None => commit_autocomplete(coord, value),
        };
        Ok(self.write(&batch, grid))
    }

    fn commit_index<G: GridWriter + ?Sized>(&mut self, index: usize, advance: bool, grid: &mut G) {
        let Some(session) = &mut self.session else {
            return;
        };
        let Some(value) = session.display.get(index).cloned() else {
            return;
        };
        let batch = match session.kind {
            OverlayKind::Dropdown => commit_dropdown(
                session.coord,
                &value,
                &mut session.selection,
                session.multi,
                advance,
            ),
            OverlayKind::Autocomplete => {
                session.replace_display(Vec::new());
                self.filter_text.clear();
                commit_autocomplete(session.coord, &value.to_string())
            }
        };
        tracing::debug!(coord = ?session.coord, value = %value, "overlay commit");
        self.write(&batch, grid);
    }

    fn write<G: GridWriter + ?Sized>(&mut self, batch: &[GridCommand], grid: &mut G) -> ApplyReport {
        let report = grid.apply(batch);
        if report.focus_advanced {
            self.notify(OverlayEvent::FocusChanged);
        }
        if report.document_changed() {
            self.notify(OverlayEvent::DocumentChanged);
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GridContext, ValidationRule, Workbook};
    use pretty_assertions::assert_eq;

    fn texts(values: &[CellValue]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn dropdown_ctx(list: &str, multi: bool, at: GridCoordinate) -> GridContext {
        let mut wb = Workbook::blank(20, 6);
        wb.sheets[0].set_rule(
            at.row,
            at.col,
            ValidationRule::dropdown(list).with_multi_select(multi),
        );
        let mut ctx = GridContext::new(wb);
        ctx.focus_on(at);
        ctx
    }

    fn fruit_ctx() -> GridContext {
        let mut wb = Workbook::blank(20, 4);
        for (row, fruit) in ["Apple", "Apricot", "Banana"].iter().enumerate() {
            wb.sheets[0].set_cell(row, 0, Some(CellValue::text(*fruit)));
        }
        let mut ctx = GridContext::new(wb);
        ctx.focus_on(GridCoordinate::new(5, 0));
        ctx
    }

    fn controller_for(ctx: &GridContext) -> OverlayController {
        let mut ov = OverlayController::new(OverlayConfig::default());
        ov.notify(OverlayEvent::FocusChanged);
        ov.flush(ctx);
        ov
    }

    #[test]
    fn notifications_wait_for_flush() {
        let ctx = fruit_ctx();
        let mut ov = OverlayController::new(OverlayConfig::default());
        ov.notify(OverlayEvent::FocusChanged);
        ov.notify(OverlayEvent::BufferChanged("Ap".into()));
        assert!(ov.has_pending());
        assert!(ov.display().is_empty());
        assert_eq!(ov.kind(), None);

        ov.flush(&ctx);
        assert!(!ov.has_pending());
        assert_eq!(texts(ov.display()), vec!["Apple", "Apricot"]);
        assert_eq!(ov.active(), Some(0));
    }

    #[test]
    fn latest_text_wins_within_a_tick() {
        let ctx = fruit_ctx();
        let mut ov = controller_for(&ctx);
        ov.notify(OverlayEvent::BufferChanged("B".into()));
        ov.notify(OverlayEvent::BufferChanged("Apr".into()));
        ov.flush(&ctx);
        assert_eq!(ov.filter_text(), "Apr");
        assert_eq!(texts(ov.display()), vec!["Apricot"]);
    }

    #[test]
    fn focus_change_drops_text_queued_before_it() {
        let mut ctx = fruit_ctx();
        let mut ov = controller_for(&ctx);
        ov.notify(OverlayEvent::BufferChanged("Ap".into()));
        ctx.focus_on(GridCoordinate::new(6, 0));
        ov.notify(OverlayEvent::FocusChanged);
        ov.flush(&ctx);
        assert_eq!(ov.filter_text(), "");
        assert!(ov.display().is_empty());
        assert_eq!(ov.coord(), Some(GridCoordinate::new(6, 0)));
    }

    #[test]
    fn filter_text_resets_on_focus_change() {
        let mut ctx = dropdown_ctx("Red,Green,Blue", false, GridCoordinate::new(1, 1));
        ctx.workbook.sheets[0].set_rule(2, 1, ValidationRule::dropdown("Red,Green,Blue"));
        let mut ov = controller_for(&ctx);
        ov.notify(OverlayEvent::BufferChanged("gr".into()));
        ov.flush(&ctx);
        assert_eq!(texts(ov.display()), vec!["Green"]);

        ctx.focus_on(GridCoordinate::new(2, 1));
        ov.notify(OverlayEvent::FocusChanged);
        ov.flush(&ctx);
        assert_eq!(texts(ov.display()), vec!["Red", "Green", "Blue"]);
    }

    #[test]
    fn text_after_focus_in_same_tick_applies_to_new_cell() {
        let mut ctx = fruit_ctx();
        let mut ov = controller_for(&ctx);
        ctx.focus_on(GridCoordinate::new(7, 0));
        ov.notify(OverlayEvent::FocusChanged);
        ov.notify(OverlayEvent::BufferChanged("ban".into()));
        ov.flush(&ctx);
        assert_eq!(texts(ov.display()), vec!["Banana"]);
    }

    #[test]
    fn every_list_replacement_resets_navigation() {
        let mut ctx = fruit_ctx();
        let mut ov = controller_for(&ctx);
        ov.notify(OverlayEvent::BufferChanged("A".into()));
        ov.flush(&ctx);
        ov.handle_key(NavKey::Down, &mut ctx);
        assert_eq!(ov.active(), Some(1));

        ov.notify(OverlayEvent::BufferChanged("Ap".into()));
        ov.flush(&ctx);
        assert_eq!(ov.active(), Some(0));

        ov.notify(OverlayEvent::BufferChanged("Zz".into()));
        ov.flush(&ctx);
        assert_eq!(ov.active(), None);
    }

    #[test]
    fn closed_dropdown_passes_keys_through() {
        let at = GridCoordinate::new(1, 1);
        let mut ctx = dropdown_ctx("Red,Green", false, at);
        let mut ov = controller_for(&ctx);
        assert!(!ov.is_open(&ctx));
        assert_eq!(ov.handle_key(NavKey::Down, &mut ctx), Disposition::PassThrough);
        assert_eq!(ov.handle_key(NavKey::Enter, &mut ctx), Disposition::PassThrough);
        assert_eq!(ctx.cell(at), None);
    }

    #[test]
    fn unhandled_keys_pass_through_while_open() {
        let mut ctx = dropdown_ctx("Red,Green", false, GridCoordinate::new(1, 1));
        let mut ov = controller_for(&ctx);
        assert!(ov.open_dropdown(&mut ctx));
        assert_eq!(ov.handle_key(NavKey::Other, &mut ctx), Disposition::PassThrough);
        assert_eq!(ov.handle_key(NavKey::Tab, &mut ctx), Disposition::PassThrough);
        assert_eq!(ov.handle_key(NavKey::Up, &mut ctx), Disposition::Consumed);
        assert_eq!(ov.active(), Some(1));
    }

    #[test]
    fn escape_closes_dropdown_and_lets_host_see_it() {
        let mut ctx = dropdown_ctx("Red,Green", false, GridCoordinate::new(1, 1));
        let mut ov = controller_for(&ctx);
        ov.open_dropdown(&mut ctx);
        assert_eq!(ov.handle_key(NavKey::Escape, &mut ctx), Disposition::PassThrough);
        assert!(!ctx.dropdown_open);
        assert!(!ov.is_open(&ctx));
    }

    #[test]
    fn escape_dismisses_autocomplete_until_next_keystroke() {
        let mut ctx = fruit_ctx();
        let mut ov = controller_for(&ctx);
        ov.notify(OverlayEvent::BufferChanged("A".into()));
        ov.flush(&ctx);
        assert!(ov.is_open(&ctx));
        assert_eq!(ov.handle_key(NavKey::Escape, &mut ctx), Disposition::PassThrough);
        assert!(!ov.is_open(&ctx));

        ov.notify(OverlayEvent::BufferChanged("Ap".into()));
        ov.flush(&ctx);
        assert!(ov.is_open(&ctx));
    }

    #[test]
    fn document_change_refilters_autocomplete_suggestions() {
        let mut ctx = fruit_ctx();
        let mut ov = controller_for(&ctx);
        ov.notify(OverlayEvent::BufferChanged("Ap".into()));
        ov.flush(&ctx);
        assert_eq!(texts(ov.display()), vec!["Apple", "Apricot"]);

        let sheet = &mut ctx.workbook.sheets[0];
        sheet.set_cell(1, 0, None);
        sheet.set_cell(3, 0, Some(CellValue::text("Apex")));
        ov.notify(OverlayEvent::DocumentChanged);
        ov.flush(&ctx);

        assert_eq!(texts(ov.candidates()), vec!["Apex", "Apple", "Banana"]);
        assert_eq!(texts(ov.display()), vec!["Apex", "Apple"]);
        assert_eq!(ov.active(), Some(0));
    }

    #[test]
    fn autocomplete_stays_closed_after_commit_and_resync() {
        let mut ctx = fruit_ctx();
        ctx.cell_update = true;
        let mut ov = controller_for(&ctx);
        ov.notify(OverlayEvent::BufferChanged("Apr".into()));
        ov.flush(&ctx);
        assert_eq!(ov.handle_key(NavKey::Enter, &mut ctx), Disposition::Consumed);

        // The commit queued a document change; it must not revive the list
        ov.flush(&ctx);
        assert_eq!(ov.filter_text(), "");
        assert!(ov.display().is_empty());
        assert!(!ov.is_open(&ctx));
    }

    #[test]
    fn escaped_autocomplete_stays_closed_across_resync() {
        let mut ctx = fruit_ctx();
        let mut ov = controller_for(&ctx);
        ov.notify(OverlayEvent::BufferChanged("B".into()));
        ov.flush(&ctx);
        ov.handle_key(NavKey::Escape, &mut ctx);

        ctx.workbook.sheets[0].set_cell(4, 0, Some(CellValue::text("Blueberry")));
        ov.notify(OverlayEvent::DocumentChanged);
        ov.flush(&ctx);
        assert!(ov.display().is_empty());
    }

    #[test]
    fn tab_commits_autocomplete_suggestion() {
        let mut ctx = fruit_ctx();
        ctx.cell_update = true;
        let mut ov = controller_for(&ctx);
        ov.notify(OverlayEvent::BufferChanged("ap".into()));
        ov.flush(&ctx);
        ov.handle_key(NavKey::Up, &mut ctx);
        assert_eq!(ov.handle_key(NavKey::Tab, &mut ctx), Disposition::Consumed);
        assert_eq!(
            ctx.cell(GridCoordinate::new(5, 0)),
            Some(&CellValue::text("Apricot"))
        );
        assert!(!ctx.cell_update);
        assert!(ov.display().is_empty());
        assert_eq!(ctx.focus(), Some(GridCoordinate::new(5, 0)));
    }

    #[test]
    fn multi_select_keeps_highlight_across_document_resync() {
        let at = GridCoordinate::new(0, 0);
        let mut ctx = dropdown_ctx("A,B,C", true, at);
        let mut ov = controller_for(&ctx);
        ov.open_dropdown(&mut ctx);
        ov.handle_key(NavKey::Down, &mut ctx);
        ov.handle_key(NavKey::Enter, &mut ctx);
        assert_eq!(ctx.cell(at), Some(&CellValue::text("B")));

        ov.flush(&ctx);
        assert_eq!(ov.active(), Some(1));
        assert!(ov.is_open(&ctx));
        assert_eq!(ov.selection().unwrap().to_vec(), vec!["B"]);
    }

    #[test]
    fn document_change_reseeds_selection_from_cell() {
        let at = GridCoordinate::new(0, 0);
        let mut ctx = dropdown_ctx("A,B,C", true, at);
        let mut ov = controller_for(&ctx);
        ctx.workbook.sheets[0].set_cell(0, 0, Some(CellValue::text("C,A")));
        ov.notify(OverlayEvent::DocumentChanged);
        ov.flush(&ctx);
        assert_eq!(ov.selection().unwrap().to_vec(), vec!["C", "A"]);
    }

    #[test]
    fn pointer_outside_closes_dropdown() {
        let mut ctx = dropdown_ctx("Red,Green", false, GridCoordinate::new(1, 1));
        let mut ov = controller_for(&ctx);
        ov.open_dropdown(&mut ctx);
        let bounds = ov.bounds(&ctx).unwrap();

        let inside = PointerEvent::Down {
            x: bounds.left,
            y: bounds.top,
        };
        assert_eq!(ov.handle_pointer(inside, &mut ctx), Disposition::Consumed);
        assert!(ctx.dropdown_open);

        let outside = PointerEvent::Down {
            x: bounds.left + bounds.width + 3,
            y: bounds.top,
        };
        assert_eq!(ov.handle_pointer(outside, &mut ctx), Disposition::PassThrough);
        assert!(!ctx.dropdown_open);
    }

    #[test]
    fn click_commits_without_advancing() {
        let at = GridCoordinate::new(1, 1);
        let mut ctx = dropdown_ctx("Red,Green", false, at);
        let mut ov = controller_for(&ctx);
        ov.open_dropdown(&mut ctx);
        let bounds = ov.bounds(&ctx).unwrap();
        let on_green = PointerEvent::Down {
            x: bounds.left + 2,
            y: bounds.top + 2,
        };
        assert_eq!(ov.handle_pointer(on_green, &mut ctx), Disposition::Consumed);
        assert_eq!(ctx.cell(at), Some(&CellValue::text("Green")));
        assert!(!ctx.dropdown_open);
        assert_eq!(ctx.focus(), Some(at));
    }

    #[test]
    fn hover_moves_the_highlight() {
        let mut ctx = dropdown_ctx("Red,Green,Blue", false, GridCoordinate::new(1, 1));
        let mut ov = controller_for(&ctx);
        ov.open_dropdown(&mut ctx);
        let bounds = ov.bounds(&ctx).unwrap();
        let over_blue = PointerEvent::Move {
            x: bounds.left + 1,
            y: bounds.top + 3,
        };
        assert_eq!(ov.handle_pointer(over_blue, &mut ctx), Disposition::Consumed);
        assert_eq!(ov.active(), Some(2));
    }

    #[test]
    fn wheel_over_panel_scrolls_list_not_grid() {
        let list = (1..=20).map(|n| format!("item{}", n)).collect::<Vec<_>>().join(",");
        let mut ctx = dropdown_ctx(&list, false, GridCoordinate::new(0, 0));
        let mut ov = controller_for(&ctx);
        ov.open_dropdown(&mut ctx);
        let bounds = ov.bounds(&ctx).unwrap();
        assert_eq!(bounds.height, 10);

        let wheel = PointerEvent::Wheel {
            x: bounds.left + 1,
            y: bounds.top + 1,
            delta: 3,
        };
        assert_eq!(ov.handle_pointer(wheel, &mut ctx), Disposition::Consumed);
        let panel = ov.panel(&ctx).unwrap();
        assert_eq!(panel.hidden_above, 3);
        assert_eq!(panel.rows[0].label, "item4");

        let elsewhere = PointerEvent::Wheel {
            x: bounds.left + bounds.width + 1,
            y: bounds.top,
            delta: 1,
        };
        assert_eq!(ov.handle_pointer(elsewhere, &mut ctx), Disposition::PassThrough);
    }

    #[test]
    fn pick_rejects_values_outside_the_list() {
        let mut ctx = dropdown_ctx("Red,Green", false, GridCoordinate::new(1, 1));
        let mut ov = controller_for(&ctx);
        let err = ov.pick("Purple", &mut ctx).unwrap_err();
        assert_eq!(
            err,
            PickError::NotInList {
                value: "Purple".into(),
                cell: "B2".into()
            }
        );
        let report = ov.pick("Green", &mut ctx).unwrap();
        assert_eq!(report.values_written, 1);
        assert!(!report.focus_advanced);
    }

    #[test]
    fn pick_on_plain_cell_takes_free_text() {
        let mut ctx = fruit_ctx();
        let mut ov = controller_for(&ctx);
        ov.pick("Cherry", &mut ctx).unwrap();
        assert_eq!(
            ctx.cell(GridCoordinate::new(5, 0)),
            Some(&CellValue::text("Cherry"))
        );
    }

    #[test]
    fn panel_marks_checked_items_in_multi_mode() {
        let at = GridCoordinate::new(0, 0);
        let mut ctx = dropdown_ctx("A,B,C", true, at);
        ctx.workbook.sheets[0].set_cell(0, 0, Some(CellValue::text("C")));
        let mut ov = controller_for(&ctx);
        ov.open_dropdown(&mut ctx);
        let panel = ov.panel(&ctx).unwrap();
        let checked: Vec<bool> = panel.rows.iter().map(|r| r.checked).collect();
        assert_eq!(checked, vec![false, false, true]);
        assert!(panel.rows[0].active);
    }
}
