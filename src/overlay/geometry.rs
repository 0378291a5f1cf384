use crate::model::{GridCoordinate, MergeSpan};

use super::OverlayKind;

/// Where the panel anchors, in grid space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayGeometry {
    pub left: u32,
    pub top: u32,
    /// Autocomplete panels are exactly as wide as the cell (or merge) they serve
    pub width: Option<u32>,
}

/// Resolve the anchor for `coord`. A merged cell anchors below the merge's
/// last row at its first column, and its width spans the merge's columns.
///
/// Returns `None` when an edge table has no entry for the cell, which happens
/// transiently while the grid is relaying out.
pub fn resolve(
    coord: GridCoordinate,
    row_edges: &[u32],
    col_edges: &[u32],
    merge: Option<MergeSpan>,
    kind: OverlayKind,
) -> Option<OverlayGeometry> {
    let (row, first_col, last_col) = match merge {
        Some(span) => (span.rows[1], span.cols[0], span.cols[1]),
        None => (coord.row, coord.col, coord.col),
    };

    let top = *row_edges.get(row)?;
    let left = if first_col == 0 {
        0
    } else {
        *col_edges.get(first_col - 1)?
    };
    let width = match kind {
        OverlayKind::Autocomplete => Some(col_edges.get(last_col)?.saturating_sub(left)),
        OverlayKind::Dropdown => None,
    };

    Some(OverlayGeometry { left, top, width })
}

/// The rectangle the rendered panel occupies, in grid space. The list rows
/// sit inside a one-cell border.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelBounds {
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

impl PanelBounds {
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.left && x < self.left + self.width && y >= self.top && y < self.top + self.height
    }

    /// Visible list row under the point, if any (0 = first visible row).
    pub fn row_at(&self, x: u32, y: u32) -> Option<usize> {
        if !self.contains(x, y) {
            return None;
        }
        let inner_x = x > self.left && x + 1 < self.left + self.width;
        let inner_y = y > self.top && y + 1 < self.top + self.height;
        if inner_x && inner_y {
            Some((y - self.top - 1) as usize)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const ROWS: [u32; 6] = [1, 2, 3, 4, 5, 6];
    const COLS: [u32; 4] = [10, 20, 30, 40];

    #[test]
    fn first_column_anchors_at_zero() {
        let g = resolve(
            GridCoordinate::new(2, 0),
            &ROWS,
            &COLS,
            None,
            OverlayKind::Dropdown,
        )
        .unwrap();
        assert_eq!(
            g,
            OverlayGeometry {
                left: 0,
                top: 3,
                width: None
            }
        );
    }

    #[test]
    fn left_edge_is_previous_column_end() {
        let g = resolve(
            GridCoordinate::new(0, 2),
            &ROWS,
            &COLS,
            None,
            OverlayKind::Autocomplete,
        )
        .unwrap();
        assert_eq!(g.left, 20);
        assert_eq!(g.top, 1);
        assert_eq!(g.width, Some(10));
    }

    #[test]
    fn merged_cells_anchor_below_the_whole_merge() {
        let merge = MergeSpan {
            rows: [2, 4],
            cols: [1, 2],
        };
        let g = resolve(
            GridCoordinate::new(3, 2),
            &ROWS,
            &COLS,
            Some(merge),
            OverlayKind::Autocomplete,
        )
        .unwrap();
        // Rows 2..=4 occupy y in [ROWS[1], ROWS[4]); the panel starts below
        assert_eq!(g.top, ROWS[4]);
        assert_eq!(g.left, COLS[0]);
        assert_eq!(g.width, Some(COLS[2] - COLS[0]));

        let from_top_row = resolve(
            GridCoordinate::new(2, 1),
            &ROWS,
            &COLS,
            Some(merge),
            OverlayKind::Autocomplete,
        );
        assert_eq!(from_top_row, Some(g));
    }

    #[test]
    fn missing_edges_resolve_to_nothing() {
        assert!(resolve(
            GridCoordinate::new(9, 0),
            &ROWS,
            &COLS,
            None,
            OverlayKind::Dropdown
        )
        .is_none());
        assert!(resolve(
            GridCoordinate::new(0, 4),
            &ROWS,
            &COLS,
            None,
            OverlayKind::Autocomplete
        )
        .is_none());
    }

    #[test]
    fn row_hit_testing_excludes_the_border() {
        let bounds = PanelBounds {
            left: 10,
            top: 5,
            width: 8,
            height: 5,
        };
        assert_eq!(bounds.row_at(12, 6), Some(0));
        assert_eq!(bounds.row_at(12, 8), Some(2));
        assert_eq!(bounds.row_at(12, 5), None);
        assert_eq!(bounds.row_at(10, 6), None);
        assert_eq!(bounds.row_at(12, 9), None);
        assert!(bounds.contains(17, 9));
        assert!(!bounds.contains(18, 9));
        assert!(!bounds.contains(9, 6));
    }
}
