//! Pane layout logic.
//!
//! A window is tiled by a [`Mosaic`]: one sequence of cut positions per axis,
//! plus a list of cells that reference cuts by index. Neighboring panes
//! therefore share a border by construction. Moving one cut moves that border
//! for everyone touching it, and no amount of resizing can make two panes
//! drift apart or overlap.
//!
//! A cell's position in the list is its group number, which is how hosts
//! address panes. Operations that remove a cell shift every later group down
//! by one, and the command layer re-homes the host's views to match.
//!
//! Every operation here is a whole-value edit: it either leaves the mosaic
//! untouched (reporting why) or completes a full step that keeps the tiling
//! gap-free and overlap-free. The tiling invariant is spelled out in
//! [`Mosaic::verify_invariants`], which the tests run after every operation.
//!
//! Position comparisons share the single tolerance [`EPSILON`]: cuts closer
//! than it are the same cut, and no operation brings two cuts closer than it.

use grout_ipc::{Axis, Cell, WindowLayout};

mod close;
mod grid;
mod neighbor;
mod resize;
mod split;
#[cfg(test)]
mod tests;

pub use close::CloseOutcome;
pub use grid::{Grid, EPSILON};

/// A gap-free, overlap-free tiling of a window into panes.
#[derive(Debug, Clone, PartialEq)]
pub struct Mosaic {
    grid: Grid,
    cells: Vec<Cell>,
}

impl Mosaic {
    /// An unsplit window: one pane covering everything.
    pub fn single_pane() -> Self {
        Self::from_layout(WindowLayout::single_pane())
    }

    pub fn from_layout(layout: WindowLayout) -> Self {
        Self {
            grid: Grid::from_cuts(layout.rows, layout.cols),
            cells: layout.cells,
        }
    }

    pub fn to_layout(&self) -> WindowLayout {
        WindowLayout {
            rows: self.grid.cuts(Axis::Row).to_vec(),
            cols: self.grid.cuts(Axis::Column).to_vec(),
            cells: self.cells.clone(),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn group_count(&self) -> usize {
        self.cells.len()
    }

    /// Shifts every cell index at or past `index` up by one.
    ///
    /// Must follow a fresh cut insert at `index` on `axis`.
    fn shift_cells_for_insert(&mut self, axis: Axis, index: usize) {
        for cell in &mut self.cells {
            if cell.low(axis) >= index {
                cell.set_low(axis, cell.low(axis) + 1);
            }
            if cell.high(axis) >= index {
                cell.set_high(axis, cell.high(axis) + 1);
            }
        }
    }

    /// Shifts every cell index past `index` down by one.
    ///
    /// Must follow a cut removal at `index` on `axis`; no cell may still
    /// reference the removed cut.
    fn shift_cells_for_remove(&mut self, axis: Axis, index: usize) {
        for cell in &mut self.cells {
            if cell.low(axis) > index {
                cell.set_low(axis, cell.low(axis) - 1);
            }
            if cell.high(axis) > index {
                cell.set_high(axis, cell.high(axis) - 1);
            }
        }
    }

    /// Checks that the mosaic is a valid tiling of the window.
    #[cfg(test)]
    pub fn verify_invariants(&self) {
        use approx::assert_abs_diff_eq;

        for axis in [Axis::Row, Axis::Column] {
            let cuts = self.grid.cuts(axis);
            assert!(
                cuts.len() >= 2,
                "axis {axis:?} must keep at least the two window edges"
            );
            assert_eq!(cuts[0], 0., "first cut on {axis:?} must be the window edge");
            assert_eq!(
                *cuts.last().unwrap(),
                1.,
                "last cut on {axis:?} must be the window edge"
            );
            for pair in cuts.windows(2) {
                assert!(
                    pair[0] < pair[1],
                    "cut positions on {axis:?} must strictly increase: {cuts:?}"
                );
            }
        }

        assert!(!self.cells.is_empty(), "a mosaic always has at least one pane");

        let rows = self.grid.cuts(Axis::Row);
        let cols = self.grid.cuts(Axis::Column);

        for (index, cell) in self.cells.iter().enumerate() {
            assert!(
                cell.left < cell.right,
                "cell {index} must have positive width: {cell:?}"
            );
            assert!(
                cell.top < cell.bottom,
                "cell {index} must have positive height: {cell:?}"
            );
            assert!(
                cell.right < cols.len(),
                "cell {index} points past the column cuts: {cell:?}"
            );
            assert!(
                cell.bottom < rows.len(),
                "cell {index} points past the row cuts: {cell:?}"
            );
        }

        // Comparing indices is enough for overlap since positions strictly
        // increase.
        for (a_index, a) in self.cells.iter().enumerate() {
            for (b_index, b) in self.cells.iter().enumerate().skip(a_index + 1) {
                let overlap =
                    a.left < b.right && b.left < a.right && a.top < b.bottom && b.top < a.bottom;
                assert!(
                    !overlap,
                    "cells {a_index} and {b_index} overlap: {a:?} vs {b:?}"
                );
            }
        }

        let total: f64 = self
            .cells
            .iter()
            .map(|cell| {
                (cols[cell.right] - cols[cell.left]) * (rows[cell.bottom] - rows[cell.top])
            })
            .sum();
        assert_abs_diff_eq!(total, 1., epsilon = 1e-9);

        // With areas summing to one and no overlap, gaps are already ruled
        // out; the sample grid double-checks from first principles.
        for y_step in 0..16 {
            let y = (f64::from(y_step) + 0.5) / 16.;
            for x_step in 0..16 {
                let x = (f64::from(x_step) + 0.5) / 16.;
                let covering = self
                    .cells
                    .iter()
                    .filter(|cell| {
                        cols[cell.left] <= x
                            && x < cols[cell.right]
                            && rows[cell.top] <= y
                            && y < rows[cell.bottom]
                    })
                    .count();
                assert_eq!(covering, 1, "point ({x}, {y}) must be covered exactly once");
            }
        }

        for axis in [Axis::Row, Axis::Column] {
            for index in 0..self.grid.len(axis) {
                let used = self
                    .cells
                    .iter()
                    .any(|cell| cell.low(axis) == index || cell.high(axis) == index);
                assert!(used, "cut {index} on {axis:?} is referenced by no cell");
            }
        }
    }
}
