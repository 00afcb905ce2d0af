//! Making room for a new pane.

use grout_ipc::{Axis, Cell, Direction};

use super::Mosaic;

impl Mosaic {
    /// Halves `group` along the axis of `direction`, putting the new pane in
    /// the half toward `direction`.
    ///
    /// The cut lands on the pane's midpoint, reusing an existing cut within
    /// [`EPSILON`][super::EPSILON] of it. A fresh cut changes the axis
    /// structure, so the axis is respaced evenly afterwards; a reused cut
    /// leaves every position as it was.
    ///
    /// Returns the new pane's group, or `None` if the pane is too thin for
    /// the midpoint to clear its own borders.
    pub fn split(&mut self, group: usize, direction: Direction) -> Option<usize> {
        let axis = direction.axis();
        let cell = self.cells[group];
        let (low, high) = (cell.low(axis), cell.high(axis));

        let cuts = self.grid.cuts(axis);
        let position = cuts[low] + (cuts[high] - cuts[low]) / 2.;

        let (index, inserted) = self.grid.insert_cut(axis, position);
        if !inserted && (index == low || index == high) {
            return None;
        }
        if inserted {
            self.shift_cells_for_insert(axis, index);
        }

        let mut new_cell = self.cells[group];
        match direction {
            Direction::Right | Direction::Down => {
                self.cells[group].set_high(axis, index);
                new_cell.set_low(axis, index);
            }
            Direction::Left | Direction::Up => {
                self.cells[group].set_low(axis, index);
                new_cell.set_high(axis, index);
            }
        }
        self.cells.push(new_cell);

        if inserted {
            self.grid.normalize(axis);
        }

        Some(self.cells.len() - 1)
    }

    /// Opens a full-length row or column next to `group`, on its side in
    /// `direction`.
    ///
    /// The new lane runs the whole window, so the border being extended must
    /// be a clean line; returns `None` when some pane spans across it. The
    /// axis is always respaced evenly afterwards.
    pub fn create(&mut self, group: usize, direction: Direction) -> Option<usize> {
        let axis = direction.axis();
        let border = self.cells[group].side(direction);

        if self
            .cells
            .iter()
            .any(|cell| cell.low(axis) < border && border < cell.high(axis))
        {
            return None;
        }

        let slot = match direction {
            Direction::Left | Direction::Up => border,
            Direction::Right | Direction::Down => border + 1,
        };
        self.grid.insert_slot(axis, slot);

        // Panes past the border move over to make the gap; panes ending on
        // the border keep their edge, which now faces the new lane.
        for cell in &mut self.cells {
            if cell.low(axis) >= border {
                cell.set_low(axis, cell.low(axis) + 1);
            }
            if cell.high(axis) > border {
                cell.set_high(axis, cell.high(axis) + 1);
            }
        }

        let end = self.grid.len(axis.other()) - 1;
        let new_cell = match axis {
            Axis::Column => Cell::new(border, 0, border + 1, end),
            Axis::Row => Cell::new(0, border, end, border + 1),
        };
        self.cells.push(new_cell);

        Some(self.cells.len() - 1)
    }
}
