//! Closing a pane and healing the tiling.

use grout_ipc::{Axis, Direction};

use super::Mosaic;

/// What happened to the space of a closed pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloseOutcome {
    /// Side of the closed pane its neighbors took over from.
    pub side: Direction,
    /// Groups that absorbed the area, numbered as before the removal.
    pub cover: Vec<usize>,
    /// Group to re-home the closed pane's views into, numbered as after the
    /// removal.
    pub new_home: usize,
}

impl Mosaic {
    /// Removes `group`, letting the panes on one side take over its area.
    ///
    /// Sides are tried in [`Direction::ALL`] order. A side works when the
    /// panes leaning on that border from outside, within the closed pane's
    /// extent, tile the extent exactly; their facing edges then move to the
    /// closed pane's far edge. Not every pane has such a side: a pane whose
    /// neighbors all run past its corners can't be closed, and `None` is
    /// returned with nothing changed.
    ///
    /// Cuts left bordering no pane are dropped, and axes that lost a cut are
    /// respaced evenly.
    pub fn close(&mut self, group: usize) -> Option<CloseOutcome> {
        let target = self.cells[group];

        for direction in Direction::ALL {
            let Some(cover) = self.cover_set(group, direction) else {
                continue;
            };

            let far = target.side(direction.opposite());
            for &index in &cover {
                self.cells[index].set_side(direction.opposite(), far);
            }
            self.cells.remove(group);

            let candidate = cover[0];
            let new_home = if candidate < group {
                candidate
            } else {
                candidate - 1
            };

            self.collapse_unused_cuts();

            return Some(CloseOutcome {
                side: direction,
                cover,
                new_home,
            });
        }

        None
    }

    /// The groups able to take over `group`'s area from its side in
    /// `direction`, or `None` if that side doesn't tile the extent exactly.
    fn cover_set(&self, group: usize, direction: Direction) -> Option<Vec<usize>> {
        let target = self.cells[group];
        let border = target.side(direction);
        let perp = direction.axis().other();
        let (low, high) = (target.low(perp), target.high(perp));

        let mut cover = Vec::new();
        for (index, cell) in self.cells.iter().enumerate() {
            if index == group || cell.side(direction.opposite()) != border {
                continue;
            }
            // Panes running past the target's corners can't stretch into it.
            if cell.low(perp) < low || high < cell.high(perp) {
                continue;
            }
            cover.push(index);
        }

        if cover.is_empty() {
            return None;
        }

        // The set must reach both ends of the extent and the spans must sum
        // to the whole of it, leaving no room for gaps.
        let min_low = cover
            .iter()
            .map(|&index| self.cells[index].low(perp))
            .min()
            .unwrap();
        let max_high = cover
            .iter()
            .map(|&index| self.cells[index].high(perp))
            .max()
            .unwrap();
        let span_sum: usize = cover
            .iter()
            .map(|&index| self.cells[index].high(perp) - self.cells[index].low(perp))
            .sum();

        (min_low == low && max_high == high && span_sum == high - low).then_some(cover)
    }

    /// Drops every interior cut that no longer borders any pane.
    fn collapse_unused_cuts(&mut self) {
        for axis in [Axis::Row, Axis::Column] {
            let mut removed_any = false;

            // High to low, so the indices still to visit stay valid.
            for index in (1..self.grid.len(axis) - 1).rev() {
                let used = self
                    .cells
                    .iter()
                    .any(|cell| cell.low(axis) == index || cell.high(axis) == index);
                if used {
                    continue;
                }

                self.grid.remove_cut(axis, index);
                self.shift_cells_for_remove(axis, index);
                removed_any = true;
            }

            if removed_any {
                self.grid.normalize(axis);
            }
        }
    }
}
