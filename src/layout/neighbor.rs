//! Picking the pane across a border.

use grout_ipc::Direction;

use super::Mosaic;

impl Mosaic {
    /// Finds the most natural pane to land on when moving from `group` in
    /// `direction`.
    ///
    /// Candidates are the panes whose facing edge lies exactly on the current
    /// pane's border in that direction. Among them, the one sharing the
    /// longest stretch of border wins, measured in window fractions on the
    /// perpendicular axis. An earlier group wins ties, and a pane touching
    /// only at a corner is never returned.
    pub fn best_neighbor(&self, group: usize, direction: Direction) -> Option<usize> {
        let current = self.cells[group];
        let border = current.side(direction);
        let perp = direction.axis().other();
        let cuts = self.grid.cuts(perp);

        let mut best = None;
        let mut best_overlap = 0.;
        for (index, cell) in self.cells.iter().enumerate() {
            if index == group || cell.side(direction.opposite()) != border {
                continue;
            }

            let low = current.low(perp).max(cell.low(perp));
            let high = current.high(perp).min(cell.high(perp));
            if low >= high {
                continue;
            }

            let overlap = cuts[high] - cuts[low];
            if overlap > best_overlap {
                best_overlap = overlap;
                best = Some(index);
            }
        }

        best
    }
}
