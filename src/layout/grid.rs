//! The cut-position grid underneath a mosaic.

use grout_ipc::Axis;

/// Tolerance for comparing cut positions.
///
/// Positions closer than this are treated as the same cut line, and no two
/// cuts are ever allowed to come closer than this.
pub const EPSILON: f64 = 0.001;

/// Two sequences of cut positions, one per axis.
///
/// Each sequence is strictly increasing, starts at `0.` and ends at `1.`.
/// Panes never store positions; they index into these sequences, so moving one
/// cut moves the border of every pane that references it.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    rows: Vec<f64>,
    cols: Vec<f64>,
}

impl Grid {
    pub fn from_cuts(rows: Vec<f64>, cols: Vec<f64>) -> Self {
        Self { rows, cols }
    }

    pub fn cuts(&self, axis: Axis) -> &[f64] {
        match axis {
            Axis::Row => &self.rows,
            Axis::Column => &self.cols,
        }
    }

    fn cuts_mut(&mut self, axis: Axis) -> &mut Vec<f64> {
        match axis {
            Axis::Row => &mut self.rows,
            Axis::Column => &mut self.cols,
        }
    }

    pub fn len(&self, axis: Axis) -> usize {
        self.cuts(axis).len()
    }

    /// Inserts a cut at `position`, or reuses an existing one within
    /// [`EPSILON`] of it.
    ///
    /// Returns the cut's index and whether it was freshly inserted. On a fresh
    /// insert, every cell index at or past the returned index is stale and
    /// must be shifted up by the caller.
    pub fn insert_cut(&mut self, axis: Axis, position: f64) -> (usize, bool) {
        let cuts = self.cuts_mut(axis);

        let mut index = 0;
        while index < cuts.len() {
            if (cuts[index] - position).abs() <= EPSILON {
                return (index, false);
            }
            if cuts[index] > position {
                break;
            }
            index += 1;
        }

        // The endpoints are pinned at 0 and 1, so a valid position always
        // lands strictly inside the sequence.
        debug_assert!(index > 0 && index < cuts.len());
        cuts.insert(index, position);
        (index, true)
    }

    /// Removes the cut at `index` and returns its position.
    ///
    /// Every cell index past `index` is stale afterwards and must be shifted
    /// down by the caller.
    pub fn remove_cut(&mut self, axis: Axis, index: usize) -> f64 {
        self.cuts_mut(axis).remove(index)
    }

    /// Opens a new cut slot at `index` and respaces the axis evenly.
    ///
    /// Unlike [`insert_cut`][Self::insert_cut] this doesn't pick a position:
    /// it is meant for create-style splits, which renormalize the axis anyway.
    pub fn insert_slot(&mut self, axis: Axis, index: usize) {
        let cuts = self.cuts_mut(axis);
        debug_assert!(index <= cuts.len());
        cuts.insert(index, 0.);
        self.normalize(axis);
    }

    /// Moves the cut at `index` by `delta`, if that keeps it at least
    /// [`EPSILON`] away from both neighboring cuts.
    ///
    /// The outermost cuts are the window edges and never move. Returns whether
    /// anything changed; an out-of-room move is rejected outright rather than
    /// clamped.
    pub fn move_cut(&mut self, axis: Axis, index: usize, delta: f64) -> bool {
        let cuts = self.cuts_mut(axis);
        if index == 0 || index == cuts.len() - 1 {
            return false;
        }

        let target = cuts[index] + delta;
        if target < cuts[index - 1] + EPSILON || target > cuts[index + 1] - EPSILON {
            return false;
        }

        cuts[index] = target;
        true
    }

    /// Respaces the axis evenly, keeping the endpoints pinned at 0 and 1.
    pub fn normalize(&mut self, axis: Axis) {
        let cuts = self.cuts_mut(axis);
        let spans = cuts.len() - 1;
        let step = 1. / spans as f64;

        cuts[0] = 0.;
        for index in 1..spans {
            cuts[index] = index as f64 * step;
        }
        // Assigned directly since the products above accumulate float error.
        cuts[spans] = 1.;
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn grid() -> Grid {
        Grid::from_cuts(vec![0., 1.], vec![0., 0.5, 1.])
    }

    #[test]
    fn insert_cut_between_existing() {
        let mut grid = grid();
        let (index, inserted) = grid.insert_cut(Axis::Column, 0.25);
        assert!(inserted);
        assert_eq!(index, 1);
        assert_eq!(grid.cuts(Axis::Column), &[0., 0.25, 0.5, 1.]);
    }

    #[test]
    fn insert_cut_reuses_nearby() {
        let mut grid = grid();
        let (index, inserted) = grid.insert_cut(Axis::Column, 0.5004);
        assert!(!inserted);
        assert_eq!(index, 1);
        assert_eq!(grid.cuts(Axis::Column), &[0., 0.5, 1.]);

        // The window edges are reusable like any other cut.
        let (index, inserted) = grid.insert_cut(Axis::Column, 0.9995);
        assert!(!inserted);
        assert_eq!(index, 2);
    }

    #[test]
    fn insert_cut_just_outside_tolerance() {
        let mut grid = grid();
        let (index, inserted) = grid.insert_cut(Axis::Column, 0.502);
        assert!(inserted);
        assert_eq!(index, 2);
        assert_eq!(grid.cuts(Axis::Column), &[0., 0.5, 0.502, 1.]);
    }

    #[test]
    fn normalize_respaces_evenly() {
        let mut grid = Grid::from_cuts(vec![0., 1.], vec![0., 0.1, 0.2, 1.]);
        grid.normalize(Axis::Column);

        let cuts = grid.cuts(Axis::Column);
        assert_eq!(cuts.len(), 4);
        assert_eq!(cuts[0], 0.);
        assert_abs_diff_eq!(cuts[1], 1. / 3., epsilon = 1e-12);
        assert_abs_diff_eq!(cuts[2], 2. / 3., epsilon = 1e-12);
        assert_eq!(cuts[3], 1.);
    }

    #[test]
    fn normalize_pins_endpoints_exactly() {
        let mut grid = Grid::from_cuts(vec![0., 1.], (0..=7).map(|i| f64::from(i) / 7.).collect());
        grid.normalize(Axis::Column);

        let cuts = grid.cuts(Axis::Column);
        assert_eq!(cuts[0], 0.);
        assert_abs_diff_eq!(cuts[6], 6. / 7., epsilon = 1e-12);
        assert_eq!(*cuts.last().unwrap(), 1.);
    }

    #[test]
    fn normalize_is_idempotent() {
        let mut grid = Grid::from_cuts(vec![0., 1.], vec![0., 0.37, 0.8, 1.]);
        grid.normalize(Axis::Column);
        let once = grid.clone();

        grid.normalize(Axis::Column);
        assert_eq!(grid, once);
    }

    #[test]
    fn move_cut_respects_neighbors() {
        let mut grid = grid();
        assert!(grid.move_cut(Axis::Column, 1, 0.25));
        assert_abs_diff_eq!(grid.cuts(Axis::Column)[1], 0.75, epsilon = 1e-12);

        // Would land within EPSILON of the right window edge.
        assert!(!grid.move_cut(Axis::Column, 1, 0.2495001));
        assert_abs_diff_eq!(grid.cuts(Axis::Column)[1], 0.75, epsilon = 1e-12);
    }

    #[test]
    fn move_cut_rejects_rather_than_clamps() {
        let mut grid = grid();
        assert!(!grid.move_cut(Axis::Column, 1, 0.6));
        assert_eq!(grid.cuts(Axis::Column), &[0., 0.5, 1.]);
    }

    #[test]
    fn window_edges_never_move() {
        let mut grid = grid();
        assert!(!grid.move_cut(Axis::Column, 0, 0.1));
        assert!(!grid.move_cut(Axis::Column, 2, -0.1));
        assert!(!grid.move_cut(Axis::Row, 1, 0.1));
        assert_eq!(grid.cuts(Axis::Column), &[0., 0.5, 1.]);
        assert_eq!(grid.cuts(Axis::Row), &[0., 1.]);
    }
}
