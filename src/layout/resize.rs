//! Moving pane borders.

use grout_ipc::{Direction, ResizeMode};

use super::Mosaic;

impl Mosaic {
    /// Moves one border of `group` by `step` window fractions.
    ///
    /// Grow pushes the pane's own border in `direction` outward; shrink pulls
    /// the opposite border inward, also toward `direction`. The moved cut is
    /// shared, so panes on its far side take or give up the space.
    ///
    /// Returns whether anything moved: a border on the window edge stays put,
    /// as does one that would come within [`EPSILON`][super::EPSILON] of the
    /// next cut over. There is no partial movement.
    pub fn resize(
        &mut self,
        group: usize,
        direction: Direction,
        mode: ResizeMode,
        step: f64,
    ) -> bool {
        let cell = self.cells[group];

        let (index, delta) = match (mode, direction) {
            (ResizeMode::Grow, Direction::Left) => (cell.left, -step),
            (ResizeMode::Grow, Direction::Up) => (cell.top, -step),
            (ResizeMode::Grow, Direction::Right) => (cell.right, step),
            (ResizeMode::Grow, Direction::Down) => (cell.bottom, step),
            (ResizeMode::Shrink, Direction::Left) => (cell.right, -step),
            (ResizeMode::Shrink, Direction::Up) => (cell.bottom, -step),
            (ResizeMode::Shrink, Direction::Right) => (cell.left, step),
            (ResizeMode::Shrink, Direction::Down) => (cell.top, step),
        };

        self.grid.move_cut(direction.axis(), index, delta)
    }
}
