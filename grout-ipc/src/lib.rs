//! Types for driving a grout mosaic from a host editor.
//!
//! Everything in this crate is plain data: the engine in the main crate
//! consumes and produces these types, and hosts serialize them when talking to
//! an embedded engine out of process. After a short stabilization period,
//! changes to these types will be incremental with backwards compatibility.
#![warn(missing_docs)]

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the four cardinal directions on the pane grid.
///
/// Directions are always relative to the window, not to any pane: `Left` is
/// toward the left window edge regardless of which pane is current.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Toward the left window edge.
    Left,
    /// Toward the top window edge.
    Up,
    /// Toward the right window edge.
    Right,
    /// Toward the bottom window edge.
    Down,
}

impl Direction {
    /// All directions in scan order.
    ///
    /// Operations that try each side in turn (like close) use this order, so
    /// it is part of the observable behavior.
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Up,
        Direction::Right,
        Direction::Down,
    ];

    /// The axis whose cut sequence moving in this direction crosses.
    ///
    /// Moving left or right crosses vertical cut lines, which live on the
    /// column axis; up and down cross horizontal ones on the row axis.
    pub fn axis(self) -> Axis {
        match self {
            Direction::Left | Direction::Right => Axis::Column,
            Direction::Up | Direction::Down => Axis::Row,
        }
    }

    /// The direction pointing the opposite way.
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Left => Direction::Right,
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
        }
    }
}

impl FromStr for Direction {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Self::Left),
            "up" => Ok(Self::Up),
            "right" => Ok(Self::Right),
            "down" => Ok(Self::Down),
            _ => Err(r#"invalid direction, can be "left", "up", "right" or "down""#),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Left => write!(f, "left"),
            Self::Up => write!(f, "up"),
            Self::Right => write!(f, "right"),
            Self::Down => write!(f, "down"),
        }
    }
}

/// One of the two axes of the pane grid.
///
/// Each axis owns an independent sequence of cut positions; see
/// [`WindowLayout`].
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    /// The axis of horizontal cut lines, running top to bottom.
    Row,
    /// The axis of vertical cut lines, running left to right.
    Column,
}

impl Axis {
    /// The perpendicular axis.
    pub fn other(self) -> Axis {
        match self {
            Axis::Row => Axis::Column,
            Axis::Column => Axis::Row,
        }
    }
}

/// Whether a resize makes the current pane bigger or smaller.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ResizeMode {
    /// Move the pane's own border in the given direction, enlarging the pane.
    Grow,
    /// Move the opposite border toward the given direction, shrinking the
    /// pane.
    Shrink,
}

impl FromStr for ResizeMode {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "grow" => Ok(Self::Grow),
            "shrink" => Ok(Self::Shrink),
            _ => Err(r#"invalid resize mode, can be "grow" or "shrink""#),
        }
    }
}

impl fmt::Display for ResizeMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Grow => write!(f, "grow"),
            Self::Shrink => write!(f, "shrink"),
        }
    }
}

/// How the split command carves out room for a new pane.
#[derive(Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SplitMode {
    /// Halve the current pane and put the new pane in the half toward the
    /// requested direction.
    #[default]
    Slice,
    /// Open a full-width row or full-height column next to the current pane.
    Create,
}

impl SplitMode {
    /// The other mode.
    pub fn toggled(self) -> SplitMode {
        match self {
            SplitMode::Slice => SplitMode::Create,
            SplitMode::Create => SplitMode::Slice,
        }
    }
}

impl FromStr for SplitMode {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "slice" => Ok(Self::Slice),
            "create" => Ok(Self::Create),
            _ => Err(r#"invalid split mode, can be "slice" or "create""#),
        }
    }
}

impl fmt::Display for SplitMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Slice => write!(f, "slice"),
            Self::Create => write!(f, "create"),
        }
    }
}

/// One pane's extent, as indices into the cut sequences of a [`WindowLayout`].
///
/// A cell does not store positions. Its four fields index into the layout's
/// `cols` (for `left` and `right`) and `rows` (for `top` and `bottom`), so the
/// pane covers the rectangle from `cols[left], rows[top]` to `cols[right],
/// rows[bottom]`. Always `left < right` and `top < bottom`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    /// Index of the cut at the pane's left edge.
    pub left: usize,
    /// Index of the cut at the pane's top edge.
    pub top: usize,
    /// Index of the cut at the pane's right edge.
    pub right: usize,
    /// Index of the cut at the pane's bottom edge.
    pub bottom: usize,
}

impl Cell {
    /// Makes a cell from its four edge indices.
    pub fn new(left: usize, top: usize, right: usize, bottom: usize) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// The edge index on the given side.
    pub fn side(&self, direction: Direction) -> usize {
        match direction {
            Direction::Left => self.left,
            Direction::Up => self.top,
            Direction::Right => self.right,
            Direction::Down => self.bottom,
        }
    }

    /// Replaces the edge index on the given side.
    pub fn set_side(&mut self, direction: Direction, index: usize) {
        match direction {
            Direction::Left => self.left = index,
            Direction::Up => self.top = index,
            Direction::Right => self.right = index,
            Direction::Down => self.bottom = index,
        }
    }

    /// The edge index nearer the start of the given axis.
    ///
    /// This is `top` on the row axis and `left` on the column axis.
    pub fn low(&self, axis: Axis) -> usize {
        match axis {
            Axis::Row => self.top,
            Axis::Column => self.left,
        }
    }

    /// The edge index nearer the end of the given axis.
    pub fn high(&self, axis: Axis) -> usize {
        match axis {
            Axis::Row => self.bottom,
            Axis::Column => self.right,
        }
    }

    /// Replaces the edge index nearer the start of the given axis.
    pub fn set_low(&mut self, axis: Axis, index: usize) {
        match axis {
            Axis::Row => self.top = index,
            Axis::Column => self.left = index,
        }
    }

    /// Replaces the edge index nearer the end of the given axis.
    pub fn set_high(&mut self, axis: Axis, index: usize) {
        match axis {
            Axis::Row => self.bottom = index,
            Axis::Column => self.right = index,
        }
    }
}

/// A full description of how a window is tiled into panes.
///
/// `rows` and `cols` are strictly increasing sequences of cut positions in
/// window-fraction units, always starting at `0.0` and ending at `1.0`. Every
/// [`Cell`] indexes into them. A pane's position in `cells` is its group
/// number, which is how hosts address panes; reordering `cells` changes pane
/// identity.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WindowLayout {
    /// Horizontal cut positions, top to bottom, from `0.0` to `1.0`.
    pub rows: Vec<f64>,
    /// Vertical cut positions, left to right, from `0.0` to `1.0`.
    pub cols: Vec<f64>,
    /// The panes, indexed by group number.
    pub cells: Vec<Cell>,
}

impl WindowLayout {
    /// The layout of an unsplit window: one pane covering everything.
    pub fn single_pane() -> Self {
        Self {
            rows: vec![0., 1.],
            cols: vec![0., 1.],
            cells: vec![Cell::new(0, 0, 1, 1)],
        }
    }
}

/// A pane command for the engine to perform.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "clap", derive(clap::Subcommand))]
pub enum Action {
    /// Focus the nearest pane in a direction.
    MoveFocus {
        /// Direction to look in.
        direction: Direction,
    },
    /// Move the active view to the nearest pane in a direction.
    MoveView {
        /// Direction to look in.
        direction: Direction,
    },
    /// Make room for a new pane next to the current one.
    ///
    /// What "next to" means depends on the configured split mode.
    Split {
        /// Side of the current pane to put the new pane on.
        direction: Direction,
    },
    /// Close the current pane, letting its neighbors take over its area.
    Close,
    /// Move one border of the current pane by the configured step.
    Resize {
        /// Whether to grow or shrink the pane.
        mode: ResizeMode,
        /// Which border to work on.
        direction: Direction,
    },
    /// Switch between slice and create split modes.
    ToggleSplitMode,
}
