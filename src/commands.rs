//! The command layer between a host window and the mosaic engine.

use std::fmt;

use grout_config::Config;
use grout_ipc::{Action, Axis, Direction, ResizeMode, SplitMode};

use crate::layout::Mosaic;
use crate::window::EditorWindow;

/// Executes pane commands against a host window.
///
/// Holds no layout state of its own: every command re-reads the window, works
/// on the layout in memory and commits the result in one piece. Hosts can
/// keep one value around or build one per keystroke, whichever is convenient.
pub struct Commands<'a, W: EditorWindow> {
    window: &'a mut W,
    config: &'a mut Config,
}

/// How a command ended, short of a caller error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The command took effect.
    Applied,
    /// A well-formed request the current layout can't satisfy; nothing
    /// changed.
    Blocked(BlockReason),
    /// The split mode toggled; pane geometry is untouched.
    ModeChanged(SplitMode),
}

/// Why a command didn't change anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockReason {
    /// No pane lies in that direction.
    NoNeighbor,
    /// The active group holds no view to move.
    NoActiveView,
    /// The pane is too thin to halve.
    SplitTooSmall,
    /// Another pane spans the border the new lane would extend.
    SplitObstructed,
    /// No side of the pane can absorb its area.
    NoValidCover,
    /// The border sits on the window edge or is out of room.
    ResizeLimit,
}

impl BlockReason {
    /// A short status-line explanation for the user.
    pub fn message(self) -> &'static str {
        match self {
            BlockReason::NoNeighbor => "no pane in that direction",
            BlockReason::NoActiveView => "no view to move",
            BlockReason::SplitTooSmall => "pane is too small to split",
            BlockReason::SplitObstructed => "another pane spans this border",
            BlockReason::NoValidCover => "pane can't be merged into its neighbors",
            BlockReason::ResizeLimit => "that border can't move any further",
        }
    }
}

impl fmt::Display for BlockReason {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// A command addressed a pane that doesn't exist.
///
/// Unlike a [`BlockReason`], this points at a bug in the host: the window
/// reported an active group its own layout doesn't have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupOutOfRange {
    /// The group the window reported active.
    pub group: usize,
    /// How many panes the layout actually has.
    pub count: usize,
}

impl fmt::Display for GroupOutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "group {} is out of range of the window's {} panes",
            self.group, self.count
        )
    }
}

impl std::error::Error for GroupOutOfRange {}

impl<'a, W: EditorWindow> Commands<'a, W> {
    pub fn new(window: &'a mut W, config: &'a mut Config) -> Self {
        Self { window, config }
    }

    /// Runs `action`, returning how it ended.
    pub fn dispatch(&mut self, action: Action) -> Result<Outcome, GroupOutOfRange> {
        match action {
            Action::MoveFocus { direction } => self.move_focus(direction),
            Action::MoveView { direction } => self.move_view(direction),
            Action::Split { direction } => self.split(direction),
            Action::Close => self.close(),
            Action::Resize { mode, direction } => self.resize(mode, direction),
            Action::ToggleSplitMode => Ok(Outcome::ModeChanged(self.toggle_split_mode())),
        }
    }

    /// Reads the window's layout and active group in one go.
    fn current(&self) -> Result<(Mosaic, usize), GroupOutOfRange> {
        let mosaic = Mosaic::from_layout(self.window.layout());
        let group = self.window.active_group();
        if group >= mosaic.group_count() {
            warn!("window reports active group {group} beyond its layout");
            return Err(GroupOutOfRange {
                group,
                count: mosaic.group_count(),
            });
        }
        Ok((mosaic, group))
    }

    pub fn move_focus(&mut self, direction: Direction) -> Result<Outcome, GroupOutOfRange> {
        let _span = tracy_client::span!("Commands::move_focus");
        let (mosaic, group) = self.current()?;

        let Some(next) = mosaic.best_neighbor(group, direction) else {
            return Ok(Outcome::Blocked(BlockReason::NoNeighbor));
        };

        debug!("focus moves {direction} from group {group} to {next}");
        self.window.focus_group(next);
        Ok(Outcome::Applied)
    }

    pub fn move_view(&mut self, direction: Direction) -> Result<Outcome, GroupOutOfRange> {
        let _span = tracy_client::span!("Commands::move_view");
        let (mosaic, group) = self.current()?;

        let Some(next) = mosaic.best_neighbor(group, direction) else {
            return Ok(Outcome::Blocked(BlockReason::NoNeighbor));
        };
        let Some(view) = self.window.active_view() else {
            return Ok(Outcome::Blocked(BlockReason::NoActiveView));
        };

        // To the front of the target group, and it keeps the focus.
        self.window.set_view_index(&view, next, 0);
        self.window.focus_view(&view);
        Ok(Outcome::Applied)
    }

    pub fn split(&mut self, direction: Direction) -> Result<Outcome, GroupOutOfRange> {
        let _span = tracy_client::span!("Commands::split");
        let (mut mosaic, group) = self.current()?;

        let new_group = match self.config.split_mode {
            SplitMode::Slice => mosaic.split(group, direction),
            SplitMode::Create => mosaic.create(group, direction),
        };
        let Some(new_group) = new_group else {
            let reason = match self.config.split_mode {
                SplitMode::Slice => BlockReason::SplitTooSmall,
                SplitMode::Create => BlockReason::SplitObstructed,
            };
            return Ok(Outcome::Blocked(reason));
        };

        debug!("split {direction} adds group {new_group}");
        // The new group appends at the end, so every view keeps its group.
        self.window.set_layout(mosaic.to_layout());
        Ok(Outcome::Applied)
    }

    pub fn close(&mut self) -> Result<Outcome, GroupOutOfRange> {
        let _span = tracy_client::span!("Commands::close");
        let (mut mosaic, group) = self.current()?;
        let old_count = mosaic.group_count();

        let Some(closed) = mosaic.close(group) else {
            return Ok(Outcome::Blocked(BlockReason::NoValidCover));
        };

        debug!(
            "closing group {group}; groups {:?} absorb from the {}",
            closed.cover, closed.side
        );

        // Snapshot the seating order, then walk every view to its final
        // place before the groups shift underneath them.
        let old_views: Vec<Vec<W::ViewId>> = (0..old_count)
            .map(|index| self.window.views_in_group(index))
            .collect();

        for new_group in 0..mosaic.group_count() {
            let old_group = if new_group < group {
                new_group
            } else {
                new_group + 1
            };

            let mut position = 0;
            for view in &old_views[old_group] {
                self.window.set_view_index(view, new_group, position);
                position += 1;
            }
            if new_group == closed.new_home {
                // The closed pane's views go to the back of their new home.
                for view in &old_views[group] {
                    self.window.set_view_index(view, new_group, position);
                    position += 1;
                }
            }
        }

        self.window.set_layout(mosaic.to_layout());

        if let Some(first) = old_views[group].first() {
            self.window.focus_view(first);
        }

        Ok(Outcome::Applied)
    }

    pub fn resize(
        &mut self,
        mode: ResizeMode,
        direction: Direction,
    ) -> Result<Outcome, GroupOutOfRange> {
        let _span = tracy_client::span!("Commands::resize");
        let (mut mosaic, group) = self.current()?;

        let step = match direction.axis() {
            Axis::Row => self.config.resize_step.row.0,
            Axis::Column => self.config.resize_step.col.0,
        };

        if !mosaic.resize(group, direction, mode, step) {
            return Ok(Outcome::Blocked(BlockReason::ResizeLimit));
        }

        self.window.set_layout(mosaic.to_layout());
        Ok(Outcome::Applied)
    }

    /// Flips between slice and create splits, returning the new mode.
    ///
    /// The flip lives in the in-memory config; persisting it is the host's
    /// call.
    pub fn toggle_split_mode(&mut self) -> SplitMode {
        self.config.split_mode = self.config.split_mode.toggled();
        info!("split mode is now {}", self.config.split_mode);
        self.config.split_mode
    }
}
