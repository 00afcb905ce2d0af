//! Tests driving the full command stack against a scripted window.

use approx::assert_abs_diff_eq;
use grout_config::{Config, FloatOrInt};
use grout_ipc::{Direction, ResizeMode, WindowLayout};
use proptest::prelude::*;
use proptest_derive::Arbitrary;

use super::Mosaic;
use crate::commands::{BlockReason, Commands, GroupOutOfRange, Outcome};
use crate::window::EditorWindow;


/// An in-memory window faithful to how editors host panes.
///
/// Views belong to groups by index, so layout commits don't move views by
/// themselves; the command layer has to. `verify_invariants` leans on that:
/// it checks the window's bookkeeping on top of the layout's own.
#[derive(Debug)]
pub struct TestWindow {
    layout: WindowLayout,
    views: Vec<Vec<u64>>,
    active_group: usize,
    active_view: Option<u64>,
    next_view_id: u64,
}

impl TestWindow {
    pub fn new() -> Self {
        Self {
            layout: WindowLayout::single_pane(),
            views: vec![vec![1]],
            active_group: 0,
            active_view: Some(1),
            next_view_id: 2,
        }
    }

    /// Opens a new view in the active group and focuses it.
    pub fn add_view(&mut self) -> u64 {
        let id = self.next_view_id;
        self.next_view_id += 1;
        self.views[self.active_group].push(id);
        self.active_view = Some(id);
        id
    }

    fn position_of(&self, view: u64) -> Option<(usize, usize)> {
        self.views.iter().enumerate().find_map(|(group, views)| {
            views
                .iter()
                .position(|&hosted| hosted == view)
                .map(|position| (group, position))
        })
    }

    /// Re-derives the focused view after a move pulled it elsewhere.
    fn sync_focus(&mut self) {
        match self.active_view {
            Some(view) if self.views[self.active_group].contains(&view) => {}
            _ => self.active_view = self.views[self.active_group].first().copied(),
        }
    }

    pub fn verify_invariants(&self) {
        let mosaic = Mosaic::from_layout(self.layout.clone());
        mosaic.verify_invariants();

        assert_eq!(
            self.views.len(),
            self.layout.cells.len(),
            "one view list per pane"
        );
        assert!(
            self.active_group < self.layout.cells.len(),
            "active group must exist"
        );

        let mut all: Vec<u64> = self.views.iter().flatten().copied().collect();
        all.sort_unstable();
        all.dedup();
        assert_eq!(
            all.len(),
            self.views.iter().map(Vec::len).sum::<usize>(),
            "a view lives in exactly one group"
        );

        match self.active_view {
            Some(view) => assert!(
                self.views[self.active_group].contains(&view),
                "the focused view must sit in the active group"
            ),
            None => assert!(
                self.views[self.active_group].is_empty(),
                "a group with views must focus one of them"
            ),
        }
    }
}

impl EditorWindow for TestWindow {
    type ViewId = u64;

    fn layout(&self) -> WindowLayout {
        self.layout.clone()
    }

    fn set_layout(&mut self, layout: WindowLayout) {
        let count = layout.cells.len();
        while self.views.len() < count {
            self.views.push(Vec::new());
        }
        while self.views.len() > count {
            let extra = self.views.pop().unwrap();
            assert!(
                extra.is_empty(),
                "views must be re-homed before their group disappears: {extra:?}"
            );
        }

        self.layout = layout;
        if self.active_group >= count {
            self.active_group = count - 1;
        }
        self.sync_focus();
    }

    fn active_group(&self) -> usize {
        self.active_group
    }

    fn active_view(&self) -> Option<u64> {
        self.active_view
    }

    fn views_in_group(&self, group: usize) -> Vec<u64> {
        self.views[group].clone()
    }

    fn set_view_index(&mut self, view: &u64, group: usize, position: usize) {
        let (old_group, old_position) = self.position_of(*view).expect("view must be hosted");
        self.views[old_group].remove(old_position);

        let target = &mut self.views[group];
        let position = position.min(target.len());
        target.insert(position, *view);

        self.sync_focus();
    }

    fn focus_group(&mut self, group: usize) {
        self.active_group = group;
        self.active_view = self.views[group].first().copied();
    }

    fn focus_view(&mut self, view: &u64) {
        let (group, _) = self.position_of(*view).expect("view must be hosted");
        self.active_group = group;
        self.active_view = Some(*view);
    }
}

fn direction_strategy() -> impl Strategy<Value = Direction> {
    prop_oneof![
        Just(Direction::Left),
        Just(Direction::Up),
        Just(Direction::Right),
        Just(Direction::Down),
    ]
}

fn resize_mode_strategy() -> impl Strategy<Value = ResizeMode> {
    prop_oneof![Just(ResizeMode::Grow), Just(ResizeMode::Shrink)]
}

#[derive(Debug, Clone, Copy, Arbitrary)]
pub enum Op {
    MoveFocus(#[proptest(strategy = "direction_strategy()")] Direction),
    MoveView(#[proptest(strategy = "direction_strategy()")] Direction),
    Split(#[proptest(strategy = "direction_strategy()")] Direction),
    Close,
    Resize(
        #[proptest(strategy = "resize_mode_strategy()")] ResizeMode,
        #[proptest(strategy = "direction_strategy()")] Direction,
    ),
    ToggleSplitMode,
    FocusGroup(#[proptest(strategy = "0usize..8")] usize),
    AddView,
}

fn apply_op(window: &mut TestWindow, config: &mut Config, op: Op) {
    match op {
        Op::MoveFocus(direction) => {
            Commands::new(window, config).move_focus(direction).unwrap();
        }
        Op::MoveView(direction) => {
            Commands::new(window, config).move_view(direction).unwrap();
        }
        Op::Split(direction) => {
            Commands::new(window, config).split(direction).unwrap();
        }
        Op::Close => {
            Commands::new(window, config).close().unwrap();
        }
        Op::Resize(mode, direction) => {
            Commands::new(window, config).resize(mode, direction).unwrap();
        }
        Op::ToggleSplitMode => {
            Commands::new(window, config).toggle_split_mode();
        }
        Op::FocusGroup(index) => {
            let count = window.layout.cells.len();
            window.focus_group(index % count);
        }
        Op::AddView => {
            window.add_view();
        }
    }
}

/// Applies `ops` in order, checking every invariant after each one.
pub fn check_ops(ops: impl IntoIterator<Item = Op>) -> TestWindow {
    let mut window = TestWindow::new();
    let mut config = Config::default();
    for op in ops {
        apply_op(&mut window, &mut config, op);
        window.verify_invariants();
    }
    window
}

proptest! {
    #[test]
    fn random_ops_dont_panic(ops in proptest::collection::vec(any::<Op>(), 0..40)) {
        check_ops(ops);
    }
}

#[test]
fn splitting_then_closing_the_new_pane_is_an_identity() {
    for direction in Direction::ALL {
        let mut base = Mosaic::single_pane();
        base.split(0, Direction::Right).unwrap();
        let before = base.to_layout();

        let mut mosaic = base.clone();
        let new_group = mosaic.split(0, direction).unwrap();
        mosaic.verify_invariants();

        mosaic.close(new_group).unwrap();
        mosaic.verify_invariants();

        // The freed cut collapses and the respace lands back on the same
        // evenly-spaced positions.
        assert_eq!(mosaic.to_layout(), before, "direction {direction}");
    }
}

#[test]
fn close_rehomes_views_across_the_shift() {
    let window = check_ops([
        Op::Split(Direction::Right),
        Op::Split(Direction::Right),
        Op::FocusGroup(1),
        Op::AddView,
        Op::FocusGroup(2),
        Op::AddView,
        Op::Close,
    ]);

    // Closing the middle column hands its view to the left pane, after that
    // pane's own views, and the re-homed view takes the focus.
    assert_eq!(window.views_in_group(0), vec![1, 3]);
    assert_eq!(window.views_in_group(1), vec![2]);
    assert_eq!(window.active_group(), 0);
    assert_eq!(window.active_view(), Some(3));
}

#[test]
fn close_rehomes_views_into_a_later_cover() {
    let window = check_ops([
        Op::Split(Direction::Right),
        Op::Split(Direction::Right),
        Op::FocusGroup(1),
        Op::AddView,
        Op::FocusGroup(2),
        Op::AddView,
        Op::FocusGroup(0),
        Op::AddView,
        Op::Close,
    ]);

    // The middle pane absorbs the closed left third, and its own group
    // number shifts down past the removed one. The views must land in the
    // shifted home, after that pane's own view, and the first re-homed view
    // takes the focus.
    assert_eq!(window.views_in_group(0), vec![2]);
    assert_eq!(window.views_in_group(1), vec![3, 1, 4]);
    assert_eq!(window.active_group(), 1);
    assert_eq!(window.active_view(), Some(1));
}

#[test]
fn blocked_commands_leave_the_window_alone() {
    let mut window = TestWindow::new();
    let mut config = Config::default();
    let before = window.layout();

    let mut commands = Commands::new(&mut window, &mut config);
    assert_eq!(
        commands.move_focus(Direction::Left).unwrap(),
        Outcome::Blocked(BlockReason::NoNeighbor)
    );
    assert_eq!(
        commands.close().unwrap(),
        Outcome::Blocked(BlockReason::NoValidCover)
    );
    assert_eq!(
        commands.resize(ResizeMode::Grow, Direction::Left).unwrap(),
        Outcome::Blocked(BlockReason::ResizeLimit)
    );

    assert_eq!(window.layout(), before);
    window.verify_invariants();
}

#[test]
fn resize_steps_follow_the_configured_axis() {
    let mut window = check_ops([Op::Split(Direction::Right), Op::Split(Direction::Down)]);
    let mut config = Config::default();
    config.resize_step.col = FloatOrInt(0.1);
    config.resize_step.row = FloatOrInt(0.2);

    let mut commands = Commands::new(&mut window, &mut config);
    assert_eq!(
        commands.resize(ResizeMode::Grow, Direction::Right).unwrap(),
        Outcome::Applied
    );
    assert_eq!(
        commands.resize(ResizeMode::Grow, Direction::Down).unwrap(),
        Outcome::Applied
    );

    let layout = window.layout();
    assert_abs_diff_eq!(layout.cols[1], 0.6, epsilon = 1e-12);
    assert_abs_diff_eq!(layout.rows[1], 0.7, epsilon = 1e-12);
    window.verify_invariants();
}

#[test]
fn moving_a_view_needs_a_view() {
    let mut window = check_ops([Op::Split(Direction::Right), Op::FocusGroup(1)]);
    let mut config = Config::default();

    let outcome = Commands::new(&mut window, &mut config)
        .move_view(Direction::Left)
        .unwrap();
    assert_eq!(outcome, Outcome::Blocked(BlockReason::NoActiveView));
}

#[test]
fn stale_active_group_is_reported() {
    let mut window = TestWindow::new();
    window.active_group = 5;
    let mut config = Config::default();

    let err = Commands::new(&mut window, &mut config).close().unwrap_err();
    assert_eq!(err, GroupOutOfRange { group: 5, count: 1 });
    assert_eq!(
        err.to_string(),
        "group 5 is out of range of the window's 1 panes"
    );
}

#[test]
fn toggling_split_mode_reports_the_new_mode() {
    use grout_ipc::{Action, SplitMode};

    let mut window = TestWindow::new();
    let mut config = Config::default();
    let mut commands = Commands::new(&mut window, &mut config);

    assert_eq!(
        commands.dispatch(Action::ToggleSplitMode).unwrap(),
        Outcome::ModeChanged(SplitMode::Create)
    );
    assert_eq!(
        commands.dispatch(Action::ToggleSplitMode).unwrap(),
        Outcome::ModeChanged(SplitMode::Slice)
    );
    assert_eq!(config.split_mode, SplitMode::Slice);
}
