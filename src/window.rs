//! The host window the engine drives.

use grout_ipc::WindowLayout;

/// An editor window whose panes the engine manages.
///
/// The engine never owns views or draws anything; it reads the window's state,
/// decides on a new layout and writes it back through this trait. Commands
/// follow a strict order: all reads and all fallible work happen before the
/// first write, so the window never sees a half-applied command.
pub trait EditorWindow {
    /// Stable identifier for a view hosted in the window.
    type ViewId: Clone + PartialEq + std::fmt::Debug;

    /// The current pane layout.
    fn layout(&self) -> WindowLayout;

    /// Replaces the pane layout.
    ///
    /// Views keep their group numbers across this call, so when a commit
    /// removes a group, the caller re-homes views first.
    fn set_layout(&mut self, layout: WindowLayout);

    /// The group holding the focus.
    fn active_group(&self) -> usize;

    /// The focused view, if the active group holds any.
    fn active_view(&self) -> Option<Self::ViewId>;

    /// The views of `group`, front to back.
    fn views_in_group(&self, group: usize) -> Vec<Self::ViewId>;

    /// Moves `view` to `group`, inserting at `position` in its view list.
    fn set_view_index(&mut self, view: &Self::ViewId, group: usize, position: usize);

    /// Focuses `group`, keeping whichever view it already shows.
    fn focus_group(&mut self, group: usize);

    /// Focuses `view`, implicitly focusing the group holding it.
    fn focus_view(&mut self, view: &Self::ViewId);
}
