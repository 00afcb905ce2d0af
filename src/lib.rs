//! A mosaic pane engine for editor windows.
//!
//! Hosts hand the engine their window through [`window::EditorWindow`] and
//! drive it with [`commands::Commands`]; the tiling model itself lives in
//! [`layout`].

#[macro_use]
extern crate tracing;

pub mod commands;
pub mod layout;
pub mod window;
