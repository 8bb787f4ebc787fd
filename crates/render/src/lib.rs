#![deny(unsafe_code)]
//! Rasterization and output for gravlines.
//!
//! Sits between `gravlines-core` (config, field, trajectories) and the CLI:
//! a [`Canvas`] raster surface driven by [`PathBuilder`] paths, the drawing
//! operations in [`draw`], the [`scene`] orchestrator, and PNG output.

pub mod canvas;
pub mod draw;
pub mod path;
pub mod scene;

#[cfg(feature = "png")]
pub mod snapshot;

pub use canvas::Canvas;
pub use path::{Path, PathBuilder};
pub use scene::{render, render_scene};
