//! Kinect viewer
//!
//! Offline viewer for raw Kinect depth frames: renders equalized and
//! false-color images, user overlays and point clouds through the
//! `depth-colorize` pipeline. This library exposes modules for integration
//! testing.

pub mod assets;
pub mod config;
pub mod error;
pub mod frame_io;
pub mod output;
pub mod render;
pub mod snapshot;
