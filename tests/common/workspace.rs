//! Scratch workspace for integration tests.

use std::fs;
use std::path::{Path, PathBuf};

use depth_colorize::DepthPipeline;
use kinect_viewer::assets::AssetLoader;
use kinect_viewer::config::ViewerConfig;
use kinect_viewer::frame_io;
use tempfile::TempDir;

use super::fixtures;

/// Temporary directory holding a config file and raw frames
pub struct TestWorkspace {
    dir: TempDir,
    pub config_path: PathBuf,
}

impl TestWorkspace {
    /// Workspace configured for the small fixture frame
    pub fn new() -> Self {
        Self::with_config(&fixtures::small_config_yaml())
    }

    pub fn with_config(yaml: &str) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let config_path = dir.path().join("config.yaml");
        fs::write(&config_path, yaml).expect("Failed to write config");
        Self { dir, config_path }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn loader(&self) -> AssetLoader {
        AssetLoader::new(Some(self.config_path.clone()))
    }

    pub fn config(&self) -> ViewerConfig {
        ViewerConfig::load(&self.loader()).expect("Failed to load config")
    }

    pub fn pipeline(&self) -> DepthPipeline {
        self.config().pipeline().expect("Failed to build pipeline")
    }

    /// Write raw little-endian samples and return the file path
    pub fn write_raw(&self, name: &str, samples: &[u16]) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, frame_io::encode_samples(samples)).expect("Failed to write frame");
        path
    }

    pub fn output_dir(&self) -> PathBuf {
        self.dir.path().join("out")
    }
}
