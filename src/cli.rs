//! Command-line argument parsing for the demo binary

use clap::Parser;
use std::path::PathBuf;

use crate::config::{ConfigError, InputConfig};

/// Upper bound for `--frames-per-second`
pub const MAX_FRAMES_PER_SECOND: u32 = 1000;

/// Interactive keyflow demo
#[derive(Parser, Debug)]
#[command(
    name = "keyflow",
    version,
    about = "Opens a window and logs input actions as they fire"
)]
pub struct CliArgs {
    /// Config file to use instead of ~/.config/keyflow/config.yaml
    #[arg(short = 'c', long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Input update rate
    #[arg(long, value_name = "N", default_value_t = 60)]
    pub frames_per_second: u32,
}

impl CliArgs {
    /// Resolve the input config these arguments ask for
    ///
    /// An explicit `--config` must load; the default location falls back to
    /// built-in defaults.
    pub fn load_config(&self) -> Result<InputConfig, ConfigError> {
        match &self.config {
            Some(path) => InputConfig::load_from(path),
            None => Ok(InputConfig::load()),
        }
    }

    /// Frames per second, clamped to `1..=MAX_FRAMES_PER_SECOND`
    pub fn frame_rate(&self) -> u32 {
        self.frames_per_second.clamp(1, MAX_FRAMES_PER_SECOND)
    }
}
