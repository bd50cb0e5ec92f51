//! Command line arguments
//!
//! Interaction happens through the pointer, wheel and keyboard; the command
//! line only tunes how the overlay starts.

use std::path::PathBuf;

use clap::Parser;

use crate::{MagnifierConfig, WindowMode};

/// Capture the screen and explore it with pan, zoom and a spotlight.
///
/// Controls: drag to pan, wheel to zoom, `f` toggles the lamp, ctrl+wheel
/// resizes it while it is on, `0` resets the view, `q` or Escape quits.
#[derive(Debug, Clone, Parser)]
#[command(name = "magnifier", version, about)]
pub struct Args {
    /// Disable vsync (render as fast as possible)
    #[arg(long)]
    pub no_vsync: bool,

    /// Open a regular window instead of a borderless fullscreen overlay
    #[arg(long)]
    pub windowed: bool,

    /// Exit after this many frames
    #[arg(long, value_name = "N")]
    pub max_frames: Option<u64>,

    /// X11 display to capture (defaults to $DISPLAY)
    #[arg(long, value_name = "NAME")]
    pub display: Option<String>,

    /// Write the capture to a binary PPM file before opening the overlay
    #[arg(long, value_name = "PATH")]
    pub dump_ppm: Option<PathBuf>,

    /// Exit right after writing the capture (requires --dump-ppm)
    #[arg(long, requires = "dump_ppm")]
    pub dump_only: bool,
}

impl Args {
    /// Build the overlay configuration from the parsed arguments
    pub fn config(&self) -> MagnifierConfig {
        MagnifierConfig {
            vsync: !self.no_vsync,
            window_mode: if self.windowed {
                WindowMode::Windowed
            } else {
                WindowMode::Borderless
            },
            max_frames: self.max_frames,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_vsynced_overlay() {
        let args = Args::parse_from(["magnifier"]);
        let config = args.config();
        assert!(config.vsync);
        assert_eq!(config.window_mode, WindowMode::Borderless);
        assert_eq!(config.max_frames, None);
        assert!(args.dump_ppm.is_none());
    }

    #[test]
    fn flags_map_to_config() {
        let args = Args::parse_from([
            "magnifier",
            "--no-vsync",
            "--windowed",
            "--max-frames",
            "10",
            "--dump-ppm",
            "shot.ppm",
        ]);
        let config = args.config();
        assert!(!config.vsync);
        assert_eq!(config.window_mode, WindowMode::Windowed);
        assert_eq!(config.max_frames, Some(10));
        assert_eq!(args.dump_ppm, Some(PathBuf::from("shot.ppm")));
    }

    #[test]
    fn dump_only_needs_a_path() {
        assert!(Args::try_parse_from(["magnifier", "--dump-only"]).is_err());
        assert!(Args::try_parse_from(["magnifier", "--dump-only", "--dump-ppm", "a.ppm"]).is_ok());
    }
}
