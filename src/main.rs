//! Magnifier binary
//!
//! Run with:
//!   cargo run --release
//!   cargo run --release -- --windowed --dump-ppm desktop.ppm
//!
//! Controls:
//!   Drag          - Pan (keeps coasting after release)
//!   Wheel         - Zoom around the pointer
//!   F             - Toggle the lamp
//!   Ctrl + Wheel  - Resize the lamp (while it is on)
//!   0             - Reset the view
//!   Q / Escape    - Quit

use clap::Parser;
use magnifier::{window, Args, ScreenCapture, X11Capture};

fn main() {
    let args = Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    magnifier::init();

    if let Err(e) = run(&args) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> magnifier::Result<()> {
    let capture = match &args.display {
        Some(display) => X11Capture::new().with_display(display.clone()),
        None => X11Capture::new(),
    };
    let (width, height) = capture.screen_size()?;
    let screenshot = capture.capture(width, height)?;

    if let Some(path) = &args.dump_ppm {
        screenshot.save_ppm(path)?;
        if args.dump_only {
            return Ok(());
        }
    }

    window::run(args.config(), screenshot)
}
