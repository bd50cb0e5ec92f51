//! Overlay window and frame loop using winit

use std::sync::Arc;

use winit::{
    dpi::PhysicalSize,
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::{Fullscreen, WindowBuilder, WindowLevel},
};

use crate::backend::{Renderer, WgpuRenderer};
use crate::capture::Screenshot;
use crate::error::{MagnifierError, Result};
use crate::frame::FrameScheduler;
use crate::input::map_window_event;
use crate::scene::NavigationController;
use crate::{MagnifierConfig, WindowMode};

/// Open the overlay over `screenshot` and run until the user quits.
///
/// Each redraw drains the input queued since the previous frame, steps the
/// simulation once with the measured `dt` and renders the result. With
/// vsync the present call blocks until the next display refresh.
pub fn run(config: MagnifierConfig, screenshot: Screenshot) -> Result<()> {
    let event_loop = EventLoop::new().map_err(|e| MagnifierError::EventLoop(e.to_string()))?;

    let mut builder = WindowBuilder::new()
        .with_title(&config.title)
        .with_inner_size(PhysicalSize::new(screenshot.width(), screenshot.height()));

    builder = match config.window_mode {
        WindowMode::Windowed => builder,
        WindowMode::Borderless => builder
            .with_decorations(false)
            .with_window_level(WindowLevel::AlwaysOnTop)
            .with_fullscreen(Some(Fullscreen::Borderless(None))),
    };

    let window = Arc::new(
        builder
            .build(&event_loop)
            .map_err(|e| MagnifierError::WindowCreation(e.to_string()))?,
    );
    log::info!("Window created ({:?})", config.window_mode);

    let mut renderer = WgpuRenderer::new(Arc::clone(&window), &screenshot, config.vsync)?;
    let mut controller = NavigationController::new(config.navigation);
    let mut scheduler = FrameScheduler::new(config.max_frames);
    let mut failure: Option<MagnifierError> = None;

    event_loop
        .run(|event, elwt| {
            elwt.set_control_flow(ControlFlow::Poll);

            match event {
                Event::WindowEvent { event, .. } => match event {
                    WindowEvent::Resized(size) => {
                        renderer.resize(size.width, size.height);
                    }
                    WindowEvent::RedrawRequested => {
                        let dt = scheduler.begin_frame();
                        let snapshot = controller.update(dt);

                        if controller.quit_requested() {
                            elwt.exit();
                            return;
                        }

                        if let Err(e) = renderer.render(&snapshot) {
                            failure = Some(e);
                            elwt.exit();
                            return;
                        }

                        if !scheduler.end_frame() {
                            elwt.exit();
                        }
                    }
                    other => {
                        if let Some(input) = map_window_event(&other) {
                            controller.push_event(input);
                        }
                    }
                },
                Event::AboutToWait => {
                    window.request_redraw();
                }
                _ => {}
            }
        })
        .map_err(|e| MagnifierError::EventLoop(e.to_string()))?;

    log::info!("Shutting down after {} frames", scheduler.frame_number());

    match failure {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
