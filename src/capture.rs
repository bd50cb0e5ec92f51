//! Screen capture
//!
//! The desktop is captured exactly once at startup. The resulting
//! [`Screenshot`] is immutable and shared read-only with the renderer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Arc;

use image::codecs::pnm::{PnmEncoder, PnmSubtype, SampleEncoding};
use image::{ColorType, ImageEncoder};
use x11rb::connection::Connection;
use x11rb::protocol::xproto::{ConnectionExt as _, ImageFormat};

use crate::error::{MagnifierError, Result};

/// The only pixel depth the overlay supports
pub const SUPPORTED_BITS_PER_PIXEL: u8 = 32;

/// A captured desktop image in BGRA8 (X11 byte order), row-major.
#[derive(Debug, Clone)]
pub struct Screenshot {
    width: u32,
    height: u32,
    pixels: Arc<[u8]>,
}

impl Screenshot {
    /// Wrap a raw capture, rejecting anything that is not 32-bit packed
    /// pixels of exactly `width * height * 4` bytes.
    pub fn from_bgra(width: u32, height: u32, bits_per_pixel: u8, pixels: Vec<u8>) -> Result<Self> {
        if bits_per_pixel != SUPPORTED_BITS_PER_PIXEL {
            return Err(MagnifierError::UnsupportedPixelDepth {
                bits: bits_per_pixel,
            });
        }

        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(MagnifierError::InvalidCapture {
                expected,
                actual: pixels.len(),
            });
        }

        Ok(Self {
            width,
            height,
            pixels: pixels.into(),
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw BGRA bytes
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Pixels reordered to packed RGB, alpha dropped
    pub fn to_rgb(&self) -> Vec<u8> {
        self.pixels
            .chunks_exact(4)
            .flat_map(|px| [px[2], px[1], px[0]])
            .collect()
    }

    /// Encode as a binary PPM (P6) image
    pub fn write_ppm<W: Write>(&self, writer: W) -> Result<()> {
        let encoder =
            PnmEncoder::new(writer).with_subtype(PnmSubtype::Pixmap(SampleEncoding::Binary));
        encoder.write_image(&self.to_rgb(), self.width, self.height, ColorType::Rgb8)?;
        Ok(())
    }

    /// Write the capture to `path` as a binary PPM file
    pub fn save_ppm(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_ppm(&mut writer)?;
        writer.flush()?;
        log::info!("Saved capture to {}", path.display());
        Ok(())
    }
}

/// Source of the one-time desktop capture
pub trait ScreenCapture {
    /// Size of the whole screen in pixels
    fn screen_size(&self) -> Result<(u32, u32)>;

    /// Capture the `width` x `height` region at the top-left of the screen
    fn capture(&self, width: u32, height: u32) -> Result<Screenshot>;
}

/// Check a requested capture region against the screen and narrow it to the
/// protocol's 16-bit sizes.
fn capture_region(width: u32, height: u32, screen: (u16, u16)) -> Result<(u16, u16)> {
    let fits = |requested: u32, available: u16| requested > 0 && requested <= u32::from(available);
    if !fits(width, screen.0) || !fits(height, screen.1) {
        return Err(MagnifierError::CaptureFailed(format!(
            "region {}x{} does not fit the {}x{} screen",
            width, height, screen.0, screen.1
        )));
    }
    Ok((width as u16, height as u16))
}

/// Captures the root window of the default X11 display
#[derive(Debug, Clone, Default)]
pub struct X11Capture {
    display: Option<String>,
}

impl X11Capture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture a specific display instead of `$DISPLAY`
    pub fn with_display(mut self, display: impl Into<String>) -> Self {
        self.display = Some(display.into());
        self
    }

    fn connect(&self) -> Result<(x11rb::rust_connection::RustConnection, usize)> {
        x11rb::connect(self.display.as_deref())
            .map_err(|e| MagnifierError::DisplayUnavailable(e.to_string()))
    }
}

fn root_screen(
    conn: &impl Connection,
    screen_num: usize,
) -> Result<&x11rb::protocol::xproto::Screen> {
    conn.setup()
        .roots
        .get(screen_num)
        .ok_or_else(|| MagnifierError::DisplayUnavailable(format!("no screen {screen_num}")))
}

impl ScreenCapture for X11Capture {
    fn screen_size(&self) -> Result<(u32, u32)> {
        let (conn, screen_num) = self.connect()?;
        let screen = root_screen(&conn, screen_num)?;
        Ok((screen.width_in_pixels.into(), screen.height_in_pixels.into()))
    }

    fn capture(&self, width: u32, height: u32) -> Result<Screenshot> {
        let (conn, screen_num) = self.connect()?;
        let screen = root_screen(&conn, screen_num)?;
        let (width, height) = capture_region(
            width,
            height,
            (screen.width_in_pixels, screen.height_in_pixels),
        )?;

        let reply = conn
            .get_image(ImageFormat::Z_PIXMAP, screen.root, 0, 0, width, height, !0)
            .map_err(|e| MagnifierError::CaptureFailed(e.to_string()))?
            .reply()
            .map_err(|e| MagnifierError::CaptureFailed(e.to_string()))?;

        let bits_per_pixel = conn
            .setup()
            .pixmap_formats
            .iter()
            .find(|format| format.depth == reply.depth)
            .map(|format| format.bits_per_pixel)
            .unwrap_or(reply.depth);

        log::info!(
            "Captured {}x{} screen (depth {}, {} bits per pixel)",
            width,
            height,
            reply.depth,
            bits_per_pixel
        );

        Screenshot::from_bgra(width.into(), height.into(), bits_per_pixel, reply.data)
    }
}
