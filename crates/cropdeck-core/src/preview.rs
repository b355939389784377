//! Display-scaled previews of the working buffer.
//!
//! A preview is always rendered from the authoritative working buffer, never
//! from a previous preview, so repeated scale changes do not accumulate
//! resampling error. The working buffer is only ever borrowed.

use crate::error::EditError;
use crate::geometry::Rectangle;
use crate::raster::{resize, scaled_dimensions, FilterType, RasterBuffer, CHANNELS};

/// Color of the live selection outline.
pub const OVERLAY_COLOR: [u8; 3] = [0, 255, 0];

/// Thickness of the live selection outline, in preview pixels.
pub const OVERLAY_THICKNESS: u32 = 2;

/// A buffer ready for display. Never part of history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresentableBuffer {
    pub buffer: RasterBuffer,
    /// Scale the preview was rendered at, in percent.
    pub scale_percent: u32,
    /// Provisional selection drawn on this frame, in preview coordinates.
    pub overlay: Option<Rectangle>,
}

impl PresentableBuffer {
    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    pub fn height(&self) -> u32 {
        self.buffer.height()
    }
}

/// Receives frames to show. Implemented by the presentation layer.
pub trait DisplaySink {
    fn present(&mut self, frame: &PresentableBuffer);
}

/// Render `working` at `scale_percent`.
///
/// # Errors
///
/// Returns [`EditError::InvalidScale`] for scales outside 10..=200 or ones
/// that collapse the buffer to zero pixels.
pub fn render(
    working: &RasterBuffer,
    scale_percent: u32,
    filter: FilterType,
) -> Result<PresentableBuffer, EditError> {
    Ok(PresentableBuffer {
        buffer: resize(working, scale_percent, filter)?,
        scale_percent,
        overlay: None,
    })
}

/// Render `working` at `scale_percent` with `selection` (in working-buffer
/// coordinates) outlined on top.
pub fn render_with_overlay(
    working: &RasterBuffer,
    scale_percent: u32,
    filter: FilterType,
    selection: &Rectangle,
) -> Result<PresentableBuffer, EditError> {
    let mut frame = render(working, scale_percent, filter)?;

    let (x1, y1) = scaled_dimensions(selection.x1, selection.y1, scale_percent);
    let (x2, y2) = scaled_dimensions(selection.x2, selection.y2, scale_percent);
    let outline = Rectangle::new(
        x1.min(frame.width()),
        y1.min(frame.height()),
        x2.min(frame.width()),
        y2.min(frame.height()),
    );

    draw_outline(&mut frame.buffer, &outline);
    frame.overlay = Some(outline);
    Ok(frame)
}

fn draw_outline(buffer: &mut RasterBuffer, rect: &Rectangle) {
    if !rect.is_valid() {
        return;
    }
    let t = OVERLAY_THICKNESS;

    for y in rect.y1..rect.y2 {
        let on_edge_row = y < rect.y1 + t || y + t >= rect.y2;
        for x in rect.x1..rect.x2 {
            if on_edge_row || x < rect.x1 + t || x + t >= rect.x2 {
                let idx = buffer.index(x, y);
                buffer.pixels_mut()[idx..idx + CHANNELS].copy_from_slice(&OVERLAY_COLOR);
            }
        }
    }
}
