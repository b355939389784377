//! The edit session: one loaded image, its history and the drag in progress.
//!
//! # Gesture State Machine
//!
//! ```text
//! Idle --begin_drag--> Dragging --update_drag--> Dragging
//!                      Dragging --end_drag-----> Idle   (commit, or discard on InvalidRegion)
//!                      Dragging --cancel_drag--> Idle
//! ```
//!
//! Only `end_drag` and `rotate` create history entries. Previews are derived
//! from the working buffer on every change and never recorded.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::{EditorConfig, DEFAULT_PREVIEW_SCALE};
use crate::error::EditError;
use crate::geometry::{derive_region, CropPolicy, Point, Rectangle, Region};
use crate::history::HistoryStack;
use crate::preview::{render, render_with_overlay, PresentableBuffer};
use crate::raster::{
    apply_mask, extract, rotate90, FilterType, RasterBuffer, MAX_SCALE_PERCENT, MIN_SCALE_PERCENT,
};

/// Pointer gesture state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Gesture {
    #[default]
    Idle,
    Dragging {
        start: Point,
        current: Point,
    },
}

#[derive(Debug)]
pub struct EditSession {
    original: Arc<RasterBuffer>,
    history: HistoryStack,
    gesture: Gesture,
    policy: CropPolicy,
    preview_scale: u32,
    filter: FilterType,
    preview: PresentableBuffer,
}

impl EditSession {
    /// Start a session on a freshly loaded image with default settings.
    pub fn new(image: RasterBuffer) -> Result<Self, EditError> {
        Self::with_config(image, &EditorConfig::default())
    }

    /// Start a session on a freshly loaded image.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::UnreadableFile`] if the image has no pixels.
    pub fn with_config(image: RasterBuffer, config: &EditorConfig) -> Result<Self, EditError> {
        if image.is_empty() {
            return Err(EditError::UnreadableFile("image has no pixels".to_string()));
        }

        let original = Arc::new(image);
        let history = HistoryStack::from_snapshot(Arc::clone(&original));
        let preview = PresentableBuffer {
            buffer: (*original).clone(),
            scale_percent: DEFAULT_PREVIEW_SCALE,
            overlay: None,
        };

        let mut session = Self {
            original,
            history,
            gesture: Gesture::Idle,
            policy: config.crop_policy,
            preview_scale: config
                .preview_scale
                .clamp(MIN_SCALE_PERCENT, MAX_SCALE_PERCENT),
            filter: config.resample_filter,
            preview,
        };
        session.refresh_preview(None);

        info!(
            width = session.original.width(),
            height = session.original.height(),
            "edit session started"
        );
        Ok(session)
    }

    /// Begin a drag at `point`.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::AlreadyDragging`] if a drag is in progress.
    pub fn begin_drag(&mut self, point: Point) -> Result<(), EditError> {
        if let Gesture::Dragging { .. } = self.gesture {
            return Err(EditError::AlreadyDragging);
        }
        debug!(x = point.x, y = point.y, "drag started");
        self.gesture = Gesture::Dragging {
            start: point,
            current: point,
        };
        Ok(())
    }

    /// Move the in-progress drag to `point` and return the provisional region,
    /// or `None` while the drag is still degenerate. The preview is redrawn
    /// with the provisional region outlined. History is not touched.
    pub fn update_drag(&mut self, point: Point) -> Result<Option<Region>, EditError> {
        let Gesture::Dragging { start, .. } = self.gesture else {
            return Err(EditError::NotDragging);
        };
        self.gesture = Gesture::Dragging {
            start,
            current: point,
        };

        match derive_region(self.policy, start, point, self.bounds()) {
            Ok(region) => {
                self.refresh_preview(Some(&region.rect));
                Ok(Some(region))
            }
            Err(EditError::InvalidRegion) => {
                self.refresh_preview(None);
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    /// Finish the drag at `point` and commit the crop.
    ///
    /// The gesture always ends, whether or not the crop is committed.
    ///
    /// # Errors
    ///
    /// - [`EditError::NotDragging`] if no drag is in progress
    /// - [`EditError::InvalidRegion`] if the selection is degenerate; nothing
    ///   is committed
    pub fn end_drag(&mut self, point: Point) -> Result<&RasterBuffer, EditError> {
        let Gesture::Dragging { start, .. } = self.gesture else {
            return Err(EditError::NotDragging);
        };
        self.gesture = Gesture::Idle;

        let bounds = self.bounds();
        let region = match derive_region(self.policy, start, point, bounds) {
            Ok(region) => region,
            Err(err) => {
                warn!(
                    policy = %self.policy,
                    start_x = start.x,
                    start_y = start.y,
                    end_x = point.x,
                    end_y = point.y,
                    "invalid crop region, selection discarded"
                );
                self.refresh_preview(None);
                return Err(err);
            }
        };

        debug_assert!(
            bounds.contains_rect(&region.rect),
            "geometry engine produced a region outside the working buffer"
        );
        let mut cropped = extract(self.history.current(), &region.rect)?;
        if let Some(mask) = &region.mask {
            cropped = apply_mask(&cropped, mask)?;
        }

        info!(
            policy = %self.policy,
            width = cropped.width(),
            height = cropped.height(),
            "crop committed"
        );
        Ok(self.commit(cropped))
    }

    /// Abandon the in-progress drag without committing anything.
    pub fn cancel_drag(&mut self) {
        if let Gesture::Dragging { .. } = self.gesture {
            debug!("drag cancelled");
            self.gesture = Gesture::Idle;
            self.refresh_preview(None);
        }
    }

    /// Rotate the working buffer 90 degrees clockwise as an undoable edit.
    pub fn rotate(&mut self) -> Result<&RasterBuffer, EditError> {
        self.cancel_drag();
        let rotated = rotate90(self.history.current());
        info!(
            width = rotated.width(),
            height = rotated.height(),
            "rotation committed"
        );
        Ok(self.commit(rotated))
    }

    /// Change the preview scale. Out-of-range requests are clamped to
    /// 10..=200; history is never touched.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::InvalidScale`] if the scale would shrink the
    /// working buffer to zero pixels. The previous preview is kept.
    pub fn set_preview_scale(&mut self, percent: u32) -> Result<&PresentableBuffer, EditError> {
        let scale = percent.clamp(MIN_SCALE_PERCENT, MAX_SCALE_PERCENT);
        if scale != percent {
            debug!(requested = percent, applied = scale, "preview scale clamped");
        }

        match render(self.history.current(), scale, self.filter) {
            Ok(frame) => {
                self.preview_scale = scale;
                self.preview = frame;
                Ok(&self.preview)
            }
            Err(err) => {
                warn!(scale, "preview scale rejected");
                Err(err)
            }
        }
    }

    /// Step back to the previous committed state.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::NothingToUndo`] when only the loaded image is left.
    /// A drag in progress is kept in that case.
    pub fn undo(&mut self) -> Result<&RasterBuffer, EditError> {
        if !self.history.can_undo() {
            warn!("nothing to undo");
            return Err(EditError::NothingToUndo);
        }
        self.cancel_drag();
        self.history.undo()?;
        info!(past_len = self.history.past_len(), "undo");
        self.refresh_preview(None);
        Ok(self.history.current())
    }

    /// Re-apply the most recently undone state.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::NothingToRedo`] if nothing is pending.
    pub fn redo(&mut self) -> Result<&RasterBuffer, EditError> {
        if !self.history.can_redo() {
            warn!("nothing to redo");
            return Err(EditError::NothingToRedo);
        }
        self.cancel_drag();
        self.history.redo()?;
        info!(past_len = self.history.past_len(), "redo");
        self.refresh_preview(None);
        Ok(self.history.current())
    }

    /// Policy applied to the next completed drag.
    pub fn set_policy(&mut self, policy: CropPolicy) {
        debug!(%policy, "crop policy changed");
        self.policy = policy;
    }

    pub fn set_filter(&mut self, filter: FilterType) {
        self.filter = filter;
        self.refresh_preview(None);
    }

    pub fn policy(&self) -> CropPolicy {
        self.policy
    }

    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.gesture, Gesture::Dragging { .. })
    }

    /// The image as loaded. Never changes during the session.
    pub fn original(&self) -> &RasterBuffer {
        &self.original
    }

    /// The current authoritative image.
    pub fn working(&self) -> &RasterBuffer {
        self.history.current()
    }

    /// Immutable handle to the working buffer that stays valid while the
    /// session keeps editing.
    pub fn snapshot(&self) -> Arc<RasterBuffer> {
        Arc::clone(self.history.current_snapshot())
    }

    pub fn history(&self) -> &HistoryStack {
        &self.history
    }

    pub fn preview(&self) -> &PresentableBuffer {
        &self.preview
    }

    pub fn preview_scale(&self) -> u32 {
        self.preview_scale
    }

    fn bounds(&self) -> Rectangle {
        let working = self.history.current();
        Rectangle::from_size(working.width(), working.height())
    }

    fn commit(&mut self, buffer: RasterBuffer) -> &RasterBuffer {
        self.history.push(buffer);
        self.refresh_preview(None);
        self.history.current()
    }

    /// Re-render the preview from the working buffer. A scale that would
    /// collapse the buffer falls back to 100%.
    fn refresh_preview(&mut self, selection: Option<&Rectangle>) {
        let working = self.history.current();
        let rendered = match selection {
            Some(rect) => render_with_overlay(working, self.preview_scale, self.filter, rect),
            None => render(working, self.preview_scale, self.filter),
        };

        self.preview = match rendered {
            Ok(frame) => frame,
            Err(_) => {
                warn!(
                    scale = self.preview_scale,
                    width = working.width(),
                    height = working.height(),
                    "preview scale too small for buffer, showing at 100%"
                );
                self.preview_scale = DEFAULT_PREVIEW_SCALE;
                PresentableBuffer {
                    buffer: working.clone(),
                    scale_percent: DEFAULT_PREVIEW_SCALE,
                    overlay: None,
                }
            }
        };
    }
}
