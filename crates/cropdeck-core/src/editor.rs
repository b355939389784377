//! Editor controller: routes discrete UI commands to the edit session and
//! pushes resulting frames to the display.
//!
//! The presentation layer translates widget callbacks, keyboard shortcuts
//! and canvas pointer events into [`Command`]s. Each command runs to
//! completion before the next is handled.

use std::path::PathBuf;
use std::thread::JoinHandle;

use tracing::{debug, warn};

use crate::config::EditorConfig;
use crate::error::EditError;
use crate::geometry::{CropPolicy, Point};
use crate::io::{save_in_background, ImageLoader, ImageWriter};
use crate::preview::DisplaySink;
use crate::raster::{MAX_SCALE_PERCENT, MIN_SCALE_PERCENT};
use crate::session::EditSession;

/// A discrete user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Load(PathBuf),
    PointerDown(Point),
    PointerMove(Point),
    PointerUp(Point),
    CancelDrag,
    Undo,
    Redo,
    Rotate,
    SetPolicy(CropPolicy),
    SetPreviewScale(u32),
    SetQuality(u8),
    Save(PathBuf),
}

/// What a command did, for the status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Nothing visible changed.
    None,
    /// The preview changed without a history entry.
    PreviewUpdated,
    /// The working buffer changed (new image, edit, undo or redo).
    Committed,
    /// The working buffer was written to this path.
    Saved(PathBuf),
    /// A recoverable failure. Session state is unchanged.
    Warning(EditError),
    /// The command needs a loaded image.
    NoImage,
}

pub struct Editor<C, S> {
    session: Option<EditSession>,
    config: EditorConfig,
    codec: C,
    sink: S,
}

impl<C, S> Editor<C, S>
where
    C: ImageLoader + ImageWriter,
    S: DisplaySink,
{
    pub fn new(config: EditorConfig, codec: C, sink: S) -> Self {
        Self {
            session: None,
            config,
            codec,
            sink,
        }
    }

    /// Run one command.
    ///
    /// Recoverable failures come back as [`Notice::Warning`].
    ///
    /// # Errors
    ///
    /// Only unrecoverable contract violations ([`EditError::OutOfBounds`])
    /// are returned as `Err`.
    pub fn handle(&mut self, command: Command) -> Result<Notice, EditError> {
        debug!(?command, "handling command");
        let result = self.dispatch(command);
        match result {
            Ok(notice) => Ok(notice),
            Err(err) if err.is_recoverable() => Ok(Notice::Warning(err)),
            Err(err) => Err(err),
        }
    }

    fn dispatch(&mut self, command: Command) -> Result<Notice, EditError> {
        match command {
            Command::Load(path) => {
                let image = self.codec.load(&path)?;
                let session = EditSession::with_config(image, &self.config)?;
                self.sink.present(session.preview());
                self.session = Some(session);
                Ok(Notice::Committed)
            }
            Command::SetPolicy(policy) => {
                self.config.crop_policy = policy;
                if let Some(session) = self.session.as_mut() {
                    session.set_policy(policy);
                }
                Ok(Notice::None)
            }
            Command::SetQuality(quality) => {
                self.config.save_quality = quality.clamp(1, 100);
                Ok(Notice::None)
            }
            Command::SetPreviewScale(percent) => {
                let Some(session) = self.session.as_mut() else {
                    let scale = percent.clamp(MIN_SCALE_PERCENT, MAX_SCALE_PERCENT);
                    self.config.preview_scale = scale;
                    return Ok(Notice::NoImage);
                };
                let frame = session.set_preview_scale(percent)?;
                self.sink.present(frame);
                self.config.preview_scale = session.preview_scale();
                Ok(Notice::PreviewUpdated)
            }
            Command::PointerDown(point) => {
                let Some(session) = self.session.as_mut() else {
                    return Ok(Notice::NoImage);
                };
                session.begin_drag(point)?;
                Ok(Notice::None)
            }
            Command::PointerMove(point) => {
                let Some(session) = self.session.as_mut() else {
                    return Ok(Notice::NoImage);
                };
                if !session.is_dragging() {
                    // Hover without a button held
                    return Ok(Notice::None);
                }
                session.update_drag(point)?;
                self.sink.present(session.preview());
                Ok(Notice::PreviewUpdated)
            }
            Command::PointerUp(point) => {
                let Some(session) = self.session.as_mut() else {
                    return Ok(Notice::NoImage);
                };
                match session.end_drag(point) {
                    Ok(_) => {}
                    Err(EditError::NotDragging) => return Err(EditError::NotDragging),
                    Err(err) => {
                        // Clear the stale outline of the discarded selection
                        self.sink.present(session.preview());
                        return Err(err);
                    }
                }
                self.sink.present(session.preview());
                Ok(Notice::Committed)
            }
            Command::CancelDrag => {
                let Some(session) = self.session.as_mut() else {
                    return Ok(Notice::NoImage);
                };
                session.cancel_drag();
                self.sink.present(session.preview());
                Ok(Notice::PreviewUpdated)
            }
            Command::Undo | Command::Redo | Command::Rotate => {
                let Some(session) = self.session.as_mut() else {
                    return Ok(Notice::NoImage);
                };
                match command {
                    Command::Undo => session.undo().map(|_| ())?,
                    Command::Redo => session.redo().map(|_| ())?,
                    _ => session.rotate().map(|_| ())?,
                }
                self.sink.present(session.preview());
                Ok(Notice::Committed)
            }
            Command::Save(path) => {
                let Some(session) = self.session.as_ref() else {
                    return Ok(Notice::NoImage);
                };
                self.codec.save(session.working(), &path, self.config.save_quality)?;
                Ok(Notice::Saved(path))
            }
        }
    }

    /// Write the current working buffer on a worker thread. Editing can
    /// continue while the save runs; it always writes the state at the time
    /// of the call.
    pub fn spawn_save(&self, path: PathBuf) -> Option<JoinHandle<Result<(), EditError>>> {
        let Some(session) = self.session.as_ref() else {
            warn!("save requested with no image loaded");
            return None;
        };
        let quality = self.config.save_quality;
        Some(save_in_background(session.snapshot(), path, quality))
    }

    pub fn session(&self) -> Option<&EditSession> {
        self.session.as_ref()
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}
