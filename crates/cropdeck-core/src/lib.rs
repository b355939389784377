//! Cropdeck Core - interactive crop and rotate engine
//!
//! This crate holds everything behind the editor canvas: pointer-drag
//! geometry under a crop policy, pixel extraction and masking, lossless
//! rotation, preview rendering, and a linear undo/redo history of committed
//! images. It has no UI; a presentation layer drives it through
//! [`editor::Editor`] or directly through [`session::EditSession`].

pub mod config;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod history;
pub mod io;
pub mod preview;
pub mod raster;
pub mod session;

pub use config::EditorConfig;
pub use editor::{Command, Editor, Notice};
pub use error::EditError;
pub use geometry::{derive_region, CropPolicy, Mask, Point, Rectangle, Region};
pub use history::HistoryStack;
pub use io::{decode_image, encode_image, FsCodec, ImageLoader, ImageWriter, OutputFormat};
pub use preview::{DisplaySink, PresentableBuffer};
pub use raster::{FilterType, RasterBuffer};
pub use session::{EditSession, Gesture};
