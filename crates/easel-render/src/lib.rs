//! Easel Render Library
//!
//! Concrete collaborators for the easel toolkit: a software rasterizer for
//! headless scenes, PNG export, and an image store backed by the filesystem.

mod export;
mod file_store;
mod renderer;

pub use export::{encode_png, export_png};
pub use file_store::FileImageStore;
pub use renderer::{RenderError, RenderResult, SoftwareRenderer, point_to_polyline_dist, point_to_segment_dist};
