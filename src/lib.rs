//! Procedural renderer for the AIgent app icon.
//!
//! - [`gradient`] - the diagonal four-stop background
//! - [`draw`] - masks, compositing, rounded rectangles and sparkles
//! - [`icon_gen`] - icon composition and the icon set writer
//! - [`contents_json`] - the icon set's Contents.json manifest

pub mod contents_json;
pub mod draw;
pub mod gradient;
pub mod icon_gen;
