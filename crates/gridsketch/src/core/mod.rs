//! Core diagram engine
//!
//! Geometry, the diagram model, line routing, glyph selection and the two
//! output paths: text export and live frame rendering.

mod bounds;
mod box_drawing;
mod canvas;
mod display;
mod error;
mod export;
mod frame;
mod geometry;
mod glyphs;
pub mod logging;
mod model;
mod paint;
mod path;
mod types;

pub use bounds::*;
pub use box_drawing::*;
pub use canvas::*;
pub use display::*;
pub use error::*;
pub use export::*;
pub use frame::*;
pub use geometry::*;
pub use glyphs::*;
pub use logging::*;
pub use model::*;
pub use paint::*;
pub use path::*;
pub use types::*;
