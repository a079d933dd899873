//! Interactive image map authoring.
//!
//! Draw rectangles, circles and polygons over an image, attach link metadata
//! to each, preview the result with live hit-testing, and export an HTML
//! `<map>` fragment.

pub mod app;
pub mod config;
pub mod error;
pub mod export;
pub mod geometry;
pub mod loader;
pub mod region;
pub mod render;
pub mod session;

pub use config::EditorConfig;
pub use error::{Error, Result};
pub use export::generate_fragment;
pub use geometry::{Geometry, Point, ShapeKind};
pub use region::{Region, RegionId, RegionUpdate};
pub use session::{AuthoringSession, Effect, Key, Mode};
