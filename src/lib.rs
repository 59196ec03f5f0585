//! Library exports for geolegend.
//!
//! The render core lives in [`legend`]; [`config`] and [`input`] hold the
//! validation the command-line front end applies before building a
//! [`LegendSpec`]. External tools can reuse all three.

pub mod config;
pub mod draw;
pub mod input;
pub mod legend;
pub mod util;

pub use config::Config;
pub use legend::{
    BoundingBox, ErrorKind, LegendRenderer, LegendSpec, RenderError, RenderReport, RenderStage,
};
