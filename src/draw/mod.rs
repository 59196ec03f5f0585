//! Rendering primitives and shape definitions (Cairo-based).
//!
//! This module defines the core drawing types used to compose a legend:
//! - [`Color`]: RGBA color representation with CSS color parsing
//! - [`Shape`]: Display-list primitives (image, marker, text)
//! - [`Frame`]: Ordered container for all shapes of one legend
//! - Rendering functions for Cairo-based output

pub mod color;
pub mod font;
pub mod frame;
pub mod render;
pub mod shape;
pub mod surface;

// Re-export commonly used types at module level
pub use color::Color;
pub use font::FontDescriptor;
pub use frame::Frame;
pub use render::{render_shape, render_shapes};
pub use shape::{Shape, TextAnchor, TextExtents, measure_text};

pub use color::{BLACK, BLUE, RED, WHITE};
