//! Layout module orchestrator following the RSB module specification.
//!
//! `measure` estimates per-element extents; `core` walks one frame's stack
//! container and assigns absolute pixel rectangles.

mod core;
mod measure;

pub use self::core::{PositionedElement, resolve_layout};
pub use self::measure::{EstimateMeasurer, Extent, Measurer};
