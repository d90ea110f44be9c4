//! Compose module orchestrator following the RSB module specification.
//!
//! Wires the whole pipeline: parse, token table, sanitization, canvas
//! fitting, and per-frame layout.

mod core;

pub use self::core::{
    Composition, ImportResult, Importer, ImporterConfig, PositionedFrame, fit_canvas,
    import_signage,
};
