//! Placard turns untrusted signage descriptions into paint-ready
//! compositions.
//!
//! The input is a structured document produced by a generative text model:
//! arbitrary, possibly malformed JSON. The pipeline resolves `$name` design
//! tokens, sanitizes the document into a bounded canonical model, and lays
//! each frame out along a single stack axis with heuristic content
//! measurement. The output is a renderer-agnostic set of positioned
//! elements; painting and editing are the host's concern.

pub mod compose;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod logging;
pub mod metrics;
pub mod schema;
pub mod tokens;
pub mod width;

pub use compose::{
    Composition, ImportResult, Importer, ImporterConfig, PositionedFrame, fit_canvas,
    import_signage,
};
pub use error::{ImportError, Result};
pub use geometry::{Rect, Size};
pub use layout::{EstimateMeasurer, Extent, Measurer, PositionedElement, resolve_layout};
pub use logging::{
    FileSink, LogEvent, LogFields, LogLevel, LogSink, Logger, LoggingError, LoggingResult,
    MemorySink, event_with_fields, json_kv,
};
pub use metrics::{ImportMetrics, MetricSnapshot};
pub use schema::{
    Align, AspectRatio, Background, Branding, Contrast, DividerPayload, Document, Element,
    ElementKind, Fill, Frame, GradientKind, GradientStop, ImagePayload, Intent, Justify, Meta,
    Overlay, Role, RunStyle, SanitizeReport, ShapeKind, ShapePayload, StackDirection, StackLayout,
    TextAlign, TextBlockStyle, TextPayload, TextRun, Transition, TransitionKind, limits,
    validate_and_sanitize,
};
pub use tokens::{FONT_STACKS, TokenTable, font_stack, is_hex_color};
pub use width::display_width;
