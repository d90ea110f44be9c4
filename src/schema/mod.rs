//! Schema module orchestrator following the RSB module specification.
//!
//! `core` holds the closed document model and its hard caps; `sanitize`
//! turns an untrusted parsed value into that model.

mod core;
mod sanitize;

pub use self::core::{
    Align, AspectRatio, Background, Branding, Contrast, DividerPayload, Document, Element,
    ElementKind, Fill, Frame, GradientKind, GradientStop, ImagePayload, Intent, Justify, Meta,
    Overlay, Role, RunStyle, ShapeKind, ShapePayload, StackDirection, StackLayout, TextAlign,
    TextBlockStyle, TextPayload, TextRun, Transition, TransitionKind, limits,
};
pub use sanitize::{SanitizeReport, validate_and_sanitize};
