use thiserror::Error;

/// Unified result type for the placard crate.
pub type Result<T> = std::result::Result<T, ImportError>;

/// Hard-abort failures surfaced by the import pipeline.
///
/// Anything not listed here is repaired in place by the sanitizer rather
/// than reported: the producer is an unreliable generative model, and a
/// defective field always has a documented default.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("parse error: {0}")]
    Parse(String),
    #[error("document is not a JSON object")]
    NotAnObject,
    #[error("document has no usable `frames` array")]
    MissingFrames,
    #[error("every frame failed sanitization")]
    AllFramesInvalid,
}
