use std::sync::{Arc, Mutex};

use serde::Serialize;
use serde_json::Value;

use crate::error::{ImportError, Result};
use crate::geometry::Size;
use crate::layout::{EstimateMeasurer, Measurer, PositionedElement, resolve_layout};
use crate::logging::{LogLevel, Logger, event_with_fields, json_kv};
use crate::metrics::ImportMetrics;
use crate::schema::{
    AspectRatio, Background, Branding, Meta, SanitizeReport, Transition, validate_and_sanitize,
};
use crate::tokens::TokenTable;

/// Configuration knobs for the importer.
#[derive(Clone)]
pub struct ImporterConfig {
    /// Optional structured logger used around each import.
    pub logger: Option<Logger>,
    /// Metrics accumulator shared with the host.
    pub metrics: Option<Arc<Mutex<ImportMetrics>>>,
    /// Target field used when emitting log events.
    pub log_target: String,
}

impl ImporterConfig {
    pub fn new() -> Self {
        Self {
            logger: None,
            metrics: None,
            log_target: "placard::import".to_string(),
        }
    }

    /// Enable metrics collection if it has not already been configured.
    pub fn enable_metrics(&mut self) {
        if self.metrics.is_none() {
            self.metrics = Some(Arc::new(Mutex::new(ImportMetrics::new())));
        }
    }

    /// Access the shared metrics handle if metrics are enabled.
    pub fn metrics_handle(&self) -> Option<Arc<Mutex<ImportMetrics>>> {
        self.metrics.as_ref().map(Arc::clone)
    }
}

impl Default for ImporterConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// One laid-out frame of the final composition.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionedFrame {
    #[serde(rename = "duration")]
    pub duration_secs: f64,
    pub transition: Transition,
    pub background: Background,
    pub canvas_width: i32,
    pub canvas_height: i32,
    pub elements: Vec<PositionedElement>,
}

/// Final pipeline output: everything a renderer or editor host consumes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Composition {
    pub meta: Meta,
    pub branding: Branding,
    pub tokens: TokenTable,
    pub frames: Vec<PositionedFrame>,
}

/// Caller-visible import outcome: a success flag plus an error-message
/// list, never a panic for malformed-but-present input. On success the
/// error list carries sanitizer advisories; on failure it carries the
/// single abort message.
#[derive(Debug, Clone, Serialize)]
pub struct ImportResult {
    pub success: bool,
    pub frames: Vec<PositionedFrame>,
    pub meta: Option<Meta>,
    pub branding: Option<Branding>,
    pub tokens: Option<TokenTable>,
    pub errors: Vec<String>,
}

impl ImportResult {
    fn succeeded(composition: Composition, advisories: Vec<String>) -> Self {
        Self {
            success: true,
            frames: composition.frames,
            meta: Some(composition.meta),
            branding: Some(composition.branding),
            tokens: Some(composition.tokens),
            errors: advisories,
        }
    }

    fn failed(error: ImportError) -> Self {
        Self {
            success: false,
            frames: Vec::new(),
            meta: None,
            branding: None,
            tokens: None,
            errors: vec![error.to_string()],
        }
    }
}

/// Resolve the canvas pixel size for an aspect ratio within a bounding box,
/// preserving the ratio and never exceeding either bound.
pub fn fit_canvas(ratio: AspectRatio, max_width: i32, max_height: i32) -> Size {
    let (rw, rh) = ratio.terms();
    let max_w = max_width.max(1) as f64;
    let max_h = max_height.max(1) as f64;
    let scale = (max_w / rw).min(max_h / rh);
    let width = (rw * scale).round().max(1.0) as i32;
    let height = (rh * scale).round().max(1.0) as i32;
    Size::new(width.min(max_width.max(1)), height.min(max_height.max(1)))
}

/// Signage import pipeline host.
///
/// Pure apart from the optional logger and metrics hooks: each import is a
/// function of its input text and bounding box, and positioned output is
/// recomputed on every call.
pub struct Importer {
    config: ImporterConfig,
    measurer: Box<dyn Measurer>,
}

impl Importer {
    pub fn new() -> Self {
        Self {
            config: ImporterConfig::new(),
            measurer: Box::new(EstimateMeasurer::default()),
        }
    }

    /// Swap the measurement heuristics, e.g. for a real text shaper.
    pub fn with_measurer<M>(mut self, measurer: M) -> Self
    where
        M: Measurer + 'static,
    {
        self.measurer = Box::new(measurer);
        self
    }

    pub fn config_mut(&mut self) -> &mut ImporterConfig {
        &mut self.config
    }

    /// Run the full import pipeline on one text blob.
    pub fn import(&self, text: &str, max_width: i32, max_height: i32) -> ImportResult {
        match self.try_import(text, max_width, max_height) {
            Ok((composition, advisories)) => {
                let element_count: usize = composition
                    .frames
                    .iter()
                    .map(|frame| frame.elements.len())
                    .sum();
                self.log(LogLevel::Info, "import complete", [
                    json_kv("frames", composition.frames.len()),
                    json_kv("elements", element_count),
                    json_kv("repairs", advisories.len()),
                ]);
                if let Some(metrics) = &self.config.metrics {
                    let mut metrics = metrics.lock().expect("metrics mutex poisoned");
                    metrics.record_import(
                        composition.frames.len(),
                        element_count,
                        advisories.len(),
                    );
                }
                ImportResult::succeeded(composition, advisories)
            }
            Err(error) => {
                self.log(LogLevel::Warn, "import failed", [json_kv(
                    "reason",
                    error.to_string(),
                )]);
                if let Some(metrics) = &self.config.metrics {
                    let mut metrics = metrics.lock().expect("metrics mutex poisoned");
                    metrics.record_failure();
                }
                ImportResult::failed(error)
            }
        }
    }

    fn try_import(
        &self,
        text: &str,
        max_width: i32,
        max_height: i32,
    ) -> Result<(Composition, Vec<String>)> {
        let value: Value =
            serde_json::from_str(text).map_err(|err| ImportError::Parse(err.to_string()))?;

        let tokens = TokenTable::build(value.get("tokens"));
        let mut report = SanitizeReport::new();
        let document = validate_and_sanitize(&value, &tokens, &mut report)?;

        let canvas = fit_canvas(document.meta.aspect_ratio, max_width, max_height);
        let frames = document
            .frames
            .iter()
            .map(|frame| PositionedFrame {
                duration_secs: frame.duration_secs,
                transition: frame.transition.clone(),
                background: frame.background.clone(),
                canvas_width: canvas.width,
                canvas_height: canvas.height,
                elements: resolve_layout(frame, canvas, &tokens, self.measurer.as_ref()),
            })
            .collect();

        let composition = Composition {
            meta: document.meta,
            branding: document.branding,
            tokens,
            frames,
        };
        Ok((composition, report.into_advisories()))
    }

    fn log<I>(&self, level: LogLevel, message: &str, fields: I)
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        if let Some(logger) = &self.config.logger {
            let event = event_with_fields(level, &self.config.log_target, message, fields);
            let _ = logger.log_event(event);
        }
    }
}

impl Default for Importer {
    fn default() -> Self {
        Self::new()
    }
}

/// Import a signage description with default configuration.
pub fn import_signage(text: &str, max_width: i32, max_height: i32) -> ImportResult {
    Importer::new().import(text, max_width, max_height)
}
