use serde_json::Value;

use crate::error::{ImportError, Result};
use crate::schema::core::*;
use crate::tokens::{TokenTable, font_stack, is_hex_color, numeric};

const URL_DENYLIST: [&str; 4] = ["javascript:", "data:", "blob:", "vbscript:"];

/// Advisory messages accumulated while repairing a document.
///
/// Advisories never fail an import; they ride along in the result so the
/// caller can surface what was repaired.
#[derive(Debug, Default, Clone)]
pub struct SanitizeReport {
    advisories: Vec<String>,
}

impl SanitizeReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn note(&mut self, message: impl Into<String>) {
        self.advisories.push(message.into());
    }

    pub fn advisories(&self) -> &[String] {
        &self.advisories
    }

    pub fn repair_count(&self) -> usize {
        self.advisories.len()
    }

    pub fn into_advisories(self) -> Vec<String> {
        self.advisories
    }
}

/// Validate and sanitize an untrusted parsed document.
///
/// Fails only when the input is not an object, `frames` is missing, empty,
/// or not an array, or every frame fails frame-level sanitization. Every
/// other defect is clamped, allow-listed, truncated, or defaulted. Pure:
/// identical input always yields an identical document.
pub fn validate_and_sanitize(
    raw: &Value,
    tokens: &TokenTable,
    report: &mut SanitizeReport,
) -> Result<Document> {
    let obj = raw.as_object().ok_or(ImportError::NotAnObject)?;

    let version = match obj.get("version").and_then(Value::as_str) {
        Some("2.0") => "2.0".to_string(),
        other => {
            report.note(format!(
                "unknown version {}, treating as 2.0",
                other.unwrap_or("(missing)")
            ));
            "2.0".to_string()
        }
    };

    let meta = sanitize_meta(obj.get("meta"));
    let branding = sanitize_branding(obj.get("branding"));

    let frames_raw = obj
        .get("frames")
        .and_then(Value::as_array)
        .filter(|list| !list.is_empty())
        .ok_or(ImportError::MissingFrames)?;

    if frames_raw.len() > limits::MAX_FRAMES {
        report.note(format!(
            "{} frames supplied, keeping the first {}",
            frames_raw.len(),
            limits::MAX_FRAMES
        ));
    }

    let mut frames = Vec::new();
    for (idx, value) in frames_raw.iter().take(limits::MAX_FRAMES).enumerate() {
        if let Some(frame) = sanitize_frame(value, idx, tokens, report) {
            frames.push(frame);
        }
    }

    if frames.is_empty() {
        return Err(ImportError::AllFramesInvalid);
    }

    Ok(Document {
        version,
        meta,
        branding,
        frames,
    })
}

fn sanitize_meta(value: Option<&Value>) -> Meta {
    let obj = match value.and_then(Value::as_object) {
        Some(obj) => obj,
        None => return Meta::default(),
    };

    Meta {
        title: capped_string(obj.get("title"), limits::MAX_TITLE_LEN, "Untitled"),
        intent: enum_field(obj.get("intent"), Intent::parse),
        contrast: enum_field(obj.get("contrast"), Contrast::parse),
        aspect_ratio: obj
            .get("aspectRatio")
            .and_then(Value::as_str)
            .map(str::trim)
            .and_then(AspectRatio::parse)
            .unwrap_or_default(),
    }
}

fn sanitize_branding(value: Option<&Value>) -> Branding {
    let obj = match value.and_then(Value::as_object) {
        Some(obj) => obj,
        None => return Branding::default(),
    };

    Branding {
        org_name: capped_string(obj.get("orgName"), limits::MAX_ORG_NAME_LEN, ""),
        logo_url: sanitize_url(obj.get("logoUrl")),
        palette_hint: capped_string(obj.get("paletteHint"), limits::MAX_PALETTE_HINT_LEN, ""),
    }
}

fn sanitize_frame(
    value: &Value,
    idx: usize,
    tokens: &TokenTable,
    report: &mut SanitizeReport,
) -> Option<Frame> {
    let obj = match value.as_object() {
        Some(obj) => obj,
        None => {
            report.note(format!("frame {} is not an object, dropped", idx + 1));
            return None;
        }
    };

    let duration_secs = number_field(
        obj.get("duration"),
        tokens,
        limits::DURATION_SECS,
        limits::DEFAULT_DURATION_SECS,
    );

    let transition = sanitize_transition(obj.get("transition"));
    let background = sanitize_background(obj.get("background"), tokens, report);

    let mut elements = Vec::new();
    let mut used_ids: Vec<String> = Vec::new();
    if let Some(list) = obj.get("elements").and_then(Value::as_array) {
        if list.len() > limits::MAX_ELEMENTS_PER_FRAME {
            report.note(format!(
                "frame {}: {} elements supplied, keeping the first {}",
                idx + 1,
                list.len(),
                limits::MAX_ELEMENTS_PER_FRAME
            ));
        }
        for (el_idx, el_value) in list.iter().take(limits::MAX_ELEMENTS_PER_FRAME).enumerate() {
            if let Some(element) = sanitize_element(el_value, el_idx, &mut used_ids, tokens, report)
            {
                elements.push(element);
            }
        }
    }

    let layout = sanitize_layout(obj.get("layout"), &elements, tokens);

    Some(Frame {
        duration_secs,
        transition,
        background,
        layout,
        elements,
    })
}

fn sanitize_transition(value: Option<&Value>) -> Transition {
    let obj = match value.and_then(Value::as_object) {
        Some(obj) => obj,
        None => return Transition::default(),
    };

    Transition {
        kind: enum_field(obj.get("type"), TransitionKind::parse),
        duration_secs: plain_number(obj.get("duration"))
            .map(|n| n.clamp(limits::TRANSITION_SECS.0, limits::TRANSITION_SECS.1))
            .unwrap_or(limits::DEFAULT_TRANSITION_SECS),
    }
}

fn sanitize_background(
    value: Option<&Value>,
    tokens: &TokenTable,
    report: &mut SanitizeReport,
) -> Background {
    let obj = match value.and_then(Value::as_object) {
        Some(obj) => obj,
        None => return Background::default(),
    };

    let overlay = obj.get("overlay").and_then(Value::as_object).and_then(|o| {
        let color = optional_color(o.get("color"), tokens)?;
        let opacity = plain_number(o.get("opacity"))
            .map(|n| n.clamp(0.0, 1.0))
            .unwrap_or(0.4);
        Some(Overlay { color, opacity })
    });

    let is_gradient = obj
        .get("type")
        .and_then(Value::as_str)
        .map(|t| t.trim() == "gradient")
        .unwrap_or(false);

    let fill = if is_gradient {
        sanitize_gradient(obj, tokens, report)
    } else {
        Fill::Solid {
            color: sanitize_color(obj.get("color"), tokens, limits::DEFAULT_BACKGROUND_COLOR),
        }
    };

    Background { fill, overlay }
}

fn sanitize_gradient(
    obj: &serde_json::Map<String, Value>,
    tokens: &TokenTable,
    report: &mut SanitizeReport,
) -> Fill {
    let mut stops: Vec<(String, Option<f64>)> = Vec::new();
    if let Some(list) = obj.get("stops").and_then(Value::as_array) {
        for stop in list.iter().take(limits::MAX_GRADIENT_STOPS) {
            let Some(stop_obj) = stop.as_object() else {
                continue;
            };
            let Some(color) = optional_color(stop_obj.get("color"), tokens) else {
                continue;
            };
            let position = plain_number(stop_obj.get("position")).map(|n| n.clamp(0.0, 100.0));
            stops.push((color, position));
        }
    }

    if stops.len() < limits::MIN_GRADIENT_STOPS {
        report.note("gradient has fewer than 2 valid stops, degraded to solid");
        let color = stops
            .into_iter()
            .next()
            .map(|(color, _)| color)
            .unwrap_or_else(|| {
                sanitize_color(obj.get("color"), tokens, limits::DEFAULT_BACKGROUND_COLOR)
            });
        return Fill::Solid { color };
    }

    // Spread positionless stops evenly across the axis, then keep the stop
    // list monotonic.
    let last = stops.len() - 1;
    let mut resolved: Vec<GradientStop> = stops
        .into_iter()
        .enumerate()
        .map(|(i, (color, position))| GradientStop {
            color,
            position: position.unwrap_or(i as f64 * 100.0 / last as f64),
        })
        .collect();
    resolved.sort_by(|a, b| a.position.total_cmp(&b.position));

    Fill::Gradient {
        kind: enum_field(obj.get("kind"), GradientKind::parse),
        direction: capped_string(obj.get("direction"), limits::MAX_DIRECTION_LEN, "180deg"),
        stops: resolved,
    }
}

fn sanitize_element(
    value: &Value,
    idx: usize,
    used_ids: &mut Vec<String>,
    tokens: &TokenTable,
    report: &mut SanitizeReport,
) -> Option<Element> {
    let obj = match value.as_object() {
        Some(obj) => obj,
        None => {
            report.note(format!("element {} is not an object, dropped", idx + 1));
            return None;
        }
    };

    let role = enum_field(obj.get("role"), Role::parse);
    let type_name = obj.get("type").and_then(Value::as_str).map(str::trim);

    let kind = match type_name {
        Some("text") => ElementKind::Text(sanitize_text(obj, role, tokens, report, idx)),
        Some("divider") => ElementKind::Divider(DividerPayload {
            color: sanitize_color(
                obj.get("color"),
                tokens,
                tokens.get("muted").unwrap_or(limits::DEFAULT_TEXT_COLOR),
            ),
            thickness: number_field(obj.get("thickness"), tokens, limits::THICKNESS, 2.0),
            width: sanitize_length(obj.get("width")),
        }),
        Some("image") => ElementKind::Image(ImagePayload {
            url: sanitize_url(obj.get("url")),
            alt: capped_string(obj.get("alt"), limits::MAX_ALT_LEN, ""),
        }),
        Some("shape") => ElementKind::Shape(ShapePayload {
            shape: enum_field(obj.get("shape"), ShapeKind::parse),
            color: sanitize_color(
                obj.get("color"),
                tokens,
                tokens.get("accent").unwrap_or(limits::DEFAULT_TEXT_COLOR),
            ),
        }),
        Some("spacer") => ElementKind::Spacer,
        other => {
            report.note(format!(
                "element {} has unknown type {}, dropped",
                idx + 1,
                other.unwrap_or("(missing)")
            ));
            return None;
        }
    };

    let id = unique_id(
        capped_string(obj.get("id"), limits::MAX_ID_LEN, ""),
        idx,
        used_ids,
    );
    used_ids.push(id.clone());

    Some(Element { id, role, kind })
}

fn sanitize_text(
    obj: &serde_json::Map<String, Value>,
    role: Role,
    tokens: &TokenTable,
    report: &mut SanitizeReport,
    el_idx: usize,
) -> TextPayload {
    let mut runs = Vec::new();
    if let Some(list) = obj.get("runs").and_then(Value::as_array) {
        if list.len() > limits::MAX_RUNS_PER_ELEMENT {
            report.note(format!(
                "element {}: {} runs supplied, keeping the first {}",
                el_idx + 1,
                list.len(),
                limits::MAX_RUNS_PER_ELEMENT
            ));
        }
        for run in list.iter().take(limits::MAX_RUNS_PER_ELEMENT) {
            let Some(run_obj) = run.as_object() else {
                continue;
            };
            let text = clean_text(
                run_obj.get("text").and_then(Value::as_str).unwrap_or(""),
                limits::MAX_RUN_TEXT_LEN,
            );
            let style = run_obj
                .get("style")
                .and_then(Value::as_object)
                .map(|style_obj| sanitize_run_style(style_obj, tokens))
                .filter(|style| !style.is_empty());
            runs.push(TextRun { text, style });
        }
    }

    let block_obj = obj.get("blockStyle").and_then(Value::as_object);
    let block = TextBlockStyle {
        font_family: resolve_font_family(
            block_obj.and_then(|b| b.get("fontFamily")).and_then(Value::as_str),
            role,
            tokens,
        ),
        font_size: number_field(
            block_obj.and_then(|b| b.get("fontSize")),
            tokens,
            limits::FONT_SIZE,
            role.default_font_size(),
        ),
        font_weight: number_field(
            block_obj.and_then(|b| b.get("fontWeight")),
            tokens,
            limits::FONT_WEIGHT,
            role.default_font_weight(),
        ),
        color: sanitize_color(
            block_obj.and_then(|b| b.get("color")),
            tokens,
            limits::DEFAULT_TEXT_COLOR,
        ),
        align: enum_field(block_obj.and_then(|b| b.get("align")), TextAlign::parse),
        line_height: number_field(
            block_obj.and_then(|b| b.get("lineHeight")),
            tokens,
            limits::LINE_HEIGHT,
            1.2,
        ),
    };

    TextPayload { runs, block }
}

fn sanitize_run_style(obj: &serde_json::Map<String, Value>, tokens: &TokenTable) -> RunStyle {
    RunStyle {
        font_size: plain_number(obj.get("fontSize"))
            .map(|n| n.clamp(limits::FONT_SIZE.0, limits::FONT_SIZE.1)),
        font_weight: plain_number(obj.get("fontWeight"))
            .map(|n| n.clamp(limits::FONT_WEIGHT.0, limits::FONT_WEIGHT.1)),
        font_family: obj
            .get("fontFamily")
            .and_then(Value::as_str)
            .map(|f| font_stack(tokens.resolve(f.trim())).to_string()),
        color: optional_color(obj.get("color"), tokens),
    }
}

fn sanitize_layout(value: Option<&Value>, elements: &[Element], tokens: &TokenTable) -> StackLayout {
    let obj = value.and_then(Value::as_object);

    let mut order: Vec<String> = Vec::new();
    if let Some(list) = obj
        .and_then(|o| o.get("orderedChildIds"))
        .and_then(Value::as_array)
    {
        for id in list.iter().filter_map(Value::as_str) {
            let known = elements.iter().any(|el| el.id == id);
            if known && !order.iter().any(|seen| seen == id) {
                order.push(id.to_string());
            }
        }
    }
    if order.is_empty() {
        order = elements.iter().map(|el| el.id.clone()).collect();
    }

    StackLayout {
        direction: enum_field(
            obj.and_then(|o| o.get("direction")),
            StackDirection::parse,
        ),
        align: enum_field(obj.and_then(|o| o.get("align")), Align::parse),
        justify: enum_field(obj.and_then(|o| o.get("justify")), Justify::parse),
        padding: number_field(
            obj.and_then(|o| o.get("padding")),
            tokens,
            limits::PADDING,
            limits::DEFAULT_PADDING,
        ),
        gap: number_field(
            obj.and_then(|o| o.get("gap")),
            tokens,
            limits::GAP,
            limits::DEFAULT_GAP,
        ),
        order,
    }
}

fn resolve_font_family(requested: Option<&str>, role: Role, tokens: &TokenTable) -> String {
    match requested {
        Some(family) => font_stack(tokens.resolve(family.trim())).to_string(),
        None => tokens
            .get(role.font_slot())
            .unwrap_or(crate::tokens::FONT_STACKS[0].1)
            .to_string(),
    }
}

/// Dedupe an element id within its frame, synthesizing one when empty.
fn unique_id(candidate: String, idx: usize, used_ids: &[String]) -> String {
    let base = if candidate.is_empty() {
        format!("el{}", idx + 1)
    } else {
        candidate
    };
    if !used_ids.contains(&base) {
        return base;
    }
    let stem = truncate_chars(&base, limits::MAX_ID_LEN - 4);
    let mut n = 2;
    loop {
        let attempt = format!("{stem}-{n}");
        if !used_ids.contains(&attempt) {
            return attempt;
        }
        n += 1;
    }
}

/// Strip ANSI escapes and control characters (newlines survive), then cap.
fn clean_text(raw: &str, max_chars: usize) -> String {
    let stripped = strip_ansi_escapes::strip(raw);
    let text = String::from_utf8_lossy(&stripped);
    let cleaned: String = text.chars().filter(|c| *c == '\n' || !c.is_control()).collect();
    truncate_chars(&cleaned, max_chars)
}

fn capped_string(value: Option<&Value>, max_chars: usize, default: &str) -> String {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| truncate_chars(s, max_chars))
        .unwrap_or_else(|| default.to_string())
}

fn truncate_chars(value: &str, max_chars: usize) -> String {
    value.chars().take(max_chars).collect()
}

/// Numeric field accepting raw numbers, numeric strings, and spacing tokens.
fn number_field(value: Option<&Value>, tokens: &TokenTable, range: (f64, f64), default: f64) -> f64 {
    let resolved = match value {
        Some(Value::String(s)) => tokens.resolve(s.trim()).parse::<f64>().ok(),
        Some(other) => numeric(other),
        None => None,
    };
    resolved
        .filter(|n| n.is_finite())
        .map(|n| n.clamp(range.0, range.1))
        .unwrap_or(default)
}

/// Numeric field without token resolution.
fn plain_number(value: Option<&Value>) -> Option<f64> {
    value.and_then(numeric)
}

fn sanitize_color(value: Option<&Value>, tokens: &TokenTable, default: &str) -> String {
    optional_color(value, tokens).unwrap_or_else(|| default.to_string())
}

fn optional_color(value: Option<&Value>, tokens: &TokenTable) -> Option<String> {
    let raw = value.and_then(Value::as_str)?.trim();
    let resolved = tokens.resolve(raw);
    is_hex_color(resolved).then(|| resolved.to_string())
}

fn sanitize_url(value: Option<&Value>) -> String {
    let Some(raw) = value.and_then(Value::as_str) else {
        return String::new();
    };
    let trimmed = truncate_chars(raw.trim(), limits::MAX_URL_LEN);
    let lower = trimmed.to_ascii_lowercase();
    if !lower.starts_with("https://") || URL_DENYLIST.iter().any(|deny| lower.contains(deny)) {
        return String::new();
    }
    trimmed
}

fn sanitize_length(value: Option<&Value>) -> String {
    let raw = capped_string(value, limits::MAX_LENGTH_STRING_LEN, "100%");
    let numeric_part = raw
        .strip_suffix('%')
        .or_else(|| raw.strip_suffix("px"))
        .unwrap_or("");
    match numeric_part.trim().parse::<f64>() {
        Ok(n) if n.is_finite() && n >= 0.0 => raw,
        _ => "100%".to_string(),
    }
}

fn enum_field<T: Default>(value: Option<&Value>, parse: fn(&str) -> Option<T>) -> T {
    value
        .and_then(Value::as_str)
        .map(|s| s.trim().to_ascii_lowercase())
        .and_then(|s| parse(&s))
        .unwrap_or_default()
}
