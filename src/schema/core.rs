use serde::Serialize;

/// Hard caps applied to every sanitized document.
///
/// The producer is an unreliable generative model, so every repeated
/// structure is truncated to a fixed bound rather than trusted.
pub mod limits {
    pub const MAX_FRAMES: usize = 3;
    pub const MAX_ELEMENTS_PER_FRAME: usize = 8;
    pub const MAX_RUNS_PER_ELEMENT: usize = 20;
    pub const MAX_GRADIENT_STOPS: usize = 8;
    pub const MIN_GRADIENT_STOPS: usize = 2;

    pub const MAX_TITLE_LEN: usize = 100;
    pub const MAX_ID_LEN: usize = 32;
    pub const MAX_ALT_LEN: usize = 200;
    pub const MAX_ORG_NAME_LEN: usize = 80;
    pub const MAX_PALETTE_HINT_LEN: usize = 40;
    pub const MAX_RUN_TEXT_LEN: usize = 500;
    pub const MAX_URL_LEN: usize = 500;
    pub const MAX_LENGTH_STRING_LEN: usize = 16;
    pub const MAX_DIRECTION_LEN: usize = 24;

    pub const DURATION_SECS: (f64, f64) = (1.0, 120.0);
    pub const DEFAULT_DURATION_SECS: f64 = 15.0;
    pub const TRANSITION_SECS: (f64, f64) = (0.2, 2.0);
    pub const DEFAULT_TRANSITION_SECS: f64 = 0.5;
    pub const FONT_SIZE: (f64, f64) = (18.0, 180.0);
    pub const FONT_WEIGHT: (f64, f64) = (100.0, 900.0);
    pub const LINE_HEIGHT: (f64, f64) = (0.8, 3.0);
    pub const THICKNESS: (f64, f64) = (1.0, 12.0);
    pub const PADDING: (f64, f64) = (0.0, 240.0);
    pub const DEFAULT_PADDING: f64 = 60.0;
    pub const GAP: (f64, f64) = (0.0, 160.0);
    pub const DEFAULT_GAP: f64 = 24.0;

    pub const DEFAULT_TEXT_COLOR: &str = "#111111";
    pub const DEFAULT_BACKGROUND_COLOR: &str = "#ffffff";
}

/// Sanitized signage document. Immutable once produced; sanitization builds
/// fresh values and never mutates its input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub version: String,
    pub meta: Meta,
    pub branding: Branding,
    pub frames: Vec<Frame>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    pub title: String,
    pub intent: Intent,
    pub contrast: Contrast,
    pub aspect_ratio: AspectRatio,
}

impl Default for Meta {
    fn default() -> Self {
        Self {
            title: "Untitled".to_string(),
            intent: Intent::default(),
            contrast: Contrast::default(),
            aspect_ratio: AspectRatio::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Announce,
    Promote,
    #[default]
    Inform,
    Celebrate,
    Alert,
}

impl Intent {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "announce" => Some(Self::Announce),
            "promote" => Some(Self::Promote),
            "inform" => Some(Self::Inform),
            "celebrate" => Some(Self::Celebrate),
            "alert" => Some(Self::Alert),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Contrast {
    Low,
    #[default]
    Medium,
    High,
}

impl Contrast {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

/// Target canvas shape. The concrete pixel size is resolved against the
/// caller's bounding box at import time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum AspectRatio {
    #[default]
    #[serde(rename = "16:9")]
    Landscape,
    #[serde(rename = "9:16")]
    Portrait,
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "4:3")]
    Classic,
}

impl AspectRatio {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "16:9" => Some(Self::Landscape),
            "9:16" => Some(Self::Portrait),
            "1:1" => Some(Self::Square),
            "4:3" => Some(Self::Classic),
            _ => None,
        }
    }

    /// Width/height ratio terms.
    pub fn terms(self) -> (f64, f64) {
        match self {
            Self::Landscape => (16.0, 9.0),
            Self::Portrait => (9.0, 16.0),
            Self::Square => (1.0, 1.0),
            Self::Classic => (4.0, 3.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Branding {
    pub org_name: String,
    /// Always `https://` or empty after sanitization.
    pub logo_url: String,
    pub palette_hint: String,
}

/// One slide of the composition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    #[serde(rename = "duration")]
    pub duration_secs: f64,
    pub transition: Transition,
    pub background: Background,
    pub layout: StackLayout,
    pub elements: Vec<Element>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transition {
    #[serde(rename = "type")]
    pub kind: TransitionKind,
    #[serde(rename = "duration")]
    pub duration_secs: f64,
}

impl Default for Transition {
    fn default() -> Self {
        Self {
            kind: TransitionKind::default(),
            duration_secs: limits::DEFAULT_TRANSITION_SECS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionKind {
    #[default]
    Fade,
    Slide,
    Cut,
}

impl TransitionKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "fade" => Some(Self::Fade),
            "slide" => Some(Self::Slide),
            "cut" => Some(Self::Cut),
            _ => None,
        }
    }
}

/// Paintable frame background: a fill plus an optional tint overlay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Background {
    #[serde(flatten)]
    pub fill: Fill,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overlay: Option<Overlay>,
}

impl Default for Background {
    fn default() -> Self {
        Self {
            fill: Fill::Solid {
                color: limits::DEFAULT_BACKGROUND_COLOR.to_string(),
            },
            overlay: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Fill {
    Solid {
        color: String,
    },
    Gradient {
        kind: GradientKind,
        direction: String,
        stops: Vec<GradientStop>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientKind {
    #[default]
    Linear,
    Radial,
    Conic,
}

impl GradientKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "linear" => Some(Self::Linear),
            "radial" => Some(Self::Radial),
            "conic" => Some(Self::Conic),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradientStop {
    pub color: String,
    /// Percent along the gradient axis, 0–100.
    pub position: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overlay {
    pub color: String,
    /// 0–1.
    pub opacity: f64,
}

/// Single-axis stack container settings for a frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StackLayout {
    pub direction: StackDirection,
    pub align: Align,
    pub justify: Justify,
    pub padding: f64,
    pub gap: f64,
    /// Walk order for layout. Always references existing element ids.
    #[serde(rename = "orderedChildIds")]
    pub order: Vec<String>,
}

impl Default for StackLayout {
    fn default() -> Self {
        Self {
            direction: StackDirection::default(),
            align: Align::default(),
            justify: Justify::default(),
            padding: limits::DEFAULT_PADDING,
            gap: limits::DEFAULT_GAP,
            order: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StackDirection {
    #[default]
    Vertical,
    Horizontal,
}

impl StackDirection {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "vertical" => Some(Self::Vertical),
            "horizontal" => Some(Self::Horizontal),
            _ => None,
        }
    }
}

/// Cross-axis placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Start,
    #[default]
    Center,
    End,
}

impl Align {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "start" => Some(Self::Start),
            "center" => Some(Self::Center),
            "end" => Some(Self::End),
            _ => None,
        }
    }
}

/// Main-axis distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Justify {
    Start,
    #[default]
    Center,
    End,
    SpaceBetween,
}

impl Justify {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "start" => Some(Self::Start),
            "center" => Some(Self::Center),
            "end" => Some(Self::End),
            "space-between" => Some(Self::SpaceBetween),
            _ => None,
        }
    }
}

/// Sanitized element: a unique-in-frame id, a semantic role, and a closed
/// payload variant. Each variant's allow-listed shape is a construction-time
/// invariant, never a runtime convention.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Element {
    pub id: String,
    pub role: Role,
    #[serde(flatten)]
    pub kind: ElementKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Headline,
    Subhead,
    #[default]
    Body,
    Caption,
}

impl Role {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "headline" => Some(Self::Headline),
            "subhead" => Some(Self::Subhead),
            "body" => Some(Self::Body),
            "caption" => Some(Self::Caption),
            _ => None,
        }
    }

    /// Block font size when the document supplies none.
    pub fn default_font_size(self) -> f64 {
        match self {
            Self::Headline => 88.0,
            Self::Subhead => 48.0,
            Self::Body => 32.0,
            Self::Caption => 22.0,
        }
    }

    pub fn default_font_weight(self) -> f64 {
        match self {
            Self::Headline => 800.0,
            Self::Subhead => 600.0,
            Self::Body | Self::Caption => 400.0,
        }
    }

    /// Token-table font slot backing this role.
    pub fn font_slot(self) -> &'static str {
        match self {
            Self::Headline | Self::Subhead => "display",
            Self::Body | Self::Caption => "body",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ElementKind {
    Text(TextPayload),
    Divider(DividerPayload),
    Image(ImagePayload),
    Shape(ShapePayload),
    Spacer,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextPayload {
    pub runs: Vec<TextRun>,
    #[serde(rename = "blockStyle")]
    pub block: TextBlockStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextRun {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<RunStyle>,
}

/// Per-run style overrides. Absent fields inherit from the block style.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl RunStyle {
    pub fn is_empty(&self) -> bool {
        self.font_size.is_none()
            && self.font_weight.is_none()
            && self.font_family.is_none()
            && self.color.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextBlockStyle {
    pub font_family: String,
    pub font_size: f64,
    pub font_weight: f64,
    pub color: String,
    pub align: TextAlign,
    pub line_height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

impl TextAlign {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "left" => Some(Self::Left),
            "center" => Some(Self::Center),
            "right" => Some(Self::Right),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DividerPayload {
    pub color: String,
    pub thickness: f64,
    /// Length string such as `"60%"` or `"240px"`.
    pub width: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImagePayload {
    /// Always `https://` or empty after sanitization.
    pub url: String,
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShapePayload {
    pub shape: ShapeKind,
    pub color: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    #[default]
    Rect,
    Circle,
    Line,
    Arrow,
    Triangle,
}

impl ShapeKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "rect" => Some(Self::Rect),
            "circle" => Some(Self::Circle),
            "line" => Some(Self::Line),
            "arrow" => Some(Self::Arrow),
            "triangle" => Some(Self::Triangle),
            _ => None,
        }
    }
}
