use crate::schema::{DividerPayload, Element, ElementKind, StackDirection, TextPayload};
use crate::tokens::TokenTable;
use crate::width::display_width;

/// Estimated occupancy of one element along the stack axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub main: f64,
    pub cross: f64,
}

/// Content measurement capability.
///
/// The layout resolver never inspects element payloads itself; it asks a
/// measurer. This keeps the estimation heuristics replaceable by real text
/// shaping without touching the walk algorithm.
pub trait Measurer {
    fn measure(
        &self,
        element: &Element,
        direction: StackDirection,
        avail_cross: f64,
        tokens: &TokenTable,
    ) -> Extent;
}

/// Heuristic measurer used before any real rendering metrics exist.
///
/// Character width is approximated as a fixed fraction of the font size, and
/// images/shapes get fixed fractions of the available cross width. The
/// ratios are uncalibrated estimates.
#[derive(Debug, Clone)]
pub struct EstimateMeasurer {
    pub char_width_ratio: f64,
    pub divider_margin: f64,
    pub spacer_extent: f64,
    pub image_fraction: f64,
    pub shape_fraction: f64,
}

impl Default for EstimateMeasurer {
    fn default() -> Self {
        Self {
            char_width_ratio: 0.52,
            divider_margin: 8.0,
            spacer_extent: 16.0,
            image_fraction: 0.5,
            shape_fraction: 0.3,
        }
    }
}

impl Measurer for EstimateMeasurer {
    fn measure(
        &self,
        element: &Element,
        direction: StackDirection,
        avail_cross: f64,
        _tokens: &TokenTable,
    ) -> Extent {
        match &element.kind {
            ElementKind::Text(payload) => self.measure_text(payload, direction, avail_cross),
            ElementKind::Divider(payload) => self.measure_divider(payload, avail_cross),
            ElementKind::Image(_) => Extent {
                main: avail_cross * self.image_fraction,
                cross: avail_cross,
            },
            ElementKind::Shape(_) => Extent {
                main: avail_cross * self.shape_fraction,
                cross: avail_cross * self.shape_fraction,
            },
            ElementKind::Spacer => Extent {
                main: self.spacer_extent,
                cross: avail_cross,
            },
        }
    }
}

impl EstimateMeasurer {
    fn measure_text(
        &self,
        payload: &TextPayload,
        direction: StackDirection,
        avail_cross: f64,
    ) -> Extent {
        // Runs may bump the size above the block style; estimate against the
        // largest size in play.
        let font_size = payload
            .runs
            .iter()
            .filter_map(|run| run.style.as_ref().and_then(|s| s.font_size))
            .fold(payload.block.font_size, f64::max);
        let char_width = font_size * self.char_width_ratio;

        let joined: String = payload.runs.iter().map(|run| run.text.as_str()).collect();
        let mut total_lines = 0u32;
        let mut widest = 0f64;
        for line in joined.split('\n') {
            let line_width = display_width(line) as f64 * char_width;
            let wrapped = if avail_cross > 0.0 && line_width > avail_cross {
                (line_width / avail_cross).ceil() as u32
            } else {
                1
            };
            total_lines += wrapped;
            widest = widest.max(if avail_cross > 0.0 {
                line_width.min(avail_cross)
            } else {
                line_width
            });
        }

        let height = (total_lines as f64 * font_size * payload.block.line_height).ceil();
        match direction {
            StackDirection::Vertical => Extent {
                main: height,
                cross: widest,
            },
            StackDirection::Horizontal => Extent {
                main: widest,
                cross: height,
            },
        }
    }

    fn measure_divider(&self, payload: &DividerPayload, avail_cross: f64) -> Extent {
        Extent {
            main: payload.thickness + self.divider_margin,
            cross: resolve_length(&payload.width, avail_cross),
        }
    }
}

/// Resolve a sanitized length string (`"60%"` or `"240px"`) against the
/// available cross width.
fn resolve_length(length: &str, avail_cross: f64) -> f64 {
    if let Some(percent) = length.strip_suffix('%') {
        return percent
            .trim()
            .parse::<f64>()
            .map(|p| avail_cross * p / 100.0)
            .unwrap_or(avail_cross);
    }
    if let Some(px) = length.strip_suffix("px") {
        return px.trim().parse::<f64>().unwrap_or(avail_cross);
    }
    avail_cross
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Role, RunStyle, TextAlign, TextBlockStyle, TextRun};

    fn text_element(text: &str, font_size: f64, line_height: f64) -> Element {
        Element {
            id: "t".to_string(),
            role: Role::Body,
            kind: ElementKind::Text(TextPayload {
                runs: vec![TextRun {
                    text: text.to_string(),
                    style: None,
                }],
                block: TextBlockStyle {
                    font_family: "Inter, 'Helvetica Neue', Arial, sans-serif".to_string(),
                    font_size,
                    font_weight: 400.0,
                    color: "#111111".to_string(),
                    align: TextAlign::Center,
                    line_height,
                },
            }),
        }
    }

    #[test]
    fn single_line_text_height_is_one_line() {
        let measurer = EstimateMeasurer::default();
        let tokens = TokenTable::default();
        let el = text_element("Hello", 100.0, 1.0);
        let extent = measurer.measure(&el, StackDirection::Vertical, 1000.0, &tokens);
        // 5 chars * 100 * 0.52 = 260 wide, fits in one line.
        assert_eq!(extent.main, 100.0);
        assert_eq!(extent.cross, 260.0);
    }

    #[test]
    fn explicit_newlines_force_line_breaks() {
        let measurer = EstimateMeasurer::default();
        let tokens = TokenTable::default();
        let el = text_element("a\nb\nc", 50.0, 1.2);
        let extent = measurer.measure(&el, StackDirection::Vertical, 1000.0, &tokens);
        assert_eq!(extent.main, (3.0_f64 * 50.0 * 1.2).ceil());
    }

    #[test]
    fn long_line_wraps_against_available_width() {
        let measurer = EstimateMeasurer::default();
        let tokens = TokenTable::default();
        // 20 chars * 100 * 0.52 = 1040 wide, wraps into 3 lines at 400.
        let el = text_element("abcdefghijklmnopqrst", 100.0, 1.0);
        let extent = measurer.measure(&el, StackDirection::Vertical, 400.0, &tokens);
        assert_eq!(extent.main, 300.0);
        assert_eq!(extent.cross, 400.0);
    }

    #[test]
    fn run_font_size_override_raises_estimate() {
        let measurer = EstimateMeasurer::default();
        let tokens = TokenTable::default();
        let mut el = text_element("Hi", 30.0, 1.0);
        if let ElementKind::Text(payload) = &mut el.kind {
            payload.runs[0].style = Some(RunStyle {
                font_size: Some(60.0),
                ..RunStyle::default()
            });
        }
        let extent = measurer.measure(&el, StackDirection::Vertical, 1000.0, &tokens);
        assert_eq!(extent.main, 60.0);
    }

    #[test]
    fn horizontal_direction_swaps_text_axes() {
        let measurer = EstimateMeasurer::default();
        let tokens = TokenTable::default();
        let el = text_element("Hello", 100.0, 1.0);
        let vertical = measurer.measure(&el, StackDirection::Vertical, 1000.0, &tokens);
        let horizontal = measurer.measure(&el, StackDirection::Horizontal, 1000.0, &tokens);
        assert_eq!(vertical.main, horizontal.cross);
        assert_eq!(vertical.cross, horizontal.main);
    }

    #[test]
    fn divider_extent_uses_thickness_and_length() {
        let measurer = EstimateMeasurer::default();
        let tokens = TokenTable::default();
        let el = Element {
            id: "d".to_string(),
            role: Role::Body,
            kind: ElementKind::Divider(DividerPayload {
                color: "#111111".to_string(),
                thickness: 4.0,
                width: "60%".to_string(),
            }),
        };
        let extent = measurer.measure(&el, StackDirection::Vertical, 500.0, &tokens);
        assert_eq!(extent.main, 12.0);
        assert_eq!(extent.cross, 300.0);
    }

    #[test]
    fn fixed_fraction_estimates_for_image_shape_spacer() {
        let measurer = EstimateMeasurer::default();
        let tokens = TokenTable::default();
        let avail = 800.0;

        let image = Element {
            id: "i".to_string(),
            role: Role::Body,
            kind: ElementKind::Image(crate::schema::ImagePayload {
                url: String::new(),
                alt: String::new(),
            }),
        };
        let shape = Element {
            id: "s".to_string(),
            role: Role::Body,
            kind: ElementKind::Shape(crate::schema::ShapePayload {
                shape: crate::schema::ShapeKind::Circle,
                color: "#f59e0b".to_string(),
            }),
        };
        let spacer = Element {
            id: "sp".to_string(),
            role: Role::Body,
            kind: ElementKind::Spacer,
        };

        let dir = StackDirection::Vertical;
        assert_eq!(measurer.measure(&image, dir, avail, &tokens).main, 400.0);
        assert_eq!(measurer.measure(&shape, dir, avail, &tokens).main, 240.0);
        assert_eq!(measurer.measure(&spacer, dir, avail, &tokens).main, 16.0);
    }
}
