use serde::Serialize;

use crate::geometry::{Rect, Size};
use crate::layout::measure::{Extent, Measurer};
use crate::schema::{Align, Element, Frame, Justify, StackDirection};
use crate::tokens::TokenTable;

/// A sanitized element annotated with absolute pixel geometry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionedElement {
    pub id: String,
    pub rect: Rect,
    pub element: Element,
}

/// Position every child of a frame's stack container within a canvas.
///
/// Children are walked in the frame's layout order along the main axis
/// (vertical stacks flow top to bottom, horizontal left to right), aligned
/// on the cross axis, and emitted with integer-rounded rectangles. The
/// output is recomputed on every call; nothing is cached. Coordinates are
/// not clamped to the canvas, so overflowing estimates keep their computed
/// position for the renderer to clip.
pub fn resolve_layout(
    frame: &Frame,
    canvas: Size,
    tokens: &TokenTable,
    measurer: &dyn Measurer,
) -> Vec<PositionedElement> {
    let layout = &frame.layout;
    let (main_size, cross_size) = match layout.direction {
        StackDirection::Vertical => (canvas.height as f64, canvas.width as f64),
        StackDirection::Horizontal => (canvas.width as f64, canvas.height as f64),
    };

    let children: Vec<&Element> = layout
        .order
        .iter()
        .filter_map(|id| frame.elements.iter().find(|el| &el.id == id))
        .collect();
    if children.is_empty() {
        return Vec::new();
    }

    let padding = layout.padding;
    let avail_cross = (cross_size - 2.0 * padding).max(0.0);
    let avail_main = main_size - 2.0 * padding;

    let extents: Vec<Extent> = children
        .iter()
        .map(|el| measurer.measure(el, layout.direction, avail_cross, tokens))
        .collect();

    let count = children.len();
    let gap = layout.gap;
    let content_main: f64 = extents.iter().map(|e| e.main).sum();
    let total_main = content_main + gap * (count as f64 - 1.0);

    let (mut cursor, step_gap) = match layout.justify {
        Justify::Start => (padding, gap),
        Justify::End => (main_size - padding - total_main, gap),
        Justify::SpaceBetween if count >= 2 => {
            let spread = (avail_main - total_main + gap * (count as f64 - 1.0))
                / (count as f64 - 1.0);
            (padding, spread)
        }
        // space-between with a single child behaves as start.
        Justify::SpaceBetween => (padding, gap),
        Justify::Center => (padding.max((main_size - total_main) / 2.0), gap),
    };

    let mut positioned = Vec::with_capacity(count);
    for (child, extent) in children.iter().zip(&extents) {
        let cross_pos = match layout.align {
            Align::Start => padding,
            Align::Center => (cross_size - extent.cross) / 2.0,
            Align::End => cross_size - padding - extent.cross,
        };

        let rect = match layout.direction {
            StackDirection::Vertical => Rect::new(
                cross_pos.round() as i32,
                cursor.round() as i32,
                extent.cross.round() as i32,
                extent.main.round() as i32,
            ),
            StackDirection::Horizontal => Rect::new(
                cursor.round() as i32,
                cross_pos.round() as i32,
                extent.main.round() as i32,
                extent.cross.round() as i32,
            ),
        };

        positioned.push(PositionedElement {
            id: child.id.clone(),
            rect,
            element: (*child).clone(),
        });
        cursor += extent.main + step_gap;
    }

    positioned
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::measure::EstimateMeasurer;
    use crate::schema::{ElementKind, Role, StackLayout};

    fn spacer(id: &str) -> Element {
        Element {
            id: id.to_string(),
            role: Role::Body,
            kind: ElementKind::Spacer,
        }
    }

    fn frame_with(layout: StackLayout, elements: Vec<Element>) -> Frame {
        Frame {
            duration_secs: 15.0,
            transition: Default::default(),
            background: Default::default(),
            layout,
            elements,
        }
    }

    fn stack(elements: &[Element]) -> StackLayout {
        StackLayout {
            order: elements.iter().map(|el| el.id.clone()).collect(),
            ..StackLayout::default()
        }
    }

    #[test]
    fn zero_children_yield_empty_result() {
        let frame = frame_with(StackLayout::default(), Vec::new());
        let out = resolve_layout(
            &frame,
            Size::new(1920, 1080),
            &TokenTable::default(),
            &EstimateMeasurer::default(),
        );
        assert!(out.is_empty());
    }

    #[test]
    fn vertical_stack_centers_by_default() {
        let elements = vec![spacer("a"), spacer("b")];
        let mut layout = stack(&elements);
        layout.padding = 60.0;
        layout.gap = 20.0;
        let frame = frame_with(layout, elements);
        let out = resolve_layout(
            &frame,
            Size::new(1000, 500),
            &TokenTable::default(),
            &EstimateMeasurer::default(),
        );

        // total main = 16 + 16 + 20 = 52; centered start = (500 - 52) / 2 = 224.
        assert_eq!(out[0].rect.y, 224);
        assert_eq!(out[1].rect.y, 224 + 16 + 20);
        // spacers span the available cross width, centered.
        assert_eq!(out[0].rect.width, 880);
        assert_eq!(out[0].rect.x, 60);
    }

    #[test]
    fn space_between_pins_first_and_last_to_padding() {
        let elements = vec![spacer("a"), spacer("b"), spacer("c")];
        let mut layout = stack(&elements);
        layout.padding = 50.0;
        layout.gap = 10.0;
        layout.justify = Justify::SpaceBetween;
        let frame = frame_with(layout, elements);
        let out = resolve_layout(
            &frame,
            Size::new(800, 600),
            &TokenTable::default(),
            &EstimateMeasurer::default(),
        );

        assert_eq!(out[0].rect.y, 50);
        let last = out.last().unwrap();
        assert_eq!(last.rect.bottom(), 600 - 50);
    }

    #[test]
    fn space_between_with_one_child_behaves_as_start() {
        let elements = vec![spacer("only")];
        let mut layout = stack(&elements);
        layout.padding = 40.0;
        layout.justify = Justify::SpaceBetween;
        let frame = frame_with(layout, elements);
        let out = resolve_layout(
            &frame,
            Size::new(400, 400),
            &TokenTable::default(),
            &EstimateMeasurer::default(),
        );
        assert_eq!(out[0].rect.y, 40);
    }

    #[test]
    fn justify_end_packs_against_far_edge() {
        let elements = vec![spacer("a"), spacer("b")];
        let mut layout = stack(&elements);
        layout.padding = 30.0;
        layout.gap = 8.0;
        layout.justify = Justify::End;
        let frame = frame_with(layout, elements);
        let out = resolve_layout(
            &frame,
            Size::new(500, 500),
            &TokenTable::default(),
            &EstimateMeasurer::default(),
        );
        assert_eq!(out.last().unwrap().rect.bottom(), 500 - 30);
    }

    #[test]
    fn horizontal_direction_walks_the_x_axis() {
        let elements = vec![spacer("a"), spacer("b")];
        let mut layout = stack(&elements);
        layout.direction = StackDirection::Horizontal;
        layout.justify = Justify::Start;
        layout.align = Align::Start;
        layout.padding = 10.0;
        layout.gap = 4.0;
        let frame = frame_with(layout, elements);
        let out = resolve_layout(
            &frame,
            Size::new(600, 300),
            &TokenTable::default(),
            &EstimateMeasurer::default(),
        );

        assert_eq!(out[0].rect.x, 10);
        assert_eq!(out[1].rect.x, 10 + 16 + 4);
        assert_eq!(out[0].rect.y, 10);
        // cross extent spans available height for spacers.
        assert_eq!(out[0].rect.height, 280);
    }

    #[test]
    fn align_end_places_children_at_cross_edge() {
        let elements = vec![spacer("a")];
        let mut layout = stack(&elements);
        layout.align = Align::End;
        layout.padding = 25.0;
        let frame = frame_with(layout, elements);
        let out = resolve_layout(
            &frame,
            Size::new(500, 400),
            &TokenTable::default(),
            &EstimateMeasurer::default(),
        );
        assert_eq!(out[0].rect.right(), 500 - 25);
    }

    #[test]
    fn walk_order_follows_layout_order_not_declaration() {
        let elements = vec![spacer("first"), spacer("second")];
        let mut layout = stack(&elements);
        layout.order = vec!["second".to_string(), "first".to_string()];
        layout.justify = Justify::Start;
        let frame = frame_with(layout, elements);
        let out = resolve_layout(
            &frame,
            Size::new(400, 400),
            &TokenTable::default(),
            &EstimateMeasurer::default(),
        );
        assert_eq!(out[0].id, "second");
        assert_eq!(out[1].id, "first");
        assert!(out[0].rect.y < out[1].rect.y);
    }

    #[test]
    fn unknown_order_ids_are_skipped() {
        let elements = vec![spacer("real")];
        let mut layout = stack(&elements);
        layout.order = vec!["ghost".to_string(), "real".to_string()];
        let frame = frame_with(layout, elements);
        let out = resolve_layout(
            &frame,
            Size::new(400, 400),
            &TokenTable::default(),
            &EstimateMeasurer::default(),
        );
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, "real");
    }

    #[test]
    fn resolve_layout_is_deterministic() {
        let elements = vec![spacer("a"), spacer("b"), spacer("c")];
        let layout = stack(&elements);
        let frame = frame_with(layout, elements);
        let tokens = TokenTable::default();
        let measurer = EstimateMeasurer::default();
        let first = resolve_layout(&frame, Size::new(1920, 1080), &tokens, &measurer);
        let second = resolve_layout(&frame, Size::new(1920, 1080), &tokens, &measurer);
        assert_eq!(first, second);
    }

    #[test]
    fn oversized_content_may_overflow_without_clamping() {
        let elements: Vec<Element> = (0..4).map(|i| spacer(&format!("s{i}"))).collect();
        let mut layout = stack(&elements);
        layout.justify = Justify::End;
        layout.padding = 10.0;
        layout.gap = 30.0;
        let frame = frame_with(layout, elements);
        // main size 80 < total main 16*4 + 30*3 = 154, so the first child
        // starts above the canvas.
        let out = resolve_layout(
            &frame,
            Size::new(200, 80),
            &TokenTable::default(),
            &EstimateMeasurer::default(),
        );
        assert!(out[0].rect.y < 0);
    }
}
