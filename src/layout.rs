use kurbo::Rect;

use crate::core::Viewport;

pub const TOOLTIP_MAX_WIDTH: f64 = 280.0;
pub const EDGE_PADDING: f64 = 20.0;
/// Assumed tooltip box height for `Top` placement; the real box is never
/// measured.
pub const ESTIMATED_TOOLTIP_HEIGHT: f64 = 180.0;
pub const ANCHOR_GAP: f64 = 16.0;

const ARROW_HALF_WIDTH: f64 = 8.0;
const ARROW_MIN_OFFSET: f64 = 12.0;
const ARROW_END_INSET: f64 = 28.0;

/// Which side of the anchor the tooltip sits on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    Top,
    #[default]
    Bottom,
}

/// Which edge of the tooltip the arrow is attached to. Opposite of the
/// placement: a tooltip above its anchor points down from its bottom edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrowEdge {
    Top,
    Bottom,
}

/// Computed tooltip rectangle and arrow attachment, document-relative.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TooltipLayout {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    /// Arrow left offset relative to the tooltip's own left edge. Decoupled
    /// from centering so the arrow still indicates the anchor after the box
    /// has been clamped toward a viewport edge.
    pub arrow_offset: f64,
    pub arrow_edge: ArrowEdge,
}

/// Positions a tooltip against an anchor box.
///
/// `anchor` is viewport-relative (a bounding-box query result); the returned
/// `top`/`left` are document-relative. The box is centered on the anchor and
/// clamped so both edges stay `EDGE_PADDING` inside the viewport; the arrow
/// offset is then clamped into the box's straight-edge region
/// (`[12, width - 28]`) so it never lands on a rounded corner.
pub fn position_tooltip(anchor: Rect, viewport: Viewport, placement: Placement) -> TooltipLayout {
    let width = TOOLTIP_MAX_WIDTH
        .min(viewport.width - 2.0 * EDGE_PADDING)
        .max(0.0);

    let anchor_center_x = anchor.center().x;
    let mut left = anchor_center_x - width / 2.0;
    if left < EDGE_PADDING {
        left = EDGE_PADDING;
    }
    if left + width > viewport.width - EDGE_PADDING {
        left = viewport.width - width - EDGE_PADDING;
    }

    let mut arrow_offset = anchor_center_x - left - ARROW_HALF_WIDTH;
    if arrow_offset < ARROW_MIN_OFFSET {
        arrow_offset = ARROW_MIN_OFFSET;
    }
    if arrow_offset > width - ARROW_END_INSET {
        arrow_offset = width - ARROW_END_INSET;
    }

    let (top, arrow_edge) = match placement {
        Placement::Top => (
            anchor.y0 + viewport.scroll_y - ESTIMATED_TOOLTIP_HEIGHT,
            ArrowEdge::Bottom,
        ),
        Placement::Bottom => (anchor.y1 + viewport.scroll_y + ANCHOR_GAP, ArrowEdge::Top),
    };

    TooltipLayout {
        top,
        left,
        width,
        arrow_offset,
        arrow_edge,
    }
}
