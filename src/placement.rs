//! Floating panel placement next to an anchor.
//!
//! Pure arithmetic: the caller measures the anchor and the panel, this module
//! decides where the panel's top-left corner goes. Coordinates are signed so a
//! panel wider than the viewport can be reported with a negative origin and
//! clipped at draw time, the same way floating windows are.

/// Anchor bounding box in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AnchorRect {
    pub left: i32,
    pub right: i32,
    pub top: i32,
    pub height: i32,
}

impl AnchorRect {
    pub fn from_rect(rect: ratatui::layout::Rect) -> Self {
        Self {
            left: rect.x as i32,
            right: rect.x as i32 + rect.width as i32,
            top: rect.y as i32,
            height: rect.height as i32,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PanelSize {
    pub width: i32,
    pub height: i32,
}

/// Computed top-left corner of the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PanelGeometry {
    pub left: i32,
    pub top: i32,
}

/// Distances used by the placement rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementMetrics {
    /// Space between the anchor's right edge and the panel.
    pub gap: i32,
    /// Space kept to the viewport's right edge when the panel flips inside.
    pub edge_margin: i32,
    /// Smallest allowed top coordinate.
    pub min_top: i32,
    /// Keep the panel's bottom edge inside the viewport.
    ///
    /// Off in both presets; placement without it never looks at the
    /// viewport height.
    pub clamp_bottom: bool,
}

impl PlacementMetrics {
    /// Pixel distances for hosts that measure in pixels.
    pub const PIXELS: Self = Self {
        gap: 12,
        edge_margin: 24,
        min_top: 50,
        clamp_bottom: false,
    };

    /// Cell distances for terminal hosts.
    pub const CELLS: Self = Self {
        gap: 2,
        edge_margin: 1,
        min_top: 1,
        clamp_bottom: false,
    };

    pub const fn with_clamp_bottom(mut self, clamp: bool) -> Self {
        self.clamp_bottom = clamp;
        self
    }
}

/// Place the panel to the right of the anchor, vertically centered on it.
///
/// Falls back to hugging the viewport's right edge when the panel does not
/// fit beside the anchor. The top is never above `metrics.min_top`.
pub fn place_panel(
    anchor: AnchorRect,
    panel: PanelSize,
    viewport_width: i32,
    metrics: PlacementMetrics,
) -> PanelGeometry {
    let left = if anchor.right + panel.width - metrics.gap < viewport_width {
        anchor.right + metrics.gap
    } else {
        viewport_width - metrics.edge_margin - panel.width
    };
    // (top + h/2) - (ph/2) without losing the half cell twice.
    let centered = (2 * anchor.top + anchor.height - panel.height).div_euclid(2);
    PanelGeometry {
        left,
        top: centered.max(metrics.min_top),
    }
}

/// Like [`place_panel`], additionally honoring `metrics.clamp_bottom`.
pub fn place_panel_in(
    anchor: AnchorRect,
    panel: PanelSize,
    viewport_width: i32,
    viewport_height: i32,
    metrics: PlacementMetrics,
) -> PanelGeometry {
    let mut geometry = place_panel(anchor, panel, viewport_width, metrics);
    if metrics.clamp_bottom {
        let lowest = viewport_height - panel.height;
        geometry.top = geometry.top.min(lowest).max(metrics.min_top);
    }
    geometry
}

#[cfg(test)]
mod tests {
    use super::*;

    const PX: PlacementMetrics = PlacementMetrics::PIXELS;

    fn anchor(left: i32, right: i32, top: i32, height: i32) -> AnchorRect {
        AnchorRect {
            left,
            right,
            top,
            height,
        }
    }

    fn panel(width: i32, height: i32) -> PanelSize {
        PanelSize { width, height }
    }

    #[test]
    fn places_beside_anchor_when_it_fits() {
        let g = place_panel(anchor(10, 210, 300, 30), panel(250, 360), 1200, PX);
        assert_eq!(g.left, 222);
    }

    #[test]
    fn flips_to_right_edge_when_it_overflows() {
        let g = place_panel(anchor(700, 900, 300, 30), panel(250, 360), 1000, PX);
        assert_eq!(g.left, 1000 - 24 - 250);
    }

    #[test]
    fn boundary_is_exclusive() {
        // right + width - 12 == W: does not fit.
        let at = place_panel(anchor(0, 762, 300, 30), panel(250, 360), 1000, PX);
        assert_eq!(at.left, 726);
        // One pixel to the left: fits.
        let below = place_panel(anchor(0, 761, 300, 30), panel(250, 360), 1000, PX);
        assert_eq!(below.left, 773);
    }

    #[test]
    fn centers_vertically_on_anchor() {
        let g = place_panel(anchor(0, 100, 400, 40), panel(250, 300), 2000, PX);
        assert_eq!(g.top, 400 + 20 - 150);
    }

    #[test]
    fn clamps_top_to_minimum() {
        let g = place_panel(anchor(0, 100, 20, 30), panel(250, 300), 2000, PX);
        assert_eq!(g.top, 50);
        let exact = place_panel(anchor(0, 100, 185, 30), panel(250, 300), 2000, PX);
        assert_eq!(exact.top, 50);
        let above = place_panel(anchor(0, 100, 186, 30), panel(250, 300), 2000, PX);
        assert_eq!(above.top, 51);
    }

    #[test]
    fn odd_sizes_floor_the_center() {
        let g = place_panel(anchor(0, 10, 10, 1), panel(20, 10), 100, PlacementMetrics::CELLS);
        // 10 + 0.5 - 5 = 5.5
        assert_eq!(g.top, 5);
    }

    #[test]
    fn narrow_viewport_reports_negative_left() {
        let g = place_panel(anchor(0, 10, 10, 1), panel(40, 10), 30, PlacementMetrics::CELLS);
        assert_eq!(g.left, 30 - 1 - 40);
    }

    #[test]
    fn bottom_clamp_is_opt_in() {
        let a = anchor(0, 10, 38, 1);
        let p = panel(20, 18);
        let free = place_panel_in(a, p, 100, 40, PlacementMetrics::CELLS);
        assert_eq!(free.top, 29);
        let clamped = place_panel_in(
            a,
            p,
            100,
            40,
            PlacementMetrics::CELLS.with_clamp_bottom(true),
        );
        assert_eq!(clamped.top, 22);
    }

    #[test]
    fn bottom_clamp_never_beats_min_top() {
        let metrics = PlacementMetrics::CELLS.with_clamp_bottom(true);
        let g = place_panel_in(anchor(0, 10, 5, 1), panel(20, 18), 100, 10, metrics);
        assert_eq!(g.top, 1);
    }

    #[test]
    fn anchor_from_rect_uses_exclusive_right() {
        let r = ratatui::layout::Rect {
            x: 4,
            y: 2,
            width: 10,
            height: 1,
        };
        assert_eq!(AnchorRect::from_rect(r), anchor(4, 14, 2, 1));
    }
}
