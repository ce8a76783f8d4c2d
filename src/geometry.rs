// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bounds and radius computation for the border and image circles.
//!
//! All derived state here is recomputed wholesale from [`Dimensions`] and
//! [`BorderSpec`]; nothing is mutated incrementally, so identical inputs
//! always produce bit-identical output.

use vello::kurbo::Rect;
use vello::peniko::Color;

/// Widget padding in pixels, as supplied by the host layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Padding {
    /// Left padding.
    pub left: u32,
    /// Top padding.
    pub top: u32,
    /// Right padding.
    pub right: u32,
    /// Bottom padding.
    pub bottom: u32,
}

impl Padding {
    /// No padding on any side.
    pub const ZERO: Self = Self {
        left: 0,
        top: 0,
        right: 0,
        bottom: 0,
    };

    /// The same padding on every side.
    pub fn uniform(value: u32) -> Self {
        Self {
            left: value,
            top: value,
            right: value,
            bottom: value,
        }
    }
}

/// Widget size and padding, immutable per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dimensions {
    /// Widget width in pixels.
    pub width: u32,
    /// Widget height in pixels.
    pub height: u32,
    /// Padding inside the widget bounds.
    pub padding: Padding,
}

impl Dimensions {
    /// Create dimensions with no padding.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            padding: Padding::ZERO,
        }
    }
}

/// Border ring configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct BorderSpec {
    /// Stroke width in pixels.
    pub width: u32,
    /// Stroke color.
    pub color: Color,
    /// If `true` the border overlays the image circle's edge instead of
    /// insetting the image circle beside it.
    pub overlay: bool,
}

impl Default for BorderSpec {
    fn default() -> Self {
        Self {
            width: 0,
            color: Color::BLACK,
            overlay: false,
        }
    }
}

/// Compute the outer bounding square, centered within the padded area.
///
/// The side length is the smaller available dimension. When padding exceeds
/// the widget size the result is degenerate (x1 < x0 or y1 < y0) and every
/// downstream consumer treats it as "nothing to draw".
pub fn calculate_bounds(dims: &Dimensions) -> Rect {
    let available_width = dims.width as i64 - dims.padding.left as i64 - dims.padding.right as i64;
    let available_height = dims.height as i64 - dims.padding.top as i64 - dims.padding.bottom as i64;
    let side_length = available_width.min(available_height);

    let left = dims.padding.left as f64 + (available_width - side_length) as f64 / 2.0;
    let top = dims.padding.top as f64 + (available_height - side_length) as f64 / 2.0;

    Rect::new(left, top, left + side_length as f64, top + side_length as f64)
}

/// Derived circle geometry: the two bounding squares and their radii.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CircleGeometry {
    /// Square bounding the border circle.
    pub outer: Rect,
    /// Square bounding the image circle. Equal to `outer` unless a
    /// non-overlaying border insets it.
    pub inner: Rect,
    /// Radius of the border circle.
    pub border_radius: f64,
    /// Radius of the image circle.
    pub image_radius: f64,
}

impl CircleGeometry {
    /// Derive inner rect and radii from an already-computed outer rect.
    pub fn derive(outer: Rect, border_width: u32, overlay: bool) -> Self {
        let bw = border_width as f64;
        let border_radius = ((outer.height() - bw) / 2.0).min((outer.width() - bw) / 2.0);

        let inner = if !overlay && border_width > 0 {
            // Inset by one less than the border width so the stroke's inner
            // edge lands on the image edge without a hairline seam.
            let d = bw - 1.0;
            Rect::new(outer.x0 + d, outer.y0 + d, outer.x1 - d, outer.y1 - d)
        } else {
            outer
        };

        let image_radius = (inner.height() / 2.0).min(inner.width() / 2.0);

        Self {
            outer,
            inner,
            border_radius,
            image_radius,
        }
    }

    /// Compute the full geometry from dimensions and border configuration.
    pub fn compute(dims: &Dimensions, border: &BorderSpec) -> Self {
        Self::derive(calculate_bounds(dims), border.width, border.overlay)
    }

    /// Whether the outer rect never successfully laid out (zero or negative
    /// size). Matches the fail-open condition of the hit test.
    pub fn is_degenerate(&self) -> bool {
        self.outer.width() <= 0.0 || self.outer.height() <= 0.0
    }
}
