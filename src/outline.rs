// SPDX-License-Identifier: MIT OR Apache-2.0

//! Clip/shadow outline computation for the host compositor.

use vello::kurbo::{Rect, RoundedRect, RoundedRectRadii};

/// Shape descriptor the host compositor uses for elevation shadows and,
/// where supported, content clipping.
#[derive(Debug, Clone, PartialEq)]
pub enum Outline {
    /// Defer to the host's default background-shaped outline.
    Default,
    /// A circular clip: a square rounded at half its side.
    Circle(RoundedRect),
}

/// Compute the outline for the current outer rect.
///
/// The outer rect is rounded outward to integer bounds first so the clip
/// never cuts into the anti-aliased border edge.
pub fn compute(outer: Rect, disabled: bool) -> Outline {
    if disabled {
        return Outline::Default;
    }

    let bounds = outer.expand();
    Outline::Circle(RoundedRect::from_rect(
        bounds,
        RoundedRectRadii::from_single_radius(bounds.width() / 2.0),
    ))
}
