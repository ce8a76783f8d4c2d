//! Paint and configuration value types.
//!
//! The draw pipeline never reads widget fields directly; the adapter rebuilds
//! an immutable [`FramePaint`] from its configuration for every draw and
//! passes it in, so paint state cannot be mutated mid-frame.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use vello::kurbo::Rect;
use vello::peniko::Color;

/// How the source image is fitted into the widget bounds.
///
/// Circular rendering forces [`ScaleMode::CenterCrop`]; every other mode is
/// rejected by the adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleMode {
    /// Center the image without scaling.
    Center,
    /// Scale so the short edge fills the bounds and crop the long edge.
    CenterCrop,
    /// Scale down (never up) so the whole image fits, centered.
    CenterInside,
    /// Scale so the whole image fits, centered.
    FitCenter,
    /// Stretch both axes independently to fill the bounds.
    FitXy,
}

/// An opaque color-transform handle, forwarded verbatim into paint state.
///
/// The core performs no color computation; the handle exists so a host
/// renderer that understands it can pick it up from the per-draw paint.
/// Equality is reference identity, which makes equal-value setter no-op
/// checks cheap and predictable.
#[derive(Clone)]
pub struct ColorTransform(Arc<dyn Any + Send + Sync>);

impl ColorTransform {
    /// Wrap a host-defined color transform value.
    pub fn new(inner: impl Any + Send + Sync) -> Self {
        Self(Arc::new(inner))
    }

    /// Access the wrapped value for downcasting by the host.
    pub fn handle(&self) -> &(dyn Any + Send + Sync) {
        self.0.as_ref()
    }
}

impl PartialEq for ColorTransform {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for ColorTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ColorTransform").finish()
    }
}

/// Immutable paint values for a single draw call.
#[derive(Debug, Clone, PartialEq)]
pub struct FramePaint {
    /// Full widget rect, used only by the disabled-mode rectangular draw.
    pub widget_rect: Rect,
    /// Escape hatch: render the plain rectangular image unmodified.
    pub disabled: bool,
    /// Solid circular background, drawn when non-transparent.
    pub background: Color,
    /// Border stroke width in pixels.
    pub border_width: f64,
    /// Border stroke color.
    pub border_color: Color,
    /// Image paint alpha, 0-255.
    pub image_alpha: u8,
    /// Opaque color-transform handle, passed through untouched.
    pub color_transform: Option<ColorTransform>,
}
