// SPDX-License-Identifier: MIT OR Apache-2.0

//! Widget-state adapter.
//!
//! [`CircleImage`] owns the configuration surface, the derived geometry and
//! the render state, and exposes the handful of entry points a host widget
//! wires up: size/padding callbacks, property setters, pointer gating, the
//! outline query and the draw call. Every mutator applies geometry and dirty
//! flags before returning; the expensive work happens inside [`CircleImage::draw`].

use vello::kurbo::Rect;
use vello::peniko::Color;

use crate::error::Error;
use crate::geometry::{calculate_bounds, BorderSpec, CircleGeometry, Dimensions, Padding};
use crate::hit_test::in_touchable_area;
use crate::outline::{self, Outline};
use crate::paint::{ColorTransform, FramePaint, ScaleMode};
use crate::render::RenderState;
use crate::source::{resolve, ImageSource};
use crate::transform::cover_transform;
use crate::update::Update;
use crate::vgi::Graphics;

const DEFAULT_IMAGE_ALPHA: u8 = u8::MAX;

/// A circular image widget core.
///
/// The host owns layout and event dispatch; this type answers "what do I
/// draw", "is this point touchable" and "what is my clip outline".
pub struct CircleImage {
    dims: Dimensions,
    border: BorderSpec,
    background: Color,
    image_alpha: u8,
    color_transform: Option<ColorTransform>,
    disabled: bool,
    geometry: CircleGeometry,
    render: RenderState,
    pending: Update,
}

impl Default for CircleImage {
    fn default() -> Self {
        Self::new()
    }
}

impl CircleImage {
    /// Create a widget core with the stock defaults: no border, transparent
    /// circle background, opaque image, circular rendering enabled.
    pub fn new() -> Self {
        Self {
            dims: Dimensions::default(),
            border: BorderSpec::default(),
            background: Color::TRANSPARENT,
            image_alpha: DEFAULT_IMAGE_ALPHA,
            color_transform: None,
            disabled: false,
            geometry: CircleGeometry::default(),
            render: RenderState::new(),
            pending: Update::empty(),
        }
    }

    /// Sets the border width and returns itself.
    pub fn with_border_width(mut self, width: u32) -> Self {
        self.set_border_width(width);
        self
    }

    /// Sets the border color and returns itself.
    pub fn with_border_color(mut self, color: Color) -> Self {
        self.set_border_color(color);
        self
    }

    /// Sets the border overlay flag and returns itself.
    pub fn with_border_overlay(mut self, overlay: bool) -> Self {
        self.set_border_overlay(overlay);
        self
    }

    /// Sets the circle background color and returns itself.
    pub fn with_circle_background_color(mut self, color: Color) -> Self {
        self.set_circle_background_color(color);
        self
    }

    /// Binds an image source and returns itself.
    pub fn with_image(mut self, source: ImageSource) -> Self {
        self.set_image(Some(source));
        self
    }

    // --- host layout callbacks -------------------------------------------

    /// Size-changed notification from the host layout pass.
    pub fn set_size(&mut self, width: u32, height: u32) {
        if width == self.dims.width && height == self.dims.height {
            return;
        }
        self.dims.width = width;
        self.dims.height = height;
        self.update_dimensions();
        self.request_draw();
    }

    /// Padding change from the host.
    pub fn set_padding(&mut self, padding: Padding) {
        if padding == self.dims.padding {
            return;
        }
        self.dims.padding = padding;
        self.update_dimensions();
        self.request_draw();
    }

    // --- configuration setters -------------------------------------------

    /// Set the border stroke width in pixels.
    pub fn set_border_width(&mut self, width: u32) {
        if width == self.border.width {
            return;
        }
        self.border.width = width;
        self.update_dimensions();
        self.request_draw();
    }

    /// Set the border stroke color.
    pub fn set_border_color(&mut self, color: Color) {
        if color == self.border.color {
            return;
        }
        self.border.color = color;
        self.request_draw();
    }

    /// Set whether the border overlays the image circle instead of insetting it.
    pub fn set_border_overlay(&mut self, overlay: bool) {
        if overlay == self.border.overlay {
            return;
        }
        self.border.overlay = overlay;
        self.update_dimensions();
        self.request_draw();
    }

    /// Set the solid circular background shown behind (or instead of) the image.
    pub fn set_circle_background_color(&mut self, color: Color) {
        if color == self.background {
            return;
        }
        self.background = color;
        self.request_draw();
    }

    /// Set the image paint alpha. Only the low byte is meaningful.
    pub fn set_image_alpha(&mut self, alpha: u32) {
        let alpha = (alpha & 0xFF) as u8;
        if alpha == self.image_alpha {
            return;
        }
        self.image_alpha = alpha;
        self.request_draw();
    }

    /// Forward an opaque color-transform handle into the paint state.
    /// Compared by reference identity, like the rest of the setters.
    pub fn set_color_transform(&mut self, transform: Option<ColorTransform>) {
        if transform == self.color_transform {
            return;
        }
        self.color_transform = transform;
        self.request_draw();
    }

    /// Toggle the escape hatch that renders the plain rectangular image.
    pub fn set_disable_circular_transformation(&mut self, disabled: bool) {
        if disabled == self.disabled {
            return;
        }
        self.disabled = disabled;
        if disabled {
            self.render.clear_shader();
        } else {
            self.update_shader_matrix();
        }
        self.request_draw();
    }

    /// Only [`ScaleMode::CenterCrop`] is compatible with circular rendering;
    /// anything else is an integration error and is rejected.
    pub fn set_scale_mode(&mut self, mode: ScaleMode) -> Result<(), Error> {
        if mode != ScaleMode::CenterCrop {
            log::warn!("circle-image: rejecting unsupported scale mode {mode:?}");
            return Err(Error::UnsupportedScaleMode(mode));
        }
        Ok(())
    }

    /// Bind a new image source, or unbind with `None`.
    pub fn set_image(&mut self, source: Option<ImageSource>) {
        self.render.bind_image(source.and_then(resolve));
        self.update_shader_matrix();
        self.request_draw();
    }

    /// Content-changed notification from a live source; re-sampled on the
    /// next draw.
    pub fn notify_content_changed(&mut self) {
        self.render.mark_content_stale();
        self.request_draw();
    }

    // --- getters ----------------------------------------------------------

    /// Current border stroke width.
    pub fn border_width(&self) -> u32 {
        self.border.width
    }

    /// Current border stroke color.
    pub fn border_color(&self) -> Color {
        self.border.color
    }

    /// Whether the border overlays the image circle.
    pub fn border_overlay(&self) -> bool {
        self.border.overlay
    }

    /// Current circle background color.
    pub fn circle_background_color(&self) -> Color {
        self.background
    }

    /// Current image paint alpha.
    pub fn image_alpha(&self) -> u8 {
        self.image_alpha
    }

    /// The forwarded color-transform handle, if any.
    pub fn color_transform(&self) -> Option<&ColorTransform> {
        self.color_transform.as_ref()
    }

    /// Whether circular rendering is disabled.
    pub fn is_circular_transformation_disabled(&self) -> bool {
        self.disabled
    }

    /// The fixed scale mode.
    pub fn scale_mode(&self) -> ScaleMode {
        ScaleMode::CenterCrop
    }

    /// Whether an image is bound.
    pub fn has_image(&self) -> bool {
        self.render.has_image()
    }

    /// Derived circle geometry for the current dimensions and border.
    pub fn geometry(&self) -> &CircleGeometry {
        &self.geometry
    }

    // --- outputs ----------------------------------------------------------

    /// Draw one frame.
    pub fn draw(&mut self, graphics: &mut dyn Graphics) {
        let paint = FramePaint {
            widget_rect: Rect::new(0.0, 0.0, self.dims.width as f64, self.dims.height as f64),
            disabled: self.disabled,
            background: self.background,
            border_width: self.border.width as f64,
            border_color: self.border.color,
            image_alpha: self.image_alpha,
            color_transform: self.color_transform.clone(),
        };
        self.render.draw(graphics, &self.geometry, &paint);
    }

    /// Whether a pointer event at widget-local `(x, y)` should be delivered.
    pub fn should_deliver_pointer(&self, x: f64, y: f64) -> bool {
        if self.disabled {
            return true;
        }
        in_touchable_area(x, y, &self.geometry.outer, self.geometry.border_radius)
    }

    /// Clip/shadow outline for the host compositor.
    pub fn outline(&self) -> Outline {
        outline::compute(self.geometry.outer, self.disabled)
    }

    /// Drain the accumulated host update request.
    pub fn take_update(&mut self) -> Update {
        std::mem::replace(&mut self.pending, Update::empty())
    }

    // --- internals --------------------------------------------------------

    fn request_draw(&mut self) {
        self.pending.insert(Update::DRAW);
    }

    fn update_dimensions(&mut self) {
        self.geometry = CircleGeometry::derive(
            calculate_bounds(&self.dims),
            self.border.width,
            self.border.overlay,
        );
        self.update_shader_matrix();
    }

    fn update_shader_matrix(&mut self) {
        match self.render.image_size() {
            Some((width, height)) => {
                let transform = cover_transform(width, height, self.geometry.inner);
                self.render.set_shader_transform(transform);
            },
            None => self.render.clear_shader(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view_with_image() -> CircleImage {
        let mut view = CircleImage::new();
        view.set_size(100, 100);
        view.set_image(Some(ImageSource::from_rgba8(8, 8, vec![0u8; 8 * 8 * 4])));
        view.take_update();
        view
    }

    #[test]
    fn defaults_match_stock_configuration() {
        let view = CircleImage::new();
        assert_eq!(view.border_width(), 0);
        assert_eq!(view.border_color(), Color::BLACK);
        assert!(!view.border_overlay());
        assert_eq!(view.circle_background_color(), Color::TRANSPARENT);
        assert_eq!(view.image_alpha(), 255);
        assert!(!view.is_circular_transformation_disabled());
        assert!(!view.has_image());
    }

    #[test]
    fn equal_value_setters_are_no_ops() {
        let mut view = view_with_image();

        view.set_border_width(0);
        view.set_border_color(Color::BLACK);
        view.set_border_overlay(false);
        view.set_circle_background_color(Color::TRANSPARENT);
        view.set_image_alpha(255);
        view.set_color_transform(None);
        view.set_disable_circular_transformation(false);
        view.set_size(100, 100);
        view.set_padding(Padding::ZERO);

        assert!(view.take_update().is_empty());
    }

    #[test]
    fn mutating_setters_request_a_draw_once() {
        let mut view = view_with_image();
        view.set_border_width(4);
        view.set_border_color(Color::WHITE);
        assert_eq!(view.take_update(), Update::DRAW);
        assert!(view.take_update().is_empty());
    }

    #[test]
    fn image_alpha_masks_to_low_byte() {
        let mut view = view_with_image();
        view.set_image_alpha(300);
        assert_eq!(view.image_alpha(), 300u32 as u8);
        assert_eq!(view.take_update(), Update::DRAW);

        // Same low byte again: no-op.
        view.set_image_alpha(300 + 256);
        assert!(view.take_update().is_empty());
    }

    #[test]
    fn border_width_change_recomputes_geometry() {
        let mut view = view_with_image();
        view.set_border_width(10);
        let geometry = *view.geometry();
        assert_eq!(geometry.inner, Rect::new(9.0, 9.0, 91.0, 91.0));
        assert_eq!(geometry.border_radius, 45.0);
        assert_eq!(geometry.image_radius, 41.0);

        view.set_border_overlay(true);
        assert_eq!(view.geometry().inner, view.geometry().outer);
    }

    #[test]
    fn unsupported_scale_modes_are_rejected() {
        let mut view = CircleImage::new();
        assert!(view.set_scale_mode(ScaleMode::CenterCrop).is_ok());
        assert!(matches!(
            view.set_scale_mode(ScaleMode::FitCenter),
            Err(Error::UnsupportedScaleMode(ScaleMode::FitCenter))
        ));
        assert_eq!(view.scale_mode(), ScaleMode::CenterCrop);
    }

    #[test]
    fn pointer_gating_uses_border_circle() {
        let mut view = view_with_image();
        assert!(view.should_deliver_pointer(50.0, 50.0));
        assert!(view.should_deliver_pointer(100.0, 50.0));
        assert!(!view.should_deliver_pointer(2.0, 2.0));

        view.set_disable_circular_transformation(true);
        assert!(view.should_deliver_pointer(2.0, 2.0));
    }

    #[test]
    fn pointer_gating_fails_open_before_layout() {
        let view = CircleImage::new();
        assert!(view.should_deliver_pointer(-50.0, 900.0));
    }

    #[test]
    fn outline_follows_disable_flag() {
        let mut view = view_with_image();
        assert!(matches!(view.outline(), Outline::Circle(_)));
        view.set_disable_circular_transformation(true);
        assert_eq!(view.outline(), Outline::Default);
    }

    #[test]
    fn content_notification_marks_pipeline_and_requests_draw() {
        let mut view = view_with_image();
        view.notify_content_changed();
        assert_eq!(view.take_update(), Update::DRAW);
    }

    #[test]
    fn binding_an_image_builds_the_shader_transform() {
        let mut view = CircleImage::new();
        view.set_size(100, 100);
        view.take_update();
        view.set_image(Some(ImageSource::from_rgba8(8, 8, vec![0u8; 8 * 8 * 4])));
        assert!(view.has_image());
        assert_eq!(view.take_update(), Update::DRAW);
    }

    #[test]
    fn unbinding_clears_the_image() {
        let mut view = view_with_image();
        view.set_image(None);
        assert!(!view.has_image());
        assert_eq!(view.take_update(), Update::DRAW);
    }

    #[test]
    fn color_transform_round_trips_by_identity() {
        let mut view = view_with_image();
        let handle = ColorTransform::new(0xDEAD_BEEFu32);
        view.set_color_transform(Some(handle.clone()));
        assert_eq!(view.take_update(), Update::DRAW);
        assert_eq!(view.color_transform(), Some(&handle));

        // Same handle again: no-op.
        view.set_color_transform(Some(handle));
        assert!(view.take_update().is_empty());

        // A different handle wrapping the same value is a new identity.
        view.set_color_transform(Some(ColorTransform::new(0xDEAD_BEEFu32)));
        assert_eq!(view.take_update(), Update::DRAW);
    }
}
