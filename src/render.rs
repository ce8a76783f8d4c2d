// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dirty-flag-driven draw pipeline.
//!
//! Mutators only mark work; the expensive steps (rebuilding the image brush,
//! re-sampling a live source) run lazily at the start of the draw that
//! consumes them, so a burst of geometry changes between frames collapses
//! into a single rebuild.

use bitflags::bitflags;
use vello::kurbo::{Affine, Circle, Stroke};
use vello::peniko::{Brush, Color, Fill, ImageBrush, Mix};

use crate::geometry::CircleGeometry;
use crate::paint::FramePaint;
use crate::source::BoundImage;
use crate::transform::cover_transform;
use crate::vgi::{shape_to_path, Graphics};

bitflags! {
    /// Edge-triggered markers for deferred work. Set by mutators, cleared
    /// exactly once by the draw that performs the work; setting repeatedly
    /// before a draw collapses to one rebuild.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct DirtyFlags: u8 {
        /// The shader transform changed; the image brush must be rebuilt and
        /// rebound before the next draw.
        const SHADER = 0b0001;
        /// The live source's pixel content may have changed since the last
        /// draw and must be re-sampled.
        const CONTENT = 0b0010;
    }
}

/// Render state: the bound image, its cached brush, the shader transform and
/// the dirty flags. Drawing mutates only the brush binding and the backing
/// store's pixels, never geometry.
pub struct RenderState {
    bound: Option<BoundImage>,
    brush: Option<Brush>,
    shader_transform: Option<Affine>,
    dirty: DirtyFlags,
}

impl Default for RenderState {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderState {
    /// Create an empty render state with no image bound.
    pub fn new() -> Self {
        Self {
            bound: None,
            brush: None,
            shader_transform: None,
            dirty: DirtyFlags::empty(),
        }
    }

    /// Replace the bound image. Drops the cached brush; the caller is
    /// expected to rebuild the shader transform next.
    pub(crate) fn bind_image(&mut self, bound: Option<BoundImage>) {
        self.bound = bound;
        self.brush = None;
    }

    /// Whether an image is currently bound.
    pub fn has_image(&self) -> bool {
        self.bound.is_some()
    }

    /// Intrinsic size of the bound image, if any.
    pub fn image_size(&self) -> Option<(u32, u32)> {
        self.bound.as_ref().map(|bound| bound.size())
    }

    /// Install a freshly built shader transform and mark the brush stale.
    pub(crate) fn set_shader_transform(&mut self, transform: Affine) {
        self.shader_transform = Some(transform);
        self.dirty.insert(DirtyFlags::SHADER);
    }

    /// Clear the shader input entirely (no image, or circular rendering was
    /// just disabled).
    pub(crate) fn clear_shader(&mut self) {
        self.shader_transform = None;
        self.brush = None;
    }

    /// Note that the live source's content changed.
    pub(crate) fn mark_content_stale(&mut self) {
        self.dirty.insert(DirtyFlags::CONTENT);
    }

    /// Current dirty flags (mainly for tests and diagnostics).
    pub fn dirty(&self) -> DirtyFlags {
        self.dirty
    }

    /// Run the per-frame state machine against `graphics`.
    pub fn draw(&mut self, graphics: &mut dyn Graphics, geometry: &CircleGeometry, paint: &FramePaint) {
        if paint.disabled {
            self.draw_default(graphics, paint);
            return;
        }

        if paint.background != Color::TRANSPARENT && geometry.image_radius > 0.0 {
            let circle = Circle::new(geometry.inner.center(), geometry.image_radius);
            graphics.fill(
                Fill::NonZero,
                Affine::IDENTITY,
                &Brush::Solid(paint.background),
                None,
                &shape_to_path(&circle),
            );
        }

        if self.bound.is_some() {
            self.refresh_content();
            self.refresh_brush();
            self.draw_image_circle(graphics, geometry, paint);
        }

        if paint.border_width > 0.0 && geometry.border_radius > 0.0 {
            let circle = Circle::new(geometry.outer.center(), geometry.border_radius);
            graphics.stroke(
                &Stroke::new(paint.border_width),
                Affine::IDENTITY,
                &Brush::Solid(paint.border_color),
                None,
                &shape_to_path(&circle),
            );
        }
    }

    /// Step 3a: re-sample a live source. The flag is only consumed when a
    /// backing store exists; a static buffer keeps it pending, mirroring the
    /// original's mutable-bitmap gate.
    fn refresh_content(&mut self) {
        let Some(bound) = self.bound.as_mut() else {
            return;
        };
        if !self.dirty.contains(DirtyFlags::CONTENT) || !bound.has_store() {
            return;
        }
        self.dirty.remove(DirtyFlags::CONTENT);
        match bound.resample() {
            Ok(true) => {
                // Fresh pixel blob: the cached brush now samples stale data.
                self.brush = None;
                self.dirty.insert(DirtyFlags::SHADER);
            },
            Ok(false) => {},
            Err(err) => {
                log::warn!("circle-image: re-sampling live source failed, keeping last frame: {err}");
            },
        }
    }

    /// Step 3b: rebuild the clamped sampling brush with the current shader
    /// transform. This is the expensive step the dirty flag defers.
    fn refresh_brush(&mut self) {
        if !self.dirty.contains(DirtyFlags::SHADER) {
            return;
        }
        self.dirty.remove(DirtyFlags::SHADER);
        let Some(bound) = self.bound.as_ref() else {
            return;
        };
        // ImageBrush samples with Extend::Pad on both axes by default, i.e.
        // clamped, no repeat and no mirror.
        self.brush = Some(Brush::Image(ImageBrush::new(bound.data().clone())));
    }

    /// Step 3c: fill the image circle with the shader-backed brush.
    fn draw_image_circle(
        &self,
        graphics: &mut dyn Graphics,
        geometry: &CircleGeometry,
        paint: &FramePaint,
    ) {
        let (Some(brush), Some(transform)) = (self.brush.as_ref(), self.shader_transform) else {
            return;
        };
        if geometry.image_radius <= 0.0 {
            return;
        }

        let circle = shape_to_path(&Circle::new(geometry.inner.center(), geometry.image_radius));
        let layered = paint.image_alpha < u8::MAX;
        if layered {
            graphics.push_layer(
                Mix::Normal,
                paint.image_alpha as f32 / 255.0,
                Affine::IDENTITY,
                &circle,
            );
        }
        graphics.fill(Fill::NonZero, Affine::IDENTITY, brush, Some(transform), &circle);
        if layered {
            graphics.pop_layer();
        }
    }

    /// Escape-hatch path: the stock rectangular draw, cover-fitted to the
    /// full widget rect with no circular mask.
    fn draw_default(&mut self, graphics: &mut dyn Graphics, paint: &FramePaint) {
        let Some(bound) = self.bound.as_ref() else {
            return;
        };
        let rect = paint.widget_rect;
        if rect.width() <= 0.0 || rect.height() <= 0.0 {
            return;
        }

        let (width, height) = bound.size();
        let transform = cover_transform(width, height, rect);
        let brush = Brush::Image(ImageBrush::new(bound.data().clone()));
        let path = shape_to_path(&rect);

        let layered = paint.image_alpha < u8::MAX;
        if layered {
            graphics.push_layer(
                Mix::Normal,
                paint.image_alpha as f32 / 255.0,
                Affine::IDENTITY,
                &path,
            );
        }
        graphics.fill(Fill::NonZero, Affine::IDENTITY, &brush, Some(transform), &path);
        if layered {
            graphics.pop_layer();
        }
    }
}
