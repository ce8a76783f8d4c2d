//! Vector graphics interface abstraction.
//!
//! The draw pipeline issues fills and strokes through this trait instead of a
//! concrete backend, so it can be exercised in tests with a recording
//! implementation and driven by any vello-compatible scene in production.
//!
//! Note: methods take `&BezPath` for object-safety. Convert concrete shape
//! types (Circle, Rect, RoundedRect, ...) with [`shape_to_path`].

use vello::kurbo::{Affine, BezPath, Shape, Stroke};
use vello::peniko::{Brush, Fill, Mix};
use vello::Scene;

/// A trait for rendering vector graphics.
pub trait Graphics {
    /// Fill a shape with the given brush. `brush_transform` is the brush's
    /// local transform (the shader matrix for image brushes).
    fn fill(
        &mut self,
        fill_rule: Fill,
        transform: Affine,
        brush: &Brush,
        brush_transform: Option<Affine>,
        shape: &BezPath,
    );

    /// Stroke a shape with the given brush.
    fn stroke(
        &mut self,
        style: &Stroke,
        transform: Affine,
        brush: &Brush,
        brush_transform: Option<Affine>,
        shape: &BezPath,
    );

    /// Push a clipped blend layer. Used to apply a uniform alpha over the
    /// image circle.
    fn push_layer(&mut self, mix: Mix, alpha: f32, transform: Affine, clip: &BezPath);

    /// Pop the most recent layer.
    fn pop_layer(&mut self);
}

/// Convert a shape to a `BezPath` for use with [`Graphics`].
pub fn shape_to_path(shape: &impl Shape) -> BezPath {
    shape.to_path(0.1)
}

impl Graphics for Scene {
    fn fill(
        &mut self,
        fill_rule: Fill,
        transform: Affine,
        brush: &Brush,
        brush_transform: Option<Affine>,
        shape: &BezPath,
    ) {
        Scene::fill(self, fill_rule, transform, brush, brush_transform, shape);
    }

    fn stroke(
        &mut self,
        style: &Stroke,
        transform: Affine,
        brush: &Brush,
        brush_transform: Option<Affine>,
        shape: &BezPath,
    ) {
        Scene::stroke(self, style, transform, brush, brush_transform, shape);
    }

    fn push_layer(&mut self, mix: Mix, alpha: f32, transform: Affine, clip: &BezPath) {
        Scene::push_layer(self, mix, alpha, transform, clip);
    }

    fn pop_layer(&mut self) {
        Scene::pop_layer(self);
    }
}
