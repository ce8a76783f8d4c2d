//! End-to-end pipeline test: configuration changes, draw-order verification
//! and pointer gating through the public adapter surface.

use circle_image::geometry::Padding;
use circle_image::outline::Outline;
use circle_image::source::{BackingStore, DynamicSource, ImageSource};
use circle_image::update::Update;
use circle_image::vg::kurbo::{Affine, BezPath, Stroke};
use circle_image::vg::peniko::{Brush, Color, Fill, Mix};
use circle_image::vgi::Graphics;
use circle_image::{CircleImage, Error};

#[derive(Debug, PartialEq)]
enum Op {
    SolidFill,
    ImageFill,
    Stroke,
    PushLayer,
    PopLayer,
}

#[derive(Default)]
struct Recorder {
    ops: Vec<Op>,
}

impl Graphics for Recorder {
    fn fill(
        &mut self,
        _fill_rule: Fill,
        _transform: Affine,
        brush: &Brush,
        _brush_transform: Option<Affine>,
        _shape: &BezPath,
    ) {
        self.ops.push(match brush {
            Brush::Solid(_) => Op::SolidFill,
            _ => Op::ImageFill,
        });
    }

    fn stroke(
        &mut self,
        _style: &Stroke,
        _transform: Affine,
        _brush: &Brush,
        _brush_transform: Option<Affine>,
        _shape: &BezPath,
    ) {
        self.ops.push(Op::Stroke);
    }

    fn push_layer(&mut self, _mix: Mix, _alpha: f32, _transform: Affine, _clip: &BezPath) {
        self.ops.push(Op::PushLayer);
    }

    fn pop_layer(&mut self) {
        self.ops.push(Op::PopLayer);
    }
}

struct Ticker {
    tick: u8,
}

impl DynamicSource for Ticker {
    fn intrinsic_size(&self) -> (u32, u32) {
        (16, 16)
    }

    fn render(&mut self, store: &mut BackingStore) -> Result<(), Error> {
        self.tick = self.tick.wrapping_add(1);
        let tick = self.tick;
        for pixel in store.pixels_mut().chunks_exact_mut(4) {
            pixel.copy_from_slice(&[tick, 0, 0, 255]);
        }
        Ok(())
    }
}

#[test]
fn full_frame_draws_background_image_and_border() {
    let mut view = CircleImage::new()
        .with_border_width(10)
        .with_border_color(Color::WHITE)
        .with_circle_background_color(Color::from_rgb8(30, 30, 30))
        .with_image(ImageSource::from_rgba8(64, 32, vec![0u8; 64 * 32 * 4]));
    view.set_size(100, 100);
    assert!(view.take_update().draw_requested());

    let mut recorder = Recorder::default();
    view.draw(&mut recorder);
    assert_eq!(
        recorder.ops,
        vec![Op::SolidFill, Op::ImageFill, Op::Stroke]
    );
}

#[test]
fn burst_of_mutations_coalesces_into_one_update() {
    let mut view = CircleImage::new();
    view.set_size(200, 100);
    view.set_border_width(4);
    view.set_border_overlay(true);
    view.set_circle_background_color(Color::WHITE);
    assert_eq!(view.take_update(), Update::DRAW);
    assert!(view.take_update().is_empty());
}

#[test]
fn live_source_resamples_once_per_notification() {
    let mut view = CircleImage::new().with_image(ImageSource::Dynamic(Box::new(Ticker { tick: 0 })));
    view.set_size(64, 64);

    let mut recorder = Recorder::default();
    view.draw(&mut recorder);
    assert_eq!(recorder.ops, vec![Op::ImageFill]);

    // Redraw without a content notification: no re-sample, same single fill.
    view.draw(&mut recorder);
    assert_eq!(recorder.ops.len(), 2);

    view.notify_content_changed();
    assert!(view.take_update().draw_requested());
    view.draw(&mut recorder);
    assert_eq!(recorder.ops.len(), 3);
}

#[test]
fn disable_flag_switches_every_surface_to_rectangular() {
    let mut view = CircleImage::new()
        .with_border_width(6)
        .with_image(ImageSource::Solid(Color::from_rgb8(200, 10, 10)));
    view.set_size(120, 80);
    view.set_disable_circular_transformation(true);

    // Draw: plain rect image only, no background circle, no border ring.
    let mut recorder = Recorder::default();
    view.draw(&mut recorder);
    assert_eq!(recorder.ops, vec![Op::ImageFill]);

    // Hit test: full rect is touchable, even the corners.
    assert!(view.should_deliver_pointer(1.0, 1.0));
    assert!(view.should_deliver_pointer(119.0, 79.0));

    // Outline: host default.
    assert_eq!(view.outline(), Outline::Default);

    // Re-enabling restores circular behavior.
    view.set_disable_circular_transformation(false);
    assert!(matches!(view.outline(), Outline::Circle(_)));
    assert!(!view.should_deliver_pointer(1.0, 1.0));
}

#[test]
fn padded_non_square_widget_gates_pointers_on_the_centered_circle() {
    let mut view = CircleImage::new();
    view.set_size(200, 100);
    view.set_padding(Padding::uniform(10));

    // Outer square is [60, 10, 140, 90]; center (100, 50), radius 40.
    assert!(view.should_deliver_pointer(100.0, 50.0));
    assert!(view.should_deliver_pointer(140.0, 50.0));
    assert!(!view.should_deliver_pointer(141.0, 50.0));
    assert!(!view.should_deliver_pointer(65.0, 15.0));
}

#[test]
fn vello_scene_implements_the_graphics_interface() {
    let mut scene = circle_image::vg::Scene::new();
    let mut view = CircleImage::new()
        .with_border_width(2)
        .with_image(ImageSource::from_rgba8(4, 4, vec![255u8; 4 * 4 * 4]));
    view.set_size(32, 32);
    view.draw(&mut scene);
}
