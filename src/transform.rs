// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cover-fit shader transform derivation.
//!
//! Maps source-image pixel space into a target square so that the short image
//! axis exactly fills the square and the long axis is cropped, centered.

use vello::kurbo::{Affine, Rect, Vec2};

/// Build the scale+translate transform for a centered cover fit of an
/// `image_width` x `image_height` source into `target`.
///
/// The aspect comparison multiplies instead of dividing so a zero dimension on
/// either side cannot divide by zero. The translate offset on the centered
/// axis is snapped to whole pixels with `trunc(d + 0.5)` while the scale stays
/// fractional; the asymmetry is deliberate (it stops sub-pixel shimmer on the
/// dominant axis without quantizing the fit itself).
pub fn cover_transform(image_width: u32, image_height: u32, target: Rect) -> Affine {
    let iw = image_width as f64;
    let ih = image_height as f64;

    let scale;
    let mut dx = 0.0;
    let mut dy = 0.0;

    if iw * target.height() > target.width() * ih {
        // Image is relatively wider than the target: fit height, crop width.
        scale = target.height() / ih;
        dx = (target.width() - iw * scale) * 0.5;
    } else {
        scale = target.width() / iw;
        dy = (target.height() - ih * scale) * 0.5;
    }

    Affine::scale(scale).then_translate(Vec2::new(
        (dx + 0.5).trunc() + target.x0,
        (dy + 0.5).trunc() + target.y0,
    ))
}
