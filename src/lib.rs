#![warn(missing_docs)]

//! Circular image widget core.
//!
//! A framework-agnostic module set that renders a rectangular source image
//! clipped into a circle, with an optional border ring and background fill,
//! plus circular hit-testing and a compositor outline. A thin adapter
//! ([`CircleImage`]) wires the modules into whatever host widget base is used;
//! nothing here depends on a particular toolkit.

pub use vello as vg;

/// Contains the library error type.
pub mod error;

/// Contains bounds and radius computation for the image and border circles.
pub mod geometry;


/// Contains the clip/shadow outline computation for the host compositor.
pub mod outline;

/// Contains per-draw paint values and configuration value types.
pub mod paint;

/// Contains the dirty-flag-driven draw pipeline.
pub mod render;

/// Contains image source binding and sampled backing stores.
pub mod source;

/// Contains the cover-fit shader transform derivation.
pub mod transform;

/// Contains host-facing redraw request flags.
pub mod update;

/// Contains the vector graphics interface abstraction.
pub mod vgi;

/// Contains the widget-state adapter tying the modules together.
pub mod view;

pub use error::Error;
pub use view::CircleImage;
