// SPDX-License-Identifier: MIT OR Apache-2.0

//! Image source binding and sampled backing stores.
//!
//! The widget core never owns the semantics of a source, only a sampled RGBA
//! view of it. Static pixel buffers are referenced as-is; flat colors and
//! live-renderable sources are sampled into an owned [`BackingStore`] that
//! the pipeline can re-render when the source reports changed content.

use std::path::Path;

use vello::peniko::{Blob, Color, ImageAlphaType, ImageData, ImageFormat};

use crate::error::Error;

/// Side length of the buffer a flat-color source is sampled into. A solid
/// color needs no resolution; 2x2 keeps the cover-fit math non-degenerate.
pub const SOLID_SOURCE_DIMENSION: u32 = 2;

/// A source whose pixel content can change after binding and which can be
/// re-rendered on demand (an animated or externally-drawn source).
pub trait DynamicSource: Send {
    /// Native size of the rendered content, in pixels.
    fn intrinsic_size(&self) -> (u32, u32);

    /// Render the current content into the store at its native size.
    fn render(&mut self, store: &mut BackingStore) -> Result<(), Error>;
}

/// A source image handed to the widget by its image-providing collaborator.
pub enum ImageSource {
    /// A static RGBA pixel buffer with intrinsic size.
    Buffer(ImageData),
    /// A flat color, sampled into a fixed-size buffer on bind.
    Solid(Color),
    /// A live source, re-rendered into a backing store on content changes.
    Dynamic(Box<dyn DynamicSource>),
}

impl ImageSource {
    /// Build a static source from raw RGBA pixels.
    pub fn from_rgba8(width: u32, height: u32, pixels: impl Into<Vec<u8>>) -> Self {
        Self::Buffer(ImageData {
            data: Blob::from(pixels.into()),
            format: ImageFormat::Rgba8,
            alpha_type: ImageAlphaType::Alpha,
            width,
            height,
        })
    }

    /// Decode an image file into a static source.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        let decoded = image::open(path)?.to_rgba8();
        let (width, height) = decoded.dimensions();
        Ok(Self::from_rgba8(width, height, decoded.into_raw()))
    }
}

/// An owned RGBA canvas a dynamic or flat-color source is sampled into.
///
/// Exclusively owned by the pipeline; recreated whenever the bound source
/// changes.
pub struct BackingStore {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl BackingStore {
    fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 4],
        }
    }

    /// Store width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Store height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Mutable access to the RGBA pixel bytes, row-major.
    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// Fill every pixel with one color.
    pub fn fill(&mut self, color: Color) {
        let rgba = color.to_rgba8();
        for pixel in self.pixels.chunks_exact_mut(4) {
            pixel.copy_from_slice(&[rgba.r, rgba.g, rgba.b, rgba.a]);
        }
    }

    fn to_image_data(&self) -> ImageData {
        ImageData {
            data: Blob::from(self.pixels.clone()),
            format: ImageFormat::Rgba8,
            alpha_type: ImageAlphaType::Alpha,
            width: self.width,
            height: self.height,
        }
    }
}

/// A resolved source: the sampled pixel data the shader reads, plus the live
/// backing store and renderer for sources that support re-sampling.
pub struct BoundImage {
    data: ImageData,
    store: Option<BackingStore>,
    dynamic: Option<Box<dyn DynamicSource>>,
}

impl BoundImage {
    /// Intrinsic size of the sampled data.
    pub fn size(&self) -> (u32, u32) {
        (self.data.width, self.data.height)
    }

    /// The pixel data the image brush samples.
    pub(crate) fn data(&self) -> &ImageData {
        &self.data
    }

    /// Whether a live backing store exists, i.e. content re-sampling is
    /// possible at all.
    pub(crate) fn has_store(&self) -> bool {
        self.store.is_some()
    }

    /// Re-render the current source content into the backing store and
    /// refresh the sampled data from it.
    ///
    /// Returns `Ok(true)` when the data changed and the image brush must be
    /// rebuilt. Static sources without a renderer keep their store content.
    pub(crate) fn resample(&mut self) -> Result<bool, Error> {
        let (Some(dynamic), Some(store)) = (self.dynamic.as_mut(), self.store.as_mut()) else {
            return Ok(false);
        };
        dynamic.render(store)?;
        self.data = store.to_image_data();
        Ok(true)
    }
}

/// Resolve a source into a [`BoundImage`], or `None` when the source cannot
/// produce a drawable buffer. Failures degrade to "no image" with a log line
/// rather than propagating.
pub(crate) fn resolve(source: ImageSource) -> Option<BoundImage> {
    match source {
        ImageSource::Buffer(data) => {
            if data.width == 0 || data.height == 0 {
                log::warn!("circle-image: ignoring zero-size image buffer");
                return None;
            }
            Some(BoundImage {
                data,
                store: None,
                dynamic: None,
            })
        },
        ImageSource::Solid(color) => {
            let mut store = BackingStore::new(SOLID_SOURCE_DIMENSION, SOLID_SOURCE_DIMENSION);
            store.fill(color);
            Some(BoundImage {
                data: store.to_image_data(),
                store: Some(store),
                dynamic: None,
            })
        },
        ImageSource::Dynamic(mut dynamic) => {
            let (width, height) = dynamic.intrinsic_size();
            if width == 0 || height == 0 {
                log::warn!("circle-image: ignoring dynamic source with zero intrinsic size");
                return None;
            }
            let mut store = BackingStore::new(width, height);
            match dynamic.render(&mut store) {
                Ok(()) => Some(BoundImage {
                    data: store.to_image_data(),
                    store: Some(store),
                    dynamic: Some(dynamic),
                }),
                Err(err) => {
                    log::warn!("circle-image: dynamic source failed to render, treating as no image: {err}");
                    None
                },
            }
        },
    }
}
