use exporter_core::{PageSlice, RasterSurface};
use image::{imageops, Rgba, RgbaImage};

/// [`RasterSurface`] backed by an in-memory RGBA image buffer.
#[derive(Debug, Clone)]
pub struct ImageSurface {
    image: RgbaImage,
}

impl ImageSurface {
    pub fn new(image: RgbaImage) -> Self {
        Self { image }
    }

    /// All-white surface, the background the renderer draws on.
    pub fn blank(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255])),
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Copies one slice's band out of the surface.
    pub fn crop(&self, slice: &PageSlice) -> RgbaImage {
        imageops::crop_imm(
            &self.image,
            0,
            slice.source_y_start,
            self.image.width(),
            slice.source_height,
        )
        .to_image()
    }
}

impl RasterSurface for ImageSurface {
    fn width(&self) -> u32 {
        self.image.width()
    }

    fn height(&self) -> u32 {
        self.image.height()
    }

    fn rgba(&self, x: u32, y: u32) -> [u8; 4] {
        self.image.get_pixel(x, y).0
    }
}
