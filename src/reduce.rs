use image::imageops::{self, FilterType};
use image::RgbaImage;
use thiserror::Error;

use crate::model::Rgb;

pub const CANVAS_SIZE: u32 = 200;
pub const PIXEL_COUNT: u64 = CANVAS_SIZE as u64 * CANVAS_SIZE as u64;
pub const RESAMPLING_FILTER: FilterType = FilterType::Triangle;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("image could not be decoded: {0}")]
    Image(#[from] image::ImageError),
    #[error("image has no pixels ({width}x{height})")]
    Empty { width: u32, height: u32 },
}

pub struct ColorReducer;

impl ColorReducer {
    pub fn reduce(bytes: &[u8]) -> Result<Rgb, DecodeError> {
        let decoded = image::load_from_memory(bytes)?;
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        if width == 0 || height == 0 {
            return Err(DecodeError::Empty { width, height });
        }
        log::debug!("decoded {}x{} image from {} bytes", width, height, bytes.len());

        let canvas = Self::draw_canvas(rgba);
        Ok(Self::average(&canvas))
    }

    pub fn draw_canvas(image: RgbaImage) -> RgbaImage {
        if image.dimensions() == (CANVAS_SIZE, CANVAS_SIZE) {
            return image;
        }
        imageops::resize(&image, CANVAS_SIZE, CANVAS_SIZE, RESAMPLING_FILTER)
    }

    pub fn average(canvas: &RgbaImage) -> Rgb {
        let count = canvas.width() as u64 * canvas.height() as u64;
        if count == 0 {
            return Rgb::default();
        }

        let (mut r, mut g, mut b) = (0u64, 0u64, 0u64);
        for pixel in canvas.pixels() {
            let [pr, pg, pb, _alpha] = pixel.0;
            r += pr as u64;
            g += pg as u64;
            b += pb as u64;
        }

        Rgb::new(
            mean_channel(r, count),
            mean_channel(g, count),
            mean_channel(b, count),
        )
    }
}

// Round half away from zero; sums are non-negative so this is (2s + n) / 2n.
fn mean_channel(sum: u64, count: u64) -> u8 {
    let rounded = (2 * sum + count) / (2 * count);
    rounded.min(u8::MAX as u64) as u8
}
