//! Raster decode and resize, behind the [`ImageResizer`] trait so the
//! pipeline can be driven with in-memory fixtures.

use crate::error::{PatternError, Result};
use crate::model::PixelGrid;
use image::imageops::FilterType;
use image::{ImageReader, Rgb, RgbImage};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Cursor;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResamplingFilter {
    Nearest,
    Bilinear,
    Lanczos,
}

impl ResamplingFilter {
    pub fn as_str(self) -> &'static str {
        match self {
            ResamplingFilter::Nearest => "nearest",
            ResamplingFilter::Bilinear => "bilinear",
            ResamplingFilter::Lanczos => "lanczos",
        }
    }

    fn filter_type(self) -> FilterType {
        match self {
            ResamplingFilter::Nearest => FilterType::Nearest,
            ResamplingFilter::Bilinear => FilterType::Triangle,
            ResamplingFilter::Lanczos => FilterType::Lanczos3,
        }
    }
}

impl fmt::Display for ResamplingFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResamplingFilter {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nearest" => Ok(ResamplingFilter::Nearest),
            "bilinear" => Ok(ResamplingFilter::Bilinear),
            "lanczos" => Ok(ResamplingFilter::Lanczos),
            other => Err(PatternError::InvalidParameter(format!(
                "unknown resampling filter '{}'",
                other
            ))),
        }
    }
}

pub trait ImageResizer: Send + Sync {
    /// Decode `bytes` and resize to exactly `width` x `height`.
    fn load_and_resize(
        &self,
        bytes: &[u8],
        width: u32,
        height: u32,
        filter: ResamplingFilter,
    ) -> Result<PixelGrid>;

    /// Source dimensions, read from the image header without decoding
    /// pixel data.
    fn image_size(&self, bytes: &[u8]) -> Result<(u32, u32)>;
}

/// [`ImageResizer`] backed by the `image` crate. Transparent pixels are
/// composited over white.
#[derive(Debug, Clone, Copy, Default)]
pub struct RasterResizer;

impl RasterResizer {
    fn decode_rgb(bytes: &[u8]) -> Result<RgbImage> {
        let img = image::load_from_memory(bytes)
            .map_err(|e| PatternError::InvalidImage(format!("Failed to decode image: {}", e)))?;
        let rgba = img.to_rgba8();

        let rgb = RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
            let p = rgba.get_pixel(x, y);
            // Alpha blend with white background
            let a = p[3] as f32 / 255.0;
            let r = (p[0] as f32 * a + 255.0 * (1.0 - a)) as u8;
            let g = (p[1] as f32 * a + 255.0 * (1.0 - a)) as u8;
            let b = (p[2] as f32 * a + 255.0 * (1.0 - a)) as u8;
            Rgb([r, g, b])
        });
        Ok(rgb)
    }
}

impl ImageResizer for RasterResizer {
    fn load_and_resize(
        &self,
        bytes: &[u8],
        width: u32,
        height: u32,
        filter: ResamplingFilter,
    ) -> Result<PixelGrid> {
        if width == 0 || height == 0 {
            return Err(PatternError::InvalidDimensions(format!(
                "target size must be positive, got {}x{}",
                width, height
            )));
        }

        let rgb = Self::decode_rgb(bytes)?;
        let resized = if rgb.width() == width && rgb.height() == height {
            rgb
        } else {
            image::imageops::resize(&rgb, width, height, filter.filter_type())
        };

        let pixels = resized.pixels().map(|p| p.0).collect();
        PixelGrid::new(width as usize, height as usize, pixels)
    }

    fn image_size(&self, bytes: &[u8]) -> Result<(u32, u32)> {
        let (width, height) = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| PatternError::InvalidImage(format!("Failed to guess image format: {}", e)))?
            .into_dimensions()?;
        Ok((width, height))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use image::{ImageFormat, RgbaImage};

    pub(crate) fn png_bytes(img: &RgbaImage) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png)
            .expect("PNG encoding should succeed");
        out.into_inner()
    }

    #[test]
    fn parses_filter_names() {
        assert_eq!(
            "Lanczos".parse::<ResamplingFilter>().expect("valid"),
            ResamplingFilter::Lanczos
        );
        assert_eq!(ResamplingFilter::Nearest.to_string(), "nearest");
        assert!("bicubic".parse::<ResamplingFilter>().is_err());
    }

    #[test]
    fn resizes_to_exact_target() {
        let img = RgbaImage::from_fn(20, 10, |x, _| {
            if x < 10 {
                image::Rgba([255, 0, 0, 255])
            } else {
                image::Rgba([0, 0, 255, 255])
            }
        });
        let bytes = png_bytes(&img);
        let grid = RasterResizer
            .load_and_resize(&bytes, 4, 2, ResamplingFilter::Nearest)
            .expect("resize should succeed");

        assert_eq!((grid.width(), grid.height()), (4, 2));
        assert_eq!(grid.get(0, 0), Some([255, 0, 0]));
        assert_eq!(grid.get(3, 1), Some([0, 0, 255]));
        assert_eq!(RasterResizer.image_size(&bytes).expect("size"), (20, 10));
    }

    #[test]
    fn transparent_pixels_become_white() {
        let img = RgbaImage::from_pixel(2, 2, image::Rgba([0, 0, 0, 0]));
        let grid = RasterResizer
            .load_and_resize(&png_bytes(&img), 2, 2, ResamplingFilter::Bilinear)
            .expect("resize should succeed");
        assert!(grid.pixels().iter().all(|p| *p == [255, 255, 255]));
    }

    #[test]
    fn rejects_garbage_and_zero_sizes() {
        assert!(matches!(
            RasterResizer.load_and_resize(b"not an image", 4, 4, ResamplingFilter::Nearest),
            Err(PatternError::InvalidImage(_))
        ));
        let img = RgbaImage::from_pixel(2, 2, image::Rgba([1, 2, 3, 255]));
        assert!(matches!(
            RasterResizer.load_and_resize(&png_bytes(&img), 0, 4, ResamplingFilter::Nearest),
            Err(PatternError::InvalidDimensions(_))
        ));
    }

    #[test]
    fn image_size_reads_only_the_header() {
        let img = RgbaImage::from_fn(300, 200, |x, y| {
            image::Rgba([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8, 255])
        });
        let bytes = png_bytes(&img);
        // Signature and IHDR end at byte 33; the rest is pixel data.
        let header = &bytes[..100];

        assert_eq!(RasterResizer.image_size(header).expect("size from header"), (300, 200));
        assert!(RasterResizer
            .load_and_resize(header, 30, 20, ResamplingFilter::Nearest)
            .is_err());
        assert!(matches!(
            RasterResizer.image_size(b"not an image"),
            Err(PatternError::InvalidImage(_))
        ));
    }
}
