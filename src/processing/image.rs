use std::io::Cursor;

use image::{DynamicImage, GrayImage, ImageFormat};
use imageproc::contrast::{otsu_level, stretch_contrast, threshold};

use crate::utils::ExtractError;

/// Raster handling ahead of OCR.
pub struct ImageProcessor;

impl ImageProcessor {
    /// True when the bytes look like an image format the decoder understands.
    pub fn is_raster(bytes: &[u8]) -> bool {
        image::guess_format(bytes).is_ok()
    }

    /// Decode, binarize and re-encode as PNG for the OCR engine.
    pub fn preprocess(image_bytes: &[u8]) -> Result<Vec<u8>, ExtractError> {
        let image = image::load_from_memory(image_bytes)
            .map_err(|e| ExtractError::ImageProcessing(format!("Failed to load image: {}", e)))?;

        let enhanced = Self::enhance(&image.to_luma8());

        let mut buffer = Vec::new();
        DynamicImage::ImageLuma8(enhanced)
            .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
            .map_err(|e| {
                ExtractError::ImageProcessing(format!("Failed to encode processed image: {}", e))
            })?;
        Ok(buffer)
    }

    /// Stretch the intensity range, then apply an Otsu threshold.
    pub fn enhance(gray: &GrayImage) -> GrayImage {
        let (min, max) = gray
            .pixels()
            .fold((u8::MAX, u8::MIN), |(lo, hi), p| (lo.min(p[0]), hi.max(p[0])));
        let stretched = if max > min {
            stretch_contrast(gray, min, max)
        } else {
            gray.clone()
        };
        let level = otsu_level(&stretched);
        threshold(&stretched, level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Luma};

    fn gradient() -> GrayImage {
        ImageBuffer::from_fn(16, 4, |x, _| Luma([(40 + x * 10) as u8]))
    }

    #[test]
    fn test_enhance_binarizes() {
        let out = ImageProcessor::enhance(&gradient());
        assert_eq!(out.dimensions(), (16, 4));
        assert!(out.pixels().all(|p| p[0] == 0 || p[0] == 255));
        assert!(out.pixels().any(|p| p[0] == 0));
        assert!(out.pixels().any(|p| p[0] == 255));
    }

    #[test]
    fn test_preprocess_outputs_png() {
        let mut png = Vec::new();
        DynamicImage::ImageLuma8(gradient())
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .unwrap();
        let processed = ImageProcessor::preprocess(&png).unwrap();
        assert_eq!(image::guess_format(&processed).unwrap(), ImageFormat::Png);
    }

    #[test]
    fn test_pdf_is_not_raster() {
        assert!(!ImageProcessor::is_raster(b"%PDF-1.7\n%binary"));
        assert!(ImageProcessor::preprocess(b"not an image").is_err());
    }
}
