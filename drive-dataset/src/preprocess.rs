//! Deterministic frame preprocessing.

use crate::{
    common::*,
    config::PreprocessorConfig,
    frame::{FrameShape, ProcessedFrame},
};

/// Converts raw camera images to fixed-size single-channel frames.
///
/// A frame is produced by converting the image to grayscale, cropping the
/// configured number of rows from the top and the bottom, then resizing to
/// the configured output extents.
#[derive(Debug, Clone)]
pub struct Preprocessor {
    crop_top: u32,
    crop_bottom: u32,
    output_height: u32,
    output_width: u32,
}

impl Preprocessor {
    pub fn new(config: &PreprocessorConfig) -> Result<Self> {
        Ok(Self {
            crop_top: u32::try_from(config.crop_top)?,
            crop_bottom: u32::try_from(config.crop_bottom)?,
            output_height: u32::try_from(config.output_height.get())?,
            output_width: u32::try_from(config.output_width.get())?,
        })
    }

    /// The shape of every produced frame.
    pub fn output_shape(&self) -> FrameShape {
        FrameShape {
            height: self.output_height as usize,
            width: self.output_width as usize,
            channels: 1,
        }
    }

    pub fn process(&self, image: &DynamicImage) -> Result<ProcessedFrame> {
        let gray = image.to_luma8();
        let (width, height) = gray.dimensions();

        let kept_rows = self
            .crop_top
            .checked_add(self.crop_bottom)
            .and_then(|crop| height.checked_sub(crop))
            .filter(|&rows| rows > 0)
            .ok_or_else(|| {
                format_err!(
                    "image of height {} is too small to crop {} top and {} bottom rows",
                    height,
                    self.crop_top,
                    self.crop_bottom
                )
            })?;

        let cropped = imageops::crop_imm(&gray, 0, self.crop_top, width, kept_rows).to_image();
        let resized = imageops::resize(
            &cropped,
            self.output_width,
            self.output_height,
            FilterType::Triangle,
        );

        ProcessedFrame::new(
            self.output_height as usize,
            self.output_width as usize,
            resized.into_raw(),
        )
    }

    pub fn process_file(&self, path: impl AsRef<Path>) -> Result<ProcessedFrame> {
        let path = path.as_ref();
        let image = image::open(path)
            .with_context(|| format!("failed to open image file '{}'", path.display()))?;
        self.process(&image)
            .with_context(|| format!("failed to process image file '{}'", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn preprocessor(crop_top: usize, crop_bottom: usize, height: usize, width: usize) -> Preprocessor {
        let config = PreprocessorConfig {
            crop_top,
            crop_bottom,
            output_height: NonZeroUsize::new(height).unwrap(),
            output_width: NonZeroUsize::new(width).unwrap(),
        };
        Preprocessor::new(&config).unwrap()
    }

    fn gradient_image(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x * 7) as u8, (y * 5) as u8, 0])
        }))
    }

    #[test]
    fn output_dimensions_follow_config() {
        let preprocessor = preprocessor(10, 5, 4, 6);
        let frame = preprocessor.process(&gradient_image(32, 24)).unwrap();

        assert_eq!(
            frame.shape(),
            FrameShape {
                height: 4,
                width: 6,
                channels: 1
            }
        );
        assert_eq!(preprocessor.output_shape(), frame.shape());
    }

    #[test]
    fn processing_is_deterministic() {
        let preprocessor = preprocessor(2, 2, 8, 12);
        let image = gradient_image(30, 20);

        let first = preprocessor.process(&image).unwrap();
        let second = preprocessor.process(&image).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn rejects_images_smaller_than_the_crop() {
        let preprocessor = preprocessor(60, 20, 66, 200);
        assert!(preprocessor.process(&gradient_image(100, 64)).is_err());
    }

    #[test]
    fn processes_image_files() {
        let dir = tempfile::tempdir().unwrap();
        let image_file = dir.path().join("center-1234.jpg");
        gradient_image(24, 12).save(&image_file).unwrap();

        let preprocessor = preprocessor(2, 2, 4, 6);
        let frame = preprocessor.process_file(&image_file).unwrap();
        assert_eq!(frame.shape().height, 4);
        assert_eq!(frame.shape().width, 6);
    }

    #[test]
    fn rejects_missing_image_file() {
        let dir = tempfile::tempdir().unwrap();
        let preprocessor = preprocessor(2, 2, 4, 6);
        assert!(preprocessor.process_file(dir.path().join("absent.jpg")).is_err());
    }
}
