//! Image header probing for uploaded covers.

use std::io::Cursor;

use image::ImageReader;

use packblog_core::ports::{AssetError, ImageDimensions};

/// Read the pixel size from an encoded image without decoding the pixels.
pub fn probe_dimensions(bytes: &[u8]) -> Result<ImageDimensions, AssetError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| AssetError::InvalidImage(e.to_string()))?;

    if reader.format().is_none() {
        return Err(AssetError::InvalidImage(
            "unrecognized image format".to_string(),
        ));
    }

    let (width, height) = reader
        .into_dimensions()
        .map_err(|e| AssetError::InvalidImage(e.to_string()))?;

    Ok(ImageDimensions { width, height })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat, RgbImage};

    fn png(width: u32, height: u32) -> Vec<u8> {
        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(RgbImage::new(width, height))
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_probe_png_dimensions() {
        let dims = probe_dimensions(&png(40, 21)).unwrap();
        assert_eq!(dims, ImageDimensions { width: 40, height: 21 });
        assert!(!dims.meets_recommended());
    }

    #[test]
    fn test_probe_rejects_non_images() {
        let result = probe_dimensions(b"definitely not an image");
        assert!(matches!(result, Err(AssetError::InvalidImage(_))));
    }
}
