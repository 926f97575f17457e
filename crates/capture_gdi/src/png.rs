//! Lossless PNG persistence

use crate::CaptureResult;
use image::RgbaImage;
use std::fs;
use std::path::Path;

/// Encode the image as PNG at `path`, creating missing parent directories.
pub fn write_png(image: &RgbaImage, path: &Path) -> CaptureResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    image.save_with_format(path, image::ImageFormat::Png)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn writes_png_and_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/shot.png");

        let mut img = RgbaImage::new(8, 6);
        img.put_pixel(3, 2, Rgba([0, 255, 0, 255]));
        write_png(&img, &path).unwrap();

        let back = image::open(&path).unwrap().to_rgba8();
        assert_eq!(back.dimensions(), (8, 6));
        assert_eq!(back.get_pixel(3, 2), &Rgba([0, 255, 0, 255]));
    }

    #[test]
    fn encodes_png_regardless_of_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shot.out");

        write_png(&RgbaImage::new(4, 4), &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }
}
