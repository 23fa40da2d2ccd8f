//! Tests for image loading, alpha compositing, and export

#[cfg(test)]
mod tests {
    use image::{Rgb, RgbImage, Rgba, RgbaImage};
    use tempfile::TempDir;
    use tilegrid::GridError;
    use tilegrid::io::image::{composite_on_white, load_image, save_image};

    // Tests fully transparent pixels become white and opaque pixels are unchanged
    // Verified by ignoring alpha during conversion
    #[test]
    fn test_composite_extremes() {
        let mut rgba = RgbaImage::new(2, 1);
        rgba.put_pixel(0, 0, Rgba([10, 200, 30, 0]));
        rgba.put_pixel(1, 0, Rgba([10, 200, 30, 255]));

        let rgb = composite_on_white(&rgba);
        assert_eq!(rgb.get_pixel(0, 0), &Rgb([255, 255, 255]));
        assert_eq!(rgb.get_pixel(1, 0), &Rgb([10, 200, 30]));
    }

    // Tests partial alpha mixes toward white
    // Verified by mixing toward black
    #[test]
    fn test_composite_half_alpha() {
        let rgba = RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 128]));
        let px = composite_on_white(&rgba).get_pixel(0, 0).0;
        assert!(px.iter().all(|&c| (126..=128).contains(&c)), "{px:?}");
    }

    // Tests a transparent PNG loads with a white background
    // Verified by converting with to_rgb8 directly
    #[test]
    fn test_load_rgba_png() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("mask.png");
        let mut rgba = RgbaImage::from_pixel(3, 2, Rgba([0, 0, 0, 0]));
        rgba.put_pixel(1, 1, Rgba([0, 200, 0, 255]));
        rgba.save(&path).unwrap();

        let rgb = load_image(&path).unwrap();
        assert_eq!(rgb.dimensions(), (3, 2));
        assert_eq!(rgb.get_pixel(0, 0), &Rgb([255, 255, 255]));
        assert_eq!(rgb.get_pixel(1, 1), &Rgb([0, 200, 0]));
    }

    // Tests a missing file is an image read error naming the path
    // Verified by returning an empty image
    #[test]
    fn test_load_missing_file() {
        let result = load_image("/nonexistent/mask.png");
        match result {
            Err(GridError::ImageRead { path, .. }) => {
                assert!(path.ends_with("mask.png"));
            }
            other => panic!("expected ImageRead, got {other:?}"),
        }
    }

    // Tests a file that is not an image is rejected
    // Verified by falling back to a blank image
    #[test]
    fn test_load_undecodable_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.png");
        std::fs::write(&path, b"not an image").unwrap();

        assert!(matches!(load_image(&path), Err(GridError::ImageRead { .. })));
    }

    // Tests saving creates missing parent directories
    // Verified by removing directory creation
    #[test]
    fn test_save_creates_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("out").join("overlay.png");
        let img = RgbImage::from_pixel(2, 2, Rgb([1, 2, 3]));

        save_image(&img, &path).unwrap();
        assert!(path.exists());
        assert_eq!(load_image(&path).unwrap(), img);
    }
}
