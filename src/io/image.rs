//! Image loading with white-background compositing, and PNG export

use crate::io::configuration::BACKGROUND;
use crate::io::ensure_parent_dir;
use crate::io::error::{GridError, Result};
use image::{Rgb, RgbImage, RgbaImage};
use std::path::Path;

/// Load an image as 3-channel RGB, compositing any alpha onto white
///
/// Images without an alpha channel are converted directly. The alpha
/// channel is consumed by compositing and never reaches the caller.
///
/// # Errors
///
/// Returns `GridError::ImageRead` if the file is missing, unreadable,
/// or not a decodable image
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<RgbImage> {
    let path = path.as_ref();
    let img = image::open(path).map_err(|e| GridError::ImageRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let rgb = if img.color().has_alpha() {
        composite_on_white(&img.to_rgba8())
    } else {
        img.to_rgb8()
    };

    log::debug!(
        "Loaded {} ({}x{}, alpha: {})",
        path.display(),
        rgb.width(),
        rgb.height(),
        img.color().has_alpha()
    );

    Ok(rgb)
}

/// Composite an RGBA buffer onto a white background
///
/// Each channel becomes `c * a + 255 * (1 - a)` with `a = alpha / 255`,
/// truncated to `u8`. Fully transparent pixels come out pure white and
/// fully opaque pixels are unchanged.
pub fn composite_on_white(rgba: &RgbaImage) -> RgbImage {
    let (width, height) = rgba.dimensions();
    let mut out = RgbImage::new(width, height);

    for (x, y, pixel) in rgba.enumerate_pixels() {
        let [r, g, b, a] = pixel.0;
        let alpha = f64::from(a) / 255.0;
        let blend = |channel: u8, background: u8| -> u8 {
            f64::from(channel)
                .mul_add(alpha, f64::from(background) * (1.0 - alpha))
                .clamp(0.0, 255.0) as u8
        };
        out.put_pixel(
            x,
            y,
            Rgb([
                blend(r, BACKGROUND[0]),
                blend(g, BACKGROUND[1]),
                blend(b, BACKGROUND[2]),
            ]),
        );
    }

    out
}

/// Save an RGB image, creating the parent directory if needed
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be encoded or written to the specified path
pub fn save_image<P: AsRef<Path>>(img: &RgbImage, output_path: P) -> Result<()> {
    let output_path = output_path.as_ref();
    ensure_parent_dir(output_path)?;

    img.save(output_path).map_err(|e| GridError::ImageExport {
        path: output_path.to_path_buf(),
        source: e,
    })?;

    log::info!("Saved image: {}", output_path.display());
    Ok(())
}
