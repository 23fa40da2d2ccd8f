//! Color-coded tile overlay for checking an extraction by eye

use crate::io::configuration::{
    BACKGROUND, BLOCKED_FILL, ENCOUNTER_ACCENT, GRID_LINE_COLOR, PASSABLE_FILL,
};
use crate::io::error::Result;
use crate::io::image::save_image;
use crate::spatial::tiles::{LabelGrid, tile_iter};
use image::{Rgb, RgbImage};
use std::path::Path;

/// Render the overlay at the source image's resolution
///
/// Passable tiles are filled with one color and blocked tiles with
/// another. Encounter tiles are blended 50/50 with an accent on top of
/// their base fill. A 1-pixel line marks every tile boundary, clamped
/// to the last pixel row/column. Pixels beyond the last full tile stay
/// white.
pub fn render_overlay(grid: &LabelGrid) -> RgbImage {
    let (height, width) = grid.image_dimensions();
    let mut img = RgbImage::from_pixel(width as u32, height as u32, Rgb(BACKGROUND));
    if height == 0 || width == 0 {
        return img;
    }

    let tile = grid.tile_size();
    for bounds in tile_iter(height, width, tile) {
        let Some(record) = grid.record(bounds.row, bounds.col) else {
            continue;
        };

        let base = if record.passable {
            PASSABLE_FILL
        } else {
            BLOCKED_FILL
        };
        let fill = if record.encounter {
            blend_half(base, ENCOUNTER_ACCENT)
        } else {
            base
        };

        for y in bounds.y0..bounds.y1 {
            for x in bounds.x0..bounds.x1 {
                img.put_pixel(x as u32, y as u32, Rgb(fill));
            }
        }
    }

    draw_grid_lines(&mut img, grid.rows(), grid.cols(), tile);
    img
}

/// Render the overlay and save it as an image file
///
/// # Errors
///
/// Returns an error if the overlay cannot be written
pub fn save_overlay<P: AsRef<Path>>(grid: &LabelGrid, path: P) -> Result<()> {
    save_image(&render_overlay(grid), path)
}

// Equal-weight mix, truncated like an 8-bit cast
fn blend_half(base: [u8; 3], accent: [u8; 3]) -> [u8; 3] {
    [0, 1, 2].map(|i| {
        let a = base.get(i).copied().unwrap_or(0);
        let b = accent.get(i).copied().unwrap_or(0);
        ((u16::from(a) + u16::from(b)) / 2) as u8
    })
}

fn draw_grid_lines(img: &mut RgbImage, rows: usize, cols: usize, tile: usize) {
    let (width, height) = img.dimensions();
    let line = Rgb(GRID_LINE_COLOR);

    for r in 0..=rows {
        let y = ((r * tile) as u32).min(height - 1);
        for x in 0..width {
            img.put_pixel(x, y, line);
        }
    }
    for c in 0..=cols {
        let x = ((c * tile) as u32).min(width - 1);
        for y in 0..height {
            img.put_pixel(x, y, line);
        }
    }
}
