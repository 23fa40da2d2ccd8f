//! Hue/saturation/value conversion and per-pixel category masks
//!
//! Hue uses the half-degree scale (0..=179) so that a full byte range
//! covers saturation and value while hue bands stay byte-sized.

use crate::io::configuration::HUE_MAX;
use crate::io::error::{GridError, Result, invalid_parameter};
use image::RgbImage;
use ndarray::Array2;
use std::fmt;
use std::str::FromStr;

// R, G, B weights scaled by 2^14
const GRAY_WEIGHTS: [u32; 3] = [4899, 9617, 1868];
const GRAY_SHIFT: u32 = 14;

/// One pixel in hue/saturation/value space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Hsv {
    /// Hue on the 0..=179 scale
    pub h: u8,
    /// Saturation, 0..=255
    pub s: u8,
    /// Value (brightness), 0..=255
    pub v: u8,
}

/// Saturation and value floors a pixel must reach to count as paint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorFloors {
    /// Minimum saturation (inclusive)
    pub saturation: u8,
    /// Minimum value (inclusive)
    pub value: u8,
}

/// Inclusive hue band, wrapping through 0 when `lo > hi`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HueRange {
    lo: u8,
    hi: u8,
}

impl HueRange {
    /// Create a validated hue range
    ///
    /// # Errors
    ///
    /// Returns `GridError::InvalidParameter` if either bound exceeds 179
    pub fn new(lo: u8, hi: u8) -> Result<Self> {
        for bound in [lo, hi] {
            if bound > HUE_MAX {
                return Err(invalid_parameter(
                    "hue",
                    &bound,
                    &format!("hue bounds must lie in 0..={HUE_MAX}"),
                ));
            }
        }
        Ok(Self { lo, hi })
    }

    // Only for bounds already known to be in the hue domain
    pub(crate) const fn from_trusted(bounds: (u8, u8)) -> Self {
        Self {
            lo: bounds.0,
            hi: bounds.1,
        }
    }

    /// Lower bound (inclusive)
    pub const fn lo(&self) -> u8 {
        self.lo
    }

    /// Upper bound (inclusive)
    pub const fn hi(&self) -> u8 {
        self.hi
    }

    /// Whether the range crosses the 179 -> 0 seam
    pub const fn wraps(&self) -> bool {
        self.lo > self.hi
    }

    /// Membership test honoring wrap-around
    pub const fn contains(&self, hue: u8) -> bool {
        if self.wraps() {
            hue >= self.lo || hue <= self.hi
        } else {
            hue >= self.lo && hue <= self.hi
        }
    }
}

impl fmt::Display for HueRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.lo, self.hi)
    }
}

impl FromStr for HueRange {
    type Err = GridError;

    /// Parses `lo-hi`, e.g. `40-90` or `170-10`
    fn from_str(s: &str) -> Result<Self> {
        let (lo, hi) = s
            .split_once('-')
            .ok_or_else(|| invalid_parameter("hue", &s, &"expected the form lo-hi"))?;
        let parse = |part: &str| {
            part.trim()
                .parse::<u8>()
                .map_err(|e| invalid_parameter("hue", &s, &e))
        };
        Self::new(parse(lo)?, parse(hi)?)
    }
}

/// Convert one RGB pixel to HSV
///
/// Value is the channel maximum, saturation is `255 * (max - min) / max`,
/// and hue is the angle in degrees halved and rounded onto 0..=179.
pub fn rgb_to_hsv(rgb: [u8; 3]) -> Hsv {
    let [r, g, b] = rgb.map(f32::from);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let s = if max > 0.0 {
        (255.0 * delta / max).round()
    } else {
        0.0
    };

    let degrees = if delta <= 0.0 {
        0.0
    } else if (max - r).abs() < f32::EPSILON {
        60.0 * (g - b) / delta
    } else if (max - g).abs() < f32::EPSILON {
        60.0f32.mul_add((b - r) / delta, 120.0)
    } else {
        60.0f32.mul_add((r - g) / delta, 240.0)
    };
    let degrees = if degrees < 0.0 {
        degrees + 360.0
    } else {
        degrees
    };
    let h = ((degrees / 2.0).round() as u16) % (u16::from(HUE_MAX) + 1);

    Hsv {
        h: h as u8,
        s: s as u8,
        v: max as u8,
    }
}

/// Convert a whole image to an HSV array indexed `[row, col]`
pub fn to_hsv(img: &RgbImage) -> Array2<Hsv> {
    let (width, height) = img.dimensions();
    let mut hsv = Array2::from_elem((height as usize, width as usize), Hsv::default());

    for (x, y, pixel) in img.enumerate_pixels() {
        if let Some(cell) = hsv.get_mut((y as usize, x as usize)) {
            *cell = rgb_to_hsv(pixel.0);
        }
    }

    hsv
}

/// Boolean mask of pixels whose hue falls in any range and that clear both floors
///
/// Ranges are trusted; bounds are validated when a `HueRange` is built.
pub fn hue_mask(hsv: &Array2<Hsv>, ranges: &[HueRange], floors: ColorFloors) -> Array2<bool> {
    hsv.mapv(|px| {
        px.s >= floors.saturation
            && px.v >= floors.value
            && ranges.iter().any(|range| range.contains(px.h))
    })
}

/// Luma of one RGB pixel with Rec. 601 weights (0.299, 0.587, 0.114)
///
/// Uses 14-bit fixed-point coefficients with round-half-up, so results
/// match the usual 8-bit BGR-to-gray conversion exactly.
pub fn luma_601(rgb: [u8; 3]) -> u8 {
    let [r, g, b] = rgb.map(u32::from);
    let [wr, wg, wb] = GRAY_WEIGHTS;
    let weighted = (wr * r + wg * g + wb * b + (1 << (GRAY_SHIFT - 1))) >> GRAY_SHIFT;
    u8::try_from(weighted).unwrap_or(u8::MAX)
}

/// Boolean mask of pixels darker than `cutoff` in grayscale
///
/// Used when a category is painted on its own image: anything that is
/// not near-white is a member.
pub fn painted_mask(img: &RgbImage, cutoff: u8) -> Array2<bool> {
    let (width, height) = img.dimensions();
    let mut mask = Array2::from_elem((height as usize, width as usize), false);

    for (x, y, pixel) in img.enumerate_pixels() {
        if let Some(cell) = mask.get_mut((y as usize, x as usize)) {
            *cell = luma_601(pixel.0) < cutoff;
        }
    }

    mask
}
