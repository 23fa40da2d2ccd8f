//! Category mask classification for combined and paired mask images
//!
//! A run produces three independent full-resolution masks: passable,
//! blocked, and (optionally) encounter. Masks may overlap pixel-wise;
//! overlap is only resolved when tiles are aggregated.

use crate::analysis::color::{ColorFloors, HueRange, hue_mask, painted_mask, to_hsv};
use crate::io::configuration::{
    ENCOUNTER_SATURATION_FLOOR, ENCOUNTER_VALUE_FLOOR, GREEN_HUE_RANGES, MASK_SATURATION_FLOOR,
    MASK_VALUE_FLOOR, NEAR_WHITE_CUTOFF, RED_HUE_RANGES,
};
use crate::io::error::{GridError, Result};
use crate::io::image::load_image;
use image::RgbImage;
use ndarray::Array2;
use std::path::{Path, PathBuf};

/// Every threshold used to turn painted pixels into category membership
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifierConfig {
    /// Hue bands marking passable paint in a combined mask
    pub passable_hues: Vec<HueRange>,
    /// Hue bands marking blocked paint in a combined mask
    pub blocked_hues: Vec<HueRange>,
    /// Hue bands marking encounter paint on the encounter image
    pub encounter_hues: Vec<HueRange>,
    /// Saturation/value floors for passable and blocked paint
    pub mask_floors: ColorFloors,
    /// Saturation/value floors for encounter paint
    pub encounter_floors: ColorFloors,
    /// Gray level below which a pixel counts as painted in paired mode
    pub near_white_cutoff: u8,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            passable_hues: GREEN_HUE_RANGES
                .into_iter()
                .map(HueRange::from_trusted)
                .collect(),
            blocked_hues: RED_HUE_RANGES
                .into_iter()
                .map(HueRange::from_trusted)
                .collect(),
            encounter_hues: GREEN_HUE_RANGES
                .into_iter()
                .map(HueRange::from_trusted)
                .collect(),
            mask_floors: ColorFloors {
                saturation: MASK_SATURATION_FLOOR,
                value: MASK_VALUE_FLOOR,
            },
            encounter_floors: ColorFloors {
                saturation: ENCOUNTER_SATURATION_FLOOR,
                value: ENCOUNTER_VALUE_FLOOR,
            },
            near_white_cutoff: NEAR_WHITE_CUTOFF,
        }
    }
}

/// Where passable and blocked paint come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MaskSource {
    /// One image, green for passable and red for blocked
    Combined(PathBuf),
    /// Separate images; any non-near-white pixel is a member
    Paired {
        /// Image painted where the map is walkable
        passable: PathBuf,
        /// Image painted where the map is obstructed
        blocked: PathBuf,
    },
}

/// Full-resolution category masks for one extraction run, indexed `[row, col]`
#[derive(Debug, Clone)]
pub struct CategoryMasks {
    /// Pixels painted as walkable
    pub passable: Array2<bool>,
    /// Pixels painted as obstacles
    pub blocked: Array2<bool>,
    /// Pixels painted as encounter zones, absent without an encounter image
    pub encounter: Option<Array2<bool>>,
}

impl CategoryMasks {
    /// Classify a single combined mask image via hue bands
    pub fn from_combined(img: &RgbImage, config: &ClassifierConfig) -> Self {
        let hsv = to_hsv(img);
        let passable = hue_mask(&hsv, &config.passable_hues, config.mask_floors);
        let blocked = hue_mask(&hsv, &config.blocked_hues, config.mask_floors);
        log_coverage("passable", &passable);
        log_coverage("blocked", &blocked);

        Self {
            passable,
            blocked,
            encounter: None,
        }
    }

    /// Classify a passable/blocked image pair via the near-white threshold
    ///
    /// # Errors
    ///
    /// Returns `GridError::ShapeMismatch` if the two images differ in size
    pub fn from_pair(
        passable: &RgbImage,
        blocked: &RgbImage,
        config: &ClassifierConfig,
    ) -> Result<Self> {
        check_shape("blocked", passable, blocked)?;

        let passable = painted_mask(passable, config.near_white_cutoff);
        let blocked = painted_mask(blocked, config.near_white_cutoff);
        log_coverage("passable", &passable);
        log_coverage("blocked", &blocked);

        Ok(Self {
            passable,
            blocked,
            encounter: None,
        })
    }

    /// Attach an encounter mask classified from its own image
    ///
    /// # Errors
    ///
    /// Returns `GridError::ShapeMismatch` if the encounter image is not the
    /// same size as the base masks
    pub fn with_encounter(mut self, img: &RgbImage, config: &ClassifierConfig) -> Result<Self> {
        let (height, width) = self.dimensions();
        let expected = (
            u32::try_from(width).unwrap_or(u32::MAX),
            u32::try_from(height).unwrap_or(u32::MAX),
        );
        let found = img.dimensions();
        if found != expected {
            return Err(GridError::ShapeMismatch {
                label: "encounter",
                expected,
                found,
            });
        }

        let encounter = hue_mask(&to_hsv(img), &config.encounter_hues, config.encounter_floors);
        log_coverage("encounter", &encounter);
        self.encounter = Some(encounter);
        Ok(self)
    }

    /// Load and classify every image a run names
    ///
    /// Without an encounter image the encounter mask stays absent; it is
    /// never inferred from passable paint.
    ///
    /// # Errors
    ///
    /// Returns an error if any image cannot be read or the images disagree
    /// in size
    pub fn load(
        source: &MaskSource,
        encounter: Option<&Path>,
        config: &ClassifierConfig,
    ) -> Result<Self> {
        let masks = match source {
            MaskSource::Combined(path) => Self::from_combined(&load_image(path)?, config),
            MaskSource::Paired { passable, blocked } => {
                Self::from_pair(&load_image(passable)?, &load_image(blocked)?, config)?
            }
        };

        match encounter {
            Some(path) => masks.with_encounter(&load_image(path)?, config),
            None => Ok(masks),
        }
    }

    /// Mask dimensions as (height, width) in pixels
    pub fn dimensions(&self) -> (usize, usize) {
        self.passable.dim()
    }
}

fn check_shape(label: &'static str, base: &RgbImage, other: &RgbImage) -> Result<()> {
    if base.dimensions() == other.dimensions() {
        Ok(())
    } else {
        Err(GridError::ShapeMismatch {
            label,
            expected: base.dimensions(),
            found: other.dimensions(),
        })
    }
}

fn log_coverage(category: &str, mask: &Array2<bool>) {
    let members = mask.iter().filter(|&&m| m).count();
    log::debug!("{category} mask: {members} of {} pixels", mask.len());
}
