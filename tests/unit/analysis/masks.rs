//! Tests for category mask classification in combined and paired modes

#[cfg(test)]
mod tests {
    use image::{Rgb, RgbImage};
    use std::path::PathBuf;
    use tilegrid::GridError;
    use tilegrid::analysis::masks::{CategoryMasks, ClassifierConfig, MaskSource};
    use tilegrid::io::configuration::{
        ENCOUNTER_SATURATION_FLOOR, MASK_SATURATION_FLOOR, MASK_VALUE_FLOOR, NEAR_WHITE_CUTOFF,
    };

    const GREEN: Rgb<u8> = Rgb([0, 200, 0]);
    const RED: Rgb<u8> = Rgb([220, 0, 0]);
    const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

    // Tests defaults carry the documented thresholds
    // Verified by swapping the encounter and mask floors
    #[test]
    fn test_default_config_thresholds() {
        let config = ClassifierConfig::default();
        assert_eq!(config.mask_floors.saturation, MASK_SATURATION_FLOOR);
        assert_eq!(config.mask_floors.value, MASK_VALUE_FLOOR);
        assert_eq!(config.encounter_floors.saturation, ENCOUNTER_SATURATION_FLOOR);
        assert_eq!(config.near_white_cutoff, NEAR_WHITE_CUTOFF);
        assert_eq!(config.passable_hues.len(), 1);
        assert_eq!(config.blocked_hues.len(), 2);
    }

    // Tests green paint lands in the passable mask and red paint in the blocked mask
    // Verified by classifying both masks with the green bands
    #[test]
    fn test_combined_mode_splits_green_and_red() {
        let mut img = RgbImage::from_pixel(3, 1, WHITE);
        img.put_pixel(0, 0, GREEN);
        img.put_pixel(1, 0, RED);

        let masks = CategoryMasks::from_combined(&img, &ClassifierConfig::default());
        assert_eq!(masks.dimensions(), (1, 3));
        assert_eq!(
            masks.passable.iter().copied().collect::<Vec<_>>(),
            vec![true, false, false]
        );
        assert_eq!(
            masks.blocked.iter().copied().collect::<Vec<_>>(),
            vec![false, true, false]
        );
        assert!(masks.encounter.is_none());
    }

    // Tests pixels painted both ways on separate images overlap without resolution
    // Verified by clearing passable where blocked is set
    #[test]
    fn test_paired_mode_keeps_overlap() {
        let black = Rgb([0, 0, 0]);
        let passable = RgbImage::from_pixel(2, 2, black);
        let mut blocked = RgbImage::from_pixel(2, 2, WHITE);
        blocked.put_pixel(0, 0, black);

        let masks =
            CategoryMasks::from_pair(&passable, &blocked, &ClassifierConfig::default()).unwrap();
        assert!(masks.passable.iter().all(|&m| m));
        assert_eq!(masks.blocked.get((0, 0)), Some(&true));
        assert_eq!(masks.blocked.get((1, 1)), Some(&false));
    }

    // Tests paired images of different sizes are rejected
    // Verified by removing the dimension check
    #[test]
    fn test_paired_mode_shape_mismatch() {
        let passable = RgbImage::from_pixel(4, 4, WHITE);
        let blocked = RgbImage::from_pixel(4, 5, WHITE);

        let result = CategoryMasks::from_pair(&passable, &blocked, &ClassifierConfig::default());
        assert!(matches!(
            result,
            Err(GridError::ShapeMismatch {
                label: "blocked",
                ..
            })
        ));
    }

    // Tests encounter paint is classified from its own image
    // Verified by reusing the passable mask as the encounter mask
    #[test]
    fn test_with_encounter_attaches_mask() {
        let base = RgbImage::from_pixel(2, 1, RED);
        let mut encounter = RgbImage::from_pixel(2, 1, WHITE);
        encounter.put_pixel(1, 0, GREEN);

        let config = ClassifierConfig::default();
        let masks = CategoryMasks::from_combined(&base, &config)
            .with_encounter(&encounter, &config)
            .unwrap();

        let mask = masks.encounter.unwrap();
        assert_eq!(mask.iter().copied().collect::<Vec<_>>(), vec![false, true]);
    }

    // Tests an encounter image of the wrong size is rejected
    // Verified by comparing only widths
    #[test]
    fn test_with_encounter_shape_mismatch() {
        let config = ClassifierConfig::default();
        let masks = CategoryMasks::from_combined(&RgbImage::from_pixel(4, 4, WHITE), &config);

        let result = masks.with_encounter(&RgbImage::from_pixel(4, 3, WHITE), &config);
        assert!(matches!(
            result,
            Err(GridError::ShapeMismatch {
                label: "encounter",
                ..
            })
        ));
    }

    // Tests a missing image surfaces as an image read error
    // Verified by mapping load failures to a generic file system error
    #[test]
    fn test_load_missing_image() {
        let source = MaskSource::Combined(PathBuf::from("/nonexistent/mask.png"));
        let result = CategoryMasks::load(&source, None, &ClassifierConfig::default());
        assert!(matches!(result, Err(GridError::ImageRead { .. })));
    }

    // Tests loading from disk without an encounter image leaves the mask absent
    // Verified by inferring encounter from the passable mask
    #[test]
    fn test_load_without_encounter_image() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("mask.png");
        RgbImage::from_pixel(4, 4, GREEN).save(&path).unwrap();

        let masks = CategoryMasks::load(
            &MaskSource::Combined(path),
            None,
            &ClassifierConfig::default(),
        )
        .unwrap();
        assert!(masks.passable.iter().all(|&m| m));
        assert!(masks.encounter.is_none());
    }
}
