//! Tests for tile weight blending

#[cfg(test)]
mod tests {
    use crate::support::uniform_sample;
    use wavetile::analysis::patterns::{SampleImage, extract_tiles};
    use wavetile::analysis::weights::{WeightMode, tile_weight};

    // The blend is (3 * frequency + connectivity) / 4
    #[test]
    fn test_blend_formula() {
        let sample = uniform_sample(3, 3, [0, 0, 255, 255]);
        let tiles = extract_tiles(&sample, 2).expect("valid extraction");

        // One tile: frequency 9, connectivity 1 + 4 self-loops = 5
        let blended = tile_weight(&tiles, WeightMode::Blended, 0);
        assert!((blended - (3.0 * 9.0 + 5.0) / 4.0).abs() < 1e-12);
    }

    // Frequency-only and connectivity-only expose the raw quantities
    #[test]
    fn test_pure_modes() {
        let sample = uniform_sample(4, 2, [255, 0, 0, 255]);
        let tiles = extract_tiles(&sample, 2).expect("valid extraction");

        assert!((tile_weight(&tiles, WeightMode::FrequencyOnly, 0) - 8.0).abs() < 1e-12);
        assert!((tile_weight(&tiles, WeightMode::ConnectivityOnly, 0) - 5.0).abs() < 1e-12);
    }

    // The default blend weights frequency at least as much as connectivity
    #[test]
    fn test_default_mode_is_blended() {
        assert_eq!(WeightMode::default(), WeightMode::Blended);
    }

    // Extracted tiles always have strictly positive weight in every mode
    #[test]
    fn test_weights_are_positive() {
        let data = vec![
            [255, 0, 0, 255],
            [0, 255, 0, 255],
            [0, 0, 255, 255],
            [255, 255, 0, 255],
            [255, 0, 255, 255],
            [0, 255, 255, 255],
        ];
        let sample = SampleImage::from_raw(3, 2, data).expect("valid sample");
        let tiles = extract_tiles(&sample, 2).expect("valid extraction");

        for mode in [
            WeightMode::Blended,
            WeightMode::FrequencyOnly,
            WeightMode::ConnectivityOnly,
        ] {
            for tile in 0..tiles.len() {
                assert!(tile_weight(&tiles, mode, tile) > 0.0, "{mode:?} tile {tile}");
            }
        }
    }

    // Unknown tile ids fall back to zero weight rather than panicking
    #[test]
    fn test_out_of_range_tile() {
        let sample = uniform_sample(3, 3, [0, 0, 255, 255]);
        let tiles = extract_tiles(&sample, 2).expect("valid extraction");
        assert_eq!(tile_weight(&tiles, WeightMode::Blended, 99), 0.0);
    }
}
