//! Property-based tests for imageops-cutout
//!
//! These tests use proptest to check the invariants of the flood fill and of
//! the full pipeline on randomly generated inputs.

use image::Rgb;
use imageops_cutout::*;
use proptest::prelude::*;

/// Strategy for small masks of any shape, including single rows and columns
fn random_mask() -> impl Strategy<Value = Mask> {
    (1u32..=16, 1u32..=16).prop_flat_map(|(width, height)| {
        prop::collection::vec(any::<bool>(), (width * height) as usize).prop_map(move |data| {
            Mask::from_vec(width, height, data).expect("length matches dimensions")
        })
    })
}

/// Strategy for RGB pixel values
fn rgb_pixel() -> impl Strategy<Value = Rgb<u8>> {
    (any::<u8>(), any::<u8>(), any::<u8>()).prop_map(|(r, g, b)| Rgb([r, g, b]))
}

/// Strategy for block colors, biased toward a gray backdrop and its near misses
fn block_color() -> impl Strategy<Value = Rgb<u8>> {
    prop_oneof![
        4 => Just(Rgb([128, 128, 128])),
        1 => Just(Rgb([136, 135, 137])),
        1 => Just(Rgb([140, 126, 126])),
        2 => rgb_pixel(),
    ]
}

/// Strategy for images made of a 4x4 grid of flat blocks
fn block_image() -> impl Strategy<Value = Image<Rgb<u8>>> {
    (
        32u32..=48,
        32u32..=48,
        prop::collection::vec(block_color(), 16),
    )
        .prop_map(|(width, height, blocks)| {
            Image::from_fn(width, height, |x, y| {
                let bx = (x * 4 / width) as usize;
                let by = (y * 4 / height) as usize;
                blocks[by * 4 + bx]
            })
        })
}

/// Reachability by repeated relaxation, for comparison with the BFS
fn reachable_by_fixpoint(candidates: &Mask) -> Mask {
    let (width, height) = candidates.dimensions();
    let mut reached = Mask::from_fn(width, height, |x, y| {
        let on_border = x == 0 || y == 0 || x + 1 == width || y + 1 == height;
        on_border && candidates.get(x, y)
    });

    let mut changed = true;
    while changed {
        changed = false;
        for y in 0..height {
            for x in 0..width {
                if reached.get(x, y) || !candidates.get(x, y) {
                    continue;
                }
                let touches = (x > 0 && reached.get(x - 1, y))
                    || (x + 1 < width && reached.get(x + 1, y))
                    || (y > 0 && reached.get(x, y - 1))
                    || (y + 1 < height && reached.get(x, y + 1));
                if touches {
                    reached.set(x, y, true);
                    changed = true;
                }
            }
        }
    }
    reached
}

proptest! {
    /// Property: the fill only ever keeps candidates
    #[test]
    fn flood_fill_is_a_subset_of_candidates(candidates in random_mask()) {
        let reached = flood_fill_from_border(&candidates);
        prop_assert_eq!(reached.dimensions(), candidates.dimensions());
        prop_assert!(candidates.is_superset_of(&reached));
    }

    /// Property: filling an already filled mask changes nothing
    #[test]
    fn flood_fill_is_idempotent(candidates in random_mask()) {
        let once = flood_fill_from_border(&candidates);
        let twice = flood_fill_from_border(&once);
        prop_assert_eq!(once, twice);
    }

    /// Property: the fill reaches exactly the 4-connected border components
    #[test]
    fn flood_fill_matches_fixpoint_reachability(candidates in random_mask()) {
        prop_assert_eq!(
            flood_fill_from_border(&candidates),
            reachable_by_fixpoint(&candidates)
        );
    }

    /// Property: every border candidate is reached
    #[test]
    fn border_candidates_are_always_reached(candidates in random_mask()) {
        let (width, height) = candidates.dimensions();
        let reached = flood_fill_from_border(&candidates);
        for x in 0..width {
            prop_assert_eq!(reached.get(x, 0), candidates.get(x, 0));
            prop_assert_eq!(reached.get(x, height - 1), candidates.get(x, height - 1));
        }
        for y in 0..height {
            prop_assert_eq!(reached.get(0, y), candidates.get(0, y));
            prop_assert_eq!(reached.get(width - 1, y), candidates.get(width - 1, y));
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    /// Property: the intermediate masks nest as candidates ⊇ connected ⊆ background
    #[test]
    fn segmentation_masks_nest(image in block_image()) {
        let seg = segment(&image, &CutoutConfig::default()).unwrap();
        prop_assert!(seg.candidates.is_superset_of(&seg.connected));
        prop_assert!(seg.background.is_superset_of(&seg.connected));
        prop_assert_eq!(&flood_fill_from_border(&seg.candidates), &seg.connected);
    }

    /// Property: colors are never modified and alpha is pushed toward 0 or 255
    #[test]
    fn cutout_keeps_colors_and_saturates_alpha(image in block_image()) {
        let config = CutoutConfig::default();
        let seg = segment(&image, &config).unwrap();
        let cutout = segment_and_cut(&image, &config).unwrap();

        prop_assert_eq!(cutout.image.dimensions(), image.dimensions());
        for (x, y, pixel) in cutout.image.enumerate_pixels() {
            prop_assert_eq!(&pixel.0[..3], &image.get_pixel(x, y).0[..]);

            let alpha = pixel[3];
            prop_assert_eq!(alpha, cutout.alpha.get_pixel(x, y)[0]);
            if seg.background.get(x, y) {
                prop_assert!(alpha <= 12);
            } else {
                prop_assert!(alpha >= 246);
            }
        }
    }

    /// Property: the transparency ratio agrees with the alpha channel
    #[test]
    fn transparency_ratio_matches_alpha(image in block_image()) {
        let cutout = segment_and_cut(&image, &CutoutConfig::default()).unwrap();
        let below = cutout.image.pixels().filter(|p| p[3] < 12).count();
        let expected = below as f64 / (cutout.image.width() * cutout.image.height()) as f64;
        prop_assert!((cutout.transparency_ratio - expected).abs() < 1e-12);
        prop_assert!((0.0..=1.0).contains(&cutout.transparency_ratio));
    }

    /// Property: the relaxed lower fill only adds background
    #[test]
    fn lower_region_fill_only_adds_background(image in block_image()) {
        let default = segment(&image, &CutoutConfig::default()).unwrap();
        let relaxed_config = CutoutConfig::default().with_lower_region_relaxed_fill(true);
        let relaxed = segment(&image, &relaxed_config).unwrap();

        prop_assert!(relaxed.background.is_superset_of(&default.background));
        prop_assert_eq!(relaxed.candidates, default.candidates);
    }

    /// Property: the same input always yields the same cutout
    #[test]
    fn segmentation_is_deterministic(image in block_image()) {
        let config = CutoutConfig::default();
        let first = segment_and_cut(&image, &config).unwrap();
        let second = segment_and_cut(&image, &config).unwrap();
        prop_assert_eq!(first.image, second.image);
    }
}
