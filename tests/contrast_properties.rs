//! Page-level behavior of the too-low-contrast detector

use rflayoutbugs::{
    contrast_ratio, DetectorConfig, LayoutBugDetector, PixelMask, Rgb, Screenshot, StaticPage,
    TooLowContrastDetector,
};
use sha2::{Digest, Sha256};

const GRAY: Rgb = Rgb::new(128, 128, 128);
const FAINT: Rgb = Rgb::new(140, 140, 140);

/// Text rectangle `(x, y, width, height, color)`
type TextRect = (usize, usize, usize, usize, Rgb);

/// Render a page: `background(x, y)` everywhere, text rectangles painted on
/// top in order.
fn render<B>(w: usize, h: usize, background: B, rects: &[TextRect]) -> StaticPage
where
    B: Fn(usize, usize) -> Rgb,
{
    let hit = |x: usize, y: usize| {
        rects
            .iter()
            .rev()
            .find(|r| x >= r.0 && x < r.0 + r.2 && y >= r.1 && y < r.1 + r.3)
    };
    let shot = Screenshot::from_fn(w, h, |x, y| hit(x, y).map_or_else(|| background(x, y), |r| r.4)).unwrap();
    let text = PixelMask::from_fn(w, h, |x, y| hit(x, y).is_some()).unwrap();
    StaticPage::new(shot, text).unwrap()
}

fn on_gray(w: usize, h: usize, rects: &[TextRect]) -> StaticPage {
    render(w, h, |_, _| GRAY, rects)
}

fn detector() -> TooLowContrastDetector {
    TooLowContrastDetector::new(DetectorConfig::default()).unwrap()
}

fn mask_digest(mask: &PixelMask) -> String {
    let bytes: Vec<u8> = mask.as_slice().iter().map(|&b| b as u8).collect();
    hex::encode(Sha256::digest(&bytes))
}

fn text_of(page: &StaticPage) -> PixelMask {
    page.clone().into_parts().1
}

#[test]
fn formula_matches_reference_ratios() {
    assert!((contrast_ratio(Rgb::BLACK, Rgb::WHITE) - 21.0).abs() < 1e-6);
    assert!((contrast_ratio(GRAY, GRAY) - 1.0).abs() < 1e-6);
    assert!(contrast_ratio(FAINT, GRAY) < 1.5);
}

#[test]
fn page_without_text_has_no_bug() {
    let page = on_gray(40, 20, &[]);
    let analysis = {
        let (shot, text) = page.clone().into_parts();
        detector().analyze(&shot, &text).unwrap()
    };
    assert!(!analysis.buggy_pixels.any());
    assert_eq!(analysis.blobs_examined, 0);
    assert!(detector().find_layout_bugs_in(&page).unwrap().is_empty());
}

#[test]
fn narrow_blobs_are_never_reported() {
    for width in 1..4 {
        let page = on_gray(40, 20, &[(5, 5, width, 8, FAINT)]);
        assert!(
            detector().find_layout_bugs_in(&page).unwrap().is_empty(),
            "width {} was reported",
            width
        );
    }
}

#[test]
fn blob_exactly_as_wide_as_the_threshold_is_fully_marked() {
    for width in [4, 7, 10] {
        let page = on_gray(40, 20, &[(5, 5, width, 8, FAINT)]);
        let bugs = detector().find_layout_bugs_in(&page).unwrap();
        assert_eq!(bugs.len(), 1, "width {}", width);
        assert_eq!(bugs[0].buggy_pixels, text_of(&page));
        assert_eq!(bugs[0].description, "Detected text with too low contrast.");
    }
}

#[test]
fn readable_text_is_not_reported() {
    let page = render(40, 20, |_, _| Rgb::WHITE, &[(5, 5, 10, 8, Rgb::BLACK)]);
    assert!(detector().find_layout_bugs_in(&page).unwrap().is_empty());
}

#[test]
fn disjoint_blobs_collapse_into_one_bug() {
    let page = on_gray(120, 60, &[(2, 2, 12, 6, FAINT), (80, 40, 15, 9, FAINT)]);
    let bugs = detector().find_layout_bugs_in(&page).unwrap();
    assert_eq!(bugs.len(), 1);
    let bug = &bugs[0];
    assert_eq!(bug.buggy_pixels.count(), 12 * 6 + 15 * 9);
    assert!(bug.buggy_pixels[(2, 2)]);
    assert!(bug.buggy_pixels[(94, 48)]);
    assert_eq!(bug.region.len(), 2);
    assert_eq!((bug.width, bug.height), (120, 60));
}

#[test]
fn one_readable_boundary_exonerates_the_column() {
    // White band above row 4, gray below. Run A is black on white, run B is
    // faint on gray; a bar in column 2 joins them into one blob.
    let background = |_: usize, y: usize| if y < 4 { Rgb::WHITE } else { GRAY };
    let joined = render(
        30,
        12,
        background,
        &[(2, 1, 14, 2, Rgb::BLACK), (2, 5, 14, 2, FAINT), (2, 3, 1, 2, Rgb::BLACK)],
    );
    assert!(detector().find_layout_bugs_in(&joined).unwrap().is_empty());

    // Without run A, run B alone is reported.
    let alone = render(30, 12, background, &[(2, 5, 14, 2, FAINT)]);
    assert_eq!(detector().find_layout_bugs_in(&alone).unwrap().len(), 1);
}

#[test]
fn analysis_is_deterministic_and_only_marks_text() {
    // A pseudo-random page of speckles and bars in low and high contrast.
    let mut seed: u32 = 0x2545_F491;
    let mut next = move || {
        seed ^= seed << 13;
        seed ^= seed >> 17;
        seed ^= seed << 5;
        seed
    };
    let mut rects = Vec::new();
    for _ in 0..60 {
        let x = (next() % 180) as usize;
        let y = (next() % 90) as usize;
        let w = 1 + (next() % 20) as usize;
        let h = 1 + (next() % 8) as usize;
        let shade = 100 + (next() % 80) as u8;
        rects.push((x, y, w, h, Rgb::new(shade, shade, shade)));
    }
    let page = on_gray(200, 100, &rects);
    let (shot, text) = page.into_parts();

    let first = detector().analyze(&shot, &text).unwrap();
    let second = detector().analyze(&shot, &text).unwrap();
    assert_eq!(mask_digest(&first.buggy_pixels), mask_digest(&second.buggy_pixels));
    assert_eq!(first, second);
    assert!(first.buggy_pixels.is_subset_of(&text));
    assert!(first.blobs_flagged <= first.blobs_examined - first.blobs_too_narrow);
}

#[test]
fn fingerprint_identifies_the_screenshot() {
    let page = on_gray(40, 20, &[(5, 5, 10, 8, FAINT)]);
    let bugs = detector().find_layout_bugs_in(&page).unwrap();
    let (shot, _) = page.into_parts();
    assert_eq!(bugs[0].screenshot_fingerprint, shot.fingerprint());
    assert_eq!(bugs[0].report().buggy_pixel_count, 80);
}
