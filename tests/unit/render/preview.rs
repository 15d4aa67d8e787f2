use super::*;
use crate::layout::spec::Anchor;

const RED: [u8; 4] = [255, 0, 0, 255];
const BLUE: [u8; 4] = [0, 0, 255, 255];

fn red_portrait() -> RasterImage {
    RasterImage::filled(500, 500, &[255, 0, 0]).unwrap()
}

fn blue_banner() -> RasterImage {
    RasterImage::filled(2000, 500, &[0, 0, 255]).unwrap()
}

#[test]
fn standard_layouts_produce_expected_sizes_in_order() {
    let out =
        compose_previews(&red_portrait(), &blue_banner(), &LayoutSpec::standard()).unwrap();
    assert_eq!(out.len(), 2);
    assert_eq!(out[0].layout, "desktop");
    assert_eq!((out[0].image.width, out[0].image.height), (1584, 396));
    assert_eq!(out[1].layout, "mobile");
    assert_eq!((out[1].image.width, out[1].image.height), (800, 450));
    for r in &out {
        assert_eq!(r.image.channels, 4);
        // Both standard portraits hang past the bottom edge of their banner.
        assert_eq!(r.placement, Placement::Clipped);
    }
}

#[test]
fn desktop_scenario_pixels() {
    let out =
        compose_previews(&red_portrait(), &blue_banner(), &[LayoutSpec::desktop()]).unwrap();
    let img = &out[0].image;
    assert_eq!(img.pixel(60 + 110, 240 + 110), Some(&RED[..]));
    assert_eq!(img.pixel(5, 5), Some(&BLUE[..]));
    assert_eq!(img.pixel(60, 240), Some(&BLUE[..]));
}

#[test]
fn mobile_scenario_pixels() {
    let out =
        compose_previews(&red_portrait(), &blue_banner(), &[LayoutSpec::mobile()]).unwrap();
    let img = &out[0].image;
    assert_eq!(img.pixel(290 + 110, 280 + 110), Some(&RED[..]));
    assert_eq!(img.pixel(290, 280), Some(&BLUE[..]));
    assert_eq!(img.pixel(799, 0), Some(&BLUE[..]));
}

#[test]
fn empty_layout_list_is_empty_result() {
    let out = compose_previews(&red_portrait(), &blue_banner(), &[]).unwrap();
    assert!(out.is_empty());
}

#[test]
fn zero_width_banner_is_invalid_input() {
    let banner = RasterImage {
        width: 0,
        height: 500,
        channels: 3,
        data: vec![],
    };
    let err =
        compose_previews(&red_portrait(), &banner, &LayoutSpec::standard()).unwrap_err();
    assert!(matches!(err, PreviewError::InvalidInput(_)));
    assert!(err.to_string().contains("banner"));
}

#[test]
fn malformed_portrait_is_invalid_input() {
    let portrait = RasterImage {
        width: 10,
        height: 10,
        channels: 4,
        data: vec![0; 10],
    };
    let err =
        compose_previews(&portrait, &blue_banner(), &LayoutSpec::standard()).unwrap_err();
    assert!(matches!(err, PreviewError::InvalidInput(_)));
    assert!(err.to_string().contains("portrait"));
}

#[test]
fn any_bad_layout_fails_the_whole_call() {
    let layouts = vec![
        LayoutSpec::desktop(),
        LayoutSpec::new("broken", 100, 100, 0, Anchor::default()),
    ];
    assert!(matches!(
        compose_previews(&red_portrait(), &blue_banner(), &layouts),
        Err(PreviewError::InvalidArgument(_))
    ));
}

#[test]
fn off_canvas_anchor_yields_resized_banner() {
    let layouts = vec![LayoutSpec::new("far", 64, 16, 8, Anchor::new(64, 0))];
    let banner = blue_banner();
    let out = compose_previews(&red_portrait(), &banner, &layouts).unwrap();

    let expected = resize_stretch(&banner, 64, 16, ResampleFilter::default())
        .unwrap()
        .into_rgba();
    assert_eq!(out[0].placement, Placement::Outside);
    assert!(out[0].placement.is_degenerate());
    assert_eq!(out[0].image, expected);
}

#[test]
fn small_canvas_clips_the_portrait() {
    let layouts = vec![LayoutSpec::new("tiny", 100, 100, 220, Anchor::new(0, 0))];
    let out = compose_previews(&red_portrait(), &blue_banner(), &layouts).unwrap();
    let r = &out[0];
    assert_eq!(r.placement, Placement::Clipped);
    assert_eq!((r.image.width, r.image.height), (100, 100));
    // (99, 99) is well inside the 220px circle centered at (110, 110).
    assert_eq!(r.image.pixel(99, 99), Some(&RED[..]));
    assert_eq!(r.image.pixel(0, 0), Some(&BLUE[..]));
}

#[test]
fn inputs_are_not_mutated() {
    let portrait = red_portrait();
    let banner = blue_banner();
    let (p0, b0) = (portrait.clone(), banner.clone());
    let _ = compose_previews(&portrait, &banner, &LayoutSpec::standard()).unwrap();
    assert_eq!(portrait, p0);
    assert_eq!(banner, b0);
}

#[test]
fn transparent_portrait_pixels_show_banner() {
    let portrait = RasterImage::filled(50, 50, &[255, 0, 0, 0]).unwrap();
    let layouts = vec![LayoutSpec::new("l", 40, 40, 20, Anchor::new(10, 10))];
    let out = compose_previews(&portrait, &blue_banner(), &layouts).unwrap();
    assert!(out[0].image.data.chunks_exact(4).all(|px| px == BLUE));
}

#[test]
fn portrait_transparency_leaves_no_dark_fringe() {
    let (w, h) = (40u32, 40u32);
    let mut data = Vec::with_capacity((w * h * 4) as usize);
    for _ in 0..h {
        for x in 0..w {
            let px = if x < w / 2 {
                [0, 0, 0, 0]
            } else {
                [255, 255, 255, 255]
            };
            data.extend_from_slice(&px);
        }
    }
    let portrait = RasterImage::from_rgba8(w, h, data).unwrap();
    let banner = RasterImage::filled(100, 100, &[255, 255, 255]).unwrap();
    let layouts = vec![LayoutSpec::new("halo", 100, 100, 17, Anchor::new(10, 10))];

    let out = compose_previews(&portrait, &banner, &layouts).unwrap();
    assert!(out[0].image.data.iter().all(|&b| b == 255));
}

#[test]
fn filter_option_is_honored() {
    let opts = ComposeOpts {
        filter: ResampleFilter::Nearest,
    };
    let out = compose_previews_with(
        &red_portrait(),
        &blue_banner(),
        &[LayoutSpec::desktop()],
        &opts,
    )
    .unwrap();
    assert_eq!(out[0].image.pixel(170, 350), Some(&RED[..]));
}
