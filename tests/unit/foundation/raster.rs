use super::*;

#[test]
fn new_rejects_zero_area() {
    let err = RasterImage::from_rgb8(0, 4, vec![]).unwrap_err();
    assert!(matches!(err, PreviewError::InvalidInput(_)));
}

#[test]
fn new_rejects_length_mismatch() {
    let err = RasterImage::from_rgba8(2, 2, vec![0; 15]).unwrap_err();
    assert!(matches!(err, PreviewError::InvalidInput(_)));
}

#[test]
fn new_rejects_unsupported_channel_count() {
    let err = RasterImage::new(1, 1, 2, vec![0, 0]).unwrap_err();
    assert!(matches!(err, PreviewError::InvalidInput(_)));
}

#[test]
fn struct_literal_is_caught_by_validate() {
    let img = RasterImage {
        width: 3,
        height: 1,
        channels: 4,
        data: vec![0; 4],
    };
    assert!(matches!(
        img.validate(),
        Err(PreviewError::InvalidInput(_))
    ));
}

#[test]
fn filled_repeats_pixel() {
    let img = RasterImage::filled(3, 2, &[1, 2, 3]).unwrap();
    assert_eq!(img.channels, 3);
    assert_eq!(img.data.len(), 18);
    assert_eq!(img.pixel(2, 1), Some(&[1u8, 2, 3][..]));
}

#[test]
fn pixel_out_of_bounds_is_none() {
    let img = RasterImage::filled(2, 2, &[0, 0, 0, 0]).unwrap();
    assert!(img.pixel(2, 0).is_none());
    assert!(img.pixel(0, 2).is_none());
}

#[test]
fn into_rgba_adds_opaque_alpha() {
    let img = RasterImage::from_rgb8(2, 1, vec![10, 20, 30, 40, 50, 60]).unwrap();
    let rgba = img.into_rgba();
    assert_eq!(rgba.channels, 4);
    assert_eq!(rgba.data, vec![10, 20, 30, 255, 40, 50, 60, 255]);
    assert_eq!(rgba.alpha_at(1, 0), Some(255));
}

#[test]
fn into_rgba_keeps_existing_alpha() {
    let img = RasterImage::from_rgba8(1, 1, vec![1, 2, 3, 4]).unwrap();
    assert_eq!(img.clone().into_rgba(), img);
}

#[test]
fn alpha_of_rgb_is_opaque() {
    let img = RasterImage::filled(1, 1, &[9, 9, 9]).unwrap();
    assert_eq!(img.alpha_at(0, 0), Some(OPAQUE));
}

#[test]
fn mask_get_and_validate() {
    let mask = AlphaMask {
        width: 2,
        height: 1,
        data: vec![0, 255],
    };
    mask.validate().unwrap();
    assert_eq!(mask.get(1, 0), Some(255));
    assert_eq!(mask.get(2, 0), None);

    let bad = AlphaMask {
        width: 2,
        height: 2,
        data: vec![0; 3],
    };
    assert!(matches!(bad.validate(), Err(PreviewError::InvalidInput(_))));
}
