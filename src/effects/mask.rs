use kurbo::Point;

use crate::foundation::error::{PreviewError, PreviewResult};
use crate::foundation::raster::{AlphaMask, OPAQUE, RGBA_CHANNELS, RasterImage};

/// Circular mask of `size x size` pixels: opaque inside the inscribed circle, transparent
/// outside.
///
/// The edge is hard and sampled at pixel centers: pixel `(x, y)` is opaque iff
/// `(x + 0.5, y + 0.5)` lies within `size / 2` of the mask center. All coordinates involved
/// are exact in `f64`, so the mask is symmetric and identical across calls.
pub fn generate_mask(size: u32) -> PreviewResult<AlphaMask> {
    if size == 0 {
        return Err(PreviewError::invalid_argument("mask size must be > 0"));
    }

    let radius = f64::from(size) / 2.0;
    let center = Point::new(radius, radius);
    let radius_sq = radius * radius;

    let side = size as usize;
    let mut data = vec![0u8; side * side];
    for (y, row) in data.chunks_exact_mut(side).enumerate() {
        let py = y as f64 + 0.5;
        for (x, m) in row.iter_mut().enumerate() {
            let p = Point::new(x as f64 + 0.5, py);
            if (p - center).hypot2() <= radius_sq {
                *m = OPAQUE;
            }
        }
    }

    Ok(AlphaMask {
        width: size,
        height: size,
        data,
    })
}

/// Multiply the image's alpha (opaque if absent) by the mask, returning a new RGBA raster.
///
/// The mask must match the image dimensions; it need not be square.
pub fn apply_mask(img: &RasterImage, mask: &AlphaMask) -> PreviewResult<RasterImage> {
    img.validate()?;
    mask.validate()?;
    if img.width != mask.width || img.height != mask.height {
        return Err(PreviewError::invalid_argument(format!(
            "mask is {}x{} but image is {}x{}",
            mask.width, mask.height, img.width, img.height
        )));
    }

    let mut out = img.clone().into_rgba();
    for (px, &m) in out
        .data
        .chunks_exact_mut(usize::from(RGBA_CHANNELS))
        .zip(&mask.data)
    {
        px[3] = mul_div255(px[3], m);
    }
    Ok(out)
}

pub(crate) fn mul_div255(x: u8, y: u8) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/effects/mask.rs"]
mod tests;
