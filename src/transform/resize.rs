use image::{ImageBuffer, Pixel, Rgb, Rgba, imageops};

use crate::effects::mask::mul_div255;
use crate::foundation::error::{PreviewError, PreviewResult};
use crate::foundation::raster::{RGB_CHANNELS, RGBA_CHANNELS, RasterImage};

/// Resampling kernel used when a resize actually changes dimensions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResampleFilter {
    Nearest,
    Triangle,
    CatmullRom,
    #[default]
    Lanczos3,
}

impl From<ResampleFilter> for imageops::FilterType {
    fn from(f: ResampleFilter) -> Self {
        match f {
            ResampleFilter::Nearest => Self::Nearest,
            ResampleFilter::Triangle => Self::Triangle,
            ResampleFilter::CatmullRom => Self::CatmullRom,
            ResampleFilter::Lanczos3 => Self::Lanczos3,
        }
    }
}

/// Source region in pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRect {
    fn full(width: u32, height: u32) -> Self {
        Self {
            x: 0,
            y: 0,
            width,
            height,
        }
    }

    fn is_full(&self, width: u32, height: u32) -> bool {
        *self == Self::full(width, height)
    }
}

/// Largest centered region of a `sw x sh` source with the `tw:th` aspect ratio.
///
/// Matching aspect ratios are detected with integer cross-multiplication and never crop.
pub fn center_crop_rect(sw: u32, sh: u32, tw: u32, th: u32) -> CropRect {
    let cross_s = u64::from(sw) * u64::from(th);
    let cross_t = u64::from(sh) * u64::from(tw);
    if cross_s == cross_t || tw == 0 || th == 0 {
        return CropRect::full(sw, sh);
    }

    if cross_s > cross_t {
        // Wider than the target: keep full height.
        let w = proportional(sh, tw, th).clamp(1, sw);
        CropRect {
            x: (sw - w) / 2,
            y: 0,
            width: w,
            height: sh,
        }
    } else {
        let h = proportional(sw, th, tw).clamp(1, sh);
        CropRect {
            x: 0,
            y: (sh - h) / 2,
            width: sw,
            height: h,
        }
    }
}

/// Stretch-to-fill: map the source bounds directly onto `width x height`.
pub fn resize_stretch(
    src: &RasterImage,
    width: u32,
    height: u32,
    filter: ResampleFilter,
) -> PreviewResult<RasterImage> {
    check_target(width, height)?;
    src.validate()?;
    resample(src, CropRect::full(src.width, src.height), width, height, filter)
}

/// Center-crop-to-fill: crop the source to the target aspect ratio, then scale.
pub fn resize_center_crop(
    src: &RasterImage,
    width: u32,
    height: u32,
    filter: ResampleFilter,
) -> PreviewResult<RasterImage> {
    check_target(width, height)?;
    src.validate()?;
    let crop = center_crop_rect(src.width, src.height, width, height);
    resample(src, crop, width, height, filter)
}

fn check_target(width: u32, height: u32) -> PreviewResult<()> {
    if width == 0 || height == 0 {
        return Err(PreviewError::invalid_argument(format!(
            "resize target must be positive, got {width}x{height}"
        )));
    }
    Ok(())
}

fn resample(
    src: &RasterImage,
    crop: CropRect,
    width: u32,
    height: u32,
    filter: ResampleFilter,
) -> PreviewResult<RasterImage> {
    let cropped;
    let src = if crop.is_full(src.width, src.height) {
        src
    } else {
        cropped = crop_raster(src, crop)?;
        &cropped
    };
    if src.width == width && src.height == height {
        return Ok(src.clone());
    }

    let data = match src.channels {
        RGB_CHANNELS => resize_buffer::<Rgb<u8>>(src, &src.data, width, height, filter)?,
        RGBA_CHANNELS => {
            // Filter in premultiplied space so transparent pixels carry no color weight.
            let mut premul = src.data.clone();
            premultiply_in_place(&mut premul);
            let mut data = resize_buffer::<Rgba<u8>>(src, &premul, width, height, filter)?;
            unpremultiply_in_place(&mut data);
            data
        }
        n => {
            return Err(PreviewError::invalid_input(format!(
                "unsupported channel count {n}"
            )));
        }
    };
    RasterImage::new(width, height, src.channels, data)
}

fn crop_raster(src: &RasterImage, crop: CropRect) -> PreviewResult<RasterImage> {
    let c = usize::from(src.channels);
    let stride = src.width as usize * c;
    let row_len = crop.width as usize * c;
    let mut data = Vec::with_capacity(row_len * crop.height as usize);
    for y in crop.y..crop.y + crop.height {
        let start = y as usize * stride + crop.x as usize * c;
        data.extend_from_slice(&src.data[start..start + row_len]);
    }
    RasterImage::new(crop.width, crop.height, src.channels, data)
}

fn resize_buffer<P>(
    src: &RasterImage,
    pixels: &[u8],
    width: u32,
    height: u32,
    filter: ResampleFilter,
) -> PreviewResult<Vec<u8>>
where
    P: Pixel<Subpixel = u8> + 'static,
{
    let buf = ImageBuffer::<P, &[u8]>::from_raw(src.width, src.height, pixels)
        .ok_or_else(|| PreviewError::invalid_input("raster buffer too small for its shape"))?;
    Ok(imageops::resize(&buf, width, height, filter.into()).into_raw())
}

fn premultiply_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(usize::from(RGBA_CHANNELS)) {
        let a = px[3];
        for c in &mut px[..3] {
            *c = mul_div255(*c, a);
        }
    }
}

fn unpremultiply_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(usize::from(RGBA_CHANNELS)) {
        let a = u16::from(px[3]);
        if a == 0 {
            px[..3].fill(0);
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

/// `round(a * num / den)` in integer math.
fn proportional(a: u32, num: u32, den: u32) -> u32 {
    let den = u64::from(den);
    ((u64::from(a) * u64::from(num) + den / 2) / den) as u32
}

#[cfg(test)]
#[path = "../../tests/unit/transform/resize.rs"]
mod tests;
