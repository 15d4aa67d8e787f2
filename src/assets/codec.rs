use std::{io::Cursor, path::Path};

use anyhow::Context;
use image::{DynamicImage, ExtendedColorType, GrayImage, ImageFormat};

use crate::foundation::{
    error::{PreviewError, PreviewResult},
    raster::{AlphaMask, RGB_CHANNELS, RGBA_CHANNELS, RasterImage},
};

/// Decode encoded image bytes (PNG, JPEG, ...) into a raster.
///
/// Opaque color formats decode to RGB; anything with alpha (or grayscale/16-bit variants)
/// is converted to 8-bit RGB or RGBA.
pub fn decode_image(bytes: &[u8]) -> PreviewResult<RasterImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    Ok(raster_from_dynamic(dyn_img))
}

/// Read and decode an image file.
pub fn load_image(path: impl AsRef<Path>) -> PreviewResult<RasterImage> {
    let path = path.as_ref();
    let dyn_img =
        image::open(path).with_context(|| format!("open image '{}'", path.display()))?;
    Ok(raster_from_dynamic(dyn_img))
}

pub fn raster_from_dynamic(img: DynamicImage) -> RasterImage {
    let (width, height) = (img.width(), img.height());
    let (channels, data) = match img {
        DynamicImage::ImageRgb8(buf) => (RGB_CHANNELS, buf.into_raw()),
        DynamicImage::ImageRgba8(buf) => (RGBA_CHANNELS, buf.into_raw()),
        other if other.color().has_alpha() => (RGBA_CHANNELS, other.to_rgba8().into_raw()),
        other => (RGB_CHANNELS, other.to_rgb8().into_raw()),
    };
    RasterImage {
        width,
        height,
        channels,
        data,
    }
}

/// Encode a raster as PNG bytes.
pub fn encode_png(img: &RasterImage) -> PreviewResult<Vec<u8>> {
    img.validate()?;
    let mut out = Cursor::new(Vec::new());
    image::write_buffer_with_format(
        &mut out,
        &img.data,
        img.width,
        img.height,
        color_type(img)?,
        ImageFormat::Png,
    )
    .context("encode png")?;
    Ok(out.into_inner())
}

/// Write a raster to `path` as PNG, creating parent directories.
pub fn save_png(img: &RasterImage, path: impl AsRef<Path>) -> PreviewResult<()> {
    let path = path.as_ref();
    img.validate()?;
    ensure_parent_dir(path)?;
    image::save_buffer_with_format(
        path,
        &img.data,
        img.width,
        img.height,
        color_type(img)?,
        ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

/// Copy a mask into an `image` grayscale buffer.
pub fn mask_to_gray(mask: &AlphaMask) -> PreviewResult<GrayImage> {
    mask.validate()?;
    GrayImage::from_raw(mask.width, mask.height, mask.data.clone())
        .ok_or_else(|| PreviewError::invalid_input("mask buffer does not match its shape"))
}

/// Write a mask to `path` as an 8-bit grayscale PNG.
pub fn save_mask_png(mask: &AlphaMask, path: impl AsRef<Path>) -> PreviewResult<()> {
    let path = path.as_ref();
    let gray = mask_to_gray(mask)?;
    ensure_parent_dir(path)?;
    gray.save_with_format(path, ImageFormat::Png)
        .with_context(|| format!("write mask png '{}'", path.display()))?;
    Ok(())
}

fn color_type(img: &RasterImage) -> PreviewResult<ExtendedColorType> {
    match img.channels {
        RGB_CHANNELS => Ok(ExtendedColorType::Rgb8),
        RGBA_CHANNELS => Ok(ExtendedColorType::Rgba8),
        n => Err(PreviewError::invalid_input(format!(
            "unsupported channel count {n}"
        ))),
    }
}

fn ensure_parent_dir(path: &Path) -> PreviewResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/codec.rs"]
mod tests;
