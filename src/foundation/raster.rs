use crate::foundation::error::{PreviewError, PreviewResult};

/// Channel count of an RGB raster.
pub const RGB_CHANNELS: u8 = 3;
/// Channel count of an RGBA raster.
pub const RGBA_CHANNELS: u8 = 4;
/// Fully opaque 8-bit alpha.
pub const OPAQUE: u8 = 255;

/// Owned 8-bit raster in row-major order, RGB or straight-alpha RGBA.
///
/// Fields are public so callers can hand over buffers they already own. Every public
/// operation re-checks the shape through [`RasterImage::validate`] before touching pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Channels per pixel, 3 or 4.
    pub channels: u8,
    /// Pixel bytes, `width * height * channels` long.
    pub data: Vec<u8>,
}

impl RasterImage {
    /// Build a raster, failing with [`PreviewError::InvalidInput`] if the shape is inconsistent.
    pub fn new(width: u32, height: u32, channels: u8, data: Vec<u8>) -> PreviewResult<Self> {
        let img = Self {
            width,
            height,
            channels,
            data,
        };
        img.validate()?;
        Ok(img)
    }

    /// Build a 3-channel raster from packed RGB bytes.
    pub fn from_rgb8(width: u32, height: u32, data: Vec<u8>) -> PreviewResult<Self> {
        Self::new(width, height, RGB_CHANNELS, data)
    }

    /// Build a 4-channel raster from packed straight-alpha RGBA bytes.
    pub fn from_rgba8(width: u32, height: u32, data: Vec<u8>) -> PreviewResult<Self> {
        Self::new(width, height, RGBA_CHANNELS, data)
    }

    /// Raster of a single repeated pixel; the channel count is `pixel.len()`.
    pub fn filled(width: u32, height: u32, pixel: &[u8]) -> PreviewResult<Self> {
        let channels = u8::try_from(pixel.len())
            .map_err(|_| PreviewError::invalid_input("fill pixel has too many channels"))?;
        check_channels(channels)?;
        let len = byte_len(width, height, channels)?;
        let data = pixel.repeat(len / pixel.len());
        Self::new(width, height, channels, data)
    }

    /// Check the raster invariants: positive area, 3 or 4 channels, matching byte length.
    pub fn validate(&self) -> PreviewResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(PreviewError::invalid_input(format!(
                "raster has zero area ({}x{})",
                self.width, self.height
            )));
        }
        check_channels(self.channels)?;
        let expected = byte_len(self.width, self.height, self.channels)?;
        if self.data.len() != expected {
            return Err(PreviewError::invalid_input(format!(
                "raster buffer is {} bytes, expected {expected} for {}x{}x{}",
                self.data.len(),
                self.width,
                self.height,
                self.channels
            )));
        }
        Ok(())
    }

    /// True for 4-channel rasters.
    pub fn has_alpha(&self) -> bool {
        self.channels == RGBA_CHANNELS
    }

    /// Bytes of pixel `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let c = usize::from(self.channels);
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * c;
        self.data.get(idx..idx + c)
    }

    /// Alpha of pixel `(x, y)`; rasters without an alpha channel are opaque.
    pub fn alpha_at(&self, x: u32, y: u32) -> Option<u8> {
        let px = self.pixel(x, y)?;
        Some(if self.has_alpha() { px[3] } else { OPAQUE })
    }

    /// Promote to RGBA, treating a missing alpha channel as fully opaque.
    pub fn into_rgba(self) -> Self {
        if self.has_alpha() {
            return self;
        }
        let mut data = Vec::with_capacity(self.data.len() / 3 * 4);
        for px in self.data.chunks_exact(3) {
            data.extend_from_slice(px);
            data.push(OPAQUE);
        }
        Self {
            width: self.width,
            height: self.height,
            channels: RGBA_CHANNELS,
            data,
        }
    }
}

/// Single-channel 8-bit opacity map (0 transparent, 255 opaque).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlphaMask {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl AlphaMask {
    /// Opacity at `(x, y)`, or `None` when out of bounds.
    pub fn get(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data
            .get((y as usize) * (self.width as usize) + (x as usize))
            .copied()
    }

    /// Check positive area and a `width * height` byte buffer.
    pub fn validate(&self) -> PreviewResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(PreviewError::invalid_input(format!(
                "mask has zero area ({}x{})",
                self.width, self.height
            )));
        }
        let expected = byte_len(self.width, self.height, 1)?;
        if self.data.len() != expected {
            return Err(PreviewError::invalid_input(format!(
                "mask buffer is {} bytes, expected {expected}",
                self.data.len()
            )));
        }
        Ok(())
    }
}

fn check_channels(channels: u8) -> PreviewResult<()> {
    match channels {
        RGB_CHANNELS | RGBA_CHANNELS => Ok(()),
        n => Err(PreviewError::invalid_input(format!(
            "unsupported channel count {n} (expected 3 or 4)"
        ))),
    }
}

fn byte_len(width: u32, height: u32, channels: u8) -> PreviewResult<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(usize::from(channels)))
        .ok_or_else(|| PreviewError::invalid_input("raster buffer size overflow"))
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/raster.rs"]
mod tests;
