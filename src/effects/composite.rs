use kurbo::Rect;

use crate::effects::mask::mul_div255;
use crate::foundation::error::{PreviewError, PreviewResult};
use crate::foundation::raster::{RGBA_CHANNELS, RasterImage};
use crate::layout::spec::Anchor;

/// Straight-alpha RGBA8 pixel.
pub type Rgba8 = [u8; 4];

/// How much of an overlay landed on the canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    /// The whole overlay lies inside the canvas.
    Full,
    /// Part of the overlay was cut off at the canvas edges.
    Clipped,
    /// No overlap; the canvas is returned unchanged.
    Outside,
}

impl Placement {
    /// True for the zero-overlap outcome.
    pub fn is_degenerate(self) -> bool {
        self == Self::Outside
    }
}

impl std::fmt::Display for Placement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Full => "full",
            Self::Clipped => "clipped",
            Self::Outside => "outside",
        })
    }
}

/// Alpha-over of a straight-alpha `src` onto `dst`.
///
/// Color: `src * sa + dst * (1 - sa)`. Alpha: `sa + da * (1 - sa)`.
pub fn over(dst: Rgba8, src: Rgba8) -> Rgba8 {
    let sa = src[3];
    if sa == 0 {
        return dst;
    }
    if sa == 255 {
        return src;
    }

    let inv = 255 - sa;
    let mut out = [0u8; 4];
    for i in 0..3 {
        out[i] = mul_div255(src[i], sa).saturating_add(mul_div255(dst[i], inv));
    }
    out[3] = sa.saturating_add(mul_div255(dst[3], inv));
    out
}

/// Blend `overlay` onto `canvas` with its top-left corner at `anchor`, clipped to the
/// canvas bounds.
///
/// Both rasters must be RGBA. The canvas is taken by value and handed back, so callers never
/// observe a half-blended buffer on error.
pub fn overlay_at(
    mut canvas: RasterImage,
    overlay: &RasterImage,
    anchor: Anchor,
) -> PreviewResult<(RasterImage, Placement)> {
    canvas.validate()?;
    overlay.validate()?;
    if !canvas.has_alpha() || !overlay.has_alpha() {
        return Err(PreviewError::invalid_input(
            "overlay_at expects rgba8 canvas and overlay",
        ));
    }

    let canvas_rect = Rect::new(
        0.0,
        0.0,
        f64::from(canvas.width),
        f64::from(canvas.height),
    );
    let overlay_rect = Rect::from_origin_size(
        (f64::from(anchor.x), f64::from(anchor.y)),
        (f64::from(overlay.width), f64::from(overlay.height)),
    );
    let visible = canvas_rect.intersect(overlay_rect);
    if visible.area() <= 0.0 {
        return Ok((canvas, Placement::Outside));
    }
    let placement = if visible == overlay_rect {
        Placement::Full
    } else {
        Placement::Clipped
    };

    // Integer bounds; the rect corners are whole numbers by construction.
    let (x0, y0) = (visible.x0 as i64, visible.y0 as i64);
    let (x1, y1) = (visible.x1 as i64, visible.y1 as i64);
    let (ax, ay) = (i64::from(anchor.x), i64::from(anchor.y));

    let c = usize::from(RGBA_CHANNELS);
    let canvas_stride = canvas.width as usize * c;
    let overlay_stride = overlay.width as usize * c;
    for y in y0..y1 {
        let dst_row = y as usize * canvas_stride;
        let src_row = (y - ay) as usize * overlay_stride;
        for x in x0..x1 {
            let di = dst_row + x as usize * c;
            let si = src_row + (x - ax) as usize * c;
            let d = &mut canvas.data[di..di + c];
            let s = &overlay.data[si..si + c];
            let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
            d.copy_from_slice(&out);
        }
    }

    Ok((canvas, placement))
}

#[cfg(test)]
#[path = "../../tests/unit/effects/composite.rs"]
mod tests;
