use std::collections::{HashMap, hash_map::Entry};

use crate::{
    effects::composite::{Placement, overlay_at},
    effects::mask::{apply_mask, generate_mask},
    foundation::error::{PreviewError, PreviewResult},
    foundation::raster::RasterImage,
    layout::spec::LayoutSpec,
    transform::resize::{ResampleFilter, resize_center_crop, resize_stretch},
};

/// Knobs for [`compose_previews_with`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ComposeOpts {
    /// Kernel for both the banner stretch and the portrait crop-resize.
    pub filter: ResampleFilter,
}

/// One rendered preview.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompositeResult {
    /// Name of the layout that produced this image.
    pub layout: String,
    /// RGBA raster with the layout's canvas dimensions.
    pub image: RasterImage,
    /// Whether the portrait landed fully, partially or not at all.
    pub placement: Placement,
}

/// Render one preview per layout, in `layouts` order, with default options.
pub fn compose_previews(
    portrait: &RasterImage,
    banner: &RasterImage,
    layouts: &[LayoutSpec],
) -> PreviewResult<Vec<CompositeResult>> {
    compose_previews_with(portrait, banner, layouts, &ComposeOpts::default())
}

/// Render one preview per layout, in `layouts` order.
///
/// Inputs and every layout are validated before any pixel work, so the call either returns
/// all previews or an error. Layouts sharing a portrait diameter share one masked portrait.
#[tracing::instrument(skip(portrait, banner, layouts), fields(layout_count = layouts.len()))]
pub fn compose_previews_with(
    portrait: &RasterImage,
    banner: &RasterImage,
    layouts: &[LayoutSpec],
    opts: &ComposeOpts,
) -> PreviewResult<Vec<CompositeResult>> {
    check_input("portrait", portrait)?;
    check_input("banner", banner)?;
    for layout in layouts {
        layout.validate()?;
    }

    let mut masked_by_diameter = HashMap::<u32, RasterImage>::new();
    let mut out = Vec::with_capacity(layouts.len());
    for layout in layouts {
        let canvas = resize_stretch(
            banner,
            layout.canvas_width,
            layout.canvas_height,
            opts.filter,
        )?
        .into_rgba();

        let d = layout.portrait_diameter;
        let masked = match masked_by_diameter.entry(d) {
            Entry::Occupied(e) => {
                tracing::debug!(diameter = d, "reusing masked portrait");
                e.into_mut()
            }
            Entry::Vacant(e) => {
                let cropped = resize_center_crop(portrait, d, d, opts.filter)?;
                let mask = generate_mask(d)?;
                e.insert(apply_mask(&cropped, &mask)?)
            }
        };

        let (image, placement) = overlay_at(canvas, masked, layout.anchor)?;
        match placement {
            Placement::Full => {}
            Placement::Clipped => {
                tracing::debug!(layout = %layout.name, "portrait clipped to canvas")
            }
            Placement::Outside => {
                tracing::debug!(layout = %layout.name, "portrait entirely off-canvas")
            }
        }

        out.push(CompositeResult {
            layout: layout.name.clone(),
            image,
            placement,
        });
    }
    Ok(out)
}

fn check_input(role: &str, img: &RasterImage) -> PreviewResult<()> {
    img.validate().map_err(|e| match e {
        PreviewError::InvalidInput(msg) => PreviewError::invalid_input(format!("{role}: {msg}")),
        other => other,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/preview.rs"]
mod tests;
