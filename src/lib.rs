//! Profile header preview compositing.
//!
//! Takes a portrait and a banner, both as decoded rasters, and renders what a profile header
//! looks like with the portrait cut to a circle and laid over the banner, once per target
//! layout (desktop and mobile by default).
//!
//! # Pipeline
//!
//! 1. **Banner**: stretch-to-fill onto the layout canvas, promoted to RGBA.
//! 2. **Portrait**: center-crop-to-fill to the layout diameter, then masked by
//!    [`generate_mask`].
//! 3. **Composite**: alpha-over at the layout anchor, clipped to the canvas.
//!
//! Everything is synchronous and pure: inputs are borrowed, outputs are freshly allocated,
//! and nothing is cached between calls. Decoding and encoding live in the separate
//! [`decode_image`]/[`encode_png`] helpers so the core never sees encoded bytes.
//!
//! ```no_run
//! use profile_preview::{LayoutSpec, compose_previews, load_image, save_png};
//!
//! # fn main() -> profile_preview::PreviewResult<()> {
//! let portrait = load_image("headshot.png")?;
//! let banner = load_image("banner.png")?;
//! for preview in compose_previews(&portrait, &banner, &LayoutSpec::standard())? {
//!     save_png(&preview.image, format!("{}.png", preview.layout))?;
//! }
//! # Ok(())
//! # }
//! ```
#![forbid(unsafe_code)]

mod assets;
mod effects;
mod foundation;
mod layout;
mod render;
mod transform;

pub use assets::codec::{
    decode_image, encode_png, load_image, mask_to_gray, raster_from_dynamic, save_mask_png,
    save_png,
};
pub use effects::composite::{Placement, Rgba8, over, overlay_at};
pub use effects::mask::{apply_mask, generate_mask};
pub use foundation::error::{PreviewError, PreviewResult};
pub use foundation::raster::{AlphaMask, OPAQUE, RGB_CHANNELS, RGBA_CHANNELS, RasterImage};
pub use layout::spec::{Anchor, LayoutSet, LayoutSpec};
pub use render::preview::{ComposeOpts, CompositeResult, compose_previews, compose_previews_with};
pub use transform::resize::{
    CropRect, ResampleFilter, center_crop_rect, resize_center_crop, resize_stretch,
};
