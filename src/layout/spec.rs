use std::{
    collections::HashSet,
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use crate::foundation::error::{PreviewError, PreviewResult};

/// Top-left paste offset in canvas pixels. May be negative.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Anchor {
    pub x: i32,
    pub y: i32,
}

impl Anchor {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// One target canvas: banner size, portrait diameter and where the portrait goes.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LayoutSpec {
    pub name: String,
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub portrait_diameter: u32,
    pub anchor: Anchor,
}

impl LayoutSpec {
    pub fn new(
        name: impl Into<String>,
        canvas_width: u32,
        canvas_height: u32,
        portrait_diameter: u32,
        anchor: Anchor,
    ) -> Self {
        Self {
            name: name.into(),
            canvas_width,
            canvas_height,
            portrait_diameter,
            anchor,
        }
    }

    /// Desktop profile header: 1584x396 banner, 220px portrait near the bottom-left.
    pub fn desktop() -> Self {
        Self::new("desktop", 1584, 396, 220, Anchor::new(60, 240))
    }

    /// Mobile profile header: 800x450 banner, 220px portrait near the upper center.
    pub fn mobile() -> Self {
        Self::new("mobile", 800, 450, 220, Anchor::new(290, 280))
    }

    /// `[desktop, mobile]`, in that order.
    pub fn standard() -> Vec<Self> {
        vec![Self::desktop(), Self::mobile()]
    }

    /// Reject zero canvas dimensions and zero diameters.
    ///
    /// An anchor that keeps the portrait entirely off-canvas is accepted; compositing reports
    /// it as a degenerate placement instead.
    pub fn validate(&self) -> PreviewResult<()> {
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(PreviewError::invalid_argument(format!(
                "layout '{}': canvas must be positive, got {}x{}",
                self.name, self.canvas_width, self.canvas_height
            )));
        }
        if self.portrait_diameter == 0 {
            return Err(PreviewError::invalid_argument(format!(
                "layout '{}': portrait diameter must be > 0",
                self.name
            )));
        }
        Ok(())
    }
}

/// Ordered list of layouts, as stored in a JSON layout file.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LayoutSet {
    pub layouts: Vec<LayoutSpec>,
}

impl LayoutSet {
    pub fn standard() -> Self {
        Self {
            layouts: LayoutSpec::standard(),
        }
    }

    pub fn from_reader<R: Read>(r: R) -> PreviewResult<Self> {
        let set: Self = serde_json::from_reader(r)
            .map_err(|e| PreviewError::config(format!("parse layout JSON: {e}")))?;
        set.validate()?;
        Ok(set)
    }

    pub fn from_json_str(s: &str) -> PreviewResult<Self> {
        Self::from_reader(s.as_bytes())
    }

    pub fn from_path(path: impl AsRef<Path>) -> PreviewResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            PreviewError::config(format!("open layout JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Layout names double as output file stems, so they must be non-empty, unique and made
    /// of ASCII alphanumerics, `-` or `_`.
    pub fn validate(&self) -> PreviewResult<()> {
        if self.layouts.is_empty() {
            return Err(PreviewError::config("layout set is empty"));
        }
        let mut seen = HashSet::with_capacity(self.layouts.len());
        for layout in &self.layouts {
            let name_ok = !layout.name.is_empty()
                && layout
                    .name
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
            if !name_ok {
                return Err(PreviewError::config(format!(
                    "invalid layout name '{}'",
                    layout.name
                )));
            }
            if !seen.insert(layout.name.as_str()) {
                return Err(PreviewError::config(format!(
                    "duplicate layout name '{}'",
                    layout.name
                )));
            }
            layout.validate()?;
        }
        Ok(())
    }
}

impl Default for LayoutSet {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/spec.rs"]
mod tests;
