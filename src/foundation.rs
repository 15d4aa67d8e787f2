pub mod error;
pub mod raster;
