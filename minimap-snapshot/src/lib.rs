pub mod scene;

#[cfg(feature = "png")]
pub mod raster;
