use anyhow::{Context, Result};
use std::path::Path;

use libgcl_media::Raster;

/// Load any supported image as 8-bit greyscale
pub fn read_gray(path: &Path) -> Result<Raster> {
    let img = image::open(path).context("Could not load image")?.into_luma8();
    let (width, height) = img.dimensions();
    Ok(Raster::new(width, height, img.into_raw())?)
}

/// Save a raster as an 8-bit greyscale image, format chosen by extension
pub fn write_gray(path: &Path, raster: &Raster) -> Result<()> {
    let img =
        image::GrayImage::from_raw(raster.width(), raster.height(), raster.pixels().to_vec())
            .context("Pixel buffer does not match raster dimensions")?;
    img.save(path).context("Failed to save decoded image")
}
