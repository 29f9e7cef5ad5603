//! lossless greyscale image codec: MED prediction + Golomb over 64-row bands

use std::io::{Read, Write};

use crate::core::bits::{BitReader, BitWriter};
use crate::core::golomb::{estimate_m, Golomb, SignMode};
use crate::core::types::{ImageHeader, ParamMode, Raster, IMAGE_BAND_ROWS};
use crate::error::Result;
use crate::lossless::predict::med_predict;

/// encoder for 8-bit greyscale rasters
pub struct ImageEncoder {
    mode: ParamMode,
}

impl ImageEncoder {
    pub fn new(mode: ParamMode) -> Result<Self> {
        mode.validate()?;
        Ok(ImageEncoder { mode })
    }

    pub fn encode<W: Write>(&self, image: &Raster, mut sink: W) -> Result<()> {
        let header = ImageHeader {
            width: image.width(),
            height: image.height(),
            adaptive: self.mode.is_adaptive(),
            fixed_m: self.mode.fixed_m(),
        };
        header.write_to(&mut sink)?;

        // residuals grouped by band so each band's divisor can be
        // estimated before any of its codewords are written
        let bands = image.height().div_ceil(IMAGE_BAND_ROWS) as usize;
        let mut band_residuals: Vec<Vec<i32>> = vec![Vec::new(); bands];
        for row in 0..image.height() {
            let band = (row / IMAGE_BAND_ROWS) as usize;
            for col in 0..image.width() {
                let predicted = predict_at(image, row, col);
                let actual = image.sample(row as i64, col as i64);
                band_residuals[band].push(actual - predicted);
            }
        }

        let mut bits = BitWriter::new(sink);
        let mut golomb = Golomb::new(self.mode.initial_m(), SignMode::Interleaving)?;

        for band in &band_residuals {
            if self.mode.is_adaptive() {
                let m = estimate_m(band);
                bits.write_bits(m as u64, 16)?;
                golomb.set_m(m)?;
            }
            for &residual in band {
                golomb.encode(residual, &mut bits)?;
            }
        }

        bits.close()
    }
}

/// decoder rebuilding the raster from already-decoded neighbours
pub struct ImageDecoder;

impl ImageDecoder {
    pub fn new() -> Self {
        ImageDecoder
    }

    pub fn decode<R: Read>(&self, mut source: R) -> Result<Raster> {
        let header = ImageHeader::read_from(&mut source)?;
        let mut image = Raster::zeroed(header.width, header.height);

        let mut bits = BitReader::new(source);
        let initial_m = if header.adaptive {
            1
        } else {
            header.fixed_m as u32
        };
        let mut golomb = Golomb::new(initial_m, SignMode::Interleaving)?;

        for row in 0..header.height {
            if header.adaptive && row % IMAGE_BAND_ROWS == 0 {
                let m = bits.read_bits(16)? as u32;
                golomb.set_m(m.max(1))?;
            }
            for col in 0..header.width {
                let predicted = predict_at(&image, row, col);
                let residual = golomb.decode(&mut bits)?;
                let value = (residual + predicted).clamp(0, 255) as u8;
                image.set(row, col, value);
            }
        }

        Ok(image)
    }
}

impl Default for ImageDecoder {
    fn default() -> Self {
        Self::new()
    }
}

fn predict_at(image: &Raster, row: u32, col: u32) -> i32 {
    let r = row as i64;
    let c = col as i64;
    med_predict(
        image.sample(r, c - 1),
        image.sample(r - 1, c),
        image.sample(r - 1, c - 1),
    )
}
