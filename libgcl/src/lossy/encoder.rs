//! DCT-based lossy encoder for mono audio

use std::io::Write;

use crate::core::bits::BitWriter;
use crate::error::{Error, Result};
use crate::lossy::{dct, quant, DCT_BLOCK_SIZE};

/// encodes mono samples in `[-1, 1]` with a quality-driven quantiser
pub struct DctEncoder {
    quantization_step: f64,
}

impl DctEncoder {
    /// `quality` runs from 0.0 (coarse) to 1.0 (fine) and sets the base
    /// quantisation step to `10^(-2 * quality)`
    pub fn new(quality: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&quality) {
            return Err(Error::invalid_parameter(format!(
                "quality {quality} outside [0, 1]"
            )));
        }
        Ok(DctEncoder {
            quantization_step: 10f64.powf(-quality * 2.0),
        })
    }

    pub fn encode<W: Write>(&self, samples: &[f64], sample_rate: u32, sink: W) -> Result<()> {
        if samples.len() > u32::MAX as usize {
            return Err(Error::invalid_parameter("input longer than 2^32 samples"));
        }

        let mut bits = BitWriter::new(sink);

        bits.write_bits(sample_rate as u64, 32)?;
        bits.write_bits(samples.len() as u64, 32)?;
        bits.write_bits(DCT_BLOCK_SIZE as u64, 16)?;
        let step_fixed = (self.quantization_step * 1000.0).round() as u64;
        bits.write_bits(step_fixed, 32)?;

        let mut block = vec![0.0f64; DCT_BLOCK_SIZE];
        for chunk in samples.chunks(DCT_BLOCK_SIZE) {
            block[..chunk.len()].copy_from_slice(chunk);
            block[chunk.len()..].fill(0.0);

            let coeffs = dct::forward(&block);
            let quantized = quant::quantize(&coeffs, self.quantization_step);
            write_coefficients(&mut bits, &quantized)?;
        }

        bits.close()
    }
}

/// sign-magnitude with a 4-bit width prefix
///
/// Magnitudes above `2^15 - 1` are clipped to fit the 15-bit cap, which is
/// lossy beyond the quantiser for extreme inputs.
fn write_coefficients<W: Write>(bits: &mut BitWriter<W>, quantized: &[i32]) -> Result<()> {
    for &q in quantized {
        let mut magnitude = q.unsigned_abs();
        let mut width = u32::BITS - magnitude.leading_zeros();
        if width > 15 {
            width = 15;
            magnitude = (1 << 15) - 1;
        }

        bits.write_bits(width as u64, 4)?;
        if width > 0 {
            bits.write_bit((q < 0) as u32)?;
            bits.write_bits(magnitude as u64, width)?;
        }
    }
    Ok(())
}
