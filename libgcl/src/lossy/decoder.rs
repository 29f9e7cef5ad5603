//! DCT-based lossy decoder for mono audio

use std::io::Read;

use crate::core::bits::BitReader;
use crate::error::{Error, Result};
use crate::lossy::{dct, quant};

/// decoded samples plus the playback rate
#[derive(Debug, Clone)]
pub struct DecodedLossyAudio {
    pub sample_rate: u32,
    pub samples: Vec<f64>,
}

pub struct DctDecoder;

impl DctDecoder {
    pub fn new() -> Self {
        DctDecoder
    }

    pub fn decode<R: Read>(&self, source: R) -> Result<DecodedLossyAudio> {
        let mut bits = BitReader::new(source);

        let sample_rate = bits.read_bits(32)? as u32;
        let num_samples = bits.read_bits(32)? as usize;
        let block_size = bits.read_bits(16)? as usize;
        if block_size == 0 {
            return Err(Error::invalid_format("zero DCT block size"));
        }
        let quantization_step = bits.read_bits(32)? as f64 / 1000.0;

        let mut samples: Vec<f64> = Vec::new();
        let mut quantized = vec![0i32; block_size];

        while samples.len() < num_samples {
            read_coefficients(&mut bits, &mut quantized)?;
            let coeffs = quant::dequantize(&quantized, quantization_step);
            let block = dct::inverse(&coeffs);

            let take = block_size.min(num_samples - samples.len());
            samples.extend_from_slice(&block[..take]);
        }

        Ok(DecodedLossyAudio {
            sample_rate,
            samples,
        })
    }
}

impl Default for DctDecoder {
    fn default() -> Self {
        Self::new()
    }
}

fn read_coefficients<R: Read>(bits: &mut BitReader<R>, out: &mut [i32]) -> Result<()> {
    for slot in out.iter_mut() {
        let width = bits.read_bits(4)? as u32;
        if width == 0 {
            *slot = 0;
            continue;
        }

        let negative = match bits.read_bit()? {
            Some(bit) => bit == 1,
            None => return Err(Error::UnexpectedEndOfStream),
        };
        let magnitude = bits.read_bits(width)? as i32;
        *slot = if negative { -magnitude } else { magnitude };
    }
    Ok(())
}
