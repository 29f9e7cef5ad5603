//! lossless audio codec: linear prediction + Golomb over 4096-frame blocks

use std::io::{Read, Write};

use crate::core::bits::{BitReader, BitWriter};
use crate::core::golomb::{estimate_m, Golomb, SignMode};
use crate::core::types::{AudioHeader, ParamMode, AUDIO_BLOCK_FRAMES};
use crate::error::{Error, Result};
use crate::lossless::predict::AudioPredictor;

/// encoder for interleaved 16-bit PCM, mono or stereo
pub struct AudioEncoder {
    sample_rate: u32,
    channels: u16,
    mode: ParamMode,
}

impl AudioEncoder {
    pub fn new(sample_rate: u32, channels: u16, mode: ParamMode) -> Result<Self> {
        if channels == 0 || channels > 2 {
            return Err(Error::invalid_parameter(format!(
                "unsupported channel count {channels}, only mono and stereo"
            )));
        }
        mode.validate()?;
        Ok(AudioEncoder {
            sample_rate,
            channels,
            mode,
        })
    }

    /// encode interleaved samples into `sink`
    ///
    /// The trailing partial byte is flushed before returning, so the sink
    /// holds a complete stream on success.
    pub fn encode<W: Write>(&self, samples: &[i16], mut sink: W) -> Result<()> {
        let channels = self.channels as usize;
        if samples.len() % channels != 0 {
            return Err(Error::invalid_parameter(
                "sample count is not a multiple of the channel count",
            ));
        }
        let total_frames = (samples.len() / channels) as u64;

        let header = AudioHeader {
            channels: self.channels,
            sample_rate: self.sample_rate,
            bits_per_sample: 16,
            total_frames,
            adaptive: self.mode.is_adaptive(),
            fixed_m: self.mode.fixed_m(),
        };
        header.write_to(&mut sink)?;

        let mut bits = BitWriter::new(sink);
        let mut golomb = Golomb::new(self.mode.initial_m(), SignMode::Interleaving)?;
        let mut predictor = AudioPredictor::new();
        let mut residuals: Vec<i32> = Vec::with_capacity(AUDIO_BLOCK_FRAMES * channels);

        for block in samples.chunks(AUDIO_BLOCK_FRAMES * channels) {
            residuals.clear();
            for frame in block.chunks(channels) {
                let left = frame[0] as i32;
                residuals.push(predictor.forward_left(left));
                if channels == 2 {
                    residuals.push(AudioPredictor::forward_right(left, frame[1] as i32));
                }
            }

            if self.mode.is_adaptive() {
                let m = estimate_m(&residuals);
                bits.write_bits(m as u64, 16)?;
                golomb.set_m(m)?;
            }
            for &residual in &residuals {
                golomb.encode(residual, &mut bits)?;
            }
        }

        bits.close()
    }
}

/// decoded stream plus the format fields needed to play it back
#[derive(Debug, Clone)]
pub struct DecodedAudio {
    pub sample_rate: u32,
    pub channels: u16,
    pub samples: Vec<i16>,
}

/// decoder producing interleaved 16-bit PCM
pub struct AudioDecoder;

impl AudioDecoder {
    pub fn new() -> Self {
        AudioDecoder
    }

    pub fn decode<R: Read>(&self, mut source: R) -> Result<DecodedAudio> {
        let header = AudioHeader::read_from(&mut source)?;
        let channels = header.channels as usize;

        let mut bits = BitReader::new(source);
        let initial_m = if header.adaptive {
            1
        } else {
            header.fixed_m as u32
        };
        let mut golomb = Golomb::new(initial_m, SignMode::Interleaving)?;
        let mut predictor = AudioPredictor::new();

        let mut samples: Vec<i16> = Vec::new();
        let mut remaining = header.total_frames;

        while remaining > 0 {
            if header.adaptive {
                let m = bits.read_bits(16)? as u32;
                golomb.set_m(m.max(1))?;
            }

            let block_frames = remaining.min(AUDIO_BLOCK_FRAMES as u64);
            for _ in 0..block_frames {
                let left = predictor.inverse_left(golomb.decode(&mut bits)?);
                samples.push(left as i16);
                if channels == 2 {
                    let right = AudioPredictor::inverse_right(left, golomb.decode(&mut bits)?);
                    samples.push(right as i16);
                }
            }
            remaining -= block_frames;
        }

        Ok(DecodedAudio {
            sample_rate: header.sample_rate,
            channels: header.channels,
            samples,
        })
    }
}

impl Default for AudioDecoder {
    fn default() -> Self {
        Self::new()
    }
}
