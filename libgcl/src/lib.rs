//! gcl: Golomb-coded lossless media codecs
//!
//! Two lossless codecs built on a shared bit stream, Golomb entropy coder
//! and predictive front-ends:
//!
//! - `GACL`: 16-bit PCM audio, mono or stereo, with a two-tap
//!   same-channel / cross-channel predictor and 4096-frame blocks.
//! - `GICL`: 8-bit greyscale images with the JPEG-LS median predictor and
//!   64-row bands.
//!
//! Both run the Golomb divisor either fixed for the whole stream or
//! re-estimated per block from the block's residuals. A lossy companion
//! pipeline swaps the predictor for a blocked DCT-II/III pair with a
//! frequency-weighted quantiser.
//!
//! The library works on in-memory samples and pixels and plain
//! [`std::io::Read`]/[`std::io::Write`] byte streams; decoding media files
//! into samples is the caller's job.

pub mod core;
pub mod error;
pub mod lossless;
pub mod lossy;

pub use crate::core::{
    analysis, estimate_m, AudioHeader, BitReader, BitWriter, Golomb, ImageHeader, ParamMode,
    Raster, SignMode, AUDIO_BLOCK_FRAMES, AUDIO_MAGIC, IMAGE_BAND_ROWS, IMAGE_MAGIC, VERSION,
};
pub use error::{Error, Result};
pub use lossless::{
    med_predict, AudioDecoder, AudioEncoder, AudioPredictor, DecodedAudio, ImageDecoder,
    ImageEncoder,
};
pub use lossy::{DctDecoder, DctEncoder, DecodedLossyAudio, DCT_BLOCK_SIZE};
