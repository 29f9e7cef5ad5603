pub mod dct;
pub mod decoder;
pub mod encoder;
pub mod quant;

pub use decoder::{DctDecoder, DecodedLossyAudio};
pub use encoder::DctEncoder;

/// samples per DCT block; the tail block is zero-padded to this size
pub const DCT_BLOCK_SIZE: usize = 1024;
