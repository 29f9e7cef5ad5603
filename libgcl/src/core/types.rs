//! common types for the gcl codecs

use std::io::{Read, Write};

use crate::error::{Error, Result};

// constants

/// magic for the lossless audio container
pub const AUDIO_MAGIC: [u8; 4] = *b"GACL";

/// magic for the lossless image container
pub const IMAGE_MAGIC: [u8; 4] = *b"GICL";

/// on-disk format version
pub const VERSION: u16 = 1;

/// frames per audio block sharing one adaptive divisor
pub const AUDIO_BLOCK_FRAMES: usize = 4096;

/// rows per image band sharing one adaptive divisor
pub const IMAGE_BAND_ROWS: u32 = 64;

// parameter selection

/// how the Golomb divisor is chosen for a stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamMode {
    /// a single divisor for the whole stream
    Fixed(u16),
    /// one divisor per block, estimated from that block's residuals
    Adaptive,
}

impl ParamMode {
    pub fn is_adaptive(self) -> bool {
        matches!(self, ParamMode::Adaptive)
    }

    /// divisor the coder starts with before the first block field arrives
    pub fn initial_m(self) -> u32 {
        match self {
            ParamMode::Fixed(m) => m as u32,
            ParamMode::Adaptive => 1,
        }
    }

    pub(crate) fn validate(self) -> Result<()> {
        if let ParamMode::Fixed(0) = self {
            return Err(Error::invalid_parameter("fixed golomb divisor must be >= 1"));
        }
        Ok(())
    }

    /// value stored in the header's fixed-divisor field
    pub(crate) fn fixed_m(self) -> u16 {
        match self {
            ParamMode::Fixed(m) => m,
            ParamMode::Adaptive => 0,
        }
    }
}

// headers

/// fixed 25-byte header of a `GACL` stream, little-endian throughout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioHeader {
    pub channels: u16,
    pub sample_rate: u32,
    pub bits_per_sample: u16,
    pub total_frames: u64,
    pub adaptive: bool,
    pub fixed_m: u16,
}

impl AudioHeader {
    pub fn write_to<W: Write>(&self, sink: &mut W) -> Result<()> {
        let mut buf = Vec::with_capacity(25);
        buf.extend_from_slice(&AUDIO_MAGIC);
        buf.extend_from_slice(&VERSION.to_le_bytes());
        buf.extend_from_slice(&self.channels.to_le_bytes());
        buf.extend_from_slice(&self.sample_rate.to_le_bytes());
        buf.extend_from_slice(&self.bits_per_sample.to_le_bytes());
        buf.extend_from_slice(&self.total_frames.to_le_bytes());
        buf.push(self.adaptive as u8);
        buf.extend_from_slice(&self.fixed_m.to_le_bytes());
        sink.write_all(&buf)?;
        Ok(())
    }

    pub fn read_from<R: Read>(source: &mut R) -> Result<Self> {
        let mut buf = [0u8; 25];
        read_header_bytes(source, &mut buf)?;

        if buf[0..4] != AUDIO_MAGIC {
            return Err(Error::invalid_format("bad magic, not a GACL stream"));
        }
        let version = u16::from_le_bytes([buf[4], buf[5]]);
        if version != VERSION {
            return Err(Error::invalid_format(format!(
                "unsupported version {version}"
            )));
        }

        let header = AudioHeader {
            channels: u16::from_le_bytes([buf[6], buf[7]]),
            sample_rate: u32::from_le_bytes([buf[8], buf[9], buf[10], buf[11]]),
            bits_per_sample: u16::from_le_bytes([buf[12], buf[13]]),
            total_frames: u64::from_le_bytes([
                buf[14], buf[15], buf[16], buf[17], buf[18], buf[19], buf[20], buf[21],
            ]),
            adaptive: buf[22] != 0,
            fixed_m: u16::from_le_bytes([buf[23], buf[24]]),
        };

        if header.channels == 0 || header.channels > 2 {
            return Err(Error::invalid_format(format!(
                "unsupported channel count {}",
                header.channels
            )));
        }
        if header.bits_per_sample != 16 {
            return Err(Error::invalid_format(format!(
                "unsupported bit depth {}",
                header.bits_per_sample
            )));
        }
        if !header.adaptive && header.fixed_m == 0 {
            return Err(Error::invalid_format("fixed golomb divisor of zero"));
        }

        Ok(header)
    }
}

/// fixed 17-byte header of a `GICL` stream, little-endian throughout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageHeader {
    pub width: u32,
    pub height: u32,
    pub adaptive: bool,
    pub fixed_m: u16,
}

impl ImageHeader {
    pub fn write_to<W: Write>(&self, sink: &mut W) -> Result<()> {
        let mut buf = Vec::with_capacity(17);
        buf.extend_from_slice(&IMAGE_MAGIC);
        buf.extend_from_slice(&VERSION.to_le_bytes());
        buf.extend_from_slice(&self.width.to_le_bytes());
        buf.extend_from_slice(&self.height.to_le_bytes());
        buf.push(self.adaptive as u8);
        buf.extend_from_slice(&self.fixed_m.to_le_bytes());
        sink.write_all(&buf)?;
        Ok(())
    }

    pub fn read_from<R: Read>(source: &mut R) -> Result<Self> {
        let mut buf = [0u8; 17];
        read_header_bytes(source, &mut buf)?;

        if buf[0..4] != IMAGE_MAGIC {
            return Err(Error::invalid_format("bad magic, not a GICL stream"));
        }
        let version = u16::from_le_bytes([buf[4], buf[5]]);
        if version != VERSION {
            return Err(Error::invalid_format(format!(
                "unsupported version {version}"
            )));
        }

        let header = ImageHeader {
            width: u32::from_le_bytes([buf[6], buf[7], buf[8], buf[9]]),
            height: u32::from_le_bytes([buf[10], buf[11], buf[12], buf[13]]),
            adaptive: buf[14] != 0,
            fixed_m: u16::from_le_bytes([buf[15], buf[16]]),
        };

        if !header.adaptive && header.fixed_m == 0 {
            return Err(Error::invalid_format("fixed golomb divisor of zero"));
        }

        Ok(header)
    }
}

fn read_header_bytes<R: Read>(source: &mut R, buf: &mut [u8]) -> Result<()> {
    source.read_exact(buf).map_err(|e| {
        if e.kind() == std::io::ErrorKind::UnexpectedEof {
            Error::invalid_format("truncated header")
        } else {
            Error::Io(e)
        }
    })
}

// pixel data

/// 8-bit greyscale pixel buffer in raster order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Raster {
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        if pixels.len() as u64 != width as u64 * height as u64 {
            return Err(Error::invalid_parameter(format!(
                "pixel buffer of {} bytes does not match {width}x{height}",
                pixels.len()
            )));
        }
        Ok(Raster {
            width,
            height,
            pixels,
        })
    }

    pub(crate) fn zeroed(width: u32, height: u32) -> Self {
        Raster {
            width,
            height,
            pixels: vec![0; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// pixel value, with out-of-bounds neighbours reading as zero
    pub(crate) fn sample(&self, row: i64, col: i64) -> i32 {
        if row < 0 || col < 0 || row >= self.height as i64 || col >= self.width as i64 {
            return 0;
        }
        self.pixels[row as usize * self.width as usize + col as usize] as i32
    }

    pub(crate) fn set(&mut self, row: u32, col: u32, value: u8) {
        self.pixels[row as usize * self.width as usize + col as usize] = value;
    }
}
