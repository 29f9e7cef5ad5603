//! Golomb coding with truncated-binary remainders

use std::io::{Read, Write};

use crate::core::bits::{BitReader, BitWriter};
use crate::error::{Error, Result};

/// how signed values are mapped onto the non-negative code domain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignMode {
    /// interleave both signs into one sequence: 0, -1, 1, -2, 2, ...
    Interleaving,
    /// a leading sign bit followed by the magnitude
    SignMagnitude,
}

/// Golomb coder for a divisor `m >= 1`
///
/// Values are split into a unary quotient and a truncated-binary remainder;
/// `m = 1` degenerates to pure unary with no remainder field. The derived
/// constants `b = ceil(log2 m)` and `cutoff = 2^b - m` are recomputed
/// whenever `m` changes.
#[derive(Debug, Clone)]
pub struct Golomb {
    m: u32,
    b: u32,
    cutoff: u32,
    sign_mode: SignMode,
}

impl Golomb {
    pub fn new(m: u32, sign_mode: SignMode) -> Result<Self> {
        let mut coder = Golomb {
            m: 1,
            b: 0,
            cutoff: 0,
            sign_mode,
        };
        coder.set_m(m)?;
        Ok(coder)
    }

    /// change the divisor and re-derive `b` and the cutoff
    pub fn set_m(&mut self, m: u32) -> Result<()> {
        if m == 0 {
            return Err(Error::invalid_parameter("golomb divisor m must be >= 1"));
        }
        self.m = m;
        if m > 1 {
            self.b = u32::BITS - (m - 1).leading_zeros();
            self.cutoff = (1u32 << self.b) - m;
        } else {
            self.b = 0;
            self.cutoff = 0;
        }
        Ok(())
    }

    pub fn m(&self) -> u32 {
        self.m
    }

    pub fn encode<W: Write>(&self, value: i32, bits: &mut BitWriter<W>) -> Result<()> {
        match self.sign_mode {
            SignMode::Interleaving => {
                // 0 -> 0, -1 -> 1, 1 -> 2, -2 -> 3, 2 -> 4, ...
                let mapped = ((value << 1) ^ (value >> 31)) as u32;
                self.encode_unsigned(mapped, bits)
            }
            SignMode::SignMagnitude => {
                // zero still carries its sign bit; the wire format keeps it
                bits.write_bit((value < 0) as u32)?;
                self.encode_unsigned(value.unsigned_abs(), bits)
            }
        }
    }

    pub fn decode<R: Read>(&self, bits: &mut BitReader<R>) -> Result<i32> {
        match self.sign_mode {
            SignMode::Interleaving => {
                let mapped = self.decode_unsigned(bits)?;
                Ok(((mapped >> 1) as i32) ^ -((mapped & 1) as i32))
            }
            SignMode::SignMagnitude => {
                let negative = match bits.read_bit()? {
                    Some(bit) => bit == 1,
                    None => return Err(Error::UnexpectedEndOfStream),
                };
                let magnitude = self.decode_unsigned(bits)? as i32;
                Ok(if negative { -magnitude } else { magnitude })
            }
        }
    }

    fn encode_unsigned<W: Write>(&self, n: u32, bits: &mut BitWriter<W>) -> Result<()> {
        if self.m == 1 {
            return write_unary(n, bits);
        }

        let q = n / self.m;
        let r = n % self.m;
        write_unary(q, bits)?;

        if r < self.cutoff {
            bits.write_bits(r as u64, self.b - 1)
        } else {
            bits.write_bits((r + self.cutoff) as u64, self.b)
        }
    }

    fn decode_unsigned<R: Read>(&self, bits: &mut BitReader<R>) -> Result<u32> {
        let q = read_unary(bits)?;
        if self.m == 1 {
            return Ok(q);
        }

        let r_head = bits.read_bits(self.b - 1)? as u32;
        let r = if r_head < self.cutoff {
            r_head
        } else {
            let r_tail = match bits.read_bit()? {
                Some(bit) => bit,
                None => return Err(Error::UnexpectedEndOfStream),
            };
            ((r_head << 1) | r_tail) - self.cutoff
        };

        Ok(q.wrapping_mul(self.m).wrapping_add(r))
    }
}

fn write_unary<W: Write>(n: u32, bits: &mut BitWriter<W>) -> Result<()> {
    for _ in 0..n {
        bits.write_bit(0)?;
    }
    bits.write_bit(1)
}

fn read_unary<R: Read>(bits: &mut BitReader<R>) -> Result<u32> {
    let mut n = 0u32;
    loop {
        match bits.read_bit()? {
            Some(0) => n += 1,
            Some(_) => return Ok(n),
            None => return Err(Error::UnexpectedEndOfStream),
        }
    }
}

/// pick a divisor for a block of residuals
///
/// `ln 2` times the mean magnitude is the maximum-likelihood divisor when
/// the interleaved magnitudes follow a geometric distribution. Empty blocks
/// fall back to 1.
pub fn estimate_m(residuals: &[i32]) -> u32 {
    if residuals.is_empty() {
        return 1;
    }

    let sum_abs: f64 = residuals.iter().map(|&r| (r as f64).abs()).sum();
    let mean = sum_abs / residuals.len() as f64;

    ((mean * std::f64::consts::LN_2).round() as u32).max(1)
}
