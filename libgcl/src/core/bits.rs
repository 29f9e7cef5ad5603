// Bit-level I/O on top of byte-oriented streams

use std::io::{Read, Write};

use crate::error::Result;

/// Bit-level writer, MSB-first within each emitted byte
pub struct BitWriter<W: Write> {
    sink: W,
    current_byte: u8,
    bit_pos: u8,
    closed: bool,
}

impl<W: Write> BitWriter<W> {
    pub fn new(sink: W) -> Self {
        BitWriter {
            sink,
            current_byte: 0,
            bit_pos: 0,
            closed: false,
        }
    }

    /// append one bit; a completed byte goes straight to the sink
    pub fn write_bit(&mut self, bit: u32) -> Result<()> {
        if bit != 0 {
            self.current_byte |= 1 << (7 - self.bit_pos);
        }

        self.bit_pos += 1;
        if self.bit_pos == 8 {
            self.sink.write_all(&[self.current_byte])?;
            self.current_byte = 0;
            self.bit_pos = 0;
        }
        Ok(())
    }

    /// emit the `count` least-significant bits of `value`, MSB first
    pub fn write_bits(&mut self, value: u64, count: u32) -> Result<()> {
        debug_assert!(count <= 64);
        for i in (0..count).rev() {
            self.write_bit(((value >> i) & 1) as u32)?;
        }
        Ok(())
    }

    /// flush a partial byte, zero-padded in the low positions
    ///
    /// Must run before the sink's contents are used; closing twice is a
    /// no-op.
    pub fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        if self.bit_pos > 0 {
            self.sink.write_all(&[self.current_byte])?;
            self.current_byte = 0;
            self.bit_pos = 0;
        }
        self.sink.flush()?;
        self.closed = true;
        Ok(())
    }
}

/// Bit-level reader, MSB-first within each byte
pub struct BitReader<R: Read> {
    source: R,
    current_byte: u8,
    bit_pos: u8,
    exhausted: bool,
}

impl<R: Read> BitReader<R> {
    pub fn new(source: R) -> Self {
        BitReader {
            source,
            current_byte: 0,
            bit_pos: 8,
            exhausted: false,
        }
    }

    /// next bit, or `None` once the source is drained
    pub fn read_bit(&mut self) -> Result<Option<u32>> {
        if self.bit_pos == 8 {
            let mut byte = [0u8; 1];
            loop {
                match self.source.read(&mut byte) {
                    Ok(0) => {
                        self.exhausted = true;
                        return Ok(None);
                    }
                    Ok(_) => break,
                    Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                    Err(e) => return Err(e.into()),
                }
            }
            self.current_byte = byte[0];
            self.bit_pos = 0;
        }

        let bit = (self.current_byte >> (7 - self.bit_pos)) & 1;
        self.bit_pos += 1;
        Ok(Some(bit as u32))
    }

    /// read `count` bits MSB-first; bits past end-of-stream read as zero
    pub fn read_bits(&mut self, count: u32) -> Result<u64> {
        debug_assert!(count <= 64);
        let mut value = 0u64;
        for _ in 0..count {
            let bit = self.read_bit()?.unwrap_or(0);
            value = (value << 1) | bit as u64;
        }
        Ok(value)
    }

    /// has a read already run past the end of the source?
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }
}
