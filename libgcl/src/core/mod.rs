pub mod analysis;
pub mod bits;
pub mod golomb;
pub mod types;

pub use bits::{BitReader, BitWriter};
pub use golomb::{estimate_m, Golomb, SignMode};
pub use types::*;
