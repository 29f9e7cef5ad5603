pub mod audio;
pub mod image;
pub mod predict;

pub use audio::{AudioDecoder, AudioEncoder, DecodedAudio};
pub use image::{ImageDecoder, ImageEncoder};
pub use predict::{med_predict, AudioPredictor};
