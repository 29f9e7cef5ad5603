mod image_codec_tests {
    use libgcl_media::{
        med_predict, AudioEncoder, Error, ImageDecoder, ImageEncoder, ParamMode, Raster,
    };
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::io::Cursor;

    fn roundtrip(image: &Raster, mode: ParamMode) -> Raster {
        let mut encoded = Vec::new();
        ImageEncoder::new(mode)
            .unwrap()
            .encode(image, &mut encoded)
            .unwrap();
        ImageDecoder::new().decode(Cursor::new(encoded)).unwrap()
    }

    /// smooth diagonal gradient with a little noise, roughly photographic
    fn synthetic(width: u32, height: u32, seed: u64) -> Raster {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        for row in 0..height {
            for col in 0..width {
                let base = ((row / 2 + col / 3) % 256) as i32;
                let noise = rng.gen_range(-4..=4);
                pixels.push((base + noise).clamp(0, 255) as u8);
            }
        }
        Raster::new(width, height, pixels).unwrap()
    }

    #[test]
    fn test_med_predictor_cases() {
        // top-left corner has no neighbours
        assert_eq!(med_predict(0, 0, 0), 0);
        // first row and first column fall back to the live neighbour
        assert_eq!(med_predict(50, 0, 0), 50);
        assert_eq!(med_predict(0, 50, 0), 50);
        // diagonal below both neighbours picks the maximum
        assert_eq!(med_predict(70, 60, 50), 70);
        // diagonal above both picks the minimum
        assert_eq!(med_predict(30, 40, 90), 30);
        // in between, the planar prediction
        assert_eq!(med_predict(10, 20, 15), 15);
    }

    #[test]
    fn test_two_by_two_roundtrip() {
        let image = Raster::new(2, 2, vec![50, 60, 70, 90]).unwrap();
        assert_eq!(roundtrip(&image, ParamMode::Fixed(4)), image);
        assert_eq!(roundtrip(&image, ParamMode::Adaptive), image);
    }

    #[test]
    fn test_band_boundary_heights() {
        for &height in &[1u32, 63, 64, 65, 130] {
            let image = synthetic(17, height, height as u64);
            assert_eq!(
                roundtrip(&image, ParamMode::Adaptive),
                image,
                "adaptive, height {height}"
            );
            assert_eq!(
                roundtrip(&image, ParamMode::Fixed(5)),
                image,
                "fixed, height {height}"
            );
        }
    }

    #[test]
    fn test_single_column() {
        let image = synthetic(1, 100, 3);
        assert_eq!(roundtrip(&image, ParamMode::Adaptive), image);
    }

    #[test]
    fn test_random_noise_roundtrip() {
        let mut rng = StdRng::seed_from_u64(9);
        let pixels: Vec<u8> = (0..96 * 70).map(|_| rng.gen()).collect();
        let image = Raster::new(96, 70, pixels).unwrap();
        assert_eq!(roundtrip(&image, ParamMode::Adaptive), image);
    }

    #[test]
    fn test_flat_image_codes_tightly() {
        let image = Raster::new(256, 256, vec![128; 256 * 256]).unwrap();
        let mut encoded = Vec::new();
        ImageEncoder::new(ParamMode::Adaptive)
            .unwrap()
            .encode(&image, &mut encoded)
            .unwrap();
        // every residual after the first pixel is zero; one bit each plus
        // header and band fields
        assert!(encoded.len() < 256 * 256 / 8 + 128);
        assert_eq!(roundtrip(&image, ParamMode::Adaptive), image);
    }

    #[test]
    fn test_prediction_shrinks_residuals() {
        // MED against a flat mean model on a gradient image
        let image = synthetic(64, 64, 21);
        let pixels = image.pixels();

        let mean =
            (pixels.iter().map(|&p| p as u64).sum::<u64>() / pixels.len() as u64) as i32;
        let flat: i64 = pixels
            .iter()
            .map(|&p| (p as i32 - mean).abs() as i64)
            .sum();

        let at = |row: i32, col: i32| -> i32 {
            if row < 0 || col < 0 {
                0
            } else {
                pixels[row as usize * 64 + col as usize] as i32
            }
        };
        let mut predicted: i64 = 0;
        for row in 0..64i32 {
            for col in 0..64i32 {
                let p = med_predict(at(row, col - 1), at(row - 1, col), at(row - 1, col - 1));
                predicted += (at(row, col) - p).abs() as i64;
            }
        }

        assert!(predicted < flat);
    }

    #[test]
    fn test_buffer_size_must_match() {
        assert!(matches!(
            Raster::new(3, 3, vec![0; 8]),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_audio_stream_is_rejected() {
        let mut encoded = Vec::new();
        AudioEncoder::new(8_000, 1, ParamMode::Fixed(4))
            .unwrap()
            .encode(&[1, 2, 3], &mut encoded)
            .unwrap();

        match ImageDecoder::new().decode(Cursor::new(encoded)) {
            Err(Error::InvalidFormat(_)) => {}
            other => panic!("expected format error, got {other:?}"),
        }
    }
}
