mod golomb_tests {
    use libgcl_media::{estimate_m, BitReader, BitWriter, Error, Golomb, SignMode};
    use quickcheck::quickcheck;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::io::Cursor;

    fn encode_all(golomb: &Golomb, values: &[i32]) -> Vec<u8> {
        let mut buffer = Vec::new();
        let mut writer = BitWriter::new(&mut buffer);
        for &value in values {
            golomb.encode(value, &mut writer).unwrap();
        }
        writer.close().unwrap();
        buffer
    }

    fn decode_all(golomb: &Golomb, data: Vec<u8>, count: usize) -> Vec<i32> {
        let mut reader = BitReader::new(Cursor::new(data));
        (0..count)
            .map(|_| golomb.decode(&mut reader).unwrap())
            .collect()
    }

    #[test]
    fn test_rejects_zero_m() {
        assert!(Golomb::new(0, SignMode::Interleaving).is_err());
        let mut coder = Golomb::new(4, SignMode::Interleaving).unwrap();
        assert!(coder.set_m(0).is_err());
        assert_eq!(coder.m(), 4);
    }

    #[test]
    fn test_interleaved_codewords_m4() {
        // 0,-1,1,-2,2 interleave to 0..4; with m = 4 the codewords are
        // 100 101 110 111 0100
        let golomb = Golomb::new(4, SignMode::Interleaving).unwrap();
        let encoded = encode_all(&golomb, &[0, -1, 1, -2, 2]);
        assert_eq!(encoded, vec![0b1001_0111, 0b0111_0100]);
        assert_eq!(decode_all(&golomb, encoded, 5), vec![0, -1, 1, -2, 2]);
    }

    #[test]
    fn test_truncated_binary_codewords_m3() {
        // m = 3 has a one-short codeword for remainder 0:
        // 10 110 111 010 0110
        let golomb = Golomb::new(3, SignMode::Interleaving).unwrap();
        let encoded = encode_all(&golomb, &[0, -1, 1, -2, 2]);
        assert_eq!(encoded, vec![0b1011_0111, 0b0100_1100]);
        assert_eq!(decode_all(&golomb, encoded, 5), vec![0, -1, 1, -2, 2]);
    }

    #[test]
    fn test_sign_magnitude_minus_two_m3() {
        // sign bit, empty unary quotient, remainder 2 escapes to two bits
        let golomb = Golomb::new(3, SignMode::SignMagnitude).unwrap();
        let encoded = encode_all(&golomb, &[-2]);
        assert_eq!(encoded, vec![0b1111_0000]);
        assert_eq!(decode_all(&golomb, encoded, 1), vec![-2]);
    }

    #[test]
    fn test_sign_magnitude_zero_keeps_sign_bit() {
        let golomb = Golomb::new(1, SignMode::SignMagnitude).unwrap();
        let encoded = encode_all(&golomb, &[0]);
        // 0 (positive) then the empty unary run's terminator
        assert_eq!(encoded, vec![0b0100_0000]);
        assert_eq!(decode_all(&golomb, encoded, 1), vec![0]);
    }

    #[test]
    fn test_pure_unary_when_m_is_one() {
        let golomb = Golomb::new(1, SignMode::Interleaving).unwrap();
        // 1 interleaves to 2: two zeros then the terminator, no remainder
        let encoded = encode_all(&golomb, &[1]);
        assert_eq!(encoded, vec![0b0010_0000]);
        assert_eq!(decode_all(&golomb, encoded, 1), vec![1]);
    }

    #[test]
    fn test_eos_mid_codeword_is_an_error() {
        let golomb = Golomb::new(4, SignMode::Interleaving).unwrap();
        // a lone zero byte is an unterminated unary run
        let mut reader = BitReader::new(Cursor::new(vec![0x00]));
        match golomb.decode(&mut reader) {
            Err(Error::UnexpectedEndOfStream) => {}
            other => panic!("expected end-of-stream error, got {other:?}"),
        }
    }

    #[test]
    fn test_concatenated_streams_reparse_uniquely() {
        // prefix-freeness: random pairs decode back to themselves from one
        // concatenated stream
        let mut rng = StdRng::seed_from_u64(17);
        for _ in 0..200 {
            let m = rng.gen_range(1..=300u32);
            let golomb = Golomb::new(m, SignMode::Interleaving).unwrap();
            let pair = [rng.gen_range(-5000..=5000), rng.gen_range(-5000..=5000)];
            let encoded = encode_all(&golomb, &pair);
            assert_eq!(decode_all(&golomb, encoded, 2), pair.to_vec(), "m {m}");
        }
    }

    #[test]
    fn test_large_values_roundtrip() {
        for &m in &[1u32, 2, 3, 5, 64, 255, 4096, 65_535] {
            for mode in [SignMode::Interleaving, SignMode::SignMagnitude] {
                let golomb = Golomb::new(m, mode).unwrap();
                let values = [0, 1, -1, 524_287, -524_288, 65_535, -65_535];
                let encoded = encode_all(&golomb, &values);
                assert_eq!(decode_all(&golomb, encoded, values.len()), values.to_vec());
            }
        }
    }

    quickcheck! {
        fn prop_interleaving_roundtrip(values: Vec<i32>, m_seed: u16) -> bool {
            let m = (m_seed as u32).max(1);
            let values: Vec<i32> = values.into_iter().map(|v| v % (1 << 20)).collect();
            let golomb = Golomb::new(m, SignMode::Interleaving).unwrap();
            let encoded = encode_all(&golomb, &values);
            decode_all(&golomb, encoded, values.len()) == values
        }

        fn prop_sign_magnitude_roundtrip(values: Vec<i32>, m_seed: u16) -> bool {
            let m = (m_seed as u32).max(1);
            let values: Vec<i32> = values.into_iter().map(|v| v % (1 << 20)).collect();
            let golomb = Golomb::new(m, SignMode::SignMagnitude).unwrap();
            let encoded = encode_all(&golomb, &values);
            decode_all(&golomb, encoded, values.len()) == values
        }
    }

    #[test]
    fn test_estimate_m_tracks_the_mean() {
        assert_eq!(estimate_m(&[]), 1);
        assert_eq!(estimate_m(&[0, 0, 0]), 1);
        // mean magnitude 100 -> round(69.3)
        assert_eq!(estimate_m(&[100, -100]), 69);
    }

    fn code_length(residuals: &[i32], m: u32) -> u64 {
        let b = if m > 1 {
            u32::BITS - (m - 1).leading_zeros()
        } else {
            0
        };
        let cutoff = if m > 1 { (1u32 << b) - m } else { 0 };

        residuals
            .iter()
            .map(|&v| {
                let mapped = ((v << 1) ^ (v >> 31)) as u32;
                let quotient = (mapped / m) as u64;
                let tail = if m == 1 {
                    0
                } else if mapped % m < cutoff {
                    (b - 1) as u64
                } else {
                    b as u64
                };
                quotient + 1 + tail
            })
            .sum()
    }

    #[test]
    fn test_estimated_m_is_near_optimal() {
        // two-sided geometric residuals; the closed-form estimate sits on
        // the short side of the exhaustive optimum but must stay within a
        // modest margin of its code length
        let mut rng = StdRng::seed_from_u64(42);
        let residuals: Vec<i32> = (0..4096)
            .map(|_| {
                let u: f64 = rng.gen();
                let magnitude = (-(1.0 - u).ln() * 14.0).floor() as i32;
                if rng.gen::<bool>() {
                    magnitude
                } else {
                    -magnitude
                }
            })
            .collect();

        let estimated = estimate_m(&residuals);
        let estimated_cost = code_length(&residuals, estimated);
        let best_cost = (1..=256u32)
            .map(|m| code_length(&residuals, m))
            .min()
            .unwrap();

        assert!(
            estimated_cost * 100 <= best_cost * 115,
            "estimated m {estimated} costs {estimated_cost} bits, optimum costs {best_cost}"
        );
    }
}
