use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use libgcl_media::{
    analysis, AudioDecoder, AudioEncoder, DctDecoder, DctEncoder, ImageDecoder, ImageEncoder,
    ParamMode,
};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

mod audio;
mod image;

#[derive(Parser)]
#[command(name = "regcl")]
#[command(version = "0.1.0")]
#[command(about = "GACL/GICL codec toolbox", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a 16-bit PCM WAV file to GACL
    EncodeAudio {
        /// Input WAV file
        input: PathBuf,
        /// Output GACL file
        output: PathBuf,
        /// Fixed Golomb divisor
        #[arg(short, long, conflicts_with = "adaptive")]
        m: Option<u16>,
        /// Estimate the divisor per block (default when -m is absent)
        #[arg(short, long)]
        adaptive: bool,
    },
    /// Decode a GACL file back to WAV
    DecodeAudio {
        /// Input GACL file
        input: PathBuf,
        /// Output WAV file
        output: PathBuf,
    },
    /// Encode an image to GICL as 8-bit greyscale
    EncodeImage {
        /// Input image (png, pgm, ...)
        input: PathBuf,
        /// Output GICL file
        output: PathBuf,
        /// Fixed Golomb divisor
        #[arg(short, long, conflicts_with = "adaptive")]
        m: Option<u16>,
        /// Estimate the divisor per band (default when -m is absent)
        #[arg(short, long)]
        adaptive: bool,
    },
    /// Decode a GICL file back to an image
    DecodeImage {
        /// Input GICL file
        input: PathBuf,
        /// Output image, format chosen by extension
        output: PathBuf,
    },
    /// Lossy-encode a mono WAV file with the DCT pipeline
    EncodeDct {
        /// Input WAV file (mono)
        input: PathBuf,
        /// Output DCT file
        output: PathBuf,
        /// Quality from 0.0 (coarse) to 1.0 (fine)
        #[arg(short, long, default_value = "0.5")]
        quality: f64,
    },
    /// Decode a DCT-compressed file back to WAV
    DecodeDct {
        /// Input DCT file
        input: PathBuf,
        /// Output WAV file
        output: PathBuf,
    },
    /// Compare two WAV files sample by sample
    Compare {
        /// Reference WAV file
        reference: PathBuf,
        /// WAV file under test
        test: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::EncodeAudio {
            input,
            output,
            m,
            adaptive,
        } => encode_audio(&input, &output, param_mode(m, adaptive)),
        Commands::DecodeAudio { input, output } => decode_audio(&input, &output),
        Commands::EncodeImage {
            input,
            output,
            m,
            adaptive,
        } => encode_image(&input, &output, param_mode(m, adaptive)),
        Commands::DecodeImage { input, output } => decode_image(&input, &output),
        Commands::EncodeDct {
            input,
            output,
            quality,
        } => encode_dct(&input, &output, quality),
        Commands::DecodeDct { input, output } => decode_dct(&input, &output),
        Commands::Compare { reference, test } => compare(&reference, &test),
    }
}

fn param_mode(m: Option<u16>, _adaptive: bool) -> ParamMode {
    match m {
        Some(m) => ParamMode::Fixed(m),
        None => ParamMode::Adaptive,
    }
}

fn print_mode(mode: ParamMode) {
    match mode {
        ParamMode::Fixed(m) => println!("Mode: fixed m = {m}"),
        ParamMode::Adaptive => println!("Mode: adaptive m"),
    }
}

fn encode_audio(input: &Path, output: &Path, mode: ParamMode) -> Result<()> {
    println!("Encoding {} to {}...", input.display(), output.display());
    print_mode(mode);

    let wav = audio::read_wav(input)?;
    println!(
        "Input: {} channels, {} Hz, 16 bits",
        wav.channels, wav.sample_rate
    );

    let encoder = AudioEncoder::new(wav.sample_rate, wav.channels, mode)?;
    let sink = BufWriter::new(File::create(output).context("Failed to create output file")?);
    encoder.encode(&wav.samples, sink)?;

    println!(
        "Encoding complete. Processed {} frames.",
        wav.samples.len() / wav.channels as usize
    );
    report_sizes(input, output)
}

fn decode_audio(input: &Path, output: &Path) -> Result<()> {
    println!("Decoding {} to {}...", input.display(), output.display());

    let source = BufReader::new(File::open(input).context("Failed to open input file")?);
    let decoded = AudioDecoder::new().decode(source)?;
    println!(
        "Input: {} channels, {} Hz, {} frames",
        decoded.channels,
        decoded.sample_rate,
        decoded.samples.len() / decoded.channels as usize
    );

    audio::write_wav(output, &decoded.samples, decoded.sample_rate, decoded.channels)?;
    println!("Decoding complete. Saved to {}", output.display());
    Ok(())
}

fn encode_image(input: &Path, output: &Path, mode: ParamMode) -> Result<()> {
    println!("Encoding {} to {}...", input.display(), output.display());
    print_mode(mode);

    let raster = image::read_gray(input)?;
    println!(
        "Input: {}x{}, 8-bit greyscale",
        raster.width(),
        raster.height()
    );

    let sink = BufWriter::new(File::create(output).context("Failed to create output file")?);
    ImageEncoder::new(mode)?.encode(&raster, sink)?;

    println!("Encoding complete.");
    report_sizes(input, output)
}

fn decode_image(input: &Path, output: &Path) -> Result<()> {
    println!("Decoding {} to {}...", input.display(), output.display());

    let source = BufReader::new(File::open(input).context("Failed to open input file")?);
    let raster = ImageDecoder::new().decode(source)?;
    println!("Input: {}x{}", raster.width(), raster.height());

    image::write_gray(output, &raster)?;
    println!("Decoding complete. Saved to {}", output.display());
    Ok(())
}

fn encode_dct(input: &Path, output: &Path, quality: f64) -> Result<()> {
    println!("Encoding {} to {}...", input.display(), output.display());

    let wav = audio::read_wav(input)?;
    if wav.channels != 1 {
        bail!("Only mono audio is supported by the DCT pipeline");
    }
    println!(
        "Input: {} Hz, {} samples, quality {quality}",
        wav.sample_rate,
        wav.samples.len()
    );

    let samples: Vec<f64> = wav.samples.iter().map(|&s| s as f64 / 32_768.0).collect();
    let encoder = DctEncoder::new(quality)?;
    let sink = BufWriter::new(File::create(output).context("Failed to create output file")?);
    encoder.encode(&samples, wav.sample_rate, sink)?;

    println!("Encoding complete.");
    report_sizes(input, output)
}

fn decode_dct(input: &Path, output: &Path) -> Result<()> {
    println!("Decoding {} to {}...", input.display(), output.display());

    let source = BufReader::new(File::open(input).context("Failed to open input file")?);
    let decoded = DctDecoder::new().decode(source)?;
    println!(
        "Input: {} Hz, {} samples",
        decoded.sample_rate,
        decoded.samples.len()
    );

    let samples: Vec<i16> = decoded
        .samples
        .iter()
        .map(|&s| (s * 32_768.0).round().clamp(-32_768.0, 32_767.0) as i16)
        .collect();
    audio::write_wav(output, &samples, decoded.sample_rate, 1)?;

    println!("Decoding complete. Saved to {}", output.display());
    Ok(())
}

fn compare(reference: &Path, test: &Path) -> Result<()> {
    let a = audio::read_wav(reference)?;
    let b = audio::read_wav(test)?;
    if a.channels != b.channels {
        bail!(
            "Channel counts differ: {} vs {}",
            a.channels,
            b.channels
        );
    }

    println!(
        "Comparing {} against {}",
        test.display(),
        reference.display()
    );
    println!("  MSE (L2 norm):      {:.4}", analysis::mse(&a.samples, &b.samples));
    println!(
        "  Max error (L\u{221e} norm): {}",
        analysis::max_abs_error(&a.samples, &b.samples)
    );
    let snr = analysis::snr_db(&a.samples, &b.samples);
    if snr.is_infinite() {
        println!("  SNR (dB):           inf (bit-exact)");
    } else {
        println!("  SNR (dB):           {snr:.2}");
    }
    Ok(())
}

fn report_sizes(input: &Path, output: &Path) -> Result<()> {
    let original = std::fs::metadata(input)?.len();
    let compressed = std::fs::metadata(output)?.len();

    println!("--- Compression Stats ---");
    println!("Original Size:   {original} bytes");
    println!("Compressed Size: {compressed} bytes");
    if compressed > 0 {
        println!(
            "Compression Rate: {:.2}:1",
            original as f64 / compressed as f64
        );
    }
    Ok(())
}
