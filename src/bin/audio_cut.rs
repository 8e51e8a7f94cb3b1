// src/bin/audio_cut.rs

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use audiocut::audio::{
    format_time, probe_info, DirSaver, Exporter, SymphoniaDecoder, TimeWindow,
};

/// Command-line tool for cutting a window out of an audio file
#[derive(Parser, Debug)]
#[command(name = "audio-cut")]
#[command(about = "Cut a time window out of an audio file and export it as 16-bit WAV", long_about = None)]
struct Args {
    /// Input audio file (MP3, FLAC, WAV, OGG, etc.)
    input: PathBuf,

    /// Start of the cut as mm:ss
    #[arg(short, long, default_value = "00:00")]
    start: String,

    /// End of the cut as mm:ss (defaults to the end of the file)
    #[arg(short, long)]
    end: Option<String>,

    /// Directory the exported WAV is written to
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Print file metadata as JSON and exit
    #[arg(long)]
    info: bool,
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing with environment filter support
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("audiocut=info")),
        )
        .init();

    let args = Args::parse();

    let info = probe_info(&args.input)?;

    if args.info {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("🎵 Audio Cutter");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("\n📊 Input File: {}", args.input.display());
    println!(
        "   Duration: {:.2} seconds ({})",
        info.duration_seconds,
        format_time(info.duration_seconds)
    );
    println!("   Sample Rate: {} Hz", info.sample_rate);
    println!("   Channels: {}", info.channels);
    println!("   Format: {}", info.format);

    let end_text = match args.end {
        Some(text) => text,
        None => {
            anyhow::ensure!(
                info.duration_seconds > 0.0,
                "could not determine the file's duration; pass --end explicitly"
            );
            format_time(info.duration_seconds)
        }
    };

    let window = TimeWindow::from_text(&args.start, &end_text)?;

    println!("\n✂️  Cut Window:");
    println!("   Start: {}", args.start);
    println!("   End: {}", end_text);
    println!("   Duration: {:.2}s", window.duration());

    let source_name = args
        .input
        .file_name()
        .and_then(|n| n.to_str())
        .context("input path has no file name")?;

    let bytes = std::fs::read(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;

    let start_time = std::time::Instant::now();
    let exporter = Exporter::new(SymphoniaDecoder, DirSaver::new(&args.out_dir));
    let path = exporter.export(source_name, &bytes, &window)?;

    println!("\n✅ Done! Output saved to: {}", path.display());
    println!("   Total time: {:.2}s", start_time.elapsed().as_secs_f64());

    Ok(())
}
