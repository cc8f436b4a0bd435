mod demos;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use meshwire_core::MeshwireConfig;
use meshwire_encode::{convert_frames_to_video, ExportOptions, FfmpegEncoder};
use meshwire_ir::{JsonLinesTransport, Visualizer};

#[derive(Parser)]
#[command(
    name = "meshwire",
    version,
    about = "Meshwire — scene commands and keyframe animation for remote 3D viewers"
)]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Stream a demo scene as JSON lines
    Demo {
        #[command(subcommand)]
        scene: DemoScene,

        /// Write commands to this file instead of stdout
        #[arg(short, long, global = true)]
        output: Option<PathBuf>,
    },

    /// Convert a tar archive of captured frames to a video
    Export {
        /// Frame archive saved by the viewer
        #[arg()]
        archive: PathBuf,

        /// Output video path
        #[arg(short, long, default_value = "output.mp4")]
        output: PathBuf,

        /// Frames per second (default from config)
        #[arg(long)]
        framerate: Option<u32>,

        /// Replace the output file if it exists
        #[arg(long)]
        overwrite: bool,
    },

    /// Display version and encoder info
    Info,
}

#[derive(Subcommand, Clone, Copy)]
enum DemoScene {
    /// A box spinning about z
    Box {
        /// Number of transforms to send
        #[arg(long, default_value_t = 200)]
        frames: u32,

        /// Pause between transforms, in milliseconds
        #[arg(long, default_value_t = 0)]
        interval_ms: u64,
    },
    /// A colored point cloud
    Points {
        /// Number of points
        #[arg(long, default_value_t = 100_000)]
        count: usize,
    },
    /// A keyframed quarter turn published as one animation
    Animation,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr: stdout carries the command stream.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Demo { scene, output } => cmd_demo(scene, output, &config),
        Commands::Export {
            archive,
            output,
            framerate,
            overwrite,
        } => cmd_export(&archive, &output, framerate, overwrite, &config),
        Commands::Info => cmd_info(),
    }
}

fn load_config(path: Option<&Path>) -> Result<MeshwireConfig> {
    match path {
        Some(path) => MeshwireConfig::load_from_file(path)
            .with_context(|| format!("failed to load config: {}", path.display())),
        None => Ok(MeshwireConfig::default()),
    }
}

fn cmd_demo(scene: DemoScene, output: Option<PathBuf>, config: &MeshwireConfig) -> Result<()> {
    let writer: Box<dyn Write> = match &output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path)
                .with_context(|| format!("failed to create output file: {}", path.display()))?,
        )),
        None => Box::new(std::io::stdout().lock()),
    };
    let mut transport = JsonLinesTransport::new(writer);
    let mut vis = Visualizer::new(&mut transport);

    match scene {
        DemoScene::Box {
            frames,
            interval_ms,
        } => demos::spinning_box(&mut vis, frames, Duration::from_millis(interval_ms))?,
        DemoScene::Points { count } => demos::point_cloud(&mut vis, count)?,
        DemoScene::Animation => demos::keyframed_box(&mut vis, config)?,
    }

    if let Some(path) = output {
        tracing::info!("wrote commands to {}", path.display());
    }
    Ok(())
}

fn cmd_export(
    archive: &Path,
    output: &Path,
    framerate: Option<u32>,
    overwrite: bool,
    config: &MeshwireConfig,
) -> Result<()> {
    let mut options = ExportOptions::from(&config.export);
    if let Some(framerate) = framerate {
        options.framerate = framerate;
    }
    options.overwrite |= overwrite;

    let saved = convert_frames_to_video(archive, output, &options)
        .with_context(|| format!("failed to export {}", archive.display()))?;
    println!("Saved output as {}", saved.display());
    Ok(())
}

fn cmd_info() -> Result<()> {
    println!("Meshwire");
    println!("   Version:   {}", env!("CARGO_PKG_VERSION"));
    println!("   Wire:      JSON command stream");
    println!(
        "   FFmpeg:    {}",
        if FfmpegEncoder::is_available() {
            "available"
        } else {
            "NOT FOUND"
        }
    );
    Ok(())
}
