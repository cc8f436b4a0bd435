use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use meshwire_core::{ExportConfig, MeshwireError, MeshwireResult};

/// Frame file pattern written by the viewer's recorder (`0000000.png`, ...).
pub const FRAME_PATTERN: &str = "%07d.png";

/// Settings for a frame-archive conversion.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub framerate: u32,
    pub crf: u32,
    pub preset: String,
    /// Replace the output file if it already exists.
    pub overwrite: bool,
    /// Encoder executable, looked up on `PATH`.
    pub program: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self::from(&ExportConfig::default())
    }
}

impl From<&ExportConfig> for ExportOptions {
    fn from(config: &ExportConfig) -> Self {
        Self {
            framerate: config.framerate,
            crf: config.crf,
            preset: config.preset.clone(),
            overwrite: config.overwrite,
            program: "ffmpeg".to_string(),
        }
    }
}

impl ExportOptions {
    /// Arguments passed to the encoder, run from the directory holding the frames.
    pub fn args(&self, output_path: &Path) -> Vec<String> {
        let mut args = vec![
            "-r".to_string(),
            self.framerate.to_string(),
            "-i".to_string(),
            FRAME_PATTERN.to_string(),
            "-vcodec".to_string(),
            "libx264".to_string(),
            "-preset".to_string(),
            self.preset.clone(),
            "-pix_fmt".to_string(),
            "yuv420p".to_string(),
            "-crf".to_string(),
            self.crf.to_string(),
        ];
        if self.overwrite {
            args.push("-y".to_string());
        }
        args.push(output_path.display().to_string());
        args
    }
}

/// Encoder that shells out to FFmpeg.
pub struct FfmpegEncoder;

impl FfmpegEncoder {
    /// Check if FFmpeg is available on the system.
    pub fn is_available() -> bool {
        Command::new("ffmpeg")
            .arg("-version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }
}

/// Convert a tar archive of captured PNG frames into a video file.
///
/// Returns the absolute path of the written video.
pub fn convert_frames_to_video(
    tar_path: &Path,
    output_path: &Path,
    options: &ExportOptions,
) -> MeshwireResult<PathBuf> {
    let output_path = std::path::absolute(output_path)?;
    if output_path.exists() && !options.overwrite {
        return Err(MeshwireError::OutputAlreadyExists(output_path));
    }

    let tmp_dir = tempfile::tempdir()?;
    let mut archive = tar::Archive::new(File::open(tar_path)?);
    archive.unpack(tmp_dir.path())?;
    tracing::debug!(
        "extracted {} into {}",
        tar_path.display(),
        tmp_dir.path().display()
    );

    let args = options.args(&output_path);
    let output = Command::new(&options.program)
        .args(&args)
        .current_dir(tmp_dir.path())
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .output()
        .map_err(|e| {
            MeshwireError::external_tool(&options.program, "not started", e.to_string())
        })?;

    if !output.status.success() {
        tracing::warn!(
            "could not convert frames with {}. To convert them manually, extract {} and run: {} {}",
            options.program,
            tar_path.display(),
            options.program,
            options.args(Path::new("output.mp4")).join(" ")
        );
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(MeshwireError::external_tool(
            &options.program,
            output.status,
            stderr,
        ));
    }

    tracing::info!(
        "saved {} ({}fps)",
        output_path.display(),
        options.framerate
    );
    Ok(output_path)
}
