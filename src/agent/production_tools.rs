// Content Forge Production Tools - Clip Assembly & Frame Extraction
// Copyright (c) 2026 Xing_The_Creator | Content Forge
//
// FFmpeg wrappers for turning a still frame into a short clip and for
// pulling the first decodable frame back out of a video.

use anyhow::{anyhow, bail, Context, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Output;
use std::time::Duration;
use tokio::process::Command;
use tracing::{info, warn};

/// Frame grabs should be instant; anything slower is a broken input.
const EXTRACT_TIMEOUT: Duration = Duration::from_secs(30);
/// Upper bound for encoding a short still-image clip.
const CLIP_TIMEOUT: Duration = Duration::from_secs(120);

/// Result of a production operation
#[derive(Debug)]
pub struct ProductionResult {
    pub output_path: PathBuf,
    pub size_mb: f64,
}

/// Loop a still image into a fixed-length H.264 clip.
///
/// Audio is muxed as AAC and cut to the clip length when given; otherwise
/// the clip is silent.
pub async fn still_to_clip(
    image: &Path,
    audio: Option<&Path>,
    duration_secs: f64,
    fps: u32,
    output: &Path,
) -> Result<ProductionResult> {
    info!(
        "[PROD] Assembling {:.1}s clip @ {}fps from still: {:?}",
        duration_secs, fps, image
    );

    let mut cmd = Command::new("ffmpeg");
    cmd.args(["-y", "-nostdin", "-v", "error", "-loop", "1", "-i"])
        .arg(image);
    if let Some(audio) = audio {
        cmd.arg("-i").arg(audio);
    }

    cmd.args([
        "-t",
        &duration_secs.to_string(),
        "-r",
        &fps.to_string(),
        "-c:v",
        "libx264",
        "-pix_fmt",
        "yuv420p", // Broad player compatibility
    ]);

    if audio.is_some() {
        cmd.args(["-c:a", "aac", "-shortest"]);
    } else {
        cmd.arg("-an");
    }

    cmd.arg(output);
    let result = run_with_timeout(&mut cmd, CLIP_TIMEOUT, "Clip assembly").await?;

    if !result.status.success() {
        bail!(
            "FFmpeg clip assembly failed: {}",
            String::from_utf8_lossy(&result.stderr).trim()
        );
    }

    let metadata = std::fs::metadata(output)
        .with_context(|| format!("FFmpeg reported success but {:?} is missing", output))?;
    let size_mb = metadata.len() as f64 / 1_048_576.0;

    info!("[PROD] Clip complete: {:?} ({:.2} MB)", output, size_mb);

    Ok(ProductionResult {
        output_path: output.to_path_buf(),
        size_mb,
    })
}

/// Decode the first frame of `video` into an image file at `output`.
pub async fn extract_first_frame(video: &Path, output: &Path) -> Result<PathBuf> {
    info!("[PROD] Extracting first frame: {:?}", video);

    if !video.exists() {
        bail!("Video not found: {:?}", video);
    }

    // ffmpeg can exit 0 without writing anything; a leftover file must not pass for output
    match std::fs::remove_file(output) {
        Ok(()) => info!("[PROD] Removed stale frame {:?}", output),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(e).with_context(|| format!("Failed to remove stale {:?}", output)),
    }

    let mut cmd = Command::new("ffmpeg");
    cmd.args(["-y", "-nostdin", "-v", "error", "-i"])
        .arg(video)
        .args(["-frames:v", "1", "-q:v", "2"])
        .arg(output);
    let result = run_with_timeout(&mut cmd, EXTRACT_TIMEOUT, "Frame extraction").await?;

    if !result.status.success() {
        bail!(
            "FFmpeg frame extraction failed: {}",
            String::from_utf8_lossy(&result.stderr).trim()
        );
    }

    if !output.exists() {
        warn!("[PROD] FFmpeg decoded no frames from {:?}", video);
        bail!("No decodable frame in {:?}", video);
    }

    Ok(output.to_path_buf())
}

/// Run `cmd` to completion, killing it if it outlives `limit`.
async fn run_with_timeout(cmd: &mut Command, limit: Duration, label: &str) -> Result<Output> {
    tokio::time::timeout(limit, cmd.kill_on_drop(true).output())
        .await
        .map_err(|_| anyhow!("{} timed out after {:?}", label, limit))?
        .with_context(|| format!("{}: failed to execute command", label))
}
