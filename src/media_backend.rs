// Content Forge Media Backend - Optional Capability Detection
// Copyright (c) 2026 Xing_The_Creator | Content Forge
//
// Text rendering needs at least one system font and clip assembly needs an
// `ffmpeg` binary on PATH. Both are probed once per process; callers degrade
// (text preview, still image) instead of failing when either is missing.

use std::fmt;
use std::process::Command;
use std::sync::OnceLock;
use tracing::{info, warn};

use crate::engine::canvas;

/// How text is drawn onto bitmaps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextRenderer {
    /// SVG text layout against the system font database
    SystemFonts { faces: usize },
    Unavailable,
}

impl fmt::Display for TextRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextRenderer::SystemFonts { faces } => write!(f, "System fonts ({} faces)", faces),
            TextRenderer::Unavailable => write!(f, "Unavailable"),
        }
    }
}

/// How still frames become clips.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoAssembler {
    /// FFmpeg CLI, with the first line of `ffmpeg -version`
    Ffmpeg { version: String },
    Unavailable,
}

impl fmt::Display for VideoAssembler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VideoAssembler::Ffmpeg { version } => write!(f, "FFmpeg: {}", version),
            VideoAssembler::Unavailable => write!(f, "Unavailable"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaCapabilities {
    pub text: TextRenderer,
    pub video: VideoAssembler,
}

impl MediaCapabilities {
    pub fn new(text: TextRenderer, video: VideoAssembler) -> Self {
        Self { text, video }
    }

    /// Everything optional switched off.
    pub fn none() -> Self {
        Self::new(TextRenderer::Unavailable, VideoAssembler::Unavailable)
    }

    /// Probe the host for fonts and ffmpeg.
    pub fn detect() -> Self {
        let caps = Self::new(Self::try_fonts(), Self::try_ffmpeg());
        info!("[MEDIA] Text: {} | Video: {}", caps.text, caps.video);
        caps
    }

    fn try_fonts() -> TextRenderer {
        let faces = canvas::system_fonts().len();
        if faces == 0 {
            warn!("[MEDIA] No system fonts found. Content previews fall back to text files.");
            return TextRenderer::Unavailable;
        }
        TextRenderer::SystemFonts { faces }
    }

    fn try_ffmpeg() -> VideoAssembler {
        match probe_ffmpeg() {
            Some(version) => VideoAssembler::Ffmpeg { version },
            None => {
                warn!("[MEDIA] FFmpeg not found. Video creation will be limited to still images.");
                VideoAssembler::Unavailable
            }
        }
    }

    pub fn can_render_text(&self) -> bool {
        !matches!(self.text, TextRenderer::Unavailable)
    }

    pub fn can_assemble_video(&self) -> bool {
        !matches!(self.video, VideoAssembler::Unavailable)
    }
}

/// First line of `ffmpeg -version`, or `None` when ffmpeg cannot be run.
pub fn probe_ffmpeg() -> Option<String> {
    let output = Command::new("ffmpeg").arg("-version").output().ok()?;
    if !output.status.success() {
        return None;
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let first = stdout.lines().next()?.trim();
    if first.is_empty() {
        return None;
    }
    Some(first.to_string())
}

static MEDIA_CAPABILITIES: OnceLock<MediaCapabilities> = OnceLock::new();

/// Get or detect the process-wide capabilities.
pub fn get_media_capabilities() -> &'static MediaCapabilities {
    MEDIA_CAPABILITIES.get_or_init(MediaCapabilities::detect)
}

/// Print capability status (for CLI `status` command)
pub fn print_media_status() {
    let caps = get_media_capabilities();

    println!("=== Content Forge Media Status ===");
    println!("Text Rendering: {}", caps.text);
    println!(
        "Image Previews: {}",
        if caps.can_render_text() { "✓ PNG" } else { "✗ TEXT FALLBACK" }
    );
    println!("Video Assembly: {}", caps.video);
    println!(
        "Clip Output: {}",
        if caps.can_assemble_video() { "✓ MP4 (libx264, 24fps, 5s)" } else { "✗ STILL IMAGE ONLY" }
    );
}
