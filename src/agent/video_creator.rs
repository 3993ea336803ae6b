// Content Forge Video Creator
// Copyright (c) 2026 Xing_The_Creator | Content Forge
//
// Renders a vertical title frame for a content package and, when FFmpeg is
// around, loops it into a short silent clip. Every render ends with a
// watermarked preview; if anything in the preview path fails, the caller
// gets the fallback placeholder instead of an error.

use anyhow::{bail, Context, Result};
use chrono::Local;
use image::{DynamicImage, Rgba, RgbImage};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

use crate::agent::content_generator::ContentPackage;
use crate::agent::production_tools;
use crate::agent::templates::DEFAULT_LANGUAGE;
use crate::config::MediaLayout;
use crate::engine::canvas::{self, rgb, Anchor, Canvas, TextRun};
use crate::media_backend::{get_media_capabilities, MediaCapabilities};

pub const FRAME_WIDTH: u32 = 1080;
pub const FRAME_HEIGHT: u32 = 1920;
pub const CLIP_DURATION_SECS: f64 = 5.0;
pub const CLIP_FPS: u32 = 24;

pub const WATERMARK_TEXT: &str = "AutoGenerated";
pub const FALLBACK_PREVIEW_NAME: &str = "fallback_preview.jpg";

const DEFAULT_TITLE: &str = "Social Media Content";
const TEMP_FRAME_NAME: &str = "temp_frame.jpg";
const FRAME_FONT_SIZE: f32 = 60.0;
const WATERMARK_FONT_SIZE: f32 = 20.0;

const VIDEO_EXTENSIONS: [&str; 3] = ["mp4", "avi", "mov"];
const IMAGE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaKind {
    Image,
    Video,
}

/// A rendered file plus the preview derived from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaArtifact {
    pub kind: MediaKind,
    pub media_path: PathBuf,
    pub preview_path: PathBuf,
}

pub struct VideoCreator {
    layout: MediaLayout,
    capabilities: MediaCapabilities,
}

impl VideoCreator {
    /// Creator using the process-wide capability probe. Creates the media
    /// directories if they are missing.
    pub fn new(layout: MediaLayout) -> Result<Self> {
        Self::with_capabilities(layout, get_media_capabilities().clone())
    }

    pub fn with_capabilities(layout: MediaLayout, capabilities: MediaCapabilities) -> Result<Self> {
        layout.ensure_dirs()?;
        Ok(Self { layout, capabilities })
    }

    pub fn layout(&self) -> &MediaLayout {
        &self.layout
    }

    /// Render `content` to a clip (FFmpeg available) or a still image, then
    /// generate its preview. `style` is accepted for API compatibility and
    /// currently has no effect.
    pub async fn create_from_content<S: AsRef<str>>(
        &self,
        content: &ContentPackage,
        languages: &[S],
        style: &str,
    ) -> Result<MediaArtifact> {
        let languages: Vec<&str> = if languages.is_empty() {
            vec![DEFAULT_LANGUAGE]
        } else {
            languages.iter().map(|l| l.as_ref()).collect()
        };
        info!(
            "[VIDEO] Creating media for '{}' (style: {}, languages: {})",
            content.topic,
            style,
            languages.join(", ")
        );

        let frame = self.render_frame(&content.topic, &languages)?;
        self.layout.ensure_dirs()?;

        let temp_frame = self.layout.assets_dir.join(TEMP_FRAME_NAME);
        frame
            .save(&temp_frame)
            .with_context(|| format!("Failed to save frame {:?}", temp_frame))?;

        let stamp = Local::now().format("%Y%m%d_%H%M%S");
        let mut clip = None;

        if self.capabilities.can_assemble_video() {
            let video_path = self.layout.output_dir.join(format!("video_{}.mp4", stamp));
            let audio = self.create_test_audio();

            match production_tools::still_to_clip(
                &temp_frame,
                audio.as_deref(),
                CLIP_DURATION_SECS,
                CLIP_FPS,
                &video_path,
            )
            .await
            {
                Ok(result) => clip = Some(result.output_path),
                Err(e) => warn!("[VIDEO] Clip assembly failed, keeping still image: {}", e),
            }
        }

        let (kind, media_path) = match clip {
            Some(path) => (MediaKind::Video, path),
            None => {
                let image_path = self.layout.output_dir.join(format!("content_{}.jpg", stamp));
                frame
                    .save(&image_path)
                    .with_context(|| format!("Failed to save image {:?}", image_path))?;
                (MediaKind::Image, image_path)
            }
        };
        info!("[VIDEO] {:?} written: {:?}", kind, media_path);

        let preview_path = self.generate_preview(&media_path).await;

        Ok(MediaArtifact {
            kind,
            media_path,
            preview_path,
        })
    }

    /// The 1080x1920 title frame: centered topic, language subtitle and a
    /// timestamp footer.
    pub fn render_frame(&self, topic: &str, languages: &[&str]) -> Result<RgbImage> {
        let title = if topic.is_empty() { DEFAULT_TITLE } else { topic };
        let y = (FRAME_HEIGHT / 3) as f32;
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");

        let mut canvas = Canvas::new(FRAME_WIDTH, FRAME_HEIGHT).with_background(rgb(20, 30, 50));
        canvas
            .push(
                TextRun::new(title, FRAME_WIDTH as f32 / 2.0, y, FRAME_FONT_SIZE, rgb(255, 255, 255))
                    .anchored(Anchor::Middle),
            )
            .push(TextRun::new(
                format!("Generated in {} languages", languages.join(", ")),
                50.0,
                y + 100.0,
                FRAME_FONT_SIZE,
                rgb(200, 200, 255),
            ))
            .push(TextRun::new(
                format!("Generated: {}", timestamp),
                50.0,
                (FRAME_HEIGHT - 100) as f32,
                FRAME_FONT_SIZE,
                rgb(150, 150, 150),
            ));

        Ok(DynamicImage::ImageRgba8(canvas.rasterize()?).to_rgb8())
    }

    // TODO: synthesize a narration track from the caption once a TTS backend exists.
    fn create_test_audio(&self) -> Option<PathBuf> {
        None
    }

    /// Produce a watermarked preview for `media_path`.
    ///
    /// Videos get their first frame extracted, images are copied. Any
    /// failure, or an extension that is neither, yields the fallback
    /// placeholder. This never returns an error.
    pub async fn generate_preview(&self, media_path: &Path) -> PathBuf {
        match self.try_generate_preview(media_path).await {
            Ok(Some(path)) => {
                info!("[PREVIEW] ✅ Preview ready: {:?}", path);
                return path;
            }
            Ok(None) => warn!("[PREVIEW] Unsupported media type: {:?}", media_path),
            Err(e) => error!("[PREVIEW] Error generating preview for {:?}: {:#}", media_path, e),
        }

        self.create_fallback_preview()
    }

    async fn try_generate_preview(&self, media_path: &Path) -> Result<Option<PathBuf>> {
        let ext = extension_lowercase(media_path);
        fs::create_dir_all(&self.layout.preview_dir)
            .with_context(|| format!("Failed to create {:?}", self.layout.preview_dir))?;

        if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
            let stem = media_path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "video".to_string());
            let preview_path = self.layout.preview_dir.join(format!("{}_preview.jpg", stem));

            production_tools::extract_first_frame(media_path, &preview_path).await?;
            self.add_watermark(&preview_path);
            return Ok(Some(preview_path));
        }

        if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
            let file_name = media_path
                .file_name()
                .with_context(|| format!("No file name in {:?}", media_path))?;
            let preview_path = self.layout.preview_dir.join(file_name);

            // The watermark is stamped in place, so it must never land on the input
            if is_same_file(media_path, &preview_path) {
                bail!("{:?} is already the preview destination", media_path);
            }
            fs::copy(media_path, &preview_path).with_context(|| {
                format!("Failed to copy {:?} to {:?}", media_path, preview_path)
            })?;
            self.add_watermark(&preview_path);
            return Ok(Some(preview_path));
        }

        Ok(None)
    }

    /// Stamp [`WATERMARK_TEXT`] in the bottom-right corner, in place.
    /// Failures are logged and leave the file untouched.
    pub fn add_watermark(&self, image_path: &Path) {
        if let Err(e) = apply_watermark(image_path) {
            error!("[PREVIEW] Error adding watermark to {:?}: {:#}", image_path, e);
        }
    }

    /// Write the "Preview / Not Available" placeholder and return its path.
    pub fn create_fallback_preview(&self) -> PathBuf {
        let path = self.layout.preview_dir.join(FALLBACK_PREVIEW_NAME);
        if let Err(e) = write_fallback_preview(&path) {
            error!("[PREVIEW] Failed to write fallback preview {:?}: {:#}", path, e);
        }
        path
    }
}

fn apply_watermark(image_path: &Path) -> Result<()> {
    let original = image::open(image_path)
        .with_context(|| format!("Failed to open {:?}", image_path))?;
    let keep_alpha = original.color().has_alpha();

    let mut img = original.to_rgba8();
    let (width, height) = img.dimensions();
    canvas::overlay_text(
        &mut img,
        &[TextRun::new(
            WATERMARK_TEXT,
            width as f32 - 10.0,
            height as f32 - 30.0,
            WATERMARK_FONT_SIZE,
            Rgba([255, 255, 255, 128]),
        )
        .anchored(Anchor::End)],
    )?;

    let marked = DynamicImage::ImageRgba8(img);
    let saved = if keep_alpha {
        marked.save(image_path)
    } else {
        marked.to_rgb8().save(image_path)
    };
    saved.with_context(|| format!("Failed to save watermarked {:?}", image_path))?;
    Ok(())
}

fn write_fallback_preview(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }

    let mut card = Canvas::new(300, 200).with_background(rgb(40, 40, 40));
    card.push(TextRun::new("Preview", 50.0, 80.0, 16.0, rgb(255, 255, 255)))
        .push(TextRun::new("Not Available", 40.0, 120.0, 16.0, rgb(200, 200, 200)));

    DynamicImage::ImageRgba8(card.rasterize()?)
        .to_rgb8()
        .save(path)
        .with_context(|| format!("Failed to save {:?}", path))?;
    Ok(())
}

fn extension_lowercase(path: &Path) -> String {
    path.extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_lowercase() {
        assert_eq!(extension_lowercase(Path::new("a/b/CLIP.MOV")), "mov");
        assert_eq!(extension_lowercase(Path::new("a/b/noext")), "");
    }

    #[test]
    fn test_render_frame_dimensions() {
        let tmp = tempfile::tempdir().unwrap();
        let creator =
            VideoCreator::with_capabilities(MediaLayout::from_root(tmp.path()), MediaCapabilities::none())
                .unwrap();
        let frame = creator.render_frame("", &["ro", "en"]).unwrap();
        assert_eq!(frame.dimensions(), (FRAME_WIDTH, FRAME_HEIGHT));
        // Top-left corner is plain background
        assert_eq!(frame.get_pixel(0, 0).0, [20, 30, 50]);
    }

    #[test]
    fn test_watermark_failure_is_swallowed() {
        let tmp = tempfile::tempdir().unwrap();
        let creator =
            VideoCreator::with_capabilities(MediaLayout::from_root(tmp.path()), MediaCapabilities::none())
                .unwrap();
        let bogus = tmp.path().join("not_an_image.jpg");
        fs::write(&bogus, b"garbage").unwrap();

        creator.add_watermark(&bogus);
        assert_eq!(fs::read(&bogus).unwrap(), b"garbage");
    }

    #[test]
    fn test_fallback_preview_written() {
        let tmp = tempfile::tempdir().unwrap();
        let creator =
            VideoCreator::with_capabilities(MediaLayout::from_root(tmp.path()), MediaCapabilities::none())
                .unwrap();
        let path = creator.create_fallback_preview();
        assert!(path.ends_with(FALLBACK_PREVIEW_NAME));
        let img = image::open(&path).unwrap();
        assert_eq!((img.width(), img.height()), (300, 200));
    }

    #[test]
    fn test_watermark_marks_bottom_right() {
        if canvas::system_fonts().is_empty() {
            eprintln!("no system fonts, skipping");
            return;
        }

        let tmp = tempfile::tempdir().unwrap();
        let creator =
            VideoCreator::with_capabilities(MediaLayout::from_root(tmp.path()), MediaCapabilities::none())
                .unwrap();
        let path = tmp.path().join("black.png");
        RgbImage::from_pixel(300, 120, image::Rgb([0, 0, 0])).save(&path).unwrap();

        creator.add_watermark(&path);

        let marked = image::open(&path).unwrap().to_rgb8();
        let (w, h) = marked.dimensions();
        let stamped = marked
            .enumerate_pixels()
            .filter(|(x, y, p)| *x > w - 150 && *y > h - 40 && p.0 != [0, 0, 0])
            .count();
        assert!(stamped > 0, "no watermark pixels in the bottom-right corner");

        for y in 0..40 {
            for x in 0..100 {
                assert_eq!(marked.get_pixel(x, y).0, [0, 0, 0]);
            }
        }
    }
}
