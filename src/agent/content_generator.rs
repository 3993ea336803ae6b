// Content Forge Content Generator
// Copyright (c) 2026 Xing_The_Creator | Content Forge
//
// Builds a content package (captions, hashtags, optional video script and
// mocked performance numbers) for every requested language, then writes a
// preview of it: a PNG card when text can be rendered, a plain text file
// otherwise.

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use image::DynamicImage;
use indexmap::IndexMap;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::agent::templates::{self, Locale};
use crate::config::MediaLayout;
use crate::engine::canvas::{rgb, Canvas, TextRun};
use crate::media_backend::{get_media_capabilities, MediaCapabilities};

/// Upper bound on hashtags per language.
pub const MAX_HASHTAGS: usize = 8;

/// Only the first few topic words are considered for hashtags.
const TOPIC_WORDS_CONSIDERED: usize = 3;
/// Topic words must be longer than this to become a hashtag.
const MIN_TOPIC_WORD_CHARS: usize = 3;
/// Preview titles are cut to this many characters.
const PREVIEW_TITLE_CHARS: usize = 50;

const PREVIEW_WIDTH: u32 = 800;
const PREVIEW_HEIGHT: u32 = 400;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LanguageContent {
    pub caption: String,
    pub hashtags: Vec<String>,
    pub script: Option<String>,
}

/// Mocked prediction. The numbers have no relation to the content.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PerformanceMetrics {
    /// Percent, in `[2.0, 15.0)`
    pub predicted_engagement: f64,
    /// In `[0.1, 0.9)`
    pub virality_score: f64,
    /// In `[0.5, 1.0)`
    pub audience_match: f64,
}

impl PerformanceMetrics {
    pub fn predict<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            predicted_engagement: rng.gen_range(2.0..15.0),
            virality_score: rng.gen_range(0.1..0.9),
            audience_match: rng.gen_range(0.5..1.0),
        }
    }
}

/// Everything generated for one topic/platform request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentPackage {
    pub topic: String,
    pub platform: String,
    /// Local time, ISO-8601
    pub generated_at: String,
    /// Keyed by language code, in request order
    pub languages: IndexMap<String, LanguageContent>,
    pub success_metrics: PerformanceMetrics,
    /// File written for the preview (PNG or TXT)
    pub preview_path: PathBuf,
    /// `/preview/<file name>`
    pub preview_url: String,
}

impl ContentPackage {
    pub fn language_codes(&self) -> Vec<&str> {
        self.languages.keys().map(String::as_str).collect()
    }
}

/// Fields the preview is drawn from, gathered before the package exists.
struct PreviewSource<'a> {
    topic: &'a str,
    platform: &'a str,
    languages: Vec<&'a str>,
    generated_at: &'a str,
    metrics: &'a PerformanceMetrics,
}

pub struct ContentGenerator {
    layout: MediaLayout,
    capabilities: MediaCapabilities,
}

impl ContentGenerator {
    /// Generator using the process-wide capability probe.
    pub fn new(layout: MediaLayout) -> Self {
        Self::with_capabilities(layout, get_media_capabilities().clone())
    }

    pub fn with_capabilities(layout: MediaLayout, capabilities: MediaCapabilities) -> Self {
        Self { layout, capabilities }
    }

    pub fn trending_topics(&self) -> &'static [&'static str] {
        templates::trending_topics()
    }

    /// Generate content for every language in `languages` (`["ro"]` when
    /// empty) and write its preview.
    pub fn generate_complete_content<S: AsRef<str>>(
        &self,
        topic: &str,
        platform: &str,
        languages: &[S],
        video_required: bool,
    ) -> Result<ContentPackage> {
        self.generate_complete_content_with_rng(
            topic,
            platform,
            languages,
            video_required,
            &mut rand::thread_rng(),
        )
    }

    /// Same as [`generate_complete_content`](Self::generate_complete_content)
    /// with an explicit random source.
    pub fn generate_complete_content_with_rng<S: AsRef<str>, R: Rng + ?Sized>(
        &self,
        topic: &str,
        platform: &str,
        languages: &[S],
        video_required: bool,
        rng: &mut R,
    ) -> Result<ContentPackage> {
        info!(
            "[CONTENT] Generating '{}' for {} ({} languages, video: {})",
            topic,
            platform,
            languages.len().max(1),
            video_required
        );

        let now = Local::now();
        let generated_at = now.format("%Y-%m-%dT%H:%M:%S%.6f").to_string();
        let success_metrics = PerformanceMetrics::predict(rng);

        let mut by_language = IndexMap::new();
        let requested: Vec<&str> = if languages.is_empty() {
            vec![templates::DEFAULT_LANGUAGE]
        } else {
            languages.iter().map(|l| l.as_ref()).collect()
        };

        for code in requested {
            let entry = LanguageContent {
                caption: generate_caption(topic, platform, code, rng),
                hashtags: generate_hashtags(topic, code),
                script: video_required.then(|| generate_script(topic, code)),
            };
            by_language.insert(code.to_string(), entry);
        }

        let preview_path = self.create_preview(
            &PreviewSource {
                topic,
                platform,
                languages: by_language.keys().map(String::as_str).collect(),
                generated_at: &generated_at,
                metrics: &success_metrics,
            },
            &now,
        )?;
        let preview_url = preview_url_for(&preview_path);

        Ok(ContentPackage {
            topic: topic.to_string(),
            platform: platform.to_string(),
            generated_at,
            languages: by_language,
            success_metrics,
            preview_path,
            preview_url,
        })
    }

    fn create_preview(&self, source: &PreviewSource<'_>, now: &DateTime<Local>) -> Result<PathBuf> {
        fs::create_dir_all(&self.layout.preview_dir)
            .with_context(|| format!("Failed to create {:?}", self.layout.preview_dir))?;
        let stamp = now.format("%Y%m%d_%H%M%S");

        if !self.capabilities.can_render_text() {
            let path = self.layout.preview_dir.join(format!("simple_preview_{}.txt", stamp));
            write_text_preview(source, &path)?;
            info!("[CONTENT] Text preview written: {:?}", path);
            return Ok(path);
        }

        let path = self.layout.preview_dir.join(format!("preview_{}.png", stamp));
        let card = render_preview_card(source)?;
        DynamicImage::ImageRgba8(card)
            .to_rgb8()
            .save(&path)
            .with_context(|| format!("Failed to save preview {:?}", path))?;
        info!("[CONTENT] Preview card written: {:?}", path);
        Ok(path)
    }
}

/// Pick one caption at random from the language's pool.
pub fn generate_caption<R: Rng + ?Sized>(
    topic: &str,
    platform: &str,
    language: &str,
    rng: &mut R,
) -> String {
    let pool = templates::caption_pool(topic, platform, Locale::from_code(language));
    pool.choose(rng).cloned().unwrap_or_default()
}

/// Base tags followed by up to three topic-derived tags, capped at
/// [`MAX_HASHTAGS`].
pub fn generate_hashtags(topic: &str, language: &str) -> Vec<String> {
    let mut tags: Vec<String> = templates::base_hashtags(Locale::from_code(language))
        .iter()
        .map(|t| t.to_string())
        .collect();

    let lowered = topic.to_lowercase();
    for word in lowered.split_whitespace().take(TOPIC_WORDS_CONSIDERED) {
        if word.chars().count() > MIN_TOPIC_WORD_CHARS {
            tags.push(format!("#{}", word));
        }
    }

    tags.truncate(MAX_HASHTAGS);
    debug!("[CONTENT] {} hashtags for '{}' ({})", tags.len(), topic, language);
    tags
}

pub fn generate_script(topic: &str, language: &str) -> String {
    templates::script(topic, Locale::from_code(language))
}

fn preview_url_for(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("/preview/{}", name)
}

fn render_preview_card(source: &PreviewSource<'_>) -> Result<image::RgbaImage> {
    let title: String = source.topic.chars().take(PREVIEW_TITLE_CHARS).collect();

    let mut card = Canvas::new(PREVIEW_WIDTH, PREVIEW_HEIGHT).with_background(rgb(0x2c, 0x3e, 0x50));
    card.push(TextRun::new(title, 20.0, 20.0, 24.0, rgb(255, 255, 255)))
        .push(TextRun::new(
            format!("Platform: {}", source.platform),
            20.0,
            70.0,
            18.0,
            rgb(0x34, 0x98, 0xdb),
        ))
        .push(TextRun::new(
            format!("Languages: {}", source.languages.join(", ")),
            20.0,
            110.0,
            18.0,
            rgb(0x2e, 0xcc, 0x71),
        ))
        .push(TextRun::new(
            format!(
                "Predicted Engagement: {:.1}%",
                source.metrics.predicted_engagement
            ),
            20.0,
            150.0,
            14.0,
            rgb(0xf3, 0x9c, 0x12),
        ));

    card.rasterize()
}

fn write_text_preview(source: &PreviewSource<'_>, path: &Path) -> Result<()> {
    let body = format!(
        "Topic: {}\nPlatform: {}\nLanguages: {}\nGenerated: {}\n",
        source.topic,
        source.platform,
        source.languages.join(", "),
        source.generated_at
    );
    fs::write(path, body).with_context(|| format!("Failed to write text preview {:?}", path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_hashtags_from_topic_words() {
        let tags = generate_hashtags("Best Time to post", "en");
        assert_eq!(
            tags,
            vec!["#socialmedia", "#marketing", "#digital", "#tips", "#best", "#time"]
        );
    }

    #[test]
    fn test_hashtags_only_first_three_words() {
        // "growth" is the fourth word and never considered
        let tags = generate_hashtags("viral reels hacks growth", "ro");
        assert_eq!(tags.len(), 7);
        assert_eq!(tags[3], "#romania");
        assert!(!tags.contains(&"#growth".to_string()));
    }

    #[test]
    fn test_hashtags_capped() {
        let tags = generate_hashtags("aaaa bbbb cccc dddd eeee ffff gggg", "en");
        assert!(tags.len() <= MAX_HASHTAGS);
    }

    #[test]
    fn test_short_words_skipped() {
        let tags = generate_hashtags("AI in ads", "en");
        assert_eq!(tags.len(), 4);
    }

    #[test]
    fn test_caption_comes_from_pool() {
        let mut rng = StdRng::seed_from_u64(7);
        let caption = generate_caption("reels", "Instagram", "en", &mut rng);
        let pool = templates::caption_pool("reels", "Instagram", Locale::English);
        assert!(pool.contains(&caption));
    }

    #[test]
    fn test_metrics_ranges() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let m = PerformanceMetrics::predict(&mut rng);
            assert!((2.0..15.0).contains(&m.predicted_engagement));
            assert!((0.1..0.9).contains(&m.virality_score));
            assert!((0.5..1.0).contains(&m.audience_match));
        }
    }

    #[test]
    fn test_preview_url() {
        let url = preview_url_for(Path::new("static/previews/preview_20260101_120000.png"));
        assert_eq!(url, "/preview/preview_20260101_120000.png");
    }

    #[test]
    fn test_languages_keep_request_order() {
        let tmp = tempfile::tempdir().unwrap();
        let generator =
            ContentGenerator::with_capabilities(MediaLayout::from_root(tmp.path()), MediaCapabilities::none());

        let content = generator
            .generate_complete_content("Digital marketing", "facebook", &["ro", "en", "ro"], false)
            .unwrap();

        assert_eq!(content.language_codes(), vec!["ro", "en"]);
        let body = fs::read_to_string(&content.preview_path).unwrap();
        assert!(body.contains("Languages: ro, en\n"));
    }
}
