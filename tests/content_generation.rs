use content_forge::agent::content_generator::{ContentGenerator, MAX_HASHTAGS};
use content_forge::config::MediaLayout;
use content_forge::media_backend::{MediaCapabilities, TextRenderer, VideoAssembler};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn text_only_generator(root: &std::path::Path) -> ContentGenerator {
    ContentGenerator::with_capabilities(MediaLayout::from_root(root), MediaCapabilities::none())
}

#[test]
fn test_every_language_has_caption_and_hashtags() {
    let tmp = tempfile::tempdir().unwrap();
    let generator = text_only_generator(tmp.path());

    let content = generator
        .generate_complete_content("Content automation", "instagram", &["ro", "en", "de"], false)
        .unwrap();

    assert_eq!(content.languages.len(), 3);
    for code in ["ro", "en", "de"] {
        let entry = content.languages.get(code).expect("missing language entry");
        assert!(!entry.caption.is_empty());
        assert!(!entry.hashtags.is_empty());
        assert!(entry.hashtags.len() <= MAX_HASHTAGS);
    }
}

#[test]
fn test_hashtag_cap_holds_for_long_topics() {
    let tmp = tempfile::tempdir().unwrap();
    let generator = text_only_generator(tmp.path());

    let topics = [
        "",
        "AI",
        "Social media algorithms explained for absolute beginners everywhere",
        "growing followers organically without paid advertising campaigns",
    ];
    for topic in topics {
        let content = generator
            .generate_complete_content(topic, "tiktok", &["en", "ro"], false)
            .unwrap();
        for entry in content.languages.values() {
            assert!(entry.hashtags.len() <= MAX_HASHTAGS, "too many tags for '{}'", topic);
        }
    }
}

#[test]
fn test_unknown_language_matches_english() {
    let tmp = tempfile::tempdir().unwrap();
    let generator = text_only_generator(tmp.path());

    let english = generator
        .generate_complete_content_with_rng(
            "Personal branding",
            "linkedin",
            &["en"],
            true,
            &mut StdRng::seed_from_u64(99),
        )
        .unwrap();
    let unknown = generator
        .generate_complete_content_with_rng(
            "Personal branding",
            "linkedin",
            &["xx"],
            true,
            &mut StdRng::seed_from_u64(99),
        )
        .unwrap();

    assert_eq!(english.languages["en"], unknown.languages["xx"]);
    assert_eq!(english.success_metrics, unknown.success_metrics);
}

#[test]
fn test_script_only_when_video_required() {
    let tmp = tempfile::tempdir().unwrap();
    let generator = text_only_generator(tmp.path());

    let without = generator
        .generate_complete_content("Video content tips", "youtube", &["ro", "en"], false)
        .unwrap();
    assert!(without.languages.values().all(|l| l.script.is_none()));

    let with = generator
        .generate_complete_content("Video content tips", "youtube", &["ro", "en"], true)
        .unwrap();
    let ro_script = with.languages["ro"].script.as_deref().unwrap();
    let en_script = with.languages["en"].script.as_deref().unwrap();
    assert!(ro_script.contains("Video content tips"));
    assert!(en_script.starts_with("Hello! Today we're talking about Video content tips."));
}

#[test]
fn test_default_language_is_romanian() {
    let tmp = tempfile::tempdir().unwrap();
    let generator = text_only_generator(tmp.path());

    let none: [&str; 0] = [];
    let content = generator
        .generate_complete_content("Digital marketing", "facebook", &none, false)
        .unwrap();
    assert_eq!(content.language_codes(), vec!["ro"]);
    assert!(content.languages["ro"].hashtags.contains(&"#romania".to_string()));
}

#[test]
fn test_text_preview_lists_fields() {
    let tmp = tempfile::tempdir().unwrap();
    let generator = text_only_generator(tmp.path());

    let content = generator
        .generate_complete_content("Best time to post", "twitter", &["en", "ro"], false)
        .unwrap();

    let name = content.preview_path.file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("simple_preview_") && name.ends_with(".txt"));
    assert!(content.preview_path.starts_with(tmp.path().join("static/previews")));
    assert_eq!(content.preview_url, format!("/preview/{}", name));

    let body = std::fs::read_to_string(&content.preview_path).unwrap();
    assert!(body.contains("Best time to post"));
    assert!(body.contains("twitter"));
    assert!(body.contains("en"));
    assert!(body.contains("ro"));
    assert!(body.contains(&content.generated_at));
}

#[test]
fn test_image_preview_card() {
    let tmp = tempfile::tempdir().unwrap();
    // Forced on: text runs without a matching font are dropped, the card is still written
    let caps = MediaCapabilities::new(TextRenderer::SystemFonts { faces: 1 }, VideoAssembler::Unavailable);
    let generator = ContentGenerator::with_capabilities(MediaLayout::from_root(tmp.path()), caps);

    let content = generator
        .generate_complete_content("Growing followers", "instagram", &["en"], false)
        .unwrap();

    assert_eq!(content.preview_path.extension().unwrap(), "png");
    let img = image::open(&content.preview_path).unwrap();
    assert_eq!((img.width(), img.height()), (800, 400));
    assert_eq!(img.to_rgb8().get_pixel(799, 399).0, [0x2c, 0x3e, 0x50]);
}

#[test]
fn test_package_serializes() {
    let tmp = tempfile::tempdir().unwrap();
    let generator = text_only_generator(tmp.path());

    let content = generator
        .generate_complete_content("Content strategy", "instagram", &["en"], false)
        .unwrap();
    let json = serde_json::to_value(&content).unwrap();

    assert_eq!(json["topic"], "Content strategy");
    assert!(json["languages"]["en"]["script"].is_null());
    assert!(json["success_metrics"]["virality_score"].is_number());
}
