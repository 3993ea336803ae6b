// Content Forge Main Entry Point
// Copyright (c) 2026 Xing_The_Creator | Content Forge

use content_forge::agent::content_generator::{ContentGenerator, ContentPackage};
use content_forge::agent::templates;
use content_forge::agent::video_creator::VideoCreator;
use content_forge::config::MediaLayout;
use content_forge::media_backend;

use anyhow::Result;
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "content-forge")]
#[command(about = "Placeholder social media content and media renderer", long_about = None)]
struct Cli {
    /// Media root (defaults to $CONTENT_FORGE_ROOT, then the working directory)
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate captions, hashtags and a preview
    Generate {
        /// Topic to write about
        #[arg(short, long)]
        topic: String,

        /// Target platform (e.g., "instagram")
        #[arg(short, long)]
        platform: String,

        /// Language codes (repeatable)
        #[arg(short, long = "lang")]
        languages: Vec<String>,

        /// Also write a video script per language
        #[arg(long)]
        video: bool,

        /// Print the full package as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate content and render it to a clip or still image
    Render {
        /// Topic to write about
        #[arg(short, long)]
        topic: String,

        /// Target platform
        #[arg(short, long)]
        platform: String,

        /// Language codes (repeatable)
        #[arg(short, long = "lang")]
        languages: Vec<String>,

        /// Visual style (reserved)
        #[arg(long, default_value = "professional")]
        style: String,
    },

    /// Build a watermarked preview for an existing image or video
    Preview {
        /// Input media path
        #[arg(short, long)]
        input: PathBuf,
    },

    /// List trending seed topics
    Trending,

    /// Check optional media capabilities
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    // Global panic handler: log panics instead of crashing silently
    std::panic::set_hook(Box::new(|panic_info| {
        let location = panic_info
            .location()
            .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
            .unwrap_or_else(|| "unknown".to_string());
        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };
        eprintln!("🚨 [FORGE PANIC] at {}: {}", location, message);
    }));

    let args = Cli::parse();
    let layout = match args.root {
        Some(root) => MediaLayout::from_root(root),
        None => MediaLayout::from_env(),
    };

    info!("--- CONTENT FORGE v{} ---", env!("CARGO_PKG_VERSION"));

    match args.command {
        Commands::Generate {
            topic,
            platform,
            languages,
            video,
            json,
        } => {
            let generator = ContentGenerator::new(layout);
            let content = generator.generate_complete_content(&topic, &platform, &languages, video)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&content)?);
            } else {
                print_summary(&content);
            }
        }
        Commands::Render {
            topic,
            platform,
            languages,
            style,
        } => {
            let generator = ContentGenerator::new(layout.clone());
            let content = generator.generate_complete_content(&topic, &platform, &languages, true)?;
            print_summary(&content);

            let creator = VideoCreator::new(layout)?;
            let artifact = creator.create_from_content(&content, &languages, &style).await?;
            println!("🎬 {:?} saved: {:?}", artifact.kind, artifact.media_path);
            println!("🖼️ Preview: {:?}", artifact.preview_path);
        }
        Commands::Preview { input } => {
            let creator = VideoCreator::new(layout)?;
            let preview = creator.generate_preview(&input).await;
            println!("🖼️ Preview: {:?}", preview);
        }
        Commands::Trending => {
            for (i, topic) in templates::trending_topics().iter().enumerate() {
                println!("{:>2}. {}", i + 1, topic);
            }
        }
        Commands::Status => {
            media_backend::print_media_status();
        }
    }

    Ok(())
}

fn print_summary(content: &ContentPackage) {
    println!("📝 {} @ {} ({})", content.topic, content.platform, content.generated_at);
    for (code, entry) in &content.languages {
        println!("\n[{}] {}", code, entry.caption);
        println!("     {}", entry.hashtags.join(" "));
        if let Some(script) = &entry.script {
            for line in script.lines() {
                println!("     | {}", line);
            }
        }
    }
    let m = &content.success_metrics;
    println!(
        "\n📈 Engagement {:.1}% | Virality {:.2} | Audience {:.2}",
        m.predicted_engagement, m.virality_score, m.audience_match
    );
    println!("🖼️ Preview: {:?} ({})", content.preview_path, content.preview_url);
}
