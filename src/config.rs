// Content Forge Media Layout
// Copyright (c) 2026 Xing_The_Creator | Content Forge
//
// Where generated frames, clips and previews land on disk. Everything is
// resolved against a single root so a whole run can be redirected.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable selecting the media root.
pub const ROOT_ENV: &str = "CONTENT_FORGE_ROOT";

const ASSETS_DIR: &str = "assets";
const OUTPUT_DIR: &str = "uploads/videos";
const PREVIEW_DIR: &str = "static/previews";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaLayout {
    pub root: PathBuf,
    /// Scratch frames (`temp_frame.jpg`).
    pub assets_dir: PathBuf,
    /// Final clips and stills.
    pub output_dir: PathBuf,
    /// Previews, watermarked copies and the fallback placeholder.
    pub preview_dir: PathBuf,
}

impl MediaLayout {
    pub fn from_root(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref().to_path_buf();
        Self {
            assets_dir: root.join(ASSETS_DIR),
            output_dir: root.join(OUTPUT_DIR),
            preview_dir: root.join(PREVIEW_DIR),
            root,
        }
    }

    /// Resolve the root from `CONTENT_FORGE_ROOT`, defaulting to the
    /// working directory. Call `dotenv().ok()` first to honour `.env`.
    pub fn from_env() -> Self {
        let root = std::env::var(ROOT_ENV).unwrap_or_else(|_| ".".to_string());
        Self::from_root(root)
    }

    /// Create all three directories if they are missing.
    pub fn ensure_dirs(&self) -> Result<()> {
        for dir in [&self.assets_dir, &self.output_dir, &self.preview_dir] {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create directory {:?}", dir))?;
        }
        debug!("[CONFIG] Media layout ready under {:?}", self.root);
        Ok(())
    }
}

impl Default for MediaLayout {
    fn default() -> Self {
        Self::from_root(".")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_joins_root() {
        let layout = MediaLayout::from_root("/srv/media");
        assert_eq!(layout.assets_dir, PathBuf::from("/srv/media/assets"));
        assert_eq!(layout.output_dir, PathBuf::from("/srv/media/uploads/videos"));
        assert_eq!(layout.preview_dir, PathBuf::from("/srv/media/static/previews"));
    }

    #[test]
    fn test_ensure_dirs_creates_tree() {
        let tmp = tempfile::tempdir().unwrap();
        let layout = MediaLayout::from_root(tmp.path());
        layout.ensure_dirs().unwrap();
        assert!(layout.assets_dir.is_dir());
        assert!(layout.output_dir.is_dir());
        assert!(layout.preview_dir.is_dir());

        // Idempotent
        layout.ensure_dirs().unwrap();
    }
}
