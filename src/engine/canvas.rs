// Content Forge Canvas - Text Frames via SVG
// Copyright (c) 2026 Xing_The_Creator | Content Forge
//
// Frames and previews are described as a tiny SVG document (background +
// positioned text runs) and rasterized with resvg. Text is shaped against
// the system font database; a run with no matching face is simply dropped
// by the layout engine, so missing fonts never fail a render.

use anyhow::{anyhow, Context, Result};
use image::{Rgba, RgbaImage};
use resvg::usvg;
use resvg::usvg::fontdb;
use std::fmt::Write as _;
use std::sync::{Arc, OnceLock};
use tracing::{debug, info};

/// Families tried in order before the generic fallback.
const FONT_STACK: &str = "DejaVu Sans, Liberation Sans, Arial, Helvetica, Noto Sans, sans-serif";

/// Ratio of the font size between the top of the line box and the baseline.
const ASCENT_RATIO: f32 = 0.8;

static SYSTEM_FONTS: OnceLock<Arc<fontdb::Database>> = OnceLock::new();

/// Shared font database, loaded from the system on first use.
pub fn system_fonts() -> Arc<fontdb::Database> {
    SYSTEM_FONTS
        .get_or_init(|| {
            let mut db = fontdb::Database::new();
            db.load_system_fonts();
            info!("[CANVAS] Loaded {} system font faces", db.len());
            Arc::new(db)
        })
        .clone()
}

/// Horizontal anchoring of a text run relative to its `x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

impl Anchor {
    fn as_svg(self) -> &'static str {
        match self {
            Anchor::Start => "start",
            Anchor::Middle => "middle",
            Anchor::End => "end",
        }
    }
}

/// A single line of text placed on the canvas.
///
/// `y` is the top of the line, matching how callers think about layout
/// ("20px from the top"), not the SVG baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub color: Rgba<u8>,
    pub anchor: Anchor,
}

impl TextRun {
    pub fn new(text: impl Into<String>, x: f32, y: f32, size: f32, color: Rgba<u8>) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            size,
            color,
            anchor: Anchor::Start,
        }
    }

    pub fn anchored(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }
}

/// Opaque RGB shorthand for run colors.
pub fn rgb(r: u8, g: u8, b: u8) -> Rgba<u8> {
    Rgba([r, g, b, 255])
}

/// A fixed-size drawing surface made of an optional solid background and
/// a list of text runs.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: u32,
    height: u32,
    background: Option<Rgba<u8>>,
    runs: Vec<TextRun>,
}

impl Canvas {
    /// Transparent canvas.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            background: None,
            runs: Vec::new(),
        }
    }

    pub fn with_background(mut self, color: Rgba<u8>) -> Self {
        self.background = Some(color);
        self
    }

    pub fn push(&mut self, run: TextRun) -> &mut Self {
        self.runs.push(run);
        self
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Serialize the canvas to an SVG document.
    pub fn to_svg(&self) -> String {
        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = self.height
        );

        if let Some(bg) = self.background {
            let _ = write!(
                svg,
                r#"<rect x="0" y="0" width="{}" height="{}" {}/>"#,
                self.width,
                self.height,
                paint_attrs(bg)
            );
        }

        for run in &self.runs {
            let baseline = run.y + run.size * ASCENT_RATIO;
            let _ = write!(
                svg,
                r#"<text x="{:.1}" y="{:.1}" font-family="{}" font-size="{:.1}" text-anchor="{}" {}>{}</text>"#,
                run.x,
                baseline,
                FONT_STACK,
                run.size,
                run.anchor.as_svg(),
                paint_attrs(run.color),
                escape_xml(&run.text)
            );
        }

        svg.push_str("</svg>");
        svg
    }

    /// Rasterize to straight-alpha RGBA.
    pub fn rasterize(&self) -> Result<RgbaImage> {
        let svg = self.to_svg();

        let mut opt = usvg::Options::default();
        opt.fontdb = system_fonts();

        let tree = usvg::Tree::from_data(svg.as_bytes(), &opt)
            .context("Failed to parse canvas SVG")?;

        let mut pixmap = tiny_skia::Pixmap::new(self.width, self.height)
            .ok_or_else(|| anyhow!("Invalid canvas size {}x{}", self.width, self.height))?;

        resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

        debug!(
            "[CANVAS] Rasterized {}x{} with {} text runs",
            self.width,
            self.height,
            self.runs.len()
        );
        Ok(pixmap_to_image(&pixmap))
    }
}

/// Draw `runs` over an existing image, blending with alpha.
pub fn overlay_text(base: &mut RgbaImage, runs: &[TextRun]) -> Result<()> {
    let (width, height) = base.dimensions();
    let mut layer = Canvas::new(width, height);
    for run in runs {
        layer.push(run.clone());
    }
    let layer = layer.rasterize()?;
    image::imageops::overlay(base, &layer, 0, 0);
    Ok(())
}

fn paint_attrs(color: Rgba<u8>) -> String {
    let [r, g, b, a] = color.0;
    if a == 255 {
        format!(r#"fill="rgb({},{},{})""#, r, g, b)
    } else {
        format!(
            r#"fill="rgb({},{},{})" fill-opacity="{:.3}""#,
            r,
            g,
            b,
            a as f32 / 255.0
        )
    }
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

fn pixmap_to_image(pixmap: &tiny_skia::Pixmap) -> RgbaImage {
    let mut img = RgbaImage::new(pixmap.width(), pixmap.height());
    for (dst, src) in img.pixels_mut().zip(pixmap.pixels()) {
        let c = src.demultiply();
        *dst = Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
    }
    img
}
