use crate::contents_json::{write_contents_json, ContentsFile};
use crate::draw::{draw_polygon, draw_rounded_rect, draw_star, Point};
use crate::gradient::create_gradient;
use anyhow::{Context, Result};
use image::{
    codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder},
    ColorType, ImageEncoder, RgbImage, Rgba,
};
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};
use tracing::debug;

/// Edge length of the design space every coordinate below is expressed in.
pub const REFERENCE_SIZE: f64 = 1024.0;

/// Pixel sizes required by the iPhone and iPad icon set.
pub const ICON_SIZES: [u32; 13] = [20, 29, 40, 58, 60, 76, 80, 87, 120, 152, 167, 180, 1024];

/// Icon set directory, relative to the project root.
pub const DEFAULT_OUTPUT_DIR: &str = "AIgent/Assets.xcassets/AppIcon.appiconset";

const BUBBLE: (f64, f64, f64, f64) = (140.0, 120.0, 920.0, 750.0);
const BUBBLE_RADIUS: f64 = 100.0;
const SHADOW_OFFSET: f64 = 8.0;
const TAIL: [(f64, f64); 3] = [(180.0, 750.0), (120.0, 900.0), (350.0, 750.0)];

const BUBBLE_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);
const SHADOW_COLOR: Rgba<u8> = Rgba([0, 0, 0, 80]);
const TAIL_SHADOW_COLOR: Rgba<u8> = Rgba([0, 0, 0, 60]);

/// A sparkle in reference-frame units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sparkle {
    pub center: (f64, f64),
    pub outer_r: f64,
    pub inner_r: f64,
    pub color: [u8; 3],
}

impl Sparkle {
    /// Inclusive pixel box the sparkle is painted within at `size`, clipped
    /// to the canvas. `None` when the box falls entirely outside.
    pub fn bounds(&self, size: u32) -> Option<(u32, u32, u32, u32)> {
        let s = Scale::new(size);
        let (cx, cy, r) = (s.px(self.center.0), s.px(self.center.1), s.px(self.outer_r));
        let max = size as i64 - 1;
        let (x1, y1) = ((cx - r).max(0), (cy - r).max(0));
        let (x2, y2) = ((cx + r).min(max), (cy + r).min(max));
        (x1 <= x2 && y1 <= y2).then_some((x1 as u32, y1 as u32, x2 as u32, y2 as u32))
    }

    /// Whether a square icon shows this sparkle's color inside its box.
    ///
    /// Searching only the box matters: the coral sparkle shares its color
    /// with the last gradient stop.
    pub fn is_visible_in(&self, img: &RgbImage) -> bool {
        let Some((x1, y1, x2, y2)) = self.bounds(img.width()) else {
            return false;
        };
        (y1..=y2).any(|y| (x1..=x2).any(|x| img.get_pixel(x, y).0 == self.color))
    }
}

/// Sparkles in paint order: main purple, cyan, coral, pink.
pub const SPARKLES: [Sparkle; 4] = [
    Sparkle {
        center: (480.0, 420.0),
        outer_r: 220.0,
        inner_r: 45.0,
        color: [147, 51, 234],
    },
    Sparkle {
        center: (720.0, 300.0),
        outer_r: 70.0,
        inner_r: 15.0,
        color: [34, 211, 238],
    },
    Sparkle {
        center: (300.0, 580.0),
        outer_r: 65.0,
        inner_r: 14.0,
        color: [251, 146, 60],
    },
    Sparkle {
        center: (750.0, 520.0),
        outer_r: 40.0,
        inner_r: 10.0,
        color: [244, 114, 182],
    },
];

// Library-side mirror of the CLI arguments
#[derive(Debug, Clone)]
pub struct Args {
    pub output: PathBuf,
    pub contents_json: bool,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_OUTPUT_DIR),
            contents_json: false,
        }
    }
}

/// Scales reference-frame values to one output size, truncating toward
/// zero the same way for every coordinate.
#[derive(Debug, Clone, Copy)]
struct Scale(f64);

impl Scale {
    fn new(size: u32) -> Self {
        Scale(size as f64 / REFERENCE_SIZE)
    }

    fn px(self, v: f64) -> i64 {
        (v * self.0) as i64
    }
}

/// Render the icon at `size`×`size` pixels.
pub fn create_icon(size: u32) -> RgbImage {
    let mut img = create_gradient(size, size);
    let s = Scale::new(size);
    debug!(size, scale = s.0, "rendering icon");

    let offset = s.px(SHADOW_OFFSET);
    let (bx1, by1, bx2, by2) = (s.px(BUBBLE.0), s.px(BUBBLE.1), s.px(BUBBLE.2), s.px(BUBBLE.3));
    let radius = s.px(BUBBLE_RADIUS);
    let tail = |shift: i64| -> Vec<Point> {
        TAIL.iter()
            .map(|&(x, y)| ((s.px(x) + shift) as f64, (s.px(y) + shift) as f64))
            .collect()
    };

    // Shadow
    draw_rounded_rect(
        &mut img,
        (bx1 + offset, by1 + offset, bx2 + offset, by2 + offset),
        radius,
        SHADOW_COLOR,
    );
    draw_polygon(&mut img, &tail(offset), TAIL_SHADOW_COLOR);

    // Bubble
    draw_rounded_rect(&mut img, (bx1, by1, bx2, by2), radius, BUBBLE_COLOR);
    draw_polygon(&mut img, &tail(0), BUBBLE_COLOR);

    for sparkle in &SPARKLES {
        let [r, g, b] = sparkle.color;
        draw_star(
            &mut img,
            (s.px(sparkle.center.0), s.px(sparkle.center.1)),
            s.px(sparkle.outer_r),
            s.px(sparkle.inner_r),
            Rgba([r, g, b, 255]),
        );
    }

    img
}

/// Render every size in [`ICON_SIZES`] into `args.output`.
///
/// The directory must already exist; the first failed write aborts the run.
pub fn generate_icons(args: Args) -> Result<()> {
    generate_sizes(&ICON_SIZES, &args.output)?;

    if args.contents_json {
        write_contents_json(&args.output, &ContentsFile::for_sizes(&ICON_SIZES))?;
        println!("Generated {}", args.output.join("Contents.json").display());
    }

    println!("\nDone! All icons generated with the new gradient design.");
    Ok(())
}

fn generate_sizes(sizes: &[u32], out_dir: &Path) -> Result<()> {
    for &size in sizes {
        let icon = create_icon(size);
        let output_path = out_dir.join(format!("icon-{size}.png"));
        save_png(&icon, &output_path)?;
        println!("Generated {}", output_path.display());
    }
    Ok(())
}

fn save_png(image: &RgbImage, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create PNG file {}", path.display()))?;
    let mut out_file = BufWriter::new(file);
    write_png(image.as_raw(), &mut out_file, image.width())
        .with_context(|| format!("Failed to write PNG {}", path.display()))?;
    out_file.flush()?;
    Ok(())
}

// Encode image data as PNG with compression
fn write_png<W: Write>(image_data: &[u8], w: W, size: u32) -> Result<()> {
    let encoder = PngEncoder::new_with_quality(w, CompressionType::Best, PngFilterType::Adaptive);
    encoder.write_image(image_data, size, size, ColorType::Rgb8)?;
    debug!(size, bytes = image_data.len(), "encoded png");
    Ok(())
}
