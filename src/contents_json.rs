//! Contents.json data model for an Xcode `AppIcon.appiconset`
//!
//! The icon set references each rendered `icon-<N>.png` from one or more
//! slots. A slot is an (idiom, point size, scale) triple; Xcode picks the
//! file whose pixel size equals `points × scale`.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

/// Root structure of a Contents.json file
#[derive(Serialize, Debug, Clone)]
pub struct ContentsFile {
    pub images: Vec<ImageEntry>,
    pub info: Info,
}

/// One slot of the icon set
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ImageEntry {
    pub filename: String,

    /// Device family (e.g. "iphone", "ipad", "ios-marketing")
    pub idiom: String,

    /// Scale factor (e.g. "1x", "2x", "3x")
    pub scale: String,

    /// Size in points (e.g. "29x29", "83.5x83.5")
    pub size: String,
}

/// Versioning and authorship information for the asset catalog
#[derive(Serialize, Debug, Clone)]
pub struct Info {
    /// The format version of the asset catalog (always 1)
    pub version: u8,

    /// The tool that authored the catalog
    pub author: String,
}

impl Default for Info {
    fn default() -> Self {
        Self {
            version: 1,
            author: "xcode".to_string(),
        }
    }
}

/// (idiom, points, scale) for every slot of an iPhone + iPad icon set.
const SLOTS: &[(&str, &str, u32)] = &[
    ("iphone", "20", 2),
    ("iphone", "20", 3),
    ("iphone", "29", 2),
    ("iphone", "29", 3),
    ("iphone", "40", 2),
    ("iphone", "40", 3),
    ("iphone", "60", 2),
    ("iphone", "60", 3),
    ("ipad", "20", 1),
    ("ipad", "20", 2),
    ("ipad", "29", 1),
    ("ipad", "29", 2),
    ("ipad", "40", 1),
    ("ipad", "40", 2),
    ("ipad", "76", 1),
    ("ipad", "76", 2),
    ("ipad", "83.5", 2),
    ("ios-marketing", "1024", 1),
];

impl ContentsFile {
    pub fn new() -> Self {
        Self {
            images: Vec::new(),
            info: Info::default(),
        }
    }

    /// Build the icon set manifest for the rendered pixel sizes.
    ///
    /// Every slot whose pixel size is among `sizes` points at
    /// `icon-<pixels>.png`; slots with no matching file are left out.
    pub fn for_sizes(sizes: &[u32]) -> Self {
        let mut contents = Self::new();
        for &(idiom, points, scale) in SLOTS {
            let pixels = slot_pixels(points, scale);
            if sizes.contains(&pixels) {
                contents.images.push(ImageEntry {
                    filename: format!("icon-{pixels}.png"),
                    idiom: idiom.to_string(),
                    scale: format!("{scale}x"),
                    size: format!("{points}x{points}"),
                });
            }
        }
        contents
    }
}

impl Default for ContentsFile {
    fn default() -> Self {
        Self::new()
    }
}

/// Pixel edge length of a slot; 83.5pt at 2x is 167px.
fn slot_pixels(points: &str, scale: u32) -> u32 {
    let points: f64 = points.parse().unwrap_or(0.0);
    (points * scale as f64) as u32
}

/// Writes Contents.json into the icon set directory
pub fn write_contents_json(dir: &Path, contents: &ContentsFile) -> Result<()> {
    let json =
        serde_json::to_string_pretty(contents).context("Failed to serialize Contents.json")?;
    std::fs::write(dir.join("Contents.json"), json).context("Failed to write Contents.json")
}
