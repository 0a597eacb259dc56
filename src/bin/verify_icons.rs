use aigent_icon::icon_gen::{DEFAULT_OUTPUT_DIR, ICON_SIZES, SPARKLES};
use anyhow::{Context, Result};
use image::io::Reader as ImageReader;
use std::path::PathBuf;

fn main() -> Result<()> {
    let dir = PathBuf::from(
        std::env::args()
            .nth(1)
            .unwrap_or_else(|| DEFAULT_OUTPUT_DIR.to_string()),
    );

    println!("Checking icons in: {}", dir.display());
    let mut problems = 0;

    for size in ICON_SIZES {
        let path = dir.join(format!("icon-{size}.png"));
        let img = ImageReader::open(&path)
            .with_context(|| format!("Failed to open {}", path.display()))?
            .decode()
            .with_context(|| format!("Failed to decode {}", path.display()))?
            .to_rgb8();

        if img.dimensions() != (size, size) {
            println!(
                "⚠ icon-{size}.png is {}x{}, expected {size}x{size}",
                img.width(),
                img.height()
            );
            problems += 1;
            continue;
        }

        // sample the bubble around the centre, left of the main sparkle
        let (cx, cy) = (size * 5 / 16, size * 3 / 8);
        let centre = img.get_pixel(cx, cy);
        let white = centre.0 == [255, 255, 255];

        let missing: Vec<_> = SPARKLES
            .iter()
            .filter(|s| !s.is_visible_in(&img))
            .map(|s| s.color)
            .collect();

        if white && missing.is_empty() {
            println!("✓ icon-{size}.png");
        } else {
            if !white {
                println!("⚠ icon-{size}.png: bubble pixel ({cx}, {cy}) is {:?}", centre.0);
            }
            for color in missing {
                println!("⚠ icon-{size}.png: no pixel in sparkle color {color:?}");
            }
            problems += 1;
        }
    }

    if problems == 0 {
        println!("\nAll {} icons look right", ICON_SIZES.len());
        Ok(())
    } else {
        anyhow::bail!("{problems} icon(s) failed verification")
    }
}
