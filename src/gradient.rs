//! Diagonal four-stop gradient used as the icon background.

use image::{Rgb, RgbImage};

/// Gradient waypoints from top to bottom: deep purple, bright purple,
/// pink/magenta, coral orange.
pub const STOPS: [[u8; 3]; 4] = [
    [88, 28, 135],
    [168, 85, 247],
    [236, 72, 153],
    [251, 146, 60],
];

/// Total horizontal skew applied across the width of a row.
const SKEW: f64 = 0.15;

/// Interpolated stop color for a fraction `t` in `[0, 1]`.
///
/// The segment index is clamped to the last pair so `t == 1.0` lands on
/// the final stop instead of reading past the table.
pub fn color_at(t: f64) -> Rgb<u8> {
    let last = STOPS.len() - 1;
    let segment = t * last as f64;
    let idx = (segment as usize).min(last - 1);
    let local_t = segment - idx as f64;

    let c1 = STOPS[idx];
    let c2 = STOPS[idx + 1];
    let channel = |i: usize| -> u8 {
        let a = c1[i] as f64;
        let b = c2[i] as f64;
        (a + (b - a) * local_t) as u8
    };

    Rgb([channel(0), channel(1), channel(2)])
}

/// Render the background at `width`×`height`.
///
/// Predominantly vertical, with each column shifting the fraction by up to
/// ±0.075 so the ramp reads as slightly diagonal.
pub fn create_gradient(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        let t = y as f64 / height as f64;
        let offset = (x as f64 / width as f64) * SKEW;
        let t2 = (t + offset - SKEW / 2.0).clamp(0.0, 1.0);
        color_at(t2)
    })
}
