//! Filled-shape rasterization onto an RGB canvas.
//!
//! Shapes are first rasterized into a [`Mask`] and then composited in a
//! single pass, so a shape made of overlapping primitives (the rounded
//! rectangle is two rectangles and four pie slices) blends a translucent
//! fill exactly once per pixel. Pixels sample at integer coordinates and
//! all bounding boxes are inclusive on both ends.

use image::{Rgb, RgbImage, Rgba};

/// A point in pixel space.
pub type Point = (f64, f64);

/// Boolean coverage grid matching a canvas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    covered: Vec<bool>,
}

impl Mask {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            covered: vec![false; width as usize * height as usize],
        }
    }

    /// Whether the pixel at `(x, y)` is covered. Out-of-bounds is uncovered.
    pub fn contains(&self, x: i64, y: i64) -> bool {
        self.index(x, y).map_or(false, |i| self.covered[i])
    }

    /// Number of covered pixels.
    pub fn count(&self) -> usize {
        self.covered.iter().filter(|&&c| c).count()
    }

    fn index(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    fn set(&mut self, x: i64, y: i64) {
        if let Some(i) = self.index(x, y) {
            self.covered[i] = true;
        }
    }

    /// Clamp an inclusive span to the mask, returning `None` when empty.
    fn clip(lo: i64, hi: i64, len: u32) -> Option<(i64, i64)> {
        let lo = lo.max(0);
        let hi = hi.min(len as i64 - 1);
        (lo <= hi).then_some((lo, hi))
    }

    /// Cover the inclusive rectangle `(x1, y1)`–`(x2, y2)`.
    pub fn fill_rect(&mut self, x1: i64, y1: i64, x2: i64, y2: i64) {
        let (Some((x1, x2)), Some((y1, y2))) = (
            Self::clip(x1, x2, self.width),
            Self::clip(y1, y2, self.height),
        ) else {
            return;
        };
        for y in y1..=y2 {
            for x in x1..=x2 {
                self.set(x, y);
            }
        }
    }

    /// Cover the slice of the ellipse inscribed in the inclusive box
    /// `(x1, y1)`–`(x2, y2)` between `start` and `end` degrees, measured
    /// clockwise from the positive x axis.
    pub fn fill_pieslice(&mut self, x1: i64, y1: i64, x2: i64, y2: i64, start: f64, end: f64) {
        let cx = (x1 + x2) as f64 / 2.0;
        let cy = (y1 + y2) as f64 / 2.0;
        let rx = (x2 - x1) as f64 / 2.0;
        let ry = (y2 - y1) as f64 / 2.0;
        if rx < 0.0 || ry < 0.0 {
            return;
        }

        let (Some((bx1, bx2)), Some((by1, by2))) = (
            Self::clip(x1, x2, self.width),
            Self::clip(y1, y2, self.height),
        ) else {
            return;
        };

        for y in by1..=by2 {
            for x in bx1..=bx2 {
                let dx = x as f64 - cx;
                let dy = y as f64 - cy;
                let inside = if rx == 0.0 || ry == 0.0 {
                    // degenerate box: a single row or column
                    true
                } else {
                    // multiplied out so integer boundary points compare exactly
                    dx * dx * ry * ry + dy * dy * rx * rx <= rx * rx * ry * ry
                };
                if inside && angle_in_range(dy.atan2(dx).to_degrees(), start, end) {
                    self.set(x, y);
                }
            }
        }
    }

    /// Cover a closed polygon: its interior by scanline with a half-open
    /// rule on y, plus its outline so zero-area polygons still mark pixels.
    pub fn fill_polygon(&mut self, points: &[Point]) {
        if points.is_empty() {
            return;
        }

        let min_y = points.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
        let max_y = points.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);
        let edges: Vec<(Point, Point)> = points
            .iter()
            .zip(points.iter().cycle().skip(1))
            .map(|(&a, &b)| (a, b))
            .collect();

        let mut crossings = Vec::new();
        for y in (min_y.ceil() as i64)..=(max_y.floor() as i64) {
            let fy = y as f64;
            crossings.clear();
            for &((ax, ay), (bx, by)) in &edges {
                if (ay <= fy && fy < by) || (by <= fy && fy < ay) {
                    crossings.push(ax + (fy - ay) * (bx - ax) / (by - ay));
                }
            }
            crossings.sort_by(f64::total_cmp);
            for pair in crossings.chunks_exact(2) {
                let (lo, hi) = (pair[0].ceil() as i64, pair[1].floor() as i64);
                for x in lo..=hi {
                    self.set(x, y);
                }
            }
        }

        for &(a, b) in &edges {
            self.line(a, b);
        }
    }

    /// Cover the pixels along a segment between rounded endpoints.
    fn line(&mut self, a: Point, b: Point) {
        let (x0, y0) = (a.0.round() as i64, a.1.round() as i64);
        let (x1, y1) = (b.0.round() as i64, b.1.round() as i64);
        let steps = (x1 - x0).abs().max((y1 - y0).abs());
        if steps == 0 {
            self.set(x0, y0);
            return;
        }
        for i in 0..=steps {
            let f = i as f64 / steps as f64;
            let x = x0 as f64 + (x1 - x0) as f64 * f;
            let y = y0 as f64 + (y1 - y0) as f64 * f;
            self.set(x.round() as i64, y.round() as i64);
        }
    }
}

/// Whether `angle` (any range, degrees) falls within `[start, end]`.
fn angle_in_range(angle: f64, start: f64, end: f64) -> bool {
    let a = angle.rem_euclid(360.0);
    (start <= a && a <= end) || (start <= a + 360.0 && a + 360.0 <= end)
}

/// Composite `color` onto every covered pixel, using its alpha channel as
/// coverage opacity. Alpha 255 replaces the pixel outright.
pub fn fill_mask(canvas: &mut RgbImage, mask: &Mask, color: Rgba<u8>) {
    let alpha = color[3] as u32;
    for (x, y, pixel) in canvas.enumerate_pixels_mut() {
        if !mask.contains(x as i64, y as i64) {
            continue;
        }
        *pixel = if alpha == 255 {
            Rgb([color[0], color[1], color[2]])
        } else {
            blend(*pixel, color)
        };
    }
}

fn blend(dst: Rgb<u8>, src: Rgba<u8>) -> Rgb<u8> {
    let a = src[3] as u32;
    let mix = |d: u8, s: u8| ((s as u32 * a + d as u32 * (255 - a) + 127) / 255) as u8;
    Rgb([mix(dst[0], src[0]), mix(dst[1], src[1]), mix(dst[2], src[2])])
}

/// Draw a filled rectangle with quarter-circle corners of `radius`.
///
/// Built as the union of a vertical and a horizontal body rectangle and one
/// 90° pie slice per corner.
pub fn draw_rounded_rect(
    canvas: &mut RgbImage,
    bbox: (i64, i64, i64, i64),
    radius: i64,
    color: Rgba<u8>,
) {
    let mask = rounded_rect_mask(canvas.width(), canvas.height(), bbox, radius);
    fill_mask(canvas, &mask, color);
}

pub fn rounded_rect_mask(width: u32, height: u32, bbox: (i64, i64, i64, i64), radius: i64) -> Mask {
    let (x1, y1, x2, y2) = bbox;
    let r = radius;
    let d = radius * 2;

    let mut mask = Mask::new(width, height);
    mask.fill_rect(x1 + r, y1, x2 - r, y2);
    mask.fill_rect(x1, y1 + r, x2, y2 - r);

    mask.fill_pieslice(x1, y1, x1 + d, y1 + d, 180.0, 270.0);
    mask.fill_pieslice(x2 - d, y1, x2, y1 + d, 270.0, 360.0);
    mask.fill_pieslice(x1, y2 - d, x1 + d, y2, 90.0, 180.0);
    mask.fill_pieslice(x2 - d, y2 - d, x2, y2, 0.0, 90.0);
    mask
}

/// Draw a filled polygon.
pub fn draw_polygon(canvas: &mut RgbImage, points: &[Point], color: Rgba<u8>) {
    let mut mask = Mask::new(canvas.width(), canvas.height());
    mask.fill_polygon(points);
    fill_mask(canvas, &mask, color);
}

/// The 8 vertices of a 4-pointed sparkle, starting straight up and
/// alternating between `outer_r` and `inner_r` every 45°.
pub fn star_vertices(cx: f64, cy: f64, outer_r: f64, inner_r: f64) -> [Point; 8] {
    std::array::from_fn(|i| {
        let angle = (i as f64 * 45.0 - 90.0).to_radians();
        let r = if i % 2 == 0 { outer_r } else { inner_r };
        (cx + r * angle.cos(), cy + r * angle.sin())
    })
}

/// Draw a filled 4-pointed sparkle.
pub fn draw_star(
    canvas: &mut RgbImage,
    center: (i64, i64),
    outer_r: i64,
    inner_r: i64,
    color: Rgba<u8>,
) {
    let points = star_vertices(
        center.0 as f64,
        center.1 as f64,
        outer_r as f64,
        inner_r as f64,
    );
    draw_polygon(canvas, &points, color);
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
    const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

    fn blank(size: u32) -> RgbImage {
        RgbImage::from_pixel(size, size, BLACK)
    }

    #[test]
    fn test_fill_rect_is_inclusive_and_clipped() {
        let mut mask = Mask::new(10, 10);
        mask.fill_rect(2, 3, 4, 5);
        assert_eq!(mask.count(), 9);
        assert!(mask.contains(4, 5));
        assert!(!mask.contains(5, 5));

        let mut mask = Mask::new(10, 10);
        mask.fill_rect(-5, -5, 20, 1);
        assert_eq!(mask.count(), 20);
    }

    #[test]
    fn test_fill_rect_empty_when_inverted() {
        let mut mask = Mask::new(10, 10);
        mask.fill_rect(5, 5, 4, 4);
        assert_eq!(mask.count(), 0);
    }

    #[test]
    fn test_pieslice_covers_only_its_quadrant() {
        let mut mask = Mask::new(21, 21);
        // top-left quadrant of a radius-10 circle centred at (10, 10)
        mask.fill_pieslice(0, 0, 20, 20, 180.0, 270.0);
        assert!(mask.contains(5, 5));
        assert!(mask.contains(0, 10));
        assert!(mask.contains(10, 0));
        assert!(!mask.contains(15, 5));
        assert!(!mask.contains(5, 15));
        assert!(!mask.contains(15, 15));
        // outside the arc
        assert!(!mask.contains(1, 1));
    }

    #[test]
    fn test_pieslice_wraps_at_full_turn() {
        let mut mask = Mask::new(21, 21);
        mask.fill_pieslice(0, 0, 20, 20, 270.0, 360.0);
        // angle 0 on the positive x axis belongs to the 270..360 slice
        assert!(mask.contains(20, 10));
        assert!(mask.contains(15, 5));
        assert!(!mask.contains(5, 5));
    }

    #[test]
    fn test_angle_in_range() {
        assert!(angle_in_range(-90.0, 180.0, 270.0));
        assert!(angle_in_range(0.0, 270.0, 360.0));
        assert!(angle_in_range(90.0, 0.0, 90.0));
        assert!(!angle_in_range(45.0, 90.0, 180.0));
    }

    #[test]
    fn test_rounded_rect_body_is_filled() {
        let (x1, y1, x2, y2, r) = (10, 12, 80, 60, 15);
        let mask = rounded_rect_mask(100, 100, (x1, y1, x2, y2), r);

        for y in y1..=y2 {
            for x in (x1 + r)..=(x2 - r) {
                assert!(mask.contains(x, y), "vertical body missing ({x}, {y})");
            }
        }
        for y in (y1 + r)..=(y2 - r) {
            for x in x1..=x2 {
                assert!(mask.contains(x, y), "horizontal body missing ({x}, {y})");
            }
        }
        assert!(!mask.contains(x1 - 1, y1 + r));
        assert!(!mask.contains(x2 + 1, y2 - r));
    }

    #[test]
    fn test_rounded_rect_corners_follow_quarter_circle() {
        let (x1, y1, x2, y2, r) = (10, 12, 80, 60, 15);
        let mask = rounded_rect_mask(100, 100, (x1, y1, x2, y2), r);

        let corners = [
            ((x1, y1), (x1 + r, y1 + r)),
            ((x2 - r + 1, y1), (x2 - r, y1 + r)),
            ((x1, y2 - r + 1), (x1 + r, y2 - r)),
            ((x2 - r + 1, y2 - r + 1), (x2 - r, y2 - r)),
        ];
        for ((sx, sy), (cx, cy)) in corners {
            for y in sy..sy + r {
                for x in sx..sx + r {
                    let d2 = (x - cx).pow(2) + (y - cy).pow(2);
                    assert_eq!(
                        mask.contains(x, y),
                        d2 <= r * r,
                        "corner pixel ({x}, {y}) around ({cx}, {cy})"
                    );
                }
            }
        }
    }

    #[test]
    fn test_rounded_rect_with_zero_radius_is_a_rectangle() {
        let mask = rounded_rect_mask(20, 20, (2, 2, 9, 9), 0);
        assert_eq!(mask.count(), 64);
    }

    #[test]
    fn test_translucent_fill_blends_once() {
        let mut canvas = RgbImage::from_pixel(40, 40, Rgb([200, 200, 200]));
        draw_rounded_rect(&mut canvas, (5, 5, 34, 34), 8, Rgba([0, 0, 0, 80]));

        // the two body rectangles overlap in the middle; it must match the edges
        let centre = *canvas.get_pixel(20, 20);
        let edge = *canvas.get_pixel(20, 5);
        assert_eq!(centre, edge);
        assert_eq!(centre, Rgb([137, 137, 137]));
        assert_eq!(*canvas.get_pixel(0, 0), Rgb([200, 200, 200]));
    }

    #[test]
    fn test_opaque_fill_replaces_pixels() {
        let mut canvas = blank(10);
        let mut mask = Mask::new(10, 10);
        mask.fill_rect(0, 0, 1, 1);
        fill_mask(&mut canvas, &mask, Rgba([1, 2, 3, 255]));
        assert_eq!(*canvas.get_pixel(1, 1), Rgb([1, 2, 3]));
        assert_eq!(*canvas.get_pixel(2, 2), BLACK);
    }

    #[test]
    fn test_polygon_triangle_fill() {
        let mut mask = Mask::new(20, 20);
        mask.fill_polygon(&[(2.0, 2.0), (2.0, 12.0), (12.0, 2.0)]);
        assert!(mask.contains(3, 3));
        assert!(mask.contains(2, 12));
        assert!(!mask.contains(10, 10));
        assert!(!mask.contains(15, 15));
    }

    #[test]
    fn test_degenerate_polygon_marks_a_pixel() {
        let mut mask = Mask::new(10, 10);
        mask.fill_polygon(&[(4.0, 4.0); 8]);
        assert_eq!(mask.count(), 1);
        assert!(mask.contains(4, 4));
    }

    #[test]
    fn test_star_vertex_angles_use_degree_conversion() {
        let points = star_vertices(100.0, 100.0, 64.0, 13.0);
        for (i, &(x, y)) in points.iter().enumerate() {
            let angle = (i as f64 * 45.0 - 90.0).to_radians();
            let r = if i % 2 == 0 { 64.0 } else { 13.0 };
            assert_eq!(x.to_bits(), (100.0 + r * angle.cos()).to_bits(), "vertex {i} x");
            assert_eq!(y.to_bits(), (100.0 + r * angle.sin()).to_bits(), "vertex {i} y");
        }
        // conversion multiplies by a precomputed PI / 180
        assert_eq!((-45.0f64).to_radians(), -45.0 * (std::f64::consts::PI / 180.0));
    }

    #[test]
    fn test_star_vertices_alternate_radii() {
        let (cx, cy) = (50.0, 40.0);
        let points = star_vertices(cx, cy, 30.0, 8.0);
        assert_eq!(points.len(), 8);

        for (i, &(x, y)) in points.iter().enumerate() {
            let dist = ((x - cx).powi(2) + (y - cy).powi(2)).sqrt();
            let expected = if i % 2 == 0 { 30.0 } else { 8.0 };
            assert!((dist - expected).abs() < 1e-9, "vertex {i} at distance {dist}");

            let angle = (y - cy).atan2(x - cx).to_degrees();
            let expected_angle = i as f64 * 45.0 - 90.0;
            let diff = (angle - expected_angle).rem_euclid(360.0);
            assert!(diff < 1e-6 || diff > 360.0 - 1e-6, "vertex {i} at angle {angle}");
        }

        // first point straight up
        assert!((points[0].0 - cx).abs() < 1e-9);
        assert!((points[0].1 - (cy - 30.0)).abs() < 1e-9);
    }

    #[test]
    fn test_draw_star_fills_center_and_tips() {
        let mut canvas = blank(64);
        let purple = Rgba([147, 51, 234, 255]);
        draw_star(&mut canvas, (32, 32), 24, 6, purple);

        let expected = Rgb([147, 51, 234]);
        assert_eq!(*canvas.get_pixel(32, 32), expected);
        assert_eq!(*canvas.get_pixel(32, 8), expected);
        assert_eq!(*canvas.get_pixel(56, 32), expected);
        assert_eq!(*canvas.get_pixel(32, 56), expected);
        assert_eq!(*canvas.get_pixel(8, 32), expected);
        // concave region between the points stays untouched
        assert_eq!(*canvas.get_pixel(48, 16), BLACK);
    }

    #[test]
    fn test_draw_polygon_with_white() {
        let mut canvas = blank(16);
        draw_polygon(&mut canvas, &[(1.0, 1.0), (14.0, 1.0), (14.0, 14.0), (1.0, 14.0)], WHITE);
        assert_eq!(*canvas.get_pixel(7, 7), Rgb([255, 255, 255]));
        assert_eq!(*canvas.get_pixel(0, 0), BLACK);
    }
}
