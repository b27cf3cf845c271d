//! Triangle geometry and Bresenham line drawing.

use embedded_graphics::{
    draw_target::DrawTarget,
    geometry::Point,
    pixelcolor::{Rgb888, RgbColor},
    Pixel,
};

/// sqrt(3) / 2
const HALF_SQRT_3: f32 = 0.866_025_4;

/// Edge colours: v1->v2, v2->v3, v3->v1
pub const EDGE_COLORS: [Rgb888; 3] = [Rgb888::RED, Rgb888::GREEN, Rgb888::BLUE];

/// A vertex in screen space, before snapping to pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub x: f32,
    pub y: f32,
}

impl Vertex {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Vertex) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Truncates toward zero; saturates at the i32 range.
    pub fn to_pixel(self) -> Point {
        Point::new(self.x as i32, self.y as i32)
    }
}

/// Where the triangle is and how it is turned
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrianglePose {
    pub center: Vertex,
    /// Radians, clockwise on screen (y grows downwards)
    pub angle: f32,
    /// Distance from center to each vertex
    pub size: f32,
}

impl TrianglePose {
    /// Vertices of the pose, rotated and translated.
    pub fn vertices(&self) -> [Vertex; 3] {
        let s = self.size;
        let local = [
            Vertex::new(0.0, -s),
            Vertex::new(-s * HALF_SQRT_3, s / 2.0),
            Vertex::new(s * HALF_SQRT_3, s / 2.0),
        ];

        let (sin_a, cos_a) = self.angle.sin_cos();
        local.map(|v| {
            Vertex::new(
                self.center.x + v.x * cos_a - v.y * sin_a,
                self.center.y + v.x * sin_a + v.y * cos_a,
            )
        })
    }

    /// Vertices snapped to pixel coordinates.
    pub fn pixel_vertices(&self) -> [Point; 3] {
        self.vertices().map(Vertex::to_pixel)
    }
}

/// Integer Bresenham walk from `start` to `end`, both inclusive.
#[derive(Debug, Clone)]
pub struct Line {
    x: i32,
    y: i32,
    end: Point,
    dx: i64,
    dy: i64,
    sx: i32,
    sy: i32,
    err: i64,
    done: bool,
}

impl Line {
    pub fn new(start: Point, end: Point) -> Self {
        let dx = (i64::from(end.x) - i64::from(start.x)).abs();
        let dy = (i64::from(end.y) - i64::from(start.y)).abs();
        Self {
            x: start.x,
            y: start.y,
            end,
            dx,
            dy,
            sx: if start.x < end.x { 1 } else { -1 },
            sy: if start.y < end.y { 1 } else { -1 },
            err: dx - dy,
            done: false,
        }
    }
}

impl Iterator for Line {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.done {
            return None;
        }

        let current = Point::new(self.x, self.y);
        if self.x == self.end.x && self.y == self.end.y {
            self.done = true;
            return Some(current);
        }

        let e2 = 2 * self.err;
        if e2 > -self.dy {
            self.err -= self.dy;
            self.x += self.sx;
        }
        if e2 < self.dx {
            self.err += self.dx;
            self.y += self.sy;
        }

        Some(current)
    }
}

/// Draw a one-pixel line.
pub fn draw_line<D>(target: &mut D, start: Point, end: Point, color: Rgb888) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    target.draw_iter(Line::new(start, end).map(|p| Pixel(p, color)))
}

/// Draw the triangle outline for `pose`, one colour per edge.
pub fn draw_triangle<D>(target: &mut D, pose: &TrianglePose) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    let v = pose.pixel_vertices();
    for (i, color) in EDGE_COLORS.iter().enumerate() {
        draw_line(target, v[i], v[(i + 1) % 3], *color)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::canvas::{encode_xrgb, Canvas};
    use std::collections::HashSet;

    fn pose(cx: f32, cy: f32, angle: f32, size: f32) -> TrianglePose {
        TrianglePose {
            center: Vertex::new(cx, cy),
            angle,
            size,
        }
    }

    #[test]
    fn test_vertices_at_angle_zero() {
        let v = pose(0.0, 0.0, 0.0, 100.0).pixel_vertices();
        assert_eq!(v[0], Point::new(0, -100));
        assert_eq!(v[1], Point::new(-86, 50));
        assert_eq!(v[2], Point::new(86, 50));
    }

    #[test]
    fn test_vertices_equidistant_from_center() {
        let centers = [(0.0, 0.0), (640.0, 360.0), (-25.5, 1000.25)];
        let angles = [0.0, 0.3, 1.0, std::f32::consts::PI, 5.9, -2.2];
        let sizes = [1.0, 50.0, 200.0, 300.0];

        for &(cx, cy) in &centers {
            for &angle in &angles {
                for &size in &sizes {
                    let p = pose(cx, cy, angle, size);
                    for v in p.vertices() {
                        let d = v.distance(p.center);
                        assert!(
                            (d - size).abs() <= size * 1e-4 + 1e-3,
                            "distance {} != size {} (angle {})",
                            d,
                            size,
                            angle
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_rotation_preserves_side_lengths() {
        let upright = pose(0.0, 0.0, 0.0, 120.0).vertices();
        let turned = pose(10.0, 20.0, 2.5, 120.0).vertices();
        for i in 0..3 {
            let a = upright[i].distance(upright[(i + 1) % 3]);
            let b = turned[i].distance(turned[(i + 1) % 3]);
            assert!((a - b).abs() < 1e-2);
        }
    }

    #[test]
    fn test_half_turn_flips_apex() {
        let v = pose(0.0, 0.0, std::f32::consts::PI, 100.0).vertices();
        assert!((v[0].x).abs() < 1e-3);
        assert!((v[0].y - 100.0).abs() < 1e-3);
    }

    fn assert_connected(points: &[Point]) {
        for pair in points.windows(2) {
            let step = pair[1] - pair[0];
            assert!(step.x.abs() <= 1 && step.y.abs() <= 1, "gap between {:?}", pair);
            assert_ne!(step, Point::zero(), "repeated point {:?}", pair[0]);
        }
    }

    #[test]
    fn test_line_visits_endpoints_and_is_connected() {
        let cases = [
            (Point::new(0, 0), Point::new(10, 3)),
            (Point::new(10, 3), Point::new(0, 0)),
            (Point::new(-5, 7), Point::new(4, -9)),
            (Point::new(3, 3), Point::new(3, 20)),
            (Point::new(20, 3), Point::new(-20, 3)),
            (Point::new(0, 0), Point::new(7, 7)),
            (Point::new(0, 0), Point::new(1, 100)),
        ];

        for (start, end) in cases {
            let points: Vec<Point> = Line::new(start, end).collect();
            assert_eq!(points.first(), Some(&start));
            assert_eq!(points.last(), Some(&end));
            assert_connected(&points);

            let dx = (end.x - start.x).unsigned_abs() as usize;
            let dy = (end.y - start.y).unsigned_abs() as usize;
            assert_eq!(points.len(), dx.max(dy) + 1);
        }
    }

    #[test]
    fn test_degenerate_line_is_single_point() {
        let points: Vec<Point> = Line::new(Point::new(4, 4), Point::new(4, 4)).collect();
        assert_eq!(points, vec![Point::new(4, 4)]);
    }

    #[test]
    fn test_line_through_offscreen_region_does_not_panic() {
        let mut bytes = vec![0u8; 16 * 4 * 16];
        let mut canvas = Canvas::new(&mut bytes, 16, 16, 64).unwrap();
        draw_line(&mut canvas, Point::new(-40, -40), Point::new(40, 40), Rgb888::RED).unwrap();

        for i in 0..16 {
            assert_eq!(canvas.pixel(i, i), Some(encode_xrgb(Rgb888::RED)));
        }
    }

    #[test]
    fn test_triangle_only_touches_edge_pixels() {
        let (w, h) = (64u32, 48u32);
        let mut bytes = vec![0u8; (w * 4 * h) as usize];
        let mut canvas = Canvas::new(&mut bytes, w, h, w * 4).unwrap();

        let p = pose(32.0, 24.0, 0.4, 18.0);
        canvas.clear();
        draw_triangle(&mut canvas, &p).unwrap();

        let v = p.pixel_vertices();
        let mut path = HashSet::new();
        for i in 0..3 {
            path.extend(Line::new(v[i], v[(i + 1) % 3]));
        }

        let mut lit = 0;
        for y in 0..h as i32 {
            for x in 0..w as i32 {
                let value = canvas.pixel(x, y).unwrap();
                if path.contains(&Point::new(x, y)) {
                    assert_ne!(value, 0, "edge pixel ({}, {}) not drawn", x, y);
                    lit += 1;
                } else {
                    assert_eq!(value, 0, "stray pixel at ({}, {})", x, y);
                }
            }
        }
        assert!(lit > 0);
    }

    #[test]
    fn test_edge_colors() {
        let (w, h) = (300u32, 300u32);
        let mut bytes = vec![0u8; (w * 4 * h) as usize];
        let mut canvas = Canvas::new(&mut bytes, w, h, w * 4).unwrap();

        let p = pose(150.0, 150.0, 0.0, 100.0);
        draw_triangle(&mut canvas, &p).unwrap();

        let [v1, v2, v3] = p.pixel_vertices();
        assert_eq!(v2, Point::new(63, 200));
        assert_eq!(v3, Point::new(236, 200));

        // Points well inside each edge, away from shared vertices
        assert_eq!(canvas.pixel(150, 200), Some(0x0000_FF00));
        let red = Line::new(v1, v2).nth(40).unwrap();
        assert_eq!(canvas.pixel(red.x, red.y), Some(0x00FF_0000));
        let blue = Line::new(v3, v1).nth(40).unwrap();
        assert_eq!(canvas.pixel(blue.x, blue.y), Some(0x0000_00FF));
    }

    #[test]
    fn test_triangle_fully_offscreen_leaves_buffer_clear() {
        let mut bytes = vec![0u8; 32 * 4 * 32];
        let mut canvas = Canvas::new(&mut bytes, 32, 32, 128).unwrap();
        draw_triangle(&mut canvas, &pose(-500.0, -500.0, 1.0, 50.0)).unwrap();
        assert!(canvas.as_bytes().iter().all(|&b| b == 0));
    }
}
