//! Cohen-Sutherland clipped line drawing
//!
//! Lines ignore the depth buffer and are always visible inside their viewport.

use bitflags::bitflags;
use quadview_core::Color;

use crate::framebuffer::{FrameBuffer, Rect};

bitflags! {
    /// Position of a point relative to a clip rectangle
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct OutCode: u8 {
        const LEFT   = 0b0001;
        const RIGHT  = 0b0010;
        /// Below the rectangle (y greater than max y, screen Y grows down)
        const BOTTOM = 0b0100;
        /// Above the rectangle (y less than min y)
        const TOP    = 0b1000;
    }
}

impl OutCode {
    /// Classify `(x, y)` against the inclusive bounds of `rect`
    pub fn compute(x: f32, y: f32, rect: &Rect) -> Self {
        let mut code = OutCode::empty();
        if x < rect.x as f32 {
            code |= OutCode::LEFT;
        } else if x > rect.max_x() as f32 {
            code |= OutCode::RIGHT;
        }
        if y < rect.y as f32 {
            code |= OutCode::TOP;
        } else if y > rect.max_y() as f32 {
            code |= OutCode::BOTTOM;
        }
        code
    }
}

/// Clip the segment `p0`-`p1` to `rect`.
///
/// Returns the visible part, or `None` when nothing of it lies inside.
pub fn clip_line(
    mut p0: (f32, f32),
    mut p1: (f32, f32),
    rect: &Rect,
) -> Option<((f32, f32), (f32, f32))> {
    if rect.is_empty() || ![p0.0, p0.1, p1.0, p1.1].iter().all(|v| v.is_finite()) {
        return None;
    }

    let (min_x, min_y) = (rect.x as f32, rect.y as f32);
    let (max_x, max_y) = (rect.max_x() as f32, rect.max_y() as f32);

    let mut code0 = OutCode::compute(p0.0, p0.1, rect);
    let mut code1 = OutCode::compute(p1.0, p1.1, rect);

    // Each endpoint moves at most once per axis; the bound covers float round-off
    for _ in 0..8 {
        if (code0 | code1).is_empty() {
            return Some((p0, p1));
        }
        if code0.intersects(code1) {
            return None;
        }

        let out = if code0.is_empty() { code1 } else { code0 };
        let (x0, y0) = p0;
        let (x1, y1) = p1;
        let point = if out.contains(OutCode::BOTTOM) {
            (x0 + (x1 - x0) * (max_y - y0) / (y1 - y0), max_y)
        } else if out.contains(OutCode::TOP) {
            (x0 + (x1 - x0) * (min_y - y0) / (y1 - y0), min_y)
        } else if out.contains(OutCode::RIGHT) {
            (max_x, y0 + (y1 - y0) * (max_x - x0) / (x1 - x0))
        } else {
            (min_x, y0 + (y1 - y0) * (min_x - x0) / (x1 - x0))
        };

        if out == code0 {
            p0 = point;
            code0 = OutCode::compute(p0.0, p0.1, rect);
        } else {
            p1 = point;
            code1 = OutCode::compute(p1.0, p1.1, rect);
        }
    }

    (code0 | code1).is_empty().then_some((p0, p1))
}

/// Draw a clipped line in a flat color, restricted to `clip`.
///
/// The segment is walked in `max(|dx|, |dy|)` equal steps; a zero-length segment draws
/// nothing. Returns the number of pixel writes.
pub fn draw_line(
    fb: &mut FrameBuffer,
    clip: Rect,
    p0: (f32, f32),
    p1: (f32, f32),
    color: Color,
) -> usize {
    let clip = clip.intersect(&fb.bounds());
    let Some(((x0, y0), (x1, y1))) = clip_line(p0, p1, &clip) else {
        return 0;
    };

    let (dx, dy) = (x1 - x0, y1 - y0);
    let steps = dx.abs().max(dy.abs());
    if steps == 0.0 {
        return 0;
    }

    let (x_inc, y_inc) = (dx / steps, dy / steps);
    let (mut x, mut y) = (x0, y0);
    let mut written = 0;
    for _ in 0..=steps as usize {
        let (px, py) = (x as i32, y as i32);
        if clip.contains(px, py) {
            fb.set_color(px, py, color);
            written += 1;
        }
        x += x_inc;
        y += y_inc;
    }
    written
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEW: Rect = Rect::new(0, 0, 100, 100);

    #[test]
    fn test_outcodes() {
        assert_eq!(OutCode::compute(50.0, 50.0, &VIEW), OutCode::empty());
        assert_eq!(OutCode::compute(-1.0, 50.0, &VIEW), OutCode::LEFT);
        assert_eq!(OutCode::compute(100.0, 50.0, &VIEW), OutCode::RIGHT);
        assert_eq!(OutCode::compute(50.0, -1.0, &VIEW), OutCode::TOP);
        assert_eq!(OutCode::compute(120.0, 120.0, &VIEW), OutCode::RIGHT | OutCode::BOTTOM);
        // Max bounds are inclusive
        assert_eq!(OutCode::compute(99.0, 99.0, &VIEW), OutCode::empty());
    }

    #[test]
    fn test_clip_left_crossing() {
        let clipped = clip_line((-10.0, 50.0), (50.0, 50.0), &VIEW);
        assert_eq!(clipped, Some(((0.0, 50.0), (50.0, 50.0))));
    }

    #[test]
    fn test_fully_inside_unchanged() {
        let clipped = clip_line((10.0, 20.0), (80.0, 90.0), &VIEW);
        assert_eq!(clipped, Some(((10.0, 20.0), (80.0, 90.0))));
    }

    #[test]
    fn test_fully_outside_rejected() {
        assert_eq!(clip_line((-10.0, -10.0), (-5.0, 200.0), &VIEW), None);
        assert_eq!(clip_line((150.0, 10.0), (200.0, 90.0), &VIEW), None);
        // Crosses the corner region without entering
        assert_eq!(clip_line((-50.0, 20.0), (20.0, -50.0), &VIEW), None);
    }

    #[test]
    fn test_clip_both_ends() {
        let ((x0, y0), (x1, y1)) = clip_line((-50.0, 50.0), (150.0, 50.0), &VIEW).unwrap();
        assert_eq!((x0, y0), (0.0, 50.0));
        assert_eq!((x1, y1), (99.0, 50.0));
    }

    #[test]
    fn test_non_finite_rejected() {
        assert_eq!(clip_line((f32::NAN, 0.0), (10.0, 10.0), &VIEW), None);
    }

    #[test]
    fn test_draw_outside_draws_nothing() {
        let mut fb = FrameBuffer::new(100, 100).unwrap();
        fb.clear(Color::BLACK);
        assert_eq!(draw_line(&mut fb, VIEW, (-10.0, -10.0), (-5.0, 200.0), Color::WHITE), 0);
        assert!(fb.pixels().iter().all(|p| p.color == Color::BLACK));
    }

    #[test]
    fn test_draw_horizontal() {
        let mut fb = FrameBuffer::new(100, 100).unwrap();
        fb.clear(Color::BLACK);
        let n = draw_line(&mut fb, VIEW, (-10.0, 50.0), (50.0, 50.0), Color::WHITE);
        assert_eq!(n, 51);
        assert_eq!(fb.color_at(0, 50), Some(Color::WHITE));
        assert_eq!(fb.color_at(50, 50), Some(Color::WHITE));
        assert_eq!(fb.color_at(51, 50), Some(Color::BLACK));
    }

    #[test]
    fn test_draw_ignores_depth() {
        let mut fb = FrameBuffer::new(10, 10).unwrap();
        fb.clear(Color::BLACK);
        fb.write_if_nearer(5, 5, -100.0, Color::GREEN);
        draw_line(&mut fb, Rect::new(0, 0, 10, 10), (0.0, 5.0), (9.0, 5.0), Color::WHITE);
        assert_eq!(fb.color_at(5, 5), Some(Color::WHITE));
    }

    #[test]
    fn test_zero_length_draws_nothing() {
        let mut fb = FrameBuffer::new(10, 10).unwrap();
        assert_eq!(draw_line(&mut fb, Rect::new(0, 0, 10, 10), (3.0, 3.0), (3.0, 3.0), Color::WHITE), 0);
    }

    #[test]
    fn test_draw_stays_in_clip() {
        let mut fb = FrameBuffer::new(20, 20).unwrap();
        fb.clear(Color::BLACK);
        let clip = Rect::new(10, 10, 10, 10);
        draw_line(&mut fb, clip, (0.0, 0.0), (19.0, 19.0), Color::WHITE);
        for y in 0..20 {
            for x in 0..20 {
                if fb.color_at(x, y) == Some(Color::WHITE) {
                    assert!(clip.contains(x, y), "pixel {},{} outside clip", x, y);
                }
            }
        }
        assert_eq!(fb.color_at(10, 10), Some(Color::WHITE));
    }
}
