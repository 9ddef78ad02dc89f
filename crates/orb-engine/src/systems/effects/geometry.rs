//! Triangle-list generation for particle streaks.
//! Output vertices are `[x, y, z, u, v]`, 5 floats each; `z` carries the color.

use super::segment_color::SegmentColor;

/// Floats per effects vertex.
pub const VERTEX_FLOATS: usize = 5;

/// Append a thick segment from `a` to `b` as two triangles (6 vertices).
/// Degenerate segments become a `width`-sized square so a resting particle still shows.
pub fn push_segment(out: &mut Vec<f32>, a: [f32; 2], b: [f32; 2], width: f32, color: SegmentColor) {
    let dx = b[0] - a[0];
    let dy = b[1] - a[1];
    let len = (dx * dx + dy * dy).sqrt();
    let (d, b) = if len < 0.001 {
        ([1.0, 0.0], [a[0] + width, a[1]])
    } else {
        ([dx / len, dy / len], b)
    };
    let half = width * 0.5;
    let p = [-d[1] * half, d[0] * half];
    let z = color.as_z();

    let a_left = [a[0] + p[0], a[1] + p[1], z, 0.0, 0.0];
    let a_right = [a[0] - p[0], a[1] - p[1], z, 1.0, 0.0];
    let b_left = [b[0] + p[0], b[1] + p[1], z, 0.0, 1.0];
    let b_right = [b[0] - p[0], b[1] - p[1], z, 1.0, 1.0];

    for v in [a_left, a_right, b_left, a_right, b_right, b_left] {
        out.extend_from_slice(&v);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_is_two_triangles() {
        let mut out = Vec::new();
        push_segment(&mut out, [0.0, 0.0], [10.0, 0.0], 2.0, SegmentColor::Red);
        assert_eq!(out.len(), 6 * VERTEX_FLOATS);
    }

    #[test]
    fn segment_width_is_perpendicular() {
        let mut out = Vec::new();
        push_segment(&mut out, [0.0, 0.0], [10.0, 0.0], 2.0, SegmentColor::Cyan);
        // first vertex: left side of `a`
        assert_eq!(&out[0..3], &[0.0, 1.0, SegmentColor::Cyan.as_z()]);
        // second vertex: right side of `a`
        assert_eq!(&out[5..7], &[0.0, -1.0]);
    }

    #[test]
    fn degenerate_segment_still_draws() {
        let mut out = Vec::new();
        push_segment(&mut out, [5.0, 5.0], [5.0, 5.0], 4.0, SegmentColor::White);
        assert_eq!(out.len(), 6 * VERTEX_FLOATS);
        assert!(out.iter().all(|f| f.is_finite()));
    }
}
