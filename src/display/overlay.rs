//! Landmark overlay drawing
//!
//! Software rendering straight into the frame buffer: skeleton connections as
//! lines, landmarks as small squares.

use crate::capture::Frame;
use crate::hand::{Hand, HAND_CONNECTIONS};

const BONE_COLOR: u32 = 0x00FF_FFFF;
const JOINT_COLOR: u32 = 0x00FF_3030;
const JOINT_RADIUS: i64 = 2;

/// Draw every hand onto `frame`
pub fn draw_hands(frame: &mut Frame, hands: &[Hand]) {
    for hand in hands {
        draw_hand(frame, hand);
    }
}

fn draw_hand(frame: &mut Frame, hand: &Hand) {
    let points: Vec<Option<(i64, i64)>> = hand
        .landmarks
        .iter()
        .map(|lm| to_pixel(frame, lm.x, lm.y))
        .collect();

    for (a, b) in HAND_CONNECTIONS {
        if let (Some(&Some(p)), Some(&Some(q))) = (points.get(a), points.get(b)) {
            draw_line(frame, p, q, BONE_COLOR);
        }
    }
    for &(x, y) in points.iter().flatten() {
        fill_square(frame, x, y, JOINT_RADIUS, JOINT_COLOR);
    }
}

/// Map normalized coordinates to pixel coordinates
///
/// Points far off the frame are pulled in to within one frame size of it, so
/// a line never walks more than a few frame widths. Non-finite points are
/// not drawn.
fn to_pixel(frame: &Frame, x: f32, y: f32) -> Option<(i64, i64)> {
    Some((scale(x, frame.width)?, scale(y, frame.height)?))
}

fn scale(v: f32, extent: usize) -> Option<i64> {
    if !v.is_finite() {
        return None;
    }
    let extent = extent as f32;
    let pixel = (v * (extent - 1.0).max(0.0)).round();
    Some(pixel.clamp(-extent, 2.0 * extent) as i64)
}

/// Bresenham line
fn draw_line(frame: &mut Frame, (x0, y0): (i64, i64), (x1, y1): (i64, i64), color: u32) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let (mut x, mut y) = (x0, y0);
    let mut err = dx + dy;

    loop {
        frame.put(x, y, color);
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

fn fill_square(frame: &mut Frame, cx: i64, cy: i64, r: i64, color: u32) {
    for y in cy - r..=cy + r {
        for x in cx - r..=cx + r {
            frame.put(x, y, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hand::{index, synthesize_hand, Landmark};

    #[test]
    fn test_line_endpoints_are_drawn() {
        let mut frame = Frame::filled(10, 10, 0);
        draw_line(&mut frame, (1, 1), (8, 5), 7);
        assert_eq!(frame.get(1, 1), Some(7));
        assert_eq!(frame.get(8, 5), Some(7));
        // One pixel per column on a shallow line
        assert_eq!(frame.pixels.iter().filter(|&&p| p == 7).count(), 8);
    }

    #[test]
    fn test_joint_drawn_at_landmark() {
        let mut frame = Frame::filled(101, 101, 0);
        let hand = Hand::new(vec![Landmark::new(0.5, 0.25)]);
        draw_hands(&mut frame, &[hand]);
        assert_eq!(frame.get(50, 25), Some(JOINT_COLOR));
        assert_eq!(frame.get(52, 27), Some(JOINT_COLOR));
        assert_eq!(frame.get(53, 25), Some(0));
    }

    #[test]
    fn test_hand_near_edge_is_clipped() {
        let mut frame = Frame::filled(32, 32, 0);
        draw_hands(&mut frame, &[synthesize_hand(0.98, 0.02)]);
        assert!(frame.pixels.iter().any(|&p| p != 0));
    }

    #[test]
    fn test_outlying_landmarks_are_bounded() {
        assert_eq!(to_pixel(&Frame::filled(10, 20, 0), 1e6, -1e30), Some((20, -20)));
        assert_eq!(to_pixel(&Frame::filled(10, 20, 0), f32::NAN, 0.5), None);
        assert_eq!(to_pixel(&Frame::filled(10, 20, 0), 0.5, f32::INFINITY), None);

        let mut frame = Frame::filled(960, 540, 0);
        let mut far_right = synthesize_hand(0.5, 0.5);
        far_right.landmarks[index::INDEX_FINGER_TIP].x = 1e6;
        let mut far_left = synthesize_hand(0.5, 0.5);
        far_left.landmarks[index::INDEX_FINGER_TIP].x = -1e30;
        let mut broken = synthesize_hand(0.5, 0.5);
        broken.landmarks[index::WRIST].y = f32::NAN;

        draw_hands(&mut frame, &[far_right, far_left, broken]);
        // The rest of each hand is still drawn
        assert_eq!(frame.get(480, 270), Some(JOINT_COLOR));
        // The bone toward the far point runs off the right edge
        assert!((0..540).any(|y| frame.get(959, y) == Some(BONE_COLOR)));
    }
}
